use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use leadboard_core::rules::{validate_page_size, PageOverflow, DEFAULT_PAGE_SIZE, MIN_COLUMN_WIDTH};
use leadboard_core::ColumnKey;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "leadboard";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Path or http(s) URL of the lead payload; `None` means `<data dir>/leads.json`.
    pub data_source: Option<String>,
    pub credentials: Option<String>,
    pub page_size: usize,
    pub page_overflow: PageOverflow,
    pub export_dir: Option<PathBuf>,
    pub column_widths: BTreeMap<ColumnKey, u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: None,
            credentials: None,
            page_size: DEFAULT_PAGE_SIZE,
            page_overflow: PageOverflow::Clamp,
            export_dir: None,
            column_widths: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid page_size value: {0}")]
    InvalidPageSize(usize),
    #[error("unknown column in [columns]: {0}")]
    UnknownColumn(String),
    #[error("column width for {column} must be at least {min}, got {width}")]
    ColumnTooNarrow { column: String, width: u32, min: u32 },
    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_source: Option<String>,
    credentials: Option<String>,
    page_size: Option<usize>,
    page_overflow: Option<PageOverflow>,
    export_dir: Option<PathBuf>,
    columns: Option<BTreeMap<String, u32>>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    config.data_source = non_empty("data_source", parsed.data_source)?;
    config.credentials = non_empty("credentials", parsed.credentials)?;

    if let Some(size) = parsed.page_size {
        config.page_size = validate_page_size(size).ok_or(ConfigError::InvalidPageSize(size))?;
    }
    if let Some(overflow) = parsed.page_overflow {
        config.page_overflow = overflow;
    }
    if let Some(dir) = parsed.export_dir {
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyValue("export_dir"));
        }
        config.export_dir = Some(expand_home(dir)?);
    }

    for (name, width) in parsed.columns.unwrap_or_default() {
        let key: ColumnKey = name
            .parse()
            .map_err(|_| ConfigError::UnknownColumn(name.clone()))?;
        if width < MIN_COLUMN_WIDTH {
            return Err(ConfigError::ColumnTooNarrow {
                column: name,
                width,
                min: MIN_COLUMN_WIDTH,
            });
        }
        config.column_widths.insert(key, width);
    }

    Ok(config)
}

fn non_empty(field: &'static str, value: Option<String>) -> Result<Option<String>> {
    match value {
        Some(raw) if raw.trim().is_empty() => Err(ConfigError::EmptyValue(field)),
        Some(raw) => Ok(Some(raw.trim().to_string())),
        None => Ok(None),
    }
}

fn expand_home(path: PathBuf) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path),
    }
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, ConfigError, ConfigFile};
    use leadboard_core::rules::PageOverflow;
    use leadboard_core::ColumnKey;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            data_source: Some(" https://example.test/leads.json ".to_string()),
            page_size: Some(25),
            page_overflow: Some(PageOverflow::Empty),
            columns: Some(BTreeMap::from([("lead_score".to_string(), 120)])),
            ..Default::default()
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(
            merged.data_source.as_deref(),
            Some("https://example.test/leads.json")
        );
        assert_eq!(merged.page_size, 25);
        assert_eq!(merged.page_overflow, PageOverflow::Empty);
        assert_eq!(merged.column_widths.get(&ColumnKey::LeadScore), Some(&120));
    }

    #[test]
    fn merge_config_rejects_out_of_range_values() {
        let zero_page = ConfigFile {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            merge_config(zero_page),
            Err(ConfigError::InvalidPageSize(0))
        ));

        let narrow = ConfigFile {
            columns: Some(BTreeMap::from([("name".to_string(), 10)])),
            ..Default::default()
        };
        assert!(matches!(
            merge_config(narrow),
            Err(ConfigError::ColumnTooNarrow { .. })
        ));

        let unknown = ConfigFile {
            columns: Some(BTreeMap::from([("revenue".to_string(), 80)])),
            ..Default::default()
        };
        assert!(matches!(
            merge_config(unknown),
            Err(ConfigError::UnknownColumn(_))
        ));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "data_source = \"leads.json\"\npage_overflow = \"clamp\"\n[columns]\nname = 200\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.data_source.as_deref(), Some("leads.json"));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.column_widths.get(&ColumnKey::Name), Some(&200));
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "rows_per_page = 5\n").expect("write config");
        restrict_permissions(&path);

        assert!(matches!(
            load_at_path(&path, true),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "page_size = 5\n").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        assert!(matches!(
            load_at_path(&path, true),
            Err(ConfigError::InsecurePermissions(_))
        ));
    }
}
