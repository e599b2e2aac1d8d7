use crate::error::Result;
use crate::paths;
use leadboard_core::{Credentials, RegisteredUser};
use std::fs;
use std::path::{Path, PathBuf};

/// The single locally registered account, kept as JSON in the data directory.
pub struct AccountsRepo {
    path: PathBuf,
}

impl AccountsRepo {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: paths::registered_user_path_in(data_dir),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces any previously registered user.
    pub fn save(&self, user: &RegisteredUser) -> Result<()> {
        paths::ensure_parent_dir(&self.path)?;
        let body = serde_json::to_vec_pretty(user)?;
        fs::write(&self.path, body)?;
        paths::restrict_file_permissions(&self.path)?;
        Ok(())
    }

    pub fn load(&self) -> Result<Option<RegisteredUser>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let body = fs::read(&self.path)?;
        Ok(Some(serde_json::from_slice(&body)?))
    }

    /// True when the pair matches a known credential or the local user.
    pub fn authenticate(&self, known: &[Credentials], login: &Credentials) -> Result<bool> {
        if known
            .iter()
            .any(|entry| entry.matches(&login.username, &login.password))
        {
            return Ok(true);
        }
        Ok(self
            .load()?
            .is_some_and(|user| user.credentials() == *login))
    }
}
