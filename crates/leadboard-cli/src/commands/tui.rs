use anyhow::{anyhow, Result};
use clap::Args;
use std::env;
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, Args)]
pub struct TuiArgs {
    /// Write tracing output to this file instead of discarding it
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub fn launch(
    config_path: Option<PathBuf>,
    source: Option<String>,
    args: TuiArgs,
    verbose: bool,
) -> Result<()> {
    if verbose {
        if let Some(location) = source.as_deref() {
            eprintln!("source: {location}");
        }
    }
    let mut command = build_command(config_path, source, args.log_file);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = command.exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        use anyhow::Context as _;
        let status = command.status().with_context(|| "launch leadboard-tui")?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn build_command(
    config_path: Option<PathBuf>,
    source: Option<String>,
    log_file: Option<PathBuf>,
) -> Command {
    let mut command = Command::new(find_tui_binary());
    if let Some(path) = config_path {
        command.arg("--config").arg(path);
    }
    if let Some(location) = source {
        command.arg("--source").arg(location);
    }
    if let Some(path) = log_file {
        command.arg("--log-file").arg(path);
    }
    command
}

fn find_tui_binary() -> PathBuf {
    let name = format!("leadboard-tui{}", env::consts::EXE_SUFFIX);
    if let Ok(current) = env::current_exe() {
        if let Some(dir) = current.parent() {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}

fn exec_error(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        return anyhow!(
            "leadboard-tui binary not found; build it with `cargo build -p leadboard-tui` or install the package"
        );
    }
    anyhow!("launch leadboard-tui failed: {}", err)
}
