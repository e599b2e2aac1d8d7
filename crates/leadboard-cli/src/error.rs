use anyhow::Error;
use leadboard_config::ConfigError;
use leadboard_core::CoreError;
use leadboard_grid::GridError;
use leadboard_source::SourceError;
use leadboard_store::{StoreError, StoreErrorKind};
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            });
        }
        if let Some(grid_err) = cause.downcast_ref::<GridError>() {
            return ExitCode::from(grid_exit_code(grid_err));
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ExitCode::from(store_exit_code(store_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(source_err) = cause.downcast_ref::<SourceError>() {
            return ExitCode::from(source_exit_code(source_err));
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn grid_exit_code(err: &GridError) -> u8 {
    match err {
        GridError::Core(_) => EXIT_INVALID_INPUT,
        GridError::Store(store_err) => store_exit_code(store_err),
        GridError::Export(_) | GridError::NotLoaded => EXIT_FAILURE,
    }
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::NotFound => EXIT_NOT_FOUND,
        StoreErrorKind::Core
        | StoreErrorKind::DuplicateId
        | StoreErrorKind::InvalidDataPath
        | StoreErrorKind::InvalidExportPath => EXIT_INVALID_INPUT,
        StoreErrorKind::MissingHomeDir | StoreErrorKind::Json | StoreErrorKind::Io => {
            EXIT_FAILURE
        }
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidPageSize(_)
        | ConfigError::UnknownColumn(_)
        | ConfigError::ColumnTooNarrow { .. }
        | ConfigError::EmptyValue(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn source_exit_code(err: &SourceError) -> u8 {
    match err {
        SourceError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            EXIT_NOT_FOUND
        }
        SourceError::Io { .. } | SourceError::Transport(_) => EXIT_FAILURE,
        SourceError::Status(404) => EXIT_NOT_FOUND,
        SourceError::Status(_) => EXIT_FAILURE,
        SourceError::InvalidUrl(_)
        | SourceError::Malformed(_)
        | SourceError::DuplicateId(_)
        | SourceError::Unavailable(_) => EXIT_INVALID_INPUT,
    }
}
