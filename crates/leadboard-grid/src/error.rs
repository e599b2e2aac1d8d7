use leadboard_core::CoreError;
use leadboard_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("export failed: {0}")]
    Export(String),
    #[error("no leads loaded")]
    NotLoaded,
}

impl From<csv::Error> for GridError {
    fn from(err: csv::Error) -> Self {
        GridError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
