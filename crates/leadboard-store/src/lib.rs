pub mod accounts;
pub mod download;
pub mod error;
pub mod paths;
pub mod records;

pub use accounts::AccountsRepo;
pub use download::write_download;
pub use error::{Result, StoreError, StoreErrorKind};
pub use records::RecordStore;
