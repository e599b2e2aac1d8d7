pub mod error;
pub mod file;
pub mod http;
pub mod payload;
pub mod source;

pub use error::{Result, SourceError};
pub use file::FileSource;
pub use http::HttpSource;
pub use payload::{parse_credentials, parse_dynamic, parse_leads};
pub use source::{load_credentials, load_dynamic, load_leads, open_source, LeadSource};
