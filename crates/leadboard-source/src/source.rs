use crate::file::FileSource;
use crate::http::HttpSource;
use crate::payload::{parse_credentials, parse_dynamic, parse_leads};
use crate::Result;
use leadboard_core::{Credentials, DynamicRecord, Lead};
use tracing::debug;

/// Something that hands back a JSON payload in one blocking call.
pub trait LeadSource {
    fn source_name(&self) -> &'static str;
    fn describe(&self) -> String;
    fn fetch_json(&self) -> Result<String>;
}

/// Picks the HTTP source for `http://`/`https://` locations and the file source otherwise.
pub fn open_source(location: &str) -> Box<dyn LeadSource> {
    let trimmed = location.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpSource::new(trimmed.to_string()))
    } else {
        Box::new(FileSource::new(trimmed))
    }
}

pub fn load_leads(source: &dyn LeadSource) -> Result<Vec<Lead>> {
    let body = source.fetch_json()?;
    let leads = parse_leads(&body)?;
    debug!(
        source = source.source_name(),
        location = %source.describe(),
        count = leads.len(),
        "loaded leads"
    );
    Ok(leads)
}

pub fn load_dynamic(source: &dyn LeadSource) -> Result<Vec<DynamicRecord>> {
    let body = source.fetch_json()?;
    let records = parse_dynamic(&body)?;
    debug!(
        source = source.source_name(),
        count = records.len(),
        "loaded dynamic records"
    );
    Ok(records)
}

pub fn load_credentials(source: &dyn LeadSource) -> Result<Vec<Credentials>> {
    let body = source.fetch_json()?;
    parse_credentials(&body)
}
