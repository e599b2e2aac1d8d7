use anyhow::{anyhow, Context as _, Result};
use leadboard_core::{ColumnKey, LeadId};
use leadboard_store::paths;
use std::collections::BTreeSet;
use std::str::FromStr;

pub fn parse_lead_id(raw: &str) -> Result<LeadId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("lead id cannot be empty"));
    }
    LeadId::from_str(trimmed).map_err(|_| anyhow!("invalid lead id: {trimmed}"))
}

/// Parses `1,2, 3` into a set; empty segments are ignored.
pub fn parse_id_list(raw: &str) -> Result<BTreeSet<LeadId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_lead_id)
        .collect()
}

/// Parses a `column=query` filter argument.
pub fn parse_column_filter(raw: &str) -> Result<(ColumnKey, String)> {
    let (column, query) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid filter {raw:?}: expected column=query"))?;
    let key = ColumnKey::from_str(column.trim())?;
    Ok((key, query.to_string()))
}

/// `--source` wins over `data_source`; both fall back to `<data dir>/leads.json`.
pub fn resolve_source(flag: Option<&str>, configured: Option<&str>) -> Result<String> {
    if let Some(location) = flag.or(configured) {
        let trimmed = location.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
    let path = paths::default_source_path().with_context(|| "resolve default lead source")?;
    Ok(path.to_string_lossy().into_owned())
}
