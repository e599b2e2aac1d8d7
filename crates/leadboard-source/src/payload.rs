use crate::{Result, SourceError};
use leadboard_core::{Credentials, DynamicRecord, Lead};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::warn;

/// Decodes a lead payload. A lone object is treated as a one-element array.
pub fn parse_leads(body: &str) -> Result<Vec<Lead>> {
    let items = root_items(body)?;
    let mut seen = BTreeSet::new();
    let mut leads = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let lead: Lead = serde_json::from_value(item)
            .map_err(|err| SourceError::Malformed(format!("record {index}: {err}")))?;
        if !seen.insert(lead.id) {
            return Err(SourceError::DuplicateId(lead.id));
        }
        leads.push(lead);
    }
    Ok(leads)
}

/// Decodes schemaless records; non-object entries are skipped.
pub fn parse_dynamic(body: &str) -> Result<Vec<DynamicRecord>> {
    let items = root_items(body)?;
    let total = items.len();
    let records: Vec<_> = items.iter().filter_map(DynamicRecord::from_json).collect();
    if records.len() != total {
        warn!(dropped = total - records.len(), "skipped non-object records");
    }
    Ok(records)
}

pub fn parse_credentials(body: &str) -> Result<Vec<Credentials>> {
    let items = root_items(body)?;
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(SourceError::from))
        .collect()
}

fn root_items(body: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => Ok(items),
        object @ Value::Object(_) => Ok(vec![object]),
        other => Err(SourceError::Malformed(format!(
            "expected an array or object, found {}",
            kind_name(&other)
        ))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_credentials, parse_dynamic, parse_leads};
    use crate::SourceError;
    use leadboard_core::{LeadId, LeadStatus};

    #[test]
    fn single_object_is_wrapped() {
        let leads = parse_leads(r#"{"id": 4, "name": "Solo", "company": "One", "status": "Cold"}"#)
            .unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id, LeadId(4));
        assert_eq!(leads[0].status, LeadStatus::Cold);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = parse_leads(r#"[{"id": 1}, {"id": 2}, {"id": 1}]"#).unwrap_err();
        assert!(matches!(err, SourceError::DuplicateId(LeadId(1))));
    }

    #[test]
    fn malformed_records_report_their_index() {
        let err = parse_leads(r#"[{"id": 1}, {"id": "two"}]"#).unwrap_err();
        assert!(err.to_string().contains("record 1"));

        let err = parse_leads("42").unwrap_err();
        assert!(err.to_string().contains("a number"));
    }

    #[test]
    fn dynamic_records_skip_scalars() {
        let records = parse_dynamic(r#"[{"a": 1}, 5, {"b": "x"}]"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn credentials_decode() {
        let creds = parse_credentials(r#"[{"username": "admin", "password": "pw"}]"#).unwrap();
        assert!(creds[0].matches("admin", "pw"));
    }
}
