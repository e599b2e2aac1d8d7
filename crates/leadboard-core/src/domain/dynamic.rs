use serde_json::{Map, Value};

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

/// A field of a schemaless record, classified once when the record is ingested.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(String),
    Image(String),
    NestedList(Vec<DynamicRecord>),
    NestedObject(DynamicRecord),
}

impl FieldValue {
    pub fn from_json(key: &str, value: &Value) -> Self {
        match value {
            Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => {
                FieldValue::NestedList(items.iter().filter_map(DynamicRecord::from_json).collect())
            }
            Value::Object(map) => FieldValue::NestedObject(DynamicRecord::from_map(map)),
            Value::String(text) if is_image_value(text) => FieldValue::Image(image_src(key, text)),
            other => FieldValue::Scalar(scalar_text(other)),
        }
    }

    pub fn is_expandable(&self) -> bool {
        matches!(self, FieldValue::NestedList(_) | FieldValue::NestedObject(_))
    }

    /// Short text for a table cell; nested values render as a summary.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Scalar(text) => text.clone(),
            FieldValue::Image(src) => format!("[image] {src}"),
            FieldValue::NestedList(rows) => format!("[{} item(s)]", rows.len()),
            FieldValue::NestedObject(record) => format!("{{{} field(s)}}", record.fields.len()),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        match self {
            FieldValue::Scalar(text) | FieldValue::Image(text) => {
                text.to_lowercase().contains(needle)
            }
            FieldValue::NestedList(rows) => rows.iter().any(|row| row.contains(needle)),
            FieldValue::NestedObject(record) => record.contains(needle),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    pub fields: Vec<(String, FieldValue)>,
}

impl DynamicRecord {
    /// Returns `None` for anything that is not a JSON object.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from_map(map)),
            _ => None,
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        let fields = map
            .iter()
            .map(|(key, value)| (key.clone(), FieldValue::from_json(key, value)))
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Case-insensitive substring match against every value, nested ones included.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty() || self.contains(&needle)
    }

    fn contains(&self, needle: &str) -> bool {
        self.fields.iter().any(|(_, value)| value.contains(needle))
    }
}

pub fn is_image_value(value: &str) -> bool {
    if let Some(rest) = value.strip_prefix("data:image/") {
        if let Some((subtype, _)) = rest.split_once(";base64,") {
            return !subtype.is_empty() && subtype.chars().all(|c| c.is_ascii_alphabetic());
        }
    }
    let lower = value.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn image_src(key: &str, src: &str) -> String {
    if key == "profilePicture" {
        if let Some(rest) = src.strip_prefix("public/") {
            return format!("/{rest}");
        }
    }
    src.to_string()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{is_image_value, DynamicRecord, FieldValue};
    use serde_json::json;

    #[test]
    fn classifies_fields_once() {
        let record = DynamicRecord::from_json(&json!({
            "id": 7,
            "name": "Acme",
            "profilePicture": "public/images/acme.png",
            "tags": ["a", "b"],
            "missing": null,
            "contactInfo": {"email": "a@acme.test"},
            "interactions": [{"type": "call"}, {"type": "email"}]
        }))
        .unwrap();

        assert_eq!(record.get("id"), Some(&FieldValue::Scalar("7".to_string())));
        assert_eq!(
            record.get("profilePicture"),
            Some(&FieldValue::Image("/images/acme.png".to_string()))
        );
        assert_eq!(record.get("tags"), Some(&FieldValue::Scalar("a,b".to_string())));
        assert_eq!(record.get("missing"), Some(&FieldValue::Scalar(String::new())));
        assert!(matches!(record.get("contactInfo"), Some(FieldValue::NestedObject(_))));
        match record.get("interactions") {
            Some(FieldValue::NestedList(rows)) => assert_eq!(rows.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn matches_searches_nested_values() {
        let record = DynamicRecord::from_json(&json!({
            "name": "Acme",
            "interactions": [{"notes": "Discussed Pricing"}]
        }))
        .unwrap();
        assert!(record.matches("pricing"));
        assert!(record.matches(""));
        assert!(!record.matches("globex"));
    }

    #[test]
    fn non_objects_are_not_records() {
        assert!(DynamicRecord::from_json(&json!([1, 2])).is_none());
        assert!(DynamicRecord::from_json(&json!("x")).is_none());
    }

    #[test]
    fn image_detection() {
        assert!(is_image_value("data:image/png;base64,AAAA"));
        assert!(is_image_value("https://cdn.test/a.JPG"));
        assert!(is_image_value("photos/b.webp"));
        assert!(!is_image_value("https://cdn.test/page.html"));
        assert!(!is_image_value("data:text/plain;base64,AAAA"));
    }
}
