use chrono::{DateTime, Local, SecondsFormat, Utc};

pub type Timestamp = DateTime<Utc>;

pub fn now_utc() -> Timestamp {
    Utc::now()
}

/// `2024-03-01T09:30:00.000Z`, the form lead timestamps are stored in.
pub fn format_iso8601(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_iso8601(raw: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn epoch_millis(ts: Timestamp) -> i64 {
    ts.timestamp_millis()
}

/// Local `YYYY-MM-DD HH:MM`; unparseable input is shown as-is.
pub fn format_display(raw: &str) -> String {
    match parse_iso8601(raw) {
        Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{epoch_millis, format_display, format_iso8601, parse_iso8601};
    use chrono::{Local, TimeZone, Utc};

    #[test]
    fn iso8601_uses_millis_and_z_suffix() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(format_iso8601(ts), "2024-03-01T09:30:00.000Z");
        assert_eq!(parse_iso8601("2024-03-01T09:30:00.000Z"), Some(ts));
        assert_eq!(epoch_millis(ts), ts.timestamp() * 1000);
    }

    #[test]
    fn display_falls_back_to_raw_text() {
        assert_eq!(format_display("yesterday"), "yesterday");
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(
            format_display("2024-03-01T09:30:00.000Z"),
            ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
        );
    }
}
