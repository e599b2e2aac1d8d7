use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    Hot,
    Warm,
    Cold,
    #[default]
    New,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::Hot,
        LeadStatus::Warm,
        LeadStatus::Cold,
        LeadStatus::New,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::Hot => "Hot",
            LeadStatus::Warm => "Warm",
            LeadStatus::Cold => "Cold",
            LeadStatus::New => "New",
        }
    }

    /// Next status in form-picker order, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            LeadStatus::Hot => LeadStatus::Warm,
            LeadStatus::Warm => LeadStatus::Cold,
            LeadStatus::Cold => LeadStatus::New,
            LeadStatus::New => LeadStatus::Hot,
        }
    }

    pub fn cycle_back(self) -> Self {
        match self {
            LeadStatus::Hot => LeadStatus::New,
            LeadStatus::Warm => LeadStatus::Hot,
            LeadStatus::Cold => LeadStatus::Warm,
            LeadStatus::New => LeadStatus::Cold,
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownStatus(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::LeadStatus;

    #[test]
    fn parse_status_is_case_insensitive() {
        assert_eq!("hot".parse::<LeadStatus>().unwrap(), LeadStatus::Hot);
        assert_eq!(" New ".parse::<LeadStatus>().unwrap(), LeadStatus::New);
        assert!("Lukewarm".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn status_serializes_as_label() {
        let json = serde_json::to_string(&LeadStatus::Warm).unwrap();
        assert_eq!(json, "\"Warm\"");
        let parsed: LeadStatus = serde_json::from_str("\"Cold\"").unwrap();
        assert_eq!(parsed, LeadStatus::Cold);
        assert!(serde_json::from_str::<LeadStatus>("\"cold\"").is_err());
    }
}
