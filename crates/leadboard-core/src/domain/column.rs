use crate::domain::lead::Lead;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Checkbox,
    Id,
    Name,
    Company,
    Status,
    LeadScore,
    Action,
    Industry,
    Location,
    Email,
    Phone,
    AssignedTo,
    CreatedAt,
    UpdatedAt,
}

impl ColumnKey {
    /// Columns of the leads grid, left to right.
    pub const GRID: [ColumnKey; 7] = [
        ColumnKey::Checkbox,
        ColumnKey::Id,
        ColumnKey::Name,
        ColumnKey::Company,
        ColumnKey::Status,
        ColumnKey::LeadScore,
        ColumnKey::Action,
    ];

    /// Every column that carries lead data and can be filtered or sorted.
    pub const DATA: [ColumnKey; 12] = [
        ColumnKey::Id,
        ColumnKey::Name,
        ColumnKey::Company,
        ColumnKey::Status,
        ColumnKey::LeadScore,
        ColumnKey::Industry,
        ColumnKey::Location,
        ColumnKey::Email,
        ColumnKey::Phone,
        ColumnKey::AssignedTo,
        ColumnKey::CreatedAt,
        ColumnKey::UpdatedAt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKey::Checkbox => "checkbox",
            ColumnKey::Id => "id",
            ColumnKey::Name => "name",
            ColumnKey::Company => "company",
            ColumnKey::Status => "status",
            ColumnKey::LeadScore => "leadScore",
            ColumnKey::Action => "action",
            ColumnKey::Industry => "industry",
            ColumnKey::Location => "location",
            ColumnKey::Email => "email",
            ColumnKey::Phone => "phone",
            ColumnKey::AssignedTo => "assignedTo",
            ColumnKey::CreatedAt => "createdAt",
            ColumnKey::UpdatedAt => "updatedAt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnKey::Checkbox => "",
            ColumnKey::Id => "ID",
            ColumnKey::Name => "Name",
            ColumnKey::Company => "Company",
            ColumnKey::Status => "Status",
            ColumnKey::LeadScore => "Lead Score",
            ColumnKey::Action => "Action",
            ColumnKey::Industry => "Industry",
            ColumnKey::Location => "Location",
            ColumnKey::Email => "Email",
            ColumnKey::Phone => "Phone",
            ColumnKey::AssignedTo => "Assigned To",
            ColumnKey::CreatedAt => "Created",
            ColumnKey::UpdatedAt => "Updated",
        }
    }

    pub fn is_frozen(self) -> bool {
        matches!(self, ColumnKey::Checkbox | ColumnKey::Id | ColumnKey::Name)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKey::Id | ColumnKey::LeadScore)
    }

    pub fn is_data(self) -> bool {
        !matches!(self, ColumnKey::Checkbox | ColumnKey::Action)
    }

    /// Initial width in pixels.
    pub fn default_width(self) -> u32 {
        match self {
            ColumnKey::Checkbox => 50,
            ColumnKey::Id => 80,
            ColumnKey::Status | ColumnKey::LeadScore | ColumnKey::Action => 100,
            _ => 150,
        }
    }

    /// Cell text for filtering and rendering; empty for non-data columns.
    pub fn text(self, lead: &Lead) -> String {
        match self {
            ColumnKey::Checkbox | ColumnKey::Action => String::new(),
            ColumnKey::Id => lead.id.to_string(),
            ColumnKey::Name => lead.name.clone(),
            ColumnKey::Company => lead.company.clone(),
            ColumnKey::Status => lead.status.to_string(),
            ColumnKey::LeadScore => lead.lead_score.to_string(),
            ColumnKey::Industry => lead.industry.clone(),
            ColumnKey::Location => lead.location.clone(),
            ColumnKey::Email => lead.contact_info.email.clone(),
            ColumnKey::Phone => lead.contact_info.phone.clone(),
            ColumnKey::AssignedTo => lead.assigned_to.clone(),
            ColumnKey::CreatedAt => lead.created_at.clone(),
            ColumnKey::UpdatedAt => lead.updated_at.clone(),
        }
    }

    /// Numeric value for numeric columns.
    pub fn number(self, lead: &Lead) -> Option<i64> {
        match self {
            ColumnKey::Id => Some(lead.id.get()),
            ColumnKey::LeadScore => Some(lead.lead_score),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnKey {
    type Err = CoreError;

    /// Accepts `leadScore`, `lead_score`, `lead-score` and case variants.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        ColumnKey::GRID
            .into_iter()
            .chain(ColumnKey::DATA)
            .find(|key| key.as_str().to_lowercase() == wanted)
            .ok_or_else(|| CoreError::UnknownColumn(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnKey;

    #[test]
    fn parses_loose_spellings() {
        assert_eq!("leadScore".parse::<ColumnKey>().unwrap(), ColumnKey::LeadScore);
        assert_eq!("lead_score".parse::<ColumnKey>().unwrap(), ColumnKey::LeadScore);
        assert_eq!("Assigned-To".parse::<ColumnKey>().unwrap(), ColumnKey::AssignedTo);
        assert!("revenue".parse::<ColumnKey>().is_err());
    }

    #[test]
    fn frozen_columns_lead_the_grid() {
        let frozen: Vec<_> = ColumnKey::GRID
            .into_iter()
            .take_while(|key| key.is_frozen())
            .collect();
        assert_eq!(
            frozen,
            vec![ColumnKey::Checkbox, ColumnKey::Id, ColumnKey::Name]
        );
        assert_eq!(ColumnKey::Id.default_width(), 80);
        assert_eq!(ColumnKey::Industry.default_width(), 150);
    }
}
