use crate::domain::email::is_valid_email;
use crate::domain::ids::LeadId;
use crate::domain::interaction::Interaction;
use crate::domain::status::LeadStatus;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PROFILE_PLACEHOLDER: &str = "https://via.placeholder.com/150";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub lead_score: i64,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    /// Source keys this model does not know about, kept so they survive a round trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Lead {
    pub fn profile_picture_or_placeholder(&self) -> &str {
        match self.profile_picture.as_deref() {
            Some(src) if !src.trim().is_empty() => src,
            _ => PROFILE_PLACEHOLDER,
        }
    }
}

/// Input for creating a lead; the store assigns the id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    pub name: String,
    pub company: String,
    pub contact_info: ContactInfo,
    pub lead_score: i64,
    pub status: LeadStatus,
    pub assigned_to: String,
    pub industry: String,
    pub location: String,
    pub badges: Vec<String>,
    pub profile_picture: Option<String>,
    pub interactions: Vec<Interaction>,
}

impl LeadDraft {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_lead_fields(
            &self.name,
            &self.company,
            &self.contact_info.email,
            &self.contact_info.phone,
        )
    }

    pub fn into_lead(self, id: LeadId, now: &str) -> Lead {
        Lead {
            id,
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            contact_info: ContactInfo {
                email: self.contact_info.email.trim().to_string(),
                phone: self.contact_info.phone.trim().to_string(),
            },
            lead_score: self.lead_score,
            status: self.status,
            assigned_to: self.assigned_to.trim().to_string(),
            industry: self.industry.trim().to_string(),
            location: self.location.trim().to_string(),
            badges: self.badges,
            profile_picture: self.profile_picture,
            interactions: self.interactions,
            created_at: now.to_string(),
            updated_at: now.to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub lead_score: Option<i64>,
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub badges: Option<Vec<String>>,
    pub profile_picture: Option<Option<String>>,
}

impl LeadPatch {
    pub fn is_empty(&self) -> bool {
        self == &LeadPatch::default()
    }

    /// Validates the patch as it would apply to `lead`.
    pub fn validate_against(&self, lead: &Lead) -> Result<(), CoreError> {
        validate_lead_fields(
            self.name.as_deref().unwrap_or(&lead.name),
            self.company.as_deref().unwrap_or(&lead.company),
            self.email.as_deref().unwrap_or(&lead.contact_info.email),
            self.phone.as_deref().unwrap_or(&lead.contact_info.phone),
        )
    }

    /// Merges the set fields into `lead`. Timestamps are the caller's concern.
    pub fn apply(self, lead: &mut Lead) {
        if let Some(name) = self.name {
            lead.name = name.trim().to_string();
        }
        if let Some(company) = self.company {
            lead.company = company.trim().to_string();
        }
        if let Some(email) = self.email {
            lead.contact_info.email = email.trim().to_string();
        }
        if let Some(phone) = self.phone {
            lead.contact_info.phone = phone.trim().to_string();
        }
        if let Some(score) = self.lead_score {
            lead.lead_score = score;
        }
        if let Some(status) = self.status {
            lead.status = status;
        }
        if let Some(assigned_to) = self.assigned_to {
            lead.assigned_to = assigned_to.trim().to_string();
        }
        if let Some(industry) = self.industry {
            lead.industry = industry.trim().to_string();
        }
        if let Some(location) = self.location {
            lead.location = location.trim().to_string();
        }
        if let Some(badges) = self.badges {
            lead.badges = badges;
        }
        if let Some(picture) = self.profile_picture {
            lead.profile_picture = picture;
        }
    }
}

/// Parses the lead-score form field; blank input means 0.
pub fn parse_lead_score(raw: &str) -> Result<i64, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| CoreError::InvalidLeadScore(trimmed.to_string()))
}

fn validate_lead_fields(
    name: &str,
    company: &str,
    email: &str,
    phone: &str,
) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::MissingField("name"));
    }
    if company.trim().is_empty() {
        return Err(CoreError::MissingField("company"));
    }
    if email.trim().is_empty() {
        return Err(CoreError::MissingField("email"));
    }
    if !is_valid_email(email) {
        return Err(CoreError::InvalidEmail);
    }
    if phone.trim().is_empty() {
        return Err(CoreError::MissingField("phone"));
    }
    Ok(())
}
