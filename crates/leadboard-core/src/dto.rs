use crate::domain::{Interaction, Lead, LeadId, LeadStatus};
use serde::{Deserialize, Serialize};

/// Row shape for `list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSummaryDto {
    pub id: LeadId,
    pub name: String,
    pub company: String,
    pub status: LeadStatus,
    pub lead_score: i64,
    pub assigned_to: String,
}

impl From<&Lead> for LeadSummaryDto {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name.clone(),
            company: lead.company.clone(),
            status: lead.status,
            lead_score: lead.lead_score,
            assigned_to: lead.assigned_to.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadPageDto {
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub leads: Vec<LeadSummaryDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDetailDto {
    pub id: LeadId,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub status: LeadStatus,
    pub lead_score: i64,
    pub assigned_to: String,
    pub industry: String,
    pub location: String,
    pub badges: Vec<String>,
    pub profile_picture: String,
    pub created_at: String,
    pub updated_at: String,
    pub interactions: Vec<Interaction>,
}

impl From<&Lead> for LeadDetailDto {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name.clone(),
            company: lead.company.clone(),
            email: lead.contact_info.email.clone(),
            phone: lead.contact_info.phone.clone(),
            status: lead.status,
            lead_score: lead.lead_score,
            assigned_to: lead.assigned_to.clone(),
            industry: lead.industry.clone(),
            location: lead.location.clone(),
            badges: lead.badges.clone(),
            profile_picture: lead.profile_picture_or_placeholder().to_string(),
            created_at: lead.created_at.clone(),
            updated_at: lead.updated_at.clone(),
            interactions: lead.interactions.clone(),
        }
    }
}
