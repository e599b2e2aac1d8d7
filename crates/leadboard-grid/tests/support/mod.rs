#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use leadboard_core::time::{format_iso8601, Timestamp};
use leadboard_core::{ContactInfo, Lead, LeadDraft, LeadId, LeadStatus};

pub fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

pub fn lead(id: i64, name: &str, company: &str, status: LeadStatus, score: i64) -> Lead {
    let stamp = format_iso8601(now());
    Lead {
        id: LeadId(id),
        name: name.to_string(),
        company: company.to_string(),
        contact_info: ContactInfo {
            email: format!("lead{id}@example.com"),
            phone: format!("555-{id:04}"),
        },
        lead_score: score,
        status,
        assigned_to: String::new(),
        industry: "Software".to_string(),
        location: "Berlin".to_string(),
        badges: Vec::new(),
        profile_picture: None,
        interactions: Vec::new(),
        created_at: stamp.clone(),
        updated_at: stamp,
        extra: serde_json::Map::new(),
    }
}

/// Ids 1..=25, statuses cycling Hot/Warm/Cold/New; only 3 and 17 work at an "acme" company.
pub fn twenty_five() -> Vec<Lead> {
    (1..=25)
        .map(|id| {
            let status = LeadStatus::ALL[((id - 1) % 4) as usize];
            let company = match id {
                3 => "Acme Corp".to_string(),
                17 => "ACME Logistics".to_string(),
                _ => format!("Globex {id}"),
            };
            lead(id, &format!("Lead {id}"), &company, status, (id * 7) % 100)
        })
        .collect()
}

pub fn draft(name: &str) -> LeadDraft {
    LeadDraft {
        name: name.to_string(),
        company: "Initech".to_string(),
        contact_info: ContactInfo {
            email: "new@initech.test".to_string(),
            phone: "555-0000".to_string(),
        },
        ..Default::default()
    }
}
