use leadboard_core::time::format_display;
use leadboard_core::{format_badges, Interaction, Lead, LeadId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Expanded rows keyed by lead id, so expansion survives paging and sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedRows {
    ids: BTreeSet<LeadId>,
}

impl ExpandedRows {
    pub fn is_expanded(&self, id: LeadId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns whether the row is expanded afterwards.
    pub fn toggle(&mut self, id: LeadId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn prune(&mut self, removed: &BTreeSet<LeadId>) {
        self.ids.retain(|id| !removed.contains(id));
    }

    pub fn collapse_all(&mut self) {
        self.ids.clear();
    }
}

/// What an expanded row shows beneath the lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDetail<'a> {
    pub email: &'a str,
    pub phone: &'a str,
    pub badges: &'a [String],
    pub profile_picture: &'a str,
    pub interactions: &'a [Interaction],
}

impl<'a> RowDetail<'a> {
    pub fn for_lead(lead: &'a Lead) -> Self {
        Self {
            email: &lead.contact_info.email,
            phone: &lead.contact_info.phone,
            badges: &lead.badges,
            profile_picture: lead.profile_picture_or_placeholder(),
            interactions: &lead.interactions,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Email: {}", self.email),
            format!("Phone: {}", self.phone),
            format!("Badges: {}", format_badges(self.badges)),
            format!("Picture: {}", self.profile_picture),
        ];
        if self.interactions.is_empty() {
            lines.push("No interactions recorded.".to_string());
            return lines;
        }
        lines.push("Interactions:".to_string());
        for interaction in self.interactions {
            lines.push(format!(
                "  {} | {} | {} | {}",
                format_display(&interaction.date),
                interaction.kind,
                interaction.sales_rep,
                interaction.notes
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpandedRows, RowDetail};
    use leadboard_core::{Interaction, InteractionId, Lead, LeadId, PROFILE_PLACEHOLDER};
    use std::collections::BTreeSet;

    #[test]
    fn toggle_and_prune() {
        let mut rows = ExpandedRows::default();
        assert!(rows.toggle(LeadId(3)));
        assert!(rows.is_expanded(LeadId(3)));
        rows.prune(&BTreeSet::from([LeadId(3)]));
        assert!(!rows.is_expanded(LeadId(3)));
        assert!(rows.toggle(LeadId(4)));
        assert!(!rows.toggle(LeadId(4)));
    }

    #[test]
    fn detail_lists_interactions() {
        let mut lead: Lead =
            serde_json::from_str(r#"{"id": 1, "name": "A", "company": "B"}"#).unwrap();
        let detail = RowDetail::for_lead(&lead);
        assert_eq!(detail.profile_picture, PROFILE_PLACEHOLDER);
        assert_eq!(
            detail.lines().last().map(String::as_str),
            Some("No interactions recorded.")
        );

        lead.badges = vec!["VIP".to_string(), "Referral".to_string()];
        lead.interactions.push(Interaction {
            interaction_id: InteractionId(1),
            date: "2024-01-02".to_string(),
            kind: "Call".to_string(),
            notes: "Intro".to_string(),
            sales_rep: "Sam".to_string(),
        });
        let lines = RowDetail::for_lead(&lead).lines();
        assert!(lines.contains(&"Badges: VIP, Referral".to_string()));
        assert_eq!(lines.last().unwrap(), "  2024-01-02 | Call | Sam | Intro");
    }
}
