use crate::error::{Result, StoreError};
use leadboard_core::time::{epoch_millis, format_iso8601, Timestamp};
use leadboard_core::{
    Interaction, InteractionDraft, InteractionId, Lead, LeadDraft, LeadId, LeadPatch, LeadStatus,
};
use std::collections::BTreeSet;

/// The canonical, ordered lead collection. Vector order is display order when no sort is active.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    leads: Vec<Lead>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_leads(leads: Vec<Lead>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for lead in &leads {
            if !seen.insert(lead.id) {
                return Err(StoreError::DuplicateId(lead.id));
            }
        }
        Ok(Self { leads })
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lead> {
        self.leads.iter()
    }

    pub fn snapshot(&self) -> &[Lead] {
        &self.leads
    }

    pub fn get(&self, id: LeadId) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    pub fn contains(&self, id: LeadId) -> bool {
        self.position(id).is_some()
    }

    /// Leads whose ids are in `ids`, in store order.
    pub fn resolve(&self, ids: &BTreeSet<LeadId>) -> Vec<&Lead> {
        self.leads
            .iter()
            .filter(|lead| ids.contains(&lead.id))
            .collect()
    }

    pub fn next_id(&self) -> LeadId {
        self.leads
            .iter()
            .map(|lead| lead.id)
            .max()
            .map(LeadId::next)
            .unwrap_or(LeadId(1))
    }

    /// Appends a new lead with the next free id. Validation is the caller's job.
    pub fn create(&mut self, now: Timestamp, draft: LeadDraft) -> Lead {
        let lead = draft.into_lead(self.next_id(), &format_iso8601(now));
        self.leads.push(lead.clone());
        lead
    }

    pub fn update(&mut self, now: Timestamp, id: LeadId, patch: LeadPatch) -> Option<Lead> {
        let index = self.position(id)?;
        let lead = &mut self.leads[index];
        patch.apply(lead);
        lead.updated_at = format_iso8601(now);
        Some(lead.clone())
    }

    pub fn delete(&mut self, ids: &BTreeSet<LeadId>) -> usize {
        let before = self.leads.len();
        self.leads.retain(|lead| !ids.contains(&lead.id));
        before - self.leads.len()
    }

    /// Moves `from` into the slot `to` occupied: after `to` when moving down, before it when
    /// moving up. Returns false when nothing moved.
    pub fn reorder(&mut self, from: LeadId, to: LeadId) -> bool {
        if from == to {
            return false;
        }
        let (Some(from_index), Some(to_index)) = (self.position(from), self.position(to)) else {
            return false;
        };
        let lead = self.leads.remove(from_index);
        self.leads.insert(to_index, lead);
        true
    }

    pub fn reset_scores(&mut self, now: Timestamp, ids: &BTreeSet<LeadId>) -> usize {
        let stamp = format_iso8601(now);
        let mut touched = 0;
        for lead in self.leads.iter_mut().filter(|lead| ids.contains(&lead.id)) {
            lead.lead_score = 0;
            lead.updated_at = stamp.clone();
            touched += 1;
        }
        touched
    }

    /// Appends an interaction. Without an explicit id the current epoch milliseconds are used,
    /// bumped until unique within the lead.
    pub fn add_interaction(
        &mut self,
        now: Timestamp,
        id: LeadId,
        draft: InteractionDraft,
    ) -> Option<Interaction> {
        let index = self.position(id)?;
        let lead = &mut self.leads[index];
        let taken: BTreeSet<InteractionId> = lead
            .interactions
            .iter()
            .map(|interaction| interaction.interaction_id)
            .collect();
        let mut interaction_id = draft
            .interaction_id
            .unwrap_or(InteractionId(epoch_millis(now)));
        while taken.contains(&interaction_id) {
            interaction_id = interaction_id.next();
        }
        let interaction = draft.into_interaction(interaction_id);
        lead.interactions.push(interaction.clone());
        lead.updated_at = format_iso8601(now);
        Some(interaction)
    }

    /// Lead counts per status, in `LeadStatus::ALL` order.
    pub fn status_counts(&self) -> [(LeadStatus, usize); 4] {
        LeadStatus::ALL.map(|status| {
            let count = self
                .leads
                .iter()
                .filter(|lead| lead.status == status)
                .count();
            (status, count)
        })
    }

    fn position(&self, id: LeadId) -> Option<usize> {
        self.leads.iter().position(|lead| lead.id == id)
    }
}
