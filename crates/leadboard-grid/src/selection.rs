use leadboard_core::{Lead, LeadId};
use leadboard_store::RecordStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// State of the header checkbox for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheck {
    Unchecked,
    Indeterminate,
    Checked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarMode {
    /// Nothing selected: create and export-all.
    Browse,
    Selected { count: usize, can_edit: bool },
}

impl ToolbarMode {
    pub fn label(self) -> String {
        match self {
            ToolbarMode::Browse => String::new(),
            ToolbarMode::Selected { count, .. } => format!("{count} item(s) selected"),
        }
    }
}

/// Selected lead ids, independent of page, filter and sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: BTreeSet<LeadId>,
}

impl Selection {
    pub fn ids(&self) -> &BTreeSet<LeadId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_selected(&self, id: LeadId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: LeadId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn is_all_selected_on_page(&self, page_ids: &[LeadId]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.ids.contains(id))
    }

    /// Deselects the page when it is fully selected, otherwise selects all of it.
    pub fn toggle_all_on_page(&mut self, page_ids: &[LeadId]) {
        if self.is_all_selected_on_page(page_ids) {
            for id in page_ids {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(page_ids.iter().copied());
        }
    }

    pub fn header_check(&self, page_ids: &[LeadId]) -> HeaderCheck {
        let selected = page_ids.iter().filter(|id| self.ids.contains(id)).count();
        match selected {
            0 => HeaderCheck::Unchecked,
            n if n == page_ids.len() => HeaderCheck::Checked,
            _ => HeaderCheck::Indeterminate,
        }
    }

    pub fn prune(&mut self, removed: &BTreeSet<LeadId>) {
        self.ids.retain(|id| !removed.contains(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected leads in store order; ids no longer present are skipped.
    pub fn resolve<'a>(&self, store: &'a RecordStore) -> Vec<&'a Lead> {
        store.resolve(&self.ids)
    }

    /// The selected id when exactly one lead is selected.
    pub fn single(&self) -> Option<LeadId> {
        match self.ids.len() {
            1 => self.ids.first().copied(),
            _ => None,
        }
    }

    pub fn toolbar(&self) -> ToolbarMode {
        if self.ids.is_empty() {
            ToolbarMode::Browse
        } else {
            ToolbarMode::Selected {
                count: self.ids.len(),
                can_edit: self.ids.len() == 1,
            }
        }
    }
}
