use leadboard_core::{ColumnKey, Lead, LeadId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: ColumnKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn asc(key: ColumnKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    /// Re-selecting the active key flips direction; any other key starts ascending.
    pub fn toggle(current: Option<SortState>, key: ColumnKey) -> SortState {
        match current {
            Some(sort) if sort.key == key => SortState {
                key,
                direction: sort.direction.flip(),
            },
            _ => SortState::asc(key),
        }
    }
}

/// Filter and sort inputs of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub global: String,
    pub column_filters: BTreeMap<ColumnKey, String>,
    pub sort: Option<SortState>,
}

impl ViewQuery {
    pub fn is_filtered(&self) -> bool {
        !self.global.is_empty() || self.column_filters.values().any(|q| !q.is_empty())
    }
}

/// One page of pipeline output.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub rows: Vec<&'a Lead>,
    pub total_matches: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

impl PageView<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> Vec<LeadId> {
        self.rows.iter().map(|lead| lead.id).collect()
    }

    /// `1 - 10 of 25`, or `0 of N` when the page has no rows.
    pub fn range_text(&self) -> String {
        if self.rows.is_empty() {
            return format!("0 of {}", self.total_matches);
        }
        let start = (self.page - 1) * self.page_size + 1;
        let end = start + self.rows.len() - 1;
        format!("{start} - {end} of {}", self.total_matches)
    }
}

pub fn matches_query(lead: &Lead, query: &ViewQuery) -> bool {
    let columns_match = query
        .column_filters
        .iter()
        .filter(|(_, needle)| !needle.is_empty())
        .all(|(key, needle)| contains_folded(&key.text(lead), needle));
    columns_match
        && (query.global.is_empty()
            || contains_folded(&lead.name, &query.global)
            || contains_folded(&lead.company, &query.global))
}

pub fn filter<'a>(leads: &'a [Lead], query: &ViewQuery) -> Vec<&'a Lead> {
    leads
        .iter()
        .filter(|lead| matches_query(lead, query))
        .collect()
}

/// Stable; equal keys keep their input order.
pub fn sort(rows: &mut [&Lead], sort: SortState) {
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, sort.key);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn compare(a: &Lead, b: &Lead, key: ColumnKey) -> Ordering {
    match (key.number(a), key.number(b)) {
        (Some(left), Some(right)) => left.cmp(&right),
        _ => locale_compare(&key.text(a), &key.text(b)),
    }
}

/// Case-insensitive primary order; among case variants lowercase sorts first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .map(|(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.cmp(b))
}

pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Slice for a 1-based page. Pages past the end are empty, never clamped.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if page == 0 || start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// filter → sort → paginate over a store snapshot.
pub fn run<'a>(leads: &'a [Lead], query: &ViewQuery, page: usize, page_size: usize) -> PageView<'a> {
    let mut matched = filter(leads, query);
    if let Some(order) = query.sort {
        sort(&mut matched, order);
    }
    let total_matches = matched.len();
    PageView {
        rows: paginate(&matched, page, page_size).to_vec(),
        total_matches,
        page,
        total_pages: total_pages(total_matches, page_size),
        page_size,
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{locale_compare, paginate, total_pages, SortDirection, SortState};
    use leadboard_core::ColumnKey;
    use std::cmp::Ordering;

    #[test]
    fn toggle_flips_same_key_and_resets_new_key() {
        let first = SortState::toggle(None, ColumnKey::Name);
        assert_eq!(first.direction, SortDirection::Asc);
        let second = SortState::toggle(Some(first), ColumnKey::Name);
        assert_eq!(second.direction, SortDirection::Desc);
        let other = SortState::toggle(Some(second), ColumnKey::Company);
        assert_eq!(other, SortState::asc(ColumnKey::Company));
    }

    #[test]
    fn locale_compare_folds_case() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Zed", "alpha"), Ordering::Greater);
        assert_eq!(locale_compare("acme", "Acme"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn paginate_slices_and_overflows_to_empty() {
        let rows: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&rows, 1, 10), &rows[0..10]);
        assert_eq!(paginate(&rows, 3, 10), &rows[20..25]);
        assert!(paginate(&rows, 4, 10).is_empty());
        assert!(paginate(&rows, 0, 10).is_empty());
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(0, 10), 0);
    }
}
