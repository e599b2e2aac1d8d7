use crate::view::{locale_compare, paginate, total_pages, SortDirection};
use leadboard_core::rules::DEFAULT_PAGE_SIZE;
use leadboard_core::{DynamicRecord, FieldValue};
use std::collections::BTreeSet;

/// A read-only table over schemaless records: union of keys, global search, optional sort,
/// paging and per-cell expansion of nested values.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicTable {
    records: Vec<DynamicRecord>,
    columns: Vec<String>,
    search: String,
    sort: Option<(String, SortDirection)>,
    page: usize,
    page_size: usize,
    expanded: BTreeSet<(usize, String)>,
}

impl DynamicTable {
    pub fn new(records: Vec<DynamicRecord>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|known| known == key) {
                    columns.push(key.to_string());
                }
            }
        }
        Self {
            records,
            columns,
            search: String::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            expanded: BTreeSet::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Keys in first-seen order across all records.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
        self.page = 1;
    }

    pub fn sort_by(&mut self, key: &str, direction: SortDirection) {
        self.sort = Some((key.to_string(), direction));
    }

    /// Matching records with their index in the source payload.
    pub fn filtered(&self) -> Vec<(usize, &DynamicRecord)> {
        let mut rows: Vec<_> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.matches(&self.search))
            .collect();
        if let Some((key, direction)) = &self.sort {
            rows.sort_by(|(_, a), (_, b)| {
                let ordering = locale_compare(&cell_text(a, key), &cell_text(b, key));
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    /// Moves to `page`, clamped into the available pages.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn page_rows(&self) -> Vec<(usize, &DynamicRecord)> {
        paginate(&self.filtered(), self.page, self.page_size).to_vec()
    }

    /// Toggles a nested cell; scalar cells cannot expand. Returns the new state.
    pub fn toggle_expanded(&mut self, row: usize, field: &str) -> bool {
        let expandable = self
            .records
            .get(row)
            .and_then(|record| record.get(field))
            .is_some_and(FieldValue::is_expandable);
        if !expandable {
            return false;
        }
        let key = (row, field.to_string());
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    pub fn is_expanded(&self, row: usize, field: &str) -> bool {
        self.expanded.contains(&(row, field.to_string()))
    }
}

/// Display text of `key` in `record`; missing keys render empty.
pub fn cell_text(record: &DynamicRecord, key: &str) -> String {
    record.get(key).map(FieldValue::display).unwrap_or_default()
}
