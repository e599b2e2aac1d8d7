use crate::expand::ExpandedRows;
use crate::layout::{ColumnLayout, RowLayout};
use crate::selection::Selection;
use crate::view::{SortState, ViewQuery};
use leadboard_core::rules::{PageOverflow, DEFAULT_PAGE_SIZE};
use leadboard_core::{ColumnKey, LeadId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "lead", rename_all = "lowercase")]
pub enum DrawerState {
    #[default]
    Closed,
    Create,
    Edit(LeadId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Every user-facing slot of the grid in one serializable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    pub query: ViewQuery,
    pub page: usize,
    pub page_size: usize,
    pub page_overflow: PageOverflow,
    pub selection: Selection,
    pub expanded: ExpandedRows,
    pub columns: ColumnLayout,
    pub rows: RowLayout,
    pub scroll_x: u32,
    pub drawer: DrawerState,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            query: ViewQuery::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            page_overflow: PageOverflow::Clamp,
            selection: Selection::default(),
            expanded: ExpandedRows::default(),
            columns: ColumnLayout::default(),
            rows: RowLayout::default(),
            scroll_x: 0,
            drawer: DrawerState::Closed,
        }
    }
}

/// State transitions that do not touch the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
    SetGlobalSearch(String),
    SetColumnFilter(ColumnKey, String),
    ClearFilters,
    SortBy(ColumnKey),
    ClearSort,
    SetPage(usize),
    NextPage,
    PrevPage,
    ToggleSelect(LeadId),
    ToggleAllOnPage(Vec<LeadId>),
    ClearSelection,
    ToggleExpanded(LeadId),
    ResizeColumn { key: ColumnKey, width: i64 },
    ResizeRow { lead: LeadId, height: i64 },
    ScrollBy { delta: i64, viewport: u32 },
    OpenCreate,
    OpenEdit(LeadId),
    CloseDrawer,
}

impl GridState {
    pub fn new(
        page_size: usize,
        page_overflow: PageOverflow,
        widths: &BTreeMap<ColumnKey, u32>,
    ) -> Self {
        Self {
            page_size: page_size.max(1),
            page_overflow,
            columns: ColumnLayout::default().with_widths(widths),
            ..Self::default()
        }
    }

    /// Applies one action. `total_pages` is the page count of the current result set and
    /// bounds page stepping.
    pub fn apply(&mut self, action: GridAction, total_pages: usize) {
        match action {
            GridAction::SetGlobalSearch(query) => {
                self.query.global = query;
                self.page = 1;
            }
            GridAction::SetColumnFilter(key, query) => {
                if query.is_empty() {
                    self.query.column_filters.remove(&key);
                } else {
                    self.query.column_filters.insert(key, query);
                }
                self.page = 1;
            }
            GridAction::ClearFilters => {
                self.query.global.clear();
                self.query.column_filters.clear();
                self.page = 1;
            }
            GridAction::SortBy(key) => {
                if key.is_data() {
                    self.query.sort = Some(SortState::toggle(self.query.sort, key));
                }
            }
            GridAction::ClearSort => self.query.sort = None,
            GridAction::SetPage(page) => self.page = page.max(1),
            GridAction::NextPage => {
                if self.page < total_pages {
                    self.page += 1;
                }
            }
            GridAction::PrevPage => self.page = self.page.saturating_sub(1).max(1),
            GridAction::ToggleSelect(id) => {
                self.selection.toggle(id);
            }
            GridAction::ToggleAllOnPage(ids) => self.selection.toggle_all_on_page(&ids),
            GridAction::ClearSelection => self.selection.clear(),
            GridAction::ToggleExpanded(id) => {
                self.expanded.toggle(id);
            }
            GridAction::ResizeColumn { key, width } => {
                self.columns.set_width(key, width);
            }
            GridAction::ResizeRow { lead, height } => {
                self.rows.set_height(lead, height);
            }
            GridAction::ScrollBy { delta, viewport } => {
                let max = i64::from(self.columns.max_scroll_x(viewport));
                self.scroll_x = i64::from(self.scroll_x)
                    .saturating_add(delta)
                    .clamp(0, max) as u32;
            }
            GridAction::OpenCreate => self.drawer = DrawerState::Create,
            GridAction::OpenEdit(id) => self.drawer = DrawerState::Edit(id),
            GridAction::CloseDrawer => self.drawer = DrawerState::Closed,
        }
    }

    /// Pulls the page back into range under `Clamp`; `Empty` leaves it alone.
    pub fn settle_page(&mut self, total_pages: usize) {
        if self.page_overflow == PageOverflow::Clamp {
            self.page = self.page.clamp(1, total_pages.max(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawerState, GridAction, GridState, LoadState};
    use crate::view::SortDirection;
    use leadboard_core::rules::PageOverflow;
    use leadboard_core::{ColumnKey, LeadId};
    use std::collections::BTreeMap;

    #[test]
    fn filter_changes_reset_page_but_sort_keeps_it() {
        let mut state = GridState::default();
        state.apply(GridAction::SetPage(3), 5);
        state.apply(GridAction::SortBy(ColumnKey::Name), 5);
        assert_eq!(state.page, 3);
        state.apply(GridAction::SetColumnFilter(ColumnKey::Company, "acme".into()), 5);
        assert_eq!(state.page, 1);
        state.apply(GridAction::SetPage(2), 5);
        state.apply(GridAction::SetGlobalSearch("x".into()), 5);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn sort_ignores_non_data_columns_and_toggles() {
        let mut state = GridState::default();
        state.apply(GridAction::SortBy(ColumnKey::Checkbox), 1);
        assert_eq!(state.query.sort, None);
        state.apply(GridAction::SortBy(ColumnKey::LeadScore), 1);
        state.apply(GridAction::SortBy(ColumnKey::LeadScore), 1);
        assert_eq!(
            state.query.sort.map(|sort| sort.direction),
            Some(SortDirection::Desc)
        );
    }

    #[test]
    fn page_stepping_is_bounded() {
        let mut state = GridState::default();
        state.apply(GridAction::PrevPage, 2);
        assert_eq!(state.page, 1);
        state.apply(GridAction::NextPage, 2);
        state.apply(GridAction::NextPage, 2);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn settle_page_respects_policy() {
        let mut clamp = GridState::default();
        clamp.page = 4;
        clamp.settle_page(2);
        assert_eq!(clamp.page, 2);
        clamp.settle_page(0);
        assert_eq!(clamp.page, 1);

        let mut empty = GridState::new(10, PageOverflow::Empty, &BTreeMap::new());
        empty.page = 4;
        empty.settle_page(2);
        assert_eq!(empty.page, 4);
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = GridState::new(
            25,
            PageOverflow::Clamp,
            &BTreeMap::from([(ColumnKey::Name, 220)]),
        );
        state.apply(GridAction::ToggleSelect(LeadId(7)), 1);
        state.apply(GridAction::OpenEdit(LeadId(7)), 1);
        state.apply(
            GridAction::ResizeRow {
                lead: LeadId(7),
                height: 64,
            },
            1,
        );
        let json = serde_json::to_string(&state).unwrap();
        let back: GridState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert_eq!(back.drawer, DrawerState::Edit(LeadId(7)));
        assert_eq!(back.columns.width(ColumnKey::Name), 220);

        let failed = serde_json::to_value(LoadState::Failed("boom".into())).unwrap();
        assert_eq!(failed["state"], "failed");
    }

    #[test]
    fn scroll_is_bounded_by_content() {
        let mut state = GridState::default();
        state.apply(
            GridAction::ScrollBy {
                delta: 10_000,
                viewport: 400,
            },
            1,
        );
        assert_eq!(state.scroll_x, 330);
        state.apply(
            GridAction::ScrollBy {
                delta: -10_000,
                viewport: 400,
            },
            1,
        );
        assert_eq!(state.scroll_x, 0);
    }

    #[test]
    fn extreme_scroll_deltas_saturate() {
        let mut state = GridState::default();
        state.apply(
            GridAction::ScrollBy {
                delta: 100,
                viewport: 400,
            },
            1,
        );
        state.apply(
            GridAction::ScrollBy {
                delta: i64::MAX,
                viewport: 400,
            },
            1,
        );
        assert_eq!(state.scroll_x, 330);
        state.apply(
            GridAction::ScrollBy {
                delta: i64::MIN,
                viewport: 400,
            },
            1,
        );
        assert_eq!(state.scroll_x, 0);
    }
}
