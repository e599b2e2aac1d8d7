use crate::error::{GridError, Result};
use crate::export::{self, ExportFile, ExportFormat, ExportScope};
use crate::gesture::{GestureEffect, GestureTracker};
use crate::selection::{HeaderCheck, ToolbarMode};
use crate::state::{DrawerState, GridAction, GridState, LoadState};
use crate::view::{self, PageView};
use leadboard_core::rules::{PageOverflow, DEFAULT_PAGE_SIZE};
use leadboard_core::time::Timestamp;
use leadboard_core::{
    ColumnKey, Interaction, InteractionDraft, Lead, LeadDraft, LeadId, LeadPatch,
};
use leadboard_store::{write_download, RecordStore};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub page_size: usize,
    pub page_overflow: PageOverflow,
    pub column_widths: BTreeMap<ColumnKey, u32>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_overflow: PageOverflow::Clamp,
            column_widths: BTreeMap::new(),
        }
    }
}

/// Page-level controller: owns the record store, the grid state and the gesture tracker.
#[derive(Debug, Clone)]
pub struct LeadGrid {
    store: RecordStore,
    state: GridState,
    load: LoadState,
    gestures: GestureTracker,
}

impl LeadGrid {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            store: RecordStore::new(),
            state: GridState::new(
                config.page_size,
                config.page_overflow,
                &config.column_widths,
            ),
            load: LoadState::Loading,
            gestures: GestureTracker::default(),
        }
    }

    /// Installs the outcome of the one fetch. Failures replace the rows with an error panel.
    pub fn finish_load<E: Display>(&mut self, result: std::result::Result<Vec<Lead>, E>) {
        let leads = match result {
            Ok(leads) => leads,
            Err(err) => {
                warn!(error = %err, "lead load failed");
                self.fail_load(err.to_string());
                return;
            }
        };
        match RecordStore::from_leads(leads) {
            Ok(store) => {
                debug!(count = store.len(), "leads loaded");
                self.store = store;
                self.load = LoadState::Ready;
                self.state.selection.clear();
                self.state.expanded.collapse_all();
                self.settle_page();
            }
            Err(err) => {
                warn!(error = %err, "lead load rejected");
                self.fail_load(err.to_string());
            }
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_ready(&self) -> bool {
        self.load == LoadState::Ready
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn gestures(&self) -> &GestureTracker {
        &self.gestures
    }

    pub fn view(&self) -> PageView<'_> {
        view::run(
            self.store.snapshot(),
            &self.state.query,
            self.state.page,
            self.state.page_size,
        )
    }

    pub fn page_ids(&self) -> Vec<LeadId> {
        self.view().ids()
    }

    pub fn dispatch(&mut self, action: GridAction) {
        let total_pages = self.total_pages();
        self.state.apply(action, total_pages);
        self.settle_page();
    }

    pub fn toggle_all_on_page(&mut self) {
        let ids = self.page_ids();
        self.dispatch(GridAction::ToggleAllOnPage(ids));
    }

    pub fn header_check(&self) -> HeaderCheck {
        self.state.selection.header_check(&self.page_ids())
    }

    pub fn toolbar(&self) -> ToolbarMode {
        self.state.selection.toolbar()
    }

    /// Validates the draft, appends it and closes the drawer.
    pub fn create(&mut self, now: Timestamp, draft: LeadDraft) -> Result<Lead> {
        self.ensure_ready()?;
        draft.validate()?;
        let lead = self.store.create(now, draft);
        debug!(id = %lead.id, "lead created");
        self.state.drawer = DrawerState::Closed;
        Ok(lead)
    }

    /// `Ok(None)` when the lead no longer exists.
    pub fn update(&mut self, now: Timestamp, id: LeadId, patch: LeadPatch) -> Result<Option<Lead>> {
        self.ensure_ready()?;
        let Some(current) = self.store.get(id) else {
            return Ok(None);
        };
        patch.validate_against(current)?;
        let updated = self.store.update(now, id, patch);
        self.state.drawer = DrawerState::Closed;
        Ok(updated)
    }

    pub fn add_interaction(
        &mut self,
        now: Timestamp,
        id: LeadId,
        draft: InteractionDraft,
    ) -> Option<Interaction> {
        if draft.is_blank() {
            return None;
        }
        self.store.add_interaction(now, id, draft)
    }

    pub fn delete(&mut self, ids: &BTreeSet<LeadId>) -> usize {
        let removed = self.store.delete(ids);
        self.state.selection.prune(ids);
        self.state.expanded.prune(ids);
        self.state.rows.forget(ids);
        if let DrawerState::Edit(id) = self.state.drawer {
            if ids.contains(&id) {
                self.state.drawer = DrawerState::Closed;
            }
        }
        self.settle_page();
        debug!(removed, "leads deleted");
        removed
    }

    /// Bulk delete; clears the selection.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.state.selection.ids().clone();
        let removed = self.delete(&ids);
        self.state.selection.clear();
        removed
    }

    /// Bulk reset of lead scores; clears the selection.
    pub fn reset_selected(&mut self, now: Timestamp) -> usize {
        let ids = self.state.selection.ids().clone();
        let touched = self.store.reset_scores(now, &ids);
        self.state.selection.clear();
        debug!(touched, "lead scores reset");
        touched
    }

    pub fn reorder(&mut self, from: LeadId, to: LeadId) -> bool {
        self.store.reorder(from, to)
    }

    pub fn export(&mut self, format: ExportFormat, scope: ExportScope) -> Result<ExportFile> {
        let file = {
            let records: Vec<&Lead> = match scope {
                ExportScope::All => self.store.iter().collect(),
                ExportScope::Selected => self.state.selection.resolve(&self.store),
            };
            export::render(format, scope, &records)?
        };
        if scope == ExportScope::Selected {
            self.state.selection.clear();
        }
        Ok(file)
    }

    /// Renders an export and writes it into `dir`.
    pub fn save_export(
        &mut self,
        dir: &Path,
        format: ExportFormat,
        scope: ExportScope,
    ) -> Result<PathBuf> {
        let file = self.export(format, scope)?;
        let path = write_download(dir, &file.file_name, &file.contents)?;
        debug!(path = %path.display(), mime = file.mime, "export written");
        Ok(path)
    }

    pub fn begin_column_resize(&mut self, key: ColumnKey, pointer_x: i64) -> Vec<GestureEffect> {
        let width = self.state.columns.width(key);
        self.gestures.start_column_resize(key, pointer_x, width)
    }

    pub fn begin_row_resize(&mut self, lead: LeadId, pointer_y: i64) -> Vec<GestureEffect> {
        let height = self.state.rows.height(lead);
        self.gestures.start_row_resize(lead, pointer_y, height)
    }

    pub fn begin_row_drag(&mut self, lead: LeadId) -> bool {
        self.gestures.drag_start(lead)
    }

    pub fn drag_over(&mut self, lead: LeadId) {
        self.gestures.drag_over(lead);
    }

    /// Applies live resize feedback.
    pub fn pointer_move(&mut self, pointer_x: i64, pointer_y: i64) -> Option<GestureEffect> {
        let effect = self.gestures.pointer_move(pointer_x, pointer_y)?;
        self.apply_effect(effect);
        Some(effect)
    }

    pub fn pointer_up(&mut self) -> Vec<GestureEffect> {
        self.gestures.pointer_up()
    }

    /// Commits an active row drag onto `target`. Returns whether the store order changed.
    pub fn drop_on(&mut self, target: LeadId) -> bool {
        match self.gestures.drop_on(target) {
            Some(effect) => self.apply_effect(effect),
            None => false,
        }
    }

    pub fn cancel_gesture(&mut self) -> Vec<GestureEffect> {
        self.gestures.cancel()
    }

    /// Releases any gesture still in flight when the front-end shuts down.
    pub fn teardown(&mut self) -> Vec<GestureEffect> {
        self.gestures.teardown()
    }

    fn apply_effect(&mut self, effect: GestureEffect) -> bool {
        match effect {
            GestureEffect::ColumnWidth { key, width } => {
                self.state.columns.set_width(key, i64::from(width));
                true
            }
            GestureEffect::RowHeight { lead, height } => {
                self.state.rows.set_height(lead, i64::from(height));
                true
            }
            GestureEffect::Reorder { from, to } => self.store.reorder(from, to),
            GestureEffect::AttachPointerListeners
            | GestureEffect::DetachPointerListeners
            | GestureEffect::DropTarget(_) => false,
        }
    }

    fn total_pages(&self) -> usize {
        self.view().total_pages
    }

    fn settle_page(&mut self) {
        let total_pages = self.total_pages();
        self.state.settle_page(total_pages);
    }

    fn fail_load(&mut self, message: String) {
        self.store = RecordStore::new();
        self.state.selection.clear();
        self.load = LoadState::Failed(message);
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(GridError::NotLoaded)
        }
    }
}
