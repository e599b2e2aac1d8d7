use std::collections::{BTreeSet, VecDeque};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use leadboard_core::{
    format_badges, parse_badges, parse_lead_score, ColumnKey, ContactInfo, InteractionDraft, Lead,
    LeadDraft, LeadId, LeadPatch, LeadStatus,
};
use leadboard_grid::{ExportFormat, ExportScope, GestureEffect, GridAction, GridConfig, LeadGrid};
use ratatui::layout::Rect;

use crate::actions::Action;
use crate::geometry::{self, Hit};
use crate::util::apply_text_input;

const SCROLL_STEP_PX: i64 = 50;
const RESIZE_STEP_PX: i64 = 10;
/// Columns reachable with the `1`-`5` sort keys and Tab focus.
pub const SORT_KEYS: [ColumnKey; 5] = [
    ColumnKey::Id,
    ColumnKey::Name,
    ColumnKey::Company,
    ColumnKey::Status,
    ColumnKey::LeadScore,
];

#[derive(Debug, Clone)]
pub enum Mode {
    Grid,
    Search,
    ColumnFilter(FilterEditor),
    Drawer(LeadForm),
    Confirm(ConfirmState),
    ExportMenu,
}

#[derive(Debug, Clone)]
pub struct App {
    pub mode: Mode,
    pub show_help: bool,
    pub should_quit: bool,
    pub grid: LeadGrid,
    pub search_input: String,
    pub cursor: usize,
    pub focus_column: ColumnKey,
    pub table: Rect,
    pub status: Option<String>,
    pub error: Option<String>,
    actions: VecDeque<Action>,
    pointer_captured: bool,
}

impl App {
    pub fn new(config: &GridConfig) -> Self {
        let mut app = Self {
            mode: Mode::Grid,
            show_help: false,
            should_quit: false,
            grid: LeadGrid::new(config),
            search_input: String::new(),
            cursor: 0,
            focus_column: ColumnKey::Name,
            table: Rect::default(),
            status: None,
            error: None,
            actions: VecDeque::new(),
            pointer_captured: false,
        };
        app.enqueue(Action::Load);
        app
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn set_table_area(&mut self, table: Rect) {
        self.table = table;
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    pub fn cursor_lead(&self) -> Option<LeadId> {
        self.grid.page_ids().get(self.cursor).copied()
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.grid.page_ids().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Drops any gesture still in flight.
    pub fn teardown(&mut self) {
        let effects = self.grid.teardown();
        self.apply_effects(&effects);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) {
            self.should_quit = true;
            return;
        }

        let mut mode = std::mem::replace(&mut self.mode, Mode::Grid);
        let next = match &mut mode {
            Mode::Grid => self.handle_grid_key(key),
            Mode::Search => self.handle_search_key(key),
            Mode::ColumnFilter(editor) => self.handle_filter_key(editor, key),
            Mode::Drawer(form) => self.handle_form_key(form, key),
            Mode::Confirm(state) => self.handle_confirm_key(state, key),
            Mode::ExportMenu => self.handle_export_key(key),
        };
        self.mode = next.unwrap_or(mode);
    }

    fn handle_grid_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => self.enqueue(Action::Load),
            _ if !self.grid.is_ready() => {}
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.grid.page_ids().len().saturating_sub(1);
            }
            KeyCode::Left | KeyCode::Char('h') => self.scroll_by(-SCROLL_STEP_PX),
            KeyCode::Right | KeyCode::Char('l') => self.scroll_by(SCROLL_STEP_PX),
            KeyCode::Tab => self.cycle_focus(1),
            KeyCode::BackTab => self.cycle_focus(-1),
            KeyCode::Char('/') => {
                self.search_input = self.grid.state().query.global.clone();
                return Some(Mode::Search);
            }
            KeyCode::Char('f') => {
                let column = if self.focus_column.is_data() {
                    self.focus_column
                } else {
                    ColumnKey::Name
                };
                return Some(Mode::ColumnFilter(FilterEditor::new(column, &self.grid)));
            }
            KeyCode::Char('c') => {
                self.search_input.clear();
                self.grid.dispatch(GridAction::ClearFilters);
                self.cursor = 0;
            }
            KeyCode::Char(ch @ '1'..='5') => {
                let index = usize::from(ch as u8 - b'1');
                self.focus_column = SORT_KEYS[index];
                self.grid.dispatch(GridAction::SortBy(self.focus_column));
            }
            KeyCode::Char('s') => self.grid.dispatch(GridAction::SortBy(self.focus_column)),
            KeyCode::Char('S') => self.grid.dispatch(GridAction::ClearSort),
            KeyCode::Char('[') => {
                self.grid.dispatch(GridAction::PrevPage);
                self.cursor = 0;
            }
            KeyCode::Char(']') => {
                self.grid.dispatch(GridAction::NextPage);
                self.cursor = 0;
            }
            KeyCode::Char(' ') => {
                if let Some(id) = self.cursor_lead() {
                    self.grid.dispatch(GridAction::ToggleSelect(id));
                }
            }
            KeyCode::Char('A') => self.grid.toggle_all_on_page(),
            KeyCode::Esc => self.grid.dispatch(GridAction::ClearSelection),
            KeyCode::Enter => {
                if let Some(id) = self.cursor_lead() {
                    self.grid.dispatch(GridAction::ToggleExpanded(id));
                }
            }
            KeyCode::Char('<') => self.resize_focus(-RESIZE_STEP_PX),
            KeyCode::Char('>') => self.resize_focus(RESIZE_STEP_PX),
            KeyCode::Char('a') => {
                self.grid.dispatch(GridAction::OpenCreate);
                return Some(Mode::Drawer(LeadForm::create()));
            }
            KeyCode::Char('e') => {
                let target = self.grid.state().selection.single().or(self.cursor_lead());
                if let Some(id) = target {
                    return self.open_edit(id);
                }
            }
            KeyCode::Char('d') => return self.confirm_delete(),
            KeyCode::Char('R') => {
                let count = self.grid.state().selection.len();
                if count == 0 {
                    self.set_error("select leads to reset");
                } else {
                    return Some(Mode::Confirm(ConfirmState::new(
                        format!("Reset lead score of {count} lead(s)? (y/n)"),
                        Action::ResetSelected,
                    )));
                }
            }
            KeyCode::Char('x') => return Some(Mode::ExportMenu),
            _ => {}
        }
        None
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => return Some(Mode::Grid),
            _ => {
                apply_text_input(&mut self.search_input, key);
                if self.search_input != self.grid.state().query.global {
                    self.grid
                        .dispatch(GridAction::SetGlobalSearch(self.search_input.clone()));
                    self.cursor = 0;
                }
            }
        }
        None
    }

    fn handle_filter_key(&mut self, editor: &mut FilterEditor, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => return Some(Mode::Grid),
            KeyCode::Tab => editor.cycle(1, &self.grid),
            KeyCode::BackTab => editor.cycle(-1, &self.grid),
            _ => {
                apply_text_input(&mut editor.query, key);
                self.grid.dispatch(GridAction::SetColumnFilter(
                    editor.column(),
                    editor.query.clone(),
                ));
                self.cursor = 0;
            }
        }
        None
    }

    fn handle_form_key(&mut self, form: &mut LeadForm, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc => return Some(self.close_drawer()),
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_prev(),
            KeyCode::Left if form.is_status_focus() => form.status = form.status.cycle_back(),
            KeyCode::Right | KeyCode::Char(' ') if form.is_status_focus() => {
                form.status = form.status.cycle();
            }
            KeyCode::Enter => {
                if form.is_save_focus() {
                    match form.to_action() {
                        Ok(action) => {
                            self.enqueue(action);
                            return Some(self.close_drawer());
                        }
                        Err(err) => self.set_error(err),
                    }
                } else if form.is_cancel_focus() {
                    return Some(self.close_drawer());
                } else {
                    form.focus_next();
                }
            }
            _ => {
                if let Some(target) = form.active_field_mut() {
                    apply_text_input(target, key);
                }
            }
        }
        None
    }

    fn handle_confirm_key(&mut self, state: &ConfirmState, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.enqueue(state.action.clone());
                Some(Mode::Grid)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Mode::Grid),
            _ => None,
        }
    }

    fn handle_export_key(&mut self, key: KeyEvent) -> Option<Mode> {
        let (format, scope) = match key.code {
            KeyCode::Esc => return Some(Mode::Grid),
            KeyCode::Char('c') => (ExportFormat::Csv, ExportScope::All),
            KeyCode::Char('e') => (ExportFormat::Excel, ExportScope::All),
            KeyCode::Char('C') => (ExportFormat::Csv, ExportScope::Selected),
            KeyCode::Char('E') => (ExportFormat::Excel, ExportScope::Selected),
            _ => return None,
        };
        if scope == ExportScope::Selected && self.grid.state().selection.is_empty() {
            self.set_error("nothing selected to export");
            return None;
        }
        self.enqueue(Action::Export(format, scope));
        Some(Mode::Grid)
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if !matches!(self.mode, Mode::Grid) || !self.grid.is_ready() {
            return;
        }
        let hit = geometry::hit_test(&self.grid, self.table, event.column, event.row);
        let (x, y) = geometry::pointer_px(self.table, event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.left_down(hit, x),
            MouseEventKind::Down(MouseButton::Right) => {
                if let Hit::Row { lead, .. } = hit {
                    let effects = self.grid.begin_row_resize(lead, y);
                    self.apply_effects(&effects);
                }
            }
            MouseEventKind::Drag(_) => {
                if self.pointer_captured {
                    self.grid.pointer_move(x, y);
                } else if let Hit::Row { lead, .. } = hit {
                    self.grid.drag_over(lead);
                }
            }
            MouseEventKind::Up(_) => self.pointer_up(hit),
            MouseEventKind::ScrollDown => self.move_cursor(1),
            MouseEventKind::ScrollUp => self.move_cursor(-1),
            MouseEventKind::ScrollRight => self.scroll_by(SCROLL_STEP_PX),
            MouseEventKind::ScrollLeft => self.scroll_by(-SCROLL_STEP_PX),
            _ => {}
        }
    }

    fn left_down(&mut self, hit: Hit, x: i64) {
        match hit {
            Hit::HeaderBorder(key) => {
                let effects = self.grid.begin_column_resize(key, x);
                self.apply_effects(&effects);
            }
            Hit::Header(ColumnKey::Checkbox) => self.grid.toggle_all_on_page(),
            Hit::Header(key) if key.is_data() => {
                self.focus_column = key;
                self.grid.dispatch(GridAction::SortBy(key));
            }
            Hit::Header(_) => {}
            Hit::Row {
                lead,
                column: Some(ColumnKey::Checkbox),
            } => self.grid.dispatch(GridAction::ToggleSelect(lead)),
            Hit::Row {
                lead,
                column: Some(ColumnKey::Action),
            } => {
                if let Some(mode) = self.open_edit(lead) {
                    self.mode = mode;
                }
            }
            Hit::Row { lead, .. } => {
                if let Some(index) = self.grid.page_ids().iter().position(|id| *id == lead) {
                    self.cursor = index;
                }
                self.grid.begin_row_drag(lead);
            }
            Hit::Outside => {}
        }
    }

    fn pointer_up(&mut self, hit: Hit) {
        if self.pointer_captured {
            let effects = self.grid.pointer_up();
            self.apply_effects(&effects);
            return;
        }
        let Some(dragged) = self.grid.gestures().dragged() else {
            return;
        };
        match hit {
            Hit::Row { lead, .. } => {
                if self.grid.drop_on(lead) {
                    self.set_status(format!("Moved lead {dragged}"));
                    if let Some(index) = self.grid.page_ids().iter().position(|id| *id == dragged)
                    {
                        self.cursor = index;
                    }
                }
            }
            _ => {
                self.grid.cancel_gesture();
            }
        }
    }

    fn apply_effects(&mut self, effects: &[GestureEffect]) {
        for effect in effects {
            match effect {
                GestureEffect::AttachPointerListeners => self.pointer_captured = true,
                GestureEffect::DetachPointerListeners => self.pointer_captured = false,
                _ => {}
            }
        }
    }

    fn open_edit(&mut self, id: LeadId) -> Option<Mode> {
        let lead = self.grid.store().get(id)?.clone();
        self.grid.dispatch(GridAction::OpenEdit(id));
        Some(Mode::Drawer(LeadForm::edit(lead)))
    }

    fn close_drawer(&mut self) -> Mode {
        self.grid.dispatch(GridAction::CloseDrawer);
        Mode::Grid
    }

    fn confirm_delete(&mut self) -> Option<Mode> {
        let selected = self.grid.state().selection.len();
        if selected > 0 {
            return Some(Mode::Confirm(ConfirmState::new(
                format!("Delete {selected} selected lead(s)? (y/n)"),
                Action::DeleteSelected,
            )));
        }
        let id = self.cursor_lead()?;
        let name = self.grid.store().get(id)?.name.clone();
        Some(Mode::Confirm(ConfirmState::new(
            format!("Delete {name}? (y/n)"),
            Action::Delete(BTreeSet::from([id])),
        )))
    }

    fn move_cursor(&mut self, delta: i32) {
        let len = self.grid.page_ids().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = (self.cursor as i64 + i64::from(delta)).clamp(0, len as i64 - 1);
        self.cursor = next as usize;
    }

    fn scroll_by(&mut self, delta: i64) {
        let viewport = geometry::viewport_px(self.table);
        self.grid.dispatch(GridAction::ScrollBy { delta, viewport });
    }

    fn cycle_focus(&mut self, step: i32) {
        let len = SORT_KEYS.len() as i32;
        let current = SORT_KEYS
            .iter()
            .position(|key| *key == self.focus_column)
            .map_or(0, |index| index as i32);
        let next = (current + step).rem_euclid(len);
        self.focus_column = SORT_KEYS[next as usize];
    }

    fn resize_focus(&mut self, delta: i64) {
        let key = self.focus_column;
        let width = i64::from(self.grid.state().columns.width(key)) + delta;
        self.grid.dispatch(GridAction::ResizeColumn { key, width });
    }
}

/// Per-column filter input: which data column, and the query typed for it.
#[derive(Debug, Clone)]
pub struct FilterEditor {
    index: usize,
    pub query: String,
}

impl FilterEditor {
    pub fn new(column: ColumnKey, grid: &LeadGrid) -> Self {
        let index = ColumnKey::DATA
            .iter()
            .position(|key| *key == column)
            .unwrap_or(0);
        let mut editor = Self {
            index,
            query: String::new(),
        };
        editor.load_query(grid);
        editor
    }

    pub fn column(&self) -> ColumnKey {
        ColumnKey::DATA[self.index]
    }

    pub fn cycle(&mut self, step: i32, grid: &LeadGrid) {
        let len = ColumnKey::DATA.len() as i32;
        self.index = (self.index as i32 + step).rem_euclid(len) as usize;
        self.load_query(grid);
    }

    fn load_query(&mut self, grid: &LeadGrid) {
        self.query = grid
            .state()
            .query
            .column_filters
            .get(&self.column())
            .cloned()
            .unwrap_or_default();
    }
}

/// The create/edit drawer. Editing keeps the original lead so only changed fields are patched.
#[derive(Debug, Clone)]
pub struct LeadForm {
    pub(crate) focus: usize,
    pub original: Option<Lead>,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub status: LeadStatus,
    pub lead_score: String,
    pub assigned_to: String,
    pub industry: String,
    pub location: String,
    pub badges: String,
    pub profile_picture: String,
    pub interaction_date: String,
    pub interaction_kind: String,
    pub interaction_notes: String,
    pub sales_rep: String,
}

impl LeadForm {
    pub const FIELD_COUNT: usize = 15;
    const STATUS_FIELD: usize = 4;

    pub fn create() -> Self {
        Self {
            focus: 0,
            original: None,
            name: String::new(),
            company: String::new(),
            email: String::new(),
            phone: String::new(),
            status: LeadStatus::New,
            lead_score: String::new(),
            assigned_to: String::new(),
            industry: String::new(),
            location: String::new(),
            badges: String::new(),
            profile_picture: String::new(),
            interaction_date: String::new(),
            interaction_kind: String::new(),
            interaction_notes: String::new(),
            sales_rep: String::new(),
        }
    }

    pub fn edit(lead: Lead) -> Self {
        Self {
            name: lead.name.clone(),
            company: lead.company.clone(),
            email: lead.contact_info.email.clone(),
            phone: lead.contact_info.phone.clone(),
            status: lead.status,
            lead_score: lead.lead_score.to_string(),
            assigned_to: lead.assigned_to.clone(),
            industry: lead.industry.clone(),
            location: lead.location.clone(),
            badges: format_badges(&lead.badges),
            profile_picture: lead.profile_picture.clone().unwrap_or_default(),
            original: Some(lead),
            ..Self::create()
        }
    }

    pub fn title(&self) -> String {
        match &self.original {
            Some(lead) => format!("Edit Lead #{}", lead.id),
            None => "Create Lead".to_string(),
        }
    }

    pub fn focus_next(&mut self) {
        let total = Self::FIELD_COUNT + 2;
        self.focus = (self.focus + 1) % total;
    }

    pub fn focus_prev(&mut self) {
        let total = Self::FIELD_COUNT + 2;
        if self.focus == 0 {
            self.focus = total - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn is_status_focus(&self) -> bool {
        self.focus == Self::STATUS_FIELD
    }

    pub fn is_save_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT
    }

    pub fn is_cancel_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT + 1
    }

    pub fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.name),
            1 => Some(&mut self.company),
            2 => Some(&mut self.email),
            3 => Some(&mut self.phone),
            5 => Some(&mut self.lead_score),
            6 => Some(&mut self.assigned_to),
            7 => Some(&mut self.industry),
            8 => Some(&mut self.location),
            9 => Some(&mut self.badges),
            10 => Some(&mut self.profile_picture),
            11 => Some(&mut self.interaction_date),
            12 => Some(&mut self.interaction_kind),
            13 => Some(&mut self.interaction_notes),
            14 => Some(&mut self.sales_rep),
            _ => None,
        }
    }

    pub fn to_action(&self) -> Result<Action, String> {
        let lead_score = parse_lead_score(&self.lead_score).map_err(|err| err.to_string())?;
        let badges = parse_badges(&self.badges);
        let profile_picture = normalize_optional(&self.profile_picture);
        let interaction = InteractionDraft {
            interaction_id: None,
            date: self.interaction_date.clone(),
            kind: self.interaction_kind.clone(),
            notes: self.interaction_notes.clone(),
            sales_rep: self.sales_rep.clone(),
        };

        let Some(lead) = &self.original else {
            let draft = LeadDraft {
                name: self.name.clone(),
                company: self.company.clone(),
                contact_info: ContactInfo {
                    email: self.email.clone(),
                    phone: self.phone.clone(),
                },
                lead_score,
                status: self.status,
                assigned_to: self.assigned_to.clone(),
                industry: self.industry.clone(),
                location: self.location.clone(),
                badges,
                profile_picture,
                interactions: Vec::new(),
            };
            draft.validate().map_err(|err| err.to_string())?;
            return Ok(Action::Create(draft, interaction));
        };

        let patch = LeadPatch {
            name: changed(&self.name, &lead.name),
            company: changed(&self.company, &lead.company),
            email: changed(&self.email, &lead.contact_info.email),
            phone: changed(&self.phone, &lead.contact_info.phone),
            lead_score: (lead_score != lead.lead_score).then_some(lead_score),
            status: (self.status != lead.status).then_some(self.status),
            assigned_to: changed(&self.assigned_to, &lead.assigned_to),
            industry: changed(&self.industry, &lead.industry),
            location: changed(&self.location, &lead.location),
            badges: (badges != lead.badges).then_some(badges),
            profile_picture: (profile_picture != lead.profile_picture).then_some(profile_picture),
        };
        patch.validate_against(lead).map_err(|err| err.to_string())?;
        if patch.is_empty() && interaction.is_blank() {
            return Err("nothing changed".to_string());
        }
        Ok(Action::Update(lead.id, patch, interaction))
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
    pub action: Action,
}

impl ConfirmState {
    pub fn new(message: String, action: Action) -> Self {
        Self { message, action }
    }
}

fn changed(value: &str, current: &str) -> Option<String> {
    let trimmed = value.trim();
    (trimmed != current).then(|| trimmed.to_string())
}

fn normalize_optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{App, LeadForm, Mode};
    use crate::actions::Action;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use leadboard_core::{ColumnKey, Lead, LeadId, LeadStatus};
    use leadboard_grid::{GridConfig, SortDirection};
    use ratatui::layout::Rect;

    fn lead(id: i64, name: &str, company: &str) -> Lead {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "company": company,
            "contactInfo": {"email": format!("{}@example.com", name.to_lowercase()), "phone": "555"},
            "status": "Warm",
            "leadScore": id * 10
        }))
        .unwrap()
    }

    fn ready_app() -> App {
        let mut app = App::new(&GridConfig::default());
        assert!(matches!(app.next_action(), Some(Action::Load)));
        app.grid.finish_load(Ok::<_, String>(vec![
            lead(1, "Ada", "Acme"),
            lead(2, "Brook", "Globex"),
            lead(3, "Cyd", "Acme Labs"),
        ]));
        app.set_table_area(Rect::new(0, 4, 100, 30));
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn order(app: &App) -> Vec<i64> {
        app.grid.store().iter().map(|lead| lead.id.get()).collect()
    }

    #[test]
    fn search_filters_as_you_type() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "acme");
        assert_eq!(app.grid.view().total_matches, 2);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Grid));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.grid.view().total_matches, 3);
    }

    #[test]
    fn column_filter_cycles_columns() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('f'));
        type_text(&mut app, "bro");
        assert_eq!(app.grid.view().ids(), vec![LeadId(2)]);
        press(&mut app, KeyCode::Tab);
        let Mode::ColumnFilter(editor) = &app.mode else {
            panic!("expected filter editor");
        };
        assert_eq!(editor.column(), ColumnKey::Company);
        assert!(editor.query.is_empty());
    }

    #[test]
    fn sort_keys_toggle_direction() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('5'));
        let sort = app.grid.state().query.sort.unwrap();
        assert_eq!(sort.key, ColumnKey::LeadScore);
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(app.grid.view().ids()[0], LeadId(3));
    }

    #[test]
    fn delete_goes_through_confirm() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.mode, Mode::Confirm(_)));
        press(&mut app, KeyCode::Char('n'));
        assert!(app.next_action().is_none());

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(matches!(app.next_action(), Some(Action::DeleteSelected)));
    }

    #[test]
    fn reset_needs_a_selection() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('R'));
        assert!(matches!(app.mode, Mode::Grid));
        assert!(app.error.is_some());
    }

    #[test]
    fn invalid_create_keeps_drawer_open() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('a'));
        let Mode::Drawer(form) = &mut app.mode else {
            panic!("expected drawer");
        };
        form.focus = LeadForm::FIELD_COUNT;
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Drawer(_)));
        assert_eq!(app.error.as_deref(), Some("name is required"));
        assert!(app.next_action().is_none());
    }

    #[test]
    fn edit_form_patches_changed_fields_only() {
        let mut form = LeadForm::edit(lead(2, "Brook", "Globex"));
        form.company = "Globex Intl".to_string();
        form.status = LeadStatus::Hot;
        let Ok(Action::Update(id, patch, interaction)) = form.to_action() else {
            panic!("expected update");
        };
        assert_eq!(id, LeadId(2));
        assert_eq!(patch.company.as_deref(), Some("Globex Intl"));
        assert_eq!(patch.status, Some(LeadStatus::Hot));
        assert!(patch.name.is_none());
        assert!(patch.lead_score.is_none());
        assert!(interaction.is_blank());

        let untouched = LeadForm::edit(lead(2, "Brook", "Globex"));
        assert_eq!(untouched.to_action().unwrap_err(), "nothing changed");
    }

    #[test]
    fn header_click_sorts_and_border_drag_resizes() {
        let mut app = ready_app();
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 15, 4);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 15, 4);
        assert_eq!(
            app.grid.state().query.sort.map(|sort| sort.key),
            Some(ColumnKey::Name)
        );

        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 4, 4);
        assert!(app.pointer_captured());
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 9, 4);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 9, 4);
        assert!(!app.pointer_captured());
        assert_eq!(app.grid.state().columns.width(ColumnKey::Checkbox), 100);
    }

    #[test]
    fn row_drag_reorders_the_store() {
        let mut app = ready_app();
        // rows are two lines tall below the header: lead 1 at 5, lead 3 at 9
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 15, 5);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 15, 9);
        assert_eq!(app.grid.gestures().drop_target(), Some(LeadId(3)));
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 15, 9);
        assert_eq!(order(&app), vec![2, 3, 1]);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn right_drag_resizes_a_row() {
        let mut app = ready_app();
        mouse(&mut app, MouseEventKind::Down(MouseButton::Right), 15, 5);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Right), 15, 8);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Right), 15, 8);
        assert_eq!(app.grid.state().rows.height(LeadId(1)), 100);
        assert!(!app.pointer_captured());
    }

    #[test]
    fn drop_outside_cancels_drag() {
        let mut app = ready_app();
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 15, 5);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 15, 40);
        assert!(app.grid.gestures().is_idle());
        assert_eq!(order(&app), vec![1, 2, 3]);
    }
}
