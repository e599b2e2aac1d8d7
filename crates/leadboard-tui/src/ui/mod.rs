use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use leadboard_core::{ColumnKey, Lead, LeadStatus};
use leadboard_grid::{HeaderCheck, LoadState, RowDetail};

use crate::app::{App, ConfirmState, LeadForm, Mode};
use crate::geometry::{self, CellSpan};

fn chunks(size: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(size);
    [chunks[0], chunks[1], chunks[2]]
}

fn table_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title("Leads")
}

/// Where the grid's header line and rows land for a terminal of `size`.
pub fn table_area(size: Rect) -> Rect {
    table_block().inner(chunks(size)[1])
}

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let [header, body, footer] = chunks(size);

    render_header(frame, header, app);
    render_table(frame, body, app);
    render_footer(frame, footer, app);

    match &app.mode {
        Mode::Drawer(form) => render_drawer(frame, size, form),
        Mode::Confirm(state) => render_confirm(frame, size, state),
        Mode::ExportMenu => render_export_menu(frame, size, app),
        _ => {}
    }

    if app.show_help {
        render_help(frame, size);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let view = app.grid.view();
    let query = &app.grid.state().query;
    let mut spans = vec![Span::raw(format!(
        "{}  page {}/{}",
        view.range_text(),
        view.page,
        view.total_pages
    ))];

    match &app.mode {
        Mode::Search => spans.push(Span::styled(
            format!("  search: {}_", app.search_input),
            Style::default().fg(Color::Yellow),
        )),
        Mode::ColumnFilter(editor) => spans.push(Span::styled(
            format!("  filter {}: {}_", editor.column().label(), editor.query),
            Style::default().fg(Color::Yellow),
        )),
        _ => {
            if !query.global.is_empty() {
                spans.push(Span::raw(format!("  search: {}", query.global)));
            }
        }
    }

    let filters: Vec<String> = query
        .column_filters
        .iter()
        .filter(|(_, q)| !q.is_empty())
        .map(|(key, q)| format!("{}={}", key.as_str(), q))
        .collect();
    if !filters.is_empty() {
        spans.push(Span::raw(format!("  filters: {}", filters.join(", "))));
    }

    let toolbar = app.grid.toolbar().label();
    if !toolbar.is_empty() {
        spans.push(Span::styled(
            format!("  {toolbar}"),
            Style::default().fg(Color::Cyan),
        ));
    }

    let block = Block::default().borders(Borders::ALL).title("leadboard");
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.mode {
        Mode::Grid if app.pointer_captured() => "drag to resize  release to finish",
        Mode::Grid => "j/k move  h/l scroll  / search  f filter  1-5 sort  space select  enter expand  a add  e edit  d delete  x export  ? help",
        Mode::Search => "type to search  enter/esc done",
        Mode::ColumnFilter(_) => "tab next column  enter/esc done",
        Mode::Drawer(_) => "tab next  shift+tab prev  left/right status  enter select  esc cancel",
        Mode::Confirm(_) => "y confirm  n cancel",
        Mode::ExportMenu => "c csv  e excel  C/E selected only  esc cancel",
    };

    let mut spans = vec![Span::styled(hint, Style::default().fg(Color::DarkGray))];
    if let Some(err) = &app.error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(err.clone(), Style::default().fg(Color::Red)));
    } else if let Some(status) = &app.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, app: &App) {
    match app.grid.load_state() {
        LoadState::Loading => {
            let paragraph = Paragraph::new("Loading leads...")
                .block(table_block())
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }
        LoadState::Failed(message) => {
            let paragraph = Paragraph::new(Span::styled(
                format!("error: {message}"),
                Style::default().fg(Color::Red),
            ))
            .block(table_block())
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }
        LoadState::Ready => {}
    }

    let view = app.grid.view();
    if view.is_empty() {
        let paragraph = Paragraph::new("no records")
            .block(table_block())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let block = table_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = geometry::visible_cells(&app.grid, inner);
    let slots = geometry::row_slots(&app.grid);
    let state = app.grid.state();
    let gestures = app.grid.gestures();
    let header_check = app.grid.header_check();
    let buf = frame.buffer_mut();

    for span in &cells {
        let label = match span.key {
            ColumnKey::Checkbox => check_label(header_check).to_string(),
            ColumnKey::Action => "Action".to_string(),
            key => match state.query.sort {
                Some(sort) if sort.key == key => format!("{} {}", key.label(), sort.direction.arrow()),
                _ => key.label().to_string(),
            },
        };
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if span.key == app.focus_column {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        put(buf, inner, span, 0, &label, style);
    }

    for (index, (slot, lead)) in slots.iter().zip(view.rows.iter()).enumerate() {
        if slot.top >= inner.height {
            break;
        }
        let selected = state.selection.is_selected(lead.id);
        let mut style = Style::default();
        if selected {
            style = style.bg(Color::Blue);
        }
        if gestures.drop_target() == Some(lead.id) {
            style = style.bg(Color::DarkGray);
        }
        if gestures.dragged() == Some(lead.id) {
            style = style.add_modifier(Modifier::DIM);
        }
        if index == app.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let lines = slot.lines.min(inner.height - slot.top);
        buf.set_style(
            Rect::new(inner.x, inner.y + slot.top, inner.width, lines),
            style,
        );
        for span in &cells {
            let text = cell_text(span.key, lead, selected);
            let cell_style = match span.key {
                ColumnKey::Status => style.patch(status_style(lead.status)),
                _ => style,
            };
            put(buf, inner, span, slot.top, &text, cell_style);
        }

        if slot.detail_lines > 0 {
            let detail_style = Style::default().fg(Color::Gray);
            for (offset, line) in RowDetail::for_lead(lead).lines().iter().enumerate() {
                let y = slot.top + slot.lines + offset as u16;
                if y >= inner.height {
                    break;
                }
                buf.set_stringn(
                    inner.x + 2,
                    inner.y + y,
                    line,
                    usize::from(inner.width.saturating_sub(2)),
                    detail_style,
                );
            }
        }
    }
}

fn put(buf: &mut Buffer, inner: Rect, span: &CellSpan, line: u16, text: &str, style: Style) {
    if line >= inner.height || span.x >= inner.width {
        return;
    }
    let width = span.width.min(inner.width - span.x).saturating_sub(1);
    buf.set_stringn(
        inner.x + span.x,
        inner.y + line,
        text,
        usize::from(width),
        style,
    );
}

fn cell_text(key: ColumnKey, lead: &Lead, selected: bool) -> String {
    match key {
        ColumnKey::Checkbox => (if selected { "[x]" } else { "[ ]" }).to_string(),
        ColumnKey::Action => "edit".to_string(),
        key => key.text(lead),
    }
}

fn check_label(check: HeaderCheck) -> &'static str {
    match check {
        HeaderCheck::Unchecked => "[ ]",
        HeaderCheck::Indeterminate => "[-]",
        HeaderCheck::Checked => "[x]",
    }
}

fn status_style(status: LeadStatus) -> Style {
    match status {
        LeadStatus::Hot => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LeadStatus::Warm => Style::default().fg(Color::Yellow),
        LeadStatus::Cold => Style::default().fg(Color::Cyan),
        LeadStatus::New => Style::default().fg(Color::Green),
    }
}

fn render_drawer(frame: &mut Frame<'_>, area: Rect, form: &LeadForm) {
    let modal = centered_rect(70, 85, area);
    frame.render_widget(Clear, modal);

    let block = Block::default().borders(Borders::ALL).title(form.title());
    let status = format!("< {} >", form.status);
    let mut lines = vec![
        field_line("Name", &form.name, form.focus == 0),
        field_line("Company", &form.company, form.focus == 1),
        field_line("Email", &form.email, form.focus == 2),
        field_line("Phone", &form.phone, form.focus == 3),
        field_line("Status", &status, form.focus == 4),
        field_line("Lead score", &form.lead_score, form.focus == 5),
        field_line("Assigned to", &form.assigned_to, form.focus == 6),
        field_line("Industry", &form.industry, form.focus == 7),
        field_line("Location", &form.location, form.focus == 8),
        field_line("Badges (comma separated)", &form.badges, form.focus == 9),
        field_line("Profile picture", &form.profile_picture, form.focus == 10),
        Line::from(""),
        Line::from(Span::styled(
            "New interaction (optional)",
            Style::default().fg(Color::DarkGray),
        )),
        field_line("Date", &form.interaction_date, form.focus == 11),
        field_line("Type", &form.interaction_kind, form.focus == 12),
        field_line("Notes", &form.interaction_notes, form.focus == 13),
        field_line("Sales rep", &form.sales_rep, form.focus == 14),
        Line::from(""),
    ];

    let save_style = if form.is_save_focus() {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Green)
    };
    let cancel_style = if form.is_cancel_focus() {
        Style::default().fg(Color::Black).bg(Color::LightRed)
    } else {
        Style::default().fg(Color::Red)
    };

    lines.push(Line::from(vec![
        Span::styled("[Save]", save_style),
        Span::raw("  "),
        Span::styled("[Cancel]", cancel_style),
    ]));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, state: &ConfirmState) {
    let modal = centered_rect(50, 30, area);
    frame.render_widget(Clear, modal);
    let paragraph = Paragraph::new(state.message.clone())
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, modal);
}

fn render_export_menu(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let modal = centered_rect(50, 40, area);
    frame.render_widget(Clear, modal);

    let selected = app.grid.state().selection.len();
    let muted = Style::default().fg(Color::DarkGray);
    let scoped = if selected == 0 { muted } else { Style::default() };
    let lines = vec![
        Line::from("c  CSV, all leads"),
        Line::from("e  Excel, all leads"),
        Line::from(Span::styled(
            format!("C  CSV, {selected} selected"),
            scoped,
        )),
        Line::from(Span::styled(
            format!("E  Excel, {selected} selected"),
            scoped,
        )),
        Line::from(""),
        Line::from(Span::styled("esc cancel", muted)),
    ];
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Export"));
    frame.render_widget(paragraph, modal);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 80, area);
    frame.render_widget(Clear, modal);

    let text = vec![
        Line::from("Global: q quit, Ctrl+C quit, ? help, r reload"),
        Line::from("Move: j/k rows, g/G first/last, h/l scroll columns, [ ] page"),
        Line::from("Find: / search all fields, f filter one column (tab switches column), c clear"),
        Line::from("Sort: 1-5 id/name/company/status/score, tab focus column, s sort focused, S clear"),
        Line::from("Columns: < > narrow/widen the focused column"),
        Line::from("Select: space toggle row, A toggle page, esc clear"),
        Line::from("Edit: a add, e edit, d delete, R reset score, enter expand details, x export"),
        Line::from(""),
        Line::from("Mouse: click header to sort, drag a header border to resize, drag rows to reorder, right-drag a row to change its height"),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), style),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
