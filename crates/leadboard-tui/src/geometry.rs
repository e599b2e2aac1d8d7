//! Mapping between terminal cells and the grid's pixel model.
//!
//! Column widths and row heights are kept in pixels so they match the configured values; the
//! terminal shows one cell per [`PX_PER_CELL`] horizontally and one line per [`PX_PER_LINE`].

use leadboard_core::{ColumnKey, LeadId};
use leadboard_grid::{ColumnSpan, LeadGrid, RowDetail};
use ratatui::layout::Rect;

pub const PX_PER_CELL: u32 = 10;
pub const PX_PER_LINE: u32 = 20;
/// How close (px) a pointer must be to a header border to grab it.
const BORDER_TOLERANCE: u32 = PX_PER_CELL / 2 - 1;

/// A column's on-screen cell range, relative to the table's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub key: ColumnKey,
    pub x: u16,
    pub width: u16,
    pub frozen: bool,
}

/// Vertical placement of one lead row, relative to the table's top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSlot {
    pub lead: LeadId,
    pub top: u16,
    pub lines: u16,
    pub detail_lines: u16,
}

impl RowSlot {
    pub fn bottom(&self) -> u16 {
        self.top + self.lines + self.detail_lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    HeaderBorder(ColumnKey),
    Header(ColumnKey),
    Row {
        lead: LeadId,
        column: Option<ColumnKey>,
    },
    Outside,
}

pub fn viewport_px(table: Rect) -> u32 {
    u32::from(table.width) * PX_PER_CELL
}

pub fn row_lines(height_px: u32) -> u16 {
    u16::try_from((height_px / PX_PER_LINE).max(1)).unwrap_or(u16::MAX)
}

pub fn cell_spans(spans: &[ColumnSpan]) -> Vec<CellSpan> {
    spans
        .iter()
        .filter_map(|span| {
            let x = span.x / PX_PER_CELL;
            let right = span.right() / PX_PER_CELL;
            (right > x).then(|| CellSpan {
                key: span.key,
                x: to_u16(x),
                width: to_u16(right - x),
                frozen: span.frozen,
            })
        })
        .collect()
}

/// Visible columns of `grid` for a table `table` wide, in cells.
pub fn visible_cells(grid: &LeadGrid, table: Rect) -> Vec<CellSpan> {
    let state = grid.state();
    cell_spans(
        &state
            .columns
            .visible_columns(state.scroll_x, viewport_px(table)),
    )
}

/// Rows of the current page, stacked below the one-line header.
pub fn row_slots(grid: &LeadGrid) -> Vec<RowSlot> {
    let state = grid.state();
    let view = grid.view();
    let mut top = 1u16;
    view.rows
        .iter()
        .map(|lead| {
            let lines = row_lines(state.rows.height(lead.id));
            let detail_lines = if state.expanded.is_expanded(lead.id) {
                to_u16(RowDetail::for_lead(lead).lines().len() as u32)
            } else {
                0
            };
            let slot = RowSlot {
                lead: lead.id,
                top,
                lines,
                detail_lines,
            };
            top = slot.bottom();
            slot
        })
        .collect()
}

/// Pointer position in grid pixels, relative to the table origin.
pub fn pointer_px(table: Rect, column: u16, row: u16) -> (i64, i64) {
    let x = i64::from(column.saturating_sub(table.x)) * i64::from(PX_PER_CELL);
    let y = i64::from(row.saturating_sub(table.y)) * i64::from(PX_PER_LINE);
    (x, y)
}

pub fn hit_test(grid: &LeadGrid, table: Rect, column: u16, row: u16) -> Hit {
    if column < table.x
        || row < table.y
        || column >= table.x + table.width
        || row >= table.y + table.height
    {
        return Hit::Outside;
    }
    let cell_x = column - table.x;
    let line = row - table.y;
    let state = grid.state();
    let viewport = viewport_px(table);
    let pointer = u32::from(cell_x) * PX_PER_CELL;

    if line == 0 {
        let right_edge = pointer + PX_PER_CELL;
        if let Some(key) =
            state
                .columns
                .border_at(right_edge, state.scroll_x, viewport, BORDER_TOLERANCE)
        {
            return Hit::HeaderBorder(key);
        }
        return match column_at(grid, table, cell_x) {
            Some(key) => Hit::Header(key),
            None => Hit::Outside,
        };
    }

    row_slots(grid)
        .into_iter()
        .find(|slot| line >= slot.top && line < slot.bottom())
        .map(|slot| Hit::Row {
            lead: slot.lead,
            column: column_at(grid, table, cell_x),
        })
        .unwrap_or(Hit::Outside)
}

fn column_at(grid: &LeadGrid, table: Rect, cell_x: u16) -> Option<ColumnKey> {
    visible_cells(grid, table)
        .into_iter()
        .find(|span| cell_x >= span.x && cell_x < span.x + span.width)
        .map(|span| span.key)
}

fn to_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
