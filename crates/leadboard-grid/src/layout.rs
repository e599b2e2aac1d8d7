use leadboard_core::rules::{clamp_column_width, clamp_row_height, DEFAULT_ROW_HEIGHT};
use leadboard_core::{ColumnKey, LeadId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use leadboard_core::rules::{MIN_COLUMN_WIDTH, MIN_ROW_HEIGHT};

pub const DEFAULT_COLUMN_WIDTH: u32 = 150;

/// Where a column lands on screen for a given horizontal scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub key: ColumnKey,
    /// Screen x of the visible part.
    pub x: u32,
    /// Visible width; smaller than the column width when clipped.
    pub width: u32,
    pub frozen: bool,
}

impl ColumnSpan {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }
}

/// Column order and pixel widths of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    columns: Vec<ColumnKey>,
    widths: BTreeMap<ColumnKey, u32>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(ColumnKey::GRID.to_vec())
    }
}

impl ColumnLayout {
    /// Frozen columns are moved to the front, keeping their relative order.
    pub fn new(columns: Vec<ColumnKey>) -> Self {
        let (mut ordered, rest): (Vec<_>, Vec<_>) =
            columns.into_iter().partition(|key| key.is_frozen());
        ordered.extend(rest);
        let widths = ordered
            .iter()
            .map(|key| (*key, key.default_width()))
            .collect();
        Self {
            columns: ordered,
            widths,
        }
    }

    pub fn with_widths(mut self, overrides: &BTreeMap<ColumnKey, u32>) -> Self {
        for (key, width) in overrides {
            self.set_width(*key, i64::from(*width));
        }
        self
    }

    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    pub fn width(&self, key: ColumnKey) -> u32 {
        self.widths
            .get(&key)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Stores `max(width, MIN_COLUMN_WIDTH)` and returns it.
    pub fn set_width(&mut self, key: ColumnKey, width: i64) -> u32 {
        let width = clamp_column_width(width);
        self.widths.insert(key, width);
        width
    }

    pub fn resize_by(&mut self, key: ColumnKey, delta: i64) -> u32 {
        let current = i64::from(self.width(key));
        self.set_width(key, current + delta)
    }

    /// Left offset of a frozen column: the widths of the frozen columns before it.
    pub fn frozen_offset(&self, key: ColumnKey) -> Option<u32> {
        if !key.is_frozen() || !self.columns.contains(&key) {
            return None;
        }
        Some(
            self.columns
                .iter()
                .take_while(|column| **column != key)
                .filter(|column| column.is_frozen())
                .map(|column| self.width(*column))
                .sum(),
        )
    }

    pub fn frozen_width(&self) -> u32 {
        self.columns
            .iter()
            .filter(|key| key.is_frozen())
            .map(|key| self.width(*key))
            .sum()
    }

    pub fn total_width(&self) -> u32 {
        self.columns.iter().map(|key| self.width(*key)).sum()
    }

    pub fn max_scroll_x(&self, viewport: u32) -> u32 {
        self.total_width().saturating_sub(viewport)
    }

    /// Frozen columns stay at their offsets; the rest shift left by `scroll_x` and are clipped
    /// behind the frozen block and at the viewport edge.
    pub fn visible_columns(&self, scroll_x: u32, viewport: u32) -> Vec<ColumnSpan> {
        let frozen_width = self.frozen_width();
        let mut spans = Vec::new();
        let mut frozen_x = 0u32;
        let mut content_x = frozen_width;
        for key in &self.columns {
            let width = self.width(*key);
            let (left, right, floor) = if key.is_frozen() {
                let left = frozen_x;
                frozen_x += width;
                (i64::from(left), i64::from(left + width), 0)
            } else {
                let left = i64::from(content_x) - i64::from(scroll_x);
                content_x += width;
                (left, left + i64::from(width), i64::from(frozen_width))
            };
            let visible_left = left.max(floor);
            let visible_right = right.min(i64::from(viewport));
            if visible_right > visible_left {
                spans.push(ColumnSpan {
                    key: *key,
                    x: visible_left as u32,
                    width: (visible_right - visible_left) as u32,
                    frozen: key.is_frozen(),
                });
            }
        }
        spans
    }

    pub fn column_at(&self, x: u32, scroll_x: u32, viewport: u32) -> Option<ColumnKey> {
        self.visible_columns(scroll_x, viewport)
            .into_iter()
            .find(|span| x >= span.x && x < span.right())
            .map(|span| span.key)
    }

    /// The column whose right border is within `tolerance` of `x`.
    pub fn border_at(&self, x: u32, scroll_x: u32, viewport: u32, tolerance: u32) -> Option<ColumnKey> {
        self.visible_columns(scroll_x, viewport)
            .into_iter()
            .find(|span| span.right().abs_diff(x) <= tolerance)
            .map(|span| span.key)
    }
}

/// Per-row heights keyed by lead id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowLayout {
    heights: BTreeMap<LeadId, u32>,
}

impl RowLayout {
    pub fn height(&self, id: LeadId) -> u32 {
        self.heights.get(&id).copied().unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    /// Stores `max(height, MIN_ROW_HEIGHT)` and returns it.
    pub fn set_height(&mut self, id: LeadId, height: i64) -> u32 {
        let height = clamp_row_height(height);
        self.heights.insert(id, height);
        height
    }

    pub fn forget(&mut self, ids: &std::collections::BTreeSet<LeadId>) {
        self.heights.retain(|id, _| !ids.contains(id));
    }
}
