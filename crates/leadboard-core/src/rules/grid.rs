use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;
pub const MIN_COLUMN_WIDTH: u32 = 50;
pub const MIN_ROW_HEIGHT: u32 = 20;
pub const DEFAULT_ROW_HEIGHT: u32 = 40;

/// What happens to the current page when the result set shrinks below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOverflow {
    /// Snap back to the last page that has rows.
    #[default]
    Clamp,
    /// Keep the page and show an empty slice.
    Empty,
}

pub fn validate_page_size(size: usize) -> Option<usize> {
    (1..=MAX_PAGE_SIZE).contains(&size).then_some(size)
}

pub fn clamp_column_width(width: i64) -> u32 {
    width.clamp(i64::from(MIN_COLUMN_WIDTH), i64::from(u32::MAX)) as u32
}

pub fn clamp_row_height(height: i64) -> u32 {
    height.clamp(i64::from(MIN_ROW_HEIGHT), i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::{clamp_column_width, clamp_row_height, validate_page_size};

    #[test]
    fn page_size_bounds() {
        assert_eq!(validate_page_size(0), None);
        assert_eq!(validate_page_size(10), Some(10));
        assert_eq!(validate_page_size(101), None);
    }

    #[test]
    fn widths_and_heights_have_floors() {
        assert_eq!(clamp_column_width(150 - 200), 50);
        assert_eq!(clamp_column_width(180), 180);
        assert_eq!(clamp_row_height(-5), 20);
    }
}
