//! The interactive lead grid.
//!
//! Data flows one way: the [`RecordStore`](leadboard_store::RecordStore) snapshot goes through
//! the view pipeline (filter, sort, paginate) to the visible rows. User gestures mutate either
//! the [`GridState`] through [`GridAction`]s or the store through [`LeadGrid`] methods; the view
//! is recomputed from the latest snapshot on every call.

pub mod dynamic;
pub mod error;
pub mod expand;
pub mod export;
pub mod gesture;
pub mod grid;
pub mod layout;
pub mod selection;
pub mod state;
pub mod view;

pub use dynamic::{cell_text, DynamicTable};
pub use error::{GridError, Result};
pub use expand::{ExpandedRows, RowDetail};
pub use export::{ExportFile, ExportFormat, ExportScope, EXPORT_HEADERS};
pub use gesture::{GestureEffect, GestureState, GestureTracker};
pub use grid::{GridConfig, LeadGrid};
pub use layout::{
    ColumnLayout, ColumnSpan, RowLayout, DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH, MIN_ROW_HEIGHT,
};
pub use selection::{HeaderCheck, Selection, ToolbarMode};
pub use state::{DrawerState, GridAction, GridState, LoadState};
pub use view::{PageView, SortDirection, SortState, ViewQuery};
