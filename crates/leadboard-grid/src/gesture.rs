//! Pointer gestures as an explicit state machine.
//!
//! Column and row resizes need pointer-move/pointer-up listeners for as long as the drag lasts;
//! entering a resize state asks the front-end to attach them and every exit asks it to detach
//! them again. Row dragging for reorder only tracks the dragged id and the current drop target.

use leadboard_core::rules::{clamp_column_width, clamp_row_height};
use leadboard_core::{ColumnKey, LeadId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        lead: LeadId,
        over: Option<LeadId>,
    },
    ResizingColumn {
        key: ColumnKey,
        start_x: i64,
        start_width: u32,
    },
    ResizingRow {
        lead: LeadId,
        start_y: i64,
        start_height: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEffect {
    AttachPointerListeners,
    DetachPointerListeners,
    ColumnWidth { key: ColumnKey, width: u32 },
    RowHeight { lead: LeadId, height: u32 },
    DropTarget(Option<LeadId>),
    Reorder { from: LeadId, to: LeadId },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureTracker {
    state: GestureState,
    listeners_attached: bool,
}

impl GestureTracker {
    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    pub fn listeners_attached(&self) -> bool {
        self.listeners_attached
    }

    pub fn dragged(&self) -> Option<LeadId> {
        match self.state {
            GestureState::Dragging { lead, .. } => Some(lead),
            _ => None,
        }
    }

    pub fn drop_target(&self) -> Option<LeadId> {
        match self.state {
            GestureState::Dragging { over, .. } => over,
            _ => None,
        }
    }

    /// Ignored unless idle.
    pub fn start_column_resize(
        &mut self,
        key: ColumnKey,
        pointer_x: i64,
        current_width: u32,
    ) -> Vec<GestureEffect> {
        if !self.is_idle() {
            return Vec::new();
        }
        self.state = GestureState::ResizingColumn {
            key,
            start_x: pointer_x,
            start_width: current_width,
        };
        self.attach()
    }

    /// Ignored unless idle.
    pub fn start_row_resize(
        &mut self,
        lead: LeadId,
        pointer_y: i64,
        current_height: u32,
    ) -> Vec<GestureEffect> {
        if !self.is_idle() {
            return Vec::new();
        }
        self.state = GestureState::ResizingRow {
            lead,
            start_y: pointer_y,
            start_height: current_height,
        };
        self.attach()
    }

    pub fn pointer_move(&mut self, pointer_x: i64, pointer_y: i64) -> Option<GestureEffect> {
        match self.state {
            GestureState::ResizingColumn {
                key,
                start_x,
                start_width,
            } => Some(GestureEffect::ColumnWidth {
                key,
                width: clamp_column_width(i64::from(start_width) + (pointer_x - start_x)),
            }),
            GestureState::ResizingRow {
                lead,
                start_y,
                start_height,
            } => Some(GestureEffect::RowHeight {
                lead,
                height: clamp_row_height(i64::from(start_height) + (pointer_y - start_y)),
            }),
            _ => None,
        }
    }

    /// Ends a resize. A drag in progress is abandoned without a drop.
    pub fn pointer_up(&mut self) -> Vec<GestureEffect> {
        self.finish()
    }

    pub fn cancel(&mut self) -> Vec<GestureEffect> {
        self.finish()
    }

    /// Called when the grid goes away mid-gesture.
    pub fn teardown(&mut self) -> Vec<GestureEffect> {
        self.finish()
    }

    /// Ignored unless idle.
    pub fn drag_start(&mut self, lead: LeadId) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = GestureState::Dragging { lead, over: None };
        true
    }

    /// Marks the row under the pointer as the drop target. Visual only.
    pub fn drag_over(&mut self, target: LeadId) -> Option<GestureEffect> {
        match &mut self.state {
            GestureState::Dragging { over, .. } if *over != Some(target) => {
                *over = Some(target);
                Some(GestureEffect::DropTarget(Some(target)))
            }
            _ => None,
        }
    }

    /// Commits a drag. Dropping on the dragged row itself, or with no drag active, does nothing.
    pub fn drop_on(&mut self, target: LeadId) -> Option<GestureEffect> {
        let GestureState::Dragging { lead, .. } = self.state else {
            return None;
        };
        self.state = GestureState::Idle;
        (lead != target).then_some(GestureEffect::Reorder {
            from: lead,
            to: target,
        })
    }

    fn attach(&mut self) -> Vec<GestureEffect> {
        self.listeners_attached = true;
        vec![GestureEffect::AttachPointerListeners]
    }

    fn finish(&mut self) -> Vec<GestureEffect> {
        let mut effects = Vec::new();
        if matches!(self.state, GestureState::Dragging { .. }) {
            effects.push(GestureEffect::DropTarget(None));
        }
        self.state = GestureState::Idle;
        if self.listeners_attached {
            self.listeners_attached = false;
            effects.push(GestureEffect::DetachPointerListeners);
        }
        effects
    }
}
