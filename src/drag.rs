//! Drag gesture state machine for the board.
//!
//! Moves commit eagerly mid-drag: hovering a column (or a card in another
//! column) applies the move immediately through the store, whose
//! same-status guard absorbs repeated hover events over the same column.
//! Dropping or cancelling only clears the active drag; there is no
//! rollback, so a cancelled drag keeps the last hover-applied status.

use crate::board::BoardStore;
use crate::error::Result;
use crate::task::TaskStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging {
        task_id: String,
        provisional: TaskStatus,
    },
}

/// Tracks one drag gesture at a time.
#[derive(Debug)]
pub struct DragController {
    state: DragState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Id of the task being dragged, if any.
    pub fn active_task(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { task_id, .. } => Some(task_id),
            DragState::Idle => None,
        }
    }

    /// Begin dragging a task. Ignored while a drag is already active or
    /// when the task does not exist.
    pub fn start(&mut self, store: &BoardStore, task_id: &str) -> bool {
        if !matches!(self.state, DragState::Idle) {
            return false;
        }
        let Some(task) = store.task(task_id) else {
            return false;
        };
        self.state = DragState::Dragging {
            task_id: task.id.clone(),
            provisional: task.status,
        };
        true
    }

    /// Hover over a column: eagerly commit the move. The store's
    /// same-status guard makes repeated hovers over one column free.
    pub fn hover_column(&mut self, store: &mut BoardStore, status: TaskStatus) -> Result<()> {
        let DragState::Dragging { task_id, provisional } = &mut self.state else {
            return Ok(());
        };
        if *provisional == status {
            return Ok(());
        }
        let task_id = task_id.clone();
        store.move_task(&task_id, status)?;
        if let DragState::Dragging { provisional, .. } = &mut self.state {
            *provisional = status;
        }
        Ok(())
    }

    /// Hover over another card: adopt that card's column when it differs
    /// from the dragged task's provisional column.
    pub fn hover_task(&mut self, store: &mut BoardStore, over_task_id: &str) -> Result<()> {
        let Some(target_status) = store.task(over_task_id).map(|t| t.status) else {
            return Ok(());
        };
        if self.active_task() == Some(over_task_id) {
            return Ok(());
        }
        self.hover_column(store, target_status)
    }

    /// End the drag. State already committed on hover; nothing to undo.
    pub fn drop(&mut self) {
        self.state = DragState::Idle;
    }

    /// Cancel is identical to drop: hover commits are kept.
    pub fn cancel(&mut self) {
        self.drop();
    }
}
