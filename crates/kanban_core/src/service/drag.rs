//! Drag-and-drop gesture handling.
//!
//! # Responsibility
//! - Turn a finished drag gesture into at most one custom-order move.
//!
//! # Invariants
//! - Cancelled gestures and drops onto the source slot change nothing.
//! - Destination indexes address the unfiltered custom-order lane, so a drop
//!   made while a sorted or filtered view is shown still lands in custom order.

use crate::model::task::{Column, TaskId};
use crate::repo::kv_repo::KeyValueRepository;
use crate::service::board_service::{BoardResult, BoardService};
use log::debug;

/// Lane and slot a drag starts from or ends at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLocation {
    pub column: Column,
    pub index: usize,
}

impl DragLocation {
    pub fn new(column: Column, index: usize) -> Self {
        Self { column, index }
    }
}

/// Completed drag gesture as reported by the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragResult {
    pub task_id: TaskId,
    pub source: DragLocation,
    /// `None` when the drop landed outside every lane.
    pub destination: Option<DragLocation>,
}

impl<R: KeyValueRepository> BoardService<R> {
    /// Applies a drag gesture. Returns whether the board changed.
    ///
    /// # Errors
    /// - `BoardError::NotFound` when the dragged task no longer exists.
    pub fn reorder(&mut self, drag: &DragResult) -> BoardResult<bool> {
        let Some(destination) = drag.destination else {
            debug!(
                "event=task_drag module=service status=ignored reason=cancelled task_id={}",
                drag.task_id
            );
            return Ok(false);
        };
        if destination == drag.source {
            debug!(
                "event=task_drag module=service status=ignored reason=same_slot task_id={}",
                drag.task_id
            );
            return Ok(false);
        }

        self.move_to_column(&drag.task_id, destination.column, destination.index)
    }
}
