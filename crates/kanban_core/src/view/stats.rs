//! Board progress counters.

use crate::model::task::{Column, Task};

/// Aggregate counts over every task on the board, ignoring search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    pub total: usize,
    /// Tasks in the `done` lane.
    pub completed: usize,
    /// `completed / total` as a rounded percentage; `0` for an empty board.
    pub completion_percentage: u8,
    /// Per-lane counts indexed like `Column::ALL`.
    pub per_column: [usize; 3],
}

impl BoardStats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut per_column = [0_usize; 3];
        for task in tasks {
            per_column[task.column.index()] += 1;
        }
        let total = per_column.iter().sum::<usize>();
        let completed = per_column[Column::Done.index()];

        Self {
            total,
            completed,
            completion_percentage: percentage(completed, total),
            per_column,
        }
    }

    pub fn count(&self, column: Column) -> usize {
        self.per_column[column.index()]
    }
}

/// Rounds half up, like the progress bar does.
fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part * 200 + total) / (total * 2)) as u8
}
