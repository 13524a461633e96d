//! Filter, group and sort pipeline behind the board lanes.

use crate::model::sort::SortConfig;
use crate::model::task::{Column, Task};
use crate::view::ordering::sort_lane;

/// The three displayed lanes, each in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl BoardView {
    pub fn lane(&self, column: Column) -> &[Task] {
        match column {
            Column::Todo => &self.todo,
            Column::InProgress => &self.in_progress,
            Column::Done => &self.done,
        }
    }

    fn lane_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::Todo => &mut self.todo,
            Column::InProgress => &mut self.in_progress,
            Column::Done => &mut self.done,
        }
    }

    /// Number of tasks across all lanes.
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Projects tasks (given in custom order) into sorted, filtered lanes.
///
/// Steps: keep tasks matching `search_query` (trimmed, case-insensitive, over
/// title and description; blank keeps all), split by column preserving custom
/// order, then sort each lane with `config`.
pub fn project<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    config: SortConfig,
    search_query: &str,
) -> BoardView {
    let needle = search_query.trim().to_lowercase();
    let mut view = BoardView::default();

    for task in tasks {
        if needle.is_empty() || task.matches_lowercase(&needle) {
            view.lane_mut(task.column).push(task.clone());
        }
    }
    for column in Column::ALL {
        sort_lane(view.lane_mut(column), config);
    }
    view
}
