//! Lane comparators for priority and deadline display modes.

use crate::model::sort::{SortConfig, SortMode, SortOrder};
use crate::model::task::Task;
use std::cmp::Ordering;

/// Sorts one lane in place according to `config`.
///
/// `SortMode::Custom` keeps the given order. Descending order reverses the
/// fully sorted lane; in deadline mode tasks without a deadline still stay
/// after every task that has one.
pub fn sort_lane(lane: &mut [Task], config: SortConfig) {
    match config.mode {
        SortMode::Custom => {}
        SortMode::Priority => {
            lane.sort_by(compare_by_priority);
            if config.order == SortOrder::Desc {
                lane.reverse();
            }
        }
        SortMode::Deadline => {
            lane.sort_by(compare_by_deadline);
            if config.order == SortOrder::Desc {
                let dated = lane.partition_point(|task| task.deadline.is_some());
                let (with_deadline, without_deadline) = lane.split_at_mut(dated);
                with_deadline.reverse();
                without_deadline.reverse();
            }
        }
    }
}

/// Priority rank, then deadline, then title.
pub fn compare_by_priority(a: &Task, b: &Task) -> Ordering {
    a.priority
        .rank()
        .cmp(&b.priority.rank())
        .then_with(|| compare_deadlines(a, b))
        .then_with(|| compare_titles(&a.title, &b.title))
}

/// Deadline, then priority rank, then title.
pub fn compare_by_deadline(a: &Task, b: &Task) -> Ordering {
    compare_deadlines(a, b)
        .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
        .then_with(|| compare_titles(&a.title, &b.title))
}

/// Earlier instant first; a missing deadline sorts after any present one.
fn compare_deadlines(a: &Task, b: &Task) -> Ordering {
    match (&a.deadline, &b.deadline) {
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive title order; exact text breaks ties so the order is total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::compare_titles;
    use std::cmp::Ordering;

    #[test]
    fn titles_compare_case_insensitively() {
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn titles_differing_only_in_case_are_still_ordered() {
        assert_ne!(compare_titles("Task", "task"), Ordering::Equal);
        assert_eq!(compare_titles("same", "same"), Ordering::Equal);
    }
}
