//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shown on the board.
//! - Validate and normalize user input before it becomes a task.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is set once at creation and never changes.
//! - A task sits in exactly one `Column` at any time.
//! - Titles are non-empty and at most `TITLE_MAX_CHARS` characters after trimming.
//! - Descriptions are at most `DESCRIPTION_MAX_CHARS` characters.

use crate::model::deadline::Deadline;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Opaque task identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = String;

/// Generates a fresh opaque task identifier.
pub fn new_task_id() -> TaskId {
    Uuid::new_v4().to_string()
}

/// Task urgency. Sort rank is `High < Medium < Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Ascending sort rank: high=0, medium=1, low=2.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Status lane a task lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Column {
    /// Board lanes in display order.
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Done];

    /// Position of this lane in `Column::ALL`.
    pub fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// Human-facing lane heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Stable wire label, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical board record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub column: Column,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Deadline>,
}

impl Task {
    /// Builds a task from already validated input.
    pub(crate) fn from_input(id: TaskId, created_at: i64, input: ValidTaskInput) -> Self {
        let mut task = Self {
            id,
            title: String::new(),
            description: None,
            priority: Priority::default(),
            column: Column::default(),
            created_at,
            deadline: None,
        };
        task.apply(input);
        task
    }

    /// Replaces every mutable field, keeping `id` and `created_at`.
    pub(crate) fn apply(&mut self, input: ValidTaskInput) {
        let ValidTaskInput(input) = input;
        self.title = input.title;
        self.description = input.description;
        self.priority = input.priority;
        self.column = input.column;
        self.deadline = input.deadline;
    }

    /// Returns whether title or description contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
    }
}

/// Caller-supplied task fields for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub column: Column,
    #[serde(default)]
    pub deadline: Option<Deadline>,
}

impl TaskInput {
    /// Input with form defaults: medium priority, `todo` lane, no deadline.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.column = column;
        self
    }

    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Checks every rule and returns normalized input.
    ///
    /// Normalization trims the title, trims the description and drops it when
    /// blank. The description limit applies to the text as entered.
    ///
    /// # Errors
    /// - Returns all violated rules at once, never only the first.
    pub fn validate(self) -> Result<ValidTaskInput, TaskValidationError> {
        let mut violations = Vec::new();

        let title = self.title.trim().to_string();
        let title_length = title.chars().count();
        if title_length == 0 {
            violations.push(ValidationRule::TitleRequired);
        } else if title_length > TITLE_MAX_CHARS {
            violations.push(ValidationRule::TitleTooLong {
                length: title_length,
                max: TITLE_MAX_CHARS,
            });
        }

        if let Some(description) = self.description.as_deref() {
            let length = description.chars().count();
            if length > DESCRIPTION_MAX_CHARS {
                violations.push(ValidationRule::DescriptionTooLong {
                    length,
                    max: DESCRIPTION_MAX_CHARS,
                });
            }
        }

        if !violations.is_empty() {
            return Err(TaskValidationError { violations });
        }

        let description = self
            .description
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(ValidTaskInput(TaskInput {
            title,
            description,
            ..self
        }))
    }
}

/// Input that passed `TaskInput::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTaskInput(TaskInput);

impl ValidTaskInput {
    pub fn get(&self) -> &TaskInput {
        &self.0
    }
}

/// One violated input rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    TitleRequired,
    TitleTooLong { length: usize, max: usize },
    DescriptionTooLong { length: usize, max: usize },
}

impl Display for ValidationRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "title is required"),
            Self::TitleTooLong { length, max } => {
                write!(f, "title has {length} characters; at most {max} allowed")
            }
            Self::DescriptionTooLong { length, max } => {
                write!(f, "description has {length} characters; at most {max} allowed")
            }
        }
    }
}

/// Rejected task input with every violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskValidationError {
    pub violations: Vec<ValidationRule>,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid task input: ")?;
        for (index, rule) in self.violations.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl Error for TaskValidationError {}

#[cfg(test)]
mod tests {
    use super::{Column, Priority, TaskInput, ValidationRule};

    #[test]
    fn priority_rank_puts_high_first() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn column_index_matches_all_order() {
        for (position, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index(), position);
        }
    }

    #[test]
    fn validate_trims_title_and_drops_blank_description() {
        let valid = TaskInput::new("  write report  ")
            .description("   ")
            .validate()
            .unwrap();
        assert_eq!(valid.get().title, "write report");
        assert_eq!(valid.get().description, None);
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        let title = "é".repeat(100);
        assert!(TaskInput::new(title).validate().is_ok());
    }

    #[test]
    fn validation_error_message_lists_every_rule() {
        let err = TaskInput::new("")
            .description("x".repeat(501))
            .validate()
            .unwrap_err();
        assert_eq!(
            err.violations,
            vec![
                ValidationRule::TitleRequired,
                ValidationRule::DescriptionTooLong {
                    length: 501,
                    max: 500
                },
            ]
        );
        let message = err.to_string();
        assert!(message.contains("title is required"));
        assert!(message.contains("description has 501 characters"));
    }
}
