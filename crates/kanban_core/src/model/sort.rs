//! Board display ordering configuration.

use serde::{Deserialize, Serialize};

/// Key used to order each lane for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Priority,
    Deadline,
    /// Insertion and drag order, no reordering.
    #[default]
    Custom,
}

/// Direction applied after sorting. Ignored by `SortMode::Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Session-wide display ordering. Defaults to `{mode: custom, order: asc}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortConfig {
    pub mode: SortMode,
    pub order: SortOrder,
}

impl SortConfig {
    pub fn new(mode: SortMode, order: SortOrder) -> Self {
        Self { mode, order }
    }
}
