//! Selection policies deciding which tag the scheduler shows next.
//!
//! A policy only ever sees the current item list. Picking and confirming are
//! split: `pick` proposes an item, `on_success` advances the cursor once the
//! scheduler has verified the item still exists. Skipped (stale) picks never
//! move the cursor.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Policy factory selected by the command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Uniformly random pick on every tick.
    Shuffle,
    /// Round-robin through the list, wrapping forever.
    Cycle,
    /// Play through the list once, then stop.
    Onceonly,
}

impl PolicyKind {
    /// Build a fresh policy instance with its cursor at the start.
    #[must_use]
    pub const fn build(self) -> SelectionPolicy {
        match self {
            Self::Shuffle => SelectionPolicy::Shuffle,
            Self::Cycle => SelectionPolicy::Cycle { cursor: 0 },
            Self::Onceonly => SelectionPolicy::Onceonly { cursor: 0 },
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shuffle => write!(f, "shuffle"),
            Self::Cycle => write!(f, "cycle"),
            Self::Onceonly => write!(f, "onceonly"),
        }
    }
}

/// Running policy state owned by the active schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Stateless random selection.
    Shuffle,
    /// Round-robin cursor.
    Cycle {
        /// Index of the next item to show.
        cursor: usize,
    },
    /// One-shot cursor; exhausted once it passes the end of the list.
    Onceonly {
        /// Index of the next item to show.
        cursor: usize,
    },
}

impl SelectionPolicy {
    /// Propose the next item, or `None` when the policy is exhausted.
    ///
    /// Callers must not pass an empty list; the scheduler stops before that
    /// happens. Shuffle and Cycle return `None` for an empty list rather
    /// than panicking.
    pub fn pick<'a>(&mut self, items: &'a [String]) -> Option<&'a str> {
        match self {
            Self::Shuffle => {
                if items.is_empty() {
                    return None;
                }
                let idx = rand::rng().random_range(0..items.len());
                Some(items[idx].as_str())
            }
            Self::Cycle { cursor } => {
                // The list may have shrunk since the cursor last moved.
                if *cursor >= items.len() {
                    *cursor = 0;
                }
                items.get(*cursor).map(String::as_str)
            }
            Self::Onceonly { cursor } => items.get(*cursor).map(String::as_str),
        }
    }

    /// Confirm the last pick was applied.
    pub fn on_success(&mut self) {
        match self {
            Self::Shuffle => {}
            Self::Cycle { cursor } | Self::Onceonly { cursor } => *cursor += 1,
        }
    }

    /// The factory this policy was built from.
    #[must_use]
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::Shuffle => PolicyKind::Shuffle,
            Self::Cycle { .. } => PolicyKind::Cycle,
            Self::Onceonly { .. } => PolicyKind::Onceonly,
        }
    }
}
