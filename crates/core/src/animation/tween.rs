use crate::core_types::Millis;
use serde::{Deserialize, Serialize};

/// Lifecycle of a visibility-gated tween
///
/// ```text
/// Idle --enter--> Running --elapsed >= delay + duration--> Completed
///   ^                |                                        |
///   +----exit--------+-------------(repeat mode only)---------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TweenPhase {
    /// Waiting for the element to become visible
    #[default]
    Idle,
    /// Clock started at `started_at`
    Running { started_at: Millis },
    /// Frozen at the target state
    Completed,
}

impl TweenPhase {
    pub fn is_idle(self) -> bool {
        self == TweenPhase::Idle
    }

    pub fn is_running(self) -> bool {
        matches!(self, TweenPhase::Running { .. })
    }

    pub fn is_completed(self) -> bool {
        self == TweenPhase::Completed
    }

    /// Start the clock unless already started
    #[must_use]
    pub fn start(self, now: Millis) -> TweenPhase {
        match self {
            TweenPhase::Idle => TweenPhase::Running { started_at: now },
            other => other,
        }
    }
}
