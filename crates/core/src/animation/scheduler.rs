//! Visibility-gated animation playback
//!
//! Each scheduled animation is bound to one observation. Visibility changes
//! start (and in repeat mode reset) the animation's clock; sampling is a pure
//! read at any timestamp. The scheduler's frame task only retires finished
//! animations and reports whether more frames are needed.

use super::property::PropertyState;
use super::transition::Animation;
use super::tween::TweenPhase;
use crate::core_types::Millis;
use crate::frame::{FrameContext, FrameStatus, FrameTask};
use crate::visibility::ObservationId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Handle to one scheduled animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(u64);

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim#{}", self.0)
    }
}

/// How an animation reacts to its element leaving the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerMode {
    /// Play on first entry and stay at the target
    #[default]
    Once,
    /// Reset to the start state on exit and replay on every entry
    Repeat,
}

#[derive(Debug, Clone)]
struct Scheduled {
    observation: ObservationId,
    animation: Animation,
    mode: TriggerMode,
    phase: TweenPhase,
}

/// Plays animations when their observed elements become visible
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    entries: FxHashMap<AnimationId, Scheduled>,
    next_id: u64,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `animation` to `observation`; it waits in `Idle` until the element is visible
    pub fn schedule(
        &mut self,
        observation: ObservationId,
        animation: Animation,
        mode: TriggerMode,
    ) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Scheduled {
                observation,
                animation,
                mode,
                phase: TweenPhase::Idle,
            },
        );
        id
    }

    /// Apply a visibility transition of `observation` at `now`
    pub fn on_visibility(&mut self, observation: ObservationId, visible: bool, now: Millis) {
        for (id, entry) in &mut self.entries {
            if entry.observation != observation {
                continue;
            }
            let next = if visible {
                entry.phase.start(now)
            } else if entry.mode == TriggerMode::Repeat {
                TweenPhase::Idle
            } else {
                entry.phase
            };
            if next != entry.phase {
                debug!("{} on {}: {:?} -> {:?}", id, observation, entry.phase, next);
                entry.phase = next;
            }
        }
    }

    /// Style of the animated element at `now`; `None` for unknown ids
    pub fn sample(&self, id: AnimationId, now: Millis) -> Option<PropertyState> {
        let entry = self.entries.get(&id)?;
        let animation = &entry.animation;
        Some(match entry.phase {
            TweenPhase::Idle => animation.from,
            TweenPhase::Running { started_at } => animation.sample((now - started_at).to_seconds()),
            TweenPhase::Completed => animation.to,
        })
    }

    pub fn phase(&self, id: AnimationId) -> Option<TweenPhase> {
        self.entries.get(&id).map(|entry| entry.phase)
    }

    pub fn animation(&self, id: AnimationId) -> Option<&Animation> {
        self.entries.get(&id).map(|entry| &entry.animation)
    }

    pub fn remove(&mut self, id: AnimationId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Drop every animation bound to `observation`
    pub fn remove_observation(&mut self, observation: ObservationId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.observation != observation);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Any animation still in flight
    pub fn is_animating(&self) -> bool {
        self.entries.values().any(|entry| entry.phase.is_running())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FrameTask for AnimationScheduler {
    fn on_frame(&mut self, ctx: &FrameContext) -> FrameStatus {
        let mut status = FrameStatus::Done;
        for (id, entry) in &mut self.entries {
            let TweenPhase::Running { started_at } = entry.phase else {
                continue;
            };
            if entry
                .animation
                .transition
                .is_finished((ctx.now - started_at).to_seconds())
            {
                debug!("{} completed", id);
                entry.phase = TweenPhase::Completed;
            } else {
                status = FrameStatus::Continue;
            }
        }
        status
    }
}
