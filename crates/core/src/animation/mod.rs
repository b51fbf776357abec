//! Property animation
//!
//! - [`easing`]: timing curves
//! - [`property`]: the sparse style state animations produce
//! - [`transition`]: stateless from/to animations and their presets
//! - [`scheduler`]: visibility-gated playback
//! - [`periodic`]: looping keyframe decorations

pub mod easing;
pub mod periodic;
pub mod property;
pub mod scheduler;
pub mod transition;
pub mod tween;

pub use easing::{ease_out_cubic, Easing};
pub use periodic::PeriodicTween;
pub use property::PropertyState;
pub use scheduler::{AnimationId, AnimationScheduler, TriggerMode};
pub use transition::{stagger, Animation, Transition};
pub use tween::TweenPhase;
