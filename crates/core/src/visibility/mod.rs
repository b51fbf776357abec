//! Viewport visibility for mounted elements

pub mod observer;
pub mod trigger;

pub use observer::{ObservationId, ViewportObserver};
pub use trigger::{ObserveOptions, VisibilityTrigger};
