//! Core types and utilities

pub mod color;
pub mod rect;
pub mod units;
pub mod vec3;

pub use color::Color;
pub use rect::Rect;
pub use units::{Degrees, Millis, Radians, Seconds};
pub use vec3::Vec3;
