use crate::core_types::Color;
use serde::{Deserialize, Serialize};

/// Sparse set of animatable style properties
///
/// Unset properties are left to the host's stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyState {
    pub opacity: Option<f32>,
    /// Horizontal offset in pixels
    pub x: Option<f32>,
    /// Vertical offset in pixels
    pub y: Option<f32>,
    pub scale: Option<f32>,
    /// Rotation in degrees
    pub rotate: Option<f32>,
    /// Width in percent of the container
    pub width: Option<f32>,
    /// Drawn fraction of an SVG stroke
    pub path_length: Option<f32>,
    pub color: Option<Color>,
}

impl PropertyState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn with_x(mut self, value: f32) -> Self {
        self.x = Some(value);
        self
    }

    pub fn with_y(mut self, value: f32) -> Self {
        self.y = Some(value);
        self
    }

    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn with_width(mut self, percent: f32) -> Self {
        self.width = Some(percent);
        self
    }

    pub fn with_path_length(mut self, fraction: f32) -> Self {
        self.path_length = Some(fraction);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Interpolate towards `to` by `t`
    ///
    /// Properties set on both sides are interpolated. A property set on one side
    /// only keeps that side's value. `t` is not clamped, so overshooting curves
    /// carry through.
    #[must_use]
    pub fn lerp(&self, to: &PropertyState, t: f32) -> PropertyState {
        PropertyState {
            opacity: lerp_scalar(self.opacity, to.opacity, t),
            x: lerp_scalar(self.x, to.x, t),
            y: lerp_scalar(self.y, to.y, t),
            scale: lerp_scalar(self.scale, to.scale, t),
            rotate: lerp_scalar(self.rotate, to.rotate, t),
            width: lerp_scalar(self.width, to.width, t),
            path_length: lerp_scalar(self.path_length, to.path_length, t),
            color: match (self.color, to.color) {
                (Some(a), Some(b)) => Some(a.lerp(b, t)),
                (a, b) => b.or(a),
            },
        }
    }
}

fn lerp_scalar(from: Option<f32>, to: Option<f32>, t: f32) -> Option<f32> {
    match (from, to) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (a, b) => b.or(a),
    }
}
