//! View configuration
//!
//! Every knob has a default matching the landing page the field was built for, so
//! hosts normally write `ViewConfig::default()` or override a few fields with
//! `..Default::default()`. All structs are serde-enabled for hosts that keep their
//! configuration in JSON.

use crate::core_types::Color;
use crate::simulation::BoundaryMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Particle and connector generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of simulated particles
    pub particle_count: usize,
    /// Number of static connector segments
    pub connector_count: usize,
    /// Half-width of the reflecting cube (world units)
    pub bound: f32,
    /// Particles spawn uniformly in `[-spawn_extent, spawn_extent]^3`
    pub spawn_extent: f32,
    /// Velocity components spawn uniformly in `[-max_velocity, max_velocity]` (world units per frame)
    pub max_velocity: f32,
    /// What happens when a particle crosses the bound
    pub boundary: BoundaryMode,
    /// Connector start points spawn in `[-connector_extent, connector_extent]^3`
    pub connector_extent: f32,
    /// Connector end point offset per axis
    pub connector_offset: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 400,
            connector_count: 80,
            bound: 5.0,
            spawn_extent: 5.0,
            max_velocity: 0.01,
            boundary: BoundaryMode::Reflect,
            connector_extent: 4.0,
            connector_offset: 1.0,
        }
    }
}

/// Camera, materials and cosmetic rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Camera sits on +z looking at the origin
    pub camera_distance: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Point sprite size in world units
    pub point_size: f32,
    pub point_opacity: f32,
    pub line_opacity: f32,
    pub color: Color,
    /// Point cloud yaw in radians per second
    pub point_yaw_rate: f32,
    /// Angular frequency of the point cloud's pitch wobble
    pub point_pitch_rate: f32,
    /// Pitch wobble amplitude in radians
    pub point_pitch_amplitude: f32,
    /// Connector cloud yaw in radians per second
    pub connector_yaw_rate: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            camera_distance: 5.0,
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            point_size: 0.03,
            point_opacity: 0.6,
            line_opacity: 0.15,
            color: Color::INDIGO,
            point_yaw_rate: 0.05,
            point_pitch_rate: 0.1,
            point_pitch_amplitude: 0.1,
            connector_yaw_rate: 0.02,
        }
    }
}

/// Entrance animation triggers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Viewport margin for section reveals; negative fires only once well inside
    pub section_margin_px: f32,
    /// Viewport margin for card reveals
    pub card_margin_px: f32,
    /// Reveal sections once per mount instead of on every entry
    pub once: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            section_margin_px: -100.0,
            card_margin_px: -50.0,
            once: true,
        }
    }
}

/// Tweened counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Viewport margin for counter triggers
    pub margin_px: f32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { margin_px: 0.0 }
    }
}

/// Complete configuration for one mounted view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub field: FieldConfig,
    pub render: RenderConfig,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
}

impl ViewConfig {
    /// Check every numeric setting for values that would break the view
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.field;
        require_positive("field.bound", field.bound)?;
        require_non_negative("field.spawn_extent", field.spawn_extent)?;
        require_non_negative("field.max_velocity", field.max_velocity)?;
        require_non_negative("field.connector_extent", field.connector_extent)?;
        require_non_negative("field.connector_offset", field.connector_offset)?;

        let render = &self.render;
        require_positive("render.camera_distance", render.camera_distance)?;
        require_positive("render.fov_degrees", render.fov_degrees)?;
        if render.fov_degrees >= 180.0 {
            return Err(ConfigError::OutOfRange {
                field: "render.fov_degrees",
                value: render.fov_degrees,
            });
        }
        require_positive("render.near", render.near)?;
        if !(render.far.is_finite() && render.far > render.near) {
            return Err(ConfigError::OutOfRange {
                field: "render.far",
                value: render.far,
            });
        }
        require_non_negative("render.point_size", render.point_size)?;
        require_unit("render.point_opacity", render.point_opacity)?;
        require_unit("render.line_opacity", render.line_opacity)?;
        require_finite("render.point_yaw_rate", render.point_yaw_rate)?;
        require_finite("render.point_pitch_rate", render.point_pitch_rate)?;
        require_finite("render.point_pitch_amplitude", render.point_pitch_amplitude)?;
        require_finite("render.connector_yaw_rate", render.connector_yaw_rate)?;

        require_finite("reveal.section_margin_px", self.reveal.section_margin_px)?;
        require_finite("reveal.card_margin_px", self.reveal.card_margin_px)?;
        require_finite("counter.margin_px", self.counter.margin_px)?;

        Ok(())
    }
}

/// Configuration rejected by [`ViewConfig::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// NaN or infinite value
    NotFinite { field: &'static str, value: f32 },
    /// Zero or negative where a positive value is required
    NotPositive { field: &'static str, value: f32 },
    /// Negative where zero is allowed
    Negative { field: &'static str, value: f32 },
    /// Finite but outside the field's valid range
    OutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            ConfigError::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            ConfigError::OutOfRange { field, value } => {
                write!(f, "{field} is out of range, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn require_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn require_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}
