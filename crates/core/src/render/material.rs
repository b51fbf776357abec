//! Material descriptions handed to the host's rasterizer

use crate::config::RenderConfig;
use crate::core_types::Color;
use serde::{Deserialize, Serialize};

/// How fragments combine with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// Standard alpha blending
    Normal,
    /// Source colour added onto the destination, so overlapping points glow
    Additive,
}

/// Point sprite material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMaterial {
    /// Sprite size in world units
    pub size: f32,
    pub color: Color,
    pub opacity: f32,
    pub blending: BlendMode,
    /// Shrink sprites with distance from the camera
    pub size_attenuation: bool,
}

impl PointMaterial {
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        PointMaterial {
            size: config.point_size,
            color: config.color,
            opacity: config.point_opacity,
            blending: BlendMode::Additive,
            size_attenuation: true,
        }
    }

    /// On-screen sprite size in pixels at `depth` on a surface `surface_height` pixels tall
    pub fn pixel_size(&self, depth: f32, surface_height: f32) -> f32 {
        if self.size_attenuation && depth > 0.0 {
            self.size * (surface_height * 0.5) / depth
        } else {
            self.size
        }
    }
}

/// Line segment material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineMaterial {
    pub color: Color,
    pub opacity: f32,
    pub blending: BlendMode,
}

impl LineMaterial {
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        LineMaterial {
            color: config.color,
            opacity: config.line_opacity,
            blending: BlendMode::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_materials() {
        let config = RenderConfig::default();
        let points = PointMaterial::from_config(&config);
        let lines = LineMaterial::from_config(&config);
        assert_eq!(points.blending, BlendMode::Additive);
        assert_eq!(points.opacity, 0.6);
        assert_eq!(lines.opacity, 0.15);
        assert_eq!(lines.color, Color::INDIGO);
    }

    #[test]
    fn test_attenuated_size_halves_at_double_depth() {
        let points = PointMaterial::from_config(&RenderConfig::default());
        let near = points.pixel_size(2.5, 800.0);
        let far = points.pixel_size(5.0, 800.0);
        assert_relative_eq!(near, 2.0 * far);
        assert_relative_eq!(far, 0.03 * 400.0 / 5.0);
    }
}
