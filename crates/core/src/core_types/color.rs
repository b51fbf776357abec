//! Linear RGBA colour shared by materials and animated properties.

use serde::{Deserialize, Serialize};

/// RGBA colour with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Indigo used for both the point sprites and the connector lines
    pub const INDIGO: Color = Color::from_hex(0x81_8c_f8);

    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque colour from a `0xRRGGBB` literal
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Color {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same colour with a different alpha
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Color { a, ..self }
    }

    /// Per-channel linear interpolation; `t` is not clamped so overshooting easings work
    #[must_use]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_hex() {
        let c = Color::INDIGO;
        assert_relative_eq!(c.r, 129.0 / 255.0);
        assert_relative_eq!(c.g, 140.0 / 255.0);
        assert_relative_eq!(c.b, 248.0 / 255.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_lerp_midpoint() {
        let black = Color::rgba(0.0, 0.0, 0.0, 0.0);
        let white = Color::rgba(1.0, 1.0, 1.0, 1.0);
        let mid = black.lerp(white, 0.5);
        assert_relative_eq!(mid.r, 0.5);
        assert_relative_eq!(mid.a, 0.5);
    }
}
