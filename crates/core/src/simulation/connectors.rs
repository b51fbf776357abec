//! Static decorative line segments
//!
//! Connectors are generated once and never touched by the simulation. They do not
//! link particles; they only give the point cloud some visual structure.

use crate::config::FieldConfig;
use crate::core_types::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One line segment `a -> b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub a: Vec3,
    pub b: Vec3,
}

impl Connector {
    pub fn length(&self) -> f32 {
        (self.b - self.a).norm()
    }
}

/// Immutable set of connectors
#[derive(Debug, Clone, Default)]
pub struct ConnectorCloud {
    segments: Vec<Connector>,
}

impl ConnectorCloud {
    /// Generate `count` segments from the thread-local RNG
    #[must_use]
    pub fn new(count: usize, config: &FieldConfig) -> Self {
        let mut rng = rand::rng();
        Self::with_rng(count, config, &mut rng)
    }

    /// Generate `count` segments from a caller-supplied RNG
    ///
    /// Start points are uniform in `[-connector_extent, connector_extent]^3`; end
    /// points add an offset uniform in `[-connector_offset, connector_offset]` per axis.
    pub fn with_rng<R: Rng + ?Sized>(count: usize, config: &FieldConfig, rng: &mut R) -> Self {
        let extent = config.connector_extent;
        let offset = config.connector_offset;

        let mut uniform = |half: f32| {
            if half <= 0.0 {
                0.0
            } else {
                rng.random_range(-half..=half)
            }
        };

        let segments = (0..count)
            .map(|_| {
                let a = Vec3::new(uniform(extent), uniform(extent), uniform(extent));
                let b = a + Vec3::new(uniform(offset), uniform(offset), uniform(offset));
                Connector { a, b }
            })
            .collect();

        ConnectorCloud { segments }
    }

    /// Cloud made of explicit segments
    #[must_use]
    pub fn from_segments(segments: Vec<Connector>) -> Self {
        ConnectorCloud { segments }
    }

    pub fn segments(&self) -> &[Connector] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
