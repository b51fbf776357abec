//! Vector type alias for 3D positions and directions.

use nalgebra::Vector3;

/// 3D vector type for positions, velocities, and segment endpoints.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used throughout
/// the particle field for world positions, per-frame displacements and
/// connector endpoints.
pub type Vec3 = Vector3<f32>;
