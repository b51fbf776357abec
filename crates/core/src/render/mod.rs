//! Scene rendering for the particle background
//!
//! The renderer never touches the simulation; it reads the particle buffer after
//! each step and emits screen-space vertices for the host's rasterizer.

pub mod camera;
pub mod material;
pub mod scene;
pub mod surface;

pub use camera::{Camera, Projected};
pub use material::{BlendMode, LineMaterial, PointMaterial};
pub use scene::{CloudRotation, Frame, LineVertex, PointVertex, SceneRenderer};
pub use surface::ParticleSurface;
