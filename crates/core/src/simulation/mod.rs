//! Particle field simulation
//!
//! `ParticleField` owns the moving points; `ConnectorCloud` owns the static
//! decoration drawn alongside them. Neither knows about rendering or time.

pub mod connectors;
pub mod particles;

pub use connectors::{Connector, ConnectorCloud};
pub use particles::{BoundaryMode, Particle, ParticleField};
