//! Drifting point masses inside a reflecting cube
//!
//! Every particle moves by its velocity once per rendered frame. Velocities are
//! already expressed as per-frame displacement, so a frame is one implicit unit
//! step regardless of how much wall-clock time elapsed.
//!
//! # Boundary Handling
//!
//! With [`BoundaryMode::Reflect`] (the default) a particle whose coordinate ends a
//! step beyond the bound has that velocity component negated, and nothing else.
//! The particle is not pushed back inside, so it may sit outside the cube by up
//! to one step's displacement before travelling back:
//!
//! ```text
//! x = 5.05, vx = +0.01  --step-->  x = 5.06, vx = -0.01
//!                       --step-->  x = 5.05
//! ```
//!
//! [`BoundaryMode::ClampReflect`] clamps the coordinate onto the bound before
//! reflecting, for callers that need positions strictly inside the cube.

use crate::config::FieldConfig;
use crate::core_types::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a particle that crossed the bound is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryMode {
    /// Negate the velocity component only; overshoot of one step is possible
    #[default]
    Reflect,
    /// Clamp the coordinate onto the bound, then negate the velocity component
    ClampReflect,
}

/// A single simulated point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
}

impl Particle {
    /// Create a particle at `position` moving `velocity` per frame
    #[must_use]
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Particle { position, velocity }
    }

    /// Current position (world units)
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Per-frame displacement
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Advance one frame and reflect at `bound`.
    ///
    /// Axes are handled independently: a particle leaving through a corner
    /// reflects on every axis it crossed.
    #[inline]
    fn step(&mut self, bound: f32, mode: BoundaryMode) {
        self.position += self.velocity;

        for axis in 0..3 {
            let coord = self.position[axis];
            if coord.abs() > bound {
                if mode == BoundaryMode::ClampReflect {
                    self.position[axis] = coord.clamp(-bound, bound);
                }
                self.velocity[axis] = -self.velocity[axis];
            }
        }
    }
}

/// Fixed-size particle set stepped once per frame
///
/// The buffer is allocated once. Stepping mutates it in place; changing the
/// particle count goes through [`ParticleField::rebuild`], which replaces it.
///
/// # Example
///
/// ```
/// use particle_field_core::{BoundaryMode, Particle, ParticleField, Vec3};
///
/// let mut field = ParticleField::from_particles(
///     vec![Particle::new(Vec3::new(5.05, 0.0, 0.0), Vec3::new(0.01, 0.0, 0.0))],
///     5.0,
///     BoundaryMode::Reflect,
/// );
///
/// field.step();
/// assert!((field.particles()[0].position().x - 5.06).abs() < 1e-5);
/// assert!(field.particles()[0].velocity().x < 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bound: f32,
    mode: BoundaryMode,
    steps: u64,
}

impl ParticleField {
    /// Create `count` particles seeded from the thread-local RNG
    #[must_use]
    pub fn new(count: usize, config: &FieldConfig) -> Self {
        let mut rng = rand::rng();
        Self::with_rng(count, config, &mut rng)
    }

    /// Create `count` particles from a caller-supplied RNG
    ///
    /// Positions are uniform in `[-spawn_extent, spawn_extent]` per axis and
    /// velocity components uniform in `[-max_velocity, max_velocity]`.
    pub fn with_rng<R: Rng + ?Sized>(count: usize, config: &FieldConfig, rng: &mut R) -> Self {
        let extent = config.spawn_extent;
        let speed = config.max_velocity;

        let particles = (0..count)
            .map(|_| {
                let position = Vec3::new(
                    sample_symmetric(rng, extent),
                    sample_symmetric(rng, extent),
                    sample_symmetric(rng, extent),
                );
                let velocity = Vec3::new(
                    sample_symmetric(rng, speed),
                    sample_symmetric(rng, speed),
                    sample_symmetric(rng, speed),
                );
                Particle::new(position, velocity)
            })
            .collect();

        ParticleField {
            particles,
            bound: config.bound,
            mode: config.boundary,
            steps: 0,
        }
    }

    /// Wrap an explicit particle list
    #[must_use]
    pub fn from_particles(particles: Vec<Particle>, bound: f32, mode: BoundaryMode) -> Self {
        ParticleField {
            particles,
            bound,
            mode,
            steps: 0,
        }
    }

    /// Advance every particle by one frame
    pub fn step(&mut self) {
        let bound = self.bound;
        let mode = self.mode;
        for particle in &mut self.particles {
            particle.step(bound, mode);
        }
        self.steps += 1;
    }

    /// Replace the buffer with `count` freshly seeded particles
    pub fn rebuild(&mut self, count: usize, config: &FieldConfig) {
        debug!(
            "Rebuilding particle field: {} -> {} particles",
            self.particles.len(),
            count
        );
        *self = Self::new(count, config);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Half-width of the reflecting cube
    pub fn bound(&self) -> f32 {
        self.bound
    }

    pub fn boundary_mode(&self) -> BoundaryMode {
        self.mode
    }

    /// Number of steps taken since creation or the last rebuild
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Largest distance any coordinate currently sits outside the bound
    ///
    /// Zero when every particle is inside the cube.
    pub fn max_overshoot(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| p.position.amax() - self.bound)
            .fold(0.0_f32, f32::max)
    }
}

/// Uniform sample in `[-half_width, half_width]`
fn sample_symmetric<R: Rng + ?Sized>(rng: &mut R, half_width: f32) -> f32 {
    if half_width <= 0.0 {
        return 0.0;
    }
    rng.random_range(-half_width..=half_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single(position: Vec3, velocity: Vec3, mode: BoundaryMode) -> ParticleField {
        ParticleField::from_particles(vec![Particle::new(position, velocity)], 5.0, mode)
    }

    #[test]
    fn test_seeded_field_within_spawn_cube() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::with_rng(500, &config, &mut rng);

        assert_eq!(field.len(), 500);
        for p in field.particles() {
            assert!(p.position().amax() <= config.spawn_extent);
            assert!(p.velocity().amax() <= config.max_velocity);
        }
    }

    #[test]
    fn test_reflection_flips_only_crossing_axis() {
        let mut field = single(
            Vec3::new(4.995, 0.0, -1.0),
            Vec3::new(0.01, 0.004, -0.002),
            BoundaryMode::Reflect,
        );
        field.step();

        let p = field.particles()[0];
        assert_relative_eq!(p.position().x, 5.005, epsilon = 1e-5);
        assert_relative_eq!(p.velocity().x, -0.01);
        assert_relative_eq!(p.velocity().y, 0.004);
        assert_relative_eq!(p.velocity().z, -0.002);
    }

    #[test]
    fn test_reflection_near_bound() {
        let mut field = single(
            Vec3::new(5.0009, 0.0, 0.0),
            Vec3::new(0.002, 0.0, 0.0),
            BoundaryMode::Reflect,
        );

        field.step();
        let after_first = field.particles()[0];
        assert!(after_first.velocity().x < 0.0);

        field.step();
        assert!(field.particles()[0].position().x < after_first.position().x);
    }

    #[test]
    fn test_clamped_reflection_near_bound() {
        let mut field = single(
            Vec3::new(5.0009, 0.0, 0.0),
            Vec3::new(0.002, 0.0, 0.0),
            BoundaryMode::ClampReflect,
        );

        field.step();
        let p = field.particles()[0];
        assert!(p.velocity().x < 0.0);
        assert!(p.position().x < 5.0009);
    }

    #[test]
    fn test_overshoot_is_preserved_without_clamp() {
        let mut field = single(
            Vec3::new(5.05, 0.0, 0.0),
            Vec3::new(0.01, 0.0, 0.0),
            BoundaryMode::Reflect,
        );

        field.step();
        let p = field.particles()[0];
        assert_relative_eq!(p.position().x, 5.06, epsilon = 1e-5);
        assert_relative_eq!(p.velocity().x, -0.01);

        field.step();
        assert_relative_eq!(field.particles()[0].position().x, 5.05, epsilon = 1e-5);
        assert_eq!(field.steps(), 2);
    }

    #[test]
    fn test_clamp_reflect_stays_on_bound() {
        let mut field = single(
            Vec3::new(4.995, -4.999, 0.0),
            Vec3::new(0.01, -0.01, 0.0),
            BoundaryMode::ClampReflect,
        );
        field.step();

        let p = field.particles()[0];
        assert_eq!(p.position().x, 5.0);
        assert_eq!(p.position().y, -5.0);
        assert!(p.velocity().x < 0.0);
        assert!(p.velocity().y > 0.0);
        assert_eq!(field.max_overshoot(), 0.0);
    }

    #[test]
    fn test_rebuild_replaces_buffer() {
        let config = FieldConfig::default();
        let mut field = ParticleField::new(400, &config);
        field.step();
        field.rebuild(120, &config);

        assert_eq!(field.len(), 120);
        assert_eq!(field.steps(), 0);
    }

    #[test]
    fn test_zero_speed_config_yields_static_particles() {
        let config = FieldConfig {
            max_velocity: 0.0,
            ..Default::default()
        };
        let mut field = ParticleField::new(10, &config);
        let before: Vec<Vec3> = field.particles().iter().map(Particle::position).collect();
        field.step();
        let after: Vec<Vec3> = field.particles().iter().map(Particle::position).collect();
        assert_eq!(before, after);
    }
}
