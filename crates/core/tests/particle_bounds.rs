use particle_field_core::{BoundaryMode, FieldConfig, Particle, ParticleField, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_default_field_stays_within_one_step_of_bound() {
    let config = FieldConfig::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut field = ParticleField::with_rng(config.particle_count, &config, &mut rng);
    let limit = config.bound + config.max_velocity;

    for _ in 0..5_000 {
        field.step();
        for particle in field.particles() {
            assert!(
                particle.position().amax() <= limit + 1e-4,
                "particle escaped: {:?}",
                particle.position()
            );
        }
    }
    assert_eq!(field.steps(), 5_000);
    assert!(field.max_overshoot() <= config.max_velocity + 1e-4);
}

#[test]
fn test_overshoot_scenario() {
    let mut field = ParticleField::from_particles(
        vec![Particle::new(Vec3::new(5.05, 0.0, 0.0), Vec3::new(0.01, 0.0, 0.0))],
        5.0,
        BoundaryMode::Reflect,
    );

    field.step();
    let p = field.particles()[0];
    assert!((p.position().x - 5.06).abs() < 1e-5);
    assert!((p.velocity().x + 0.01).abs() < 1e-7);

    field.step();
    assert!((field.particles()[0].position().x - 5.05).abs() < 1e-5);
}

#[test]
fn test_reflection_just_past_bound() {
    let mut field = ParticleField::from_particles(
        vec![Particle::new(Vec3::new(5.0009, 0.0, 0.0), Vec3::new(0.002, 0.0, 0.0))],
        5.0,
        BoundaryMode::Reflect,
    );

    field.step();
    let after_first = field.particles()[0];
    assert!(after_first.velocity().x < 0.0);

    field.step();
    assert!(field.particles()[0].position().x < after_first.position().x);
}

#[test]
fn test_axes_reflect_independently() {
    let mut field = ParticleField::from_particles(
        vec![Particle::new(Vec3::new(4.999, 0.0, -4.999), Vec3::new(0.005, 0.003, -0.005))],
        5.0,
        BoundaryMode::Reflect,
    );
    field.step();
    let v = field.particles()[0].velocity();
    assert!(v.x < 0.0);
    assert!(v.y > 0.0);
    assert!(v.z > 0.0);
}

#[test]
fn test_clamped_mode_never_leaves_cube() {
    let config = FieldConfig {
        boundary: BoundaryMode::ClampReflect,
        max_velocity: 0.05,
        ..Default::default()
    };
    let mut field = ParticleField::with_rng(200, &config, &mut StdRng::seed_from_u64(99));
    for _ in 0..2_000 {
        field.step();
        assert_eq!(field.max_overshoot(), 0.0);
    }
}
