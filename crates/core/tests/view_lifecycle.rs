use particle_field_core::{
    CounterProps, FieldConfig, FrameStatus, Millis, PeriodicTween, Rect, Seconds, View,
    ViewConfig,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_unmounted_surface_renders_no_points() {
    let mut view = View::new(ViewConfig::default()).unwrap();
    view.frame(Millis::new(0.0));
    assert!(view.rendered_frame().points().is_empty());
    assert!(view.field().is_none());
}

#[test]
fn test_mounted_surface_renders_every_frame() {
    let mut view = View::new(ViewConfig::default()).unwrap();
    view.mount_surface(1920, 1080);

    for i in 0..60 {
        assert_eq!(view.frame(Millis::new(f64::from(i) * 16.67)), FrameStatus::Continue);
    }
    let frame = view.rendered_frame();
    assert_eq!(frame.size(), (1920, 1080));
    assert_eq!(frame.index(), 59);
    assert!(!frame.points().is_empty());
    assert!(frame.points().len() <= 400);
    assert!(!frame.lines().is_empty());
    assert_eq!(frame.point_bytes().len(), frame.points().len() * 16);
    for point in frame.points() {
        assert!((0.0..=1920.0).contains(&point.position[0]));
        assert!((0.0..=1080.0).contains(&point.position[1]));
    }
}

#[test]
fn test_particle_count_change_rebuilds() {
    let mut view = View::new(ViewConfig {
        field: FieldConfig {
            particle_count: 100,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap();
    view.mount_surface(800, 600);
    view.frame(Millis::new(0.0));
    view.set_particle_count(250);
    assert_eq!(view.field().map(|f| f.len()), Some(250));
    assert_eq!(view.config().field.particle_count, 250);
}

#[test]
fn test_teardown_freezes_everything() {
    let mut view = View::new(ViewConfig::default()).unwrap();
    view.mount_surface(800, 600);
    view.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0), Millis::new(0.0));
    let counter = view.mount_counter(
        Some(Rect::new(0.0, 200.0, 100.0, 40.0)),
        CounterProps::new(78.0).with_suffix("%"),
    );
    let spinner =
        view.mount_decoration(PeriodicTween::spin(Seconds::new(20.0)), Millis::new(0.0));
    let token = view.token();

    view.frame(Millis::new(1000.0));
    let text = view.counter_text(counter);
    let rendered = view.rendered_frame().index();

    view.teardown();
    assert!(token.is_cancelled());
    for t in [1016.0, 3000.0, 10_000.0] {
        assert_eq!(view.frame(Millis::new(t)), FrameStatus::Cancelled);
    }
    assert_eq!(view.counter_text(counter), text);
    assert_eq!(view.rendered_frame().index(), rendered);
    assert_eq!(view.decoration_style(spinner).unwrap().rotate, Some(0.0));

    // Events after teardown are ignored
    view.set_viewport(Rect::new(0.0, 5000.0, 800.0, 600.0), Millis::new(11_000.0));
    assert!(!view.set_element_bounds(counter, None, Millis::new(11_000.0)));
}

#[test]
fn test_views_are_independent() {
    let mut a = View::new(ViewConfig::default()).unwrap();
    let mut b = View::new(ViewConfig::default()).unwrap();
    a.mount_surface(100, 100);
    b.mount_surface(100, 100);
    a.teardown();
    assert_eq!(a.frame(Millis::new(0.0)), FrameStatus::Cancelled);
    assert_eq!(b.frame(Millis::new(0.0)), FrameStatus::Continue);
}

#[test]
fn test_view_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<View>();
}
