use clap::Parser;
use particle_field_core::animation::stagger;
use particle_field_core::{
    Animation, BoundaryMode, CounterId, CounterProps, FrameStatus, Millis, ObserveOptions,
    PeriodicTween, Rect, SectionId, SectionProps, Seconds, View, ViewConfig,
};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless particle field demo: scrolls a synthetic landing page and reports
/// reveals, counters and particle statistics
#[derive(Parser, Debug)]
#[command(name = "particle-field-demo")]
#[command(about = "Scripted scroll session over a particle field view", long_about = None)]
struct Args {
    /// JSON view configuration (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the default configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Override the particle count
    #[arg(short, long)]
    particles: Option<usize>,

    /// Clamp particles onto the bound when reflecting
    #[arg(long)]
    clamp: bool,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Display refresh rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Scroll distance per frame in pixels
    #[arg(short, long, default_value_t = 8.0)]
    scroll_speed: f32,

    /// Report every N frames
    #[arg(short, long, default_value_t = 60)]
    report_interval: u32,
}

struct Page {
    sections: Vec<(&'static str, SectionId)>,
    counters: Vec<(&'static str, CounterId)>,
    height: f32,
}

/// Lay out a landing page: hero, feature cards, impact metrics and a progress bar
fn build_page(view: &mut View, width: f32) -> Page {
    let mut sections = Vec::new();
    let mut counters = Vec::new();

    let hero = view.mount_section(
        Some(Rect::new(0.0, 0.0, width, 700.0)),
        SectionProps::section(Seconds::ZERO).with_class_name("hero"),
    );
    sections.push(("hero", hero));

    let card_width = (width - 160.0) / 3.0;
    for index in 0..6 {
        let column = index % 3;
        let row = index / 3;
        let bounds = Rect::new(
            80.0 + column as f32 * card_width,
            1000.0 + row as f32 * 320.0,
            card_width - 20.0,
            280.0,
        );
        let delay = stagger(Seconds::ZERO, Seconds::new(0.1), index);
        let id = view.mount_section(Some(bounds), SectionProps::card(delay));
        sections.push(("feature card", id));
    }

    let metrics = [
        ("faster onboarding", CounterProps::new(78.0).with_suffix("%")),
        ("fewer incidents", CounterProps::new(45.0).with_suffix("%")),
        ("throughput", CounterProps::new(3.2).with_suffix("x")),
        ("retention", CounterProps::new(89.0).with_suffix("%")),
    ];
    for (index, (label, props)) in metrics.into_iter().enumerate() {
        let bounds = Rect::new(80.0 + index as f32 * 280.0, 2000.0, 240.0, 120.0);
        counters.push((label, view.mount_counter(Some(bounds), props)));
    }

    let progress = view.mount_animation(
        Some(Rect::new(80.0, 2300.0, width - 160.0, 16.0)),
        Animation::progress_bar(85.0, Seconds::new(1.5), Seconds::new(0.2)),
        ObserveOptions::repeat(0.0),
        SectionProps::default().with_class_name("progress"),
    );
    sections.push(("progress bar", progress));

    view.mount_decoration(PeriodicTween::spin(Seconds::new(20.0)), Millis::ZERO);
    view.mount_decoration(PeriodicTween::pulse(Seconds::new(2.0)), Millis::ZERO);

    Page {
        sections,
        counters,
        height: 2800.0,
    }
}

fn load_config(args: &Args) -> Result<ViewConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => ViewConfig::default(),
    };
    if let Some(particles) = args.particles {
        config.field.particle_count = particles;
    }
    if args.clamp {
        config.field.boundary = BoundaryMode::ClampReflect;
    }
    Ok(config)
}

fn report(view: &View, page: &Page, frame: u32, scroll: f32) {
    let revealed = page
        .sections
        .iter()
        .filter(|(_, id)| {
            view.section_style(*id)
                .and_then(|style| style.opacity)
                .is_some_and(|opacity| opacity >= 0.99)
        })
        .count();
    let counters: Vec<String> = page
        .counters
        .iter()
        .filter_map(|(label, id)| view.counter_text(*id).map(|text| format!("{label}={text}")))
        .collect();
    let rendered = view.rendered_frame();
    let overshoot = view.field().map_or(0.0, |field| field.max_overshoot());

    println!(
        "frame {:>4} | scroll {:>6.0}px | points {:>3} lines {:>3} | overshoot {:.4} | revealed {}/{} | {}",
        frame,
        scroll,
        rendered.points().len(),
        rendered.lines().len() / 2,
        overshoot,
        revealed,
        page.sections.len(),
        counters.join(" ")
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&ViewConfig::default())?);
        return Ok(());
    }
    if !(args.fps.is_finite() && args.fps > 0.0) {
        return Err(format!("fps must be positive, got {}", args.fps).into());
    }

    let config = load_config(&args)?;
    let mut view = View::new(config)?;
    view.mount_surface(args.width, args.height);

    let width = args.width as f32;
    let height = args.height as f32;
    let page = build_page(&mut view, width);
    info!(
        "Page laid out: {} sections, {} counters, {:.0}px tall",
        page.sections.len(),
        page.counters.len(),
        page.height
    );

    println!("=== Particle Field Demo ===\n");
    let frame_ms = 1000.0 / args.fps;
    let max_scroll = (page.height - height).max(0.0);
    let mut scroll = 0.0;
    let mut status = FrameStatus::Continue;

    for frame in 0..args.frames {
        let now = Millis::new(f64::from(frame) * frame_ms);
        scroll = (frame as f32 * args.scroll_speed).min(max_scroll);
        view.set_viewport(Rect::new(0.0, scroll, width, height), now);
        status = view.frame(now);

        if args.report_interval > 0 && frame % args.report_interval == 0 {
            report(&view, &page, frame, scroll);
        }
    }

    println!();
    report(&view, &page, args.frames, scroll);
    view.teardown();
    println!("\nFinal status before teardown: {:?}", status);
    Ok(())
}
