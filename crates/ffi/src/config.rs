use particle_field_core::{BoundaryMode, ViewConfig};

/// Boundary behaviour of the particle cube.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PfBoundaryMode {
    /// Negate the velocity only; particles may overshoot by one step.
    Reflect = 0,
    /// Clamp onto the bound, then negate the velocity.
    ClampReflect = 1,
}

impl From<PfBoundaryMode> for BoundaryMode {
    fn from(mode: PfBoundaryMode) -> Self {
        match mode {
            PfBoundaryMode::Reflect => BoundaryMode::Reflect,
            PfBoundaryMode::ClampReflect => BoundaryMode::ClampReflect,
        }
    }
}

impl From<BoundaryMode> for PfBoundaryMode {
    fn from(mode: BoundaryMode) -> Self {
        match mode {
            BoundaryMode::Reflect => PfBoundaryMode::Reflect,
            BoundaryMode::ClampReflect => PfBoundaryMode::ClampReflect,
        }
    }
}

/// The subset of the view configuration exposed to C callers.
///
/// Start from `pf_view_config_default()` and override what you need; camera,
/// material and rotation settings keep their defaults.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PfViewConfig {
    pub particle_count: usize,
    pub connector_count: usize,
    /// Half-width of the reflecting cube.
    pub bound: f32,
    /// Maximum velocity component at spawn, world units per frame.
    pub max_velocity: f32,
    pub boundary: PfBoundaryMode,
    /// Viewport margin for section reveals in pixels.
    pub section_margin_px: f32,
    /// Viewport margin for card reveals in pixels.
    pub card_margin_px: f32,
    /// Reveal sections once per mount instead of on every entry.
    pub reveal_once: bool,
    /// Viewport margin for counters in pixels.
    pub counter_margin_px: f32,
}

impl From<&ViewConfig> for PfViewConfig {
    fn from(config: &ViewConfig) -> Self {
        Self {
            particle_count: config.field.particle_count,
            connector_count: config.field.connector_count,
            bound: config.field.bound,
            max_velocity: config.field.max_velocity,
            boundary: config.field.boundary.into(),
            section_margin_px: config.reveal.section_margin_px,
            card_margin_px: config.reveal.card_margin_px,
            reveal_once: config.reveal.once,
            counter_margin_px: config.counter.margin_px,
        }
    }
}

impl From<&PfViewConfig> for ViewConfig {
    fn from(config: &PfViewConfig) -> Self {
        let mut view_config = ViewConfig::default();
        view_config.field.particle_count = config.particle_count;
        view_config.field.connector_count = config.connector_count;
        view_config.field.bound = config.bound;
        view_config.field.spawn_extent = config.bound;
        view_config.field.max_velocity = config.max_velocity;
        view_config.field.boundary = config.boundary.into();
        view_config.reveal.section_margin_px = config.section_margin_px;
        view_config.reveal.card_margin_px = config.card_margin_px;
        view_config.reveal.once = config.reveal_once;
        view_config.counter.margin_px = config.counter_margin_px;
        view_config
    }
}

/// Default configuration: 400 particles and 80 connectors in a ±5 cube.
#[no_mangle]
pub extern "C" fn pf_view_config_default() -> PfViewConfig {
    PfViewConfig::from(&ViewConfig::default())
}
