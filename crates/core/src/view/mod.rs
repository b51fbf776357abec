//! Composition root for one mounted page
//!
//! A [`View`] owns everything the page needs at run time: the particle surface,
//! the viewport observer, the animation scheduler, mounted counters and looping
//! decorations, all driven by a single [`FrameScheduler`]. The host feeds it
//! three kinds of input:
//!
//! - layout: [`View::mount_section`], [`View::mount_counter`], [`View::set_element_bounds`]
//! - scrolling and resizing: [`View::set_viewport`], [`View::resize`]
//! - time: [`View::frame`], once per display refresh
//!
//! and reads back styles, counter text and the rendered particle frame.
//!
//! # Example
//!
//! ```
//! use particle_field_core::{CounterProps, Millis, Rect, View, ViewConfig};
//!
//! let mut view = View::new(ViewConfig::default()).unwrap();
//! view.mount_surface(1280, 800);
//! let stat = view.mount_counter(
//!     Some(Rect::new(0.0, 2000.0, 200.0, 80.0)),
//!     CounterProps::new(78.0).with_suffix("%"),
//! );
//!
//! view.set_viewport(Rect::new(0.0, 1500.0, 1280.0, 800.0), Millis::new(0.0));
//! view.frame(Millis::new(2000.0));
//! assert_eq!(view.counter_text(stat).as_deref(), Some("78%"));
//! ```

pub mod elements;

pub use elements::{CounterId, DecorationId, ElementId, SectionId, SectionProps, SectionVariant};

use crate::animation::{
    Animation, AnimationId, AnimationScheduler, PeriodicTween, PropertyState, TriggerMode,
};
use crate::config::{ConfigError, ViewConfig};
use crate::core_types::{Millis, Rect};
use crate::counter::{CounterProps, TweenedCounter};
use crate::frame::{CancellationToken, FrameScheduler, FrameStatus};
use crate::render::{Frame, ParticleSurface};
use crate::simulation::ParticleField;
use crate::visibility::{ObservationId, ObserveOptions, ViewportObserver};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

#[derive(Debug)]
struct MountedSection {
    observation: ObservationId,
    animation: AnimationId,
    props: SectionProps,
}

#[derive(Debug)]
struct MountedCounter {
    observation: ObservationId,
    counter: TweenedCounter,
}

/// One mounted page
#[derive(Debug)]
pub struct View {
    config: ViewConfig,
    scheduler: FrameScheduler,
    observer: ViewportObserver,
    surface: ParticleSurface,
    animations: AnimationScheduler,
    sections: FxHashMap<SectionId, MountedSection>,
    counters: FxHashMap<CounterId, MountedCounter>,
    decorations: FxHashMap<DecorationId, PeriodicTween>,
    next_id: u64,
    /// Latest host timestamp seen; queries sample at this instant
    now: Millis,
}

impl View {
    /// Validate `config` and build an empty view
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found by [`ViewConfig::validate`].
    pub fn new(config: ViewConfig) -> Result<View, ConfigError> {
        config.validate()?;
        info!(
            "Creating view: {} particles, {} connectors, boundary {:?}",
            config.field.particle_count, config.field.connector_count, config.field.boundary
        );
        Ok(View {
            surface: ParticleSurface::new(config.field.clone(), &config.render),
            config,
            scheduler: FrameScheduler::new(),
            observer: ViewportObserver::new(),
            animations: AnimationScheduler::new(),
            sections: FxHashMap::default(),
            counters: FxHashMap::default(),
            decorations: FxHashMap::default(),
            next_id: 0,
            now: Millis::ZERO,
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Handle that reports whether the view was torn down
    pub fn token(&self) -> CancellationToken {
        self.scheduler.token()
    }

    pub fn is_torn_down(&self) -> bool {
        self.scheduler.is_cancelled()
    }

    // ------------------------------------------------------------------
    // Particle surface
    // ------------------------------------------------------------------

    /// Size the background surface and seed the particle buffer
    pub fn mount_surface(&mut self, width: u32, height: u32) {
        if self.is_torn_down() {
            return;
        }
        self.surface.mount(width, height);
    }

    pub fn unmount_surface(&mut self) {
        self.surface.unmount();
    }

    /// Container resized
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.is_torn_down() {
            return;
        }
        self.surface.resize(width, height);
    }

    /// Rebuild the particle buffer with `count` particles
    pub fn set_particle_count(&mut self, count: usize) {
        if self.is_torn_down() {
            return;
        }
        self.config.field.particle_count = count;
        self.surface.set_particle_count(count);
    }

    // ------------------------------------------------------------------
    // Mounting
    // ------------------------------------------------------------------

    /// Mount a reveal wrapper; its style is driven by visibility from now on
    pub fn mount_section(&mut self, bounds: Option<Rect>, props: SectionProps) -> SectionId {
        let (animation, margin_px) = match props.variant {
            SectionVariant::Section => (
                Animation::section_reveal(props.delay),
                self.config.reveal.section_margin_px,
            ),
            SectionVariant::Card => (
                Animation::fade_in_card(props.delay),
                self.config.reveal.card_margin_px,
            ),
        };
        let options = ObserveOptions {
            once: self.config.reveal.once,
            margin_px,
        };
        self.mount_animation(bounds, animation, options, props)
    }

    /// Mount an element with a custom animation, such as a progress bar or a
    /// path drawing, replaying on every entry unless `options.once` is set
    pub fn mount_animation(
        &mut self,
        bounds: Option<Rect>,
        animation: Animation,
        options: ObserveOptions,
        props: SectionProps,
    ) -> SectionId {
        let id = SectionId(self.allocate_id());
        let mode = if options.once {
            TriggerMode::Once
        } else {
            TriggerMode::Repeat
        };
        let observation = self.observer.subscribe(bounds, options);
        let animation = self.animations.schedule(observation, animation, mode);
        debug!("Mounted {} ({:?}) as {}", id, props.variant, observation);
        self.sections.insert(
            id,
            MountedSection {
                observation,
                animation,
                props,
            },
        );
        self.settle_mount(observation);
        id
    }

    /// Mount a tweened counter; it starts the first time it becomes visible
    pub fn mount_counter(&mut self, bounds: Option<Rect>, props: CounterProps) -> CounterId {
        let id = CounterId(self.allocate_id());
        let observation = self
            .observer
            .subscribe(bounds, ObserveOptions::once(self.config.counter.margin_px));
        debug!("Mounted {} targeting {} as {}", id, props.value, observation);
        let mut counter = TweenedCounter::new(props);
        if self.is_torn_down() {
            counter.cancel();
        }
        self.counters.insert(
            id,
            MountedCounter {
                observation,
                counter,
            },
        );
        self.settle_mount(observation);
        id
    }

    /// Start a looping decoration at `now`
    pub fn mount_decoration(&mut self, mut tween: PeriodicTween, now: Millis) -> DecorationId {
        let id = DecorationId(self.allocate_id());
        if !self.is_torn_down() {
            tween.arm(now);
        }
        self.decorations.insert(id, tween);
        id
    }

    pub fn unmount_section(&mut self, id: SectionId) -> bool {
        let Some(section) = self.sections.remove(&id) else {
            return false;
        };
        self.observer.unsubscribe(section.observation);
        self.animations.remove(section.animation);
        true
    }

    pub fn unmount_counter(&mut self, id: CounterId) -> bool {
        let Some(mut mounted) = self.counters.remove(&id) else {
            return false;
        };
        mounted.counter.cancel();
        self.observer.unsubscribe(mounted.observation);
        true
    }

    pub fn unmount_decoration(&mut self, id: DecorationId) -> bool {
        self.decorations.remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Host events
    // ------------------------------------------------------------------

    /// Scroll or resize moved the viewport
    pub fn set_viewport(&mut self, viewport: Rect, now: Millis) {
        if self.is_torn_down() {
            return;
        }
        self.now = self.now.max(now);
        self.observer.set_viewport(viewport);
        self.route(now);
    }

    /// Layout moved an element; `None` means it is not laid out
    ///
    /// Returns `false` for unknown elements.
    pub fn set_element_bounds(
        &mut self,
        id: impl Into<ElementId>,
        bounds: Option<Rect>,
        now: Millis,
    ) -> bool {
        if self.is_torn_down() {
            return false;
        }
        let observation = match id.into() {
            ElementId::Section(id) => self.sections.get(&id).map(|s| s.observation),
            ElementId::Counter(id) => self.counters.get(&id).map(|c| c.observation),
        };
        let Some(observation) = observation else {
            return false;
        };
        self.now = self.now.max(now);
        self.observer.set_bounds(observation, bounds);
        self.route(now);
        true
    }

    /// Advance everything by one display frame
    ///
    /// Returns [`FrameStatus::Continue`] while anything still moves and
    /// [`FrameStatus::Cancelled`] once the view is torn down.
    pub fn frame(&mut self, now: Millis) -> FrameStatus {
        let Some(ctx) = self.scheduler.begin_frame(now) else {
            return FrameStatus::Cancelled;
        };
        self.now = self.now.max(now);

        let mut status = self.scheduler.dispatch(&ctx, &mut self.surface);
        status = status.merge(self.scheduler.dispatch(&ctx, &mut self.animations));
        for mounted in self.counters.values_mut() {
            status = status.merge(self.scheduler.dispatch(&ctx, &mut mounted.counter));
        }
        for tween in self.decorations.values_mut() {
            status = status.merge(self.scheduler.dispatch(&ctx, tween));
        }
        status
    }

    /// Stop every frame task and deregister all observations
    ///
    /// Styles and counter text stay readable, frozen where they were.
    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }
        info!(
            "Tearing down view: {} sections, {} counters, {} decorations",
            self.sections.len(),
            self.counters.len(),
            self.decorations.len()
        );
        self.scheduler.teardown();
        self.observer.disconnect();
        for mounted in self.counters.values_mut() {
            mounted.counter.cancel();
        }
        for tween in self.decorations.values_mut() {
            tween.cancel();
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Wrapper style of a mounted section at the latest timestamp
    pub fn section_style(&self, id: SectionId) -> Option<PropertyState> {
        let section = self.sections.get(&id)?;
        self.animations.sample(section.animation, self.now)
    }

    pub fn section_props(&self, id: SectionId) -> Option<&SectionProps> {
        self.sections.get(&id).map(|section| &section.props)
    }

    pub fn counter_text(&self, id: CounterId) -> Option<String> {
        self.counters.get(&id).map(|mounted| mounted.counter.text())
    }

    pub fn counter_value(&self, id: CounterId) -> Option<f64> {
        self.counters.get(&id).map(|mounted| mounted.counter.value())
    }

    pub fn decoration_style(&self, id: DecorationId) -> Option<PropertyState> {
        self.decorations.get(&id).map(|tween| tween.sample(self.now))
    }

    /// Particle frame produced by the last call to [`View::frame`]
    pub fn rendered_frame(&self) -> &Frame {
        self.surface.frame()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.surface.field()
    }

    pub fn surface(&self) -> &ParticleSurface {
        &self.surface
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// After teardown a new mount keeps its initial state and is never observed
    fn settle_mount(&mut self, observation: ObservationId) {
        if self.is_torn_down() {
            self.observer.unsubscribe(observation);
        } else {
            self.route(self.now);
        }
    }

    /// Forward queued visibility transitions to animations and counters
    fn route(&mut self, now: Millis) {
        if self.is_torn_down() {
            return;
        }
        for (observation, visible) in self.observer.drain_changes() {
            self.animations.on_visibility(observation, visible, now);
            if !visible {
                continue;
            }
            for (id, mounted) in &mut self.counters {
                if mounted.observation == observation && mounted.counter.start(now) {
                    debug!("{} entered the viewport", id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::core_types::Seconds;

    fn small_view() -> View {
        View::new(ViewConfig {
            field: FieldConfig {
                particle_count: 20,
                connector_count: 5,
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap()
    }

    fn viewport_at(scroll_y: f32) -> Rect {
        Rect::new(0.0, scroll_y, 1280.0, 800.0)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ViewConfig::default();
        config.field.bound = -1.0;
        assert!(View::new(config).is_err());
    }

    #[test]
    fn test_section_reveals_on_scroll() {
        let mut view = small_view();
        let section = view.mount_section(
            Some(Rect::new(0.0, 1200.0, 1280.0, 600.0)),
            SectionProps::section(Seconds::ZERO),
        );
        view.set_viewport(viewport_at(0.0), Millis::new(0.0));
        assert_eq!(view.section_style(section).unwrap().opacity, Some(0.0));

        view.set_viewport(viewport_at(600.0), Millis::new(1000.0));
        view.frame(Millis::new(2000.0));
        let style = view.section_style(section).unwrap();
        assert_eq!(style.opacity, Some(1.0));
        assert_eq!(style.y, Some(0.0));
    }

    #[test]
    fn test_counter_starts_when_visible() {
        let mut view = small_view();
        view.set_viewport(viewport_at(0.0), Millis::new(0.0));
        let counter = view.mount_counter(
            Some(Rect::new(0.0, 2000.0, 200.0, 80.0)),
            CounterProps::new(78.0).with_suffix("%"),
        );
        view.frame(Millis::new(500.0));
        assert_eq!(view.counter_text(counter).as_deref(), Some("0%"));

        view.set_viewport(viewport_at(1500.0), Millis::new(1000.0));
        view.frame(Millis::new(1500.0));
        assert_eq!(view.counter_value(counter), Some(45.0));
        view.frame(Millis::new(3000.0));
        assert_eq!(view.counter_text(counter).as_deref(), Some("78%"));
    }

    #[test]
    fn test_element_bounds_arriving_late() {
        let mut view = small_view();
        view.set_viewport(viewport_at(0.0), Millis::new(0.0));
        let counter = view.mount_counter(None, CounterProps::new(12.0));
        view.frame(Millis::new(100.0));
        assert_eq!(view.counter_value(counter), Some(0.0));

        let bounds = Rect::new(0.0, 100.0, 50.0, 50.0);
        assert!(view.set_element_bounds(counter, Some(bounds), Millis::new(200.0)));
        view.frame(Millis::new(2200.0));
        assert_eq!(view.counter_value(counter), Some(12.0));
    }

    #[test]
    fn test_frame_status_tracks_activity() {
        let mut view = small_view();
        assert_eq!(view.frame(Millis::new(0.0)), FrameStatus::Done);
        view.mount_surface(640, 480);
        assert_eq!(view.frame(Millis::new(16.0)), FrameStatus::Continue);
        assert_eq!(view.field().map(ParticleField::steps), Some(1));
    }

    #[test]
    fn test_decoration_loops() {
        let mut view = small_view();
        let spinner =
            view.mount_decoration(PeriodicTween::spin(Seconds::new(20.0)), Millis::new(0.0));
        view.frame(Millis::new(25_000.0));
        let rotate = view.decoration_style(spinner).unwrap().rotate.unwrap();
        assert!((rotate - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut view = small_view();
        view.mount_surface(640, 480);
        view.set_viewport(viewport_at(0.0), Millis::new(0.0));
        let counter = view.mount_counter(
            Some(Rect::new(0.0, 100.0, 50.0, 50.0)),
            CounterProps::new(78.0).with_suffix("%"),
        );
        view.frame(Millis::new(500.0));
        let steps = view.field().map(ParticleField::steps);

        view.teardown();
        assert!(view.is_torn_down());
        assert_eq!(view.frame(Millis::new(5000.0)), FrameStatus::Cancelled);
        assert_eq!(view.counter_text(counter).as_deref(), Some("45%"));
        assert_eq!(view.field().map(ParticleField::steps), steps);
    }

    #[test]
    fn test_mount_after_teardown_stays_inert() {
        let mut view = small_view();
        view.set_viewport(viewport_at(0.0), Millis::new(0.0));
        view.teardown();

        let visible = Rect::new(0.0, 100.0, 200.0, 80.0);
        let counter = view.mount_counter(Some(visible), CounterProps::new(78.0).with_suffix("%"));
        let section = view.mount_section(Some(visible), SectionProps::section(Seconds::ZERO));
        assert_eq!(view.frame(Millis::new(5000.0)), FrameStatus::Cancelled);
        view.set_viewport(viewport_at(50.0), Millis::new(6000.0));

        assert_eq!(view.counter_text(counter).as_deref(), Some("0%"));
        assert_eq!(view.section_style(section).unwrap().opacity, Some(0.0));
        assert!(view.observer.is_empty());
    }

    #[test]
    fn test_unmount_section() {
        let mut view = small_view();
        let id = view.mount_section(None, SectionProps::card(Seconds::new(0.1)));
        assert!(view.section_props(id).is_some());
        assert!(view.unmount_section(id));
        assert!(!view.unmount_section(id));
        assert!(view.section_style(id).is_none());
        assert!(!view.set_element_bounds(id, None, Millis::new(0.0)));
    }
}
