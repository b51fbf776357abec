//! Particle Field Core Library
//!
//! Real-time particle background and scroll-driven reveal orchestration for a
//! single page view. Hundreds of point masses drift inside a reflecting cube and
//! are projected into a 3D viewport every frame, while entrance animations and
//! numeric counters are gated on when their elements first scroll into view.
//!
//! ## Structure
//!
//! - Particle simulation with elastic boundary reflection and static connector segments
//! - Scene renderer producing screen-space vertex buffers for the host's rasterizer
//! - Viewport observer with once or repeatable visibility triggers
//! - Animation scheduler, looping decorations and ease-out-cubic counters
//! - Per-view frame scheduler with a cancellation token for clean teardown
//!
//! Everything is single-threaded and driven by the host: it reports layout and
//! scroll events, calls [`View::frame`] from its display callback and reads back
//! styles, counter text and the rendered frame.

// Core types and utilities
pub mod config;
pub mod core_types;

// Simulation and rendering
pub mod render;
pub mod simulation;

// Visibility-driven animation
pub mod animation;
pub mod counter;
pub mod visibility;

// Scheduling and composition
pub mod frame;
pub mod view;

// Re-export core types
pub use config::{ConfigError, CounterConfig, FieldConfig, RenderConfig, RevealConfig, ViewConfig};
pub use core_types::{Color, Degrees, Millis, Radians, Rect, Seconds, Vec3};

// Re-export simulation and rendering types
pub use render::{Frame, ParticleSurface, SceneRenderer};
pub use simulation::{BoundaryMode, ConnectorCloud, Particle, ParticleField};

// Re-export animation types
pub use animation::{Animation, Easing, PeriodicTween, PropertyState, Transition};
pub use counter::{CounterProps, TweenedCounter};
pub use visibility::{ObserveOptions, ViewportObserver};

// Re-export scheduling and view types
pub use frame::{CancellationToken, FrameScheduler, FrameStatus};
pub use view::{CounterId, DecorationId, SectionId, SectionProps, SectionVariant, View};
