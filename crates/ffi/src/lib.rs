//! C bindings for the particle field view
//!
//! A host creates one [`PfView`] per page with `pf_view_new`, reports layout and
//! scroll events, calls `pf_view_frame` from its display callback and reads back
//! section styles, counter text and projected particles. Every fallible function
//! returns a [`PfErrorCode`]; the message for the last failure on the calling
//! thread is available from `pf_get_last_error`.
//!
//! The header `ParticleFieldFFI.h` is generated by `build.rs` with cbindgen.

mod config;
mod error;
mod helpers;
mod instance;
mod queries;
mod view;

pub use config::{pf_view_config_default, PfBoundaryMode, PfViewConfig};
pub use error::{pf_get_last_error, pf_get_last_error_code, PfErrorCode};
pub use instance::{pf_view_destroy, pf_view_new, pf_view_teardown, PfView};
pub use queries::{
    pf_view_counter_text, pf_view_point_count, pf_view_points, pf_view_section_style, PfPoint,
    PfStyle, PF_STYLE_OPACITY, PF_STYLE_ROTATE, PF_STYLE_SCALE, PF_STYLE_X, PF_STYLE_Y,
};
pub use view::{
    pf_view_frame, pf_view_mount_counter, pf_view_mount_section, pf_view_mount_surface,
    pf_view_resize, pf_view_set_element_bounds, pf_view_set_viewport, PfFrameStatus, PfRect,
    PfSectionVariant,
};
