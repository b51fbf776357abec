use particle_field_core::{View, ViewConfig};
use std::ptr;
use std::sync::Mutex;
use tracing::info;

use crate::config::PfViewConfig;
use crate::error::{DefaultPfError, PfErrorCode};
use crate::helpers::{
    handle_ffi_result_error, instance_from_ptr, track_error, track_result, with_view_mut,
};
use crate::queries::PfPoint;

/// One mounted page: particle background, reveal sections and counters.
///
/// # Thread Safety
/// The view is guarded by a `Mutex`, so every function may be called from any
/// thread. Frames, layout events and queries are serialised; a frame holds the
/// lock for one O(N) step and render.
///
/// # Usage
/// ```c
/// PfViewConfig config = pf_view_config_default();
/// PfView* view = NULL;
/// if (pf_view_new(&config, &view) != Ok) {
///     fprintf(stderr, "%s\n", pf_get_last_error());
///     return;
/// }
/// pf_view_mount_surface(view, 1280, 800);
///
/// // every display refresh
/// PfFrameStatus status;
/// pf_view_frame(view, now_ms, &status);
///
/// pf_view_destroy(view);
/// ```
pub struct PfView {
    pub(crate) view: Mutex<View>,
    /// Cached copy of the last rendered points, reused across
    /// `pf_view_points` calls to avoid per-frame allocations.
    pub(crate) point_snapshot: Mutex<Vec<PfPoint>>,
}

impl PfView {
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the configuration fails validation.
    pub(crate) fn new(config: ViewConfig) -> Result<Self, DefaultPfError> {
        let capacity = config.field.particle_count;
        let view = View::new(config).map_err(|err| DefaultPfError::invalid_config(&err))?;
        Ok(Self {
            view: Mutex::new(view),
            point_snapshot: Mutex::new(Vec::with_capacity(capacity)),
        })
    }
}

/// Create a new view and return it via out-parameter.
///
/// Parameters
/// - `config`: configuration to use, or null for `pf_view_config_default()`.
/// - `out_view`: receives the created view; set to null on failure.
///
/// Returns
/// - `PfErrorCode::Ok` on success
/// - `PfErrorCode::NullPointer` if `out_view` is null
/// - `PfErrorCode::InvalidConfig` if the configuration fails validation
///
/// # Safety
/// - `config` must be null or point to a readable `PfViewConfig`.
/// - `out_view` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned view and MUST call `pf_view_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn pf_view_new(
    config: *const PfViewConfig,
    out_view: *mut *mut PfView,
) -> PfErrorCode {
    if out_view.is_null() {
        return track_error(&DefaultPfError::null_pointer("out_view"));
    }

    // SAFETY: a non-null config is readable per the caller contract
    let view_config = match unsafe { config.as_ref() } {
        Some(config) => ViewConfig::from(config),
        None => ViewConfig::default(),
    };

    match track_result(PfView::new(view_config)) {
        Ok(instance) => {
            unsafe {
                *out_view = Box::into_raw(Box::new(instance));
            }
            PfErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_view = ptr::null_mut();
            }
            code
        }
    }
}

/// Tear down the view: stop all frame work and freeze every style and counter.
///
/// The view stays readable until `pf_view_destroy`. Calling twice is a no-op.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `pf_view_new`.
#[no_mangle]
pub unsafe extern "C" fn pf_view_teardown(ptr: *const PfView) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_view_mut(instance, View::teardown)
    })
}

/// Destroy a view previously created by `pf_view_new`.
///
/// The view is torn down first. A null `ptr` is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `pf_view_new` and not destroyed already.
/// - The caller must not use the pointer after this call.
#[no_mangle]
pub unsafe extern "C" fn pf_view_destroy(ptr: *mut PfView) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `pf_view_new`, checked non-null above
    let instance = unsafe { Box::from_raw(ptr) };
    if let Ok(mut view) = instance.view.lock() {
        view.teardown();
    }
    info!("Destroyed FFI view");
}
