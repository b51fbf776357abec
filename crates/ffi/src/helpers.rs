use crate::error::{with_last_error_mut, DefaultPfError, PfError, PfErrorCode};
use crate::instance::PfView;
use particle_field_core::View;
use std::ffi::CString;
use std::sync::MutexGuard;
use tracing::warn;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl PfError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl PfError) -> PfErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = PfErrorCode::Ok;
    });
}

/// Record the error of a failed result, or clear the last error on success.
pub(crate) fn track_result<T>(result: Result<T, DefaultPfError>) -> Result<T, PfErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run `f` and collapse its outcome into an error code.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> PfErrorCode
where
    F: FnOnce() -> Result<(), DefaultPfError>,
{
    match track_result(f()) {
        Ok(()) => PfErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow the view behind a caller pointer.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `pf_view_new`.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const PfView,
) -> Result<&'a PfView, DefaultPfError> {
    // SAFETY: non-null pointers come from `Box::into_raw` in `pf_view_new`
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultPfError::null_pointer("view"))
}

fn lock_view(instance: &PfView) -> Result<MutexGuard<'_, View>, DefaultPfError> {
    instance.view.lock().map_err(|_| {
        warn!("View mutex poisoned");
        DefaultPfError::lock_poisoned("Mutex<View>")
    })
}

/// Run `f` with shared access to the view.
pub(crate) fn with_view<F, T>(instance: &PfView, f: F) -> Result<T, DefaultPfError>
where
    F: FnOnce(&View) -> T,
{
    let view = lock_view(instance)?;
    Ok(f(&view))
}

/// Run `f` with exclusive access to the view.
pub(crate) fn with_view_mut<F, T>(instance: &PfView, f: F) -> Result<T, DefaultPfError>
where
    F: FnOnce(&mut View) -> T,
{
    let mut view = lock_view(instance)?;
    Ok(f(&mut view))
}

/// Write `value` through `out`, failing on null.
///
/// # Safety
/// `out` must be null or valid for writes of `T`.
pub(crate) unsafe fn write_out<T>(
    out: *mut T,
    name: &str,
    value: T,
) -> Result<(), DefaultPfError> {
    if out.is_null() {
        return Err(DefaultPfError::null_pointer(name));
    }
    // SAFETY: checked non-null above, validity is the caller's contract
    unsafe {
        out.write(value);
    }
    Ok(())
}
