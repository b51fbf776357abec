use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` - the code handed back to the caller
/// - `msg()` - the diagnostic message stored for `pf_get_last_error`
pub(crate) trait PfError {
    fn code(&self) -> PfErrorCode;

    fn msg(&self) -> &str;
}

/// Default implementation of `PfError` with one constructor per failure kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultPfError {
    code: PfErrorCode,
    msg: String,
}

impl DefaultPfError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_view"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: PfErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: PfErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: PfErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for a configuration rejected by validation.
    ///
    /// # Arguments
    /// * `reason` - The validation failure, usually a `ConfigError` rendered with `Display`
    pub fn invalid_config(reason: &impl std::fmt::Display) -> Self {
        Self {
            code: PfErrorCode::InvalidConfig,
            msg: format!("Invalid view configuration: {reason}"),
        }
    }

    /// Create error for a handle the view does not know.
    ///
    /// # Arguments
    /// * `kind` - What the handle should refer to (e.g., `"section"`, `"element"`)
    /// * `raw` - The handle value passed by the caller
    pub fn unknown_handle(kind: &str, raw: u64) -> Self {
        Self {
            code: PfErrorCode::UnknownHandle,
            msg: format!("No mounted {kind} with handle {raw}"),
        }
    }
}

impl PfError for DefaultPfError {
    fn code(&self) -> PfErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by particle field functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PfErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: the view mutex was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid parameter passed to function (non-finite rectangle, short buffer, ...).
    InvalidParameter = 3,

    /// The view configuration failed validation.
    InvalidConfig = 4,

    /// The section or counter handle is not mounted on this view.
    UnknownHandle = 5,
}

impl From<DefaultPfError> for PfErrorCode {
    fn from(error: DefaultPfError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The CString is kept here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, PfErrorCode)> = const { RefCell::new((None, PfErrorCode::Ok)) };
}

/// Read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, PfErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, PfErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if no error has occurred since the last successful call.
///
/// # Thread Safety
/// Error state is per-thread; each thread sees only its own failures.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// PfView* view = NULL;
/// PfErrorCode err = pf_view_new(&config, &view);
/// if (err != Ok) {
///     const char* error = pf_get_last_error();
///     if (error) {
///         fprintf(stderr, "View creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn pf_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code, `Ok` if the last call succeeded.
#[no_mangle]
pub extern "C" fn pf_get_last_error_code() -> PfErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
