use particle_field_core::{
    CounterId, CounterProps, FrameStatus, Millis, Rect, SectionId, SectionProps, Seconds, View,
};
use std::ffi::CStr;
use std::os::raw::c_char;

use crate::error::{DefaultPfError, PfErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, with_view_mut, write_out};
use crate::instance::PfView;

/// Axis-aligned rectangle in page pixels, origin top-left.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PfRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

fn to_rect(rect: PfRect) -> Result<Rect, DefaultPfError> {
    let rect = Rect::new(rect.x, rect.y, rect.width, rect.height);
    if rect.is_degenerate() {
        return Err(DefaultPfError::invalid_parameter(format!(
            "Rectangle must be finite with non-negative extent, got {rect:?}"
        )));
    }
    Ok(rect)
}

/// Entrance style of a section.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PfSectionVariant {
    /// Fade in and rise.
    Section = 0,
    /// Fade in, rise and grow.
    Card = 1,
}

/// Outcome of one frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PfFrameStatus {
    /// Nothing is moving; the host may stop requesting frames.
    Done = 0,
    /// Request another frame.
    Continue = 1,
    /// The view was torn down.
    Cancelled = 2,
}

impl From<FrameStatus> for PfFrameStatus {
    fn from(status: FrameStatus) -> Self {
        match status {
            FrameStatus::Done => PfFrameStatus::Done,
            FrameStatus::Continue => PfFrameStatus::Continue,
            FrameStatus::Cancelled => PfFrameStatus::Cancelled,
        }
    }
}

/// # Safety
/// `rect` must be null or point to a readable `PfRect`.
unsafe fn optional_rect(rect: *const PfRect) -> Result<Option<Rect>, DefaultPfError> {
    // SAFETY: readability is the caller's contract
    match unsafe { rect.as_ref() } {
        Some(rect) => to_rect(*rect).map(Some),
        None => Ok(None),
    }
}

/// # Safety
/// `text` must be null or a valid NUL-terminated string.
unsafe fn optional_str(text: *const c_char, name: &str) -> Result<String, DefaultPfError> {
    if text.is_null() {
        return Ok(String::new());
    }
    // SAFETY: non-null strings are NUL-terminated per the caller contract
    let text = unsafe { CStr::from_ptr(text) };
    text.to_str().map(str::to_owned).map_err(|_| {
        DefaultPfError::invalid_parameter(format!("Parameter '{name}' is not valid UTF-8"))
    })
}

fn timestamp(now_ms: f64) -> Result<Millis, DefaultPfError> {
    if now_ms.is_finite() {
        Ok(Millis::new(now_ms))
    } else {
        Err(DefaultPfError::invalid_parameter(format!(
            "Timestamp must be finite, got {now_ms}"
        )))
    }
}

/// Size the background surface and seed the particle buffer.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `pf_view_new`.
#[no_mangle]
pub unsafe extern "C" fn pf_view_mount_surface(
    ptr: *const PfView,
    width: u32,
    height: u32,
) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_view_mut(instance, |view| view.mount_surface(width, height))
    })
}

/// Resize the background surface; the particle buffer is kept.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `pf_view_new`.
#[no_mangle]
pub unsafe extern "C" fn pf_view_resize(ptr: *const PfView, width: u32, height: u32) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_view_mut(instance, |view| view.resize(width, height))
    })
}

/// Report the visible part of the page after a scroll or resize.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `pf_view_new`.
/// - `viewport` must be null or point to a readable `PfRect`.
#[no_mangle]
pub unsafe extern "C" fn pf_view_set_viewport(
    ptr: *const PfView,
    viewport: *const PfRect,
    now_ms: f64,
) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let viewport = unsafe { optional_rect(viewport) }?
            .ok_or_else(|| DefaultPfError::null_pointer("viewport"))?;
        let now = timestamp(now_ms)?;
        with_view_mut(instance, |view| view.set_viewport(viewport, now))
    })
}

/// Mount a reveal section and return its handle.
///
/// Parameters
/// - `bounds`: element bounds, or null if the element is not laid out yet.
/// - `delay_s`: wait after the element becomes visible, in seconds.
/// - `class_name`: passed through untouched; may be null.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `pf_view_new`.
/// - `bounds` must be null or point to a readable `PfRect`.
/// - `class_name` must be null or a valid NUL-terminated string.
/// - `out_handle` must be a valid pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn pf_view_mount_section(
    ptr: *const PfView,
    bounds: *const PfRect,
    delay_s: f32,
    variant: PfSectionVariant,
    class_name: *const c_char,
    out_handle: *mut u64,
) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if out_handle.is_null() {
            return Err(DefaultPfError::null_pointer("out_handle"));
        }
        if !(delay_s.is_finite() && delay_s >= 0.0) {
            return Err(DefaultPfError::invalid_parameter(format!(
                "Section delay must be finite and non-negative, got {delay_s}"
            )));
        }
        let bounds = unsafe { optional_rect(bounds) }?;
        let class_name = unsafe { optional_str(class_name, "class_name") }?;
        let props = match variant {
            PfSectionVariant::Section => SectionProps::section(Seconds::new(delay_s)),
            PfSectionVariant::Card => SectionProps::card(Seconds::new(delay_s)),
        }
        .with_class_name(class_name);

        let id = with_view_mut(instance, |view| view.mount_section(bounds, props))?;
        unsafe { write_out(out_handle, "out_handle", id.raw()) }
    })
}

/// Mount a tweened counter and return its handle.
///
/// The counter counts from 0 to `value` over `duration_s` seconds the first time
/// its element becomes visible; its text is `prefix + value + suffix`.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `pf_view_new`.
/// - `bounds` must be null or point to a readable `PfRect`.
/// - `prefix` and `suffix` must be null or valid NUL-terminated strings.
/// - `out_handle` must be a valid pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn pf_view_mount_counter(
    ptr: *const PfView,
    bounds: *const PfRect,
    value: f64,
    prefix: *const c_char,
    suffix: *const c_char,
    duration_s: f32,
    out_handle: *mut u64,
) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if out_handle.is_null() {
            return Err(DefaultPfError::null_pointer("out_handle"));
        }
        if !value.is_finite() {
            return Err(DefaultPfError::invalid_parameter(format!(
                "Counter value must be finite, got {value}"
            )));
        }
        if !(duration_s.is_finite() && duration_s >= 0.0) {
            return Err(DefaultPfError::invalid_parameter(format!(
                "Counter duration must be finite and non-negative, got {duration_s}"
            )));
        }
        let bounds = unsafe { optional_rect(bounds) }?;
        let props = CounterProps::new(value)
            .with_prefix(unsafe { optional_str(prefix, "prefix") }?)
            .with_suffix(unsafe { optional_str(suffix, "suffix") }?)
            .with_duration(Seconds::new(duration_s));

        let id = with_view_mut(instance, |view| view.mount_counter(bounds, props))?;
        unsafe { write_out(out_handle, "out_handle", id.raw()) }
    })
}

fn apply_bounds(
    view: &mut View,
    handle: u64,
    bounds: Option<Rect>,
    now: Millis,
) -> Result<(), DefaultPfError> {
    if view.is_torn_down() {
        return Ok(());
    }
    let section = SectionId::from_raw(handle);
    let counter = CounterId::from_raw(handle);
    let known = if view.section_props(section).is_some() {
        view.set_element_bounds(section, bounds, now)
    } else {
        view.set_element_bounds(counter, bounds, now)
    };
    if known {
        Ok(())
    } else {
        Err(DefaultPfError::unknown_handle("element", handle))
    }
}

/// Report new bounds for a mounted section or counter.
///
/// A null `bounds` marks the element as not laid out. Ignored after teardown.
///
/// Returns `PfErrorCode::UnknownHandle` if `handle` is neither a section nor a counter.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `pf_view_new`.
/// - `bounds` must be null or point to a readable `PfRect`.
#[no_mangle]
pub unsafe extern "C" fn pf_view_set_element_bounds(
    ptr: *const PfView,
    handle: u64,
    bounds: *const PfRect,
    now_ms: f64,
) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let bounds = unsafe { optional_rect(bounds) }?;
        let now = timestamp(now_ms)?;
        with_view_mut(instance, |view| apply_bounds(view, handle, bounds, now))?
    })
}

/// Advance the view by one display frame at host time `now_ms`.
///
/// Steps the particles, renders, and advances reveals, counters and decorations.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `pf_view_new`.
/// - `out_status` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn pf_view_frame(
    ptr: *const PfView,
    now_ms: f64,
    out_status: *mut PfFrameStatus,
) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let now = timestamp(now_ms)?;
        let status = with_view_mut(instance, |view| view.frame(now))?;
        if !out_status.is_null() {
            unsafe { write_out(out_status, "out_status", status.into()) }?;
        }
        Ok(())
    })
}
