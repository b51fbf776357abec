use particle_field_core::animation::PropertyState;
use particle_field_core::render::PointVertex;
use particle_field_core::{CounterId, SectionId};
use std::os::raw::c_char;
use std::ptr;

use crate::error::{DefaultPfError, PfErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, with_view, write_out};
use crate::instance::PfView;

/// `PfStyle::set_mask` bit for `opacity`.
pub const PF_STYLE_OPACITY: u32 = 1 << 0;
/// `PfStyle::set_mask` bit for `x`.
pub const PF_STYLE_X: u32 = 1 << 1;
/// `PfStyle::set_mask` bit for `y`.
pub const PF_STYLE_Y: u32 = 1 << 2;
/// `PfStyle::set_mask` bit for `scale`.
pub const PF_STYLE_SCALE: u32 = 1 << 3;
/// `PfStyle::set_mask` bit for `rotate`.
pub const PF_STYLE_ROTATE: u32 = 1 << 4;

/// Wrapper style of a section. Fields whose bit is clear in `set_mask` are
/// left to the host's stylesheet and read as zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PfStyle {
    pub set_mask: u32,
    pub opacity: f32,
    /// Horizontal offset in pixels.
    pub x: f32,
    /// Vertical offset in pixels.
    pub y: f32,
    pub scale: f32,
    /// Rotation in degrees.
    pub rotate: f32,
}

impl From<&PropertyState> for PfStyle {
    fn from(state: &PropertyState) -> Self {
        let mut style = PfStyle::default();
        let fields = [
            (state.opacity, PF_STYLE_OPACITY, &mut style.opacity),
            (state.x, PF_STYLE_X, &mut style.x),
            (state.y, PF_STYLE_Y, &mut style.y),
            (state.scale, PF_STYLE_SCALE, &mut style.scale),
            (state.rotate, PF_STYLE_ROTATE, &mut style.rotate),
        ];
        let mut mask = 0;
        for (value, bit, slot) in fields {
            if let Some(value) = value {
                *slot = value;
                mask |= bit;
            }
        }
        style.set_mask = mask;
        style
    }
}

/// FFI-friendly projected particle. Keep this layout stable for C consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PfPoint {
    /// Screen position in pixels, origin top-left.
    pub x: f32,
    pub y: f32,
    /// Distance in front of the camera in world units (clip-space w).
    pub depth: f32,
    /// Sprite diameter in pixels.
    pub size: f32,
}

impl From<&PointVertex> for PfPoint {
    fn from(vertex: &PointVertex) -> Self {
        Self {
            x: vertex.position[0],
            y: vertex.position[1],
            depth: vertex.depth,
            size: vertex.size,
        }
    }
}

/// Wrapper style of a section at the latest host timestamp.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `pf_view_new`.
/// - `out_style` must be a valid pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn pf_view_section_style(
    ptr: *const PfView,
    handle: u64,
    out_style: *mut PfStyle,
) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let style = with_view(instance, |view| {
            view.section_style(SectionId::from_raw(handle))
                .map(|state| PfStyle::from(&state))
        })?
        .ok_or_else(|| DefaultPfError::unknown_handle("section", handle))?;
        unsafe { write_out(out_style, "out_style", style) }
    })
}

/// Copy a counter's display text, NUL-terminated, into `buf`.
///
/// `out_len` always receives the buffer size required, including the NUL. If
/// `buf_len` is too small nothing is copied and `InvalidParameter` is returned,
/// so callers can retry with a larger buffer.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `pf_view_new`.
/// - `buf` must be null or valid for writes of `buf_len` bytes.
/// - `out_len` must be a valid pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn pf_view_counter_text(
    ptr: *const PfView,
    handle: u64,
    buf: *mut c_char,
    buf_len: usize,
    out_len: *mut usize,
) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let text = with_view(instance, |view| view.counter_text(CounterId::from_raw(handle)))?
            .ok_or_else(|| DefaultPfError::unknown_handle("counter", handle))?;
        let required = text.len() + 1;
        unsafe { write_out(out_len, "out_len", required) }?;

        if buf.is_null() {
            return Err(DefaultPfError::null_pointer("buf"));
        }
        if buf_len < required {
            return Err(DefaultPfError::invalid_parameter(format!(
                "Buffer of {buf_len} bytes is too small, {required} required"
            )));
        }
        // SAFETY: buf holds at least `required` bytes per the check above
        unsafe {
            ptr::copy_nonoverlapping(text.as_ptr().cast::<c_char>(), buf, text.len());
            buf.add(text.len()).write(0);
        }
        Ok(())
    })
}

/// Number of points in the last rendered frame.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `pf_view_new`.
/// - `out_count` must be a valid pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn pf_view_point_count(
    ptr: *const PfView,
    out_count: *mut usize,
) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let count = with_view(instance, |view| view.rendered_frame().points().len())?;
        unsafe { write_out(out_count, "out_count", count) }
    })
}

/// Return a borrowed pointer to the points of the last rendered frame.
///
/// The array is an internal snapshot reused across calls. It stays valid
/// until the next call to this function or `pf_view_destroy`.
/// **DO NOT FREE THIS POINTER**.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `pf_view_new`.
/// - `out_points` and `out_count` must be valid pointers to writable memory.
#[no_mangle]
pub unsafe extern "C" fn pf_view_points(
    ptr: *const PfView,
    out_points: *mut *const PfPoint,
    out_count: *mut usize,
) -> PfErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let mut snapshot = instance
            .point_snapshot
            .lock()
            .map_err(|_| DefaultPfError::lock_poisoned("point_snapshot"))?;
        with_view(instance, |view| {
            snapshot.clear();
            snapshot.extend(view.rendered_frame().points().iter().map(PfPoint::from));
        })?;

        unsafe { write_out(out_count, "out_count", snapshot.len()) }?;
        unsafe { write_out(out_points, "out_points", snapshot.as_ptr()) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{pf_view_destroy, pf_view_new};
    use crate::view::{pf_view_frame, pf_view_mount_counter, pf_view_mount_surface};
    use std::ffi::CStr;

    #[test]
    fn test_style_mask_tracks_present_fields() {
        let state = PropertyState::new().with_opacity(0.5).with_y(20.0);
        let style = PfStyle::from(&state);
        assert_eq!(style.set_mask, PF_STYLE_OPACITY | PF_STYLE_Y);
        assert_eq!(style.opacity, 0.5);
        assert_eq!(style.y, 20.0);
        assert_eq!(style.scale, 0.0);
    }

    #[test]
    fn test_point_depth_is_camera_distance() {
        let vertex = PointVertex {
            position: [400.0, 300.0],
            depth: 5.0,
            size: 18.0,
        };
        let point = PfPoint::from(&vertex);
        assert_eq!(point.depth, 5.0);
        assert_eq!((point.x, point.y), (400.0, 300.0));
    }

    #[test]
    fn test_points_match_count() {
        let mut view = ptr::null_mut();
        unsafe {
            pf_view_new(ptr::null(), &mut view);
            pf_view_mount_surface(view, 800, 600);
            pf_view_frame(view, 16.0, ptr::null_mut());

            let mut count = 0;
            let mut points = ptr::null();
            let mut snapshot_len = 0;
            assert_eq!(pf_view_point_count(view, &mut count), PfErrorCode::Ok);
            assert_eq!(pf_view_points(view, &mut points, &mut snapshot_len), PfErrorCode::Ok);
            assert!(count > 0);
            assert_eq!(count, snapshot_len);
            assert!(!points.is_null());
            pf_view_destroy(view);
        }
    }

    #[test]
    fn test_counter_text_buffer() {
        let mut view = ptr::null_mut();
        let mut handle = 0;
        let mut len = 0;
        let mut small = [0 as c_char; 1];
        let mut buf = [0 as c_char; 16];
        unsafe {
            pf_view_new(ptr::null(), &mut view);
            pf_view_mount_counter(
                view,
                ptr::null(),
                78.0,
                ptr::null(),
                c"%".as_ptr(),
                2.0,
                &mut handle,
            );

            let code = pf_view_counter_text(view, handle, small.as_mut_ptr(), small.len(), &mut len);
            assert_eq!(code, PfErrorCode::InvalidParameter);
            assert_eq!(len, 3);

            let code = pf_view_counter_text(view, handle, buf.as_mut_ptr(), buf.len(), &mut len);
            assert_eq!(code, PfErrorCode::Ok);
            assert_eq!(CStr::from_ptr(buf.as_ptr()).to_str().unwrap(), "0%");
            pf_view_destroy(view);
        }
    }
}
