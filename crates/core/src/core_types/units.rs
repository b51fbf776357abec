//! Semantic unit types for time and angle handling
//!
//! Host clocks report timestamps in milliseconds while animation specs are authored
//! in seconds. Wrapping both in newtypes keeps a `0.8` delay from being mistaken for
//! `0.8ms` somewhere between the host and the scheduler.
//!
//! # Design Philosophy
//! - Timestamps use f64 milliseconds so long-lived views do not lose sub-frame precision
//! - Authored durations use f32 seconds, matching how transitions are written
//! - Angles use f32 radians/degrees for the renderer
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//!
//! # Usage
//! ```
//! use particle_field_core::core_types::units::{Millis, Seconds};
//!
//! let delay = Seconds::new(0.8);
//! let as_ms: Millis = delay.into();
//! assert!((*as_ms - 800.0).abs() < 1e-3);
//!
//! let start = Millis::new(1000.0);
//! let now = Millis::new(1500.0);
//! assert_eq!(now - start, Millis::new(500.0));
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Mul, Sub};

/// Compare f32 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f32_total_cmp(a: f32, b: f32) -> Ordering {
    a.total_cmp(&b)
}

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TIME TYPES
// ============================================================================

/// Timestamp or duration in milliseconds, as reported by the host frame clock
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Millis(f64);

impl Eq for Millis {}

impl PartialOrd for Millis {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Millis {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Millis {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Millis {
    /// Zero milliseconds
    pub const ZERO: Millis = Millis(0.0);

    /// Create a new millisecond value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Millis(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to seconds
    #[inline]
    #[must_use]
    pub fn to_seconds(self) -> Seconds {
        Seconds((self.0 / 1000.0) as f32)
    }

    /// Whether this is a usable clock reading
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Millis {
    type Output = Millis;
    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0 + rhs.0)
    }
}

impl AddAssign for Millis {
    fn add_assign(&mut self, rhs: Millis) {
        self.0 += rhs.0;
    }
}

impl Sub for Millis {
    type Output = Millis;
    fn sub(self, rhs: Millis) -> Millis {
        Millis(self.0 - rhs.0)
    }
}

impl Mul<f64> for Millis {
    type Output = Millis;
    fn mul(self, rhs: f64) -> Millis {
        Millis(self.0 * rhs)
    }
}

impl From<f64> for Millis {
    fn from(v: f64) -> Self {
        Millis(v)
    }
}

impl From<Millis> for f64 {
    fn from(m: Millis) -> f64 {
        m.0
    }
}

impl From<Seconds> for Millis {
    fn from(s: Seconds) -> Millis {
        s.to_millis()
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}ms", self.0)
    }
}

/// Duration in seconds, the unit transitions are authored in
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Seconds(f32);

impl Eq for Seconds {}

impl PartialOrd for Seconds {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Seconds {
    fn cmp(&self, other: &Self) -> Ordering {
        f32_total_cmp(self.0, other.0)
    }
}

impl Deref for Seconds {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Seconds {
    /// Zero seconds
    pub const ZERO: Seconds = Seconds(0.0);

    /// Create a new duration in seconds
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Seconds(value)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Convert to milliseconds
    #[inline]
    #[must_use]
    pub fn to_millis(self) -> Millis {
        Millis(f64::from(self.0) * 1000.0)
    }
}

impl Add for Seconds {
    type Output = Seconds;
    fn add(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 + rhs.0)
    }
}

impl Sub for Seconds {
    type Output = Seconds;
    fn sub(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 - rhs.0)
    }
}

impl Mul<f32> for Seconds {
    type Output = Seconds;
    fn mul(self, rhs: f32) -> Seconds {
        Seconds(self.0 * rhs)
    }
}

impl From<f32> for Seconds {
    fn from(v: f32) -> Self {
        Seconds(v)
    }
}

impl From<Seconds> for f32 {
    fn from(s: Seconds) -> f32 {
        s.0
    }
}

impl From<Millis> for Seconds {
    fn from(m: Millis) -> Seconds {
        m.to_seconds()
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}s", self.0)
    }
}

// ============================================================================
// ANGLE TYPES
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f32);

impl Eq for Degrees {}

impl PartialOrd for Degrees {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Degrees {
    fn cmp(&self, other: &Self) -> Ordering {
        f32_total_cmp(self.0, other.0)
    }
}

impl Deref for Degrees {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Degrees {
    /// Create a new angle in degrees
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Degrees(value)
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

impl From<Degrees> for Radians {
    fn from(d: Degrees) -> Radians {
        d.to_radians()
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Radians(f32);

impl Eq for Radians {}

impl PartialOrd for Radians {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Radians {
    fn cmp(&self, other: &Self) -> Ordering {
        f32_total_cmp(self.0, other.0)
    }
}

impl Deref for Radians {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Radians {
    /// Create a new angle in radians
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Radians(value)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Convert to degrees
    #[inline]
    #[must_use]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }
}

impl fmt::Display for Radians {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} rad", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_to_millis() {
        assert_eq!(Seconds::new(2.0).to_millis(), Millis::new(2000.0));
        assert_eq!(Seconds::new(0.0).to_millis(), Millis::ZERO);
    }

    #[test]
    fn test_millis_arithmetic() {
        let start = Millis::new(16.0);
        let mut now = start;
        now += Millis::new(484.0);
        assert_eq!(now - start, Millis::new(484.0));
        assert_eq!(now.to_seconds(), Seconds::new(0.5));
    }

    #[test]
    fn test_total_ordering_handles_nan() {
        let nan = Millis::new(f64::NAN);
        assert!(nan > Millis::new(1.0e12));
        assert_eq!(Millis::new(1.0).max(Millis::new(2.0)), Millis::new(2.0));
    }

    #[test]
    fn test_angle_conversion() {
        let quarter = Degrees::new(90.0).to_radians();
        assert!((quarter.value() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((*quarter.to_degrees() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Millis::new(12.0)), "12.0ms");
        assert_eq!(format!("{}", Seconds::new(0.8)), "0.80s");
    }
}
