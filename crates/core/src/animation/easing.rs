//! Easing curves
//!
//! Named curves use the control points of the CSS timing functions, so a
//! transition authored as `ease-out` here moves exactly like its stylesheet
//! counterpart. Every curve maps `[0, 1]` onto itself with `f(0) = 0` and `f(1) = 1`.

use serde::{Deserialize, Serialize};

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f32 = 1e-3;
const SUBDIVISION_ITERATIONS: usize = 24;
const SOLVE_EPSILON: f32 = 1e-6;

/// Shape of a transition's progress over time
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    #[default]
    EaseInOut,
    /// `1 - (1 - t)^3`
    EaseOutCubic,
    /// Arbitrary `cubic-bezier(x1, y1, x2, y2)`; `x1` and `x2` are clamped to `[0, 1]`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Eased progress for linear progress `t`, clamped to `[0, 1]` first
    pub fn apply(self, t: f32) -> f32 {
        if t.is_nan() {
            return 0.0;
        }
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => bezier(0.42, 0.0, 0.58, 1.0, t),
            Easing::EaseOutCubic => ease_out_cubic(f64::from(t)) as f32,
            Easing::CubicBezier(x1, y1, x2, y2) => bezier(x1, y1, x2, y2, t),
        }
    }
}

/// `1 - (1 - t)^3` in double precision, used by numeric counters
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// One axis of a cubic bezier anchored at 0 and 1, in polynomial form
#[derive(Debug, Clone, Copy)]
struct BezierAxis {
    a: f32,
    b: f32,
    c: f32,
}

impl BezierAxis {
    fn new(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        BezierAxis { a, b, c }
    }

    fn at(self, s: f32) -> f32 {
        ((self.a * s + self.b) * s + self.c) * s
    }

    fn slope(self, s: f32) -> f32 {
        (3.0 * self.a * s + 2.0 * self.b) * s + self.c
    }
}

fn bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let x_axis = BezierAxis::new(x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0));
    let y_axis = BezierAxis::new(y1, y2);
    y_axis.at(solve_parameter(x_axis, t))
}

/// Curve parameter `s` with `x(s) = x`: Newton-Raphson, bisection if the slope flattens
fn solve_parameter(axis: BezierAxis, x: f32) -> f32 {
    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let error = axis.at(s) - x;
        if error.abs() < SOLVE_EPSILON {
            return s;
        }
        let slope = axis.slope(s);
        if slope.abs() < NEWTON_MIN_SLOPE {
            break;
        }
        s -= error / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..SUBDIVISION_ITERATIONS {
        let value = axis.at(s);
        if (value - x).abs() < SOLVE_EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    s
}
