//! Easing functions for animations

use serde::{Deserialize, Serialize};

/// Easing function type. Deserializes from kebab-case names
/// (`"ease-in-out-cubic"`) or `{ cubic-bezier = [x1, y1, x2, y2] }`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
    EaseInOutCubic,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value. Input is clamped to 0.0..=1.0.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// CSS `cubic-bezier()` timing function.
///
/// Solves `bezier_x(p) == t` with Newton-Raphson, then bisection when the
/// slope is too flat to converge. Computed in f64.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let target = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = target;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - target;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = target;
    for _ in 0..24 {
        let x = bezier_sample(p, x1, x2);
        if (x - target).abs() < 1e-7 {
            break;
        }
        if x < target {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// One coordinate of a unit cubic bezier with endpoints 0 and 1, in Horner form.
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for e in [
            Easing::Linear,
            Easing::EaseOutQuad,
            Easing::EaseOutCubic,
            Easing::EaseInOutCubic,
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
        ] {
            assert_eq!(e.apply(0.0), 0.0, "{e:?}");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?}");
        }
    }

    #[test]
    fn input_outside_unit_range_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Linear.apply(7.0), 1.0);
        assert_eq!(Easing::EaseOutCubic.apply(f32::NAN), 0.0);
    }

    #[test]
    fn linear_bezier_matches_identity() {
        let e = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        assert!((e.apply(0.3) - 0.3).abs() < 1e-4);
    }

    #[test]
    fn ease_out_front_loads_progress() {
        assert!(Easing::EaseOutCubic.apply(0.5) > 0.5);
    }
}
