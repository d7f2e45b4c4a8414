//! Piecewise-linear parameter curves over normalized age.
//!
//! Curves map an instance's normalized age (0 at spawn, 1 at end of
//! lifetime) to a parameter value. Evaluation clamps at both ends, so a
//! curve never extrapolates. An empty curve evaluates to the neutral
//! value: scalar 1, opaque white for colors.

/// A piecewise-linear scalar curve.
///
/// Keys are `(time, value)` pairs with `time` in `[0, 1]`, kept sorted
/// by time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve {
    /// Sorted `(time, value)` keys.
    pub keys: Vec<(f32, f32)>,
}

impl Curve {
    /// A curve that evaluates to `value` at every age.
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![(0.0, value)],
        }
    }

    /// A linear ramp from `from` at age 0 to `to` at age 1.
    pub fn ramp(from: f32, to: f32) -> Self {
        Self {
            keys: vec![(0.0, from), (1.0, to)],
        }
    }

    /// Evaluate the curve at normalized age `t`.
    ///
    /// Clamps to the first/last key outside the keyed range. An empty
    /// curve evaluates to 1.
    pub fn eval(&self, t: f32) -> f32 {
        match interpolate(&self.keys, t) {
            Some((a, b, s)) => a + (b - a) * s,
            None => self.keys.first().map_or(1.0, |k| k.1),
        }
    }
}

/// A piecewise-linear RGBA curve.
///
/// Same evaluation rules as [`Curve`], componentwise. An empty curve
/// evaluates to opaque white.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorCurve {
    /// Sorted `(time, rgba)` keys.
    pub keys: Vec<(f32, [f32; 4])>,
}

impl ColorCurve {
    /// A curve that evaluates to `color` at every age.
    pub fn constant(color: [f32; 4]) -> Self {
        Self {
            keys: vec![(0.0, color)],
        }
    }

    /// Evaluate the curve at normalized age `t`.
    pub fn eval(&self, t: f32) -> [f32; 4] {
        match interpolate(&self.keys, t) {
            Some((a, b, s)) => [
                a[0] + (b[0] - a[0]) * s,
                a[1] + (b[1] - a[1]) * s,
                a[2] + (b[2] - a[2]) * s,
                a[3] + (b[3] - a[3]) * s,
            ],
            None => self.keys.first().map_or([1.0; 4], |k| k.1),
        }
    }
}

/// Locate `t` within sorted keys.
///
/// Returns `Some((before, after, blend))` for an interior `t`, or `None`
/// when the curve has fewer than two keys or `t` clamps to an end key
/// (the caller falls back to the single/end key value).
fn interpolate<V: Copy>(keys: &[(f32, V)], t: f32) -> Option<(V, V, f32)> {
    if keys.len() < 2 {
        return None;
    }
    let first = keys[0];
    let last = keys[keys.len() - 1];
    if t <= first.0 {
        return Some((first.1, first.1, 0.0));
    }
    if t >= last.0 {
        return Some((last.1, last.1, 0.0));
    }
    let after_idx = keys.partition_point(|k| k.0 <= t);
    let before = keys[after_idx - 1];
    let after = keys[after_idx];
    let span = after.0 - before.0;
    // Duplicate key times collapse to the earlier key.
    let blend = if span > 0.0 { (t - before.0) / span } else { 0.0 };
    Some((before.1, after.1, blend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_curve_is_neutral() {
        assert_eq!(Curve::default().eval(0.5), 1.0);
        assert_eq!(ColorCurve::default().eval(0.5), [1.0; 4]);
    }

    #[test]
    fn constant_curve() {
        let c = Curve::constant(3.0);
        assert_eq!(c.eval(0.0), 3.0);
        assert_eq!(c.eval(0.5), 3.0);
        assert_eq!(c.eval(2.0), 3.0);
    }

    #[test]
    fn ramp_interpolates() {
        let c = Curve::ramp(0.0, 2.0);
        assert_eq!(c.eval(0.0), 0.0);
        assert_eq!(c.eval(0.5), 1.0);
        assert_eq!(c.eval(1.0), 2.0);
    }

    #[test]
    fn eval_clamps_outside_range() {
        let c = Curve {
            keys: vec![(0.2, 1.0), (0.8, 5.0)],
        };
        assert_eq!(c.eval(0.0), 1.0);
        assert_eq!(c.eval(1.0), 5.0);
        assert_eq!(c.eval(-3.0), 1.0);
    }

    #[test]
    fn interior_segment_selection() {
        let c = Curve {
            keys: vec![(0.0, 0.0), (0.5, 10.0), (1.0, 0.0)],
        };
        assert_eq!(c.eval(0.25), 5.0);
        assert_eq!(c.eval(0.75), 5.0);
        assert_eq!(c.eval(0.5), 10.0);
    }

    #[test]
    fn color_curve_componentwise() {
        let c = ColorCurve {
            keys: vec![(0.0, [1.0, 0.0, 0.0, 1.0]), (1.0, [0.0, 0.0, 1.0, 0.0])],
        };
        assert_eq!(c.eval(0.5), [0.5, 0.0, 0.5, 0.5]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Evaluation never leaves the hull of the key values.
            #[test]
            fn eval_stays_within_key_bounds(
                t in -1.0f32..2.0,
                keys in proptest::collection::vec((0.0f32..1.0, -10.0f32..10.0), 1..8),
            ) {
                let mut keys = keys;
                keys.sort_by(|a, b| a.0.total_cmp(&b.0));
                let lo = keys.iter().map(|k| k.1).fold(f32::INFINITY, f32::min);
                let hi = keys.iter().map(|k| k.1).fold(f32::NEG_INFINITY, f32::max);
                let v = Curve { keys }.eval(t);
                prop_assert!(v >= lo - 1e-4 && v <= hi + 1e-4);
            }
        }
    }
}
