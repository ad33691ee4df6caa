//! Polar/rectangular conversion and periodic normalization.

use kurbo::Vec2;

/// A vector expressed as a length and an angle in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polar {
    /// Euclidean length.
    pub len: f64,
    /// Angle from the positive x axis, in degrees.
    pub angle_deg: f64,
}

impl Polar {
    /// Build a polar pair.
    pub fn new(len: f64, angle_deg: f64) -> Self {
        Self { len, angle_deg }
    }
}

/// Convert a rectangular vector to its polar form.
pub fn polar(v: Vec2) -> Polar {
    Polar {
        len: v.hypot(),
        angle_deg: v.atan2().to_degrees(),
    }
}

/// Convert a polar pair back to a rectangular vector.
pub fn rect(p: Polar) -> Vec2 {
    Vec2::from_angle(p.angle_deg.to_radians()) * p.len
}

/// Wrap `val` into `[0, period)`.
pub fn normalize(val: f64, period: f64) -> f64 {
    let x = val / period;
    (x - x.floor()) * period
}

/// Fractional part with period 1, always in `[0, 1)` for finite input.
#[inline]
pub fn frac(x: f64) -> f64 {
    normalize(x, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/coords.rs"]
mod tests;
