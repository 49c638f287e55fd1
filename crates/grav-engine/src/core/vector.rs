//! Vector helpers on top of glam's `DVec2`.
//!
//! glam already covers add/sub/scale/divide/length/dot. The helpers here are the
//! few operations the sandbox needs with a defined fallback for degenerate input.

use glam::DVec2;

/// Distance padding used wherever a length ends up in a denominator.
pub const EPSILON: f64 = 1e-6;

/// Unit vector along `v`, or zero when `v` is (nearly) zero-length.
pub fn direction_or_zero(v: DVec2) -> DVec2 {
    let len = v.length();
    if len < EPSILON || !len.is_finite() {
        DVec2::ZERO
    } else {
        v / len
    }
}

/// Reflect `v` about a line with unit normal `normal`
/// (angle of incidence equals angle of reflection).
pub fn reflect(v: DVec2, normal: DVec2) -> DVec2 {
    v - 2.0 * v.dot(normal) * normal
}

/// Counter-clockwise perpendicular.
pub fn perp(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}
