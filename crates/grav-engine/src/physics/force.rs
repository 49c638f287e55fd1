//! Pairwise attraction under a selectable inverse-power law.

use glam::DVec2;

use crate::api::types::ForceLaw;
use crate::components::body::Body;
use crate::core::vector::{direction_or_zero, EPSILON};

/// Force exerted on `subject` by `object`: `G·m₁·m₂ / (d+ε)^p`, pointing at `object`.
pub fn force_between(subject: &Body, object: &Body, g: f64, law: ForceLaw) -> DVec2 {
    let offset = object.center - subject.center;
    let distance = offset.length() + EPSILON;
    let magnitude = g * subject.mass * object.mass / law.denominator(distance);
    direction_or_zero(offset) * magnitude
}

/// Sum of forces on `target` from every body in `bodies` except index `exclude`.
///
/// `g` of `None` (an unparsable constant) yields zero force.
pub fn net_force(target: &Body, bodies: &[Body], exclude: usize, g: Option<f64>, law: ForceLaw) -> DVec2 {
    let Some(g) = g.filter(|g| g.is_finite()) else {
        return DVec2::ZERO;
    };
    bodies
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != exclude)
        .fold(DVec2::ZERO, |acc, (_, other)| acc + force_between(target, other, g, law))
}

/// Net force on every body, indexed like `bodies`. O(n²).
pub fn all_forces(bodies: &[Body], g: Option<f64>, law: ForceLaw) -> Vec<DVec2> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| net_force(body, bodies, i, g, law))
        .collect()
}
