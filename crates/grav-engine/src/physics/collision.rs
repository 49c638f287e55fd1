//! Pairwise elastic collision detection and resolution.
//!
//! Pairs are visited in ascending index order and resolved one at a time, so a
//! body touching two others in the same sub-step is resolved twice, in order.
//! Overlap is removed by moving bodies only; velocities come solely from the
//! elastic solution, so repositioning never adds kinetic energy.

use glam::DVec2;

use crate::components::body::Body;
use crate::core::vector::{reflect, EPSILON};

/// Post-collision velocities of two free bodies.
///
/// Solved in the rest frame of body 2: body 1 arrives with the relative
/// velocity, momentum and energy are conserved, and body 2 leaves along the
/// line of centers `d` (from 1 to 2). Shifting back by `v2` restores each
/// body's own tangential component.
pub fn elastic_velocities(m1: f64, v1: DVec2, m2: f64, v2: DVec2, d: DVec2) -> (DVec2, DVec2) {
    let r = m2 / m1;
    let rv = v1 - v2;
    let norm = (r + 1.0) * d.length_squared();
    let rv2 = DVec2::new(
        (2.0 * d.x * d.y * rv.y + 2.0 * d.x * d.x * rv.x) / norm,
        (2.0 * d.x * d.y * rv.x + 2.0 * d.y * d.y * rv.y) / norm,
    );
    let rv1 = rv - r * rv2;
    (v2 + rv1, v2 + rv2)
}

/// Resolve a single pair if the disks overlap. Returns whether they did.
pub fn resolve_pair(a: &mut Body, b: &mut Body) -> bool {
    let raw = b.center - a.center;
    let reach = a.radius + b.radius;
    if raw.length() >= reach {
        return false;
    }
    // Coincident centers: separate along +x.
    let d = if raw.length() < EPSILON { DVec2::new(EPSILON, 0.0) } else { raw };
    let distance = d.length();
    let normal = d / distance;

    match (a.pinned, b.pinned) {
        (false, false) => {
            let (va, vb) = elastic_velocities(a.mass, a.velocity, b.mass, b.velocity, d);
            a.velocity = va;
            b.velocity = vb;

            let touch = a.center + d * (a.radius / reach);
            a.center = touch - normal * a.radius;
            b.center = touch + normal * b.radius;
        }
        (true, false) => {
            b.velocity = reflect(b.velocity, normal);
            b.center = a.center + normal * reach;
        }
        (false, true) => {
            a.velocity = reflect(a.velocity, normal);
            a.center = b.center - normal * reach;
        }
        (true, true) => return false,
    }
    true
}

/// Resolve every overlapping pair (i < j, ascending). Returns the number resolved.
pub fn resolve_collisions(bodies: &mut [Body]) -> usize {
    let mut resolved = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b) {
                resolved += 1;
            }
        }
    }
    resolved
}
