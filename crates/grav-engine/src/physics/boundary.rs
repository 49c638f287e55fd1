//! Reflecting walls at the edges of the visible world rectangle.

use crate::components::body::Body;
use crate::renderer::camera::WorldRect;

/// Keep `body` inside `bounds`. A body whose disk crosses a wall is clamped to
/// touch it and its velocity component across that wall is pointed back inside.
/// A body wider than the box on some axis sits at the box midpoint on that
/// axis with no velocity along it. Pinned bodies are left alone. Returns
/// whether any wall was hit.
pub fn confine(body: &mut Body, bounds: &WorldRect) -> bool {
    if body.pinned {
        return false;
    }
    let r = body.radius;
    let hit_x = confine_axis(&mut body.center.x, &mut body.velocity.x, r, bounds.min.x, bounds.max.x);
    let hit_y = confine_axis(&mut body.center.y, &mut body.velocity.y, r, bounds.min.y, bounds.max.y);
    hit_x || hit_y
}

fn confine_axis(center: &mut f64, velocity: &mut f64, r: f64, min: f64, max: f64) -> bool {
    let low = *center - r < min;
    let high = *center + r > max;
    if !(low || high) {
        return false;
    }
    if 2.0 * r > max - min {
        *center = 0.5 * (min + max);
        *velocity = 0.0;
    } else if low {
        *velocity = velocity.abs();
        *center = min + r;
    } else {
        *velocity = -velocity.abs();
        *center = max - r;
    }
    true
}

/// Apply [`confine`] to every body.
pub fn confine_all(bodies: &mut [Body], bounds: &WorldRect) -> usize {
    bodies.iter_mut().map(|b| confine(b, bounds)).filter(|hit| *hit).count()
}
