//! Fixed sub-step integrator for the sandbox.
//!
//! Each sub-step drifts positions with the old velocity, evaluates forces at
//! the new positions, resolves contacts and walls, then kicks velocities
//! (semi-implicit Euler). A tick runs `split_count` sub-steps on a private copy
//! of the bodies and publishes the result in one swap.

use glam::DVec2;

use crate::api::config::SimulationConfig;
use crate::api::types::ForceLaw;
use crate::components::body::Body;
use crate::core::bodies::BodySet;
use crate::physics::boundary::confine_all;
use crate::physics::collision::resolve_collisions;
use crate::physics::force::all_forces;
use crate::renderer::camera::WorldRect;

/// Everything one tick needs, resolved from config and camera up front.
#[derive(Debug, Clone, PartialEq)]
pub struct StepParams {
    /// `None` when the gravitational constant did not parse: forces are zero.
    pub gravity: Option<f64>,
    pub law: ForceLaw,
    pub trace_len: usize,
    /// Reflecting walls, when the confined box is on.
    pub bounds: Option<WorldRect>,
}

impl StepParams {
    /// Resolve from the current config. `viewport` is the visible world
    /// rectangle, used as the walls when the box is enabled.
    pub fn from_config(config: &SimulationConfig, viewport: WorldRect) -> Self {
        Self {
            gravity: config.gravity(),
            law: config.force_law,
            trace_len: config.trace_len(),
            bounds: config.confined_box.then_some(viewport),
        }
    }
}

/// Counters from one tick, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub sub_steps: u32,
    pub collisions: usize,
    pub wall_hits: usize,
}

/// Advance `bodies` by one sub-step of `dt` seconds.
pub fn sub_step(bodies: &mut [Body], params: &StepParams, dt: f64) -> TickStats {
    // Drift
    for body in bodies.iter_mut().filter(|b| !b.pinned) {
        body.center += body.velocity * dt;
        body.record_trace(params.trace_len);
    }

    // Forces at the drifted positions
    let forces = all_forces(bodies, params.gravity, params.law);

    let collisions = resolve_collisions(bodies);
    let wall_hits = match &params.bounds {
        Some(bounds) => confine_all(bodies, bounds),
        None => 0,
    };

    // Kick
    for (body, force) in bodies.iter_mut().zip(forces) {
        if body.pinned {
            body.velocity = DVec2::ZERO;
        } else {
            body.velocity += force / body.mass * dt;
        }
    }

    TickStats { sub_steps: 1, collisions, wall_hits }
}

/// Advance the set by `total_time` seconds split into `split_count` sub-steps.
/// The previously published collection is untouched until the final swap.
pub fn tick_time(set: &mut BodySet, params: &StepParams, total_time: f64, split_count: u32) -> TickStats {
    let split_count = split_count.max(1);
    let dt = total_time / split_count as f64;

    let mut bodies = set.working_copy();
    let mut stats = TickStats::default();
    for _ in 0..split_count {
        let step = sub_step(&mut bodies, params, dt);
        stats.sub_steps += step.sub_steps;
        stats.collisions += step.collisions;
        stats.wall_hits += step.wall_hits;
    }
    set.publish(bodies);

    if stats.collisions > 0 || stats.wall_hits > 0 {
        log::debug!(
            "tick: {} collisions, {} wall hits over {} sub-steps",
            stats.collisions, stats.wall_hits, stats.sub_steps
        );
    }
    stats
}
