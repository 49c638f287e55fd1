//! Semantic operations on the sandbox.
//!
//! Every operation mutates [`SimulationState`] immediately. An id that does not
//! resolve to a body (deleted by an earlier event) turns the call into a no-op,
//! reported through the `bool`/`Option` return where callers care.

use glam::DVec2;

use crate::api::config::{parse_finite, parse_positive_or, TraceDisplay};
use crate::api::sandbox::SimulationState;
use crate::api::types::{BodyId, ForceLaw, MassFormula};
use crate::components::body::{mass_for_radius, rescale_mass, Body};
use crate::core::vector::{direction_or_zero, perp};
use crate::physics::force::force_between;

fn valid_length(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl SimulationState {
    // -- Structure --

    /// Add a body at rest with mass from the active formula.
    pub fn create_body(&mut self, center: DVec2, radius: f64) -> Option<BodyId> {
        if !valid_length(radius) || !center.is_finite() {
            log::warn!("create_body: rejected radius {} at {:?}", radius, center);
            return None;
        }
        let mass = mass_for_radius(self.config.mass_formula, self.config.mass_value(), radius);
        let color = self.next_color();
        let id = self.bodies.insert(Body::new(center, radius, mass).with_color(color));
        log::info!("created body {:?}: r={:.3} m={:.3}", id, radius, mass);
        Some(id)
    }

    pub fn delete_body(&mut self, id: BodyId) -> bool {
        if self.bodies.remove(id).is_none() {
            return false;
        }
        self.selection.forget(id);
        log::info!("deleted body {:?}", id);
        true
    }

    pub fn clear_bodies(&mut self) {
        let count = self.bodies.len();
        self.bodies.clear();
        self.selection.clear();
        log::info!("removed all {} bodies", count);
    }

    // -- Selection --

    /// Select a body, or clear with `None`. Unknown ids are ignored.
    pub fn set_selected(&mut self, id: Option<BodyId>) {
        if id.map_or(true, |id| self.bodies.get(id).is_some()) {
            self.selection.selected = id;
        }
    }

    pub fn set_highlighted(&mut self, id: Option<BodyId>) {
        if id.map_or(true, |id| self.bodies.get(id).is_some()) {
            self.selection.highlighted = id;
        }
    }

    // -- Body edits --

    pub fn move_body(&mut self, id: BodyId, world_delta: DVec2) -> bool {
        if !world_delta.is_finite() {
            return false;
        }
        match self.bodies.get_mut(id) {
            Some(body) => {
                body.center += world_delta;
                true
            }
            None => false,
        }
    }

    /// Change the radius, keeping density under the active formula.
    pub fn resize_body(&mut self, id: BodyId, new_radius: f64) -> bool {
        if !valid_length(new_radius) {
            return false;
        }
        let formula = self.config.mass_formula;
        match self.bodies.get_mut(id) {
            Some(body) => {
                body.mass = rescale_mass(formula, body.radius, body.mass, new_radius);
                body.radius = new_radius;
                true
            }
            None => false,
        }
    }

    /// Recompute mass from a typed density (or mass, under `Fixed`).
    /// Unparsable text counts as 1.
    pub fn set_density(&mut self, id: BodyId, text: &str) -> bool {
        let value = parse_positive_or(text, 1.0);
        let formula = self.config.mass_formula;
        match self.bodies.get_mut(id) {
            Some(body) => {
                body.mass = mass_for_radius(formula, value, body.radius);
                true
            }
            None => false,
        }
    }

    /// Multiply a body's mass by `factor`.
    pub fn scale_mass(&mut self, id: BodyId, factor: f64) -> bool {
        if !valid_length(factor) {
            return false;
        }
        match self.bodies.get_mut(id) {
            Some(body) => {
                body.mass *= factor;
                true
            }
            None => false,
        }
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: DVec2) -> bool {
        if !velocity.is_finite() {
            return false;
        }
        self.edit_velocity(id, |_| velocity)
    }

    pub fn reverse_velocity(&mut self, id: BodyId) -> bool {
        self.edit_velocity(id, |v| -v)
    }

    pub fn zero_velocity(&mut self, id: BodyId) -> bool {
        self.edit_velocity(id, |_| DVec2::ZERO)
    }

    fn edit_velocity(&mut self, id: BodyId, f: impl FnOnce(DVec2) -> DVec2) -> bool {
        match self.bodies.get_mut(id) {
            Some(body) => {
                body.velocity = f(body.velocity);
                true
            }
            None => false,
        }
    }

    /// Pinning also zeroes the velocity so the body is at rest right away.
    pub fn set_pinned(&mut self, id: BodyId, pinned: bool) -> bool {
        match self.bodies.get_mut(id) {
            Some(body) => {
                body.pinned = pinned;
                if pinned {
                    body.velocity = DVec2::ZERO;
                }
                true
            }
            None => false,
        }
    }

    pub fn toggle_pin(&mut self, id: BodyId) -> bool {
        match self.bodies.get(id).map(|b| b.pinned) {
            Some(pinned) => self.set_pinned(id, !pinned),
            None => false,
        }
    }

    /// Velocities that would put `a` and `b` into circular motion under their
    /// current mutual attraction. Free pairs orbit their center of mass; a free
    /// body next to a pinned one orbits it. Both turn counter-clockwise.
    ///
    /// `None` when either id is missing, both are pinned, the constant does not
    /// parse, or the centers coincide.
    pub fn rotation_velocities(&self, a: BodyId, b: BodyId) -> Option<(DVec2, DVec2)> {
        if a == b {
            return None;
        }
        let body_a = self.bodies.get(a)?;
        let body_b = self.bodies.get(b)?;
        let g = self.config.gravity()?;

        let offset = body_b.center - body_a.center;
        let distance = offset.length();
        if distance <= 0.0 {
            return None;
        }
        let tangent = perp(direction_or_zero(offset));
        let force = force_between(body_a, body_b, g, self.config.force_law).length();
        let speed = |radius: f64, mass: f64| (force * radius / mass).sqrt();

        match (body_a.pinned, body_b.pinned) {
            (false, false) => {
                let total = body_a.mass + body_b.mass;
                let com = (body_a.center * body_a.mass + body_b.center * body_b.mass) / total;
                let va = speed(body_a.center.distance(com), body_a.mass);
                let vb = speed(body_b.center.distance(com), body_b.mass);
                Some((-tangent * va, tangent * vb))
            }
            (true, false) => Some((DVec2::ZERO, tangent * speed(distance, body_b.mass))),
            (false, true) => Some((-tangent * speed(distance, body_a.mass), DVec2::ZERO)),
            (true, true) => None,
        }
    }

    /// Add [`Self::rotation_velocities`] to the pair's current velocities.
    pub fn compute_rotation_velocities(&mut self, a: BodyId, b: BodyId) -> bool {
        let Some((da, db)) = self.rotation_velocities(a, b) else {
            return false;
        };
        for (id, dv) in [(a, da), (b, db)] {
            if let Some(body) = self.bodies.get_mut(id) {
                if !body.pinned {
                    body.velocity += dv;
                }
            }
        }
        log::debug!("rotation: {:?} += {:?}, {:?} += {:?}", a, da, b, db);
        true
    }

    // -- Camera --

    /// Move the manual camera center by a world displacement.
    pub fn pan_camera(&mut self, world_delta: DVec2) {
        if world_delta.is_finite() {
            self.camera.center += world_delta;
        }
    }

    pub fn set_zoom(&mut self, pixels_per_meter: f64) -> bool {
        self.camera.set_zoom(pixels_per_meter)
    }

    /// Zoom in for positive `notches`, out for negative.
    pub fn zoom_by(&mut self, notches: i32) -> bool {
        let factor = self.sandbox_config().zoom_step.powi(notches);
        self.set_zoom(self.camera.pixels_per_meter * factor)
    }

    /// Start following `id`, or stop following whatever body is centered.
    /// Uncentering leaves the camera where the body was.
    pub fn toggle_center_on(&mut self, id: BodyId) -> bool {
        if let Some(centered) = self.selection.centered.take() {
            if let Some(body) = self.bodies.get(centered) {
                self.camera.center = body.center;
            }
            return true;
        }
        if self.bodies.get(id).is_none() {
            return false;
        }
        self.selection.centered = Some(id);
        true
    }

    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.camera.resize(width, height);
    }

    // -- Settings --

    pub fn set_gravity_text(&mut self, text: &str) {
        if parse_finite(text).is_none() {
            log::warn!("gravitational constant {:?} is not a number; forces disabled", text);
        }
        self.config.gravitational_constant = text.to_string();
    }

    pub fn set_force_law(&mut self, law: ForceLaw) {
        self.config.force_law = law;
    }

    pub fn set_confined_box(&mut self, confined: bool) {
        self.config.confined_box = confined;
    }

    pub fn set_mass_formula(&mut self, formula: MassFormula) {
        self.config.mass_formula = formula;
    }

    pub fn set_mass_value_text(&mut self, text: &str) {
        self.config.mass_value = text.to_string();
    }

    /// Change the trace bound and cut existing traces down to it.
    pub fn set_trace_length(&mut self, text: &str) {
        self.config.trace_length = text.to_string();
        let max_len = self.config.trace_len();
        self.bodies.for_each_mut(|body| body.truncate_trace(max_len));
    }

    pub fn set_trace_display(&mut self, display: TraceDisplay) {
        self.config.trace_display = display;
    }

    /// Bodies whose traces should be drawn. Traces are shown only while the
    /// simulation is playing or paused.
    pub fn traced_bodies(&self) -> Vec<BodyId> {
        if !self.mode().is_playback() {
            return Vec::new();
        }
        let sel = &self.selection;
        self.bodies
            .iter()
            .filter(|b| match self.config.trace_display {
                TraceDisplay::None => false,
                TraceDisplay::All => true,
                TraceDisplay::Selected => sel.selected == Some(b.id) || sel.highlighted == Some(b.id),
            })
            .map(|b| b.id)
            .collect()
    }
}
