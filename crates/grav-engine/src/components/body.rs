use std::collections::VecDeque;

use glam::DVec2;

use crate::api::types::{BodyId, MassFormula};
use crate::components::color::BodyColor;

/// A circular mass point. World units are meters, kilograms and seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Stable identifier (assigned by `BodySet::insert`).
    pub id: BodyId,
    /// Position of the center in world space (Y-up).
    pub center: DVec2,
    /// Velocity in m/s.
    pub velocity: DVec2,
    /// Radius in meters, always > 0.
    pub radius: f64,
    /// Mass in kilograms, always > 0.
    pub mass: f64,
    /// Pinned bodies are immovable to physics and have zero velocity after every step.
    pub pinned: bool,
    /// Recent positions, oldest first.
    pub trace: VecDeque<DVec2>,
    /// Cosmetic only.
    pub color: BodyColor,
}

impl Body {
    /// Create an unpinned body at rest. The id is placeholder until inserted.
    pub fn new(center: DVec2, radius: f64, mass: f64) -> Self {
        Self {
            id: BodyId(0),
            center,
            velocity: DVec2::ZERO,
            radius,
            mass,
            pinned: false,
            trace: VecDeque::new(),
            color: BodyColor::new(255, 255, 255),
        }
    }

    // -- Builder pattern --

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn with_color(mut self, color: BodyColor) -> Self {
        self.color = color;
        self
    }

    /// Whether `point` lies strictly inside the disk.
    pub fn contains(&self, point: DVec2) -> bool {
        self.center.distance(point) < self.radius
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Append the current center to the trace, dropping the oldest points
    /// beyond `max_len`. A zero bound records nothing.
    pub fn record_trace(&mut self, max_len: usize) {
        if max_len == 0 {
            self.trace.clear();
            return;
        }
        self.trace.push_back(self.center);
        self.truncate_trace(max_len);
    }

    /// Drop the oldest points so at most `max_len` remain.
    pub fn truncate_trace(&mut self, max_len: usize) {
        while self.trace.len() > max_len {
            self.trace.pop_front();
        }
    }
}

/// Mass of a body of `radius` under `formula`, where `value` is the density
/// (or the mass itself for `Fixed`).
pub fn mass_for_radius(formula: MassFormula, value: f64, radius: f64) -> f64 {
    match formula {
        MassFormula::VolumeDensity => 4.0 * std::f64::consts::PI * value * radius.powi(3) / 3.0,
        MassFormula::AreaDensity => std::f64::consts::PI * value * radius.powi(2),
        MassFormula::Fixed => value,
    }
}

/// New mass after a radius change that keeps the density constant.
pub fn rescale_mass(formula: MassFormula, old_radius: f64, old_mass: f64, new_radius: f64) -> f64 {
    let ratio = new_radius / old_radius;
    match formula {
        MassFormula::VolumeDensity => old_mass * ratio.powi(3),
        MassFormula::AreaDensity => old_mass * ratio.powi(2),
        MassFormula::Fixed => old_mass,
    }
}

/// Inverse of `mass_for_radius`: the density (or mass) a body currently has.
pub fn density_of(formula: MassFormula, body: &Body) -> f64 {
    match formula {
        MassFormula::VolumeDensity => {
            body.mass / (4.0 * std::f64::consts::PI * body.radius.powi(3) / 3.0)
        }
        MassFormula::AreaDensity => body.mass / (std::f64::consts::PI * body.radius.powi(2)),
        MassFormula::Fixed => body.mass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_is_bounded_and_keeps_newest() {
        let mut body = Body::new(DVec2::ZERO, 1.0, 1.0);
        for i in 0..10 {
            body.center = DVec2::new(i as f64, 0.0);
            body.record_trace(3);
        }
        assert_eq!(body.trace.len(), 3);
        assert_eq!(body.trace.front(), Some(&DVec2::new(7.0, 0.0)));
        assert_eq!(body.trace.back(), Some(&DVec2::new(9.0, 0.0)));
    }

    #[test]
    fn zero_trace_length_records_nothing() {
        let mut body = Body::new(DVec2::ZERO, 1.0, 1.0);
        body.record_trace(0);
        assert!(body.trace.is_empty());
    }

    #[test]
    fn mass_formulas() {
        let pi = std::f64::consts::PI;
        assert!((mass_for_radius(MassFormula::VolumeDensity, 3.0, 1.0) - 4.0 * pi).abs() < 1e-12);
        assert!((mass_for_radius(MassFormula::AreaDensity, 2.0, 2.0) - 8.0 * pi).abs() < 1e-12);
        assert_eq!(mass_for_radius(MassFormula::Fixed, 7.0, 100.0), 7.0);
    }

    #[test]
    fn rescale_keeps_density() {
        for formula in [MassFormula::VolumeDensity, MassFormula::AreaDensity, MassFormula::Fixed] {
            let mut body = Body::new(DVec2::ZERO, 1.5, mass_for_radius(formula, 10.0, 1.5));
            let before = density_of(formula, &body);
            body.mass = rescale_mass(formula, body.radius, body.mass, 4.0);
            body.radius = 4.0;
            let after = density_of(formula, &body);
            if formula == MassFormula::Fixed {
                assert_eq!(body.mass, 10.0);
            } else {
                assert!((before - after).abs() < 1e-9, "{:?}: {} vs {}", formula, before, after);
            }
        }
    }

    #[test]
    fn contains_is_strict() {
        let body = Body::new(DVec2::ZERO, 1.0, 1.0);
        assert!(body.contains(DVec2::new(0.5, 0.5)));
        assert!(!body.contains(DVec2::new(1.0, 0.0)));
    }
}
