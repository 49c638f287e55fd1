//! Save/load documents for a sandbox.
//!
//! Only physics-relevant fields are stored. Colors are drawn fresh and traces
//! start empty on load.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::config::SimulationConfig;
use crate::api::sandbox::SimulationState;
use crate::api::types::{ForceLaw, MassFormula};
use crate::components::body::Body;

/// Failure to read a state document.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("malformed state document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ball {index}: {reason}")]
    InvalidBall { index: usize, reason: &'static str },
    #[error("invalid zoom: {0} px/m")]
    InvalidZoom(f64),
    #[error("camera center is not finite")]
    InvalidCameraCenter,
}

/// `{x, y}` as stored in documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedControls {
    pub pixels_per_meter: f64,
    pub camera_center: Point,
    pub gravitational_constant: String,
    pub gravitation_formula: ForceLaw,
    pub confined_box: bool,
    #[serde(default)]
    pub create_mass_formula: MassFormula,
    #[serde(default = "default_mass_value")]
    pub create_mass_value: String,
    #[serde(default = "default_trace_ticks")]
    pub trace_ticks: String,
}

fn default_mass_value() -> String {
    SimulationConfig::default().mass_value
}

fn default_trace_ticks() -> String {
    SimulationConfig::default().trace_length
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBall {
    pub center: Point,
    pub radius: f64,
    pub mass: f64,
    pub velocity: Point,
    #[serde(default)]
    pub pinned: bool,
}

impl SavedBall {
    fn validate(&self, index: usize) -> Result<(), StateError> {
        let invalid = |reason| Err(StateError::InvalidBall { index, reason });
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return invalid("radius must be positive");
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return invalid("mass must be positive");
        }
        if !DVec2::from(self.center).is_finite() {
            return invalid("center is not finite");
        }
        if !DVec2::from(self.velocity).is_finite() {
            return invalid("velocity is not finite");
        }
        Ok(())
    }
}

/// A complete saved sandbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    pub control_state: SavedControls,
    pub balls: Vec<SavedBall>,
}

impl SavedState {
    pub fn capture(state: &SimulationState) -> Self {
        let config = &state.config;
        let control_state = SavedControls {
            pixels_per_meter: state.camera.pixels_per_meter,
            camera_center: state.camera.center.into(),
            gravitational_constant: config.gravitational_constant.clone(),
            gravitation_formula: config.force_law,
            confined_box: config.confined_box,
            create_mass_formula: config.mass_formula,
            create_mass_value: config.mass_value.clone(),
            trace_ticks: config.trace_length.clone(),
        };
        let balls = state
            .bodies
            .iter()
            .map(|b| SavedBall {
                center: b.center.into(),
                radius: b.radius,
                mass: b.mass,
                velocity: b.velocity.into(),
                pinned: b.pinned,
            })
            .collect();
        Self { control_state, balls }
    }

    /// Check every field that would break an invariant once loaded.
    pub fn validate(&self) -> Result<(), StateError> {
        let ppm = self.control_state.pixels_per_meter;
        if !(ppm.is_finite() && ppm > 0.0) {
            return Err(StateError::InvalidZoom(ppm));
        }
        if !DVec2::from(self.control_state.camera_center).is_finite() {
            return Err(StateError::InvalidCameraCenter);
        }
        for (index, ball) in self.balls.iter().enumerate() {
            ball.validate(index)?;
        }
        Ok(())
    }

    /// Replace the sandbox contents. Nothing changes if validation fails.
    pub fn apply(&self, state: &mut SimulationState) -> Result<(), StateError> {
        self.validate()?;

        let controls = &self.control_state;
        state.camera.set_zoom(controls.pixels_per_meter);
        state.camera.center = controls.camera_center.into();
        state.config.gravitational_constant = controls.gravitational_constant.clone();
        state.config.force_law = controls.gravitation_formula;
        state.config.confined_box = controls.confined_box;
        state.config.mass_formula = controls.create_mass_formula;
        state.config.mass_value = controls.create_mass_value.clone();
        state.config.trace_length = controls.trace_ticks.clone();

        state.clear_bodies();
        for ball in &self.balls {
            let color = state.next_color();
            let body = Body::new(ball.center.into(), ball.radius, ball.mass)
                .with_velocity(ball.velocity.into())
                .with_pinned(ball.pinned)
                .with_color(color);
            state.bodies.insert(body);
        }
        log::info!("loaded {} bodies", self.balls.len());
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let saved: SavedState = serde_json::from_str(json)?;
        saved.validate()?;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> SimulationState {
        let mut s = SimulationState::default();
        let a = s.create_body(DVec2::new(-3.0, 1.5), 0.5).unwrap();
        let b = s.create_body(DVec2::new(2.0, -4.0), 1.25).unwrap();
        let c = s.create_body(DVec2::new(0.1, 0.2), 0.3).unwrap();
        s.set_velocity(a, DVec2::new(1.0, -0.25));
        s.set_pinned(b, true);
        s.scale_mass(c, 3.7);
        s.set_velocity(c, DVec2::new(-2.5, 8.0));
        s.set_gravity_text("1.5e-2");
        s.set_force_law(ForceLaw::InverseCube);
        s.set_confined_box(true);
        s.set_zoom(42.0);
        s.pan_camera(DVec2::new(3.0, -1.0));
        s
    }

    #[test]
    fn save_then_load_reproduces_physics_fields() {
        let original = populated();
        let json = SavedState::capture(&original).to_json().unwrap();

        let mut loaded = SimulationState::default();
        SavedState::from_json(&json).unwrap().apply(&mut loaded).unwrap();

        assert_eq!(loaded.bodies.len(), 3);
        for (a, b) in original.bodies.iter().zip(loaded.bodies.iter()) {
            assert_eq!(a.center, b.center);
            assert_eq!(a.radius, b.radius);
            assert_eq!(a.mass, b.mass);
            assert_eq!(a.velocity, b.velocity);
            assert_eq!(a.pinned, b.pinned);
            assert!(b.trace.is_empty());
        }
        assert_eq!(loaded.camera.pixels_per_meter, 42.0);
        assert_eq!(loaded.camera.center, DVec2::new(3.0, -1.0));
        assert_eq!(loaded.config.gravitational_constant, "1.5e-2");
        assert_eq!(loaded.config.force_law, ForceLaw::InverseCube);
        assert!(loaded.config.confined_box);
    }

    #[test]
    fn document_uses_camel_case_names() {
        let json = SavedState::capture(&populated()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let controls = &value["controlState"];
        assert_eq!(controls["pixelsPerMeter"], 42.0);
        assert_eq!(controls["gravitationFormula"], "inverseCube");
        assert_eq!(controls["cameraCenter"]["x"], 3.0);
        assert_eq!(value["balls"][1]["pinned"], true);
        assert!(value["balls"][0].get("color").is_none());
    }

    #[test]
    fn minimal_document_loads_with_defaults() {
        let json = r#"{
            "controlState": {
                "pixelsPerMeter": 100,
                "cameraCenter": {"x": 0, "y": 0},
                "gravitationalConstant": "6.67430e-1",
                "gravitationFormula": "inverseLinear",
                "confinedBox": false,
                "mode": "play"
            },
            "balls": [
                {"center": {"x": 1, "y": 2}, "radius": 1, "mass": 5, "velocity": {"x": 0, "y": 0}}
            ]
        }"#;
        let saved = SavedState::from_json(json).unwrap();
        assert_eq!(saved.control_state.trace_ticks, "500");
        assert!(!saved.balls[0].pinned);

        let mut state = SimulationState::default();
        saved.apply(&mut state).unwrap();
        assert_eq!(state.config.force_law, ForceLaw::InverseLinear);
        assert_eq!(state.bodies.as_slice()[0].mass, 5.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(SavedState::from_json("{"), Err(StateError::Json(_))));
    }

    #[test]
    fn invalid_ball_rejected_without_side_effects() {
        let mut saved = SavedState::capture(&populated());
        saved.balls[2].radius = 0.0;
        let mut state = populated();
        let before = state.bodies.len();

        let err = saved.apply(&mut state).unwrap_err();
        assert!(matches!(err, StateError::InvalidBall { index: 2, .. }), "{}", err);
        assert_eq!(state.bodies.len(), before);
    }

    #[test]
    fn invalid_zoom_rejected() {
        let mut saved = SavedState::capture(&populated());
        saved.control_state.pixels_per_meter = -1.0;
        assert!(matches!(saved.validate(), Err(StateError::InvalidZoom(_))));
    }

    #[test]
    fn load_clears_selection() {
        let saved = SavedState::capture(&populated());
        let mut state = populated();
        let first = state.bodies.id_at(0);
        state.set_selected(first);
        saved.apply(&mut state).unwrap();
        assert_eq!(state.selection.selected, None);
    }
}
