use glam::DVec2;
use serde::Serialize;

use crate::api::sandbox::SimulationState;
use crate::api::types::BodyId;
use crate::components::body::{density_of, Body};
use crate::physics::force::net_force;

/// Read-only figures for the info panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyInfo {
    /// `None` for a body that is still being drawn.
    pub id: Option<BodyId>,
    /// Position in iteration order (`len()` for a body not yet created).
    pub index: usize,
    pub center: DVec2,
    pub radius: f64,
    pub mass: f64,
    /// Density (or mass, under `Fixed`) for the edit panel.
    pub density: f64,
    pub velocity: DVec2,
    pub pinned: bool,
    /// Net attraction from every other body, when it applies.
    pub force: Option<DVec2>,
    /// `force / mass`, present whenever `force` is.
    pub acceleration: Option<DVec2>,
}

impl BodyInfo {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl SimulationState {
    /// Current figures for a body.
    pub fn inspect(&self, id: BodyId) -> Option<BodyInfo> {
        let body = self.bodies.get(id)?;
        self.inspect_as(id, body)
    }

    /// Figures for `id` as if it were replaced by `candidate`; the stored body
    /// is not touched. Used by live drag previews.
    pub fn inspect_as(&self, id: BodyId, candidate: &Body) -> Option<BodyInfo> {
        let index = self.bodies.index_of(id)?;
        let force = net_force(
            candidate,
            self.bodies.as_slice(),
            index,
            self.config.gravity(),
            self.config.force_law,
        );
        Some(BodyInfo {
            id: Some(id),
            index,
            center: candidate.center,
            radius: candidate.radius,
            mass: candidate.mass,
            density: density_of(self.config.mass_formula, candidate),
            velocity: candidate.velocity,
            pinned: candidate.pinned,
            force: Some(force),
            acceleration: Some(force / candidate.mass),
        })
    }
}
