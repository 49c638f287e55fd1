use glam::DVec2;

use crate::api::config::{SandboxConfig, SimulationConfig};
use crate::api::types::BodyId;
use crate::components::color::{BodyColor, Rng};
use crate::core::bodies::BodySet;
use crate::core::time::SimClock;
use crate::interaction::mode::InteractionMode;
use crate::physics::integrator::{tick_time, StepParams, TickStats};
use crate::renderer::camera::{Camera, View};

/// Which bodies the user is pointing at. Ids that no longer resolve are
/// treated as `None` everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Target of edits and keyboard commands.
    pub selected: Option<BodyId>,
    /// Body under the pointer.
    pub highlighted: Option<BodyId>,
    /// Body the camera follows.
    pub centered: Option<BodyId>,
}

impl Selection {
    pub fn clear(&mut self) {
        *self = Selection::default();
    }

    /// Drop every reference to `id`.
    pub fn forget(&mut self, id: BodyId) {
        for slot in [&mut self.selected, &mut self.highlighted, &mut self.centered] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }
}

/// The single authoritative state of a sandbox.
///
/// The integrator tick and every interaction operation take `&mut self` and
/// run to completion, so there is exactly one writer at any time. Readers
/// that need a stable view across a tick take `bodies.snapshot()`.
pub struct SimulationState {
    pub bodies: BodySet,
    pub config: SimulationConfig,
    pub camera: Camera,
    pub selection: Selection,
    sandbox: SandboxConfig,
    mode: InteractionMode,
    clock: SimClock,
    rng: Rng,
}

impl SimulationState {
    pub fn new(sandbox: SandboxConfig) -> Self {
        let mut clock = SimClock::new(sandbox.fixed_dt);
        let mode = InteractionMode::default();
        if mode.runs_simulation() {
            clock.start();
        }
        Self {
            bodies: BodySet::new(),
            config: SimulationConfig::default(),
            camera: Camera::new(sandbox.viewport_width, sandbox.viewport_height),
            selection: Selection::default(),
            rng: Rng::new(sandbox.rng_seed),
            clock,
            mode,
            sandbox,
        }
    }

    pub fn sandbox_config(&self) -> &SandboxConfig {
        &self.sandbox
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Switch interaction mode. The scheduler follows the mode immediately;
    /// entering Create clears the selection and camera tracking.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == self.mode {
            return;
        }
        log::info!("mode: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        if mode.runs_simulation() {
            self.clock.start();
        } else {
            self.clock.stop();
        }
        if mode == InteractionMode::Create {
            self.selection.clear();
        }
    }

    pub fn toggle_playback(&mut self) {
        self.set_mode(self.mode.toggled_playback());
    }

    /// Current position of the centered body, if it still exists.
    pub fn centered_position(&self) -> Option<DVec2> {
        self.selection
            .centered
            .and_then(|id| self.bodies.get(id))
            .map(|b| b.center)
    }

    /// Resolve this frame's transform. `pan_drag` is the screen delta of an
    /// in-progress pan gesture.
    pub fn view(&self, pan_drag: Option<DVec2>) -> View {
        self.camera.view(self.centered_position(), pan_drag)
    }

    /// Run one integrator tick of `fixed_dt` seconds.
    pub fn step(&mut self, pan_drag: Option<DVec2>) -> TickStats {
        let bounds = self.view(pan_drag).world_viewport();
        let params = StepParams::from_config(&self.config, bounds);
        tick_time(&mut self.bodies, &params, self.clock.dt(), self.sandbox.split_count)
    }

    /// Feed a frame delta to the scheduler and run every tick that is due.
    /// Returns the number of ticks run (always 0 outside Play).
    pub fn advance(&mut self, frame_dt: f64, pan_drag: Option<DVec2>) -> u32 {
        let due = self.clock.advance(frame_dt);
        for _ in 0..due {
            self.step(pan_drag);
        }
        due
    }

    pub(crate) fn next_color(&mut self) -> BodyColor {
        self.rng.pastel()
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(SandboxConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::body::Body;

    #[test]
    fn starts_in_play_with_running_clock() {
        let state = SimulationState::default();
        assert_eq!(state.mode(), InteractionMode::Play);
        assert!(state.clock().is_running());
    }

    #[test]
    fn pause_stops_ticks() {
        let mut state = SimulationState::default();
        let id = state.bodies.insert(Body::new(DVec2::ZERO, 0.1, 1.0).with_velocity(DVec2::X));
        state.set_mode(InteractionMode::Pause);
        assert_eq!(state.advance(1.0, None), 0);
        assert_eq!(state.bodies.get(id).unwrap().center, DVec2::ZERO);

        state.set_mode(InteractionMode::Play);
        assert_eq!(state.advance(0.1 + 1e-9, None), 3);
        assert!(state.bodies.get(id).unwrap().center.x > 0.0);
    }

    #[test]
    fn entering_create_clears_selection() {
        let mut state = SimulationState::default();
        let id = state.bodies.insert(Body::new(DVec2::ZERO, 1.0, 1.0));
        state.selection.selected = Some(id);
        state.selection.centered = Some(id);
        state.set_mode(InteractionMode::Edit);
        assert_eq!(state.selection.selected, Some(id));
        state.set_mode(InteractionMode::Create);
        assert_eq!(state.selection, Selection::default());
    }

    #[test]
    fn view_follows_centered_body() {
        let mut state = SimulationState::default();
        let id = state.bodies.insert(Body::new(DVec2::new(3.0, -2.0), 1.0, 1.0));
        state.selection.centered = Some(id);
        assert_eq!(state.view(Some(DVec2::new(50.0, 0.0))).center, DVec2::new(3.0, -2.0));

        state.bodies.remove(id);
        assert_eq!(state.view(None).center, state.camera.center);
    }

    #[test]
    fn forget_clears_all_slots() {
        let mut sel = Selection {
            selected: Some(BodyId(1)),
            highlighted: Some(BodyId(2)),
            centered: Some(BodyId(1)),
        };
        sel.forget(BodyId(1));
        assert_eq!(sel.selected, None);
        assert_eq!(sel.centered, None);
        assert_eq!(sel.highlighted, Some(BodyId(2)));
    }
}
