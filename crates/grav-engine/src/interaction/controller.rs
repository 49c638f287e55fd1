//! Pointer, wheel and keyboard handling.
//!
//! The controller owns only the transient drag. Each press is mapped through
//! [`gesture_for`]; in-progress drags are shown through [`InteractionController::preview`]
//! and reach the authoritative state only on release.

use glam::DVec2;

use crate::api::sandbox::SimulationState;
use crate::api::types::{BodyId, PointerButton};
use crate::components::body::{mass_for_radius, rescale_mass};
use crate::input::event::{InputEvent, KeyCommand};
use crate::interaction::inspect::BodyInfo;
use crate::interaction::mode::{gesture_for, GestureKind, InteractionMode};
use crate::renderer::camera::View;

/// An in-progress pointer gesture. Points are in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub button: PointerButton,
    pub gesture: GestureKind,
    pub start: DVec2,
    pub current: DVec2,
    /// Body the gesture acts on, picked on press.
    pub target: Option<BodyId>,
}

impl DragState {
    pub fn screen_delta(&self) -> DVec2 {
        self.current - self.start
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    drag: Option<DragState>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Abandon the current drag without committing it.
    pub fn cancel(&mut self) {
        self.drag = None;
    }

    /// Screen delta of an active pan, for [`SimulationState::view`].
    pub fn pan_drag(&self) -> Option<DVec2> {
        self.drag
            .filter(|d| d.gesture == GestureKind::PanCamera)
            .map(|d| d.screen_delta())
    }

    /// The transform the user currently sees.
    pub fn view(&self, state: &SimulationState) -> View {
        state.view(self.pan_drag())
    }

    pub fn handle(&mut self, state: &mut SimulationState, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y, button } => self.on_pointer_down(state, DVec2::new(x, y), button),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(state, DVec2::new(x, y)),
            InputEvent::PointerUp { x, y } => self.on_pointer_up(state, DVec2::new(x, y)),
            InputEvent::Wheel { delta_y } => self.on_wheel(state, delta_y),
            InputEvent::Key(command) => self.on_key(state, command),
        }
    }

    pub fn on_pointer_down(&mut self, state: &mut SimulationState, screen: DVec2, button: PointerButton) {
        if self.drag.is_some() {
            return;
        }
        let Some(gesture) = gesture_for(state.mode(), button) else {
            return;
        };
        let world = self.view(state).screen_to_world(screen);
        let hit = state.bodies.body_at(world);

        if gesture.selects_on_press() {
            state.set_selected(hit);
        }

        let target = match gesture {
            GestureKind::DeleteBody => {
                if let Some(id) = hit {
                    state.delete_body(id);
                }
                return;
            }
            GestureKind::Select => return,
            // Pan is meaningless while the camera follows a body.
            GestureKind::PanCamera if state.centered_position().is_some() => return,
            GestureKind::PanCamera | GestureKind::CreateRadius => None,
            GestureKind::MoveBody
            | GestureKind::ResizeBody
            | GestureKind::SetVelocity
            | GestureKind::RotatePair => match hit {
                Some(id) => Some(id),
                None => return,
            },
        };

        log::debug!("drag start: {:?} on {:?}", gesture, target);
        self.drag = Some(DragState {
            button,
            gesture,
            start: screen,
            current: screen,
            target,
        });
    }

    pub fn on_pointer_move(&mut self, state: &mut SimulationState, screen: DVec2) {
        match self.drag.as_mut() {
            Some(drag) => drag.current = screen,
            None => {
                let world = self.view(state).screen_to_world(screen);
                let hit = state.bodies.body_at(world);
                state.set_highlighted(hit);
            }
        }
    }

    pub fn on_pointer_up(&mut self, state: &mut SimulationState, screen: DVec2) {
        // Resolve against the view seen during the drag, before it ends.
        let view = self.view(state);
        let Some(mut drag) = self.drag.take() else {
            return;
        };
        drag.current = screen;
        let world_delta = state.camera.screen_delta_to_world(drag.screen_delta());

        match (drag.gesture, drag.target) {
            (GestureKind::CreateRadius, _) => {
                let radius_px = drag.screen_delta().length();
                if radius_px < state.sandbox_config().min_create_radius_px {
                    log::debug!("create: {:.1}px drag discarded", radius_px);
                    return;
                }
                let center = view.screen_to_world(drag.start);
                let radius = state.camera.pixels_to_meters(radius_px);
                state.create_body(center, radius);
            }
            (GestureKind::PanCamera, _) => state.pan_camera(-world_delta),
            (GestureKind::MoveBody, Some(id)) => {
                state.move_body(id, world_delta);
            }
            (GestureKind::ResizeBody, Some(id)) => {
                if let Some(body) = state.bodies.get(id) {
                    let radius = view.screen_to_world(screen).distance(body.center);
                    state.resize_body(id, radius);
                }
            }
            (GestureKind::SetVelocity, Some(id)) => {
                let velocity = world_delta * state.sandbox_config().velocity_scale;
                state.set_velocity(id, velocity);
            }
            (GestureKind::RotatePair, Some(a)) => {
                if let Some(b) = state.bodies.body_at(view.screen_to_world(screen)) {
                    state.compute_rotation_velocities(a, b);
                }
            }
            _ => {}
        }
    }

    /// Wheel: in Edit mode over a body it re-weighs the selected (or hovered)
    /// body; otherwise it zooms. Ignored mid-drag.
    pub fn on_wheel(&mut self, state: &mut SimulationState, delta_y: f64) {
        if self.drag.is_some() || delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let notches = if delta_y < 0.0 { 1 } else { -1 };
        let sel = state.selection;
        let mass_target = sel
            .highlighted
            .filter(|_| state.mode() == InteractionMode::Edit)
            .map(|hovered| sel.selected.unwrap_or(hovered));

        match mass_target {
            Some(id) => {
                let factor = state.sandbox_config().zoom_step.powi(notches);
                state.scale_mass(id, factor);
            }
            None => {
                state.zoom_by(notches);
            }
        }
    }

    pub fn on_key(&mut self, state: &mut SimulationState, command: KeyCommand) {
        let selected = state.selection.selected;
        let editing = matches!(state.mode(), InteractionMode::Edit | InteractionMode::Velocity);
        match command {
            KeyCommand::ReverseVelocity | KeyCommand::ZeroVelocity | KeyCommand::TogglePin if !editing => {}
            KeyCommand::ReverseVelocity => {
                if let Some(id) = selected {
                    state.reverse_velocity(id);
                }
            }
            KeyCommand::ZeroVelocity => {
                if let Some(id) = selected {
                    state.zero_velocity(id);
                }
            }
            KeyCommand::TogglePin => {
                if let Some(id) = selected {
                    state.toggle_pin(id);
                }
            }
            KeyCommand::ToggleCenter => {
                if let Some(id) = selected.or(state.selection.centered) {
                    state.toggle_center_on(id);
                }
            }
            KeyCommand::TogglePlayback => {
                self.cancel();
                state.toggle_playback();
            }
        }
    }

    /// Info-panel figures: the live result of the current drag if there is
    /// one, else the selected body, else the hovered one. Never mutates.
    pub fn preview(&self, state: &SimulationState) -> Option<BodyInfo> {
        if let Some(drag) = &self.drag {
            if let Some(info) = self.drag_preview(state, drag) {
                return Some(info);
            }
        }
        let sel = state.selection;
        sel.selected
            .or(sel.highlighted)
            .and_then(|id| state.inspect(id))
    }

    fn drag_preview(&self, state: &SimulationState, drag: &DragState) -> Option<BodyInfo> {
        let view = self.view(state);
        let world_delta = state.camera.screen_delta_to_world(drag.screen_delta());

        if drag.gesture == GestureKind::CreateRadius {
            let radius = state.camera.pixels_to_meters(drag.screen_delta().length());
            let mass = mass_for_radius(state.config.mass_formula, state.config.mass_value(), radius);
            return Some(BodyInfo {
                id: None,
                index: state.bodies.len(),
                center: view.screen_to_world(drag.start),
                radius,
                mass,
                density: state.config.mass_value(),
                velocity: DVec2::ZERO,
                pinned: false,
                force: None,
                acceleration: None,
            });
        }

        let id = drag.target?;
        let mut candidate = state.bodies.get(id)?.clone();
        match drag.gesture {
            GestureKind::MoveBody => candidate.center += world_delta,
            GestureKind::ResizeBody => {
                let radius = view.screen_to_world(drag.current).distance(candidate.center);
                if radius > 0.0 {
                    candidate.mass = rescale_mass(state.config.mass_formula, candidate.radius, candidate.mass, radius);
                    candidate.radius = radius;
                }
            }
            GestureKind::SetVelocity => {
                candidate.velocity = world_delta * state.sandbox_config().velocity_scale;
            }
            _ => {}
        }
        state.inspect_as(id, &candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEFT: PointerButton = PointerButton::Primary;
    const RIGHT: PointerButton = PointerButton::Secondary;
    const MIDDLE: PointerButton = PointerButton::Middle;

    /// 800×600 viewport at 100 px/m: screen (400, 300) is the world origin.
    fn setup(mode: InteractionMode) -> (SimulationState, InteractionController) {
        let mut state = SimulationState::default();
        state.set_mode(mode);
        (state, InteractionController::new())
    }

    fn drag(
        ctl: &mut InteractionController,
        state: &mut SimulationState,
        from: (f64, f64),
        to: (f64, f64),
        button: PointerButton,
    ) {
        ctl.on_pointer_down(state, DVec2::new(from.0, from.1), button);
        ctl.on_pointer_move(state, DVec2::new(to.0, to.1));
        ctl.on_pointer_up(state, DVec2::new(to.0, to.1));
    }

    #[test]
    fn create_drag_makes_body() {
        let (mut state, mut ctl) = setup(InteractionMode::Create);
        drag(&mut ctl, &mut state, (400.0, 300.0), (450.0, 300.0), LEFT);
        assert_eq!(state.bodies.len(), 1);
        let body = &state.bodies.as_slice()[0];
        assert!(body.center.length() < 1e-12);
        assert!((body.radius - 0.5).abs() < 1e-12);
    }

    #[test]
    fn short_create_drag_is_discarded() {
        let (mut state, mut ctl) = setup(InteractionMode::Create);
        drag(&mut ctl, &mut state, (400.0, 300.0), (403.0, 300.0), LEFT);
        assert!(state.bodies.is_empty());
    }

    #[test]
    fn create_preview_does_not_mutate() {
        let (mut state, mut ctl) = setup(InteractionMode::Create);
        ctl.on_pointer_down(&mut state, DVec2::new(400.0, 300.0), LEFT);
        ctl.on_pointer_move(&mut state, DVec2::new(400.0, 200.0));
        let info = ctl.preview(&state).unwrap();
        assert_eq!(info.id, None);
        assert!((info.radius - 1.0).abs() < 1e-12);
        assert!(state.bodies.is_empty());
    }

    #[test]
    fn secondary_click_deletes_in_create_mode() {
        let (mut state, mut ctl) = setup(InteractionMode::Create);
        state.create_body(DVec2::ZERO, 1.0);
        ctl.on_pointer_down(&mut state, DVec2::new(410.0, 300.0), RIGHT);
        assert!(state.bodies.is_empty());
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn edit_move_commits_on_release() {
        let (mut state, mut ctl) = setup(InteractionMode::Edit);
        let id = state.create_body(DVec2::ZERO, 1.0).unwrap();

        ctl.on_pointer_down(&mut state, DVec2::new(400.0, 300.0), LEFT);
        assert_eq!(state.selection.selected, Some(id));
        ctl.on_pointer_move(&mut state, DVec2::new(500.0, 200.0));
        // Preview shows the new place, state still has the old one.
        assert_eq!(ctl.preview(&state).unwrap().center, DVec2::new(1.0, 1.0));
        assert_eq!(state.bodies.get(id).unwrap().center, DVec2::ZERO);

        ctl.on_pointer_up(&mut state, DVec2::new(500.0, 200.0));
        assert!((state.bodies.get(id).unwrap().center - DVec2::new(1.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn edit_resize_rescales_mass() {
        let (mut state, mut ctl) = setup(InteractionMode::Edit);
        let id = state.create_body(DVec2::ZERO, 1.0).unwrap();
        let mass = state.bodies.get(id).unwrap().mass;
        drag(&mut ctl, &mut state, (450.0, 300.0), (600.0, 300.0), RIGHT);
        let body = state.bodies.get(id).unwrap();
        assert!((body.radius - 2.0).abs() < 1e-12);
        assert!((body.mass - 8.0 * mass).abs() < 1e-9);
    }

    #[test]
    fn press_on_empty_space_deselects() {
        let (mut state, mut ctl) = setup(InteractionMode::Pause);
        let id = state.create_body(DVec2::ZERO, 1.0).unwrap();
        ctl.on_pointer_down(&mut state, DVec2::new(400.0, 300.0), LEFT);
        ctl.on_pointer_up(&mut state, DVec2::new(400.0, 300.0));
        assert_eq!(state.selection.selected, Some(id));
        ctl.on_pointer_down(&mut state, DVec2::new(10.0, 10.0), LEFT);
        assert_eq!(state.selection.selected, None);
    }

    #[test]
    fn velocity_drag_sets_velocity() {
        let (mut state, mut ctl) = setup(InteractionMode::Velocity);
        let id = state.create_body(DVec2::ZERO, 1.0).unwrap();
        drag(&mut ctl, &mut state, (400.0, 300.0), (600.0, 250.0), LEFT);
        let v = state.bodies.get(id).unwrap().velocity;
        assert!((v - DVec2::new(2.0, 0.5)).length() < 1e-12);
    }

    #[test]
    fn rotate_pair_from_one_body_to_another() {
        let (mut state, mut ctl) = setup(InteractionMode::Velocity);
        state.set_gravity_text("1");
        let a = state.create_body(DVec2::new(-1.0, 0.0), 0.2).unwrap();
        let b = state.create_body(DVec2::new(1.0, 0.0), 0.2).unwrap();
        drag(&mut ctl, &mut state, (300.0, 300.0), (500.0, 300.0), RIGHT);
        assert!(state.bodies.get(a).unwrap().velocity.y < 0.0);
        assert!(state.bodies.get(b).unwrap().velocity.y > 0.0);
    }

    #[test]
    fn rotate_pair_released_on_nothing_is_noop() {
        let (mut state, mut ctl) = setup(InteractionMode::Velocity);
        let a = state.create_body(DVec2::new(-1.0, 0.0), 0.2).unwrap();
        drag(&mut ctl, &mut state, (300.0, 300.0), (700.0, 50.0), RIGHT);
        assert_eq!(state.bodies.get(a).unwrap().velocity, DVec2::ZERO);
    }

    #[test]
    fn middle_drag_pans_camera() {
        let (mut state, mut ctl) = setup(InteractionMode::Pause);
        ctl.on_pointer_down(&mut state, DVec2::new(400.0, 300.0), MIDDLE);
        ctl.on_pointer_move(&mut state, DVec2::new(500.0, 300.0));
        // The live view already moved; the stored center has not.
        assert!((ctl.view(&state).center - DVec2::new(-1.0, 0.0)).length() < 1e-12);
        assert_eq!(state.camera.center, DVec2::ZERO);
        ctl.on_pointer_up(&mut state, DVec2::new(500.0, 300.0));
        assert!((state.camera.center - DVec2::new(-1.0, 0.0)).length() < 1e-12);
        assert!(ctl.pan_drag().is_none());
    }

    #[test]
    fn pan_ignored_while_centered() {
        let (mut state, mut ctl) = setup(InteractionMode::Pause);
        let id = state.create_body(DVec2::new(2.0, 2.0), 1.0).unwrap();
        state.toggle_center_on(id);
        drag(&mut ctl, &mut state, (400.0, 300.0), (500.0, 300.0), MIDDLE);
        assert_eq!(state.camera.center, DVec2::ZERO);
    }

    #[test]
    fn hover_highlights() {
        let (mut state, mut ctl) = setup(InteractionMode::Pause);
        let id = state.create_body(DVec2::ZERO, 1.0).unwrap();
        ctl.on_pointer_move(&mut state, DVec2::new(420.0, 310.0));
        assert_eq!(state.selection.highlighted, Some(id));
        ctl.on_pointer_move(&mut state, DVec2::new(10.0, 10.0));
        assert_eq!(state.selection.highlighted, None);
    }

    #[test]
    fn wheel_zooms_or_scales_mass() {
        let (mut state, mut ctl) = setup(InteractionMode::Edit);
        let id = state.create_body(DVec2::ZERO, 1.0).unwrap();
        let mass = state.bodies.get(id).unwrap().mass;

        ctl.on_wheel(&mut state, -1.0);
        assert!((state.camera.pixels_per_meter - 110.0).abs() < 1e-9);

        ctl.on_pointer_move(&mut state, DVec2::new(400.0, 300.0));
        ctl.on_wheel(&mut state, -1.0);
        assert!((state.bodies.get(id).unwrap().mass - mass * 1.1).abs() < 1e-9);
        assert!((state.camera.pixels_per_meter - 110.0).abs() < 1e-9);
    }

    #[test]
    fn wheel_ignored_mid_drag() {
        let (mut state, mut ctl) = setup(InteractionMode::Create);
        ctl.on_pointer_down(&mut state, DVec2::new(400.0, 300.0), LEFT);
        ctl.on_wheel(&mut state, -1.0);
        assert_eq!(state.camera.pixels_per_meter, 100.0);
    }

    #[test]
    fn keys_act_on_selection_in_edit_modes() {
        let (mut state, mut ctl) = setup(InteractionMode::Velocity);
        let id = state.create_body(DVec2::ZERO, 1.0).unwrap();
        state.set_selected(Some(id));
        state.set_velocity(id, DVec2::new(1.0, 0.0));

        ctl.on_key(&mut state, KeyCommand::ReverseVelocity);
        assert_eq!(state.bodies.get(id).unwrap().velocity, DVec2::new(-1.0, 0.0));
        ctl.on_key(&mut state, KeyCommand::TogglePin);
        assert!(state.bodies.get(id).unwrap().pinned);

        state.set_mode(InteractionMode::Pause);
        ctl.on_key(&mut state, KeyCommand::TogglePin);
        assert!(state.bodies.get(id).unwrap().pinned);
    }

    #[test]
    fn handle_dispatches_events() {
        let (mut state, mut ctl) = setup(InteractionMode::Create);
        ctl.handle(&mut state, InputEvent::PointerDown { x: 400.0, y: 300.0, button: LEFT });
        ctl.handle(&mut state, InputEvent::PointerMove { x: 400.0, y: 350.0 });
        ctl.handle(&mut state, InputEvent::PointerUp { x: 400.0, y: 350.0 });
        assert_eq!(state.bodies.len(), 1);
        ctl.handle(&mut state, InputEvent::Key(KeyCommand::TogglePlayback));
        assert_eq!(state.mode(), InteractionMode::Pause);
    }
}
