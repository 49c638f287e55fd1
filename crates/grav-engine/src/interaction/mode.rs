use serde::{Deserialize, Serialize};

use crate::api::types::PointerButton;

/// What pointer gestures mean right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionMode {
    /// Simulation running.
    #[default]
    Play,
    /// Simulation stopped; selection still works.
    Pause,
    /// Paint new bodies, delete with the secondary button.
    Create,
    /// Move, resize and re-weigh bodies.
    Edit,
    /// Set velocities by dragging.
    Velocity,
}

impl InteractionMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "play" => Some(InteractionMode::Play),
            "pause" => Some(InteractionMode::Pause),
            "create" => Some(InteractionMode::Create),
            "edit" => Some(InteractionMode::Edit),
            "velocity" => Some(InteractionMode::Velocity),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InteractionMode::Play => "play",
            InteractionMode::Pause => "pause",
            InteractionMode::Create => "create",
            InteractionMode::Edit => "edit",
            InteractionMode::Velocity => "velocity",
        }
    }

    /// The scheduler runs only in this mode.
    pub fn runs_simulation(self) -> bool {
        self == InteractionMode::Play
    }

    /// Play and Pause share the same gestures.
    pub fn is_playback(self) -> bool {
        matches!(self, InteractionMode::Play | InteractionMode::Pause)
    }

    /// Play ⇄ Pause. Any other mode enters Pause.
    pub fn toggled_playback(self) -> Self {
        match self {
            InteractionMode::Pause => InteractionMode::Play,
            _ => InteractionMode::Pause,
        }
    }
}

/// Semantic meaning of a pointer drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    PanCamera,
    CreateRadius,
    DeleteBody,
    MoveBody,
    ResizeBody,
    Select,
    SetVelocity,
    RotatePair,
}

impl GestureKind {
    /// Gestures that pick a body under the pointer as their target on press.
    pub fn selects_on_press(self) -> bool {
        matches!(
            self,
            GestureKind::MoveBody
                | GestureKind::ResizeBody
                | GestureKind::Select
                | GestureKind::SetVelocity
                | GestureKind::RotatePair
        )
    }
}

/// The `(mode, button) → gesture` dispatch table. `None` means the press is
/// ignored.
pub fn gesture_for(mode: InteractionMode, button: PointerButton) -> Option<GestureKind> {
    use GestureKind::*;
    use InteractionMode::*;
    use PointerButton::*;

    match (mode, button) {
        (_, Middle) => Some(PanCamera),
        (Create, Primary) => Some(CreateRadius),
        (Create, Secondary) => Some(DeleteBody),
        (Edit, Primary) => Some(MoveBody),
        (Edit, Secondary) => Some(ResizeBody),
        (Play | Pause, Primary) => Some(Select),
        (Play | Pause, Secondary) => None,
        (Velocity, Primary) => Some(SetVelocity),
        (Velocity, Secondary) => Some(RotatePair),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_button_pans_everywhere() {
        for mode in [
            InteractionMode::Play,
            InteractionMode::Pause,
            InteractionMode::Create,
            InteractionMode::Edit,
            InteractionMode::Velocity,
        ] {
            assert_eq!(gesture_for(mode, PointerButton::Middle), Some(GestureKind::PanCamera));
        }
    }

    #[test]
    fn mode_specific_gestures() {
        assert_eq!(
            gesture_for(InteractionMode::Create, PointerButton::Secondary),
            Some(GestureKind::DeleteBody)
        );
        assert_eq!(
            gesture_for(InteractionMode::Edit, PointerButton::Secondary),
            Some(GestureKind::ResizeBody)
        );
        assert_eq!(
            gesture_for(InteractionMode::Velocity, PointerButton::Secondary),
            Some(GestureKind::RotatePair)
        );
        assert_eq!(gesture_for(InteractionMode::Pause, PointerButton::Secondary), None);
    }

    #[test]
    fn names_round_trip() {
        for mode in [InteractionMode::Play, InteractionMode::Create, InteractionMode::Velocity] {
            assert_eq!(InteractionMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(InteractionMode::from_name("dance"), None);
    }

    #[test]
    fn playback_toggle() {
        assert_eq!(InteractionMode::Play.toggled_playback(), InteractionMode::Pause);
        assert_eq!(InteractionMode::Pause.toggled_playback(), InteractionMode::Play);
        assert_eq!(InteractionMode::Edit.toggled_playback(), InteractionMode::Pause);
        assert!(InteractionMode::Play.runs_simulation());
        assert!(!InteractionMode::Pause.runs_simulation());
    }
}
