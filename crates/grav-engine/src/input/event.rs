use crate::api::types::PointerButton;

/// Keyboard shortcuts, already mapped from raw keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ReverseVelocity,
    ZeroVelocity,
    TogglePin,
    ToggleCenter,
    TogglePlayback,
}

impl KeyCommand {
    /// Map a DOM `KeyboardEvent.key` value. Unbound keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "r" | "R" => Some(KeyCommand::ReverseVelocity),
            "z" | "Z" | "0" => Some(KeyCommand::ZeroVelocity),
            "p" | "P" => Some(KeyCommand::TogglePin),
            "c" | "C" => Some(KeyCommand::ToggleCenter),
            " " => Some(KeyCommand::TogglePlayback),
            _ => None,
        }
    }
}

/// Input event types the sandbox understands. Coordinates are screen pixels
/// (origin top-left, Y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, button: PointerButton },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Wheel scroll; negative `delta_y` is "up".
    Wheel { delta_y: f64 },
    Key(KeyCommand),
}
