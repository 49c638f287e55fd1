pub mod controller;
pub mod inspect;
pub mod mode;
pub mod ops;

pub use controller::{DragState, InteractionController};
pub use inspect::BodyInfo;
pub use mode::{gesture_for, GestureKind, InteractionMode};
