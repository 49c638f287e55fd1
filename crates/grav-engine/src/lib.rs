pub mod api;
pub mod components;
pub mod core;
pub mod input;
pub mod interaction;
pub mod persist;
pub mod physics;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use glam::DVec2;
pub use api::config::{SandboxConfig, SimulationConfig, TraceDisplay};
pub use api::sandbox::{Selection, SimulationState};
pub use api::types::{BodyId, ForceLaw, MassFormula, PointerButton};
pub use components::body::Body;
pub use components::color::BodyColor;
pub use crate::core::bodies::BodySet;
pub use crate::core::time::{ClockState, FixedTimestep, SimClock};
pub use input::event::{InputEvent, KeyCommand};
pub use interaction::{BodyInfo, DragState, GestureKind, InteractionController, InteractionMode};
pub use persist::{SavedState, StateError};
pub use physics::{StepParams, TickStats};
pub use renderer::{BodyInstance, Camera, InstanceBuffer, TraceVertex, View, WorldRect};
