pub mod state;

pub use state::{Point, SavedBall, SavedControls, SavedState, StateError};
