pub mod camera;
pub mod instance;

// Re-export key types for convenient access
pub use camera::{Camera, View, WorldRect};
pub use instance::{BodyInstance, InstanceBuffer, TraceVertex};
