pub mod boundary;
pub mod collision;
pub mod force;
pub mod integrator;

pub use collision::{elastic_velocities, resolve_collisions, resolve_pair};
pub use force::{all_forces, force_between, net_force};
pub use integrator::{sub_step, tick_time, StepParams, TickStats};
