pub mod bodies;
pub mod time;
pub mod vector;
