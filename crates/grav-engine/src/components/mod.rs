pub mod body;
pub mod color;
