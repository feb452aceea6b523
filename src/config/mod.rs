//! Configuration models and interval parsing.

pub mod interval;
pub mod rotation;

pub use interval::parse_interval;
pub use rotation::RotationConfig;
