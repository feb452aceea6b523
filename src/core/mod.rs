//! Core scheduling abstractions: selection policies and the rotation loop.

pub mod error;
pub mod policy;
pub mod scheduler;
pub mod store;

pub use error::{AppResult, ConfigError, RotationError, StoreError};
pub use policy::{PolicyKind, SelectionPolicy};
pub use scheduler::{RotationScheduler, ScheduleSnapshot};
pub use store::{PlaylistStore, Spawn, TagStore};
