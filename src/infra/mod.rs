//! Infrastructure adapters for the collaborator traits.

pub mod memory;

pub use memory::{image_type, InMemoryTagStore, Tag};
