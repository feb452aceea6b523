//! # Banner Rotation
//!
//! An interval-driven scheduler that rotates a displayed banner among a
//! curated list of tags.
//!
//! A single event loop owns the active schedule. Administrative calls
//! (`set`, `stop`, `next`, `status`) travel through its control channel, so
//! schedule state is never shared or locked.
//!
//! ## Key Features
//!
//! - **Selection policies**: `Shuffle` (random), `Cycle` (round-robin) and
//!   `Onceonly` (play through once, then stop)
//! - **Self-healing schedules**: tags deleted from the store mid-rotation are
//!   dropped and the tick retries with the remaining tags
//! - **Immediate effect**: an accepted schedule shows its first tag right away
//! - **Tolerant of flaky backends**: failed applies are logged and retried on
//!   the next tick
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use banner_rotation::config::RotationConfig;
//! use banner_rotation::core::{PolicyKind, RotationScheduler};
//! use banner_rotation::infra::InMemoryTagStore;
//! use banner_rotation::runtime::schedule_tags;
//!
//! let config = RotationConfig::from_env()?;
//! let store = Arc::new(InMemoryTagStore::new());
//! store.insert_tag("sunset", "owner", "https://img.example/sunset.png");
//!
//! let scheduler = RotationScheduler::start(Arc::clone(&store), &config);
//! let outcome = schedule_tags(&scheduler, &config, "30m", vec!["sunset".into()], PolicyKind::Cycle).await?;
//! ```
//!
//! For complete scenarios, see `tests/scheduler_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Selection policies, the rotation loop and collaborator traits.
pub mod core;
/// Configuration models and interval parsing.
pub mod config;
/// In-memory store adapters.
pub mod infra;
/// Runtime adapters and the administrative API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
