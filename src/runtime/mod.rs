//! Runtime adapters and the administrative API surface.

pub mod admin;
pub mod tokio_spawner;

pub use admin::{
    schedule_playlist, schedule_tags, set_banner, skip_to_next, stop_rotation, BannerOutcome,
    ControlOutcome, ScheduleOutcome,
};
pub use tokio_spawner::TokioSpawner;
