//! Administrative surface used by the command layer.
//!
//! Turns raw command arguments into scheduler calls and maps the results to
//! response models the command layer can render.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{parse_interval, RotationConfig};
use crate::core::{
    PlaylistStore, PolicyKind, RotationError, RotationScheduler, StoreError, TagStore,
};

/// Result of a schedule request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ScheduleOutcome {
    /// Schedule installed and first tag shown.
    Accepted,
    /// Timespec could not be parsed.
    UnparsableInterval {
        /// Raw timespec as given.
        timespec: String,
    },
    /// Interval below the configured minimum.
    IntervalTooShort {
        /// Minimum accepted interval in seconds.
        min_secs: u64,
    },
    /// Empty list, or at least one tag unknown to the store.
    UnknownTags,
}

/// Result of a stop or skip request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlOutcome {
    /// The request acted on an active schedule.
    Done,
    /// Nothing was scheduled.
    NoActiveSchedule,
}

impl From<bool> for ControlOutcome {
    fn from(was_active: bool) -> Self {
        if was_active {
            Self::Done
        } else {
            Self::NoActiveSchedule
        }
    }
}

/// Result of showing a single banner by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum BannerOutcome {
    /// Banner applied.
    Applied {
        /// Whether a rotation was running and got stopped first.
        rotation_stopped: bool,
    },
    /// No such tag. The rotation is stopped regardless.
    UnknownTag {
        /// Whether a rotation was running and got stopped first.
        rotation_stopped: bool,
    },
}

/// Schedule `tags` every `timespec` using `kind`.
///
/// # Errors
///
/// Propagates store lookup failures and loop shutdown from
/// [`RotationScheduler::set`].
pub async fn schedule_tags<S: TagStore>(
    scheduler: &RotationScheduler<S>,
    config: &RotationConfig,
    timespec: &str,
    tags: Vec<String>,
    kind: PolicyKind,
) -> Result<ScheduleOutcome, RotationError> {
    let Ok(interval) = parse_interval(timespec) else {
        debug!(timespec, "unparsable interval");
        return Ok(ScheduleOutcome::UnparsableInterval {
            timespec: timespec.to_string(),
        });
    };

    if interval < config.min_interval() {
        return Ok(ScheduleOutcome::IntervalTooShort {
            min_secs: config.min_interval_secs,
        });
    }

    if scheduler.set(interval, tags, kind).await? {
        Ok(ScheduleOutcome::Accepted)
    } else {
        Ok(ScheduleOutcome::UnknownTags)
    }
}

/// Schedule the tags of `playlist`. A missing playlist reports `UnknownTags`.
///
/// # Errors
///
/// Propagates playlist lookup failures and errors from [`schedule_tags`].
pub async fn schedule_playlist<S: TagStore, P: PlaylistStore + ?Sized>(
    scheduler: &RotationScheduler<S>,
    playlists: &P,
    config: &RotationConfig,
    timespec: &str,
    playlist: &str,
    kind: PolicyKind,
) -> Result<ScheduleOutcome, RotationError> {
    let tags = playlists.playlist_tags(playlist).await?;
    schedule_tags(scheduler, config, timespec, tags, kind).await
}

/// Stop the rotation.
///
/// # Errors
///
/// Returns `RotationError::Shutdown` if the loop is gone.
pub async fn stop_rotation<S: TagStore>(
    scheduler: &RotationScheduler<S>,
) -> Result<ControlOutcome, RotationError> {
    scheduler.stop().await.map(ControlOutcome::from)
}

/// Skip to the next tag.
///
/// # Errors
///
/// Returns `RotationError::Shutdown` if the loop is gone.
pub async fn skip_to_next<S: TagStore>(
    scheduler: &RotationScheduler<S>,
) -> Result<ControlOutcome, RotationError> {
    scheduler.next().await.map(ControlOutcome::from)
}

/// Stop the rotation, then show `tag` once.
///
/// # Errors
///
/// Returns `RotationError::Store` when the apply fails for a reason other
/// than a missing tag, and `RotationError::Shutdown` if the loop is gone.
pub async fn set_banner<S: TagStore>(
    scheduler: &RotationScheduler<S>,
    tag: &str,
) -> Result<BannerOutcome, RotationError> {
    let rotation_stopped = scheduler.stop().await?;

    match scheduler.store().apply(tag).await {
        Ok(()) => {
            info!(tag, rotation_stopped, "banner set by hand");
            Ok(BannerOutcome::Applied { rotation_stopped })
        }
        Err(StoreError::UnknownTag(_)) => {
            debug!(tag, "manual banner names an unknown tag");
            Ok(BannerOutcome::UnknownTag { rotation_stopped })
        }
        Err(e) => Err(e.into()),
    }
}
