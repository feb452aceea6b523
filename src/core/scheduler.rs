//! Rotation scheduler: a single event loop owning the active schedule.
//!
//! The loop is the only code that reads or mutates schedule state (item
//! list, policy cursor, armed timer). Handles talk to it exclusively through
//! the control channel, so no lock guards the schedule.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use banner_rotation::config::RotationConfig;
//! use banner_rotation::core::{PolicyKind, RotationScheduler};
//!
//! let scheduler = RotationScheduler::start(Arc::new(store), &RotationConfig::default());
//! let accepted = scheduler
//!     .set(Duration::from_secs(900), vec!["sunset".into(), "harbor".into()], PolicyKind::Cycle)
//!     .await?;
//! scheduler.next().await?;
//! scheduler.stop().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::RotationConfig;
use crate::core::{PolicyKind, RotationError, SelectionPolicy, Spawn, TagStore};

/// Longest period handed to the timer. Longer intervals still install but
/// never fire on their own within this bound.
const MAX_TIMER_PERIOD: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// The active rotation configuration. Lives inside the event loop only.
#[derive(Debug)]
struct Schedule {
    id: Uuid,
    interval: Duration,
    items: Vec<String>,
    policy: SelectionPolicy,
}

/// Read-only view of the active schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    /// Identifier assigned when the schedule was installed.
    pub id: Uuid,
    /// Milliseconds between ticks, saturating at `u64::MAX`.
    pub interval_ms: u64,
    /// Remaining items, in order.
    pub items: Vec<String>,
    /// Policy driving the rotation.
    pub policy: PolicyKind,
}

/// Result of resolving one tick against the store.
enum Pick {
    /// A confirmed existing tag; the cursor has already advanced.
    Tag(String),
    /// The policy has nothing more to show.
    Exhausted,
    /// Every item turned out to be invalid.
    Drained,
}

impl Schedule {
    fn new(interval: Duration, items: Vec<String>, kind: PolicyKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            interval,
            items,
            policy: kind.build(),
        }
    }

    fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot {
            id: self.id,
            interval_ms: saturating_millis(self.interval),
            items: self.items.clone(),
            policy: self.policy.kind(),
        }
    }

    /// Pick until a tag the store confirms, dropping stale tags one at a time.
    async fn resolve<S: TagStore + ?Sized>(&mut self, store: &S) -> Pick {
        loop {
            let Some(tag) = self.policy.pick(&self.items).map(str::to_owned) else {
                return Pick::Exhausted;
            };

            match store.exists(&tag).await {
                Ok(true) => {
                    self.policy.on_success();
                    return Pick::Tag(tag);
                }
                Ok(false) => {
                    debug!(schedule_id = %self.id, tag = %tag, "tag vanished from store; dropping");
                }
                Err(e) => {
                    warn!(schedule_id = %self.id, tag = %tag, error = %e, "tag lookup failed; dropping");
                }
            }

            if let Some(pos) = self.items.iter().position(|t| *t == tag) {
                self.items.remove(pos);
            }
            if self.items.is_empty() {
                return Pick::Drained;
            }
        }
    }
}

/// Messages accepted by the event loop.
enum Control {
    /// Replace the schedule, re-arm the timer and tick immediately.
    Reconfigure {
        schedule: Schedule,
        ack: oneshot::Sender<()>,
    },
    /// Drop the schedule and disarm the timer; replies with the prior active flag.
    Stop { reply: oneshot::Sender<bool> },
    /// Tick now if active; replies with the prior active flag.
    Next { reply: oneshot::Sender<bool> },
    /// Report the active schedule, if any.
    Status {
        reply: oneshot::Sender<Option<ScheduleSnapshot>>,
    },
}

/// Handle to the rotation event loop.
///
/// Cheap to clone. The loop exits once every handle has been dropped.
pub struct RotationScheduler<S: TagStore> {
    tx: mpsc::Sender<Control>,
    store: Arc<S>,
}

impl<S: TagStore> Clone for RotationScheduler<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TagStore> RotationScheduler<S> {
    /// Start the event loop on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn start(store: Arc<S>, config: &RotationConfig) -> Self {
        Self::start_with(store, config, &CurrentRuntime)
    }

    /// Start the event loop on the given spawner.
    pub fn start_with<Sp: Spawn>(store: Arc<S>, config: &RotationConfig, spawner: &Sp) -> Self {
        let (tx, rx) = mpsc::channel(config.control_capacity.max(1));
        let event_loop = RotationLoop {
            store: Arc::clone(&store),
            schedule: None,
            ticker: None,
        };
        spawner.spawn(event_loop.run(rx));
        info!(
            control_capacity = config.control_capacity,
            "rotation scheduler started"
        );
        Self { tx, store }
    }

    /// Install a new schedule.
    ///
    /// Any prior schedule is stopped first, whatever the outcome. Returns
    /// `Ok(false)` for an empty list or when any tag is unknown to the
    /// store, and `Err(RotationError::Store)` when a lookup fails. On
    /// acceptance the loop ticks once immediately, then every `interval`.
    ///
    /// # Errors
    ///
    /// - `RotationError::InvalidInterval` for a zero interval
    /// - `RotationError::Store` if a validation lookup fails
    /// - `RotationError::Shutdown` if the loop is gone
    pub async fn set(
        &self,
        interval: Duration,
        items: Vec<String>,
        kind: PolicyKind,
    ) -> Result<bool, RotationError> {
        if interval.is_zero() {
            return Err(RotationError::InvalidInterval);
        }

        self.stop().await?;

        if items.is_empty() {
            debug!("rejecting schedule with no tags");
            return Ok(false);
        }

        for tag in &items {
            if !self.store.exists(tag).await? {
                debug!(tag = %tag, "rejecting schedule with unknown tag");
                return Ok(false);
            }
        }

        let schedule = Schedule::new(interval, items, kind);
        self.request(|ack| Control::Reconfigure { schedule, ack })
            .await?;
        Ok(true)
    }

    /// Stop the active schedule. Returns whether one was active.
    ///
    /// Resolves only after the loop has disarmed the timer. An apply already
    /// in flight is not interrupted.
    ///
    /// # Errors
    ///
    /// Returns `RotationError::Shutdown` if the loop is gone.
    pub async fn stop(&self) -> Result<bool, RotationError> {
        self.request(|reply| Control::Stop { reply }).await
    }

    /// Advance to the next tag now. Returns `false` without side effects
    /// when no schedule is active.
    ///
    /// # Errors
    ///
    /// Returns `RotationError::Shutdown` if the loop is gone.
    pub async fn next(&self) -> Result<bool, RotationError> {
        self.request(|reply| Control::Next { reply }).await
    }

    /// Snapshot of the active schedule, or `None` when inactive.
    ///
    /// # Errors
    ///
    /// Returns `RotationError::Shutdown` if the loop is gone.
    pub async fn status(&self) -> Result<Option<ScheduleSnapshot>, RotationError> {
        self.request(|reply| Control::Status { reply }).await
    }

    /// The tag store this scheduler validates and applies against.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Control,
    ) -> Result<T, RotationError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| RotationError::Shutdown)?;
        response.await.map_err(|_| RotationError::Shutdown)
    }
}

/// Spawner for the ambient tokio runtime.
struct CurrentRuntime;

impl Spawn for CurrentRuntime {
    fn spawn<F>(&self, fut: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(fut);
    }
}

/// State owned by the event loop task.
struct RotationLoop<S> {
    store: Arc<S>,
    schedule: Option<Schedule>,
    ticker: Option<Interval>,
}

impl<S: TagStore> RotationLoop<S> {
    async fn run(mut self, mut rx: mpsc::Receiver<Control>) {
        loop {
            tokio::select! {
                () = next_fire(&mut self.ticker) => {
                    debug!("rotation timer fired");
                    self.tick().await;
                }
                msg = rx.recv() => {
                    let Some(msg) = msg else {
                        break;
                    };
                    self.handle(msg).await;
                }
            }
        }
        info!("rotation loop exiting");
    }

    async fn handle(&mut self, msg: Control) {
        match msg {
            Control::Reconfigure { schedule, ack } => {
                self.install(schedule);
                let _ = ack.send(());
                self.tick().await;
            }
            Control::Stop { reply } => {
                let was_active = self.deactivate("stop requested");
                let _ = reply.send(was_active);
            }
            Control::Next { reply } => {
                if self.schedule.is_none() {
                    let _ = reply.send(false);
                    return;
                }
                self.tick().await;
                let _ = reply.send(true);
            }
            Control::Status { reply } => {
                let _ = reply.send(self.schedule.as_ref().map(Schedule::snapshot));
            }
        }
    }

    fn install(&mut self, schedule: Schedule) {
        let period = schedule.interval.min(MAX_TIMER_PERIOD);
        self.ticker = Instant::now().checked_add(period).map(|start| {
            let mut ticker = interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        if self.ticker.is_none() {
            warn!(schedule_id = %schedule.id, "first deadline out of clock range; timer left disarmed");
        }
        info!(
            schedule_id = %schedule.id,
            interval_ms = saturating_millis(schedule.interval),
            items = schedule.items.len(),
            policy = %schedule.policy.kind(),
            "schedule installed"
        );
        self.schedule = Some(schedule);
    }

    /// Drop the schedule and disarm the timer. Returns whether one was active.
    fn deactivate(&mut self, reason: &'static str) -> bool {
        self.ticker = None;
        match self.schedule.take() {
            Some(schedule) => {
                info!(schedule_id = %schedule.id, reason, "schedule stopped");
                true
            }
            None => false,
        }
    }

    async fn tick(&mut self) {
        let Some(schedule) = self.schedule.as_mut() else {
            return;
        };
        let schedule_id = schedule.id;

        match schedule.resolve(self.store.as_ref()).await {
            Pick::Tag(tag) => match self.store.apply(&tag).await {
                Ok(()) => info!(schedule_id = %schedule_id, tag = %tag, "banner applied"),
                Err(e) => warn!(
                    schedule_id = %schedule_id,
                    tag = %tag,
                    error = %e,
                    "failed to apply banner; schedule continues"
                ),
            },
            Pick::Exhausted => {
                self.deactivate("policy exhausted");
            }
            Pick::Drained => {
                self.deactivate("no valid tags left");
            }
        }
    }
}

fn saturating_millis(interval: Duration) -> u64 {
    u64::try_from(interval.as_millis()).unwrap_or(u64::MAX)
}

async fn next_fire(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
