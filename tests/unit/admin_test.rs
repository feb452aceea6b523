//! Tests for the administrative surface

use std::sync::Arc;

use banner_rotation::config::RotationConfig;
use banner_rotation::core::{PolicyKind, RotationError, RotationScheduler};
use banner_rotation::infra::InMemoryTagStore;
use banner_rotation::runtime::{
    schedule_playlist, schedule_tags, set_banner, skip_to_next, stop_rotation, BannerOutcome,
    ControlOutcome, ScheduleOutcome,
};

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

fn setup() -> (Arc<InMemoryTagStore>, RotationScheduler<InMemoryTagStore>) {
    let store = Arc::new(InMemoryTagStore::new());
    store.insert_tag("harbor", "u1", "https://img.example/harbor.png");
    store.insert_tag("sunset", "u2", "https://img.example/sunset.jpg");
    let scheduler = RotationScheduler::start(Arc::clone(&store), &RotationConfig::default());
    (store, scheduler)
}

#[tokio::test]
async fn test_schedule_tags_accepted() {
    let (store, scheduler) = setup();
    let config = RotationConfig::default();

    let outcome = schedule_tags(
        &scheduler,
        &config,
        "30m",
        tags(&["harbor", "sunset"]),
        PolicyKind::Cycle,
    )
    .await
    .unwrap();

    assert_eq!(outcome, ScheduleOutcome::Accepted);
    let snapshot = scheduler.status().await.unwrap().unwrap();
    assert_eq!(snapshot.interval_ms, 1_800_000);
    assert_eq!(store.applied(), tags(&["harbor"]));
}

#[tokio::test]
async fn test_schedule_tags_unparsable_interval() {
    let (_store, scheduler) = setup();
    let outcome = schedule_tags(
        &scheduler,
        &RotationConfig::default(),
        "soon",
        tags(&["harbor"]),
        PolicyKind::Shuffle,
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        ScheduleOutcome::UnparsableInterval {
            timespec: "soon".to_string()
        }
    );
    assert!(scheduler.status().await.unwrap().is_none());
}

#[tokio::test]
async fn test_schedule_tags_interval_too_short() {
    let (_store, scheduler) = setup();
    let outcome = schedule_tags(
        &scheduler,
        &RotationConfig::default(),
        "14m59",
        tags(&["harbor"]),
        PolicyKind::Shuffle,
    )
    .await
    .unwrap();

    assert_eq!(outcome, ScheduleOutcome::IntervalTooShort { min_secs: 900 });
}

#[tokio::test]
async fn test_schedule_tags_unknown_tag() {
    let (store, scheduler) = setup();
    let outcome = schedule_tags(
        &scheduler,
        &RotationConfig::default(),
        "1h",
        tags(&["harbor", "ghost"]),
        PolicyKind::Onceonly,
    )
    .await
    .unwrap();

    assert_eq!(outcome, ScheduleOutcome::UnknownTags);
    assert!(store.applied().is_empty());
}

#[tokio::test]
async fn test_schedule_playlist() {
    let (store, scheduler) = setup();
    store
        .edit_playlist("evening", &tags(&["sunset", "harbor"]))
        .unwrap();

    let outcome = schedule_playlist(
        &scheduler,
        store.as_ref(),
        &RotationConfig::default(),
        "1h",
        "evening",
        PolicyKind::Onceonly,
    )
    .await
    .unwrap();
    assert_eq!(outcome, ScheduleOutcome::Accepted);
    assert_eq!(skip_to_next(&scheduler).await.unwrap(), ControlOutcome::Done);
    assert_eq!(store.applied(), tags(&["sunset", "harbor"]));
}

#[tokio::test]
async fn test_schedule_missing_playlist() {
    let (store, scheduler) = setup();
    let outcome = schedule_playlist(
        &scheduler,
        store.as_ref(),
        &RotationConfig::default(),
        "1h",
        "nowhere",
        PolicyKind::Cycle,
    )
    .await
    .unwrap();

    assert_eq!(outcome, ScheduleOutcome::UnknownTags);
}

#[tokio::test]
async fn test_stop_and_skip_outcomes() {
    let (_store, scheduler) = setup();

    assert_eq!(
        stop_rotation(&scheduler).await.unwrap(),
        ControlOutcome::NoActiveSchedule
    );
    assert_eq!(
        skip_to_next(&scheduler).await.unwrap(),
        ControlOutcome::NoActiveSchedule
    );

    schedule_tags(
        &scheduler,
        &RotationConfig::default(),
        "15m",
        tags(&["harbor"]),
        PolicyKind::Cycle,
    )
    .await
    .unwrap();
    assert_eq!(skip_to_next(&scheduler).await.unwrap(), ControlOutcome::Done);
    assert_eq!(stop_rotation(&scheduler).await.unwrap(), ControlOutcome::Done);
}

#[tokio::test]
async fn test_schedule_tags_largest_timespec_keeps_loop_alive() {
    let (store, scheduler) = setup();
    let outcome = schedule_tags(
        &scheduler,
        &RotationConfig::default(),
        "18446744073709551615",
        tags(&["harbor"]),
        PolicyKind::Cycle,
    )
    .await
    .unwrap();

    assert_eq!(outcome, ScheduleOutcome::Accepted);
    assert_eq!(store.applied(), tags(&["harbor"]));
    assert!(scheduler.status().await.unwrap().is_some());
    assert_eq!(stop_rotation(&scheduler).await.unwrap(), ControlOutcome::Done);
}

#[tokio::test]
async fn test_set_banner_stops_active_rotation() {
    let (store, scheduler) = setup();
    schedule_tags(
        &scheduler,
        &RotationConfig::default(),
        "15m",
        tags(&["harbor", "sunset"]),
        PolicyKind::Cycle,
    )
    .await
    .unwrap();

    let outcome = set_banner(&scheduler, "sunset").await.unwrap();

    assert_eq!(
        outcome,
        BannerOutcome::Applied {
            rotation_stopped: true
        }
    );
    assert!(scheduler.status().await.unwrap().is_none());
    assert_eq!(store.applied(), tags(&["harbor", "sunset"]));
}

#[tokio::test]
async fn test_set_banner_without_rotation() {
    let (store, scheduler) = setup();

    let outcome = set_banner(&scheduler, "harbor").await.unwrap();

    assert_eq!(
        outcome,
        BannerOutcome::Applied {
            rotation_stopped: false
        }
    );
    assert_eq!(store.applied(), tags(&["harbor"]));
}

#[tokio::test]
async fn test_set_banner_unknown_tag_still_stops() {
    let (store, scheduler) = setup();
    schedule_tags(
        &scheduler,
        &RotationConfig::default(),
        "15m",
        tags(&["harbor"]),
        PolicyKind::Cycle,
    )
    .await
    .unwrap();

    let outcome = set_banner(&scheduler, "ghost").await.unwrap();

    assert_eq!(
        outcome,
        BannerOutcome::UnknownTag {
            rotation_stopped: true
        }
    );
    assert!(scheduler.status().await.unwrap().is_none());
    assert_eq!(store.applied(), tags(&["harbor"]));
}

#[tokio::test]
async fn test_set_banner_backend_failure_surfaces() {
    let (store, scheduler) = setup();
    store.fail_apply_for("harbor");

    let err = set_banner(&scheduler, "harbor").await.unwrap_err();

    assert!(matches!(err, RotationError::Store(_)));
}

#[test]
fn test_outcome_serialization() {
    let json = serde_json::to_string(&ScheduleOutcome::IntervalTooShort { min_secs: 900 }).unwrap();
    assert_eq!(json, r#"{"outcome":"interval_too_short","min_secs":900}"#);

    let json = serde_json::to_string(&ControlOutcome::NoActiveSchedule).unwrap();
    assert_eq!(json, r#""no_active_schedule""#);
}
