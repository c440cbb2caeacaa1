use chrono::Duration;

use crate::data::giveaway::GiveawayRepository;
use crate::error::lifecycle::LifecycleError;

use super::support::{entry, giveaway_manager, giveaway_params, Delivery};

/// Ending an entity twice computes one outcome and announces once; the
/// second call is a no-op.
#[tokio::test]
async fn end_now_finalizes_exactly_once() {
    let (manager, publisher, db) = giveaway_manager().await;

    let giveaway = manager
        .create(giveaway_params("owner-1", 1, Some(Duration::minutes(5))))
        .await
        .unwrap();
    manager.contribute(&giveaway.id, entry("alice")).await.unwrap();

    let outcome = manager.end_now(&giveaway.id, "owner-1").await.unwrap();
    assert_eq!(outcome.unwrap().winners, vec!["alice".to_string()]);
    assert_eq!(publisher.edit_count(), 1);

    let repeat = manager.end_now(&giveaway.id, "owner-1").await.unwrap();
    assert!(repeat.is_none());
    assert_eq!(publisher.edit_count(), 1);

    let stored = GiveawayRepository::new(db)
        .get_by_id(&giveaway.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.ended);
    assert!(!stored.active);
}

/// The manual path is owner-only; the entity keeps running after a rejected
/// attempt.
#[tokio::test]
async fn only_the_owner_may_end_manually() {
    let (manager, publisher, db) = giveaway_manager().await;

    let giveaway = manager
        .create(giveaway_params("owner-1", 1, Some(Duration::minutes(5))))
        .await
        .unwrap();

    let result = manager.end_now(&giveaway.id, "someone-else").await;
    assert!(matches!(result, Err(LifecycleError::Forbidden { .. })));
    assert_eq!(publisher.edit_count(), 0);

    let stored = GiveawayRepository::new(db)
        .get_by_id(&giveaway.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.active);
    assert!(!stored.ended);
}

/// When the original announcement is gone, the result is published as a
/// standalone message instead of being silently dropped.
#[tokio::test]
async fn vanished_message_gets_standalone_fallback() {
    let (manager, publisher, _db) = giveaway_manager().await;

    let giveaway = manager
        .create(giveaway_params("owner-1", 1, Some(Duration::minutes(5))))
        .await
        .unwrap();
    manager.contribute(&giveaway.id, entry("alice")).await.unwrap();
    publisher.fail_edits_with_not_found();

    let outcome = manager.end_now(&giveaway.id, "owner-1").await.unwrap();
    assert!(outcome.is_some());

    // creation message + fallback result message
    assert_eq!(publisher.publish_count(), 2);
    let deliveries = publisher.deliveries();
    let last = deliveries.last().unwrap();
    assert!(matches!(
        last,
        Delivery::Published { title, .. } if title.contains("ended")
    ));
}

/// A publish outage does not roll back the committed ended state; the
/// failure is logged only.
#[tokio::test]
async fn publish_outage_does_not_roll_back_the_commit() {
    let (manager, publisher, db) = giveaway_manager().await;

    let giveaway = manager
        .create(giveaway_params("owner-1", 1, Some(Duration::minutes(5))))
        .await
        .unwrap();
    publisher.fail_edits_with_unavailable();

    let outcome = manager.end_now(&giveaway.id, "owner-1").await.unwrap();
    assert!(outcome.is_some());

    // only the creation message went out, yet the entity stays ended
    assert_eq!(publisher.publish_count(), 1);
    let stored = GiveawayRepository::new(db)
        .get_by_id(&giveaway.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.ended);
}
