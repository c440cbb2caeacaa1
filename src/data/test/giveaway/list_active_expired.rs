use super::*;

use test_utils::factory::giveaway::GiveawayFactory;

/// Tests the reconciliation query: only active giveaways whose expiry has
/// passed are due. Ended rows and giveaways without an expiry never show up.
///
/// Expected: exactly the expired active giveaway
#[tokio::test]
async fn returns_only_active_expired() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let expired = GiveawayFactory::new(db)
        .id("giveaway-expired")
        .expires_at(Some(now - Duration::minutes(5)))
        .build()
        .await?;
    GiveawayFactory::new(db)
        .id("giveaway-upcoming")
        .expires_at(Some(now + Duration::hours(1)))
        .build()
        .await?;
    GiveawayFactory::new(db)
        .id("giveaway-finished")
        .expires_at(Some(now - Duration::hours(1)))
        .ended()
        .build()
        .await?;
    GiveawayFactory::new(db)
        .id("giveaway-open-ended")
        .expires_at(None)
        .build()
        .await?;

    let repo = GiveawayRepository::new(db.clone());
    let due = repo.list_active_expired(now).await?;

    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, expired.id);

    Ok(())
}

/// Tests that the startup query returns every non-finalized giveaway,
/// including expired and open-ended ones.
///
/// Expected: the three active rows
#[tokio::test]
async fn list_active_includes_expired_and_open_ended() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    GiveawayFactory::new(db)
        .id("giveaway-expired")
        .expires_at(Some(now - Duration::minutes(5)))
        .build()
        .await?;
    GiveawayFactory::new(db)
        .id("giveaway-upcoming")
        .expires_at(Some(now + Duration::hours(1)))
        .build()
        .await?;
    GiveawayFactory::new(db)
        .id("giveaway-open-ended")
        .expires_at(None)
        .build()
        .await?;
    GiveawayFactory::new(db)
        .id("giveaway-finished")
        .ended()
        .build()
        .await?;

    let repo = GiveawayRepository::new(db.clone());
    let active = repo.list_active().await?;

    assert_eq!(active.len(), 3);
    assert!(active.iter().all(|giveaway| giveaway.active));

    Ok(())
}
