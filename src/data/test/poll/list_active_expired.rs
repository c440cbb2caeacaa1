use super::*;

use test_utils::factory::poll::PollFactory;

/// Tests the reconciliation query for polls: live polls (no expiry) never
/// become due, only active polls whose expiry has passed.
///
/// Expected: exactly the expired scheduled poll
#[tokio::test]
async fn live_polls_are_never_due() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let expired = PollFactory::new(db)
        .id("poll-expired")
        .expires_at(Some(now - Duration::minutes(5)))
        .build()
        .await?;
    PollFactory::new(db)
        .id("poll-live")
        .expires_at(None)
        .build()
        .await?;
    PollFactory::new(db)
        .id("poll-upcoming")
        .expires_at(Some(now + Duration::hours(1)))
        .build()
        .await?;

    let repo = PollRepository::new(db.clone());
    let due = repo.list_active_expired(now).await?;

    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, expired.id);

    Ok(())
}
