use super::*;

/// Tests creating a new giveaway row from the domain model.
///
/// Expected: Ok with all fields persisted
#[tokio::test]
async fn creates_giveaway() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let expires_at = Some(Utc::now() + Duration::hours(1));
    let repo = GiveawayRepository::new(db.clone());
    let created = repo.create(&sample_giveaway("giveaway-1", expires_at)).await?;

    assert_eq!(created.id, "giveaway-1");
    assert_eq!(created.prize, "Nitro");
    assert_eq!(created.winner_count, 1);
    assert_eq!(created.expires_at, expires_at);
    assert!(created.active);
    assert!(!created.ended);

    Ok(())
}

/// Tests the primary-key constraint on the giveaway id.
///
/// Expected: Err(DbErr) on the second insert with the same id
#[tokio::test]
async fn rejects_duplicate_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GiveawayRepository::new(db.clone());
    repo.create(&sample_giveaway("giveaway-1", None)).await?;
    let result = repo.create(&sample_giveaway("giveaway-1", None)).await;

    assert!(result.is_err());

    Ok(())
}
