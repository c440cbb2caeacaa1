use super::*;

/// Tests retrieving an existing giveaway by id.
///
/// Expected: Ok(Some) with the stored row
#[tokio::test]
async fn returns_giveaway_if_found() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::giveaway::create_giveaway(db).await?;

    let repo = GiveawayRepository::new(db.clone());
    let found = repo.get_by_id(&stored.id).await?;

    assert_eq!(found, Some(stored));

    Ok(())
}

/// Tests retrieving a giveaway that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GiveawayRepository::new(db.clone());
    let found = repo.get_by_id("giveaway-missing").await?;

    assert!(found.is_none());

    Ok(())
}
