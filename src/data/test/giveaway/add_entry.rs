use super::*;

/// Tests recording entries and listing them in entry order.
///
/// Expected: both entries stored, ordered by entered_at
#[tokio::test]
async fn records_entries_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::giveaway::create_giveaway(db).await?;
    let repo = GiveawayRepository::new(db.clone());

    let first = Utc::now();
    repo.add_entry(&stored.id, "alice", first).await?;
    repo.add_entry(&stored.id, "bob", first + Duration::seconds(1))
        .await?;

    let entries = repo.entries(&stored.id).await?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].user_id, "alice");
    assert_eq!(entries[1].user_id, "bob");

    Ok(())
}

/// Tests the composite-key constraint: one entry per user per giveaway.
///
/// Expected: Err(DbErr) on the repeat entry
#[tokio::test]
async fn rejects_duplicate_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::giveaway::create_giveaway(db).await?;
    let repo = GiveawayRepository::new(db.clone());

    repo.add_entry(&stored.id, "alice", Utc::now()).await?;
    let result = repo.add_entry(&stored.id, "alice", Utc::now()).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests listing entries of a giveaway no one has entered.
///
/// Expected: empty list
#[tokio::test]
async fn returns_empty_list_without_entries() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::giveaway::create_giveaway(db).await?;
    let repo = GiveawayRepository::new(db.clone());

    let entries = repo.entries(&stored.id).await?;

    assert!(entries.is_empty());

    Ok(())
}
