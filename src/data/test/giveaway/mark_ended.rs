use super::*;

/// Tests the compare-and-set on the ended flag.
///
/// Expected: the first call flips the flags and returns true, the second
/// observes the already-ended row and returns false
#[tokio::test]
async fn flips_flags_exactly_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::giveaway::create_giveaway(db).await?;
    let repo = GiveawayRepository::new(db.clone());

    assert!(repo.mark_ended(&stored.id).await?);

    let updated = repo.get_by_id(&stored.id).await?.unwrap();
    assert!(!updated.active);
    assert!(updated.ended);

    assert!(!repo.mark_ended(&stored.id).await?);

    Ok(())
}

/// Tests marking a giveaway that does not exist.
///
/// Expected: Ok(false), nothing to flip
#[tokio::test]
async fn returns_false_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GiveawayRepository::new(db.clone());

    assert!(!repo.mark_ended("giveaway-missing").await?);

    Ok(())
}
