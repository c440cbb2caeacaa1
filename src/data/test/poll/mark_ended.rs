use super::*;

/// Tests the compare-and-set on the ended flag.
///
/// Expected: the first call flips the flags and returns true, the second
/// returns false
#[tokio::test]
async fn flips_flags_exactly_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let poll = factory::poll::create_poll(db).await?;
    let repo = PollRepository::new(db.clone());

    assert!(repo.mark_ended(&poll.id).await?);

    let (updated, _) = repo.get_by_id(&poll.id).await?.unwrap();
    assert!(!updated.active);
    assert!(updated.ended);

    assert!(!repo.mark_ended(&poll.id).await?);

    Ok(())
}
