use super::*;

/// Tests creating a poll together with its option labels.
///
/// Expected: Ok with the poll row and both options persisted in index order
#[tokio::test]
async fn creates_poll_with_options() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PollRepository::new(db.clone());
    let created = repo.create(&sample_poll("poll-1", &["A", "B"], None)).await?;

    assert_eq!(created.question, "Which one?");
    assert!(created.active);

    let (_, options) = repo.get_by_id("poll-1").await?.unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].label, "A");
    assert_eq!(options[0].option_index, 0);
    assert_eq!(options[1].label, "B");
    assert_eq!(options[1].option_index, 1);

    Ok(())
}

/// Tests the primary-key constraint on the poll id.
///
/// Expected: Err(DbErr) on the second insert with the same id
#[tokio::test]
async fn rejects_duplicate_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PollRepository::new(db.clone());
    repo.create(&sample_poll("poll-1", &["A", "B"], None)).await?;
    let result = repo.create(&sample_poll("poll-1", &["A", "B"], None)).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests retrieving a poll that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn get_by_id_returns_none_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PollRepository::new(db.clone());
    let found = repo.get_by_id("poll-missing").await?;

    assert!(found.is_none());

    Ok(())
}
