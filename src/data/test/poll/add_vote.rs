use super::*;

/// Tests recording votes and listing them in voting order.
///
/// Expected: both votes stored, ordered by voted_at
#[tokio::test]
async fn records_votes_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let poll = factory::poll::create_poll(db).await?;
    factory::poll::create_poll_option(db, &poll.id, 0, "A").await?;
    factory::poll::create_poll_option(db, &poll.id, 1, "B").await?;

    let repo = PollRepository::new(db.clone());
    let first = Utc::now();
    repo.add_vote(&poll.id, "alice", 0, first).await?;
    repo.add_vote(&poll.id, "bob", 1, first + Duration::seconds(1))
        .await?;

    let votes = repo.votes(&poll.id).await?;

    assert_eq!(votes.len(), 2);
    assert_eq!(votes[0].user_id, "alice");
    assert_eq!(votes[0].option_index, 0);
    assert_eq!(votes[1].user_id, "bob");
    assert_eq!(votes[1].option_index, 1);

    Ok(())
}

/// Tests the composite-key constraint: the exact same vote cannot be cast
/// twice.
///
/// Expected: Err(DbErr) on the repeat vote
#[tokio::test]
async fn rejects_identical_repeat_vote() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let poll = factory::poll::create_poll(db).await?;
    factory::poll::create_poll_option(db, &poll.id, 0, "A").await?;

    let repo = PollRepository::new(db.clone());
    repo.add_vote(&poll.id, "alice", 0, Utc::now()).await?;
    let result = repo.add_vote(&poll.id, "alice", 0, Utc::now()).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests that the schema allows one user to vote for distinct options; the
/// single-choice policy is enforced at the manager boundary instead.
///
/// Expected: both votes stored
#[tokio::test]
async fn allows_votes_for_distinct_options() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let poll = factory::poll::create_poll(db).await?;
    factory::poll::create_poll_option(db, &poll.id, 0, "A").await?;
    factory::poll::create_poll_option(db, &poll.id, 1, "B").await?;

    let repo = PollRepository::new(db.clone());
    repo.add_vote(&poll.id, "alice", 0, Utc::now()).await?;
    repo.add_vote(&poll.id, "alice", 1, Utc::now()).await?;

    assert_eq!(repo.votes(&poll.id).await?.len(), 2);

    Ok(())
}
