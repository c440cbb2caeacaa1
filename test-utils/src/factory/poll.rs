//! Poll factory for creating test poll rows, options and votes.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating test polls with customizable fields.
pub struct PollFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    guild_id: String,
    channel_id: String,
    owner_id: String,
    question: String,
    multi_choice: bool,
    expires_at: Option<DateTime<Utc>>,
    active: bool,
    ended: bool,
}

impl<'a> PollFactory<'a> {
    /// Creates a new PollFactory with default values: single-choice, active,
    /// expiring one hour from now.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: format!("poll-{}", id),
            guild_id: "guild-1".to_string(),
            channel_id: "channel-1".to_string(),
            owner_id: format!("owner-{}", id),
            question: format!("Question {}?", id),
            multi_choice: false,
            expires_at: Some(Utc::now() + Duration::hours(1)),
            active: true,
            ended: false,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    pub fn multi_choice(mut self, multi_choice: bool) -> Self {
        self.multi_choice = multi_choice;
        self
    }

    /// Sets the expiry; `None` makes it a live poll closed manually.
    pub fn expires_at(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Marks the poll as already finalized.
    pub fn ended(mut self) -> Self {
        self.active = false;
        self.ended = true;
        self
    }

    /// Builds and inserts the poll row into the database.
    pub async fn build(self) -> Result<entity::poll::Model, DbErr> {
        entity::poll::ActiveModel {
            id: ActiveValue::Set(self.id),
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            owner_id: ActiveValue::Set(self.owner_id),
            question: ActiveValue::Set(self.question),
            multi_choice: ActiveValue::Set(self.multi_choice),
            created_at: ActiveValue::Set(Utc::now()),
            expires_at: ActiveValue::Set(self.expires_at),
            active: ActiveValue::Set(self.active),
            ended: ActiveValue::Set(self.ended),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a poll with default values.
///
/// Shorthand for `PollFactory::new(db).build().await`.
pub async fn create_poll(db: &DatabaseConnection) -> Result<entity::poll::Model, DbErr> {
    PollFactory::new(db).build().await
}

/// Adds one option label to a poll.
pub async fn create_poll_option(
    db: &DatabaseConnection,
    poll_id: &str,
    option_index: i32,
    label: &str,
) -> Result<entity::poll_option::Model, DbErr> {
    entity::poll_option::ActiveModel {
        poll_id: ActiveValue::Set(poll_id.to_string()),
        option_index: ActiveValue::Set(option_index),
        label: ActiveValue::Set(label.to_string()),
    }
    .insert(db)
    .await
}

/// Records a user's vote in a poll.
pub async fn create_vote(
    db: &DatabaseConnection,
    poll_id: &str,
    user_id: &str,
    option_index: i32,
) -> Result<entity::poll_vote::Model, DbErr> {
    entity::poll_vote::ActiveModel {
        poll_id: ActiveValue::Set(poll_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        option_index: ActiveValue::Set(option_index),
        voted_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_poll_with_options_and_votes() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let poll = create_poll(db).await?;
        create_poll_option(db, &poll.id, 0, "A").await?;
        create_poll_option(db, &poll.id, 1, "B").await?;
        let vote = create_vote(db, &poll.id, "alice", 0).await?;

        assert!(poll.active);
        assert!(!poll.multi_choice);
        assert_eq!(vote.poll_id, poll.id);
        assert_eq!(vote.option_index, 0);

        Ok(())
    }
}
