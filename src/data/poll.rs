use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::poll::{Poll, PollVote};
use crate::service::lifecycle::EntityStore;
use crate::service::poll::PollKind;

/// Repository for poll rows, their option labels and their votes.
#[derive(Clone)]
pub struct PollRepository {
    db: DatabaseConnection,
}

impl PollRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new poll row together with its option labels.
    ///
    /// # Returns
    /// - `Ok(Model)`: the created poll
    /// - `Err(DbErr)`: database error, including a constraint violation when
    ///   the id already exists
    pub async fn create(&self, poll: &Poll) -> Result<entity::poll::Model, DbErr> {
        let model = entity::poll::ActiveModel {
            id: ActiveValue::Set(poll.id.clone()),
            guild_id: ActiveValue::Set(poll.guild_id.clone()),
            channel_id: ActiveValue::Set(poll.channel_id.clone()),
            owner_id: ActiveValue::Set(poll.owner_id.clone()),
            question: ActiveValue::Set(poll.details.question.clone()),
            multi_choice: ActiveValue::Set(poll.details.multi_choice),
            created_at: ActiveValue::Set(poll.created_at),
            expires_at: ActiveValue::Set(poll.expires_at),
            active: ActiveValue::Set(poll.active),
            ended: ActiveValue::Set(poll.ended),
        }
        .insert(&self.db)
        .await?;

        for (index, label) in poll.details.options.iter().enumerate() {
            entity::poll_option::ActiveModel {
                poll_id: ActiveValue::Set(poll.id.clone()),
                option_index: ActiveValue::Set(index as i32),
                label: ActiveValue::Set(label.clone()),
            }
            .insert(&self.db)
            .await?;
        }

        Ok(model)
    }

    /// Gets a poll by id together with its option labels.
    ///
    /// # Returns
    /// - `Ok(Some((poll, options)))`: the poll and its options in index order
    /// - `Ok(None)`: no poll with this id
    pub async fn get_by_id(
        &self,
        id: &str,
    ) -> Result<Option<(entity::poll::Model, Vec<entity::poll_option::Model>)>, DbErr> {
        let poll = entity::prelude::Poll::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        match poll {
            Some(poll) => {
                let options = self.options(id).await?;
                Ok(Some((poll, options)))
            }
            None => Ok(None),
        }
    }

    /// Gets the option labels of a poll in index order.
    pub async fn options(&self, poll_id: &str) -> Result<Vec<entity::poll_option::Model>, DbErr> {
        entity::prelude::PollOption::find()
            .filter(entity::poll_option::Column::PollId.eq(poll_id))
            .order_by_asc(entity::poll_option::Column::OptionIndex)
            .all(&self.db)
            .await
    }

    /// Gets all polls that have not been finalized, including those whose
    /// expiry has already passed.
    pub async fn list_active(&self) -> Result<Vec<entity::poll::Model>, DbErr> {
        entity::prelude::Poll::find()
            .filter(entity::poll::Column::Active.eq(true))
            .all(&self.db)
            .await
    }

    /// Gets all active polls whose expiry has passed. Live polls (no expiry)
    /// are never returned.
    pub async fn list_active_expired(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<entity::poll::Model>, DbErr> {
        entity::prelude::Poll::find()
            .filter(entity::poll::Column::Active.eq(true))
            .filter(entity::poll::Column::ExpiresAt.lte(now))
            .all(&self.db)
            .await
    }

    /// Atomically flips the poll to `active = false, ended = true`.
    ///
    /// # Returns
    /// - `Ok(true)`: this call performed the flip
    /// - `Ok(false)`: the poll was already ended (or does not exist)
    pub async fn mark_ended(&self, id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Poll::update_many()
            .col_expr(entity::poll::Column::Active, Expr::value(false))
            .col_expr(entity::poll::Column::Ended, Expr::value(true))
            .filter(entity::poll::Column::Id.eq(id))
            .filter(entity::poll::Column::Ended.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Records one vote.
    ///
    /// # Returns
    /// - `Err(DbErr)`: database error, including the primary-key violation
    ///   when the same vote was already cast
    pub async fn add_vote(
        &self,
        poll_id: &str,
        user_id: &str,
        option_index: i32,
        voted_at: DateTime<Utc>,
    ) -> Result<entity::poll_vote::Model, DbErr> {
        entity::poll_vote::ActiveModel {
            poll_id: ActiveValue::Set(poll_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            option_index: ActiveValue::Set(option_index),
            voted_at: ActiveValue::Set(voted_at),
        }
        .insert(&self.db)
        .await
    }

    /// Gets all votes of a poll in voting order.
    pub async fn votes(&self, poll_id: &str) -> Result<Vec<entity::poll_vote::Model>, DbErr> {
        entity::prelude::PollVote::find()
            .filter(entity::poll_vote::Column::PollId.eq(poll_id))
            .order_by_asc(entity::poll_vote::Column::VotedAt)
            .all(&self.db)
            .await
    }

    async fn load_domain(&self, model: entity::poll::Model) -> Result<Poll, DbErr> {
        let options = self.options(&model.id).await?;
        Ok(Poll::from_entity(model, options))
    }
}

#[async_trait]
impl EntityStore<PollKind> for PollRepository {
    async fn insert(&self, poll: &Poll) -> Result<(), DbErr> {
        self.create(poll).await.map(|_| ())
    }

    async fn get(&self, id: &str) -> Result<Option<Poll>, DbErr> {
        match self.get_by_id(id).await? {
            Some((poll, options)) => Ok(Some(Poll::from_entity(poll, options))),
            None => Ok(None),
        }
    }

    async fn list_active(&self) -> Result<Vec<Poll>, DbErr> {
        let mut polls = Vec::new();
        for model in self.list_active().await? {
            polls.push(self.load_domain(model).await?);
        }
        Ok(polls)
    }

    async fn list_active_expired(&self, now: DateTime<Utc>) -> Result<Vec<Poll>, DbErr> {
        let mut polls = Vec::new();
        for model in self.list_active_expired(now).await? {
            polls.push(self.load_domain(model).await?);
        }
        Ok(polls)
    }

    async fn mark_ended(&self, id: &str) -> Result<bool, DbErr> {
        self.mark_ended(id).await
    }

    async fn add_contribution(&self, id: &str, vote: &PollVote) -> Result<(), DbErr> {
        self.add_vote(id, &vote.user_id, vote.option_index, vote.voted_at)
            .await
            .map(|_| ())
    }

    async fn contributions(&self, id: &str) -> Result<Vec<PollVote>, DbErr> {
        Ok(self
            .votes(id)
            .await?
            .into_iter()
            .map(PollVote::from_entity)
            .collect())
    }
}
