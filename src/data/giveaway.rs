use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::giveaway::{Giveaway, GiveawayEntry};
use crate::service::giveaway::GiveawayKind;
use crate::service::lifecycle::EntityStore;

/// Repository for giveaway rows and their entries.
///
/// Holds an owned connection handle (a cheap clone of the pool) because the
/// lifecycle manager keeps its store for the process lifetime.
#[derive(Clone)]
pub struct GiveawayRepository {
    db: DatabaseConnection,
}

impl GiveawayRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new giveaway row.
    ///
    /// # Returns
    /// - `Ok(Model)`: the created giveaway
    /// - `Err(DbErr)`: database error, including a constraint violation when
    ///   the id already exists
    pub async fn create(&self, giveaway: &Giveaway) -> Result<entity::giveaway::Model, DbErr> {
        entity::giveaway::ActiveModel {
            id: ActiveValue::Set(giveaway.id.clone()),
            guild_id: ActiveValue::Set(giveaway.guild_id.clone()),
            channel_id: ActiveValue::Set(giveaway.channel_id.clone()),
            owner_id: ActiveValue::Set(giveaway.owner_id.clone()),
            prize: ActiveValue::Set(giveaway.details.prize.clone()),
            description: ActiveValue::Set(giveaway.details.description.clone()),
            winner_count: ActiveValue::Set(giveaway.details.winner_count as i32),
            created_at: ActiveValue::Set(giveaway.created_at),
            expires_at: ActiveValue::Set(giveaway.expires_at),
            active: ActiveValue::Set(giveaway.active),
            ended: ActiveValue::Set(giveaway.ended),
        }
        .insert(&self.db)
        .await
    }

    /// Gets a giveaway by id.
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: the giveaway if found
    /// - `Ok(None)`: no giveaway with this id
    pub async fn get_by_id(&self, id: &str) -> Result<Option<entity::giveaway::Model>, DbErr> {
        entity::prelude::Giveaway::find_by_id(id.to_string())
            .one(&self.db)
            .await
    }

    /// Gets all giveaways that have not been finalized, including those whose
    /// expiry has already passed.
    pub async fn list_active(&self) -> Result<Vec<entity::giveaway::Model>, DbErr> {
        entity::prelude::Giveaway::find()
            .filter(entity::giveaway::Column::Active.eq(true))
            .all(&self.db)
            .await
    }

    /// Gets all active giveaways whose expiry has passed. Giveaways without
    /// an expiry are never returned.
    pub async fn list_active_expired(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<entity::giveaway::Model>, DbErr> {
        entity::prelude::Giveaway::find()
            .filter(entity::giveaway::Column::Active.eq(true))
            .filter(entity::giveaway::Column::ExpiresAt.lte(now))
            .all(&self.db)
            .await
    }

    /// Atomically flips the giveaway to `active = false, ended = true`.
    ///
    /// The update is filtered on `ended = false`, so of two racing callers
    /// exactly one observes `true` and may perform side effects.
    ///
    /// # Returns
    /// - `Ok(true)`: this call performed the flip
    /// - `Ok(false)`: the giveaway was already ended (or does not exist)
    pub async fn mark_ended(&self, id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Giveaway::update_many()
            .col_expr(entity::giveaway::Column::Active, Expr::value(false))
            .col_expr(entity::giveaway::Column::Ended, Expr::value(true))
            .filter(entity::giveaway::Column::Id.eq(id))
            .filter(entity::giveaway::Column::Ended.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Records one user's entry.
    ///
    /// # Returns
    /// - `Err(DbErr)`: database error, including the primary-key violation
    ///   when the user already entered
    pub async fn add_entry(
        &self,
        giveaway_id: &str,
        user_id: &str,
        entered_at: DateTime<Utc>,
    ) -> Result<entity::giveaway_entry::Model, DbErr> {
        entity::giveaway_entry::ActiveModel {
            giveaway_id: ActiveValue::Set(giveaway_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            entered_at: ActiveValue::Set(entered_at),
        }
        .insert(&self.db)
        .await
    }

    /// Gets all entries of a giveaway in entry order.
    pub async fn entries(
        &self,
        giveaway_id: &str,
    ) -> Result<Vec<entity::giveaway_entry::Model>, DbErr> {
        entity::prelude::GiveawayEntry::find()
            .filter(entity::giveaway_entry::Column::GiveawayId.eq(giveaway_id))
            .order_by_asc(entity::giveaway_entry::Column::EnteredAt)
            .all(&self.db)
            .await
    }
}

#[async_trait]
impl EntityStore<GiveawayKind> for GiveawayRepository {
    async fn insert(&self, giveaway: &Giveaway) -> Result<(), DbErr> {
        self.create(giveaway).await.map(|_| ())
    }

    async fn get(&self, id: &str) -> Result<Option<Giveaway>, DbErr> {
        Ok(self.get_by_id(id).await?.map(Giveaway::from_entity))
    }

    async fn list_active(&self) -> Result<Vec<Giveaway>, DbErr> {
        Ok(self
            .list_active()
            .await?
            .into_iter()
            .map(Giveaway::from_entity)
            .collect())
    }

    async fn list_active_expired(&self, now: DateTime<Utc>) -> Result<Vec<Giveaway>, DbErr> {
        Ok(self
            .list_active_expired(now)
            .await?
            .into_iter()
            .map(Giveaway::from_entity)
            .collect())
    }

    async fn mark_ended(&self, id: &str) -> Result<bool, DbErr> {
        self.mark_ended(id).await
    }

    async fn add_contribution(&self, id: &str, entry: &GiveawayEntry) -> Result<(), DbErr> {
        self.add_entry(id, &entry.user_id, entry.entered_at)
            .await
            .map(|_| ())
    }

    async fn contributions(&self, id: &str) -> Result<Vec<GiveawayEntry>, DbErr> {
        Ok(self
            .entries(id)
            .await?
            .into_iter()
            .map(GiveawayEntry::from_entity)
            .collect())
    }
}
