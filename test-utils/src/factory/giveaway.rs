//! Giveaway factory for creating test giveaway rows.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating test giveaways with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::giveaway::GiveawayFactory;
///
/// let giveaway = GiveawayFactory::new(&db)
///     .prize("Custom Prize")
///     .winner_count(3)
///     .build()
///     .await?;
/// ```
pub struct GiveawayFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    guild_id: String,
    channel_id: String,
    owner_id: String,
    prize: String,
    description: Option<String>,
    winner_count: i32,
    expires_at: Option<DateTime<Utc>>,
    active: bool,
    ended: bool,
}

impl<'a> GiveawayFactory<'a> {
    /// Creates a new GiveawayFactory with default values: one winner, active,
    /// expiring one hour from now.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: format!("giveaway-{}", id),
            guild_id: "guild-1".to_string(),
            channel_id: "channel-1".to_string(),
            owner_id: format!("owner-{}", id),
            prize: format!("Prize {}", id),
            description: Some("Test giveaway".to_string()),
            winner_count: 1,
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

    pub fn prize(mut self, prize: impl Into<String>) -> Self {
        self.prize = prize.into();
        self
    }

    pub fn winner_count(mut self, winner_count: i32) -> Self {
        self.winner_count = winner_count;
        self
    }

    /// Sets the expiry; `None` makes the giveaway run until ended manually.
    pub fn expires_at(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Marks the giveaway as already finalized.
    pub fn ended(mut self) -> Self {
        self.active = false;
        self.ended = true;
        self
    }

    /// Builds and inserts the giveaway row into the database.
    pub async fn build(self) -> Result<entity::giveaway::Model, DbErr> {
        entity::giveaway::ActiveModel {
            id: ActiveValue::Set(self.id),
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            owner_id: ActiveValue::Set(self.owner_id),
            prize: ActiveValue::Set(self.prize),
            description: ActiveValue::Set(self.description),
            winner_count: ActiveValue::Set(self.winner_count),
            created_at: ActiveValue::Set(Utc::now()),
            expires_at: ActiveValue::Set(self.expires_at),
            active: ActiveValue::Set(self.active),
            ended: ActiveValue::Set(self.ended),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a giveaway with default values.
///
/// Shorthand for `GiveawayFactory::new(db).build().await`.
pub async fn create_giveaway(db: &DatabaseConnection) -> Result<entity::giveaway::Model, DbErr> {
    GiveawayFactory::new(db).build().await
}

/// Records a user's entry into a giveaway.
pub async fn create_entry(
    db: &DatabaseConnection,
    giveaway_id: &str,
    user_id: &str,
) -> Result<entity::giveaway_entry::Model, DbErr> {
    entity::giveaway_entry::ActiveModel {
        giveaway_id: ActiveValue::Set(giveaway_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        entered_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
