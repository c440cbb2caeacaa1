use sea_orm::entity::prelude::*;

/// A prize giveaway hosted in a channel. The primary key is the Discord
/// message id of the announcement message.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "giveaway")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub guild_id: String,
    pub channel_id: String,
    pub owner_id: String,
    pub prize: String,
    pub description: Option<String>,
    pub winner_count: i32,
    pub created_at: DateTimeUtc,
    /// `None` means the giveaway never auto-expires and must be ended manually.
    pub expires_at: Option<DateTimeUtc>,
    pub active: bool,
    pub ended: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::giveaway_entry::Entity")]
    GiveawayEntry,
}

impl Related<super::giveaway_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GiveawayEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
