use sea_orm::entity::prelude::*;

/// One user's entry into a giveaway. The composite key enforces a single
/// entry per user per giveaway.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "giveaway_entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub giveaway_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub entered_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::giveaway::Entity",
        from = "Column::GiveawayId",
        to = "super::giveaway::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Giveaway,
}

impl Related<super::giveaway::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Giveaway.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
