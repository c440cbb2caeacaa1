use sea_orm_migration::{prelude::*, schema::*};

use super::m20260801_000001_create_giveaway_table::Giveaway;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GiveawayEntry::Table)
                    .if_not_exists()
                    .col(string(GiveawayEntry::GiveawayId))
                    .col(string(GiveawayEntry::UserId))
                    .col(
                        timestamp(GiveawayEntry::EnteredAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_giveaway_entry")
                            .col(GiveawayEntry::GiveawayId)
                            .col(GiveawayEntry::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_giveaway_entry_giveaway_id")
                            .from(GiveawayEntry::Table, GiveawayEntry::GiveawayId)
                            .to(Giveaway::Table, Giveaway::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GiveawayEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GiveawayEntry {
    Table,
    GiveawayId,
    UserId,
    EnteredAt,
}
