use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Giveaway::Table)
                    .if_not_exists()
                    .col(string(Giveaway::Id).primary_key())
                    .col(string(Giveaway::GuildId))
                    .col(string(Giveaway::ChannelId))
                    .col(string(Giveaway::OwnerId))
                    .col(string(Giveaway::Prize))
                    .col(text_null(Giveaway::Description))
                    .col(integer(Giveaway::WinnerCount))
                    .col(
                        timestamp(Giveaway::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(Giveaway::ExpiresAt))
                    .col(boolean(Giveaway::Active))
                    .col(boolean(Giveaway::Ended))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Giveaway::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Giveaway {
    Table,
    Id,
    GuildId,
    ChannelId,
    OwnerId,
    Prize,
    Description,
    WinnerCount,
    CreatedAt,
    ExpiresAt,
    Active,
    Ended,
}
