use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Poll::Table)
                    .if_not_exists()
                    .col(string(Poll::Id).primary_key())
                    .col(string(Poll::GuildId))
                    .col(string(Poll::ChannelId))
                    .col(string(Poll::OwnerId))
                    .col(string(Poll::Question))
                    .col(boolean(Poll::MultiChoice))
                    .col(
                        timestamp(Poll::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(Poll::ExpiresAt))
                    .col(boolean(Poll::Active))
                    .col(boolean(Poll::Ended))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Poll::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Poll {
    Table,
    Id,
    GuildId,
    ChannelId,
    OwnerId,
    Question,
    MultiChoice,
    CreatedAt,
    ExpiresAt,
    Active,
    Ended,
}
