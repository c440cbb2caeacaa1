use sea_orm_migration::{prelude::*, schema::*};

use super::m20260801_000003_create_poll_table::Poll;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PollOption::Table)
                    .if_not_exists()
                    .col(string(PollOption::PollId))
                    .col(integer(PollOption::OptionIndex))
                    .col(string(PollOption::Label))
                    .primary_key(
                        Index::create()
                            .name("pk_poll_option")
                            .col(PollOption::PollId)
                            .col(PollOption::OptionIndex),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poll_option_poll_id")
                            .from(PollOption::Table, PollOption::PollId)
                            .to(Poll::Table, Poll::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PollOption::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PollOption {
    Table,
    PollId,
    OptionIndex,
    Label,
}
