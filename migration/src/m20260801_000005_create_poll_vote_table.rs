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
                    .table(PollVote::Table)
                    .if_not_exists()
                    .col(string(PollVote::PollId))
                    .col(string(PollVote::UserId))
                    .col(integer(PollVote::OptionIndex))
                    .col(
                        timestamp(PollVote::VotedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_poll_vote")
                            .col(PollVote::PollId)
                            .col(PollVote::UserId)
                            .col(PollVote::OptionIndex),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poll_vote_poll_id")
                            .from(PollVote::Table, PollVote::PollId)
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
            .drop_table(Table::drop().table(PollVote::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PollVote {
    Table,
    PollId,
    UserId,
    OptionIndex,
    VotedAt,
}
