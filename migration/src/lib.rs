pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_giveaway_table;
mod m20260801_000002_create_giveaway_entry_table;
mod m20260801_000003_create_poll_table;
mod m20260801_000004_create_poll_option_table;
mod m20260801_000005_create_poll_vote_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_giveaway_table::Migration),
            Box::new(m20260801_000002_create_giveaway_entry_table::Migration),
            Box::new(m20260801_000003_create_poll_table::Migration),
            Box::new(m20260801_000004_create_poll_option_table::Migration),
            Box::new(m20260801_000005_create_poll_vote_table::Migration),
        ]
    }
}
