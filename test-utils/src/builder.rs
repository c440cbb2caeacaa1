use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Use the builder pattern to add entity tables, then call `build()` to get
/// a test context with an in-memory SQLite database.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Giveaway, GiveawayEntry};
///
/// let test = TestBuilder::new()
///     .with_table(Giveaway)
///     .with_table(GiveawayEntry)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements to execute during database setup, generated
    /// from entity models and executed in insertion order.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables should be added in dependency order (tables with foreign keys
    /// after their referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables required for giveaway operations: `Giveaway` and
    /// `GiveawayEntry`.
    pub fn with_giveaway_tables(self) -> Self {
        self.with_table(Giveaway).with_table(GiveawayEntry)
    }

    /// Adds the tables required for poll operations: `Poll`, `PollOption`
    /// and `PollVote`.
    pub fn with_poll_tables(self) -> Self {
        self.with_table(Poll)
            .with_table(PollOption)
            .with_table(PollVote)
    }

    /// Builds and initializes the test context with the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
