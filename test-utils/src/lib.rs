//! Raffleboard Test Utils
//!
//! Shared testing utilities for the raffleboard application: a builder for
//! test contexts backed by in-memory SQLite databases, and factories that
//! create giveaway and poll rows with sensible defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_giveaway_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_giveaway_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
