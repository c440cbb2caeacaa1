//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` struct for customization and `create_*`
//! convenience functions for quick default creation. Factories insert rows
//! directly through the entity models, bypassing the application layers.

pub mod giveaway;
pub mod helpers;
pub mod poll;

// Re-export commonly used factory functions for concise usage
pub use giveaway::{create_entry, create_giveaway};
pub use poll::{create_poll, create_poll_option, create_vote};
