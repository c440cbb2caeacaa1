//! Domain models for the lifecycle engine.
//!
//! Repositories convert SeaORM entity models into these types at the data
//! boundary; the manager and the command surface only ever see domain models.

pub mod giveaway;
pub mod poll;
