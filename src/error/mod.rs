//! Error types for the application.
//!
//! `AppError` aggregates the infrastructure errors that can occur while the
//! bot runs (database, Discord, scheduler, configuration). The lifecycle
//! engine has its own typed error in [`lifecycle`], which is recovered at the
//! manager boundary and mapped to user-facing replies by the command surface
//! rather than propagated as fatal.

pub mod config;
pub mod lifecycle;

use thiserror::Error;

use crate::error::{config::ConfigError, lifecycle::LifecycleError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity. Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Lifecycle engine error escaping a startup-time operation.
    #[error(transparent)]
    LifecycleErr(#[from] LifecycleError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to keep the AppError enum small, as serenity::Error is
/// very large and would inflate every other variant if stored inline.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
