//! Errors produced at the lifecycle manager boundary.
//!
//! Validation errors (`NotFound`, `DuplicateContribution`, `Forbidden`,
//! `NotEnded`, `AlreadyEnded`) are returned to the caller as typed results
//! and rendered as user-visible rejections. Infrastructure errors (`Store`,
//! `Publish`) are logged and retried on the next natural cycle (the next
//! reconciliation tick or the next command).

use thiserror::Error;

/// Failure to deliver an announcement to the chat platform.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The target message no longer exists, e.g. it was deleted by a
    /// moderator. Callers fall back to posting a standalone message.
    #[error("message not found")]
    NotFound,

    /// The chat platform rejected the call or could not be reached.
    #[error("chat platform unavailable: {0}")]
    Unavailable(String),
}

/// Typed error for the lifecycle manager operations.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// No entity with this id exists in the store or cache.
    #[error("no {kind} exists with id {id}")]
    NotFound { kind: &'static str, id: String },

    /// The entity's contribution policy forbids a repeat contribution from
    /// this user.
    #[error("a matching contribution to this {kind} already exists")]
    DuplicateContribution { kind: &'static str },

    /// A non-owner attempted an owner-only action.
    #[error("only the owner may end a {kind} early")]
    Forbidden { kind: &'static str },

    /// A reroll was attempted on an entity that is still running.
    #[error("{kind} {id} has not ended yet")]
    NotEnded { kind: &'static str, id: String },

    /// A contribution was attempted on an entity that is ended or past its
    /// expiry.
    #[error("{kind} {id} has already ended")]
    AlreadyEnded { kind: &'static str, id: String },

    /// An announcement could not be delivered.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// The backing store failed; surfaced to the caller rather than degrading
    /// to cache-only writes.
    #[error(transparent)]
    Store(#[from] sea_orm::DbErr),
}
