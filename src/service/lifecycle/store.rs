use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::service::lifecycle::{EntityKind, TimedEntity};

/// Durable persistence seam of the lifecycle manager, implemented by the
/// SeaORM repositories in `crate::data`.
///
/// The store is the source of truth: the manager only mutates its cache
/// after the corresponding store write has committed.
#[async_trait]
pub trait EntityStore<K: EntityKind>: Send + Sync {
    /// Persists a newly created entity. Fails if the id already exists.
    async fn insert(&self, entity: &TimedEntity<K::Details>) -> Result<(), DbErr>;

    /// Loads one entity by id.
    async fn get(&self, id: &str) -> Result<Option<TimedEntity<K::Details>>, DbErr>;

    /// All entities with `active = true`, including those whose expiry has
    /// already passed; used by startup catch-up.
    async fn list_active(&self) -> Result<Vec<TimedEntity<K::Details>>, DbErr>;

    /// All entities with `active = true` and `expires_at <= now`; used by
    /// the reconciliation tick, so it must stay cheap to run every few
    /// seconds.
    async fn list_active_expired(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<TimedEntity<K::Details>>, DbErr>;

    /// Atomically flips `active = false, ended = true`. Returns whether this
    /// call performed the flip: two racing finalizers cannot both observe
    /// `true`, which makes the termination transition's side effects
    /// exactly-once.
    async fn mark_ended(&self, id: &str) -> Result<bool, DbErr>;

    /// Persists one contribution.
    async fn add_contribution(
        &self,
        id: &str,
        contribution: &K::Contribution,
    ) -> Result<(), DbErr>;

    /// All contributions recorded for an entity, in insertion order.
    async fn contributions(&self, id: &str) -> Result<Vec<K::Contribution>, DbErr>;
}
