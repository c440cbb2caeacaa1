use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::error::lifecycle::{LifecycleError, PublishError};
use crate::service::lifecycle::{EntityKind, EntityStore, Publisher, TimedEntity};

use super::LifecycleSettings;

/// Parameters for creating a new timed entity.
#[derive(Debug, Clone)]
pub struct CreateEntity<D> {
    pub guild_id: String,
    pub channel_id: String,
    pub owner_id: String,
    /// How long the entity runs; `None` means it only ends manually.
    pub duration: Option<Duration>,
    pub details: D,
}

/// What startup catch-up found in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StartupReport {
    /// Active entities restored into the cache.
    pub restored: usize,
    /// Entities whose expiry passed while the process was down and that were
    /// finalized during catch-up.
    pub finalized: usize,
}

/// In-process authoritative view of one entity, backed by the store.
struct CacheEntry<K: EntityKind> {
    entity: TimedEntity<K::Details>,
    contributions: Vec<K::Contribution>,
    /// When the entity was observed ended, for retention cleanup.
    ended_at: Option<DateTime<Utc>>,
}

/// Generic lifecycle manager: one instance per entity kind.
///
/// Command handlers call `create`, `contribute`, `end_now` and `reroll`; the
/// reconciliation scheduler calls `tick`. All mutating operations serialize
/// behind the cache mutex; the check-then-set on `ended` together with the
/// store's compare-and-set is the exclusive critical section that makes the
/// termination transition idempotent. Announcements are published outside
/// the lock, after the commit point, so chat-API latency never blocks other
/// entities.
pub struct LifecycleManager<K, S, P>
where
    K: EntityKind,
    S: EntityStore<K>,
    P: Publisher,
{
    store: S,
    publisher: P,
    settings: LifecycleSettings,
    cache: Mutex<HashMap<String, CacheEntry<K>>>,
}

impl<K, S, P> LifecycleManager<K, S, P>
where
    K: EntityKind,
    S: EntityStore<K>,
    P: Publisher,
{
    pub fn new(store: S, publisher: P, settings: LifecycleSettings) -> Self {
        Self {
            store,
            publisher,
            settings,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Pulls all active entities from the store into the cache and finalizes
    /// those whose expiry passed while the process was down.
    ///
    /// Catch-up finalization is silent unless
    /// `settings.announce_on_startup_catchup` is set: the outage already
    /// missed the natural end time, and a burst of stale result messages
    /// after a long downtime would only flood the channel.
    ///
    /// # Arguments
    /// - `now`: the wall-clock instant expiry is evaluated against
    ///
    /// # Returns
    /// - `Ok(StartupReport)`: how many entities were restored and finalized
    /// - `Err(LifecycleError::Store)`: the store could not be read
    pub async fn load_active(&self, now: DateTime<Utc>) -> Result<StartupReport, LifecycleError> {
        let mut report = StartupReport::default();
        let active = self.store.list_active().await?;

        let mut cache = self.cache.lock().await;
        for mut entity in active {
            let contributions = self.store.contributions(&entity.id).await?;

            if entity.is_expired(now) {
                let committed = self.store.mark_ended(&entity.id).await?;
                entity.active = false;
                entity.ended = true;

                if committed {
                    report.finalized += 1;
                    let outcome = K::compute_outcome(&entity.details, &contributions);
                    tracing::info!(
                        "{} {} expired while offline, finalized during catch-up",
                        K::NAME,
                        entity.id
                    );
                    if self.settings.announce_on_startup_catchup {
                        self.announce_result(&entity, &outcome).await;
                    }
                }

                cache.insert(
                    entity.id.clone(),
                    CacheEntry {
                        entity,
                        contributions,
                        ended_at: Some(now),
                    },
                );
            } else {
                report.restored += 1;
                cache.insert(
                    entity.id.clone(),
                    CacheEntry {
                        entity,
                        contributions,
                        ended_at: None,
                    },
                );
            }
        }

        Ok(report)
    }

    /// Publishes the start announcement, then persists the new entity under
    /// the announcement's message id and caches it.
    ///
    /// # Returns
    /// - `Ok(entity)`: the created entity, `active` and not `ended`
    /// - `Err(LifecycleError::Publish)`: the announcement could not be posted
    /// - `Err(LifecycleError::Store)`: the insert failed (including an id
    ///   collision)
    pub async fn create(
        &self,
        params: CreateEntity<K::Details>,
    ) -> Result<TimedEntity<K::Details>, LifecycleError> {
        let now = Utc::now();
        let expires_at = params.duration.map(|duration| now + duration);

        let announcement = K::start_announcement(&params.details, expires_at);
        let message_id = self
            .publisher
            .publish(&params.channel_id, &announcement)
            .await?;

        let entity = TimedEntity {
            id: message_id,
            guild_id: params.guild_id,
            channel_id: params.channel_id,
            owner_id: params.owner_id,
            created_at: now,
            expires_at,
            active: true,
            ended: false,
            details: params.details,
        };

        let mut cache = self.cache.lock().await;
        if let Err(err) = self.store.insert(&entity).await {
            // The announcement is already out; surface the failure instead of
            // letting cache and store diverge.
            tracing::error!(
                "failed to persist new {} {} after announcing it: {}",
                K::NAME,
                entity.id,
                err
            );
            return Err(err.into());
        }
        cache.insert(
            entity.id.clone(),
            CacheEntry {
                entity: entity.clone(),
                contributions: Vec::new(),
                ended_at: None,
            },
        );

        Ok(entity)
    }

    /// Records one contribution (entry or vote) for a running entity.
    ///
    /// The store write happens first; the cache only reflects committed
    /// writes, so a failed write leaves both sides converged.
    ///
    /// # Returns
    /// - `Err(LifecycleError::AlreadyEnded)`: the entity is ended or past
    ///   its expiry
    /// - `Err(LifecycleError::DuplicateContribution)`: the kind's policy
    ///   rejected a repeat contribution
    pub async fn contribute(
        &self,
        id: &str,
        contribution: K::Contribution,
    ) -> Result<(), LifecycleError> {
        let now = Utc::now();
        let mut cache = self.cache.lock().await;
        let entry = self.ensure_cached(&mut cache, id, now).await?;

        if entry.entity.ended || entry.entity.is_expired(now) {
            return Err(LifecycleError::AlreadyEnded {
                kind: K::NAME,
                id: id.to_string(),
            });
        }
        if K::is_duplicate(&entry.entity.details, &entry.contributions, &contribution) {
            return Err(LifecycleError::DuplicateContribution { kind: K::NAME });
        }

        self.store.add_contribution(id, &contribution).await?;
        entry.contributions.push(contribution);
        Ok(())
    }

    /// Ends an entity now on behalf of `requester_id`.
    ///
    /// Owner-only: the manual path enforces ownership, the timer path does
    /// not. Racing the reconciliation tick is safe: whichever side commits
    /// first announces, the other becomes a no-op.
    ///
    /// # Returns
    /// - `Ok(Some(outcome))`: this call performed the termination
    /// - `Ok(None)`: the entity had already ended
    /// - `Err(LifecycleError::Forbidden)`: the requester is not the owner
    pub async fn end_now(
        &self,
        id: &str,
        requester_id: &str,
    ) -> Result<Option<K::Outcome>, LifecycleError> {
        let now = Utc::now();
        let finalized = {
            let mut cache = self.cache.lock().await;
            let entry = self.ensure_cached(&mut cache, id, now).await?;
            if entry.entity.owner_id != requester_id {
                return Err(LifecycleError::Forbidden { kind: K::NAME });
            }
            self.finalize_locked(&mut cache, id, now).await?
        };

        match finalized {
            Some((entity, outcome)) => {
                self.announce_result(&entity, &outcome).await;
                Ok(Some(outcome))
            }
            None => Ok(None),
        }
    }

    /// Recomputes the outcome of an already-ended entity and publishes it as
    /// a standalone announcement.
    ///
    /// Does not touch `active`/`ended`. Unlike tick-time announcements the
    /// publish failure is surfaced: a human asked for the reroll and can
    /// retry.
    ///
    /// # Returns
    /// - `Err(LifecycleError::NotEnded)`: the entity is still running
    pub async fn reroll(&self, id: &str) -> Result<K::Outcome, LifecycleError> {
        let now = Utc::now();
        let (entity, outcome) = {
            let mut cache = self.cache.lock().await;
            let entry = self.ensure_cached(&mut cache, id, now).await?;
            if !entry.entity.ended {
                return Err(LifecycleError::NotEnded {
                    kind: K::NAME,
                    id: id.to_string(),
                });
            }
            let outcome = K::compute_outcome(&entry.entity.details, &entry.contributions);
            (entry.entity.clone(), outcome)
        };

        let announcement = K::reroll_announcement(&entity, &outcome);
        self.publisher
            .publish(&entity.channel_id, &announcement)
            .await?;
        Ok(outcome)
    }

    /// Snapshot of an entity and its contributions, for display.
    pub async fn get(
        &self,
        id: &str,
    ) -> Result<(TimedEntity<K::Details>, Vec<K::Contribution>), LifecycleError> {
        let now = Utc::now();
        let mut cache = self.cache.lock().await;
        let entry = self.ensure_cached(&mut cache, id, now).await?;
        Ok((entry.entity.clone(), entry.contributions.clone()))
    }

    /// One reconciliation pass: finalizes every active entity whose expiry
    /// has passed, then evicts cache entries that have been ended longer
    /// than the retention window.
    ///
    /// Per-entity failures are logged and retried on the next tick; only a
    /// failure to enumerate the due entities aborts the pass.
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        let due = self.store.list_active_expired(now).await?;

        for expired in due {
            let finalized = {
                let mut cache = self.cache.lock().await;
                let ensured = self
                    .ensure_cached(&mut cache, &expired.id, now)
                    .await
                    .map(|_| ());
                match ensured {
                    Ok(()) => self.finalize_locked(&mut cache, &expired.id, now).await,
                    Err(err) => Err(err),
                }
            };

            match finalized {
                Ok(Some((entity, outcome))) => {
                    tracing::info!("{} {} expired, announcing result", K::NAME, entity.id);
                    self.announce_result(&entity, &outcome).await;
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(
                        "failed to finalize expired {} {}: {}",
                        K::NAME,
                        expired.id,
                        err
                    );
                }
            }
        }

        let mut cache = self.cache.lock().await;
        cache.retain(|_, entry| match entry.ended_at {
            Some(ended_at) => now - ended_at < self.settings.retention,
            None => true,
        });

        Ok(())
    }

    /// Loads an entity (and its contributions) into the cache if it is not
    /// already there.
    async fn ensure_cached<'a>(
        &self,
        cache: &'a mut HashMap<String, CacheEntry<K>>,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<&'a mut CacheEntry<K>, LifecycleError> {
        if !cache.contains_key(id) {
            let entity = self.store.get(id).await?.ok_or_else(|| {
                LifecycleError::NotFound {
                    kind: K::NAME,
                    id: id.to_string(),
                }
            })?;
            let contributions = self.store.contributions(id).await?;
            let ended_at = entity.ended.then_some(now);
            cache.insert(
                id.to_string(),
                CacheEntry {
                    entity,
                    contributions,
                    ended_at,
                },
            );
        }

        match cache.get_mut(id) {
            Some(entry) => Ok(entry),
            None => Err(LifecycleError::NotFound {
                kind: K::NAME,
                id: id.to_string(),
            }),
        }
    }

    /// The termination transition's critical section. Must run with the
    /// cache lock held.
    ///
    /// Re-checks `ended`, commits the flip through the store's
    /// compare-and-set, mirrors it in the cache and computes the outcome.
    /// Returns `None` when the entity had already ended; the caller then
    /// performs no side effects.
    async fn finalize_locked(
        &self,
        cache: &mut HashMap<String, CacheEntry<K>>,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<(TimedEntity<K::Details>, K::Outcome)>, LifecycleError> {
        let entry = match cache.get_mut(id) {
            Some(entry) => entry,
            None => {
                return Err(LifecycleError::NotFound {
                    kind: K::NAME,
                    id: id.to_string(),
                })
            }
        };
        if entry.entity.ended {
            return Ok(None);
        }

        // Commit point. The cache is only touched once the store write
        // succeeded, so a store failure leaves both sides converged.
        let committed = self.store.mark_ended(id).await?;
        entry.entity.active = false;
        entry.entity.ended = true;
        entry.ended_at = Some(now);

        if !committed {
            // Another finalizer won the race in the store; mirror the state
            // and stand down.
            return Ok(None);
        }

        let outcome = K::compute_outcome(&entry.entity.details, &entry.contributions);
        Ok(Some((entry.entity.clone(), outcome)))
    }

    /// Publishes the result of a committed termination: edits the original
    /// announcement when it still exists, otherwise posts a standalone
    /// fallback. Failures are logged only: the ended state is already
    /// committed and the next command or tick will not retry the
    /// announcement.
    async fn announce_result(&self, entity: &TimedEntity<K::Details>, outcome: &K::Outcome) {
        let announcement = K::result_announcement(entity, outcome);
        match self
            .publisher
            .edit(&entity.channel_id, &entity.id, &announcement)
            .await
        {
            Ok(()) => {}
            Err(PublishError::NotFound) => {
                // The original message is gone; the result still has to
                // reach the channel.
                if let Err(err) = self
                    .publisher
                    .publish(&entity.channel_id, &announcement)
                    .await
                {
                    tracing::error!(
                        "{} {} ended but the fallback announcement failed: {}",
                        K::NAME,
                        entity.id,
                        err
                    );
                }
            }
            Err(err) => {
                tracing::error!(
                    "{} {} ended but the announcement failed: {}",
                    K::NAME,
                    entity.id,
                    err
                );
            }
        }
    }

    #[cfg(test)]
    pub(crate) async fn cached_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}
