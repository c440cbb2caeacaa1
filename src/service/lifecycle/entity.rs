use chrono::{DateTime, Duration, Utc};

/// Shared shape of every timed entity, parameterized by the kind-specific
/// details (prize configuration, question and options, ...).
///
/// The id doubles as the Discord message id of the announcement message
/// hosting the entity. Exactly one of `active`/`ended` is true at any time
/// after creation; only those two fields change post-creation.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEntity<D> {
    pub id: String,
    pub guild_id: String,
    pub channel_id: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    /// `None` means the entity never auto-expires and must be ended manually.
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub ended: bool,
    pub details: D,
}

impl<D> TimedEntity<D> {
    /// Whether the entity's expiry has passed. Entities without an expiry
    /// never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if expires_at <= now)
    }
}

/// Tunable policy knobs of a lifecycle manager.
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    /// How long ended entities stay cached (serving rerolls and result
    /// lookups) before the reconciliation tick evicts them. Store rows are
    /// never deleted by the engine.
    pub retention: Duration,
    /// Whether startup catch-up announces entities that expired while the
    /// process was down. Off by default: after a long outage the natural end
    /// time is long past and a burst of stale result messages would only
    /// flood the channel.
    pub announce_on_startup_catchup: bool,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            retention: Duration::hours(24),
            announce_on_startup_catchup: false,
        }
    }
}
