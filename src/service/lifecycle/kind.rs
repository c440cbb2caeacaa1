use chrono::{DateTime, Utc};

use crate::service::lifecycle::{Announcement, TimedEntity};

/// Kind-specific strategy plugged into the generic lifecycle manager.
///
/// A kind supplies the three associated data types and the pure logic that
/// differs between entity kinds: the contribution duplicate policy, the
/// outcome computation (winner draw, vote tally) and the announcement
/// content. Everything stateful lives in the manager.
pub trait EntityKind: Send + Sync + 'static {
    /// Kind-specific configuration carried by every entity.
    type Details: Clone + Send + Sync + 'static;
    /// One participant action (a giveaway entry, a poll vote).
    type Contribution: Clone + Send + Sync + 'static;
    /// Computed result of the termination transition.
    type Outcome: Clone + Send + Sync + 'static;

    /// Short noun used in logs and user-facing errors.
    const NAME: &'static str;

    /// Whether `incoming` violates the kind's contribution policy given the
    /// contributions already recorded.
    fn is_duplicate(
        details: &Self::Details,
        existing: &[Self::Contribution],
        incoming: &Self::Contribution,
    ) -> bool;

    /// Computes the outcome from the recorded contributions. Pure apart from
    /// randomness; invoked once per termination and once per reroll.
    fn compute_outcome(
        details: &Self::Details,
        contributions: &[Self::Contribution],
    ) -> Self::Outcome;

    /// The announcement published when the entity is created.
    fn start_announcement(
        details: &Self::Details,
        expires_at: Option<DateTime<Utc>>,
    ) -> Announcement;

    /// The announcement that replaces the original message once the entity
    /// has ended.
    fn result_announcement(
        entity: &TimedEntity<Self::Details>,
        outcome: &Self::Outcome,
    ) -> Announcement;

    /// The standalone announcement published by a reroll.
    fn reroll_announcement(
        entity: &TimedEntity<Self::Details>,
        outcome: &Self::Outcome,
    ) -> Announcement {
        Self::result_announcement(entity, outcome)
    }
}
