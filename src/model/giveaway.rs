//! Domain models for giveaways.

use chrono::{DateTime, Utc};

use crate::service::lifecycle::TimedEntity;

/// A giveaway is a timed entity whose details are the prize configuration.
pub type Giveaway = TimedEntity<GiveawayDetails>;

/// Prize configuration for a giveaway.
#[derive(Debug, Clone, PartialEq)]
pub struct GiveawayDetails {
    /// What the winner receives.
    pub prize: String,
    /// Optional free-form text shown in the announcement.
    pub description: Option<String>,
    /// How many distinct winners to draw.
    pub winner_count: u32,
}

/// One user's entry into a giveaway.
#[derive(Debug, Clone, PartialEq)]
pub struct GiveawayEntry {
    pub user_id: String,
    pub entered_at: DateTime<Utc>,
}

/// Result of a giveaway draw.
#[derive(Debug, Clone, PartialEq)]
pub struct GiveawayOutcome {
    /// Winning user ids; `min(entrants, winner_count)` of them, no
    /// duplicates. Empty when no one entered.
    pub winners: Vec<String>,
    pub entrant_count: usize,
}

impl Giveaway {
    /// Converts an entity model to the domain model at the repository
    /// boundary.
    pub fn from_entity(model: entity::giveaway::Model) -> Self {
        Self {
            id: model.id,
            guild_id: model.guild_id,
            channel_id: model.channel_id,
            owner_id: model.owner_id,
            created_at: model.created_at,
            expires_at: model.expires_at,
            active: model.active,
            ended: model.ended,
            details: GiveawayDetails {
                prize: model.prize,
                description: model.description,
                winner_count: model.winner_count.max(0) as u32,
            },
        }
    }
}

impl GiveawayEntry {
    pub fn from_entity(model: entity::giveaway_entry::Model) -> Self {
        Self {
            user_id: model.user_id,
            entered_at: model.entered_at,
        }
    }
}
