//! Domain models for polls.
//!
//! Scheduled polls carry an expiry; live polls have no expiry and only end
//! when their owner closes them. Both share the same shape.

use chrono::{DateTime, Utc};

use crate::service::lifecycle::TimedEntity;

/// A poll is a timed entity whose details are the question and its options.
pub type Poll = TimedEntity<PollDetails>;

#[derive(Debug, Clone, PartialEq)]
pub struct PollDetails {
    pub question: String,
    /// Option labels, indexed by the `option_index` votes refer to.
    pub options: Vec<String>,
    /// When true a user may vote for several distinct options; a repeat vote
    /// for the same option is still rejected.
    pub multi_choice: bool,
}

/// One vote cast in a poll.
#[derive(Debug, Clone, PartialEq)]
pub struct PollVote {
    pub user_id: String,
    pub option_index: i32,
    pub voted_at: DateTime<Utc>,
}

/// Result of tallying a poll.
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    /// Vote count per option, indexed like `PollDetails::options`.
    pub tallies: Vec<u64>,
    /// Indices of the option(s) with the maximum count. Ties produce
    /// several co-winners; an unvoted poll produces none.
    pub winners: Vec<i32>,
    pub total_votes: usize,
}

impl Poll {
    /// Converts a poll entity model and its option rows to the domain model
    /// at the repository boundary. Options must be ordered by option index.
    pub fn from_entity(
        model: entity::poll::Model,
        options: Vec<entity::poll_option::Model>,
    ) -> Self {
        Self {
            id: model.id,
            guild_id: model.guild_id,
            channel_id: model.channel_id,
            owner_id: model.owner_id,
            created_at: model.created_at,
            expires_at: model.expires_at,
            active: model.active,
            ended: model.ended,
            details: PollDetails {
                question: model.question,
                options: options.into_iter().map(|option| option.label).collect(),
                multi_choice: model.multi_choice,
            },
        }
    }
}

impl PollVote {
    pub fn from_entity(model: entity::poll_vote::Model) -> Self {
        Self {
            user_id: model.user_id,
            option_index: model.option_index,
            voted_at: model.voted_at,
        }
    }
}
