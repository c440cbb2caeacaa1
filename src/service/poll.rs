//! Poll strategy for the lifecycle engine: per-option tally with co-winner
//! ties. Single-choice polls allow one vote per user; multi-choice polls
//! allow one vote per user per option.

use chrono::{DateTime, Utc};

use crate::model::poll::{PollDetails, PollOutcome, PollVote};
use crate::service::lifecycle::{Announcement, AnnouncementButton, EntityKind, TimedEntity};

/// Custom id prefix of the vote buttons on a poll announcement; the option
/// index follows after a colon. The handler resolves the poll through the
/// message id carrying the button.
pub const VOTE_BUTTON_PREFIX: &str = "poll-vote";

const RUNNING_COLOR: u32 = 0x5865f2;
const ENDED_COLOR: u32 = 0x2ecc71;

pub struct PollKind;

impl EntityKind for PollKind {
    type Details = PollDetails;
    type Contribution = PollVote;
    type Outcome = PollOutcome;

    const NAME: &'static str = "poll";

    fn is_duplicate(details: &PollDetails, existing: &[PollVote], incoming: &PollVote) -> bool {
        if details.multi_choice {
            existing.iter().any(|vote| {
                vote.user_id == incoming.user_id && vote.option_index == incoming.option_index
            })
        } else {
            existing.iter().any(|vote| vote.user_id == incoming.user_id)
        }
    }

    fn compute_outcome(details: &PollDetails, votes: &[PollVote]) -> PollOutcome {
        tally(details, votes)
    }

    fn start_announcement(
        details: &PollDetails,
        expires_at: Option<DateTime<Utc>>,
    ) -> Announcement {
        let mut description = String::new();
        for (index, label) in details.options.iter().enumerate() {
            description.push_str(&format!("**{}.** {}\n", index + 1, label));
        }
        description.push('\n');
        match expires_at {
            Some(at) => description.push_str(&format!("Closes <t:{}:R>", at.timestamp())),
            None => description.push_str("Open until the host closes it"),
        }
        if details.multi_choice {
            description.push_str("\nYou may vote for several options.");
        }

        let buttons = details
            .options
            .iter()
            .enumerate()
            .map(|(index, label)| AnnouncementButton {
                custom_id: format!("{}:{}", VOTE_BUTTON_PREFIX, index),
                label: label.clone(),
            })
            .collect();

        Announcement {
            title: format!("📊 {}", details.question),
            description,
            color: RUNNING_COLOR,
            buttons,
        }
    }

    fn result_announcement(
        entity: &TimedEntity<PollDetails>,
        outcome: &PollOutcome,
    ) -> Announcement {
        let mut description = String::new();
        for (index, label) in entity.details.options.iter().enumerate() {
            let count = outcome.tallies.get(index).copied().unwrap_or(0);
            let marker = if outcome.winners.contains(&(index as i32)) {
                "🏆 "
            } else {
                ""
            };
            description.push_str(&format!("{}**{}** — {} vote(s)\n", marker, label, count));
        }
        match outcome.winners.len() {
            0 => description.push_str("\nNo votes were cast."),
            1 => {}
            _ => description.push_str("\nIt's a tie."),
        }

        Announcement {
            title: format!("📊 Poll closed: {}", entity.details.question),
            description,
            color: ENDED_COLOR,
            buttons: Vec::new(),
        }
    }
}

/// Tallies votes per option. The winners are all options sharing the maximum
/// count; a poll with no votes has no winners. Votes referencing an option
/// index outside the option list carry no weight.
pub fn tally(details: &PollDetails, votes: &[PollVote]) -> PollOutcome {
    let mut tallies = vec![0u64; details.options.len()];
    for vote in votes {
        if let Some(slot) = tallies.get_mut(vote.option_index as usize) {
            *slot += 1;
        }
    }

    let top = tallies.iter().copied().max().unwrap_or(0);
    let winners = if top == 0 {
        Vec::new()
    } else {
        tallies
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == top)
            .map(|(index, _)| index as i32)
            .collect()
    };

    PollOutcome {
        tallies,
        winners,
        total_votes: votes.len(),
    }
}
