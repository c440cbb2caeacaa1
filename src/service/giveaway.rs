//! Giveaway strategy for the lifecycle engine: single entry per user,
//! uniform winner selection without replacement.

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;

use crate::model::giveaway::{GiveawayDetails, GiveawayEntry, GiveawayOutcome};
use crate::service::lifecycle::{Announcement, AnnouncementButton, EntityKind, TimedEntity};

/// Custom id of the enter button on a giveaway announcement. The handler
/// resolves the giveaway through the message id carrying the button.
pub const ENTER_BUTTON_ID: &str = "giveaway-enter";

const RUNNING_COLOR: u32 = 0x3498db;
const ENDED_COLOR: u32 = 0x9b59b6;

pub struct GiveawayKind;

impl EntityKind for GiveawayKind {
    type Details = GiveawayDetails;
    type Contribution = GiveawayEntry;
    type Outcome = GiveawayOutcome;

    const NAME: &'static str = "giveaway";

    fn is_duplicate(
        _details: &GiveawayDetails,
        existing: &[GiveawayEntry],
        incoming: &GiveawayEntry,
    ) -> bool {
        existing.iter().any(|entry| entry.user_id == incoming.user_id)
    }

    fn compute_outcome(details: &GiveawayDetails, entries: &[GiveawayEntry]) -> GiveawayOutcome {
        GiveawayOutcome {
            winners: select_winners(entries, details.winner_count as usize),
            entrant_count: entries.len(),
        }
    }

    fn start_announcement(
        details: &GiveawayDetails,
        expires_at: Option<DateTime<Utc>>,
    ) -> Announcement {
        let mut description = String::new();
        if let Some(text) = &details.description {
            description.push_str(text);
            description.push_str("\n\n");
        }
        description.push_str(&format!("**{}** winner(s) will be drawn.\n", details.winner_count));
        match expires_at {
            Some(at) => description.push_str(&format!("Ends <t:{}:R>", at.timestamp())),
            None => description.push_str("Runs until the host ends it"),
        }

        Announcement {
            title: format!("🎉 Giveaway: {}", details.prize),
            description,
            color: RUNNING_COLOR,
            buttons: vec![AnnouncementButton {
                custom_id: ENTER_BUTTON_ID.to_string(),
                label: "Enter".to_string(),
            }],
        }
    }

    fn result_announcement(
        entity: &TimedEntity<GiveawayDetails>,
        outcome: &GiveawayOutcome,
    ) -> Announcement {
        let description = if outcome.winners.is_empty() {
            "No one entered, so there is no winner.".to_string()
        } else {
            format!(
                "Congratulations {} — you won **{}**! ({} entrant(s))",
                mention_list(&outcome.winners),
                entity.details.prize,
                outcome.entrant_count
            )
        };

        Announcement {
            title: format!("🎉 Giveaway ended: {}", entity.details.prize),
            description,
            color: ENDED_COLOR,
            buttons: Vec::new(),
        }
    }

    fn reroll_announcement(
        entity: &TimedEntity<GiveawayDetails>,
        outcome: &GiveawayOutcome,
    ) -> Announcement {
        let description = if outcome.winners.is_empty() {
            "No one entered, so there is still no winner.".to_string()
        } else {
            format!(
                "🎲 New draw for **{}**: congratulations {}!",
                entity.details.prize,
                mention_list(&outcome.winners)
            )
        };

        Announcement {
            title: format!("🎉 Giveaway reroll: {}", entity.details.prize),
            description,
            color: ENDED_COLOR,
            buttons: Vec::new(),
        }
    }
}

/// Draws `count` distinct winners uniformly without replacement. All
/// entrants win when there are fewer entrants than prizes.
pub fn select_winners(entries: &[GiveawayEntry], count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    entries
        .choose_multiple(&mut rng, count)
        .map(|entry| entry.user_id.clone())
        .collect()
}

fn mention_list(user_ids: &[String]) -> String {
    user_ids
        .iter()
        .map(|user_id| format!("<@{}>", user_id))
        .collect::<Vec<_>>()
        .join(", ")
}
