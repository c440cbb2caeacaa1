use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::data::poll::PollRepository;
use crate::model::poll::{Poll, PollDetails};

mod add_vote;
mod create;
mod list_active_expired;
mod mark_ended;

fn sample_poll(id: &str, options: &[&str], expires_at: Option<DateTime<Utc>>) -> Poll {
    Poll {
        id: id.to_string(),
        guild_id: "guild-1".to_string(),
        channel_id: "channel-1".to_string(),
        owner_id: "owner-1".to_string(),
        created_at: Utc::now(),
        expires_at,
        active: true,
        ended: false,
        details: PollDetails {
            question: "Which one?".to_string(),
            options: options.iter().map(|label| label.to_string()).collect(),
            multi_choice: false,
        },
    }
}
