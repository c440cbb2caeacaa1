use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::data::giveaway::GiveawayRepository;
use crate::model::giveaway::{Giveaway, GiveawayDetails};

mod add_entry;
mod create;
mod get_by_id;
mod list_active_expired;
mod mark_ended;

fn sample_giveaway(id: &str, expires_at: Option<DateTime<Utc>>) -> Giveaway {
    Giveaway {
        id: id.to_string(),
        guild_id: "guild-1".to_string(),
        channel_id: "channel-1".to_string(),
        owner_id: "owner-1".to_string(),
        created_at: Utc::now(),
        expires_at,
        active: true,
        ended: false,
        details: GiveawayDetails {
            prize: "Nitro".to_string(),
            description: Some("Test giveaway".to_string()),
            winner_count: 1,
        },
    }
}
