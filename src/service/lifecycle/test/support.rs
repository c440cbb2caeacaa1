//! Shared scaffolding for the lifecycle manager tests: managers wired to an
//! in-memory SQLite store and a recording publisher.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use test_utils::builder::TestBuilder;

use crate::data::giveaway::GiveawayRepository;
use crate::data::poll::PollRepository;
use crate::error::lifecycle::PublishError;
use crate::model::giveaway::{GiveawayDetails, GiveawayEntry};
use crate::model::poll::{PollDetails, PollVote};
use crate::service::giveaway::GiveawayKind;
use crate::service::lifecycle::{
    Announcement, CreateEntity, LifecycleManager, LifecycleSettings, Publisher,
};
use crate::service::poll::PollKind;

/// One message the recording publisher delivered.
#[derive(Clone, Debug)]
pub enum Delivery {
    Published {
        channel_id: String,
        title: String,
        description: String,
    },
    Edited {
        message_id: String,
        title: String,
        description: String,
    },
}

/// In-process publisher that records every delivery and can simulate a
/// vanished message or an unreachable chat platform.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    deliveries: Mutex<Vec<Delivery>>,
    next_message_id: AtomicU64,
    edits_fail_not_found: AtomicBool,
    edits_fail_unavailable: AtomicBool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.inner.deliveries.lock().unwrap().clone()
    }

    pub fn publish_count(&self) -> usize {
        self.deliveries()
            .iter()
            .filter(|delivery| matches!(delivery, Delivery::Published { .. }))
            .count()
    }

    pub fn edit_count(&self) -> usize {
        self.deliveries()
            .iter()
            .filter(|delivery| matches!(delivery, Delivery::Edited { .. }))
            .count()
    }

    /// Every subsequent edit fails as if the target message were deleted.
    pub fn fail_edits_with_not_found(&self) {
        self.inner.edits_fail_not_found.store(true, Ordering::SeqCst);
    }

    /// Every subsequent edit fails as if the chat platform were down.
    pub fn fail_edits_with_unavailable(&self) {
        self.inner
            .edits_fail_unavailable
            .store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(
        &self,
        channel_id: &str,
        announcement: &Announcement,
    ) -> Result<String, PublishError> {
        let id = self.inner.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.deliveries.lock().unwrap().push(Delivery::Published {
            channel_id: channel_id.to_string(),
            title: announcement.title.clone(),
            description: announcement.description.clone(),
        });
        Ok(format!("message-{}", id))
    }

    async fn edit(
        &self,
        _channel_id: &str,
        message_id: &str,
        announcement: &Announcement,
    ) -> Result<(), PublishError> {
        if self.inner.edits_fail_not_found.load(Ordering::SeqCst) {
            return Err(PublishError::NotFound);
        }
        if self.inner.edits_fail_unavailable.load(Ordering::SeqCst) {
            return Err(PublishError::Unavailable("simulated outage".to_string()));
        }
        self.inner.deliveries.lock().unwrap().push(Delivery::Edited {
            message_id: message_id.to_string(),
            title: announcement.title.clone(),
            description: announcement.description.clone(),
        });
        Ok(())
    }
}

pub type TestGiveawayManager =
    LifecycleManager<GiveawayKind, GiveawayRepository, RecordingPublisher>;
pub type TestPollManager = LifecycleManager<PollKind, PollRepository, RecordingPublisher>;

pub async fn giveaway_manager() -> (TestGiveawayManager, RecordingPublisher, DatabaseConnection) {
    giveaway_manager_with(LifecycleSettings::default()).await
}

pub async fn giveaway_manager_with(
    settings: LifecycleSettings,
) -> (TestGiveawayManager, RecordingPublisher, DatabaseConnection) {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.unwrap();
    let publisher = RecordingPublisher::new();
    let manager = LifecycleManager::new(
        GiveawayRepository::new(db.clone()),
        publisher.clone(),
        settings,
    );
    (manager, publisher, db)
}

pub async fn poll_manager() -> (TestPollManager, RecordingPublisher, DatabaseConnection) {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.unwrap();
    let publisher = RecordingPublisher::new();
    let manager = LifecycleManager::new(
        PollRepository::new(db.clone()),
        publisher.clone(),
        LifecycleSettings::default(),
    );
    (manager, publisher, db)
}

pub fn giveaway_params(
    owner_id: &str,
    winner_count: u32,
    duration: Option<Duration>,
) -> CreateEntity<GiveawayDetails> {
    CreateEntity {
        guild_id: "guild-1".to_string(),
        channel_id: "channel-1".to_string(),
        owner_id: owner_id.to_string(),
        duration,
        details: GiveawayDetails {
            prize: "Nitro".to_string(),
            description: None,
            winner_count,
        },
    }
}

pub fn poll_params(
    owner_id: &str,
    options: &[&str],
    multi_choice: bool,
    duration: Option<Duration>,
) -> CreateEntity<PollDetails> {
    CreateEntity {
        guild_id: "guild-1".to_string(),
        channel_id: "channel-1".to_string(),
        owner_id: owner_id.to_string(),
        duration,
        details: PollDetails {
            question: "Which one?".to_string(),
            options: options.iter().map(|label| label.to_string()).collect(),
            multi_choice,
        },
    }
}

pub fn entry(user_id: &str) -> GiveawayEntry {
    GiveawayEntry {
        user_id: user_id.to_string(),
        entered_at: Utc::now(),
    }
}

pub fn ballot(user_id: &str, option_index: i32) -> PollVote {
    PollVote {
        user_id: user_id.to_string(),
        option_index,
        voted_at: Utc::now(),
    }
}
