use async_trait::async_trait;

use crate::error::lifecycle::PublishError;

/// Chat-platform-agnostic content of an announcement message.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub title: String,
    pub description: String,
    /// Embed accent color.
    pub color: u32,
    /// Interactive buttons attached to the message; empty once an entity has
    /// ended.
    pub buttons: Vec<AnnouncementButton>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementButton {
    pub custom_id: String,
    pub label: String,
}

/// Outbound chat seam of the lifecycle manager.
///
/// Both calls are bounded by the underlying HTTP client's timeout and treated
/// as fallible; the manager never lets a publish failure roll back a
/// committed state transition.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Posts a new message and returns its id.
    async fn publish(
        &self,
        channel_id: &str,
        announcement: &Announcement,
    ) -> Result<String, PublishError>;

    /// Edits an existing message in place. Returns
    /// [`PublishError::NotFound`] when the message no longer exists so the
    /// caller can fall back to a standalone message.
    async fn edit(
        &self,
        channel_id: &str,
        message_id: &str,
        announcement: &Announcement,
    ) -> Result<(), PublishError>;
}
