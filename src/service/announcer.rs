//! Serenity-backed implementation of the lifecycle [`Publisher`] seam.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateMessage, EditMessage, MessageId,
};
use serenity::http::Http;

use crate::error::lifecycle::PublishError;
use crate::service::lifecycle::{Announcement, Publisher};

/// Discord cannot hold more than five buttons per action row.
const BUTTONS_PER_ROW: usize = 5;

/// Publishes lifecycle announcements as embeds through the Discord HTTP API.
#[derive(Clone)]
pub struct DiscordAnnouncer {
    http: Arc<Http>,
}

impl DiscordAnnouncer {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn embed(announcement: &Announcement) -> CreateEmbed {
        CreateEmbed::new()
            .title(announcement.title.clone())
            .description(announcement.description.clone())
            .color(announcement.color)
    }

    fn components(announcement: &Announcement) -> Vec<CreateActionRow> {
        announcement
            .buttons
            .chunks(BUTTONS_PER_ROW)
            .map(|row| {
                CreateActionRow::Buttons(
                    row.iter()
                        .map(|button| {
                            CreateButton::new(button.custom_id.clone())
                                .label(button.label.clone())
                        })
                        .collect(),
                )
            })
            .collect()
    }

    fn parse_channel(channel_id: &str) -> Result<ChannelId, PublishError> {
        channel_id
            .parse::<u64>()
            .map(ChannelId::new)
            .map_err(|_| PublishError::Unavailable(format!("invalid channel id {}", channel_id)))
    }
}

#[async_trait]
impl Publisher for DiscordAnnouncer {
    async fn publish(
        &self,
        channel_id: &str,
        announcement: &Announcement,
    ) -> Result<String, PublishError> {
        let channel_id = Self::parse_channel(channel_id)?;

        let mut message = CreateMessage::new().embed(Self::embed(announcement));
        let components = Self::components(announcement);
        if !components.is_empty() {
            message = message.components(components);
        }

        let sent = channel_id
            .send_message(&self.http, message)
            .await
            .map_err(map_discord_err)?;
        Ok(sent.id.to_string())
    }

    async fn edit(
        &self,
        channel_id: &str,
        message_id: &str,
        announcement: &Announcement,
    ) -> Result<(), PublishError> {
        let channel_id = Self::parse_channel(channel_id)?;
        let message_id = message_id
            .parse::<u64>()
            .map(MessageId::new)
            .map_err(|_| PublishError::Unavailable(format!("invalid message id {}", message_id)))?;

        // Replacing the components drops the buttons of ended entities.
        let edit = EditMessage::new()
            .embed(Self::embed(announcement))
            .components(Self::components(announcement));

        self.http
            .edit_message(channel_id, message_id, &edit, vec![])
            .await
            .map_err(map_discord_err)?;
        Ok(())
    }
}

fn map_discord_err(err: serenity::Error) -> PublishError {
    if let serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(ref response)) = err
    {
        if response.status_code.as_u16() == 404 {
            return PublishError::NotFound;
        }
    }
    PublishError::Unavailable(err.to_string())
}
