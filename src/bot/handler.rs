use std::sync::Arc;

use serenity::all::{
    ActivityData, Command, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, EventHandler, Interaction, Ready,
};
use serenity::async_trait;

use crate::bot::commands;
use crate::service::poll::VOTE_BUTTON_PREFIX;
use crate::service::{giveaway::ENTER_BUTTON_ID, GiveawayManager, PollManager};

/// Discord bot event handler. Dispatches slash commands and button
/// interactions to the lifecycle managers; every reply is ephemeral.
pub struct Handler {
    giveaways: Arc<GiveawayManager>,
    polls: Arc<PollManager>,
}

impl Handler {
    pub fn new(giveaways: Arc<GiveawayManager>, polls: Arc<PollManager>) -> Self {
        Self { giveaways, polls }
    }

    async fn handle_component(&self, component: &ComponentInteraction) -> String {
        let custom_id = component.data.custom_id.as_str();

        if custom_id == ENTER_BUTTON_ID {
            return commands::giveaway::enter(&self.giveaways, component).await;
        }
        if let Some(index) = custom_id.strip_prefix(&format!("{}:", VOTE_BUTTON_PREFIX)) {
            return commands::poll::vote(&self.polls, component, index).await;
        }

        tracing::warn!("Unknown component interaction: {}", custom_id);
        "This button is no longer active.".to_string()
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} is connected to Discord!", ready.user.name);

        ctx.set_activity(Some(ActivityData::watching("giveaways and polls")));

        let commands = vec![commands::giveaway::register(), commands::poll::register()];
        if let Err(e) = Command::set_global_commands(&ctx.http, commands).await {
            tracing::error!("Failed to register slash commands: {}", e);
        } else {
            tracing::info!("Registered slash commands");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => {
                let content = match command.data.name.as_str() {
                    "giveaway" => commands::giveaway::handle(&self.giveaways, &command).await,
                    "poll" => commands::poll::handle(&self.polls, &command).await,
                    other => {
                        tracing::warn!("Unknown command received: {}", other);
                        "Unknown command".to_string()
                    }
                };

                let response = CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content(content)
                        .ephemeral(true),
                );
                if let Err(e) = command.create_response(&ctx.http, response).await {
                    tracing::error!(
                        "Failed to respond to slash command '{}': {}",
                        command.data.name,
                        e
                    );
                }
            }
            Interaction::Component(component) => {
                let content = self.handle_component(&component).await;

                let response = CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content(content)
                        .ephemeral(true),
                );
                if let Err(e) = component.create_response(&ctx.http, response).await {
                    tracing::error!(
                        "Failed to respond to component '{}': {}",
                        component.data.custom_id,
                        e
                    );
                }
            }
            _ => {}
        }
    }
}
