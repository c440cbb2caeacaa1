use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};

use crate::bot::handler::Handler;
use crate::config::Config;
use crate::error::AppError;
use crate::service::{GiveawayManager, PollManager};

/// Builds the Discord client with the interaction handler attached.
///
/// # Arguments
/// - `config` - Application configuration carrying the bot token
/// - `giveaways` - Giveaway lifecycle manager the handler dispatches to
/// - `polls` - Poll lifecycle manager the handler dispatches to
///
/// # Returns
/// - `Ok(Client)` - Ready-to-start Discord client
/// - `Err(AppError)` - Client initialization failed
pub async fn init_bot(
    config: &Config,
    giveaways: Arc<GiveawayManager>,
    polls: Arc<PollManager>,
) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;

    let handler = Handler::new(giveaways, polls);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Starts the Discord bot; blocks until the gateway connection shuts down.
pub async fn start_bot(client: &mut Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
