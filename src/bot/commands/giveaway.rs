use std::sync::Arc;

use chrono::{Duration, Utc};
use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType,
    ComponentInteraction, CreateCommand, CreateCommandOption,
};

use crate::bot::commands::{int_option, str_option};
use crate::error::lifecycle::LifecycleError;
use crate::model::giveaway::{GiveawayDetails, GiveawayEntry};
use crate::service::lifecycle::CreateEntity;
use crate::service::GiveawayManager;

pub fn register() -> CreateCommand {
    CreateCommand::new("giveaway")
        .description("Run prize giveaways in this channel")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "start",
                "Start a giveaway in this channel",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "prize",
                    "What the winner receives",
                )
                .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "winners",
                    "How many winners to draw (default 1)",
                )
                .min_int_value(1)
                .max_int_value(20),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "minutes",
                    "How long the giveaway runs; omit to end it manually",
                )
                .min_int_value(1),
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::String,
                "description",
                "Extra details shown in the announcement",
            )),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "end", "End a giveaway now")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "message_id",
                        "Message id of the giveaway announcement",
                    )
                    .required(true),
                ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "reroll",
                "Draw new winners for an ended giveaway",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message_id",
                    "Message id of the giveaway announcement",
                )
                .required(true),
            ),
        )
}

pub async fn handle(manager: &Arc<GiveawayManager>, command: &CommandInteraction) -> String {
    let Some(sub) = command.data.options.first() else {
        return "Missing subcommand.".to_string();
    };
    let CommandDataOptionValue::SubCommand(ref options) = sub.value else {
        return "Missing subcommand.".to_string();
    };

    match sub.name.as_str() {
        "start" => start(manager, command, options).await,
        "end" => end(manager, command, options).await,
        "reroll" => reroll(manager, options).await,
        other => format!("Unknown subcommand `{}`.", other),
    }
}

async fn start(
    manager: &Arc<GiveawayManager>,
    command: &CommandInteraction,
    options: &[CommandDataOption],
) -> String {
    let Some(guild_id) = command.guild_id else {
        return "Giveaways can only run inside a server.".to_string();
    };
    let Some(prize) = str_option(options, "prize") else {
        return "A prize is required.".to_string();
    };
    let winner_count = int_option(options, "winners").unwrap_or(1).max(1) as u32;
    let duration = int_option(options, "minutes").map(Duration::minutes);

    let params = CreateEntity {
        guild_id: guild_id.to_string(),
        channel_id: command.channel_id.to_string(),
        owner_id: command.user.id.to_string(),
        duration,
        details: GiveawayDetails {
            prize: prize.to_string(),
            description: str_option(options, "description").map(str::to_string),
            winner_count,
        },
    };

    match manager.create(params).await {
        Ok(giveaway) => format!("Giveaway **{}** is live!", giveaway.details.prize),
        Err(err) => reply_for_error(err),
    }
}

async fn end(
    manager: &Arc<GiveawayManager>,
    command: &CommandInteraction,
    options: &[CommandDataOption],
) -> String {
    let Some(id) = str_option(options, "message_id") else {
        return "A message id is required.".to_string();
    };

    match manager.end_now(id, &command.user.id.to_string()).await {
        Ok(Some(outcome)) if outcome.winners.is_empty() => {
            "The giveaway ended — no one entered.".to_string()
        }
        Ok(Some(outcome)) => format!("The giveaway ended with {} winner(s).", outcome.winners.len()),
        Ok(None) => "That giveaway had already ended.".to_string(),
        Err(err) => reply_for_error(err),
    }
}

async fn reroll(manager: &Arc<GiveawayManager>, options: &[CommandDataOption]) -> String {
    let Some(id) = str_option(options, "message_id") else {
        return "A message id is required.".to_string();
    };

    match manager.reroll(id).await {
        Ok(outcome) if outcome.winners.is_empty() => {
            "No one entered, so there is still no winner.".to_string()
        }
        Ok(_) => "New winners announced.".to_string(),
        Err(err) => reply_for_error(err),
    }
}

/// Records the pressing user's entry; the giveaway id is the id of the
/// message carrying the button.
pub async fn enter(manager: &Arc<GiveawayManager>, component: &ComponentInteraction) -> String {
    let entry = GiveawayEntry {
        user_id: component.user.id.to_string(),
        entered_at: Utc::now(),
    };

    match manager.contribute(&component.message.id.to_string(), entry).await {
        Ok(()) => "You're in — good luck! 🎉".to_string(),
        Err(err) => reply_for_error(err),
    }
}

fn reply_for_error(err: LifecycleError) -> String {
    match err {
        LifecycleError::NotFound { .. } => "No giveaway matches that message id.".to_string(),
        LifecycleError::DuplicateContribution { .. } => {
            "You have already entered this giveaway.".to_string()
        }
        LifecycleError::Forbidden { .. } => "Only the host can end this giveaway early.".to_string(),
        LifecycleError::NotEnded { .. } => {
            "That giveaway is still running — end it before rerolling.".to_string()
        }
        LifecycleError::AlreadyEnded { .. } => "That giveaway has already ended.".to_string(),
        LifecycleError::Publish(err) => {
            tracing::error!("Giveaway announcement failed: {}", err);
            "The announcement could not be posted; try again shortly.".to_string()
        }
        LifecycleError::Store(err) => {
            tracing::error!("Giveaway command failed: {}", err);
            "Something went wrong; try again shortly.".to_string()
        }
    }
}
