use std::sync::Arc;

use chrono::{Duration, Utc};
use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType,
    ComponentInteraction, CreateCommand, CreateCommandOption,
};

use crate::bot::commands::{bool_option, int_option, str_option};
use crate::error::lifecycle::LifecycleError;
use crate::model::poll::{PollDetails, PollVote};
use crate::service::lifecycle::{CreateEntity, EntityKind};
use crate::service::poll::PollKind;
use crate::service::PollManager;

/// Discord fits five buttons per row and the announcement uses one row per
/// five options; ten keeps the message compact.
const MAX_OPTIONS: usize = 10;

pub fn register() -> CreateCommand {
    CreateCommand::new("poll")
        .description("Run polls in this channel")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "create",
                "Create a poll in this channel",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "question", "What to ask")
                    .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "options",
                    "Comma-separated list of 2-10 options",
                )
                .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "minutes",
                    "How long the poll runs; omit for a live poll closed manually",
                )
                .min_int_value(1),
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "multi",
                "Allow voting for several options",
            )),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "close", "Close a poll now")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "message_id",
                        "Message id of the poll announcement",
                    )
                    .required(true),
                ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "results",
                "Show the current tally of a poll",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message_id",
                    "Message id of the poll announcement",
                )
                .required(true),
            ),
        )
}

pub async fn handle(manager: &Arc<PollManager>, command: &CommandInteraction) -> String {
    let Some(sub) = command.data.options.first() else {
        return "Missing subcommand.".to_string();
    };
    let CommandDataOptionValue::SubCommand(ref options) = sub.value else {
        return "Missing subcommand.".to_string();
    };

    match sub.name.as_str() {
        "create" => create(manager, command, options).await,
        "close" => close(manager, command, options).await,
        "results" => results(manager, options).await,
        other => format!("Unknown subcommand `{}`.", other),
    }
}

async fn create(
    manager: &Arc<PollManager>,
    command: &CommandInteraction,
    options: &[CommandDataOption],
) -> String {
    let Some(guild_id) = command.guild_id else {
        return "Polls can only run inside a server.".to_string();
    };
    let Some(question) = str_option(options, "question") else {
        return "A question is required.".to_string();
    };
    let Some(raw_options) = str_option(options, "options") else {
        return "A list of options is required.".to_string();
    };

    let labels: Vec<String> = raw_options
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();
    if labels.len() < 2 || labels.len() > MAX_OPTIONS {
        return format!("A poll needs between 2 and {} options.", MAX_OPTIONS);
    }

    let params = CreateEntity {
        guild_id: guild_id.to_string(),
        channel_id: command.channel_id.to_string(),
        owner_id: command.user.id.to_string(),
        duration: int_option(options, "minutes").map(Duration::minutes),
        details: PollDetails {
            question: question.to_string(),
            options: labels,
            multi_choice: bool_option(options, "multi").unwrap_or(false),
        },
    };

    match manager.create(params).await {
        Ok(poll) => format!("Poll **{}** is open!", poll.details.question),
        Err(err) => reply_for_error(err),
    }
}

async fn close(
    manager: &Arc<PollManager>,
    command: &CommandInteraction,
    options: &[CommandDataOption],
) -> String {
    let Some(id) = str_option(options, "message_id") else {
        return "A message id is required.".to_string();
    };

    match manager.end_now(id, &command.user.id.to_string()).await {
        Ok(Some(outcome)) if outcome.winners.is_empty() => {
            "The poll closed without any votes.".to_string()
        }
        Ok(Some(outcome)) if outcome.winners.len() > 1 => {
            format!("The poll closed in a {}-way tie.", outcome.winners.len())
        }
        Ok(Some(_)) => "The poll closed with a clear winner.".to_string(),
        Ok(None) => "That poll had already closed.".to_string(),
        Err(err) => reply_for_error(err),
    }
}

async fn results(manager: &Arc<PollManager>, options: &[CommandDataOption]) -> String {
    let Some(id) = str_option(options, "message_id") else {
        return "A message id is required.".to_string();
    };

    match manager.get(id).await {
        Ok((poll, votes)) => {
            let outcome = PollKind::compute_outcome(&poll.details, &votes);
            let mut lines = vec![format!("**{}**", poll.details.question)];
            for (index, label) in poll.details.options.iter().enumerate() {
                let count = outcome.tallies.get(index).copied().unwrap_or(0);
                lines.push(format!("{} — {} vote(s)", label, count));
            }
            lines.join("\n")
        }
        Err(err) => reply_for_error(err),
    }
}

/// Records the pressing user's vote; the poll id is the id of the message
/// carrying the button and the option index rides in the button's custom id.
pub async fn vote(
    manager: &Arc<PollManager>,
    component: &ComponentInteraction,
    index: &str,
) -> String {
    let Ok(option_index) = index.parse::<i32>() else {
        return "That option is not valid.".to_string();
    };

    let poll_id = component.message.id.to_string();
    match manager.get(&poll_id).await {
        Ok((poll, _)) if option_index < 0 || option_index as usize >= poll.details.options.len() => {
            return "That option no longer exists.".to_string();
        }
        Ok(_) => {}
        Err(err) => return reply_for_error(err),
    }

    let vote = PollVote {
        user_id: component.user.id.to_string(),
        option_index,
        voted_at: Utc::now(),
    };

    match manager.contribute(&poll_id, vote).await {
        Ok(()) => "Vote recorded. 🗳️".to_string(),
        Err(err) => reply_for_error(err),
    }
}

fn reply_for_error(err: LifecycleError) -> String {
    match err {
        LifecycleError::NotFound { .. } => "No poll matches that message id.".to_string(),
        LifecycleError::DuplicateContribution { .. } => {
            "You have already voted in this poll.".to_string()
        }
        LifecycleError::Forbidden { .. } => "Only the host can close this poll early.".to_string(),
        LifecycleError::NotEnded { .. } => "That poll is still open.".to_string(),
        LifecycleError::AlreadyEnded { .. } => "That poll has already closed.".to_string(),
        LifecycleError::Publish(err) => {
            tracing::error!("Poll announcement failed: {}", err);
            "The announcement could not be posted; try again shortly.".to_string()
        }
        LifecycleError::Store(err) => {
            tracing::error!("Poll command failed: {}", err);
            "Something went wrong; try again shortly.".to_string()
        }
    }
}
