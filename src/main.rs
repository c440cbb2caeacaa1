mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;

use std::sync::Arc;

use chrono::Utc;
use serenity::http::Http;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::data::{giveaway::GiveawayRepository, poll::PollRepository};
use crate::error::AppError;
use crate::service::announcer::DiscordAnnouncer;
use crate::service::lifecycle::LifecycleSettings;
use crate::service::{GiveawayManager, PollManager};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("raffleboard=info,serenity=warn")),
        )
        .init();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    // The managers publish through their own HTTP handle; the gateway client
    // built below carries its own.
    let announcer = DiscordAnnouncer::new(Arc::new(Http::new(&config.discord_bot_token)));
    let settings = LifecycleSettings {
        announce_on_startup_catchup: config.announce_startup_catchup,
        ..LifecycleSettings::default()
    };

    let giveaways = Arc::new(GiveawayManager::new(
        GiveawayRepository::new(db.clone()),
        announcer.clone(),
        settings.clone(),
    ));
    let polls = Arc::new(PollManager::new(
        PollRepository::new(db.clone()),
        announcer,
        settings,
    ));

    // Reconcile whatever expired while the process was down, before the
    // gateway starts accepting commands.
    let now = Utc::now();
    let report = giveaways.load_active(now).await?;
    tracing::info!(
        "Restored {} active giveaway(s), finalized {} expired",
        report.restored,
        report.finalized
    );
    let report = polls.load_active(now).await?;
    tracing::info!(
        "Restored {} active poll(s), finalized {} expired",
        report.restored,
        report.finalized
    );

    scheduler::reconciler::start_scheduler(giveaways.clone(), polls.clone()).await?;

    let mut client = bot::start::init_bot(&config, giveaways, polls).await?;
    bot::start::start_bot(&mut client).await
}
