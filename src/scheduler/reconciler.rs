use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::error::AppError;
use crate::service::{GiveawayManager, PollManager};

/// Starts the expiry reconciliation scheduler.
///
/// The job runs every 20 seconds and drives one reconciliation tick per
/// manager: active entities whose expiry has passed are finalized and
/// announced, and cache entries ended longer than the retention window are
/// evicted. If the process is down no ticks occur; the managers' startup
/// catch-up covers whatever expired in the meantime.
///
/// # Arguments
/// - `giveaways`: giveaway lifecycle manager
/// - `polls`: poll lifecycle manager
pub async fn start_scheduler(
    giveaways: Arc<GiveawayManager>,
    polls: Arc<PollManager>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    // Clone resources for the job
    let job_giveaways = giveaways.clone();
    let job_polls = polls.clone();

    let job = Job::new_async("*/20 * * * * *", move |_uuid, _lock| {
        let giveaways = job_giveaways.clone();
        let polls = job_polls.clone();

        Box::pin(async move {
            let now = Utc::now();
            if let Err(e) = giveaways.tick(now).await {
                tracing::error!("Error reconciling expired giveaways: {}", e);
            }
            if let Err(e) = polls.tick(now).await {
                tracing::error!("Error reconciling expired polls: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Expiry reconciliation scheduler started");

    Ok(())
}
