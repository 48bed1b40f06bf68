//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! The expiry sweep bounds store memory under load. Lazy expiry checks in
//! the verification path remain the correctness backstop, so a missed sweep
//! never makes a stale code verifiable.

use std::sync::Arc;

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::otp::OtpStore;

/// Start all scheduled tasks
pub async fn start_scheduler(store: Arc<OtpStore>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Expiry sweep - runs every minute. The sweep compares each entry's own
    // stored expiry against now, so an entry refreshed by an in-flight
    // re-issue is never removed.
    let sweep_store = store.clone();
    let sweep_job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let store = sweep_store.clone();
        Box::pin(async move {
            let removed = store.sweep_expired().await;
            if removed > 0 {
                tracing::info!(removed, "Swept expired OTP entries");
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (OTP expiry sweep every minute)");
    Ok(scheduler)
}
