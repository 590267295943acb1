//! Inactivity sweep: periodically removes participants that stopped sending
//! heartbeats and announces their departure in the message log.

use std::time::Duration;

use chrono::Utc;
use futures::{stream, StreamExt};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument};

use crate::api::AppState;
use crate::db::Database;
use crate::models::{Message, LEFT_TEXT};

/// Upper bound on removals running at once within a single tick.
const SWEEP_CONCURRENCY: usize = 4;

/// Spawn the background sweeper. One pass runs per interval; a pass is
/// awaited to completion before the next tick fires.
pub fn spawn_sweeper(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        // tokio::time::interval panics on a zero period; floor both knobs at
        // one second and keep the millisecond threshold within i64.
        let interval_secs = state.config.sweep_interval_secs.max(1);
        let staleness_secs = state.config.staleness_threshold_secs.max(1);
        let period = Duration::from_secs(interval_secs);
        let threshold_ms = staleness_secs.saturating_mul(1000).min(i64::MAX as u64) as i64;

        info!(interval_secs, staleness_secs, "Starting presence sweeper");

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately; everyone is
        // fresh at startup, so skip it.
        interval.tick().await;

        loop {
            interval.tick().await;
            let now_ms = Utc::now().timestamp_millis();
            match sweep_once(&state.db, threshold_ms, now_ms).await {
                Ok(0) => debug!("Sweep pass found no stale participants"),
                Ok(removed) => info!(removed, "Sweep pass removed stale participants"),
                Err(e) => error!(error = %e, "Sweep pass failed"),
            }
        }
    })
}

/// Run a single sweep pass. Participants whose last heartbeat is strictly
/// older than `threshold_ms` are removed and a departure message is logged
/// for each. Returns the number of participants removed.
#[instrument(skip(db))]
pub async fn sweep_once(
    db: &Database,
    threshold_ms: i64,
    now_ms: i64,
) -> Result<usize, sqlx::Error> {
    let cutoff = now_ms - threshold_ms;
    let stale: Vec<String> = db
        .list_participants()
        .await?
        .into_iter()
        .filter(|p| p.last_status < cutoff)
        .map(|p| p.name)
        .collect();

    if stale.is_empty() {
        return Ok(0);
    }

    let removed = stream::iter(stale)
        .map(|name| async move {
            match remove_participant(db, &name, cutoff).await {
                Ok(removed) => usize::from(removed),
                Err(e) => {
                    error!(name = %name, error = %e, "Failed to remove stale participant");
                    0
                }
            }
        })
        .buffer_unordered(SWEEP_CONCURRENCY)
        .fold(0usize, |acc, n| async move { acc + n })
        .await;

    if removed > 0 {
        metrics::counter!("batepapo_participants_swept_total", removed as u64);
    }

    Ok(removed)
}

/// Remove one stale participant and announce the departure. The delete is
/// conditional on the participant still being stale, so a heartbeat racing
/// the sweep keeps the participant and suppresses the announcement.
async fn remove_participant(db: &Database, name: &str, cutoff: i64) -> Result<bool, sqlx::Error> {
    if !db.remove_stale_participant(name, cutoff).await? {
        debug!(name = %name, "Skipped removal, participant pinged again");
        return Ok(false);
    }

    info!(name = %name, "Removed inactive participant");

    let departure = Message::status(name, LEFT_TEXT);
    if let Err(e) = db.insert_message(&departure).await {
        error!(name = %name, error = %e, "Failed to log departure message");
    }

    Ok(true)
}
