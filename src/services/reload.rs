//! Reload service — periodic refresh of the manifest.
//!
//! DESIGN
//! ======
//! While a live documentation server is configured, a background task
//! reloads the manifest every `poll_interval`, independent of request
//! traffic. Ticks that fall behind a slow fetch are skipped rather than
//! bunched. The task runs until its handle is aborted at shutdown.

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

use crate::state::AppState;

/// Spawn the periodic reload task. Returns a handle for shutdown.
///
/// The first reload happens one interval after spawning; the startup load is
/// the caller's job.
pub fn spawn_reload_task(state: AppState) -> JoinHandle<()> {
    let period = state.config.poll_interval;
    info!(
        url = state.config.storybook_url.as_deref().unwrap_or_default(),
        interval_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
        "polling story index"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            state.reload().await;
        }
    })
}
