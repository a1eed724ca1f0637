//! Structured logging: subscriber install plus the three record shapes the
//! core emits (configuration, interval, stop-reason).

use tracing_subscriber::EnvFilter;

use crate::sim::StopReason;

/// Install a `tracing_subscriber::fmt` subscriber for this process. Safe to
/// call once per process, before the communicator is joined.
pub fn init(rank: i32) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    tracing::debug!(rank, "logging initialized");
}

pub fn log_config(length: usize, prob: f64, seed: i64, max_steps: u64) {
    tracing::info!(length, prob, seed, max_steps, "starting run");
}

pub fn log_worker_placement(rank: i32, row: u32, col: u32, height: usize, width: usize) {
    tracing::debug!(rank, row, col, height, width, "worker placed");
}

pub fn log_interval(step: u64, live_cells: u64) {
    tracing::info!(step, live_cells, "generation advanced");
}

pub fn log_stop_reason(step: u64, reason: StopReason) {
    let reason = match reason {
        StopReason::Collapse => "collapse",
        StopReason::Explosion => "explosion",
    };
    tracing::info!(step, reason, "early stopping");
}
