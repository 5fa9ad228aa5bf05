//! Patient-intake and nurse-triage core: symptom assessment, red-flag
//! detection, risk scoring, and priority queue ordering.

pub mod assessment;
pub mod catalog;
pub mod config;
pub mod db;
pub mod models;
pub mod queue;
pub mod risk;

use tracing_subscriber::EnvFilter;

/// Initialize tracing once at process start.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Acuita core v{}", config::APP_VERSION);
}
