//! Logging bootstrap.
//!
//! The host application decides where logs go; this helper wires up a
//! sensible default: `tracing` formatted to stderr, filtered by the
//! `SQUADBOARD_LOG` environment variable (standard `EnvFilter` syntax),
//! defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "SQUADBOARD_LOG";

/// Install the global subscriber. Safe to call once at startup; returns an
/// error if a subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
