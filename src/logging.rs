//! Logging initialization
//!
//! File-based tracing so the interactive console stays clean: JSON lines
//! under `logs/` with daily rotation, filtered through `RUST_LOG` when set.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default directive when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "grounding_agent_sdk=info";

/// Initialize the global tracing subscriber
///
/// Returns the appender guard; hold it for the lifetime of the program,
/// otherwise buffered log lines are lost on exit.
pub fn init_logging() -> Result<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_appender = tracing_appender::rolling::daily("logs", "grounding-agent.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
        .try_init()?;

    Ok(guard)
}
