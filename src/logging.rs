//! Structured logging bootstrap using `tracing`.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. `format` is one of `pretty`,
/// `compact` or `json`; anything else falls back to `pretty`. Calling this
/// again once a subscriber is installed does nothing. Output goes to stderr.
pub fn init_logging(level: &str, format: &str) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {}", level))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        "compact" => registry
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    installed.context("Failed to install tracing subscriber")?;

    tracing::debug!(level, format, "tracing initialised");
    Ok(())
}
