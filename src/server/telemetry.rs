//! Structured logging initialisation for the binary.
//!
//! `RUST_LOG` overrides the configured level when it is set.

// crates.io
use clap::ValueEnum;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for structured logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
	/// Human-readable lines for local development.
	Human,
	/// Newline-delimited JSON for log aggregation.
	Json,
}

/// Installs the global tracing subscriber; fails if one is already installed.
pub fn init_logging(format: LogFormat, level: &str) -> color_eyre::Result<()> {
	let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
	let registry = tracing_subscriber::registry().with(filter);

	match format {
		LogFormat::Human => registry.with(fmt::layer().with_target(true)).try_init()?,
		LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).try_init()?,
	}

	Ok(())
}
