//! Campaign whitelist service.

// crates.io
use clap::Parser;
// self
use whitelist_broker::server::{self, Config};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let config = Config::parse();

	server::init_logging(config.log_format, &config.log_level)?;
	server::serve(config).await
}
