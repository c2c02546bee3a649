//! Start-up configuration, read once from flags or the environment.

// std
use std::{net::IpAddr, path::PathBuf};
// crates.io
use clap::Parser;
// self
use crate::{
	auth::Secret,
	oauth::ConsumerCredentials,
	server::{AdminCredentials, DEFAULT_FOLLOW_TARGET, LogFormat},
};

/// Whitelist service configuration.
#[derive(Clone, Debug, Parser)]
#[command(version, about = "Campaign whitelist gate backed by OAuth 1.0a follow verification.")]
pub struct Config {
	/// OAuth consumer key.
	#[arg(long, env = "CONSUMER_KEY")]
	pub consumer_key: String,
	/// OAuth consumer secret.
	#[arg(long, env = "CONSUMER_SECRET", hide_env_values = true)]
	pub consumer_secret: Secret,
	/// Bind address.
	#[arg(long, env = "HOST", default_value = "0.0.0.0")]
	pub host: IpAddr,
	/// Bind port.
	#[arg(long, env = "PORT", default_value_t = 8000)]
	pub port: u16,
	/// Whitelist flat file.
	#[arg(long, env = "USERS_CSV", default_value = "users.csv")]
	pub users_csv: PathBuf,
	/// Compiled front-end served for every non-API path.
	#[arg(long, env = "STATIC_DIR", default_value = "front/build")]
	pub static_dir: PathBuf,
	/// Account id users must follow.
	#[arg(long, env = "FOLLOW_TARGET_ID", default_value_t = DEFAULT_FOLLOW_TARGET)]
	pub follow_target_id: u64,
	/// `oauth_callback` announced when requesting a token.
	#[arg(long, env = "CALLBACK_URL")]
	pub callback_url: Option<String>,
	/// Username for the CSV export.
	#[arg(long, env = "ADMIN_USERNAME")]
	pub admin_username: Option<String>,
	/// Password for the CSV export.
	#[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
	pub admin_password: Option<Secret>,
	/// Log output format.
	#[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Human)]
	pub log_format: LogFormat,
	/// Log filter directive used when `RUST_LOG` is unset.
	#[arg(long, env = "LOG_LEVEL", default_value = "info")]
	pub log_level: String,
}
impl Config {
	/// Consumer credentials handed to the signer.
	pub fn consumer(&self) -> ConsumerCredentials {
		ConsumerCredentials::new(self.consumer_key.as_str(), self.consumer_secret.clone())
	}

	/// Export credentials, present only when both halves are configured.
	pub fn admin_credentials(&self) -> Option<AdminCredentials> {
		match (&self.admin_username, &self.admin_password) {
			(Some(username), Some(password)) if !username.is_empty() && !password.is_empty() =>
				Some(AdminCredentials::new(username.as_str(), password.clone())),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::iter;
	// self
	use super::*;

	fn parse(args: &[&str]) -> Config {
		Config::try_parse_from(iter::once("whitelist-broker").chain(args.iter().copied()))
			.expect("Arguments should parse.")
	}

	#[test]
	fn flags_fill_consumer_and_defaults() {
		let config = parse(&[
			"--consumer-key",
			"ck",
			"--consumer-secret",
			"cs",
			"--follow-target-id",
			"42",
			"--log-format",
			"json",
		]);

		assert_eq!(config.consumer(), ConsumerCredentials::new("ck", "cs"));
		assert_eq!(config.follow_target_id, 42);
		assert_eq!(config.log_format, LogFormat::Json);
		assert!(!format!("{config:?}").contains("cs\""), "Consumer secret must stay redacted.");
	}

	#[test]
	fn admin_export_needs_both_credentials() {
		let config = parse(&[
			"--consumer-key",
			"ck",
			"--consumer-secret",
			"cs",
			"--admin-username",
			"admin",
			"--admin-password",
			"pw",
		]);

		assert_eq!(config.admin_credentials(), Some(AdminCredentials::new("admin", "pw")));

		let config = Config { admin_password: None, ..config };

		assert_eq!(config.admin_credentials(), None);
	}
}
