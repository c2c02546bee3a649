//! axum HTTP surface consumed by the single-page front-end.
//!
//! Token routes proxy the two-phase handshake, the account routes wrap the signed REST calls,
//! and the whitelist routes read and append the flat file. Every path outside `/api` is served
//! from the compiled front-end with an `index.html` fallback for client-side routes.

pub mod admin;
pub mod config;
pub mod handlers;
pub mod telemetry;

pub use admin::AdminCredentials;
pub use config::Config;
pub use telemetry::{LogFormat, init_logging};

// std
use std::{net::SocketAddr, path::Path};
// crates.io
use axum::{Router, routing::post};
use tokio::net::TcpListener;
use tower_http::{
	cors::CorsLayer,
	services::{ServeDir, ServeFile},
	trace::TraceLayer,
};
// self
use crate::{
	_prelude::*,
	flows::{Gateway, ReqwestGateway},
	provider::ProviderDescriptor,
	store::{FileStore, WhitelistStore},
};

/// Account id the campaign requires users to follow.
pub const DEFAULT_FOLLOW_TARGET: u64 = 1_483_172_593_804_857_349;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
	/// Gateway to the provider.
	pub gateway: Arc<ReqwestGateway>,
	/// Whitelist backend.
	pub store: Arc<dyn WhitelistStore>,
	/// Account id checked by `/api/check-followers`.
	pub follow_target: u64,
	/// Credentials guarding the CSV export; `None` disables it.
	pub admin: Option<AdminCredentials>,
}
impl AppState {
	/// Creates state with the export disabled.
	pub fn new(
		gateway: Arc<ReqwestGateway>,
		store: Arc<dyn WhitelistStore>,
		follow_target: u64,
	) -> Self {
		Self { gateway, store, follow_target, admin: None }
	}

	/// Enables the CSV export behind `admin`.
	pub fn with_admin(mut self, admin: AdminCredentials) -> Self {
		self.admin = Some(admin);

		self
	}
}

/// Builds the application router.
pub fn router(state: AppState, static_dir: &Path) -> Router {
	let api = Router::new()
		.route("/request-token", post(handlers::request_token))
		.route("/access-token", post(handlers::access_token))
		.route("/verify-credentials", post(handlers::verify_credentials))
		.route("/check-followers", post(handlers::check_followers))
		.route("/check-user", post(handlers::check_user))
		.route("/save-user", post(handlers::save_user))
		.route("/users", post(admin::export_users))
		.fallback(handlers::not_found)
		.with_state(state);
	let front = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

	Router::new()
		.nest("/api", api)
		.fallback_service(front)
		.layer(CorsLayer::permissive())
		.layer(TraceLayer::new_for_http())
}

/// Wires configuration into state, binds, and serves until Ctrl-C.
pub async fn serve(config: Config) -> color_eyre::Result<()> {
	let mut gateway = Gateway::new(ProviderDescriptor::twitter()?, config.consumer());

	if let Some(callback) = &config.callback_url {
		gateway = gateway.with_callback(callback.as_str());
	}

	let store = FileStore::open(config.users_csv.clone())?;
	let mut state = AppState::new(Arc::new(gateway), Arc::new(store), config.follow_target_id);

	match config.admin_credentials() {
		Some(admin) => state = state.with_admin(admin),
		None => tracing::warn!("admin credentials are not configured; CSV export is disabled"),
	}

	let app = router(state, &config.static_dir);
	let addr = SocketAddr::new(config.host, config.port);
	let listener = TcpListener::bind(addr).await?;

	tracing::info!(
		%addr,
		users_csv = %config.users_csv.display(),
		static_dir = %config.static_dir.display(),
		"listening"
	);

	axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

	tracing::info!("server stopped");

	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for Ctrl-C");
	}

	tracing::info!("shutdown requested");
}
