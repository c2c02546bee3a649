//! Campaign whitelist gate: OAuth 1.0a request signing, a two-phase token exchange proxy,
//! follow verification against the provider's REST API, and a flat-file whitelist, with an
//! optional axum surface that ties them together for a single-page front-end.

#![deny(clippy::all, missing_docs)]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
#[cfg(feature = "server")] pub mod server;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		flows::Gateway,
		http::ReqwestHttpClient,
		oauth::ConsumerCredentials,
		provider::{ProviderDescriptor, ProviderQuirks},
		store::MemoryStore,
	};

	/// Gateway type alias used by reqwest-backed integration tests.
	pub type ReqwestTestGateway = Gateway<ReqwestHttpClient>;

	/// Consumer key shared by integration fixtures.
	pub const TEST_CONSUMER_KEY: &str = "consumer-key-it";
	/// Consumer secret shared by integration fixtures.
	pub const TEST_CONSUMER_SECRET: &str = "consumer-secret-it";

	/// Builds a reqwest HTTP client suitable for talking to `httpmock` servers.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.build()
			.expect("Failed to build Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a descriptor whose endpoints all live under `base` (for example an
	/// `httpmock` server URL).
	pub fn test_descriptor(base: &str, quirks: ProviderQuirks) -> ProviderDescriptor {
		let parse = |path: &str| {
			Url::parse(&format!("{}{path}", base.trim_end_matches('/')))
				.expect("Mock endpoint should parse successfully.")
		};

		ProviderDescriptor::builder(
			crate::auth::ProviderId::new("mock-provider")
				.expect("Provider fixture should be valid."),
		)
		.request_token_endpoint(parse("/oauth/request_token"))
		.access_token_endpoint(parse("/oauth/access_token"))
		.api_base(parse("/1.1/"))
		.quirks(quirks)
		.build()
		.expect("Provider descriptor should build successfully.")
	}

	/// Constructs a [`Gateway`] pointed at `base` with the shared fixture credentials.
	pub fn build_reqwest_test_gateway(base: &str) -> ReqwestTestGateway {
		Gateway::with_http_client(
			test_descriptor(base, ProviderQuirks::default()),
			ConsumerCredentials::new(TEST_CONSUMER_KEY, TEST_CONSUMER_SECRET),
			test_reqwest_http_client(),
		)
	}

	/// Empty in-memory whitelist shared behind an [`Arc`].
	pub fn test_memory_store() -> Arc<MemoryStore> {
		Arc::new(MemoryStore::default())
	}

	/// Application state wired to a mock provider at `base` and to `store`.
	#[cfg(feature = "server")]
	pub fn test_app_state(base: &str, store: Arc<MemoryStore>) -> crate::server::AppState {
		crate::server::AppState::new(
			Arc::new(build_reqwest_test_gateway(base)),
			store,
			crate::server::DEFAULT_FOLLOW_TARGET,
		)
	}

	/// Serves the router for `state` on an ephemeral local port and returns its base URL.
	#[cfg(feature = "server")]
	pub async fn spawn_test_server(
		state: crate::server::AppState,
		static_dir: &std::path::Path,
	) -> String {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("Failed to bind an ephemeral port for the test server.");
		let addr = listener.local_addr().expect("Test listener should expose its address.");
		let app = crate::server::router(state, static_dir);

		tokio::spawn(async move {
			axum::serve(listener, app).await.expect("Test server should keep running.");
		});

		format!("http://{addr}")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
