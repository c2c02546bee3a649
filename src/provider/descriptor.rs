//! Provider descriptor data structures shared by the exchange flows.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Provider-specific quirk toggles.
pub mod quirks;

pub use builder::*;
pub use quirks::*;

// self
use crate::{_prelude::*, auth::ProviderId, error::ConfigError};

/// Request-token endpoint of the Twitter v1.1 API.
pub const TWITTER_REQUEST_TOKEN_URL: &str = "https://api.twitter.com/oauth/request_token";
/// Access-token endpoint of the Twitter v1.1 API.
pub const TWITTER_ACCESS_TOKEN_URL: &str = "https://api.twitter.com/oauth/access_token";
/// REST base of the Twitter v1.1 API.
pub const TWITTER_API_BASE: &str = "https://api.twitter.com/1.1/";

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Phase one: issues unauthorized request tokens.
	pub request_token: Url,
	/// Phase two: exchanges an authorized request token for an access token.
	pub access_token: Url,
	/// Base URL for authenticated REST calls; always ends with `/`.
	pub api_base: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier.
	pub id: ProviderId,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Descriptor for the Twitter v1.1 API with default quirks.
	pub fn twitter() -> Result<Self> {
		let parse = |raw: &str| Url::parse(raw).map_err(ConfigError::from);
		let descriptor = Self::builder(ProviderId::new("twitter")?)
			.request_token_endpoint(parse(TWITTER_REQUEST_TOKEN_URL)?)
			.access_token_endpoint(parse(TWITTER_ACCESS_TOKEN_URL)?)
			.api_base(parse(TWITTER_API_BASE)?)
			.build()
			.map_err(ConfigError::from)?;

		Ok(descriptor)
	}

	/// Resolves `path` against the REST base.
	pub fn api_url(&self, path: &str) -> Result<Url, ConfigError> {
		Ok(self.endpoints.api_base.join(path)?)
	}
}
