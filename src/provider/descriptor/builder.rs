// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	provider::{ProviderDescriptor, ProviderEndpoints, ProviderQuirks},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderDescriptorError {
	/// Request-token endpoint is mandatory.
	#[error("Missing request token endpoint.")]
	MissingRequestTokenEndpoint,
	/// Access-token endpoint is mandatory.
	#[error("Missing access token endpoint.")]
	MissingAccessTokenEndpoint,
	/// REST base is mandatory.
	#[error("Missing API base URL.")]
	MissingApiBase,
	/// Endpoints must use HTTP(S).
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoints are signed without their query, so they must not carry one.
	#[error("The {endpoint} endpoint must not carry a query or fragment: {url}.")]
	UnexpectedQuery {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	/// Request-token endpoint.
	pub request_token_endpoint: Option<Url>,
	/// Access-token endpoint.
	pub access_token_endpoint: Option<Url>,
	/// REST base URL.
	pub api_base: Option<Url>,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			request_token_endpoint: None,
			access_token_endpoint: None,
			api_base: None,
			quirks: ProviderQuirks::default(),
		}
	}

	/// Sets the request-token endpoint.
	pub fn request_token_endpoint(mut self, url: Url) -> Self {
		self.request_token_endpoint = Some(url);

		self
	}

	/// Sets the access-token endpoint.
	pub fn access_token_endpoint(mut self, url: Url) -> Self {
		self.access_token_endpoint = Some(url);

		self
	}

	/// Sets the REST base; a missing trailing `/` is added during [`build`](Self::build).
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Overrides the provider quirks.
	pub fn quirks(mut self, quirks: ProviderQuirks) -> Self {
		self.quirks = quirks;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let request_token = self
			.request_token_endpoint
			.ok_or(ProviderDescriptorError::MissingRequestTokenEndpoint)?;
		let access_token =
			self.access_token_endpoint.ok_or(ProviderDescriptorError::MissingAccessTokenEndpoint)?;
		let mut api_base = self.api_base.ok_or(ProviderDescriptorError::MissingApiBase)?;

		if !api_base.path().ends_with('/') {
			let path = format!("{}/", api_base.path());

			api_base.set_path(&path);
		}

		let descriptor = ProviderDescriptor {
			id: self.id,
			endpoints: ProviderEndpoints { request_token, access_token, api_base },
			quirks: self.quirks,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("request token", &self.endpoints.request_token)?;
		validate_endpoint("access token", &self.endpoints.access_token)?;
		validate_endpoint("API base", &self.endpoints.api_base)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ProviderDescriptorError::UnsupportedScheme {
			endpoint: name,
			url: url.to_string(),
		});
	}
	if url.query().is_some() || url.fragment().is_some() {
		return Err(ProviderDescriptorError::UnexpectedQuery { endpoint: name, url: url.to_string() });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(raw: &str) -> Url {
		Url::parse(raw).expect("URL fixture should parse successfully.")
	}

	fn builder() -> ProviderDescriptorBuilder {
		ProviderDescriptor::builder(ProviderId::new("demo").expect("Provider id should be valid."))
	}

	#[test]
	fn build_appends_trailing_slash_to_api_base() {
		let descriptor = builder()
			.request_token_endpoint(url("https://provider.example/oauth/request_token"))
			.access_token_endpoint(url("https://provider.example/oauth/access_token"))
			.api_base(url("https://provider.example/1.1"))
			.build()
			.expect("Descriptor should build.");

		assert_eq!(descriptor.endpoints.api_base.as_str(), "https://provider.example/1.1/");
	}

	#[test]
	fn build_requires_every_endpoint() {
		let err = builder()
			.request_token_endpoint(url("https://provider.example/oauth/request_token"))
			.build()
			.expect_err("Missing access token endpoint should fail.");

		assert_eq!(err, ProviderDescriptorError::MissingAccessTokenEndpoint);
	}

	#[test]
	fn build_rejects_unsupported_schemes_and_queries() {
		let err = builder()
			.request_token_endpoint(url("ftp://provider.example/request_token"))
			.access_token_endpoint(url("https://provider.example/oauth/access_token"))
			.api_base(url("https://provider.example/1.1/"))
			.build()
			.expect_err("Non-HTTP scheme should fail.");

		assert!(matches!(err, ProviderDescriptorError::UnsupportedScheme { .. }));

		let err = builder()
			.request_token_endpoint(url("https://provider.example/oauth/request_token?x=1"))
			.access_token_endpoint(url("https://provider.example/oauth/access_token"))
			.api_base(url("https://provider.example/1.1/"))
			.build()
			.expect_err("Query on an endpoint should fail.");

		assert!(matches!(err, ProviderDescriptorError::UnexpectedQuery { .. }));
	}
}
