//! The two-phase OAuth 1.0a handshake.
//!
//! [`Gateway::request_token`] obtains an unauthorized request token; once the user has
//! authorized it at the provider, [`Gateway::access_token`] trades it (plus the verifier) for
//! the long-lived access pair. Both post an empty body with the signed `Authorization`
//! header, read the reply as text, and classify it with [`TokenPair::from_response`]: a clean
//! pair or the provider's raw body as [`ProviderError::Rejected`](crate::error::ProviderError).

// self
use crate::{
	_prelude::*,
	auth::TokenPair,
	flows::{
		Gateway,
		common::{self, REQUESTED_WITH},
	},
	http::{HttpMethod, OAuthHttpClient, OutboundRequest},
	oauth::{AuthorizationHeader, SigningRequest},
	obs::{self, FlowKind},
};

impl<C> Gateway<C>
where
	C: ?Sized + OAuthHttpClient,
{
	/// Phase one: requests an unauthorized token pair.
	pub async fn request_token(&self) -> Result<TokenPair> {
		obs::observe(FlowKind::RequestToken, "request_token", async move {
			let endpoint = self.descriptor.endpoints.request_token.clone();
			let mut signing = SigningRequest::request_token(endpoint.clone());

			if let Some(callback) = &self.callback {
				signing = signing.with_callback(callback.as_str());
			}

			let header = self.signer().sign(&signing);

			self.exchange(endpoint, header).await
		})
		.await
	}

	/// Phase two: exchanges an authorized request token and its verifier for the access pair.
	pub async fn access_token(&self, oauth_token: &str, oauth_verifier: &str) -> Result<TokenPair> {
		obs::observe(FlowKind::AccessToken, "access_token", async move {
			let endpoint = self.descriptor.endpoints.access_token.clone();
			let signing =
				SigningRequest::access_token(endpoint.clone(), oauth_token, oauth_verifier)
					.with_verifier_placement(self.descriptor.quirks.verifier_placement);
			let header = self.signer().sign(&signing);

			self.exchange(endpoint, header).await
		})
		.await
	}

	async fn exchange(&self, endpoint: Url, header: AuthorizationHeader) -> Result<TokenPair> {
		let mut request =
			OutboundRequest::new(HttpMethod::Post, endpoint).with_header("Authorization", header.value());

		if self.descriptor.quirks.send_requested_with {
			request = request.with_header("X-Requested-With", REQUESTED_WITH);
		}

		let response = common::dispatch(self, request).await?;

		Ok(TokenPair::from_response(response.status, &response.body)?)
	}
}
