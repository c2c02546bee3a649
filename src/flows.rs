//! Token Exchange Proxy and authenticated REST calls, driven through one [`Gateway`].

pub mod account;
pub mod common;

mod token_exchange;

pub use account::*;

// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
use crate::{
	_prelude::*,
	http::OAuthHttpClient,
	oauth::{ConsumerCredentials, Signer},
	provider::ProviderDescriptor,
};

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport.
pub type ReqwestGateway = Gateway<ReqwestHttpClient>;

/// Drives the OAuth 1.0a handshake and the signed REST calls against one provider.
///
/// The gateway owns the transport, the provider descriptor, and a [`Signer`] bound to the
/// consumer credentials injected at construction. It keeps no per-user state: every call
/// receives the token pair it signs with, so one instance is shared by all request handlers.
pub struct Gateway<C>
where
	C: ?Sized + OAuthHttpClient,
{
	/// HTTP client used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Provider descriptor that defines endpoints and quirks.
	pub descriptor: ProviderDescriptor,
	/// `oauth_callback` sent during phase one, if any.
	pub callback: Option<String>,
	signer: Signer,
}
impl<C> Gateway<C>
where
	C: ?Sized + OAuthHttpClient,
{
	/// Creates a gateway that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		consumer: ConsumerCredentials,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			descriptor,
			callback: None,
			signer: Signer::new(consumer),
		}
	}

	/// Sets the `oauth_callback` announced in phase one.
	pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = Some(callback.into());

		self
	}

	/// Signer bound to this gateway's consumer credentials.
	pub fn signer(&self) -> &Signer {
		&self.signer
	}
}
#[cfg(feature = "reqwest")]
impl Gateway<ReqwestHttpClient> {
	/// Creates a gateway with its own reqwest-backed transport.
	pub fn new(descriptor: ProviderDescriptor, consumer: ConsumerCredentials) -> Self {
		Self::with_http_client(descriptor, consumer, ReqwestHttpClient::default())
	}
}
impl<C> Clone for Gateway<C>
where
	C: ?Sized + OAuthHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			descriptor: self.descriptor.clone(),
			callback: self.callback.clone(),
			signer: self.signer.clone(),
		}
	}
}
impl<C> Debug for Gateway<C>
where
	C: ?Sized + OAuthHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("descriptor", &self.descriptor.id)
			.field("consumer_key", &self.signer.consumer_key())
			.field("callback", &self.callback)
			.finish()
	}
}
