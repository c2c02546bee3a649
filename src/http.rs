//! Transport primitives for signed provider calls.
//!
//! The module exposes [`OAuthHttpClient`], the crate's only dependency on an HTTP stack, with
//! the plain [`OutboundRequest`] / [`RawResponse`] pair flowing through it. The signer never
//! sees the transport and the transport never sees secrets: flows hand it a fully signed
//! request and classify whatever comes back.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;

/// Boxed future returned by [`OAuthHttpClient::execute`].
pub type HttpFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + 'a + Send>>;

/// HTTP verbs used by the OAuth 1.0a exchanges and REST calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
}
impl HttpMethod {
	/// Uppercase verb as it appears on the wire and in the signature base string.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully signed request handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundRequest {
	/// HTTP verb.
	pub method: HttpMethod,
	/// Target URL, query included.
	pub url: Url,
	/// Header name/value pairs in send order.
	pub headers: Vec<(String, String)>,
}
impl OutboundRequest {
	/// Creates a request without headers.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self { method, url, headers: Vec::new() }
	}

	/// Appends a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Returns the first header value matching `name` (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(existing, _)| existing.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Status + body text of a provider reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Body decoded as text.
	pub body: String,
}
impl RawResponse {
	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports capable of executing signed provider calls.
///
/// Implementations must be `Send + Sync + 'static` so a single client can be shared by every
/// request handler, and the returned future must be `Send` so handlers can await it on a
/// multi-threaded runtime. Non-2xx statuses are not transport errors; they come back as a
/// [`RawResponse`] for the flows to classify.
pub trait OAuthHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and reads the whole body as text.
	fn execute(&self, request: OutboundRequest)
	-> HttpFuture<'_, RawResponse, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl OAuthHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(
		&self,
		request: OutboundRequest,
	) -> HttpFuture<'_, RawResponse, Self::TransportError> {
		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
			};
			let mut builder = self.0.request(method, request.url);

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			Ok(RawResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn header_lookup_ignores_case() {
		let request = OutboundRequest::new(
			HttpMethod::Post,
			Url::parse("https://provider.example/oauth/request_token")
				.expect("URL fixture should parse successfully."),
		)
		.with_header("Authorization", "OAuth x=\"y\"");

		assert_eq!(request.header("authorization"), Some("OAuth x=\"y\""));
		assert_eq!(request.header("X-Requested-With"), None);
		assert_eq!(HttpMethod::Post.to_string(), "POST");
	}
}
