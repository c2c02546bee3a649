//! OAuth 1.0a token pairs and the `key=value&key=value` bodies the token endpoints return.

// self
use crate::{_prelude::*, auth::Secret, error::ProviderError};

/// Token + token secret issued by either phase of the handshake.
///
/// Phase one yields a short-lived, still unauthorized pair; phase two yields the long-lived
/// access pair. Any other fields the provider returned (`oauth_callback_confirmed`,
/// `user_id`, `screen_name`, ...) are kept in [`extra`](Self::extra) so callers receive the
/// same mapping the provider sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
	/// Opaque token value.
	pub oauth_token: String,
	/// Secret paired with [`oauth_token`](Self::oauth_token); signs follow-up requests.
	pub oauth_token_secret: Secret,
	/// Remaining response fields, keyed by name.
	#[serde(flatten)]
	pub extra: BTreeMap<String, String>,
}
impl TokenPair {
	/// Builds a pair without extra fields.
	pub fn new(oauth_token: impl Into<String>, oauth_token_secret: impl Into<Secret>) -> Self {
		Self {
			oauth_token: oauth_token.into(),
			oauth_token_secret: oauth_token_secret.into(),
			extra: BTreeMap::new(),
		}
	}

	/// Classifies a token endpoint reply.
	///
	/// A reply is a token pair only when the status is 2xx and both `oauth_token` and
	/// `oauth_token_secret` are present and non-empty; everything else becomes
	/// [`ProviderError::Rejected`] carrying the untouched body.
	pub fn from_response(status: u16, body: &str) -> Result<Self, ProviderError> {
		let rejected = || ProviderError::Rejected { status, body: body.to_owned() };

		if !(200..300).contains(&status) {
			return Err(rejected());
		}

		let mut fields = parse_form_body(body);
		let token = fields.remove("oauth_token").filter(|value| !value.is_empty());
		let secret = fields.remove("oauth_token_secret").filter(|value| !value.is_empty());

		match (token, secret) {
			(Some(oauth_token), Some(secret)) =>
				Ok(Self { oauth_token, oauth_token_secret: Secret::new(secret), extra: fields }),
			_ => Err(rejected()),
		}
	}

	/// Looks up an extra response field such as `screen_name`.
	pub fn extra(&self, key: &str) -> Option<&str> {
		self.extra.get(key).map(String::as_str)
	}
}

/// Splits a `key=value&key=value` body into a mapping.
///
/// Parsing never fails: empty segments are skipped, a segment without `=` maps to an empty
/// value, only the first `=` separates key from value, and a repeated key keeps its last
/// value. Values are returned exactly as sent (no percent-decoding).
pub fn parse_form_body(text: &str) -> BTreeMap<String, String> {
	text.split('&')
		.filter(|segment| !segment.is_empty())
		.map(|segment| match segment.split_once('=') {
			Some((key, value)) => (key.to_owned(), value.to_owned()),
			None => (segment.to_owned(), String::new()),
		})
		.collect()
}
