//! HMAC-SHA1 request signing and `Authorization` header assembly.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::{Secret, TokenPair},
	http::HttpMethod,
	oauth::{ParameterSet, encode, encode_strict},
	provider::VerifierPlacement,
};

type HmacSha1 = Hmac<Sha1>;

/// Value of `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

const NONCE_LEN: usize = 32;

/// Consumer key + secret identifying the application to the provider.
///
/// Read once at start-up and handed to [`Signer::new`]; nothing in the crate reads them from
/// ambient state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerCredentials {
	/// Public consumer key (`oauth_consumer_key`).
	pub key: String,
	/// Consumer secret; first half of the signing key.
	pub secret: Secret,
}
impl ConsumerCredentials {
	/// Creates credentials from a key and secret.
	pub fn new(key: impl Into<String>, secret: impl Into<Secret>) -> Self {
		Self { key: key.into(), secret: secret.into() }
	}
}

/// Per-request nonce and timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningContext {
	/// Replay-protection nonce; only uniqueness matters.
	pub nonce: String,
	/// Seconds since the Unix epoch.
	pub timestamp: i64,
}
impl SigningContext {
	/// Fresh random nonce and the current time.
	pub fn generate() -> Self {
		let nonce = rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect();

		Self { nonce, timestamp: OffsetDateTime::now_utc().unix_timestamp() }
	}

	/// Pinned nonce and timestamp, making the signature reproducible.
	pub fn fixed(nonce: impl Into<String>, timestamp: i64) -> Self {
		Self { nonce: nonce.into(), timestamp }
	}
}

/// Everything about one outbound request that contributes to its signature.
#[derive(Clone, Debug)]
pub struct SigningRequest {
	/// HTTP verb, uppercased in the base string.
	pub method: HttpMethod,
	/// Target URL; any query or fragment is ignored for the base string.
	pub url: Url,
	/// `oauth_token`, present for phase two and authenticated REST calls.
	pub token: Option<String>,
	/// Token secret, second half of the signing key (empty when absent).
	pub token_secret: Option<Secret>,
	/// `oauth_verifier` returned by the user-authorization step.
	pub verifier: Option<String>,
	/// Whether the verifier joins the signed parameter set.
	pub verifier_placement: VerifierPlacement,
	/// `oauth_callback` for phase one.
	pub callback: Option<String>,
	/// Query or form parameters of the request itself.
	pub params: ParameterSet,
}
impl SigningRequest {
	/// Creates an unauthenticated request description.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self {
			method,
			url,
			token: None,
			token_secret: None,
			verifier: None,
			verifier_placement: VerifierPlacement::default(),
			callback: None,
			params: ParameterSet::new(),
		}
	}

	/// Phase one: `POST` to the request-token endpoint.
	pub fn request_token(url: Url) -> Self {
		Self::new(HttpMethod::Post, url)
	}

	/// Phase two: `POST` to the access-token endpoint with the authorized token + verifier.
	pub fn access_token(url: Url, token: impl Into<String>, verifier: impl Into<String>) -> Self {
		let mut request = Self::new(HttpMethod::Post, url);

		request.token = Some(token.into());
		request.verifier = Some(verifier.into());

		request
	}

	/// Signs on behalf of the user holding `pair`.
	pub fn with_token_pair(mut self, pair: &TokenPair) -> Self {
		self.token = Some(pair.oauth_token.clone());
		self.token_secret = Some(pair.oauth_token_secret.clone());

		self
	}

	/// Sets `oauth_callback`.
	pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = Some(callback.into());

		self
	}

	/// Overrides the verifier placement.
	pub fn with_verifier_placement(mut self, placement: VerifierPlacement) -> Self {
		self.verifier_placement = placement;

		self
	}

	/// Replaces the request parameters.
	pub fn with_params(mut self, params: ParameterSet) -> Self {
		self.params = params;

		self
	}
}

/// Signed oauth_* parameters plus the intermediate values that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationHeader {
	params: ParameterSet,
	base_string: String,
	signature: String,
}
impl AuthorizationHeader {
	/// Base64 HMAC-SHA1 digest (`oauth_signature`, unencoded).
	pub fn signature(&self) -> &str {
		&self.signature
	}

	/// Canonical string the signature was computed over.
	pub fn base_string(&self) -> &str {
		&self.base_string
	}

	/// oauth_* parameters carried by the header, signature included.
	pub fn params(&self) -> &ParameterSet {
		&self.params
	}

	/// `Authorization` header value: `OAuth key="value", ...` sorted by key.
	pub fn value(&self) -> String {
		let pairs = self
			.params
			.encoded_sorted()
			.into_iter()
			.map(|(key, value)| format!("{key}=\"{value}\""))
			.collect::<Vec<_>>()
			.join(", ");

		format!("OAuth {pairs}")
	}
}
impl Display for AuthorizationHeader {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.value())
	}
}

/// Produces OAuth 1.0a `Authorization` headers for one consumer.
#[derive(Clone, Debug)]
pub struct Signer {
	consumer: ConsumerCredentials,
}
impl Signer {
	/// Creates a signer bound to `consumer`.
	pub fn new(consumer: ConsumerCredentials) -> Self {
		Self { consumer }
	}

	/// Consumer key used in `oauth_consumer_key`.
	pub fn consumer_key(&self) -> &str {
		&self.consumer.key
	}

	/// Signs with a fresh nonce and the current timestamp.
	pub fn sign(&self, request: &SigningRequest) -> AuthorizationHeader {
		self.sign_with(request, SigningContext::generate())
	}

	/// Signs with the provided nonce and timestamp.
	pub fn sign_with(&self, request: &SigningRequest, context: SigningContext) -> AuthorizationHeader {
		let mut oauth = ParameterSet::new()
			.with("oauth_consumer_key", self.consumer.key.as_str())
			.with("oauth_nonce", context.nonce)
			.with("oauth_signature_method", SIGNATURE_METHOD)
			.with("oauth_timestamp", context.timestamp.to_string())
			.with("oauth_version", OAUTH_VERSION);

		if let Some(callback) = &request.callback {
			oauth.insert("oauth_callback", callback.as_str());
		}
		if let Some(token) = &request.token {
			oauth.insert("oauth_token", token.as_str());
		}

		let unsigned_verifier = match (&request.verifier, request.verifier_placement) {
			(Some(verifier), VerifierPlacement::Signed) => {
				oauth.insert("oauth_verifier", verifier.as_str());

				None
			},
			(Some(verifier), VerifierPlacement::HeaderOnly) => Some(verifier.as_str()),
			(None, _) => None,
		};
		let mut signed = request.params.clone();

		signed.merge(&oauth);

		let base_string = base_string(request.method, &request.url, &signed);
		let key = signing_key(
			self.consumer.secret.expose(),
			request.token_secret.as_ref().map(Secret::expose).unwrap_or_default(),
		);
		let signature = hmac_sha1_base64(&key, &base_string);

		oauth.insert("oauth_signature", signature.as_str());

		if let Some(verifier) = unsigned_verifier {
			oauth.insert("oauth_verifier", verifier);
		}

		AuthorizationHeader { params: oauth, base_string, signature }
	}
}

/// `METHOD&encode(url)&encode(normalized parameters)`, with the URL stripped of query and
/// fragment.
pub fn base_string(method: HttpMethod, url: &Url, params: &ParameterSet) -> String {
	let mut base_url = url.clone();

	base_url.set_query(None);
	base_url.set_fragment(None);

	format!(
		"{}&{}&{}",
		method.as_str(),
		encode_strict(base_url.as_str()),
		encode_strict(&params.normalized())
	)
}

/// `encode(consumer_secret)&encode(token_secret)`.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
	format!("{}&{}", encode(consumer_secret), encode(token_secret))
}

fn hmac_sha1_base64(key: &str, data: &str) -> String {
	let mut mac = match HmacSha1::new_from_slice(key.as_bytes()) {
		Ok(mac) => mac,
		Err(_) => unreachable!("HMAC accepts keys of any length."),
	};

	mac.update(data.as_bytes());

	STANDARD.encode(mac.finalize().into_bytes())
}
