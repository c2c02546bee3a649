//! Shared helpers for gateway calls (signing, dispatch, reply decoding, instrumentation).

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::TokenPair,
	error::{ProviderError, TransportError},
	flows::Gateway,
	http::{HttpMethod, OAuthHttpClient, OutboundRequest, RawResponse},
	oauth::{ParameterSet, SigningRequest},
};

/// Value of the `X-Requested-With` header sent on token exchanges.
pub const REQUESTED_WITH: &str = "XMLHttpRequest";

/// Sends a signed request, mapping transport failures into the crate taxonomy.
pub(crate) async fn dispatch<C>(gateway: &Gateway<C>, request: OutboundRequest) -> Result<RawResponse>
where
	C: ?Sized + OAuthHttpClient,
{
	let response = gateway.http_client.execute(request).await.map_err(TransportError::network)?;

	Ok(response)
}

/// Builds a signed `GET` to `url` whose query is `params`.
pub(crate) fn signed_get<C>(
	gateway: &Gateway<C>,
	mut url: Url,
	params: ParameterSet,
	pair: &TokenPair,
) -> OutboundRequest
where
	C: ?Sized + OAuthHttpClient,
{
	let query = params.to_query();
	let signing =
		SigningRequest::new(HttpMethod::Get, url.clone()).with_token_pair(pair).with_params(params);
	let header = gateway.signer().sign(&signing);

	url.set_query(query.as_deref());

	OutboundRequest::new(HttpMethod::Get, url).with_header("Authorization", header.value())
}

/// Decodes a JSON REST reply; non-2xx statuses become [`ProviderError::Rejected`].
pub(crate) fn decode_json<T>(response: RawResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	if !response.is_success() {
		return Err(ProviderError::Rejected { status: response.status, body: response.body }.into());
	}

	let mut deserializer = serde_json::Deserializer::from_str(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ProviderError::Malformed { source, status: response.status }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, Deserialize)]
	struct Probe {
		value: u64,
	}

	#[test]
	fn decode_json_classifies_replies() {
		let ok: Probe = decode_json(RawResponse { status: 200, body: "{\"value\":7}".into() })
			.expect("Valid JSON should decode.");

		assert_eq!(ok.value, 7);

		let err = decode_json::<Probe>(RawResponse { status: 401, body: "denied".into() })
			.expect_err("Non-success status should fail.");

		assert!(matches!(
			err,
			Error::Provider(ProviderError::Rejected { status: 401, ref body }) if body == "denied"
		));

		let err = decode_json::<Probe>(RawResponse { status: 200, body: "{\"value\":\"x\"}".into() })
			.expect_err("Mismatched JSON should fail.");

		match err {
			Error::Provider(ProviderError::Malformed { source, status }) => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "value");
			},
			other => panic!("Unexpected error: {other:?}."),
		}
	}
}
