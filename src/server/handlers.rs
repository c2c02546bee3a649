//! JSON handlers behind `/api`.

// crates.io
use axum::{
	Json,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde_json::{Value, json};
// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, ScreenName, Secret, TokenPair, WalletAddress},
	error::ProviderError,
	server::AppState,
	store::WhitelistRecord,
};

/// Failure of a token route, rendered as JSON.
#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	body: Value,
}
impl ApiError {
	/// HTTP status the error renders with.
	pub fn status(&self) -> StatusCode {
		self.status
	}
}
impl From<Error> for ApiError {
	fn from(error: Error) -> Self {
		let message = error.to_string();
		let (status, body) = match &error {
			Error::Provider(ProviderError::Rejected { status, body }) =>
				(StatusCode::BAD_GATEWAY, json!({ "error": message, "status": status, "body": body })),
			Error::Provider(provider) => (
				StatusCode::BAD_GATEWAY,
				json!({ "error": message, "status": provider.status() }),
			),
			Error::Transport(_) => (StatusCode::BAD_GATEWAY, json!({ "error": message })),
			Error::Identifier(_) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
			Error::Config(_) | Error::Storage(_) =>
				(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message })),
		};

		tracing::warn!(status = status.as_u16(), error = %message, "request failed");

		Self { status, body }
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(self.body)).into_response()
	}
}

/// Body of `POST /api/access-token`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenBody {
	/// Request token authorized by the user.
	pub oauth_token: String,
	/// Verifier returned with the authorization redirect.
	pub oauth_verifier: String,
}

/// Access pair carried by the account routes.
#[derive(Debug, Deserialize)]
pub struct AccessPairBody {
	/// Access token.
	pub access_token: String,
	/// Access token secret.
	pub access_token_secret: Secret,
}
impl AccessPairBody {
	fn to_pair(&self) -> TokenPair {
		TokenPair::new(self.access_token.as_str(), self.access_token_secret.clone())
	}
}

/// Body of `POST /api/check-followers`.
#[derive(Debug, Deserialize)]
pub struct CheckFollowersBody {
	/// Handle whose friends are walked.
	pub screen_name: String,
	/// Access pair of that handle.
	#[serde(flatten)]
	pub pair: AccessPairBody,
}

/// Body of `POST /api/check-user`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckUserBody {
	/// Wallet address to look up.
	pub address: String,
}

/// Body of `POST /api/save-user`.
#[derive(Debug, Deserialize)]
pub struct SaveUserBody {
	/// Wallet address to whitelist.
	pub address: String,
	/// Handle that passed the follow check.
	pub twitter_name: String,
}

/// Reply of `POST /api/verify-credentials`.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCredentialsReply {
	/// Handle of the token owner, empty on failure.
	pub screen_name: String,
	/// Whether the provider accepted the pair.
	pub success: bool,
	/// Failure description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Reply of `POST /api/check-followers`.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFollowersReply {
	/// Whether the campaign account is followed.
	pub followed: bool,
	/// Whether the provider could be queried.
	pub success: bool,
	/// Failure description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Reply of `POST /api/check-user`.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckUserReply {
	/// Whether the address is whitelisted.
	pub exists: bool,
	/// Handle recorded with the address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Failure description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Reply of `POST /api/save-user`.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveUserReply {
	/// Whether the record was appended.
	pub success: bool,
	/// Failure description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// `POST /api/request-token`.
pub async fn request_token(State(state): State<AppState>) -> Result<Json<TokenPair>, ApiError> {
	let pair = state.gateway.request_token().await?;

	tracing::info!(callback_confirmed = pair.extra("oauth_callback_confirmed"), "issued request token");

	Ok(Json(pair))
}

/// `POST /api/access-token`.
pub async fn access_token(
	State(state): State<AppState>,
	Json(body): Json<AccessTokenBody>,
) -> Result<Json<TokenPair>, ApiError> {
	let pair = state.gateway.access_token(&body.oauth_token, &body.oauth_verifier).await?;

	tracing::info!(screen_name = pair.extra("screen_name"), "issued access token");

	Ok(Json(pair))
}

/// `POST /api/verify-credentials`.
pub async fn verify_credentials(
	State(state): State<AppState>,
	Json(body): Json<AccessPairBody>,
) -> Json<VerifyCredentialsReply> {
	let reply = match state.gateway.verify_credentials(&body.to_pair()).await {
		Ok(profile) =>
			VerifyCredentialsReply { screen_name: profile.screen_name, success: true, error: None },
		Err(e) => {
			tracing::warn!(error = %e, "credential verification failed");

			VerifyCredentialsReply {
				screen_name: String::new(),
				success: false,
				error: Some(e.to_string()),
			}
		},
	};

	Json(reply)
}

/// `POST /api/check-followers`.
pub async fn check_followers(
	State(state): State<AppState>,
	Json(body): Json<CheckFollowersBody>,
) -> Json<CheckFollowersReply> {
	let outcome = match ScreenName::new(&body.screen_name) {
		Ok(screen_name) => state
			.gateway
			.follows(&body.pair.to_pair(), &screen_name, state.follow_target)
			.await
			.map_err(|e| e.to_string()),
		Err(e) => Err(e.to_string()),
	};
	let reply = match outcome {
		Ok(followed) => {
			tracing::info!(screen_name = %body.screen_name, followed, "checked follow status");

			CheckFollowersReply { followed, success: true, error: None }
		},
		Err(error) => {
			tracing::warn!(screen_name = %body.screen_name, %error, "follow check failed");

			CheckFollowersReply { followed: false, success: false, error: Some(error) }
		},
	};

	Json(reply)
}

/// `POST /api/check-user`.
pub async fn check_user(
	State(state): State<AppState>,
	Json(body): Json<CheckUserBody>,
) -> Json<CheckUserReply> {
	let missing = |error: String| CheckUserReply { exists: false, name: None, error: Some(error) };

	if body.address.is_empty() {
		return Json(missing("Empty address".into()));
	}

	let address = match WalletAddress::new(&body.address) {
		Ok(address) => address,
		Err(e) => return Json(missing(e.to_string())),
	};
	let reply = match state.store.find(&address).await {
		Ok(Some(record)) =>
			CheckUserReply { exists: true, name: Some(record.name), error: None },
		Ok(None) => CheckUserReply { exists: false, name: None, error: None },
		Err(e) => {
			tracing::error!(error = %e, "whitelist lookup failed");

			missing(e.to_string())
		},
	};

	Json(reply)
}

/// `POST /api/save-user`.
pub async fn save_user(
	State(state): State<AppState>,
	Json(body): Json<SaveUserBody>,
) -> (StatusCode, Json<SaveUserReply>) {
	let failure = |status: StatusCode, error: String| {
		(status, Json(SaveUserReply { success: false, error: Some(error) }))
	};
	let record = match parse_record(&body) {
		Ok(record) => record,
		Err(e) => return failure(StatusCode::BAD_REQUEST, e.to_string()),
	};

	if let Err(e) = state.store.append(record).await {
		tracing::error!(error = %e, "whitelist append failed");

		return failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
	}

	tracing::info!(address = %body.address, twitter_name = %body.twitter_name, "whitelisted");

	(StatusCode::OK, Json(SaveUserReply { success: true, error: None }))
}

/// Unknown `/api` paths.
pub async fn not_found() -> (StatusCode, Json<Value>) {
	(StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

fn parse_record(body: &SaveUserBody) -> Result<WhitelistRecord, IdentifierError> {
	Ok(WhitelistRecord::new(WalletAddress::new(&body.address)?, ScreenName::new(&body.twitter_name)?))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn provider_rejection_renders_bad_gateway_with_raw_body() {
		let error = ApiError::from(Error::from(ProviderError::Rejected {
			status: 401,
			body: "Invalid request token.".into(),
		}));

		assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
		assert_eq!(error.body["status"], 401);
		assert_eq!(error.body["body"], "Invalid request token.");
	}

	#[test]
	fn identifier_errors_render_bad_request() {
		let error = ApiError::from(Error::from(IdentifierError::Empty { kind: "Wallet" }));

		assert_eq!(error.status(), StatusCode::BAD_REQUEST);
	}

	#[test]
	fn parse_record_validates_both_fields() {
		let body = SaveUserBody { address: "0xabc".into(), twitter_name: "a,b".into() };

		assert!(matches!(parse_record(&body), Err(IdentifierError::ContainsDelimiter { .. })));

		let body = SaveUserBody { address: "0xabc".into(), twitter_name: "alice".into() };
		let record = parse_record(&body).expect("Valid body should produce a record.");

		assert_eq!(record.to_line(), "0xabc,alice\n");
	}
}
