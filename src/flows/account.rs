//! Authenticated REST calls made on behalf of a user holding an access pair.

// self
use crate::{
	_prelude::*,
	auth::{ScreenName, TokenPair},
	flows::{Gateway, common},
	http::OAuthHttpClient,
	oauth::ParameterSet,
	obs::{self, FlowKind},
};

/// Upper bound on `friends/ids` pages walked by [`Gateway::follows`].
pub const MAX_FRIEND_PAGES: usize = 5;
/// Cursor value that starts a `friends/ids` walk.
pub const FIRST_CURSOR: i64 = -1;

/// Subset of the `account/verify_credentials` reply the whitelist needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
	/// Handle without the leading `@`.
	pub screen_name: String,
	/// Numeric account id.
	pub id: u64,
	/// Display name.
	#[serde(default)]
	pub name: String,
}

/// One page of `friends/ids`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendIdsPage {
	/// Ids of accounts the user follows.
	pub ids: Vec<u64>,
	/// Cursor of the next page; `0` when this is the last one.
	#[serde(default)]
	pub next_cursor: i64,
}

impl<C> Gateway<C>
where
	C: ?Sized + OAuthHttpClient,
{
	/// Fetches the profile of the user owning `pair`.
	pub async fn verify_credentials(&self, pair: &TokenPair) -> Result<AccountProfile> {
		obs::observe(FlowKind::VerifyCredentials, "verify_credentials", async move {
			let url = self
				.descriptor
				.api_url("account/verify_credentials.json")
				.map_err(Error::from)?;
			let params = ParameterSet::new().with("tweet_mode", "extended");
			let request = common::signed_get(self, url, params, pair);
			let response = common::dispatch(self, request).await?;

			common::decode_json(response)
		})
		.await
	}

	/// Fetches one page of the ids `screen_name` follows.
	pub async fn friend_ids(
		&self,
		pair: &TokenPair,
		screen_name: &ScreenName,
		cursor: i64,
	) -> Result<FriendIdsPage> {
		obs::observe(FlowKind::FriendIds, "friend_ids", async move {
			let url = self.descriptor.api_url("friends/ids.json").map_err(Error::from)?;
			let params = ParameterSet::new()
				.with("cursor", cursor.to_string())
				.with("screen_name", screen_name.as_ref());
			let request = common::signed_get(self, url, params, pair);
			let response = common::dispatch(self, request).await?;

			common::decode_json(response)
		})
		.await
	}

	/// Returns true once `target` shows up in the first [`MAX_FRIEND_PAGES`] pages of
	/// `screen_name`'s friends.
	pub async fn follows(
		&self,
		pair: &TokenPair,
		screen_name: &ScreenName,
		target: u64,
	) -> Result<bool> {
		let mut cursor = FIRST_CURSOR;

		for _ in 0..MAX_FRIEND_PAGES {
			let page = self.friend_ids(pair, screen_name, cursor).await?;

			if page.ids.contains(&target) {
				return Ok(true);
			}
			if page.next_cursor == 0 {
				break;
			}

			cursor = page.next_cursor;
		}

		Ok(false)
	}
}
