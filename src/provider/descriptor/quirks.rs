// self
use crate::_prelude::*;

/// Where `oauth_verifier` goes during the access-token exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifierPlacement {
	/// Part of the signed parameter set and of the header.
	#[default]
	Signed,
	/// Only appended to the header once the signature is computed.
	HeaderOnly,
}

/// Provider-specific quirks that influence how flows behave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderQuirks {
	/// Placement of `oauth_verifier` in phase two.
	pub verifier_placement: VerifierPlacement,
	/// Sends `X-Requested-With: XMLHttpRequest` on token exchanges.
	pub send_requested_with: bool,
}
impl Default for ProviderQuirks {
	fn default() -> Self {
		Self { verifier_placement: VerifierPlacement::Signed, send_requested_with: true }
	}
}
