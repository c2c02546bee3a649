//! Strongly typed identifiers enforced across the whitelist domain.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

/// Maximum identifier length in bytes.
pub const IDENTIFIER_MAX_LEN: usize = 128;
/// Separator between the two fields of a whitelist row; identifiers may not contain it.
pub const FIELD_DELIMITER: char = ',';

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (wallet, screen name, provider).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (wallet, screen name, provider).
		kind: &'static str,
	},
	/// The identifier contains the whitelist field delimiter.
	#[error("{kind} identifier contains a comma.")]
	ContainsDelimiter {
		/// Kind of identifier (wallet, screen name, provider).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (wallet, screen name, provider).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { WalletAddress, "Wallet address that proved key ownership.", "Wallet" }
def_id! { ScreenName, "Social account handle without the leading `@`.", "ScreenName" }
def_id! { ProviderId, "Identifier for an OAuth provider descriptor.", "Provider" }

impl WalletAddress {
	/// Compares against another address ignoring letter case (checksummed vs. lowercase hex).
	pub fn matches(&self, other: &str) -> bool {
		self.0.to_lowercase() == other.to_lowercase()
	}
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.contains(FIELD_DELIMITER) {
		return Err(IdentifierError::ContainsDelimiter { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_delimiters() {
		assert!(WalletAddress::new(" 0xabc").is_err(), "Leading whitespace must be rejected.");
		assert!(WalletAddress::new("0xabc\n").is_err(), "Trailing newline must be rejected.");
		assert_eq!(
			ScreenName::new("camp,cosmos"),
			Err(IdentifierError::ContainsDelimiter { kind: "ScreenName" })
		);

		let handle = ScreenName::new("campcosmos").expect("Handle fixture should be valid.");

		assert_eq!(handle.as_ref(), "campcosmos");
		assert!(ScreenName::new("").is_err());
		assert!(ProviderId::new("with space").is_err());
	}

	#[test]
	fn wallet_addresses_match_case_insensitively() {
		let address = WalletAddress::new("0xAbCdEf0123456789")
			.expect("Wallet fixture should be considered valid.");

		assert!(address.matches("0xabcdef0123456789"));
		assert!(address.matches("0XABCDEF0123456789"));
		assert!(!address.matches("0xabcdef012345678"));
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let address: WalletAddress =
			serde_json::from_str("\"0x42\"").expect("Wallet should deserialize successfully.");

		assert_eq!(address.as_ref(), "0x42");
		assert!(serde_json::from_str::<WalletAddress>("\"with space\"").is_err());
		assert!(serde_json::from_str::<ScreenName>("\"a,b\"").is_err());
	}

	#[test]
	fn length_limits() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		ScreenName::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(ScreenName::new(&too_long).is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<ScreenName, u8> = HashMap::from_iter([(
			ScreenName::new("campcosmos").expect("Handle used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("campcosmos"), Some(&7));
	}
}
