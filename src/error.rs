//! Crate-level error types shared across the signer, the exchange flows, stores, and routes.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The provider answered, but not with what the caller asked for.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Caller-supplied identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Provider descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::provider::ProviderDescriptorError),
	/// An endpoint URL could not be parsed or joined.
	#[error("Endpoint URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<url::ParseError> for ConfigError {
	fn from(source: url::ParseError) -> Self {
		Self::InvalidUrl { source }
	}
}

/// Upstream replies that cannot be turned into the requested value.
#[derive(Debug, ThisError)]
pub enum ProviderError {
	/// Non-success status, or a token body without a token pair. The body is kept verbatim.
	#[error("Provider rejected the request with HTTP status {status}.")]
	Rejected {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Provider responded with JSON that does not match the expected shape.
	#[error("Provider returned malformed JSON.")]
	Malformed {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code returned by the provider.
		status: u16,
	},
}
impl ProviderError {
	/// HTTP status reported by the provider.
	pub fn status(&self) -> u16 {
		match self {
			Self::Rejected { status, .. } | Self::Malformed { status, .. } => *status,
		}
	}

	/// Raw body of a rejected reply, when one was captured.
	pub fn body(&self) -> Option<&str> {
		match self {
			Self::Rejected { body, .. } => Some(body),
			Self::Malformed { .. } => None,
		}
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn provider_error_exposes_status_and_body() {
		let err = ProviderError::Rejected { status: 401, body: "Invalid request token.".into() };

		assert_eq!(err.status(), 401);
		assert_eq!(err.body(), Some("Invalid request token."));
		assert!(Error::from(err).to_string().contains("401"));
	}
}
