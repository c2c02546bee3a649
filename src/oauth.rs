//! OAuth 1.0a signature generation.
//!
//! [`Signer`] turns a [`SigningRequest`] into an [`AuthorizationHeader`]: the oauth_* parameters
//! and any request parameters are percent-encoded ([`encode`]), sorted into the normalized
//! parameter string ([`ParameterSet::normalized`]), composed into the base string
//! `METHOD&encode(url)&encode(parameters)`, and signed with HMAC-SHA1 under
//! `encode(consumer_secret)&encode(token_secret)`. The module performs no I/O; nonce and
//! timestamp come from a [`SigningContext`], which tests can pin.

pub mod encode;
pub mod params;
pub mod signer;

pub use encode::*;
pub use params::*;
pub use signer::*;
