//! Provider-facing descriptors.
//!
//! `descriptor` exposes validated metadata ([`ProviderDescriptor`]) covering the two OAuth 1.0a
//! token endpoints, the REST API base used for authenticated calls, and provider quirks
//! (verifier placement, `X-Requested-With`).

pub mod descriptor;

pub use descriptor::*;
