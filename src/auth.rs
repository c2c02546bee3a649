//! Identity-domain identifiers, redacted secrets, and OAuth token pairs.

pub mod id;
pub mod secret;
pub mod token;

pub use id::*;
pub use secret::*;
pub use token::*;
