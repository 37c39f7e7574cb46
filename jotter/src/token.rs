//! Bearer credentials carried in a cookie.
//!
//! Two strategies exist: a self-verifying [`SignedTokenCodec`] and an
//! opaque handle looked up in a [`SessionRegistry`]. A deployment uses exactly
//! one of them, behind the [`IdentityVerifier`] trait.

mod errors;
mod signed;
mod session_registry;
mod verifier;

pub use errors::TokenError;
pub use signed::SignedTokenCodec;
pub use session_registry::{SessionRegistry, SessionRegistryImpl};
pub use verifier::{make_verifier, IdentityVerifier};
