//! Actor identity resolution.
//!
//! - [`identity::IdentityVerifier`] -- Turns a request into an [`identity::Actor`].
//! - [`identity::TrustedHeaderIdentity`] -- Reads the `X-User-Id` header as-is.

pub mod identity;
