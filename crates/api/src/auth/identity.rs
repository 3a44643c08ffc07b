//! Identity of the caller behind a request.

use marketrev_core::types::DbId;

use crate::gateway::GatewayRequest;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The identity making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
}

/// Resolves the actor behind a request.
///
/// Verification of the caller (token checks and the like) happens in the
/// implementation; the review handler only consumes the result. `None` means
/// the request carries no usable identity.
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, request: &GatewayRequest) -> Option<Actor>;
}

/// Accepts the `X-User-Id` header verbatim.
///
/// Suitable only behind a gateway that has already authenticated the caller
/// and sets the header itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustedHeaderIdentity;

impl IdentityVerifier for TrustedHeaderIdentity {
    fn verify(&self, request: &GatewayRequest) -> Option<Actor> {
        let raw = request.header(USER_ID_HEADER)?.trim();
        match raw.parse::<DbId>() {
            Ok(user_id) => Some(Actor { user_id }),
            Err(_) => {
                if !raw.is_empty() {
                    tracing::warn!(value = %raw, "Ignoring non-numeric user id header");
                }
                None
            }
        }
    }
}
