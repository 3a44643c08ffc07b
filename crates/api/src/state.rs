use std::sync::Arc;

use crate::auth::identity::IdentityVerifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Each request checks out one connection.
    pub pool: marketrev_db::DbPool,
    /// Resolves the actor behind write requests.
    pub identity: Arc<dyn IdentityVerifier>,
}
