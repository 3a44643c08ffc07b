pub mod health;
pub mod reviews;

use axum::routing::any;
use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /reviews        GET list, POST submit, PUT moderate, OPTIONS preflight
/// ```
///
/// Every method reaches the review handler, which answers unsupported ones
/// with 405 itself.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/reviews", any(reviews::reviews))
}
