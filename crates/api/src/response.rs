//! JSON payloads returned by the review handler.
//!
//! Successful bodies carry `"success": true` next to their data; failures
//! carry a single `"error"` field.

use marketrev_core::types::{DbId, Timestamp};
use marketrev_db::models::review::ReviewListing;
use serde::Serialize;

/// `{ "error": "<message>" }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `{ "success": true, "reviews": [...] }`
#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub success: bool,
    pub reviews: Vec<ReviewListing>,
}

/// `{ "success": true, "review_id": 1, "created_at": "..." }`
#[derive(Debug, Serialize)]
pub struct ReviewCreatedResponse {
    pub success: bool,
    pub review_id: DbId,
    pub created_at: Timestamp,
}

/// `{ "success": true, "message": "..." }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}
