//! Review entity model, listing projection and DTOs.

use marketrev_core::review::ModerationStatus;
use marketrev_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub marketplace_id: DbId,
    pub article: String,
    pub product_link: Option<String>,
    pub seller_name: Option<String>,
    pub rating: i32,
    pub review_text: String,
    pub moderation_screenshots: Vec<String>,
    pub public_photos: Vec<String>,
    pub status: String,
    pub admin_comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A review joined with its marketplace and author for display.
///
/// Serializes flat: the review columns sit alongside `marketplace_name`,
/// `marketplace_icon` and `user_username`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    pub marketplace_name: String,
    pub marketplace_icon: Option<String>,
    pub user_username: String,
}

/// Identifier and creation instant returned by an insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CreatedReview {
    pub id: DbId,
    pub created_at: Timestamp,
}

/// Validated input for inserting a review. Status is not settable here.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub marketplace_id: DbId,
    pub article: String,
    pub product_link: Option<String>,
    pub seller_name: Option<String>,
    pub rating: i32,
    pub review_text: String,
    pub moderation_screenshots: Vec<String>,
    pub public_photos: Vec<String>,
}

/// Moderation decision applied to one review.
#[derive(Debug, Clone)]
pub struct ModerationUpdate {
    pub status: ModerationStatus,
    pub admin_comment: Option<String>,
}

/// Optional listing filters. `None` fields impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    /// Exact `status` value; not restricted to the known statuses.
    pub status: Option<String>,
    pub marketplace_id: Option<DbId>,
    /// Case-insensitive substring of `article`.
    pub article: Option<String>,
    /// Case-insensitive substring of `seller_name`.
    pub seller: Option<String>,
    pub user_id: Option<DbId>,
    pub limit: i64,
}
