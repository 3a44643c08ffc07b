//! Review request handler.
//!
//! One entry point, [`handle`], dispatches a gateway request on its method:
//!
//! ```text
//! OPTIONS  CORS preflight, no database access
//! GET      list reviews with optional filters
//! POST     submit a review (starts as `pending`)
//! PUT      moderate a review (admin only)
//! *        405
//! ```
//!
//! Each request uses at most one database connection; writes run inside a
//! transaction that is committed on success and rolled back otherwise.

use axum::http::StatusCode;
use marketrev_core::error::CoreError;
use marketrev_core::review::{
    list_limit, normalize_optional_text, require_text, validate_rating, ModerationStatus,
    DEFAULT_LIST_STATUS, MSG_ADMIN_REQUIRED, MSG_AUTH_REQUIRED, MSG_REQUIRED_FIELDS,
    MSG_REVIEW_ID_REQUIRED,
};
use marketrev_core::types::DbId;
use marketrev_db::models::review::{CreateReview, ModerationUpdate, ReviewFilter};
use marketrev_db::repositories::{ReviewRepo, UserRepo};
use serde::Deserialize;
use sqlx::{PgConnection, Postgres, Transaction};

use crate::auth::identity::Actor;
use crate::error::{AppError, AppResult};
use crate::gateway::{GatewayRequest, GatewayResponse};
use crate::response::{MessageResponse, ReviewCreatedResponse, ReviewListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request body types
// ---------------------------------------------------------------------------

/// Body of a POST (review submission).
#[derive(Debug, Default, Deserialize)]
pub struct CreateReviewRequest {
    pub marketplace_id: Option<DbId>,
    pub article: Option<String>,
    pub product_link: Option<String>,
    pub seller_name: Option<String>,
    pub rating: Option<i32>,
    pub review_text: Option<String>,
    pub moderation_screenshots: Option<Vec<String>>,
    pub public_photos: Option<Vec<String>>,
}

impl CreateReviewRequest {
    /// Check required fields and the rating range, normalizing text fields.
    ///
    /// A zero `marketplace_id` or `rating` counts as missing.
    pub fn validate(self) -> Result<CreateReview, CoreError> {
        let required = || CoreError::Validation(MSG_REQUIRED_FIELDS.to_string());

        let marketplace_id = self.marketplace_id.filter(|id| *id != 0).ok_or_else(required)?;
        let article = require_text(self.article.as_deref()).ok_or_else(required)?;
        let rating = self.rating.filter(|r| *r != 0).ok_or_else(required)?;
        let review_text = require_text(self.review_text.as_deref()).ok_or_else(required)?;

        validate_rating(rating)?;

        Ok(CreateReview {
            marketplace_id,
            article,
            product_link: normalize_optional_text(self.product_link.as_deref()),
            seller_name: normalize_optional_text(self.seller_name.as_deref()),
            rating,
            review_text,
            moderation_screenshots: self.moderation_screenshots.unwrap_or_default(),
            public_photos: self.public_photos.unwrap_or_default(),
        })
    }
}

/// Body of a PUT (moderation decision).
#[derive(Debug, Default, Deserialize)]
pub struct ModerateReviewRequest {
    pub review_id: Option<DbId>,
    pub status: Option<String>,
    pub admin_comment: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Handle one gateway request and produce its response.
///
/// Never fails: every error is rendered as a `{"error": ...}` response.
pub async fn handle(state: &AppState, request: GatewayRequest) -> GatewayResponse {
    let result = match request.http_method.as_str() {
        "OPTIONS" => return GatewayResponse::preflight(),
        "GET" => list_reviews(state, &request).await,
        "POST" => create_review(state, &request).await,
        "PUT" => moderate_review(state, &request).await,
        other => {
            tracing::debug!(method = %other, "Rejecting unsupported method");
            Err(AppError::MethodNotAllowed)
        }
    };

    result.unwrap_or_else(GatewayResponse::from)
}

// ---------------------------------------------------------------------------
// GET: list
// ---------------------------------------------------------------------------

async fn list_reviews(state: &AppState, request: &GatewayRequest) -> AppResult<GatewayResponse> {
    let filter = parse_list_filter(request)?;

    let mut conn = state.pool.acquire().await?;
    let reviews = ReviewRepo::list(&mut conn, &filter).await?;

    tracing::debug!(
        count = reviews.len(),
        status = ?filter.status,
        limit = filter.limit,
        "Listed reviews",
    );

    Ok(GatewayResponse::json(
        StatusCode::OK,
        &ReviewListResponse {
            success: true,
            reviews,
        },
    ))
}

/// Build the listing filter from query parameters.
///
/// An absent `status` defaults to `approved`; an explicitly empty one
/// disables the status constraint. Any other value is matched verbatim, so
/// an unknown status simply lists nothing. Empty values of the other
/// parameters count as absent.
fn parse_list_filter(request: &GatewayRequest) -> AppResult<ReviewFilter> {
    let status = match request.query_param("status") {
        None => Some(DEFAULT_LIST_STATUS.as_str().to_string()),
        Some("") => None,
        Some(raw) => Some(raw.to_string()),
    };

    Ok(ReviewFilter {
        status,
        marketplace_id: parse_int_param(request, "marketplace_id")?,
        article: text_param(request, "article"),
        seller: text_param(request, "seller"),
        user_id: parse_int_param(request, "user_id")?,
        limit: list_limit(parse_int_param(request, "limit")?),
    })
}

fn text_param(request: &GatewayRequest, name: &str) -> Option<String> {
    request
        .query_param(name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_int_param(request: &GatewayRequest, name: &str) -> AppResult<Option<i64>> {
    match request.query_param(name).map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
            AppError::BadRequest(format!("Invalid {name} '{raw}': expected an integer"))
        }),
    }
}

// ---------------------------------------------------------------------------
// POST: create
// ---------------------------------------------------------------------------

async fn create_review(state: &AppState, request: &GatewayRequest) -> AppResult<GatewayResponse> {
    let actor = authenticate(state, request)?;
    let input = request.json_body::<CreateReviewRequest>()?.validate()?;

    let mut tx = state.pool.begin().await?;
    let created = match ReviewRepo::create(&mut *tx, actor.user_id, &input).await {
        Ok(created) => created,
        Err(e) => {
            rollback(tx).await;
            return Err(e.into());
        }
    };
    tx.commit().await?;

    tracing::info!(
        review_id = created.id,
        user_id = actor.user_id,
        marketplace_id = input.marketplace_id,
        "Review submitted for moderation",
    );

    Ok(GatewayResponse::json(
        StatusCode::CREATED,
        &ReviewCreatedResponse {
            success: true,
            review_id: created.id,
            created_at: created.created_at,
        },
    ))
}

// ---------------------------------------------------------------------------
// PUT: moderate
// ---------------------------------------------------------------------------

async fn moderate_review(state: &AppState, request: &GatewayRequest) -> AppResult<GatewayResponse> {
    let actor = authenticate(state, request)?;
    let body = request.json_body::<ModerateReviewRequest>()?;
    let review_id = body
        .review_id
        .filter(|id| *id != 0)
        .ok_or_else(|| CoreError::Validation(MSG_REVIEW_ID_REQUIRED.to_string()))?;

    let mut tx = state.pool.begin().await?;
    match apply_moderation(&mut *tx, actor, review_id, body).await {
        Ok(()) => tx.commit().await?,
        Err(e) => {
            rollback(tx).await;
            return Err(e);
        }
    }

    Ok(GatewayResponse::json(
        StatusCode::OK,
        &MessageResponse {
            success: true,
            message: "Review updated",
        },
    ))
}

/// Admin check followed by the optional status update.
///
/// A request without a `status` changes nothing (not even `admin_comment`)
/// and still counts as success.
async fn apply_moderation(
    conn: &mut PgConnection,
    actor: Actor,
    review_id: DbId,
    body: ModerateReviewRequest,
) -> AppResult<()> {
    let is_admin = UserRepo::find_admin_flag(conn, actor.user_id)
        .await?
        .unwrap_or(false);
    if !is_admin {
        tracing::warn!(user_id = actor.user_id, review_id, "Moderation attempt by non-admin");
        return Err(CoreError::Forbidden(MSG_ADMIN_REQUIRED.to_string()).into());
    }

    let Some(raw_status) = body.status.filter(|s| !s.is_empty()) else {
        tracing::debug!(review_id, "No status supplied; nothing to update");
        return Ok(());
    };
    let status = raw_status.parse::<ModerationStatus>()?;

    let update = ModerationUpdate {
        status,
        admin_comment: body.admin_comment,
    };
    let affected = ReviewRepo::moderate(conn, review_id, &update).await?;

    tracing::info!(
        review_id,
        admin_id = actor.user_id,
        status = %status,
        affected,
        "Review moderated",
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn authenticate(state: &AppState, request: &GatewayRequest) -> AppResult<Actor> {
    state
        .identity
        .verify(request)
        .ok_or_else(|| CoreError::Unauthorized(MSG_AUTH_REQUIRED.to_string()).into())
}

async fn rollback(tx: Transaction<'static, Postgres>) {
    if let Err(e) = tx.rollback().await {
        tracing::warn!(error = %e, "Transaction rollback failed");
    }
}
