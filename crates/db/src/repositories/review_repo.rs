//! Repository for the `reviews` table.

use marketrev_core::review::ModerationStatus;
use marketrev_core::types::DbId;
use sqlx::PgConnection;

use crate::models::review::{CreateReview, CreatedReview, ModerationUpdate, Review, ReviewFilter, ReviewListing};

/// Column list for plain `reviews` queries.
const COLUMNS: &str = "id, user_id, marketplace_id, article, product_link, seller_name, \
    rating, review_text, moderation_screenshots, public_photos, status, admin_comment, \
    created_at, updated_at";

/// Column list for the listing join, qualified with the `r` alias.
const LISTING_COLUMNS: &str = "r.id, r.user_id, r.marketplace_id, r.article, r.product_link, \
    r.seller_name, r.rating, r.review_text, r.moderation_screenshots, r.public_photos, \
    r.status, r.admin_comment, r.created_at, r.updated_at, \
    m.name AS marketplace_name, m.icon AS marketplace_icon, u.username AS user_username";

/// Provides the review queries used by the request handler.
///
/// Every method takes a `&mut PgConnection` so a caller can run a whole
/// request on one connection, inside a transaction when it writes.
pub struct ReviewRepo;

impl ReviewRepo {
    /// List reviews matching `filter`, newest first, joined with marketplace
    /// and author details.
    pub async fn list(
        conn: &mut PgConnection,
        filter: &ReviewFilter,
    ) -> Result<Vec<ReviewListing>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_review_filter(filter);

        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM reviews r \
             JOIN marketplaces m ON r.marketplace_id = m.id \
             JOIN users u ON r.user_id = u.id \
             {where_clause} \
             ORDER BY r.created_at DESC, r.id DESC \
             LIMIT ${bind_idx}"
        );
        tracing::debug!(filters = bind_values.len(), limit = filter.limit, "Listing reviews");

        let q = bind_review_values(sqlx::query_as::<_, ReviewListing>(&query), &bind_values);
        q.bind(filter.limit).fetch_all(&mut *conn).await
    }

    /// Insert a review owned by `user_id`. The status always starts as `pending`.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        input: &CreateReview,
    ) -> Result<CreatedReview, sqlx::Error> {
        sqlx::query_as::<_, CreatedReview>(
            "INSERT INTO reviews
                (user_id, marketplace_id, article, product_link, seller_name,
                 rating, review_text, moderation_screenshots, public_photos, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING id, created_at",
        )
        .bind(user_id)
        .bind(input.marketplace_id)
        .bind(&input.article)
        .bind(&input.product_link)
        .bind(&input.seller_name)
        .bind(input.rating)
        .bind(&input.review_text)
        .bind(&input.moderation_screenshots)
        .bind(&input.public_photos)
        .bind(ModerationStatus::Pending.as_str())
        .fetch_one(&mut *conn)
        .await
    }

    /// Apply a moderation decision and refresh `updated_at`.
    ///
    /// Returns the number of rows touched; an unknown `id` yields `0`.
    pub async fn moderate(
        conn: &mut PgConnection,
        id: DbId,
        update: &ModerationUpdate,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reviews
             SET status = $1, admin_comment = $2, updated_at = NOW()
             WHERE id = $3",
        )
        .bind(update.status.as_str())
        .bind(&update.admin_comment)
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Find a review by its ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }
}

/// Typed bind value for the dynamically-built listing query.
#[derive(Debug, Clone, PartialEq)]
enum BindValue {
    BigInt(i64),
    Text(String),
}

/// Build a WHERE clause and bind values from `ReviewFilter`.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
/// The `where_clause` is empty if no filters are active, or starts with `WHERE `.
/// Caller-supplied text only ever travels as a bind value.
fn build_review_filter(filter: &ReviewFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(ref status) = filter.status {
        conditions.push(format!("r.status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.clone()));
    }

    if let Some(marketplace_id) = filter.marketplace_id {
        conditions.push(format!("r.marketplace_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(marketplace_id));
    }

    if let Some(ref article) = filter.article {
        conditions.push(format!("r.article ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{article}%")));
    }

    if let Some(ref seller) = filter.seller {
        conditions.push(format!("r.seller_name ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{seller}%")));
    }

    if let Some(user_id) = filter.user_id {
        conditions.push(format!("r.user_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(user_id));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_review_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}
