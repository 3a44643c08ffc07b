//! Review moderation constants and validation functions.
//!
//! Defines the moderation status set, rating bounds, list defaults and the
//! text normalization helpers used by the DB and API layers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Lowest accepted star rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: i32 = 5;

/// Status filter applied to listings when the caller supplies none.
pub const DEFAULT_LIST_STATUS: ModerationStatus = ModerationStatus::Approved;

/// Row cap applied to listings when the caller supplies no `limit`.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Message returned when a required create field is missing or blank.
pub const MSG_REQUIRED_FIELDS: &str = "Marketplace, article, rating and review text are required";

/// Message returned when the rating is outside `MIN_RATING..=MAX_RATING`.
pub const MSG_RATING_RANGE: &str = "Rating must be between 1 and 5";

/// Message returned when a moderation update omits `review_id`.
pub const MSG_REVIEW_ID_REQUIRED: &str = "Review ID is required";

/// Message returned when no actor identity accompanies a write.
pub const MSG_AUTH_REQUIRED: &str = "Authentication required";

/// Message returned when a non-admin attempts moderation.
pub const MSG_ADMIN_REQUIRED: &str = "Admin access required";

/* --------------------------------------------------------------------------
Moderation status
-------------------------------------------------------------------------- */

/// Moderation state of a review.
///
/// Transitions are unconstrained: an admin may move a review between any two
/// states at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [ModerationStatus; 3] = [
        ModerationStatus::Pending,
        ModerationStatus::Approved,
        ModerationStatus::Rejected,
    ];

    /// The value stored in the `reviews.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModerationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let accepted: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: {}",
                    accepted.join(", ")
                ))
            })
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a rating lies within `MIN_RATING..=MAX_RATING`.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(MSG_RATING_RANGE.to_string()))
    }
}

/// Trim a required text field. Blank values count as missing.
pub fn require_text(value: Option<&str>) -> Option<String> {
    normalize_optional_text(value)
}

/// Trim an optional text field, collapsing the empty string to `None`.
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Resolve the listing row cap. A caller-supplied value is used as given.
pub fn list_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in ModerationStatus::ALL {
            assert_eq!(status.as_str().parse::<ModerationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "archived".parse::<ModerationStatus>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("pending, approved, rejected"));
    }

    #[test]
    fn test_status_parse_is_case_sensitive() {
        assert!("Approved".parse::<ModerationStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ModerationStatus::Rejected).unwrap();
        assert_eq!(json, "\"rejected\"");
        assert_eq!(json.trim_matches('"'), ModerationStatus::Rejected.to_string());
    }

    #[test]
    fn test_ratings_within_bounds_accepted() {
        for rating in MIN_RATING..=MAX_RATING {
            assert!(validate_rating(rating).is_ok());
        }
    }

    #[test]
    fn test_ratings_outside_bounds_rejected() {
        for rating in [i32::MIN, -1, 0, 6, 10, i32::MAX] {
            let err = validate_rating(rating).unwrap_err();
            assert_eq!(err.to_string(), format!("Validation failed: {MSG_RATING_RANGE}"));
        }
    }

    #[test]
    fn test_require_text_trims_and_rejects_blank() {
        assert_eq!(require_text(Some("  SKU-42 ")), Some("SKU-42".to_string()));
        assert_eq!(require_text(Some("   ")), None);
        assert_eq!(require_text(Some("")), None);
        assert_eq!(require_text(None), None);
    }

    #[test]
    fn test_optional_text_empty_becomes_none() {
        assert_eq!(normalize_optional_text(Some("")), None);
        assert_eq!(
            normalize_optional_text(Some(" Acme Store ")),
            Some("Acme Store".to_string())
        );
    }

    #[test]
    fn test_list_limit_defaults_and_passes_through() {
        assert_eq!(list_limit(None), DEFAULT_LIST_LIMIT);
        assert_eq!(list_limit(Some(10)), 10);
        assert_eq!(list_limit(Some(0)), 0);
        assert_eq!(list_limit(Some(10_000)), 10_000);
        assert_eq!(list_limit(Some(-5)), -5);
    }
}
