use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct InsertReviewModel {
    pub order_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListReviewsFilter {
    pub reviewee_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Outcome of the review eligibility gate.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CanReview {
    pub can_review: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CanReview {
    pub fn yes() -> Self {
        Self {
            can_review: true,
            reason: None,
        }
    }

    pub fn no(reason: &str) -> Self {
        Self {
            can_review: false,
            reason: Some(reason.to_string()),
        }
    }
}
