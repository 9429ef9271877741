use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Rating, User};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingRequest {
    pub target_user_id: Uuid,
    pub rating: u8,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub swap_request_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RaterSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&User> for RaterSummary {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
        }
    }
}

/// A rating enriched with the rater's identity, `None` when the rater record
/// no longer exists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    #[serde(flatten)]
    pub rating: Rating,
    pub from_user: Option<RaterSummary>,
}
