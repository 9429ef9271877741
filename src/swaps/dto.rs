use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{SwapRequest, SwapStatus, User};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwapRequest {
    pub target_user_id: Uuid,
    pub offered_skill: String,
    pub requested_skill: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSwapRequest {
    pub status: SwapStatus,
}

/// Lightweight counterpart projection attached to each listed request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub profile_photo: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            profile_photo: u.profile_photo.clone(),
        }
    }
}

/// A swap request enriched with both counterpart summaries. Summaries are
/// `None` when the referenced user no longer exists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequestView {
    #[serde(flatten)]
    pub request: SwapRequest,
    pub from_user: Option<UserSummary>,
    pub to_user: Option<UserSummary>,
}
