use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{SwapRequest, User};

#[derive(Debug, Deserialize)]
pub struct BanRequest {
    pub banned: bool,
}

#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    pub title: String,
    pub message: String,
}

/// Counterpart projection for moderation views; unlike the user-facing
/// summary this one includes the email.
#[derive(Debug, Clone, Serialize)]
pub struct ModerationSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for ModerationSummary {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSwapRequestView {
    #[serde(flatten)]
    pub request: SwapRequest,
    pub from_user: Option<ModerationSummary>,
    pub to_user: Option<ModerationSummary>,
}

/// Aggregate counts over the whole dataset, recomputed per request.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_users: usize,
    pub total_swap_requests: usize,
    pub pending_requests: usize,
    pub accepted_requests: usize,
    pub rejected_requests: usize,
    pub total_ratings: usize,
    pub average_rating: f64,
}
