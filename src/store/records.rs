use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record as persisted in the data document.
///
/// The Argon2 hash lives under the `password` key on disk; API projections
/// are built from [`crate::profile::dto::UserProfile`] and never carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub name: String,
    pub location: String,
    pub profile_photo: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: Vec<String>,
    pub is_public: bool,
    pub is_admin: bool,
    #[serde(default)]
    pub banned: bool,
    /// Mean of all ratings targeting this user; derived, recomputed on write.
    pub rating: f64,
    pub total_ratings: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl User {
    pub fn new(id: Uuid, email: String, password_hash: String, name: String, location: String) -> Self {
        Self {
            id,
            email,
            password_hash,
            name,
            location,
            profile_photo: None,
            skills_offered: Vec::new(),
            skills_wanted: Vec::new(),
            availability: Vec::new(),
            is_public: true,
            is_admin: false,
            banned: false,
            rating: 0.0,
            total_ratings: 0,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        }
    }
}

/// Lifecycle state of a swap request. `Pending` is initial; `Accepted` and
/// `Rejected` are terminal for status purposes, the record itself persists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub offered_skill: String,
    pub requested_skill: String,
    pub message: Option<String>,
    pub status: SwapStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Immutable once created; contributes to the target user's derived average.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub rating: u8,
    pub feedback: Option<String>,
    /// Logical link only; not validated against the swap collection.
    pub swap_request_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMessage {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub from_admin: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The whole persisted document: four record collections, joined by id at
/// read time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub users: Vec<User>,
    pub swap_requests: Vec<SwapRequest>,
    pub ratings: Vec<Rating>,
    pub admin_messages: Vec<AdminMessage>,
}

impl Database {
    pub fn user_by_id(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_id_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn swap_request_by_id(&self, id: Uuid) -> Option<&SwapRequest> {
        self.swap_requests.iter().find(|sr| sr.id == id)
    }
}
