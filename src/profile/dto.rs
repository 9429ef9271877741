use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::User;

/// Public projection of a user record; the password hash never appears here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub location: String,
    pub profile_photo: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: Vec<String>,
    pub is_public: bool,
    pub is_admin: bool,
    pub banned: bool,
    pub rating: f64,
    pub total_ratings: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<&User> for UserProfile {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            name: u.name.clone(),
            location: u.location.clone(),
            profile_photo: u.profile_photo.clone(),
            skills_offered: u.skills_offered.clone(),
            skills_wanted: u.skills_wanted.clone(),
            availability: u.availability.clone(),
            is_public: u.is_public,
            is_admin: u.is_admin,
            banned: u.banned,
            rating: u.rating,
            total_ratings: u.total_ratings,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Merge-update of the caller's own profile; absent fields keep their value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub skills_offered: Option<Vec<String>>,
    pub skills_wanted: Option<Vec<String>>,
    pub availability: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadResponse {
    pub photo_url: String,
}
