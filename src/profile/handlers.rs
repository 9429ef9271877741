use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    profile::dto::{PhotoUploadResponse, UpdateProfileRequest, UserProfile},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/upload-photo", post(upload_photo))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state
        .store
        .read(|db| db.user_by_id(claims.sub).map(UserProfile::from))
        .await
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state
        .store
        .update(move |db| {
            let user = db
                .user_by_id_mut(claims.sub)
                .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
            if let Some(name) = payload.name {
                user.name = name;
            }
            if let Some(location) = payload.location {
                user.location = location;
            }
            if let Some(offered) = payload.skills_offered {
                user.skills_offered = offered;
            }
            if let Some(wanted) = payload.skills_wanted {
                user.skills_wanted = wanted;
            }
            if let Some(availability) = payload.availability {
                user.availability = availability;
            }
            if let Some(is_public) = payload.is_public {
                user.is_public = is_public;
            }
            user.updated_at = Some(OffsetDateTime::now_utc());
            Ok(UserProfile::from(&*user))
        })
        .await?;

    info!(user_id = %claims.sub, "profile updated");
    Ok(Json(profile))
}

/// Multipart upload, field name `photo`. The file is stored under a
/// UUID-prefixed name and served statically from `/uploads`.
#[instrument(skip(state, multipart))]
pub async fn upload_photo(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<PhotoUploadResponse>, ApiError> {
    let mut file: Option<(String, bytes::Bytes)> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("photo") {
            let original = field.file_name().unwrap_or("photo").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            file = Some((original, data));
            break;
        }
    }

    let Some((original, data)) = file else {
        warn!(user_id = %claims.sub, "upload without photo field");
        return Err(ApiError::BadRequest("No file uploaded".into()));
    };

    let filename = format!("{}-{}", Uuid::new_v4(), sanitize_filename(&original));
    state.storage.put_object(&filename, data).await?;

    let stored = filename.clone();
    state
        .store
        .update(move |db| {
            let user = db
                .user_by_id_mut(claims.sub)
                .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
            user.profile_photo = Some(stored);
            user.updated_at = Some(OffsetDateTime::now_utc());
            Ok(())
        })
        .await?;

    info!(user_id = %claims.sub, file = %filename, "profile photo uploaded");
    Ok(Json(PhotoUploadResponse {
        photo_url: state.storage.public_url(&filename),
    }))
}

/// Keep only characters that are safe in a path segment.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if cleaned.is_empty() {
        "photo".into()
    } else {
        cleaned
    }
}
