use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        services::{hash_password, is_valid_email, verify_password, JwtKeys},
    },
    error::ApiError,
    profile::dto::UserProfile,
    state::AppState,
    store::User,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    let hash = hash_password(&payload.password)?;
    let email = payload.email.clone();
    let name = payload.name.clone();
    let location = payload.location.clone().unwrap_or_default();

    // Duplicate check and insert run under the same write lock, so two
    // concurrent registrations cannot both claim an email.
    let user = state
        .store
        .update(move |db| {
            if db.user_by_email(&email).is_some() {
                warn!(email = %email, "email already registered");
                return Err(ApiError::Conflict("User already exists".into()));
            }
            let user = User::new(Uuid::new_v4(), email, hash, name, location);
            db.users.push(user.clone());
            Ok(user)
        })
        .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserProfile::from(&user),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let user = state
        .store
        .read(|db| db.user_by_email(&payload.email).cloned())
        .await
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::Unauthorized("Invalid credentials".into())
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    if state.config.policy.enforce_ban && user.banned {
        warn!(user_id = %user.id, "banned user refused at login");
        return Err(ApiError::Forbidden("Account is banned".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(&user),
    }))
}
