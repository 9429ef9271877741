use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    admin::dto::{AdminSwapRequestView, BanRequest, BroadcastRequest, Report},
    admin::repo,
    auth::{AdminUser, AuthUser},
    error::ApiError,
    profile::dto::UserProfile,
    state::AppState,
    store::AdminMessage,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id/ban", put(set_ban))
        .route("/admin/swap-requests", get(list_swap_requests))
        .route("/admin/message", post(broadcast))
        .route("/admin/reports", get(reports))
        // readable by any authenticated user, not just admins
        .route("/admin-messages", get(list_messages))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_claims): AdminUser,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let users = state
        .store
        .read(|db| db.users.iter().map(UserProfile::from).collect::<Vec<_>>())
        .await;
    Ok(Json(users))
}

#[instrument(skip(state, payload))]
pub async fn set_ban(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BanRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .store
        .update(move |db| repo::set_banned(db, id, payload.banned))
        .await?;

    info!(admin = %claims.sub, user_id = %id, banned = payload.banned, "ban flag updated");
    let verb = if payload.banned { "banned" } else { "unbanned" };
    Ok(Json(json!({ "message": format!("User {} successfully", verb) })))
}

#[instrument(skip(state))]
pub async fn list_swap_requests(
    State(state): State<AppState>,
    AdminUser(_claims): AdminUser,
) -> Result<Json<Vec<AdminSwapRequestView>>, ApiError> {
    let requests = state.store.read(repo::list_swap_requests).await;
    Ok(Json(requests))
}

#[instrument(skip(state, payload))]
pub async fn broadcast(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Json(payload): Json<BroadcastRequest>,
) -> Result<(StatusCode, Json<AdminMessage>), ApiError> {
    let message = state
        .store
        .update(move |db| {
            let message = AdminMessage {
                id: Uuid::new_v4(),
                title: payload.title,
                message: payload.message,
                from_admin: claims.sub,
                created_at: OffsetDateTime::now_utc(),
            };
            db.admin_messages.push(message.clone());
            Ok(message)
        })
        .await?;

    info!(admin = %claims.sub, message_id = %message.id, "broadcast sent");
    Ok((StatusCode::CREATED, Json(message)))
}

#[instrument(skip(state))]
pub async fn reports(
    State(state): State<AppState>,
    AdminUser(_claims): AdminUser,
) -> Result<Json<Report>, ApiError> {
    let report = state.store.read(repo::report).await;
    Ok(Json(report))
}

#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
) -> Result<Json<Vec<AdminMessage>>, ApiError> {
    let messages = state.store.read(|db| db.admin_messages.clone()).await;
    Ok(Json(messages))
}
