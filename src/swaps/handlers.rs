use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    state::AppState,
    store::SwapRequest,
    swaps::dto::{CreateSwapRequest, SwapRequestView, UpdateSwapRequest},
    swaps::repo,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/swap-request", post(create_request))
        .route("/swap-requests", get(list_requests))
        .route(
            "/swap-request/:id",
            put(update_request).delete(delete_request),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_request(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateSwapRequest>,
) -> Result<(StatusCode, Json<SwapRequest>), ApiError> {
    let request = state
        .store
        .update(move |db| repo::create(db, claims.sub, payload))
        .await?;

    info!(request_id = %request.id, from = %request.from_user_id, to = %request.to_user_id, "swap request created");
    Ok((StatusCode::CREATED, Json(request)))
}

#[instrument(skip(state))]
pub async fn list_requests(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<SwapRequestView>>, ApiError> {
    let requests = state.store.read(|db| repo::list_for(db, claims.sub)).await;
    Ok(Json(requests))
}

#[instrument(skip(state, payload))]
pub async fn update_request(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSwapRequest>,
) -> Result<Json<SwapRequest>, ApiError> {
    let recipient_only = state.config.policy.swap_recipient_only;
    let request = state
        .store
        .update(move |db| repo::set_status(db, id, payload.status, claims.sub, recipient_only))
        .await?;

    info!(request_id = %id, status = ?request.status, "swap request updated");
    Ok(Json(request))
}

#[instrument(skip(state))]
pub async fn delete_request(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state
        .store
        .update(move |db| repo::delete(db, id, claims.sub))
        .await?;

    info!(request_id = %id, "swap request deleted");
    Ok(Json(json!({ "message": "Swap request deleted successfully" })))
}
