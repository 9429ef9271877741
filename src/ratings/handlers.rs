use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    ratings::dto::{RatingView, SubmitRatingRequest},
    ratings::repo,
    state::AppState,
    store::Rating,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rating", post(submit_rating))
        .route("/ratings/:user_id", get(list_ratings))
}

#[instrument(skip(state, payload))]
pub async fn submit_rating(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<SubmitRatingRequest>,
) -> Result<(StatusCode, Json<Rating>), ApiError> {
    let rating = state
        .store
        .update(move |db| repo::submit(db, claims.sub, payload))
        .await?;

    info!(rating_id = %rating.id, target = %rating.to_user_id, value = rating.rating, "rating submitted");
    Ok((StatusCode::CREATED, Json(rating)))
}

#[instrument(skip(state))]
pub async fn list_ratings(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<RatingView>>, ApiError> {
    let ratings = state.store.read(|db| repo::list_for(db, user_id)).await;
    Ok(Json(ratings))
}
