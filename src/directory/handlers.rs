use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::AuthUser,
    directory::dto::{SearchParams, SkillFilter},
    directory::repo,
    error::ApiError,
    profile::dto::UserProfile,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/search", get(search))
}

#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let filter = SkillFilter::parse(params.filter.as_deref());
    let users = state
        .store
        .read(|db| {
            repo::search(db, claims.sub, params.skill.as_deref(), filter)
                .into_iter()
                .map(UserProfile::from)
                .collect::<Vec<_>>()
        })
        .await;
    Ok(Json(users))
}
