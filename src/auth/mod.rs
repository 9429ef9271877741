use crate::state::AppState;
use axum::Router;

pub mod claims;
pub mod dto;
pub mod handlers;
pub mod services;

pub use services::{AdminUser, AuthUser};

pub fn router() -> Router<AppState> {
    handlers::routes()
}
