use crate::db::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::patient_router())
        .merge(handlers::inbox_router())
}
