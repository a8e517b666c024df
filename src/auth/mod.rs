use crate::state::AppState;
use axum::Router;

mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod password;

pub fn router(upload_limit: usize) -> Router<AppState> {
    Router::new().merge(handlers::auth_routes(upload_limit))
}
