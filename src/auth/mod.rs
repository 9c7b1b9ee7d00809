use crate::state::AppState;
use axum::Router;

mod dto;
mod error;
pub mod handlers;
pub mod password;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::signup_routes())
        .merge(handlers::login_routes())
}
