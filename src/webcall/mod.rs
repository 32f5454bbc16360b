use axum::{routing::get, Router};

pub mod token;

pub fn router() -> Router {
    Router::new().route("/no-auth", get(token::no_auth_handler))
}
