use axum::{
    routing::{get, post},
    Router,
};

pub mod answer;
pub mod event;

/// Webhooks the voice platform calls for the application.
pub fn router() -> Router {
    Router::new()
        .route("/answer", get(answer::answer_handler))
        .route("/event", post(event::event_handler))
}
