use anyhow::Context;
use axum::{
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use secrets::Secrets;
use static_toml::static_toml;
use std::any::Any;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::services::ServeDir;

static_toml! { static CONFIG = include_toml!("Config.toml"); }

mod ncco;
mod secrets;
mod voice;
mod webcall;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment and logger
    dotenv::dotenv().ok();
    logger(env_logger::Env::default()).init();

    // Load the secrets
    let secrets = Secrets::from_env();
    secrets.warn_missing();

    // Initialize the TCP listener
    log::info!(
        "Connecting to the server at {}",
        CONFIG.settings.local_address
    );
    let tcp = TcpListener::bind(CONFIG.settings.local_address)
        .await
        .with_context(|| format!("Failed to bind {}", CONFIG.settings.local_address))?;

    // Initialize the webserver routes
    log::info!("Initializing the webserver routes");
    let router = app(secrets);

    // Start the webserver
    log::info!("Starting the webserver");
    axum::serve(tcp, router.into_make_service())
        .await
        .context("Failed to start the server")?;

    Ok(())
}

/// Webhook payloads log at info, so that is the floor when `RUST_LOG` is unset.
fn logger(env: env_logger::Env) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("info"))
}

fn app(secrets: Secrets) -> Router {
    // Anything that is not an API route comes from the widget build
    let assets = ServeDir::new(CONFIG.settings.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found_handler.into_service());

    let router = Router::new()
        .route("/health_check", get(health_check))
        .merge(webcall::router())
        .merge(voice::router())
        .fallback_service(assets);

    with_layers(router, secrets)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
        .allow_credentials(false)
}

/// CORS sits outermost so that panic responses still carry its headers.
fn with_layers(router: Router, secrets: Secrets) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_handler))
        .layer(cors_layer())
        .layer(Extension(secrets))
}

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn not_found_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
}

fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    log::error!("Handler panicked: {details}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal Server Error" })),
    )
        .into_response()
}
