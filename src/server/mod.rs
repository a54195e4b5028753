pub mod handlers;
pub mod types;

pub use handlers::AppState;

use crate::{Result, config::Config};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Upper bound on request bodies; images arrive inline as base64.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Routes for every endpoint, bound to `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(handlers::generate))
        .route("/analyze_image", post(handlers::analyze_image))
        .route("/convert_to_svg", post(handlers::convert_to_svg))
        .route("/refine_svg", post(handlers::refine_svg))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

pub async fn run(config: Config) -> Result<()> {
    let app_state = AppState::from_config(config.llm.clone())?;
    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
