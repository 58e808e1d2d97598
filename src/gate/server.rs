//! Gateway HTTP server

use crate::config::AppConfig;
use crate::gate::handlers::{self, AppState};
use axum::{
    extract::Request,
    middleware::{self, Next},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Build the application router.
///
/// `/api/ai` accepts POST only; the router answers other methods with 405.
/// `/api/data` dispatches CRUD on the HTTP method, collection selected by
/// the `type` query parameter.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/ai", post(handlers::inference))
        .route(
            "/api/data",
            get(handlers::data_list)
                .post(handlers::data_create)
                .patch(handlers::data_update)
                .delete(handlers::data_delete),
        )
        .route("/health", get(health_check))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
}

/// Start the gateway server
pub async fn start_server(config: AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState::new(config);
    let router = app(state);

    info!("Starting gateway on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Health check handler
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Request logging middleware
async fn logging_middleware(req: Request, next: Next) -> axum::response::Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().to_string();

    let response = next.run(req).await;

    info!(
        %method,
        uri,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request"
    );

    response
}
