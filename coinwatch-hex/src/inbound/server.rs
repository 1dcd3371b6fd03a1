//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use coinwatch_types::{CurrencyStore, PriceSource, PriceStore};

use super::handlers::{self, AppState};
use crate::CurrencyService;
use crate::openapi::ApiDoc;

/// HTTP Server for the Coinwatch API.
pub struct HttpServer<C: CurrencyStore, P: PriceStore, X: PriceSource> {
    state: Arc<AppState<C, P, X>>,
}

impl<C: CurrencyStore, P: PriceStore, X: PriceSource> HttpServer<C, P, X> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: CurrencyService<C, P, X>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/currencies", post(handlers::add_currency::<C, P, X>))
            .route("/api/currencies", get(handlers::list_currencies::<C, P, X>))
            .route(
                "/api/currencies/{symbol}",
                delete(handlers::remove_currency::<C, P, X>),
            )
            .route(
                "/api/currencies/{symbol}/price",
                get(handlers::get_price::<C, P, X>),
            )
            .route(
                "/api/currencies/{symbol}/history",
                get(handlers::get_history::<C, P, X>),
            )
            .route("/api-docs/openapi.json", get(openapi_spec))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Serves the generated OpenAPI document.
async fn openapi_spec() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
