//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the media type guard and the encoder registry from config
//! - Create Axum Router with all handlers
//! - Wire up middleware (negotiation, timeout, request ID, tracing)
//! - Serve until the shutdown signal fires

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::encoding::EncoderService;
use crate::http::handlers;
use crate::http::middleware::negotiation_middleware;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::negotiation::MediaTypeGuard;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<MediaTypeGuard>,
    pub encoders: Arc<EncoderService>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let guard = Arc::new(MediaTypeGuard::new(
            config.negotiation.media_type.clone(),
            config.negotiation.accept_policy,
        ));
        let encoders = Arc::new(EncoderService::new(config.encoding.clone()));

        tracing::info!(
            media_type = %guard.content_type(),
            accept_policy = %guard.accept_header_policy(),
            schemas = encoders.schemas().len(),
            "Negotiation configured"
        );

        let state = AppState { guard, encoders };
        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/status", get(handlers::get_status))
            .fallback(handlers::not_found)
            .layer(middleware::from_fn_with_state(
                Arc::clone(&state.guard),
                negotiation_middleware,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, e.g. for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
