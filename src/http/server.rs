//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all product handlers
//! - Wire up middleware (request ID, tracing, metrics, timeout, body limit)
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::http::routes;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::store::ProductStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductStore>,
}

/// HTTP server for the product store.
pub struct HttpServer {
    router: Router,
    store: Arc<ProductStore>,
}

impl HttpServer {
    /// Create a server with a fresh store built from `config.store`.
    pub fn new(config: ServiceConfig) -> Self {
        let store = if config.store.seed {
            ProductStore::seeded()
        } else {
            ProductStore::empty()
        };
        Self::with_store(config, Arc::new(store))
    }

    /// Create a server around an existing store.
    pub fn with_store(config: ServiceConfig, store: Arc<ProductStore>) -> Self {
        let state = AppState {
            store: Arc::clone(&store),
        };
        let router = build_router(&config, state);
        Self { router, store }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            products = self.store.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a handle to the backing store.
    pub fn store(&self) -> Arc<ProductStore> {
        Arc::clone(&self.store)
    }

    /// Consume the server, returning the router (for in-process testing).
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Build the Axum router with all middleware layers.
///
/// Layers added later wrap earlier ones, so the request ID is assigned before
/// the trace span opens and the body limit is checked innermost.
#[allow(deprecated)]
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    Router::new()
        .route(routes::LANDING, get(handlers::landing_page))
        .route(
            routes::PRODUCTS,
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            routes::PRODUCT,
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )))
        .layer(middleware::from_fn(metrics::track_metrics))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(set_request_id_layer())
}
