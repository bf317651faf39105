//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind the listener (fatal on failure)
//! - Start the metrics exporter when enabled
//! - Log the bound address and the route table
//! - Serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and never retried
//! - The listener is bound before anything is logged as ready

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, ServiceConfig};
use crate::http::routes::print_route_table;
use crate::http::HttpServer;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;

/// Errors that abort process startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind the configured listener address.
pub async fn bind(address: &str) -> Result<TcpListener, StartupError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.to_string(),
            source,
        })
}

/// Bring the service up and serve until `shutdown` fires.
pub async fn start(config: ServiceConfig, shutdown: ShutdownSignal) -> Result<(), StartupError> {
    let listener = bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr().map_err(StartupError::Serve)?;

    if config.observability.metrics_enabled {
        // Validation already guaranteed the address parses.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr)?;
        }
    }

    print_route_table(&local_addr);

    HttpServer::new(config)
        .run(listener, shutdown)
        .await
        .map_err(StartupError::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_conflict_is_fatal_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = taken.local_addr().unwrap().to_string();

        let err = bind(&address).await.unwrap_err();
        assert!(matches!(err, StartupError::Bind { .. }));
        assert!(err.to_string().starts_with(&format!("failed to bind {address}")));
    }
}
