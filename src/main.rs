//! Product Store service
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http::server ──▶ http::handlers          │
//!                           │   (request id,        │                    │
//!                           │    trace, metrics,    ▼                    │
//!                           │    timeout, limit)  store::ProductStore    │
//!     Client Response       │                     (Mutex<Vec<Product>>)  │
//!     ◀─────────────────────┼── http::response ◀────┘                    │
//!                           │                                            │
//!                           │  config · observability · lifecycle        │
//!                           └────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use product_store::config::{self, validation::validate_config, ConfigError, ServiceConfig};
use product_store::lifecycle::{self, signals, Shutdown, StartupError};
use product_store::observability::logging;

#[derive(Parser)]
#[command(name = "product-store")]
#[command(about = "In-memory product CRUD service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 127.0.0.1:3000).
    #[arg(short, long)]
    bind: Option<String>,
}

fn load(args: &Args) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

async fn run(args: Args) -> Result<(), StartupError> {
    let config = load(&args)?;
    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        seed = config.store.seed,
        request_timeout_secs = config.timeouts.request_secs,
        "product-store starting"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    lifecycle::start(config, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("product-store: {e}");
            ExitCode::FAILURE
        }
    }
}
