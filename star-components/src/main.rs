//! Star Components Main Entry Point
//!
//! Reads an edge list, computes its connected components and writes one
//! `vertex representative` record per vertex.

use std::env;
use std::process;

use dotenv::dotenv;
use star_components::config::{CliArgs, USAGE};
use star_components::{Dependencies, RunError};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), RunError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("star_components=info,star_components_substrate=info"));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
            .map_err(|e| RunError::config(format!("Failed to initialize tracing: {}", e)))?;

        info!(
            service_name = "star-components",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
            .map_err(|e| RunError::config(format!("Failed to initialize tracing: {}", e)))?;

        info!(
            service_name = "star-components",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), RunError> {
    let Some(args) = CliArgs::parse(env::args().skip(1)) else {
        eprintln!("{USAGE}");
        process::exit(1);
    };

    // Load environment variables from .env file
    dotenv().ok();

    // Initialize tracing
    init_tracing()?;

    info!("Starting star components");

    let mut deps = match Dependencies::new() {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let shutdown = deps.orchestrator.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received shutdown signal");
            let _ = shutdown.send(());
        }
    });

    match deps.orchestrator.run(&args.input, &args.output).await {
        Ok(report) => {
            info!(
                outer_iterations = report.outer_iterations,
                final_pairs = report.final_pairs,
                "Star components completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Star components failed");
            Err(e)
        }
    }
}
