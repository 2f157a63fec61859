//! Entry point for the payroll engine binary.
//!
//! Starts the HTTP server. Settings come from the environment:
//! `PAYROLL_DATA_DIR`, `PAYROLL_BIND_ADDR`, `PAYROLL_API_TOKEN` and
//! `PAYROLL_TIMEZONE`. Log levels follow `RUST_LOG` (default `info`).

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, ServiceSettings};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "Server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = ServiceSettings::from_env()?;

    let loader = ConfigLoader::load(&settings.data_dir)?;
    info!(
        data_dir = %settings.data_dir.display(),
        employees = loader.dataset().employees().len(),
        shifts = loader.dataset().shifts().len(),
        "Dataset loaded"
    );

    let router = create_router(AppState::from_config(loader, &settings));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    info!(addr = %settings.bind_addr, timezone = %settings.timezone, "Server listening");
    axum::serve(listener, router).await?;

    Ok(())
}
