use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coop_backend::{config::Config, create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state);

    info!("Starting server on {}", config.listen);
    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("Listening on {}", config.listen);

    axum::serve(listener, app).await?;

    Ok(())
}
