use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_relay::{config::RelayConfig, cors::build_cors, routes, state::AppState, MAX_BODY_BYTES};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RelayConfig::from_env().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    tracing::debug!(?config, "Loaded configuration");

    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();
    tracing::info!("Allowed origins: {:?}", allowed_origins);

    let state = AppState::new(config).map_err(|e| {
        tracing::error!("Failed to create HTTP client: {}", e);
        std::io::Error::other(e)
    })?;
    let state_data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .wrap(Logger::default())
            .wrap(build_cors(&allowed_origins))
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", port))?;

    tracing::info!("Backend server running on port {}", port);

    server.run().await
}
