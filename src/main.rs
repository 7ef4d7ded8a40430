use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use marketfeed::{
    config::Config,
    api::routes::create_router,
    social,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("marketfeed=info".parse()?))
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;
    info!("Starting server on {}", server_addr);

    // Create application state
    let social_source = social::from_config(&config);
    let app_state = AppState {
        config: Arc::new(config),
        social: social_source,
    };

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
