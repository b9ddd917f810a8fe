use std::sync::Arc;

use backend::routes::build_router;
use backend::shared::config;
use backend::state::AppState;
use backend::system;
use backend::system::users::repository::InMemoryUserStore;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::load_config()?;
    tracing::info!("Configuration: {:?}", config);

    let addr = config.bind_addr()?;

    let users = InMemoryUserStore::seeded();
    tracing::info!("User store ready with {} users", users.len());

    // Missing signing key / issuer / audience stops startup here
    let state = AppState::new(config, Arc::new(users)).map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;

    let app = build_router(state);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
