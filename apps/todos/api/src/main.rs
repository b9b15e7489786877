use axum_helpers::server::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use todos_api::{build_router, config::Config, connect_store};
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let store = connect_store(&config.store)
        .await
        .map_err(|e| eyre::eyre!("Backing store connection failed: {}", e))?;

    info!(
        store = %config.store.kind(),
        key = %config.storage_key,
        consistency = %config.consistency,
        "Backing store ready"
    );

    let router = build_router(&config, store);

    create_app(router, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Todos API shutdown complete");
    Ok(())
}
