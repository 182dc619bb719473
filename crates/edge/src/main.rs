//! Storefront edge entry point

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_edge::{routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_edge=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        bind_address = %config.bind_address,
        backend = %config.medusa_backend_url,
        storefront = %config.storefront_url,
        default_region = %config.default_region,
        region_cache_ttl_secs = config.region_cache_ttl_secs,
        "Configuration loaded"
    );

    let state = AppState::new(config.clone())?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "storefront-edge listening");

    axum::serve(listener, app).await?;
    Ok(())
}
