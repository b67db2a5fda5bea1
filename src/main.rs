use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rssagg::config::Config;
use rssagg::routes::{self, AppState};
use rssagg::store::InMemoryFeedStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rssagg=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load_or_default("rssagg.toml")?;

    // Seed the store
    let store = InMemoryFeedStore::with_feeds(config.seed_feeds());
    info!("Seeded store with {} feeds", store.len());

    let state = Arc::new(AppState {
        store: Arc::new(store),
    });
    let app = routes::router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Server starting on http://{}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
