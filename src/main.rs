use anyhow::Result;
use std::sync::Arc;

use planora_backend::services::RedisCache;
use planora_backend::store::PgProfileStore;
use planora_backend::{app, config, db, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting planora backend"
    );

    // Create database pool and apply migrations
    let pool = db::create_pool(&settings).await?;
    db::run_migrations(&pool).await?;

    // Create Redis cache when configured
    let cache = match settings.redis_url.as_deref() {
        Some(url) => match RedisCache::new(url, settings.redis_cache_ttl_seconds).await {
            Ok(cache) => Some(cache),
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable - profile cache disabled");
                None
            }
        },
        None => {
            tracing::info!("REDIS_URL not set - profile cache disabled");
            None
        }
    };

    // Create application state
    let store = Arc::new(PgProfileStore::new(pool));
    let state = app::AppState::new(store, settings.clone(), cache);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
