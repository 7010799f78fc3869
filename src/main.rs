use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portal_server::backend::supabase::SupabaseBackend;
use portal_server::config::Config;
use portal_server::routes::create_routes;
use portal_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logger();

    let config = Config::from_env().context("Failed to load configuration")?;

    let backend = SupabaseBackend::new(&config.backend_url, &config.backend_anon_key)
        .context("Failed to build backend client")?;
    tracing::info!(backend = %config.backend_url, "Backend client configured");

    let state = AppState::new(Arc::new(backend), config.portal_settings());
    let app = create_routes(state, config.production);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .context("Failed to bind address")?;
    tracing::info!("🚀 Portal running at http://{}", config.bind_addr);

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
