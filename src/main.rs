//! HTTP server. Configuration comes from the environment (and `.env`).

use site_cms::{app, connect_store, init_tracing, seed, seed_options, AppConfig, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let store = connect_store(&config).await?;
    let state = AppState::new(store, config.rate_limit_max_requests, config.rate_limit_window);
    if config.database_url.is_none() {
        seed::run(&state.repos, &seed_options(&config)).await?;
    }

    let router = app(state, config.body_limit_bytes);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
