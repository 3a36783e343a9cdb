use dotenvy::dotenv;
use mustang_functions::config::Config;
use mustang_functions::{router, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let app = router(AppState::new(&config)?);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("relay listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
