use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use doc_relay::{config::Config, llm::GeminiClient, utils::init_logger, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    tokio::fs::create_dir_all(&config.uploads.dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create upload dir {}: {}", config.uploads.dir.display(), e))?;

    let completion = Arc::new(GeminiClient::new(config.gemini.clone()));
    info!(model = %config.gemini.model, "Completion client ready");

    let state = AppState::new(config.clone(), completion);
    let app = doc_relay::create_router(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
