use membership_server::{AppState, Config, api};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenv::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "membership_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting membership-server (env: {})", config.environment);

    // Connect, migrate, seed districts and bootstrap admin
    let state = AppState::new(&config)
        .await
        .map_err(|e| anyhow::anyhow!("startup failed: {e}"))?;

    let app = api::build_app(state.clone(), &config.cors_origins);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("membership-server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    state.shutdown().await;

    Ok(())
}
