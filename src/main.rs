use anyhow::Context;
use bls_puller::utils::{logger, validation::Validate};
use bls_puller::{create_router, AppState, BlsClient, CliConfig};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let settings = match cli.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Settings: {:?}", settings);

    let client = BlsClient::new(&settings).context("failed to build HTTP client")?;
    tracing::debug!(
        "Using API endpoint {} (timeout {}s)",
        client.endpoint(),
        settings.timeout_seconds
    );

    let state = AppState::new(Arc::new(client), settings.registration_key.as_str());
    let app = create_router(state);

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Serving on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
