// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use newspos::config::settings::Settings;
use newspos::infrastructure::metrics;
use newspos::presentation::handlers::analyze_handler::AnalysisState;
use newspos::presentation::routes;
use newspos::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting newspos...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Initialize Prometheus Metrics
    metrics::init_metrics(&settings.metrics)?;

    // 4. Initialize pipeline components
    let state = Arc::new(AnalysisState::from_settings(&settings)?);
    info!(
        tagset = settings.analysis.tagset.as_str(),
        timeout_secs = settings.fetch.timeout_secs,
        block_private_hosts = settings.fetch.block_private_hosts,
        "Analysis pipeline ready"
    );

    // 5. Start HTTP server
    let app = routes::routes(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
