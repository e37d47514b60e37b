//! Daily Report API 서버.
//!
//! 스케줄러(cron 등)가 호출하는 HTTP 진입점입니다.

use std::sync::Arc;

use report_api::{serve, ApiConfig, AppState};
use report_collector::modules::{PgReportStore, ReportStore};
use report_collector::CollectorConfig;
use report_core::{init_logging, LogConfig};
use report_data::{MarketDataProvider, QuoteProvider};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    init_logging(LogConfig::from_env("info").with_directive("tower_http=debug"))?;

    info!("Starting Daily Report API server...");

    let api_config = ApiConfig::from_env()?;
    let config = CollectorConfig::from_env()?;

    let provider: Arc<dyn QuoteProvider> = Arc::new(MarketDataProvider::from_settings(
        config.fetch.provider_settings(),
    )?);

    // 저장소 연결은 첫 요청 시점에 맺어집니다
    let store: Option<Arc<dyn ReportStore>> = match config.database_url.as_deref() {
        Some(url) => {
            info!("Database configured");
            Some(Arc::new(PgReportStore::connect_lazy(url)?))
        }
        None => {
            warn!("DATABASE_URL not set, report runs will fail until it is configured");
            None
        }
    };

    let addr = api_config.socket_addr()?;
    let state = Arc::new(AppState::new(api_config.secret_token, provider, store));

    info!("Daily report endpoint: http://{}/daily-report", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    serve(listener, state, shutdown_signal()).await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
/// 시그널 핸들러 설치에 실패하면 해당 시그널은 무시하고 다른 쪽을 기다립니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
