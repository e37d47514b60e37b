//! Daily report collector CLI.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use report_collector::modules::{self, PgReportStore, ReportOptions};
use report_collector::CollectorConfig;
use report_core::{init_logging, today_kst, FetchLog, LogConfig};
use report_data::{MarketDataProvider, QuoteProvider};

#[derive(Parser)]
#[command(name = "report-collector")]
#[command(about = "Daily US/KR portfolio report collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 오늘(KST) 리포트 생성 및 저장
    Run {
        /// 요약 레코드에 전체 수집 로그 포함
        #[arg(long)]
        debug: bool,
    },

    /// 단일 종목 조회 (저장하지 않음)
    Test {
        /// 티커 (6자리 숫자는 국내 종목)
        #[arg(long)]
        ticker: String,
    },

    /// 데몬 모드: 주기적으로 리포트 실행
    Daemon,

    /// 스키마 마이그레이션 실행
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    init_logging(LogConfig::from_env(&cli.log_level))?;

    tracing::info!("Daily Report Collector 시작");

    let config = CollectorConfig::from_env()?;
    let provider: Arc<dyn QuoteProvider> = Arc::new(MarketDataProvider::from_settings(
        config.fetch.provider_settings(),
    )?);

    match cli.command {
        Commands::Test { ticker } => {
            let log = FetchLog::new();
            let quote = modules::run_single_ticker(provider.as_ref(), &ticker, &log).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "mode": "test",
                    "ticker": ticker,
                    "result": quote,
                    "logs": log.entries(),
                }))?
            );
        }
        Commands::Run { debug } => {
            let store = PgReportStore::connect(config.require_database_url()?).await?;
            let log = FetchLog::new();
            let options = ReportOptions {
                report_date: today_kst(),
                debug,
            };

            let report = modules::run_daily_report(&store, provider, options, &log).await?;
            report.stats.log_summary("일일 리포트");
            println!("{}", serde_json::to_string_pretty(&report.summary)?);

            store.close().await;
        }
        Commands::Daemon => {
            let store = PgReportStore::connect(config.require_database_url()?).await?;
            tracing::info!(
                "=== 데몬 모드 시작 (주기: {}분) ===",
                config.daemon.interval_minutes
            );

            let mut interval = tokio::time::interval(config.daemon.interval());
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("종료 신호 수신, 데몬 종료 중...");
                        break;
                    }
                    _ = interval.tick() => {
                        let log = FetchLog::new();
                        let options = ReportOptions {
                            report_date: today_kst(),
                            debug: false,
                        };

                        match modules::run_daily_report(&store, Arc::clone(&provider), options, &log).await {
                            Ok(report) => report.stats.log_summary("일일 리포트"),
                            Err(e) => tracing::error!("일일 리포트 실패: {}", e),
                        }

                        tracing::info!(
                            "=== 리포트 완료, 다음 실행: {}분 후 ===",
                            config.daemon.interval_minutes
                        );
                    }
                }
            }

            store.close().await;
        }
        Commands::Migrate => {
            let store = PgReportStore::connect(config.require_database_url()?).await?;
            store.migrate().await?;
            store.close().await;
        }
    }

    tracing::info!("Daily Report Collector 종료");
    Ok(())
}
