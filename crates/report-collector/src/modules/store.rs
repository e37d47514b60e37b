//! 리포트 저장소.
//!
//! 관심종목(`portfolio_stocks`)을 읽고, 날짜별 스냅샷(`daily_snapshots`)과
//! 요약(`daily_summary`)을 저장합니다. 저장은 테이블마다
//! "해당 날짜 행 삭제 → 새 행 삽입"으로 수행되어 같은 날짜를 다시 실행해도
//! 행이 누적되지 않습니다.

use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use report_core::{Market, SnapshotRow, SummaryRow, WatchEntry};

use crate::error::CollectorError;
use crate::Result;

/// 리포트 저장소 트레이트.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// 관심종목 목록을 읽습니다.
    async fn load_watchlist(&self) -> Result<Vec<WatchEntry>>;

    /// 해당 날짜의 스냅샷을 교체합니다. 삽입된 행 수를 반환합니다.
    async fn replace_snapshots(&self, report_date: NaiveDate, rows: &[SnapshotRow])
        -> Result<usize>;

    /// 해당 날짜의 요약을 교체합니다.
    async fn replace_summary(&self, summary: &SummaryRow) -> Result<()>;
}

/// `portfolio_stocks` 레코드.
#[derive(Debug, FromRow)]
struct PortfolioStockRow {
    ticker: String,
    market: String,
    company_name: Option<String>,
    sector: Option<String>,
    stock_code: Option<String>,
}

impl TryFrom<PortfolioStockRow> for WatchEntry {
    type Error = CollectorError;

    fn try_from(row: PortfolioStockRow) -> Result<Self> {
        let market = Market::from_str(&row.market).map_err(|_| {
            CollectorError::Store(format!(
                "portfolio_stocks.market 값이 잘못되었습니다: {} ({})",
                row.ticker, row.market
            ))
        })?;

        let mut entry = WatchEntry::new(
            row.ticker,
            market,
            row.company_name.unwrap_or_default(),
            row.sector.unwrap_or_default(),
        );
        entry.stock_code = row.stock_code.filter(|code| !code.trim().is_empty());
        Ok(entry)
    }
}

/// PostgreSQL 저장소.
#[derive(Debug, Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    /// 데이터베이스에 연결합니다.
    pub async fn connect(database_url: &str) -> Result<Self> {
        tracing::info!("데이터베이스 연결 중...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        tracing::info!("데이터베이스 연결 성공");
        Ok(Self { pool })
    }

    /// 첫 쿼리 시점에 연결하는 저장소를 생성합니다 (URL 형식만 검사).
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// 스키마 마이그레이션을 실행합니다.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("마이그레이션 실행 중...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| CollectorError::Store(e.to_string()))?;
        tracing::info!("마이그레이션 완료");
        Ok(())
    }

    /// 연결 풀을 닫습니다.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn load_watchlist(&self) -> Result<Vec<WatchEntry>> {
        let rows: Vec<PortfolioStockRow> = sqlx::query_as(
            r#"
            SELECT ticker, market, company_name, sector, stock_code
            FROM portfolio_stocks
            ORDER BY market DESC, ticker
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(WatchEntry::try_from).collect()
    }

    async fn replace_snapshots(
        &self,
        report_date: NaiveDate,
        rows: &[SnapshotRow],
    ) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM daily_snapshots WHERE report_date = $1")
            .bind(report_date)
            .execute(&mut *tx)
            .await?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO daily_snapshots (
                    ticker, report_date, current_price, prev_close,
                    price_change, price_change_pct, week52_high, week52_low,
                    volume, signal, signal_reason, news_1, news_2
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                "#,
            )
            .bind(&row.ticker)
            .bind(row.report_date)
            .bind(row.current_price)
            .bind(row.prev_close)
            .bind(row.price_change)
            .bind(row.price_change_pct)
            .bind(row.week52_high)
            .bind(row.week52_low)
            .bind(row.volume)
            .bind(row.signal.as_str())
            .bind(&row.signal_reason)
            .bind(&row.news_1)
            .bind(&row.news_2)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(rows.len())
    }

    async fn replace_summary(&self, summary: &SummaryRow) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM daily_summary WHERE report_date = $1")
            .bind(summary.report_date)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO daily_summary (
                report_date, overall_signal, us_market_trend, kr_market_trend,
                insights, action_guide, sector_trends, fetch_logs,
                total_fetched, total_failed
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(summary.report_date)
        .bind(summary.overall_signal.as_str())
        .bind(&summary.us_market_trend)
        .bind(&summary.kr_market_trend)
        .bind(Json(&summary.insights))
        .bind(&summary.action_guide)
        .bind(Json(&summary.sector_trends))
        .bind(summary.fetch_logs.as_ref().map(Json))
        .bind(summary.total_fetched)
        .bind(summary.total_failed)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

/// 메모리 저장소 (테스트 및 DB 없는 실행용).
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    watchlist: Vec<WatchEntry>,
    snapshots: Mutex<Vec<SnapshotRow>>,
    summaries: Mutex<Vec<SummaryRow>>,
}

impl MemoryReportStore {
    /// 관심종목 목록으로 생성합니다.
    pub fn new(watchlist: Vec<WatchEntry>) -> Self {
        Self {
            watchlist,
            ..Self::default()
        }
    }

    /// 저장된 모든 스냅샷
    pub fn snapshots(&self) -> Vec<SnapshotRow> {
        lock(&self.snapshots).clone()
    }

    /// 저장된 모든 요약
    pub fn summaries(&self) -> Vec<SummaryRow> {
        lock(&self.summaries).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn load_watchlist(&self) -> Result<Vec<WatchEntry>> {
        Ok(self.watchlist.clone())
    }

    async fn replace_snapshots(
        &self,
        report_date: NaiveDate,
        rows: &[SnapshotRow],
    ) -> Result<usize> {
        let mut snapshots = lock(&self.snapshots);
        snapshots.retain(|row| row.report_date != report_date);
        snapshots.extend_from_slice(rows);
        Ok(rows.len())
    }

    async fn replace_summary(&self, summary: &SummaryRow) -> Result<()> {
        let mut summaries = lock(&self.summaries);
        summaries.retain(|row| row.report_date != summary.report_date);
        summaries.push(summary.clone());
        Ok(())
    }
}
