//! 일일 리포트 실행 모듈.
//!
//! 관심종목 전체를 동시에 조회하고, 성공한 종목으로 스냅샷과 요약을 만든 뒤 저장합니다.
//! 종목 하나의 실패(패닉 포함)는 다른 종목 조회에 영향을 주지 않습니다.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use futures::future::join_all;

use report_core::{
    analysis, split_by_market, FetchLog, LogEntry, LogScope, Market, Quote, SnapshotRow,
    SummaryRow, TrendLabel, WatchEntry,
};
use report_data::{QuoteProvider, SessionToken};

use super::store::ReportStore;
use crate::error::CollectorError;
use crate::{CollectionStats, Result};

/// 리포트 실행 옵션
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// 리포트 기준일 (KST)
    pub report_date: NaiveDate,
    /// 요약 레코드에 전체 수집 로그 포함 여부
    pub debug: bool,
}

/// 한 번의 리포트 실행 결과
#[derive(Debug, Clone)]
pub struct DailyReport {
    pub report_date: NaiveDate,
    /// 조회 성공 종목의 스냅샷
    pub snapshots: Vec<SnapshotRow>,
    pub summary: SummaryRow,
    pub stats: CollectionStats,
}

impl DailyReport {
    /// 조회 성공 종목 수
    pub fn fetched(&self) -> usize {
        self.stats.success
    }

    /// 조회 실패 종목 수
    pub fn failed(&self) -> usize {
        self.stats.errors
    }
}

/// 일일 리포트를 실행합니다.
///
/// 관심종목이 비어 있거나 읽을 수 없으면 실행 전체가 실패합니다.
/// 저장 실패는 로그에만 남기고 결과는 정상 반환합니다.
pub async fn run_daily_report(
    store: &dyn ReportStore,
    provider: Arc<dyn QuoteProvider>,
    options: ReportOptions,
    log: &FetchLog,
) -> Result<DailyReport> {
    let start = Instant::now();

    let watchlist = match store.load_watchlist().await {
        Ok(list) if list.is_empty() => {
            log.fatal(LogScope::Run, "No stocks found");
            return Err(CollectorError::EmptyWatchlist);
        }
        Ok(list) => list,
        Err(e) => {
            log.fatal(LogScope::Run, format!("Watch-list load failed: {}", e));
            return Err(e);
        }
    };

    let (us, kr) = split_by_market(&watchlist);
    log.ok(
        LogScope::Run,
        format!("{} stocks (US: {}, KR: {})", watchlist.len(), us.len(), kr.len()),
    );

    // 미국 세션은 fan-out 전에 한 번만 획득
    let session = if us.is_empty() {
        SessionToken::empty()
    } else {
        match provider.acquire_session(log).await {
            Ok(session) => session,
            Err(e) => {
                log.fail(LogScope::Market(Market::Us), format!("Session failed: {}", e));
                SessionToken::empty()
            }
        }
    };

    let quotes = fetch_all(&watchlist, provider, Arc::new(session), log).await;

    let mut stats = CollectionStats::new();
    let mut snapshots = Vec::with_capacity(watchlist.len());
    for (entry, quote) in watchlist.iter().zip(quotes) {
        stats.record(entry.market, quote.is_some());
        if let Some(quote) = quote {
            snapshots.push(SnapshotRow::from_quote(
                &entry.ticker,
                options.report_date,
                &quote,
            ));
        }
    }

    log.ok(
        LogScope::Run,
        format!("Done: {} fetched, {} failed", stats.success, stats.errors),
    );

    let fetch_logs = options.debug.then(|| log.entries());
    let summary = build_summary(
        options.report_date,
        &snapshots,
        &watchlist,
        &stats,
        fetch_logs,
    );

    match store.replace_snapshots(options.report_date, &snapshots).await {
        Ok(saved) => {
            stats.saved = saved;
            if saved > 0 {
                log.ok(LogScope::Run, format!("Saved {} snapshots", saved));
            }
        }
        Err(e) => log.fail(LogScope::Run, format!("Snapshot insert failed: {}", e)),
    }

    match store.replace_summary(&summary).await {
        Ok(()) => log.ok(LogScope::Run, "Summary saved"),
        Err(e) => log.fail(LogScope::Run, format!("Summary insert failed: {}", e)),
    }

    stats.elapsed = start.elapsed();

    Ok(DailyReport {
        report_date: options.report_date,
        snapshots,
        summary,
        stats,
    })
}

/// 종목마다 독립 task를 띄우고 모두 끝날 때까지 기다립니다.
///
/// 결과는 `watchlist`와 같은 순서입니다. 패닉한 task는 실패로 기록됩니다.
async fn fetch_all(
    watchlist: &[WatchEntry],
    provider: Arc<dyn QuoteProvider>,
    session: Arc<SessionToken>,
    log: &FetchLog,
) -> Vec<Option<Quote>> {
    let handles = watchlist.iter().map(|entry| {
        let provider = Arc::clone(&provider);
        let session = Arc::clone(&session);
        let log = log.clone();
        let code = entry.quote_code().to_string();
        let market = entry.market;

        tokio::spawn(async move {
            match market {
                Market::Us => provider.fetch_us_quote(&code, &session, &log).await,
                Market::Kr => provider.fetch_kr_quote(&code, &log).await,
            }
        })
    });

    join_all(handles)
        .await
        .into_iter()
        .zip(watchlist)
        .map(|(outcome, entry)| match outcome {
            Ok(quote) => quote,
            Err(e) => {
                log.fail(
                    LogScope::Ticker(entry.quote_code(), entry.market),
                    format!("Task failed: {}", e),
                );
                None
            }
        })
        .collect()
}

/// 스냅샷과 관심종목으로 요약 레코드를 만듭니다.
pub fn build_summary(
    report_date: NaiveDate,
    snapshots: &[SnapshotRow],
    watchlist: &[WatchEntry],
    stats: &CollectionStats,
    fetch_logs: Option<Vec<LogEntry>>,
) -> SummaryRow {
    let (us, kr) = split_by_market(watchlist);
    let us_avg = analysis::market_average(snapshots, &us);
    let kr_avg = analysis::market_average(snapshots, &kr);
    let overall_signal = analysis::overall_signal(us_avg, kr_avg);

    SummaryRow {
        report_date,
        overall_signal,
        us_market_trend: TrendLabel::from_average(us_avg).market_phrase(Market::Us),
        kr_market_trend: TrendLabel::from_average(kr_avg).market_phrase(Market::Kr),
        insights: analysis::insight_digest(snapshots, watchlist),
        action_guide: format!(
            "성공 {}종목 / 실패 {}종목 수집. {}",
            stats.success,
            stats.errors,
            overall_signal.advice()
        ),
        sector_trends: analysis::sector_trends(snapshots, watchlist),
        fetch_logs,
        total_fetched: stats.success as i64,
        total_failed: stats.errors as i64,
    }
}

/// 단일 종목을 조회합니다 (테스트 모드).
///
/// 6자리 숫자 티커는 국내, 그 외는 미국 경로로 조회합니다. 저장하지 않습니다.
pub async fn run_single_ticker(
    provider: &dyn QuoteProvider,
    ticker: &str,
    log: &FetchLog,
) -> Option<Quote> {
    let market = Market::infer_from_ticker(ticker);
    log.ok(LogScope::Ticker(ticker, market), "Test mode");

    match market {
        Market::Kr => provider.fetch_kr_quote(ticker, log).await,
        Market::Us => {
            let session = match provider.acquire_session(log).await {
                Ok(session) => session,
                Err(e) => {
                    log.fail(LogScope::Market(Market::Us), format!("Session failed: {}", e));
                    SessionToken::empty()
                }
            };
            provider.fetch_us_quote(ticker, &session, log).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_core::OverallSignal;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn snapshot(ticker: &str, market: Market, price: rust_decimal::Decimal) -> SnapshotRow {
        let quote = Quote::from_prices(ticker, market, price, dec!(100)).unwrap();
        SnapshotRow::from_quote(ticker, date(), &quote)
    }

    #[test]
    fn test_build_summary() {
        let watchlist = vec![
            WatchEntry::new("AAPL", Market::Us, "Apple", "Tech"),
            WatchEntry::new("NVDA", Market::Us, "NVIDIA", "Semis"),
            WatchEntry::new("005930", Market::Kr, "삼성전자", "Semis"),
        ];
        let snapshots = vec![
            snapshot("AAPL", Market::Us, dec!(103)),
            snapshot("NVDA", Market::Us, dec!(105)),
            snapshot("005930", Market::Kr, dec!(101)),
        ];
        let stats = CollectionStats {
            total: 3,
            success: 3,
            ..CollectionStats::default()
        };

        let summary = build_summary(date(), &snapshots, &watchlist, &stats, None);

        // US 평균 4.00, KR 평균 1.00 → 종합 2.5
        assert_eq!(summary.overall_signal, OverallSignal::Bullish);
        assert_eq!(summary.us_market_trend, "미국 강세");
        assert_eq!(summary.kr_market_trend, "한국 혼조");
        assert_eq!(
            summary.action_guide,
            "성공 3종목 / 실패 0종목 수집. 시장 강세: 코어 성장 ETF 비중 유지"
        );
        assert_eq!(summary.sector_trends["Semis"].avg, dec!(3));
        assert_eq!(summary.insights.top_gainers[0].ticker, "NVDA");
        assert_eq!(summary.insights.sector_leaders, "Semis (+3.00%)");
        assert_eq!(summary.total_fetched, 3);
        assert!(summary.fetch_logs.is_none());
    }

    #[test]
    fn test_failed_tickers_pull_market_average_toward_zero() {
        let watchlist = vec![
            WatchEntry::new("AAPL", Market::Us, "Apple", "Tech"),
            WatchEntry::new("MSFT", Market::Us, "Microsoft", "Tech"),
        ];
        let snapshots = vec![snapshot("AAPL", Market::Us, dec!(104))];
        let stats = CollectionStats {
            total: 2,
            success: 1,
            errors: 1,
            ..CollectionStats::default()
        };

        let summary = build_summary(date(), &snapshots, &watchlist, &stats, Some(Vec::new()));

        // US 평균 = 4 / 2 = 2, KR 없음 → 0, 종합 1.0 → mixed
        assert_eq!(summary.us_market_trend, "미국 강세");
        assert_eq!(summary.kr_market_trend, "한국 혼조");
        assert_eq!(summary.overall_signal, OverallSignal::Mixed);
        assert_eq!(summary.total_failed, 1);
        assert_eq!(summary.fetch_logs, Some(Vec::new()));
    }
}
