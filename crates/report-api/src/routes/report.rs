//! 일일 리포트 endpoint.
//!
//! - `?debug=true`: 응답 로그에 전체 수집 로그 포함 (요약 레코드에도 저장)
//! - `?test=<ticker>`: 배치 대신 단일 종목만 조회 (저장하지 않음)

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use report_collector::modules::{run_daily_report, run_single_ticker, ReportOptions};
use report_core::{today_kst, FetchLog, LogEntry, LogScope, OverallSignal, Quote};

use crate::error::ApiError;
use crate::state::AppState;

/// 쿼리 파라미터.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub debug: Option<String>,
    pub test: Option<String>,
}

impl ReportQuery {
    fn is_debug(&self) -> bool {
        self.debug.as_deref() == Some("true")
    }

    fn test_ticker(&self) -> Option<&str> {
        self.test.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// 배치 실행 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub success: bool,
    pub date: NaiveDate,
    pub fetched: usize,
    pub failed: usize,
    pub signal: OverallSignal,
    /// debug 모드면 전체, 아니면 `ok`가 아닌 항목만
    pub logs: Vec<LogEntry>,
}

/// 테스트 모드 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct TestResponse {
    pub mode: String,
    pub ticker: String,
    pub result: Option<Quote>,
    pub logs: Vec<LogEntry>,
}

/// 일일 리포트 실행.
///
/// ANY / , ANY /daily-report
pub async fn daily_report(
    State(state): State<Arc<AppState>>,
    method: Method,
    Query(query): Query<ReportQuery>,
) -> Response {
    if method == Method::OPTIONS {
        return (StatusCode::OK, "ok").into_response();
    }

    let log = FetchLog::new();

    if let Some(ticker) = query.test_ticker() {
        let result = run_single_ticker(state.provider.as_ref(), ticker, &log).await;
        return Json(TestResponse {
            mode: "test".to_string(),
            ticker: ticker.to_string(),
            result,
            logs: log.entries(),
        })
        .into_response();
    }

    match run_batch(&state, query.is_debug(), &log).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "일일 리포트 실패");
            e.into_response()
        }
    }
}

async fn run_batch(state: &AppState, debug: bool, log: &FetchLog) -> Result<ReportResponse, ApiError> {
    let Some(store) = state.store.as_ref() else {
        let message = "DATABASE_URL 환경변수가 설정되지 않았습니다";
        log.fatal(LogScope::Run, message);
        return Err(ApiError::Run {
            message: message.to_string(),
            logs: log.entries(),
        });
    };

    let options = ReportOptions {
        report_date: today_kst(),
        debug,
    };

    let report = run_daily_report(store.as_ref(), state.provider.clone(), options, log)
        .await
        .map_err(|e| ApiError::Run {
            message: e.to_string(),
            logs: log.entries(),
        })?;
    report.stats.log_summary("일일 리포트");

    Ok(ReportResponse {
        success: true,
        date: report.report_date,
        fetched: report.fetched(),
        failed: report.failed(),
        signal: report.summary.overall_signal,
        logs: if debug { log.entries() } else { log.failures() },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_flags() {
        let query = ReportQuery {
            debug: Some("true".to_string()),
            test: Some("  ".to_string()),
        };
        assert!(query.is_debug());
        assert_eq!(query.test_ticker(), None);

        let query = ReportQuery {
            debug: Some("1".to_string()),
            test: Some("AAPL".to_string()),
        };
        assert!(!query.is_debug());
        assert_eq!(query.test_ticker(), Some("AAPL"));

        assert!(!ReportQuery::default().is_debug());
    }
}
