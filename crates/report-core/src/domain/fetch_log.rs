//! 수집 로그.
//!
//! 한 번의 실행 동안 쌓이는 append-only 로그입니다. 모든 종목 조회 태스크가
//! 같은 로그를 공유하며, 종목 간 기록 순서는 보장되지 않습니다.
//! 기록된 항목은 `tracing` 이벤트로도 함께 출력됩니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::types::Market;

/// 실행 단위 로그에 쓰이는 자리표시자
pub const NO_SCOPE: &str = "-";

/// 로그 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    /// 성공
    Ok,
    /// 경고 (실행에 영향 없음)
    Warn,
    /// 실패 (해당 시도 실패)
    Fail,
    /// 치명적 실패 (실행 중단)
    Fatal,
}

/// 로그 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 종목 티커 (실행 단위는 "-")
    pub ticker: String,
    /// 시장 코드 (실행 단위는 "-")
    pub market: String,
    /// 상태
    pub status: LogStatus,
    /// 메시지
    pub msg: String,
    /// 기록 시각
    pub ts: DateTime<Utc>,
}

/// 로그 기록 범위.
#[derive(Debug, Clone, Copy)]
pub enum LogScope<'a> {
    /// 실행 전체
    Run,
    /// 특정 시장 (예: 세션 획득)
    Market(Market),
    /// 특정 종목
    Ticker(&'a str, Market),
}

impl LogScope<'_> {
    fn labels(&self) -> (String, String) {
        match self {
            LogScope::Run => (NO_SCOPE.to_string(), NO_SCOPE.to_string()),
            LogScope::Market(market) => (NO_SCOPE.to_string(), market.as_str().to_string()),
            LogScope::Ticker(ticker, market) => (ticker.to_string(), market.as_str().to_string()),
        }
    }
}

/// 공유 가능한 수집 로그.
///
/// `clone()`은 같은 로그를 가리키는 핸들을 만듭니다.
#[derive(Debug, Clone, Default)]
pub struct FetchLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl FetchLog {
    /// 빈 로그를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 항목을 추가합니다.
    pub fn push(&self, scope: LogScope<'_>, status: LogStatus, msg: impl Into<String>) {
        let (ticker, market) = scope.labels();
        let msg = msg.into();

        match status {
            LogStatus::Ok => tracing::info!(ticker = %ticker, market = %market, "{}", msg),
            LogStatus::Warn | LogStatus::Fail => {
                tracing::warn!(ticker = %ticker, market = %market, status = ?status, "{}", msg)
            }
            LogStatus::Fatal => tracing::error!(ticker = %ticker, market = %market, "{}", msg),
        }

        self.lock().push(LogEntry {
            ticker,
            market,
            status,
            msg,
            ts: Utc::now(),
        });
    }

    /// 성공 항목을 추가합니다.
    pub fn ok(&self, scope: LogScope<'_>, msg: impl Into<String>) {
        self.push(scope, LogStatus::Ok, msg);
    }

    /// 경고 항목을 추가합니다.
    pub fn warn(&self, scope: LogScope<'_>, msg: impl Into<String>) {
        self.push(scope, LogStatus::Warn, msg);
    }

    /// 실패 항목을 추가합니다.
    pub fn fail(&self, scope: LogScope<'_>, msg: impl Into<String>) {
        self.push(scope, LogStatus::Fail, msg);
    }

    /// 치명적 실패 항목을 추가합니다.
    pub fn fatal(&self, scope: LogScope<'_>, msg: impl Into<String>) {
        self.push(scope, LogStatus::Fatal, msg);
    }

    /// 전체 항목의 스냅샷.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// `ok`가 아닌 항목만.
    pub fn failures(&self) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| e.status != LogStatus::Ok)
            .cloned()
            .collect()
    }

    /// 항목 수.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// 비어 있는지 여부.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // 다른 태스크가 패닉해도 로그는 계속 쓸 수 있어야 함
    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
