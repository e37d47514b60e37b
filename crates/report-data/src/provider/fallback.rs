//! 순서가 있는 fallback 체인.
//!
//! 각 단계(tier)는 아직 실행되지 않은 future로 등록되며, `run`이 앞에서부터
//! 하나씩 실행합니다. 첫 번째 성공 결과를 채택하고 나머지 단계는 실행하지 않습니다.
//! 실패한 단계는 `"{label}: {error}"` 형식으로 수집 로그에 남습니다.
//!
//! ```rust,ignore
//! let quote = FallbackChain::new("AAPL", Market::Us)
//!     .tier("Chart+crumb", client.fetch_chart("AAPL", Some(&session)))
//!     .tier("No-crumb", client.fetch_chart("AAPL", None))
//!     .run(&log)
//!     .await;
//! ```

use std::future::Future;

use futures::future::BoxFuture;
use report_core::{FetchLog, LogScope, LogStatus, Market};

use crate::error::ProviderResult;

struct Tier<'a, T> {
    label: &'static str,
    attempt: BoxFuture<'a, ProviderResult<T>>,
}

/// 채택된 단계의 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    /// 성공한 단계의 순번 (0부터)
    pub tier: usize,
    /// 성공한 단계의 이름
    pub label: &'static str,
    /// 결과 값
    pub value: T,
}

/// 첫 성공 채택 fallback 체인.
pub struct FallbackChain<'a, T> {
    ticker: String,
    market: Market,
    failure_status: LogStatus,
    tiers: Vec<Tier<'a, T>>,
}

impl<'a, T> FallbackChain<'a, T> {
    /// 새 체인을 생성합니다. 실패 단계는 기본적으로 `fail`로 기록됩니다.
    pub fn new(ticker: impl Into<String>, market: Market) -> Self {
        Self {
            ticker: ticker.into(),
            market,
            failure_status: LogStatus::Fail,
            tiers: Vec::new(),
        }
    }

    /// 실패 단계를 기록할 상태를 지정합니다 (부가 정보 조회는 `warn`).
    pub fn failure_status(mut self, status: LogStatus) -> Self {
        self.failure_status = status;
        self
    }

    /// 단계를 추가합니다. future는 `run`에서 차례가 올 때만 poll됩니다.
    pub fn tier<F>(mut self, label: &'static str, attempt: F) -> Self
    where
        F: Future<Output = ProviderResult<T>> + Send + 'a,
    {
        self.tiers.push(Tier {
            label,
            attempt: Box::pin(attempt),
        });
        self
    }

    /// 단계를 순서대로 실행하고 첫 번째 성공 결과를 반환합니다.
    ///
    /// 모든 단계가 실패하면 `None`.
    pub async fn run(self, log: &FetchLog) -> Option<Resolved<T>> {
        let scope = LogScope::Ticker(&self.ticker, self.market);
        for (index, tier) in self.tiers.into_iter().enumerate() {
            match tier.attempt.await {
                Ok(value) => {
                    return Some(Resolved {
                        tier: index,
                        label: tier.label,
                        value,
                    })
                }
                Err(e) => log.push(scope, self.failure_status, format!("{}: {}", tier.label, e)),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn succeed(value: u32, calls: &AtomicUsize) -> ProviderResult<u32> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    async fn fail(msg: &str, calls: &AtomicUsize) -> ProviderResult<u32> {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::missing(msg))
    }

    #[tokio::test]
    async fn test_first_success_skips_remaining_tiers() {
        let calls = AtomicUsize::new(0);
        let log = FetchLog::new();

        let resolved = FallbackChain::new("AAPL", Market::Us)
            .tier("first", succeed(1, &calls))
            .tier("second", succeed(2, &calls))
            .run(&log)
            .await
            .unwrap();

        assert_eq!(resolved.tier, 0);
        assert_eq!(resolved.label, "first");
        assert_eq!(resolved.value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_failed_tier_is_logged_before_fallback() {
        let calls = AtomicUsize::new(0);
        let log = FetchLog::new();

        let resolved = FallbackChain::new("AAPL", Market::Us)
            .tier("Chart+crumb", fail("HTTP 401", &calls))
            .tier("No-crumb", succeed(7, &calls))
            .run(&log)
            .await
            .unwrap();

        assert_eq!(resolved.tier, 1);
        assert_eq!(resolved.value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ticker, "AAPL");
        assert_eq!(entries[0].status, LogStatus::Fail);
        assert_eq!(entries[0].msg, "Chart+crumb: HTTP 401");
    }

    #[tokio::test]
    async fn test_all_tiers_failing_returns_none() {
        let calls = AtomicUsize::new(0);
        let log = FetchLog::new();

        let resolved = FallbackChain::new("005930", Market::Kr)
            .failure_status(LogStatus::Warn)
            .tier("a", fail("x", &calls))
            .tier("b", fail("y", &calls))
            .run(&log)
            .await;

        assert!(resolved.is_none());
        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.status == LogStatus::Warn));
        assert_eq!(entries[1].msg, "b: y");
    }

    #[tokio::test]
    async fn test_empty_chain() {
        let log = FetchLog::new();
        let chain: FallbackChain<'_, u32> = FallbackChain::new("X", Market::Us);
        assert!(chain.run(&log).await.is_none());
    }
}
