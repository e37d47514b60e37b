//! 실행 통계.

use std::time::Duration;

use report_core::Market;
use serde::Serialize;

/// 한 번의 리포트 실행 통계.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionStats {
    /// 관심종목 수
    pub total: usize,
    /// 시세를 얻은 종목 수
    pub success: usize,
    /// 모든 단계가 실패한 종목 수
    pub errors: usize,
    /// 실패한 미국 종목 수
    pub us_failed: usize,
    /// 실패한 국내 종목 수
    pub kr_failed: usize,
    /// 저장된 스냅샷 행 수
    pub saved: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CollectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 종목 하나의 조회 결과를 반영합니다.
    pub fn record(&mut self, market: Market, fetched: bool) {
        self.total += 1;
        if fetched {
            self.success += 1;
            return;
        }
        self.errors += 1;
        match market {
            Market::Us => self.us_failed += 1,
            Market::Kr => self.kr_failed += 1,
        }
    }

    /// 성공률 (%). 종목이 없으면 0.
    pub fn success_rate(&self) -> f64 {
        match self.total {
            0 => 0.0,
            total => self.success as f64 * 100.0 / total as f64,
        }
    }

    /// 실행 결과를 한 줄로 남깁니다. 실패가 있으면 warn 레벨.
    pub fn log_summary(&self, operation: &str) {
        let rate = format!("{:.1}%", self.success_rate());
        let elapsed_ms = self.elapsed.as_millis() as u64;

        if self.errors == 0 {
            tracing::info!(
                operation,
                total = self.total,
                saved = self.saved,
                success_rate = %rate,
                elapsed_ms,
                "리포트 완료"
            );
        } else {
            tracing::warn!(
                operation,
                total = self.total,
                success = self.success,
                us_failed = self.us_failed,
                kr_failed = self.kr_failed,
                saved = self.saved,
                success_rate = %rate,
                elapsed_ms,
                "리포트 완료 (일부 종목 실패)"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_by_market() {
        let mut stats = CollectionStats::new();
        assert_eq!(stats.success_rate(), 0.0);

        stats.record(Market::Us, true);
        stats.record(Market::Us, false);
        stats.record(Market::Kr, true);
        stats.record(Market::Kr, true);

        assert_eq!((stats.total, stats.success, stats.errors), (4, 3, 1));
        assert_eq!((stats.us_failed, stats.kr_failed), (1, 0));
        assert_eq!(stats.success_rate(), 75.0);
    }
}
