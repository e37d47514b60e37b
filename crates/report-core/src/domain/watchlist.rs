//! 관심종목(watch-list) 엔트리.

use serde::{Deserialize, Serialize};

use crate::types::Market;

/// 관심종목 엔트리.
///
/// 외부에서 관리되는 읽기 전용 입력입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchEntry {
    /// 종목 티커 (스냅샷 레코드의 키)
    pub ticker: String,
    /// 시장 구분
    pub market: Market,
    /// 표시용 회사명
    pub company_name: String,
    /// 섹터 태그
    pub sector: String,
    /// 조회용 종목 코드 (KR 종목에서 티커와 다를 때)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_code: Option<String>,
}

impl WatchEntry {
    /// 새 관심종목 엔트리를 생성합니다.
    pub fn new(
        ticker: impl Into<String>,
        market: Market,
        company_name: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            market,
            company_name: company_name.into(),
            sector: sector.into(),
            stock_code: None,
        }
    }

    /// 조회용 종목 코드를 지정합니다.
    pub fn with_stock_code(mut self, code: impl Into<String>) -> Self {
        self.stock_code = Some(code.into());
        self
    }

    /// 시세 조회에 사용할 코드.
    ///
    /// KR 종목은 `stock_code`가 있으면 그것을, 없으면 티커를 사용합니다.
    pub fn quote_code(&self) -> &str {
        match (self.market, self.stock_code.as_deref()) {
            (Market::Kr, Some(code)) if !code.is_empty() => code,
            _ => &self.ticker,
        }
    }
}

/// 관심종목을 시장별로 분리합니다 (US, KR).
pub fn split_by_market(entries: &[WatchEntry]) -> (Vec<&WatchEntry>, Vec<&WatchEntry>) {
    entries.iter().partition(|e| e.market == Market::Us)
}

/// 티커로 관심종목을 찾습니다.
pub fn find_entry<'a>(entries: &'a [WatchEntry], ticker: &str) -> Option<&'a WatchEntry> {
    entries.iter().find(|e| e.ticker == ticker)
}
