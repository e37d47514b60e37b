//! 저장용 리포트 레코드.
//!
//! 날짜별로 종목당 스냅샷 1행, 요약 1행이 저장됩니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::fetch_log::LogEntry;
use super::quote::{PriceChange, Quote};
use super::signal::{OverallSignal, Signal, TrendLabel};
use crate::types::{Percentage, Price};

/// 종목별 일일 스냅샷 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    /// 관심종목 티커
    pub ticker: String,
    /// 리포트 기준일
    pub report_date: NaiveDate,
    /// 현재가
    pub current_price: Price,
    /// 전일 종가
    pub prev_close: Price,
    /// 변동 금액
    pub price_change: Price,
    /// 등락률 (%)
    pub price_change_pct: Percentage,
    /// 52주 최고가
    pub week52_high: Price,
    /// 52주 최저가
    pub week52_low: Price,
    /// 거래량
    pub volume: i64,
    /// 시그널
    pub signal: Signal,
    /// 시그널 근거 (`news_1`, 없으면 빈 문자열)
    pub signal_reason: String,
    /// 주석 1
    pub news_1: Option<String>,
    /// 주석 2
    pub news_2: Option<String>,
}

impl SnapshotRow {
    /// 조회된 시세로 스냅샷 레코드를 만듭니다.
    ///
    /// `ticker`는 관심종목의 티커입니다 (조회 코드와 다를 수 있음).
    pub fn from_quote(ticker: impl Into<String>, report_date: NaiveDate, quote: &Quote) -> Self {
        Self {
            ticker: ticker.into(),
            report_date,
            current_price: quote.current_price,
            prev_close: quote.prev_close,
            price_change: quote.price_change,
            price_change_pct: quote.price_change_pct,
            week52_high: quote.week52_high,
            week52_low: quote.week52_low,
            volume: quote.volume,
            signal: Signal::classify(quote.price_change_pct),
            signal_reason: quote.news_1.clone().unwrap_or_default(),
            news_1: quote.news_1.clone(),
            news_2: quote.news_2.clone(),
        }
    }
}

impl PriceChange for SnapshotRow {
    fn ticker(&self) -> &str {
        &self.ticker
    }

    fn price_change_pct(&self) -> Percentage {
        self.price_change_pct
    }
}

/// 섹터별 추세.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorTrend {
    /// 추세 라벨
    pub trend: TrendLabel,
    /// 평균 등락률 (소수점 2자리)
    pub avg: Percentage,
}

/// 섹터 → 추세 맵 (섹터명 순 정렬).
pub type SectorTrends = BTreeMap<String, SectorTrend>;

/// 상승/하락 상위 종목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    /// 티커
    pub ticker: String,
    /// 회사명 (관심종목에 없으면 생략)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// 등락률 (%)
    pub change: Percentage,
}

/// 인사이트 요약.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightDigest {
    /// 상승 상위 (최대 3, 모두 양수)
    pub top_gainers: Vec<Mover>,
    /// 하락 상위 (최대 3, 모두 음수)
    pub top_losers: Vec<Mover>,
    /// 최고 섹터 (예: "반도체 (+2.10%)")
    pub sector_leaders: String,
    /// 최저 섹터
    pub sector_laggards: String,
}

/// 날짜별 요약 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// 리포트 기준일
    pub report_date: NaiveDate,
    /// 종합 시그널
    pub overall_signal: OverallSignal,
    /// 미국 시장 추세 문구
    pub us_market_trend: String,
    /// 한국 시장 추세 문구
    pub kr_market_trend: String,
    /// 인사이트
    pub insights: InsightDigest,
    /// 대응 가이드
    pub action_guide: String,
    /// 섹터별 추세
    pub sector_trends: SectorTrends,
    /// 수집 로그 (debug 모드에서만)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_logs: Option<Vec<LogEntry>>,
    /// 수집 성공 종목 수
    pub total_fetched: i64,
    /// 수집 실패 종목 수
    pub total_failed: i64,
}
