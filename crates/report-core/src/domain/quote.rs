//! 종목별 일일 시세.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DecimalExt, Market, Percentage, Price};

/// 등락률을 가진 레코드의 공통 인터페이스.
///
/// 분석 엔진은 시세(`Quote`)와 스냅샷 레코드 모두에 대해 동작합니다.
pub trait PriceChange {
    /// 관심종목 티커
    fn ticker(&self) -> &str;

    /// 전일 대비 등락률 (%)
    fn price_change_pct(&self) -> Percentage;
}

/// 종목별 일일 시세.
///
/// Provider 어댑터가 생성하며, 반환된 이후에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// 조회에 사용한 티커/종목 코드
    pub ticker: String,
    /// 시장 구분
    pub market: Market,
    /// 현재가
    pub current_price: Price,
    /// 전일 종가
    pub prev_close: Price,
    /// 전일 대비 변동 금액
    pub price_change: Price,
    /// 전일 대비 등락률 (%, 소수점 2자리)
    pub price_change_pct: Percentage,
    /// 52주 최고가
    pub week52_high: Price,
    /// 52주 최저가
    pub week52_low: Price,
    /// 거래량
    pub volume: i64,
    /// 주석 1 (뉴스 헤드라인 또는 등락 문구)
    pub news_1: Option<String>,
    /// 주석 2 (52주 범위 문구)
    pub news_2: Option<String>,
}

impl Quote {
    /// 현재가와 전일 종가로 시세를 생성합니다.
    ///
    /// 등락률은 전일 종가가 0보다 클 때만 계산하고, 그 외에는 0입니다.
    /// 계산이 Decimal 범위를 벗어나면 `None`.
    pub fn from_prices(
        ticker: impl Into<String>,
        market: Market,
        price: Price,
        prev_close: Price,
    ) -> Option<Self> {
        let change = price.checked_sub(prev_close)?;
        let pct = if prev_close > Decimal::ZERO {
            change
                .checked_div(prev_close)?
                .checked_mul(Decimal::ONE_HUNDRED)?
                .round_pct()
        } else {
            Decimal::ZERO
        };

        Some(Self {
            ticker: ticker.into(),
            market,
            current_price: price,
            prev_close,
            price_change: change,
            price_change_pct: pct,
            week52_high: Decimal::ZERO,
            week52_low: Decimal::ZERO,
            volume: 0,
            news_1: None,
            news_2: None,
        })
    }

    /// Provider가 제공한 변동 금액과 등락률로 시세를 생성합니다.
    ///
    /// 전일 종가는 `price - change`로 역산합니다. 범위를 벗어나면 `None`.
    pub fn from_reported_change(
        ticker: impl Into<String>,
        market: Market,
        price: Price,
        change: Price,
        pct: Percentage,
    ) -> Option<Self> {
        Some(Self {
            ticker: ticker.into(),
            market,
            current_price: price,
            prev_close: price.checked_sub(change)?,
            price_change: change,
            price_change_pct: pct.round_pct(),
            week52_high: Decimal::ZERO,
            week52_low: Decimal::ZERO,
            volume: 0,
            news_1: None,
            news_2: None,
        })
    }

    /// 52주 고저를 지정합니다.
    pub fn with_week52(mut self, high: Price, low: Price) -> Self {
        self.week52_high = high;
        self.week52_low = low;
        self
    }

    /// 거래량을 지정합니다.
    pub fn with_volume(mut self, volume: i64) -> Self {
        self.volume = volume;
        self
    }

    /// 주석을 지정합니다.
    pub fn with_annotations(mut self, news_1: Option<String>, news_2: Option<String>) -> Self {
        self.news_1 = news_1;
        self.news_2 = news_2;
        self
    }

    /// 등락 방향 문구 (예: "전일 대비 +5.26% 상승").
    ///
    /// 헤드라인이 없을 때 `news_1`의 대체 문구로 사용합니다.
    pub fn movement_sentence(&self) -> String {
        let direction = if self.price_change_pct > Decimal::ZERO {
            "상승"
        } else if self.price_change_pct < Decimal::ZERO {
            "하락"
        } else {
            "보합"
        };
        format!(
            "전일 대비 {}% {}",
            self.price_change_pct.to_signed_string(),
            direction
        )
    }

    /// 52주 범위 문구 (52주 최고가가 있을 때만).
    pub fn week52_sentence(&self) -> Option<String> {
        if self.week52_high <= Decimal::ZERO {
            return None;
        }
        let symbol = self.market.currency_symbol();
        let sentence = match self.market {
            Market::Us => format!(
                "52주 범위: {}{:.2} ~ {}{:.2}",
                symbol, self.week52_low, symbol, self.week52_high
            ),
            Market::Kr => format!(
                "52주 범위: {}{} ~ {}{}",
                symbol,
                self.week52_low.to_grouped_string(),
                symbol,
                self.week52_high.to_grouped_string()
            ),
        };
        Some(sentence)
    }
}

impl PriceChange for Quote {
    fn ticker(&self) -> &str {
        &self.ticker
    }

    fn price_change_pct(&self) -> Percentage {
        self.price_change_pct
    }
}
