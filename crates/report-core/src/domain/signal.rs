//! 종목/섹터/시장 단위 시그널 분류.
//!
//! - `Signal` - 종목 등락률 기반 4단계 분류
//! - `TrendLabel` - 평균 등락률 기반 강세/약세/혼조
//! - `OverallSignal` - 미국/한국 시장 평균 기반 종합 시그널

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Market, Percentage};

/// 종목별 시그널.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// 등락률 > 3%
    Positive,
    /// -1% ≤ 등락률 ≤ 3%
    Hold,
    /// -3% ≤ 등락률 < -1%
    Watch,
    /// 등락률 < -3%
    Caution,
}

impl Signal {
    /// 등락률로 시그널을 분류합니다.
    ///
    /// 경계값은 더 관대한 쪽에 속합니다 (3 → hold, -1 → hold, -3 → watch).
    pub fn classify(pct: Percentage) -> Self {
        if pct > dec!(3) {
            Signal::Positive
        } else if pct >= dec!(-1) {
            Signal::Hold
        } else if pct >= dec!(-3) {
            Signal::Watch
        } else {
            Signal::Caution
        }
    }

    /// DB/응답에 기록되는 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Positive => "positive",
            Signal::Hold => "hold",
            Signal::Watch => "watch",
            Signal::Caution => "caution",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 평균 등락률 기반 추세 라벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    /// 평균 > 1%
    Strong,
    /// 평균 < -1%
    Weak,
    /// 그 외
    Mixed,
}

impl TrendLabel {
    /// 평균 등락률로 라벨을 정합니다.
    pub fn from_average(avg: Percentage) -> Self {
        if avg > Decimal::ONE {
            TrendLabel::Strong
        } else if avg < Decimal::NEGATIVE_ONE {
            TrendLabel::Weak
        } else {
            TrendLabel::Mixed
        }
    }

    /// 시장 추세 문구 (예: "미국 강세").
    pub fn market_phrase(&self, market: Market) -> String {
        let word = match self {
            TrendLabel::Strong => "강세",
            TrendLabel::Weak => "약세",
            TrendLabel::Mixed => "혼조",
        };
        format!("{} {}", market.name_ko(), word)
    }

    /// 문자열 표현.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::Strong => "strong",
            TrendLabel::Weak => "weak",
            TrendLabel::Mixed => "mixed",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 시장 전체 종합 시그널.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallSignal {
    /// 두 시장 평균 > 1%
    Bullish,
    /// 두 시장 평균 < -1%
    Bearish,
    /// 그 외
    Mixed,
}

impl OverallSignal {
    /// 미국/한국 시장 평균 등락률의 평균으로 종합 시그널을 정합니다.
    pub fn from_market_averages(us_avg: Percentage, kr_avg: Percentage) -> Self {
        let overall = us_avg.saturating_add(kr_avg) / Decimal::TWO;
        if overall > Decimal::ONE {
            OverallSignal::Bullish
        } else if overall < Decimal::NEGATIVE_ONE {
            OverallSignal::Bearish
        } else {
            OverallSignal::Mixed
        }
    }

    /// 대응 가이드 문구.
    pub fn advice(&self) -> &'static str {
        match self {
            OverallSignal::Bullish => "시장 강세: 코어 성장 ETF 비중 유지",
            OverallSignal::Bearish => "시장 약세: 안전자산 비중 확대 고려",
            OverallSignal::Mixed => "혼조세: 관망 및 분할 매수 전략 유지",
        }
    }

    /// 문자열 표현.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallSignal::Bullish => "bullish",
            OverallSignal::Bearish => "bearish",
            OverallSignal::Mixed => "mixed",
        }
    }
}

impl fmt::Display for OverallSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
