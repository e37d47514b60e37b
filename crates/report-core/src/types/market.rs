//! 시장 구분 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;

/// 관심종목이 속한 시장.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    /// 미국 주식 (Yahoo Finance)
    #[serde(rename = "US")]
    Us,
    /// 한국 주식 (네이버 금융)
    #[serde(rename = "KR")]
    Kr,
}

impl Market {
    /// 로그/DB에 기록되는 시장 코드.
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Us => "US",
            Market::Kr => "KR",
        }
    }

    /// 요약 문구에 쓰이는 시장 이름.
    pub fn name_ko(&self) -> &'static str {
        match self {
            Market::Us => "미국",
            Market::Kr => "한국",
        }
    }

    /// 가격 표기용 통화 기호.
    pub fn currency_symbol(&self) -> &'static str {
        match self {
            Market::Us => "$",
            Market::Kr => "₩",
        }
    }

    /// 티커 형식으로 시장을 추정합니다.
    ///
    /// 6자리 숫자(예: "005930")는 KR, 그 외는 US로 취급합니다.
    pub fn infer_from_ticker(ticker: &str) -> Self {
        if ticker.len() == 6 && ticker.chars().all(|c| c.is_ascii_digit()) {
            Market::Kr
        } else {
            Market::Us
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Market {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "US" => Ok(Market::Us),
            "KR" => Ok(Market::Kr),
            other => Err(ReportError::InvalidInput(format!("Unknown market: {}", other))),
        }
    }
}
