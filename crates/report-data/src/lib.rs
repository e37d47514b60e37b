//! 시세/뉴스/번역 데이터 Provider.
//!
//! 이 crate는 다음을 제공합니다:
//! - Yahoo Finance 세션(cookie + crumb) 획득 및 미국 주식 시세 조회
//! - 네이버 금융 국내 주식 시세 조회
//! - 종목 뉴스 헤드라인 조회 (Yahoo, 네이버)
//! - 헤드라인 한국어 번역 (실패 시 원문 유지)
//! - "첫 성공 채택" fallback 체인

pub mod error;
pub mod provider;

pub use error::{ProviderError, ProviderResult};
pub use provider::{
    FallbackChain, MarketDataProvider, NaverClient, NaverEndpoints, NewsClient, NewsEndpoints,
    ProviderSettings, QuoteProvider, Resolved, SessionToken, Translator, TranslatorConfig,
    YahooClient, YahooEndpoints,
};
