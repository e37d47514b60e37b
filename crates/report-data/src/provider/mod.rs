//! 데이터 Provider 모듈.
//!
//! 수집 작업은 [`QuoteProvider`] 트레이트만 의존하며, 실제 구현은
//! Yahoo/네이버 클라이언트를 묶은 [`MarketDataProvider`]입니다.

pub mod fallback;
pub mod http;
pub mod naver;
pub mod news;
pub mod parse;
pub mod translate;
pub mod yahoo;

pub use fallback::{FallbackChain, Resolved};
pub use naver::{NaverClient, NaverEndpoints};
pub use news::{NewsClient, NewsEndpoints};
pub use translate::{Translator, TranslatorConfig};
pub use yahoo::{SessionToken, YahooClient, YahooEndpoints};

use std::time::Duration;

use async_trait::async_trait;
use report_core::{FetchLog, Quote};

use crate::error::ProviderResult;

/// 시세 Provider 트레이트.
///
/// 실패는 수집 로그에 기록되고 `None`으로 표현됩니다.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// 미국 시세용 세션을 획득합니다.
    async fn acquire_session(&self, log: &FetchLog) -> ProviderResult<SessionToken>;

    /// 미국 종목 시세
    async fn fetch_us_quote(
        &self,
        ticker: &str,
        session: &SessionToken,
        log: &FetchLog,
    ) -> Option<Quote>;

    /// 국내 종목 시세
    async fn fetch_kr_quote(&self, code: &str, log: &FetchLog) -> Option<Quote>;
}

/// Provider 구성.
#[derive(Debug)]
pub struct ProviderSettings {
    /// HTTP 요청 타임아웃
    pub timeout: Duration,
    /// 국내 종목 헤드라인 조회 여부
    pub kr_news_enabled: bool,
    pub translator: TranslatorConfig,
    pub yahoo: YahooEndpoints,
    pub naver: NaverEndpoints,
    pub news: NewsEndpoints,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            timeout: http::DEFAULT_TIMEOUT,
            kr_news_enabled: true,
            translator: TranslatorConfig::default(),
            yahoo: YahooEndpoints::default(),
            naver: NaverEndpoints::default(),
            news: NewsEndpoints::default(),
        }
    }
}

/// Yahoo + 네이버 시세 Provider.
#[derive(Debug)]
pub struct MarketDataProvider {
    yahoo: YahooClient,
    naver: NaverClient,
}

impl MarketDataProvider {
    pub fn new(yahoo: YahooClient, naver: NaverClient) -> Self {
        Self { yahoo, naver }
    }

    /// 설정으로부터 Provider를 생성합니다. 모든 클라이언트가 하나의 연결 풀을 공유합니다.
    pub fn from_settings(settings: ProviderSettings) -> ProviderResult<Self> {
        let client = http::build_client(settings.timeout)?;
        let news = NewsClient::new(client.clone(), settings.news);

        let yahoo = YahooClient::new(client.clone(), settings.yahoo)
            .with_news(news.clone())
            .with_translator(Translator::new(client.clone(), settings.translator));

        let mut naver = NaverClient::new(client, settings.naver);
        if settings.kr_news_enabled {
            naver = naver.with_news(news);
        }

        Ok(Self::new(yahoo, naver))
    }
}

#[async_trait]
impl QuoteProvider for MarketDataProvider {
    async fn acquire_session(&self, log: &FetchLog) -> ProviderResult<SessionToken> {
        self.yahoo.acquire_session(log).await
    }

    async fn fetch_us_quote(
        &self,
        ticker: &str,
        session: &SessionToken,
        log: &FetchLog,
    ) -> Option<Quote> {
        self.yahoo.fetch_quote(ticker, session, log).await
    }

    async fn fetch_kr_quote(&self, code: &str, log: &FetchLog) -> Option<Quote> {
        self.naver.fetch_quote(code, log).await
    }
}
