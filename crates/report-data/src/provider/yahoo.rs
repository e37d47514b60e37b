//! Yahoo Finance 미국 주식 시세.
//!
//! Yahoo는 cookie와 crumb 토큰이 있어야 안정적으로 응답합니다.
//! 세션은 실행당 한 번만 획득하고 모든 미국 종목 조회가 공유합니다.
//!
//! ## 세션 획득 순서
//! 1. 부트스트랩 페이지(`fc.yahoo.com`, 없으면 `finance.yahoo.com`)에서 cookie 수집
//! 2. cookie를 붙여 `/v1/test/getcrumb` 호출
//!
//! ## 시세 조회 순서
//! 1. crumb + cookie를 붙인 chart API
//! 2. crumb 없는 chart API

use reqwest::header::{HeaderMap, ACCEPT, COOKIE, SET_COOKIE};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::sync::OnceCell;

use report_core::{DecimalExt, FetchLog, LogScope, Market, Quote};

use super::fallback::FallbackChain;
use super::http::{ensure_success, truncate};
use super::news::NewsClient;
use super::translate::Translator;
use crate::error::{ProviderError, ProviderResult};

/// 유효한 crumb의 최대 길이
const MAX_CRUMB_LEN: usize = 50;

/// Yahoo 엔드포인트 모음.
#[derive(Debug, Clone)]
pub struct YahooEndpoints {
    /// cookie를 얻기 위해 순서대로 방문하는 페이지
    pub bootstrap_urls: Vec<String>,
    pub crumb_url: String,
    /// `{base}/{ticker}`
    pub chart_base: String,
}

impl Default for YahooEndpoints {
    fn default() -> Self {
        Self {
            bootstrap_urls: vec![
                "https://fc.yahoo.com".to_string(),
                "https://finance.yahoo.com".to_string(),
            ],
            crumb_url: "https://query2.finance.yahoo.com/v1/test/getcrumb".to_string(),
            chart_base: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
        }
    }
}

impl YahooEndpoints {
    /// 모든 엔드포인트를 하나의 base URL 아래로 지정합니다 (테스트용 mock 서버).
    pub fn with_base(base: &str) -> Self {
        Self {
            bootstrap_urls: vec![
                format!("{}/bootstrap/primary", base),
                format!("{}/bootstrap/secondary", base),
            ],
            crumb_url: format!("{}/v1/test/getcrumb", base),
            chart_base: format!("{}/v8/finance/chart", base),
        }
    }
}

/// Yahoo 세션 토큰 (cookie + crumb).
///
/// 획득에 실패하면 빈 토큰으로 진행하며, 이 경우 crumb 없는 경로만 성공할 수 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionToken {
    pub cookie: String,
    pub crumb: String,
}

impl SessionToken {
    /// 빈 토큰
    pub fn empty() -> Self {
        Self::default()
    }

    /// crumb이 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.crumb.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Option<ChartBody>,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<Decimal>,
    previous_close: Option<Decimal>,
    chart_previous_close: Option<Decimal>,
    fifty_two_week_high: Option<Decimal>,
    fifty_two_week_low: Option<Decimal>,
    regular_market_volume: Option<i64>,
}

impl ChartMeta {
    fn into_quote(self, ticker: &str) -> ProviderResult<Quote> {
        let price = self.regular_market_price.unwrap_or(Decimal::ZERO);
        let prev_close = self
            .previous_close
            .or(self.chart_previous_close)
            .unwrap_or(price);

        let quote = Quote::from_prices(ticker, Market::Us, price, prev_close)
            .ok_or_else(ProviderError::out_of_range)?;
        Ok(quote
            .with_week52(
                self.fifty_two_week_high.unwrap_or(Decimal::ZERO),
                self.fifty_two_week_low.unwrap_or(Decimal::ZERO),
            )
            .with_volume(self.regular_market_volume.unwrap_or(0)))
    }
}

/// Yahoo Finance 클라이언트.
#[derive(Debug)]
pub struct YahooClient {
    client: Client,
    endpoints: YahooEndpoints,
    news: Option<NewsClient>,
    translator: Option<Translator>,
    session: OnceCell<SessionToken>,
}

impl YahooClient {
    pub fn new(client: Client, endpoints: YahooEndpoints) -> Self {
        Self {
            client,
            endpoints,
            news: None,
            translator: None,
            session: OnceCell::new(),
        }
    }

    /// 헤드라인 조회를 활성화합니다.
    pub fn with_news(mut self, news: NewsClient) -> Self {
        self.news = Some(news);
        self
    }

    /// 헤드라인 번역을 활성화합니다.
    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// 세션을 획득합니다. 성공한 세션은 클라이언트 수명 동안 재사용됩니다.
    pub async fn acquire_session(&self, log: &FetchLog) -> ProviderResult<SessionToken> {
        self.session
            .get_or_try_init(|| self.request_session(log))
            .await
            .cloned()
    }

    async fn request_session(&self, log: &FetchLog) -> ProviderResult<SessionToken> {
        let scope = LogScope::Market(Market::Us);

        let mut cookie = String::new();
        for url in &self.endpoints.bootstrap_urls {
            match self.client.get(url).send().await {
                Ok(resp) => cookie = collect_cookies(resp.headers()),
                Err(e) => log.warn(scope, format!("Cookie page failed: {}", e)),
            }
            if !cookie.is_empty() {
                break;
            }
        }
        if cookie.is_empty() {
            log.warn(scope, "No cookies obtained from Yahoo");
        }

        let mut req = self.client.get(&self.endpoints.crumb_url);
        if !cookie.is_empty() {
            req = req.header(COOKIE, &cookie);
        }
        let resp = ensure_success(req.send().await?)
            .await
            .map_err(|e| ProviderError::InvalidSession(format!("Crumb failed: {}", e)))?;
        let crumb = resp.text().await?.trim().to_string();

        if crumb.is_empty() || crumb.len() > MAX_CRUMB_LEN {
            return Err(ProviderError::InvalidSession(format!(
                "Invalid crumb: {}",
                truncate(&crumb, MAX_CRUMB_LEN)
            )));
        }

        log.ok(scope, format!("Crumb obtained: {}...", truncate(&crumb, 10)));
        Ok(SessionToken { cookie, crumb })
    }

    /// 미국 종목 시세를 조회합니다. 모든 단계가 실패하면 `None`.
    ///
    /// 성공 시 `news_1`에는 (번역된) 헤드라인 또는 등락 문구가,
    /// `news_2`에는 52주 범위 문구가 채워집니다.
    pub async fn fetch_quote(
        &self,
        ticker: &str,
        session: &SessionToken,
        log: &FetchLog,
    ) -> Option<Quote> {
        let scope = LogScope::Ticker(ticker, Market::Us);
        let resolved = FallbackChain::new(ticker, Market::Us)
            .tier("Chart+crumb", self.fetch_chart(ticker, Some(session)))
            .tier("No-crumb", self.fetch_chart(ticker, None))
            .run(log)
            .await?;

        let quote = resolved.value;
        if resolved.tier == 0 {
            log.ok(
                scope,
                format!(
                    "${:.2} ({}%)",
                    quote.current_price,
                    quote.price_change_pct.to_signed_string()
                ),
            );
        } else {
            log.ok(scope, format!("Fallback OK: ${:.2}", quote.current_price));
        }

        let headline = match &self.news {
            Some(news) => news.fetch_us_headline(ticker, session, log).await,
            None => None,
        };
        let news_1 = match (headline, &self.translator) {
            (Some(title), Some(translator)) => translator.translate(&title, ticker, log).await,
            (Some(title), None) => title,
            (None, _) => quote.movement_sentence(),
        };
        let news_2 = quote.week52_sentence();

        Some(quote.with_annotations(Some(news_1), news_2))
    }

    async fn fetch_chart(
        &self,
        ticker: &str,
        session: Option<&SessionToken>,
    ) -> ProviderResult<Quote> {
        let url = format!("{}/{}", self.endpoints.chart_base, ticker);
        let mut req = self
            .client
            .get(&url)
            .query(&[("interval", "1d"), ("range", "5d")])
            .header(ACCEPT, "application/json");
        if let Some(session) = session {
            req = req.query(&[("crumb", session.crumb.as_str())]);
            if !session.cookie.is_empty() {
                req = req.header(COOKIE, &session.cookie);
            }
        }

        let body: ChartResponse = ensure_success(req.send().await?).await?.json().await?;
        let meta = body
            .chart
            .and_then(|chart| chart.result)
            .and_then(|results| results.into_iter().next())
            .and_then(|result| result.meta)
            .ok_or_else(|| ProviderError::missing("No chart result in response"))?;

        meta.into_quote(ticker)
    }
}

/// `Set-Cookie` 헤더들에서 `name=value` 부분만 모아 `Cookie` 헤더 값을 만듭니다.
fn collect_cookies(headers: &HeaderMap) -> String {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect::<Vec<_>>()
        .join("; ")
}
