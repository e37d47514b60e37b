//! 네이버 금융 국내 주식 시세.
//!
//! ## 데이터 소스
//! - `m.stock.naver.com/api/stock/{code}/basic`: 현재가, 전일대비, 등락률, 52주 고저
//! - `polling.finance.naver.com/api/realtime/domestic/stock/{code}`: 실시간 폴링 (fallback)
//!
//! 숫자 필드는 `"71,500"` 형식의 문자열입니다.

use reqwest::header::{ACCEPT, REFERER};
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

use report_core::{DecimalExt, FetchLog, LogScope, Market, Quote};

use super::fallback::FallbackChain;
use super::http::ensure_success;
use super::news::NewsClient;
use super::parse::{first_nonzero, parse_kr_number};
use crate::error::{ProviderError, ProviderResult};

/// 네이버 엔드포인트 모음.
#[derive(Debug, Clone)]
pub struct NaverEndpoints {
    /// `{base}/{code}/basic`
    pub basic_base: String,
    /// `{base}/{code}`
    pub polling_base: String,
    pub referer: String,
}

impl Default for NaverEndpoints {
    fn default() -> Self {
        Self {
            basic_base: "https://m.stock.naver.com/api/stock".to_string(),
            polling_base: "https://polling.finance.naver.com/api/realtime/domestic/stock"
                .to_string(),
            referer: "https://m.stock.naver.com".to_string(),
        }
    }
}

impl NaverEndpoints {
    /// 모든 엔드포인트를 하나의 base URL 아래로 지정합니다 (테스트용 mock 서버).
    pub fn with_base(base: &str) -> Self {
        Self {
            basic_base: format!("{}/api/stock", base),
            polling_base: format!("{}/api/realtime/domestic/stock", base),
            referer: base.to_string(),
        }
    }
}

/// 네이버 금융 클라이언트.
#[derive(Debug, Clone)]
pub struct NaverClient {
    client: Client,
    endpoints: NaverEndpoints,
    news: Option<NewsClient>,
}

impl NaverClient {
    pub fn new(client: Client, endpoints: NaverEndpoints) -> Self {
        Self {
            client,
            endpoints,
            news: None,
        }
    }

    /// 헤드라인 조회를 활성화합니다.
    pub fn with_news(mut self, news: NewsClient) -> Self {
        self.news = Some(news);
        self
    }

    /// 국내 종목 시세를 조회합니다. 모든 단계가 실패하면 `None`.
    pub async fn fetch_quote(&self, code: &str, log: &FetchLog) -> Option<Quote> {
        let scope = LogScope::Ticker(code, Market::Kr);
        let resolved = FallbackChain::new(code, Market::Kr)
            .tier("Naver basic", self.fetch_basic(code))
            .tier("Polling", self.fetch_polling(code))
            .run(log)
            .await?;

        let quote = resolved.value;
        if resolved.tier == 0 {
            log.ok(
                scope,
                format!(
                    "₩{} ({}%)",
                    quote.current_price.to_grouped_string(),
                    quote.price_change_pct.to_signed_string()
                ),
            );
        } else {
            log.ok(
                scope,
                format!("Polling: ₩{}", quote.current_price.to_grouped_string()),
            );
        }

        let headline = match &self.news {
            Some(news) => news.fetch_kr_headline(code, log).await,
            None => None,
        };
        let news_1 = headline.unwrap_or_else(|| quote.movement_sentence());
        let news_2 = quote.week52_sentence();

        Some(quote.with_annotations(Some(news_1), news_2))
    }

    async fn fetch_basic(&self, code: &str) -> ProviderResult<Quote> {
        let url = format!("{}/{}/basic", self.endpoints.basic_base, code);
        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(REFERER, &self.endpoints.referer)
            .send()
            .await?;
        let body: Value = ensure_success(resp).await?.json().await?;

        let price = first_nonzero(&body, &["closePrice", "currentPrice"]);
        if price.is_zero() {
            return Err(ProviderError::missing("Price is 0"));
        }
        let change = parse_kr_number(body.get("compareToPreviousClosePrice"));
        let pct = parse_kr_number(body.get("fluctuationsRatio"));
        let volume = parse_kr_number(body.get("accumulatedTradingVolume"))
            .to_i64()
            .unwrap_or(0);

        let quote = Quote::from_reported_change(code, Market::Kr, price, change, pct)
            .ok_or_else(ProviderError::out_of_range)?;
        Ok(quote
            .with_week52(
                parse_kr_number(body.get("high52wPrice")),
                parse_kr_number(body.get("low52wPrice")),
            )
            .with_volume(volume))
    }

    async fn fetch_polling(&self, code: &str) -> ProviderResult<Quote> {
        let url = format!("{}/{}", self.endpoints.polling_base, code);
        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(REFERER, &self.endpoints.referer)
            .send()
            .await?;
        let body: Value = ensure_success(resp).await?.json().await?;

        let item = body
            .get("datas")
            .and_then(Value::as_array)
            .and_then(|datas| datas.first())
            .ok_or_else(|| ProviderError::missing("No data in polling response"))?;

        let price = first_nonzero(item, &["closePrice", "nowVal"]);
        let prev_close = first_nonzero(item, &["basePrice", "quant"]);

        Quote::from_prices(code, Market::Kr, price, prev_close).ok_or_else(ProviderError::out_of_range)
    }
}
