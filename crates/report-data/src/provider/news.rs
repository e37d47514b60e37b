//! 종목 뉴스 헤드라인 조회.
//!
//! 헤드라인은 부가 정보이므로 실패는 `warn`으로만 기록하고 `None`을 반환합니다.
//!
//! ## 데이터 소스
//! - 미국: Yahoo `/v2/finance/news` → `/v1/finance/search`
//! - 한국: 네이버 모바일 `/api/stock/{code}/news` → `finance.naver.com` 뉴스 목록 HTML

use reqwest::header::{ACCEPT, COOKIE, REFERER};
use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::Value;

use report_core::{FetchLog, LogScope, LogStatus, Market};

use super::fallback::FallbackChain;
use super::http::{ensure_success, truncate};
use super::yahoo::SessionToken;
use crate::error::{ProviderError, ProviderResult};

/// 조회할 뉴스 개수
const NEWS_COUNT: &str = "3";

/// 뉴스 엔드포인트 모음.
#[derive(Debug, Clone)]
pub struct NewsEndpoints {
    pub yahoo_news_url: String,
    pub yahoo_search_url: String,
    /// `{base}/{code}/news`
    pub naver_news_base: String,
    pub naver_html_url: String,
    pub naver_referer: String,
}

impl Default for NewsEndpoints {
    fn default() -> Self {
        Self {
            yahoo_news_url: "https://query2.finance.yahoo.com/v2/finance/news".to_string(),
            yahoo_search_url: "https://query1.finance.yahoo.com/v1/finance/search".to_string(),
            naver_news_base: "https://m.stock.naver.com/api/stock".to_string(),
            naver_html_url: "https://finance.naver.com/item/news_news.naver".to_string(),
            naver_referer: "https://finance.naver.com".to_string(),
        }
    }
}

impl NewsEndpoints {
    /// 모든 엔드포인트를 하나의 base URL 아래로 지정합니다 (테스트용 mock 서버).
    pub fn with_base(base: &str) -> Self {
        Self {
            yahoo_news_url: format!("{}/v2/finance/news", base),
            yahoo_search_url: format!("{}/v1/finance/search", base),
            naver_news_base: format!("{}/api/stock", base),
            naver_html_url: format!("{}/item/news_news.naver", base),
            naver_referer: base.to_string(),
        }
    }
}

/// 뉴스 헤드라인 클라이언트.
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    endpoints: NewsEndpoints,
}

impl NewsClient {
    pub fn new(client: Client, endpoints: NewsEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// 미국 종목의 최신 헤드라인을 조회합니다.
    pub async fn fetch_us_headline(
        &self,
        ticker: &str,
        session: &SessionToken,
        log: &FetchLog,
    ) -> Option<String> {
        let resolved = FallbackChain::new(ticker, Market::Us)
            .failure_status(LogStatus::Warn)
            .tier("News v2", self.yahoo_news(ticker, session))
            .tier("News search", self.yahoo_search(ticker, session))
            .run(log)
            .await?;

        log.ok(
            LogScope::Ticker(ticker, Market::Us),
            format!("News: {}", truncate(&resolved.value, 40)),
        );
        Some(resolved.value)
    }

    /// 국내 종목의 최신 헤드라인을 조회합니다.
    pub async fn fetch_kr_headline(&self, code: &str, log: &FetchLog) -> Option<String> {
        let resolved = FallbackChain::new(code, Market::Kr)
            .failure_status(LogStatus::Warn)
            .tier("Naver news", self.naver_news(code))
            .tier("Naver news HTML", self.naver_news_html(code))
            .run(log)
            .await?;

        log.ok(
            LogScope::Ticker(code, Market::Kr),
            format!("News: {}", truncate(&resolved.value, 40)),
        );
        Some(resolved.value)
    }

    async fn yahoo_news(&self, ticker: &str, session: &SessionToken) -> ProviderResult<String> {
        let mut req = self
            .client
            .get(&self.endpoints.yahoo_news_url)
            .query(&[
                ("symbols", ticker),
                ("count", NEWS_COUNT),
                ("crumb", session.crumb.as_str()),
            ])
            .header(ACCEPT, "application/json");
        if !session.cookie.is_empty() {
            req = req.header(COOKIE, &session.cookie);
        }

        let body: Value = ensure_success(req.send().await?).await?.json().await?;
        let items = body.pointer("/items/result").or_else(|| body.get("news"));
        first_title(items)
    }

    async fn yahoo_search(&self, ticker: &str, session: &SessionToken) -> ProviderResult<String> {
        let mut req = self
            .client
            .get(&self.endpoints.yahoo_search_url)
            .query(&[
                ("q", ticker),
                ("newsCount", NEWS_COUNT),
                ("quotesCount", "0"),
                ("crumb", session.crumb.as_str()),
            ])
            .header(ACCEPT, "application/json");
        if !session.cookie.is_empty() {
            req = req.header(COOKIE, &session.cookie);
        }

        let body: Value = ensure_success(req.send().await?).await?.json().await?;
        first_title(body.get("news"))
    }

    async fn naver_news(&self, code: &str) -> ProviderResult<String> {
        let url = format!("{}/{}/news", self.endpoints.naver_news_base, code);
        let resp = self
            .client
            .get(&url)
            .query(&[("pageSize", NEWS_COUNT), ("page", "1")])
            .header(ACCEPT, "application/json")
            .header(REFERER, &self.endpoints.naver_referer)
            .send()
            .await?;

        let body: Value = ensure_success(resp).await?.json().await?;
        let items = ["newsList", "list", "result"]
            .iter()
            .find_map(|key| body.get(*key).filter(|v| v.is_array()));
        first_title(items)
    }

    async fn naver_news_html(&self, code: &str) -> ProviderResult<String> {
        let resp = self
            .client
            .get(&self.endpoints.naver_html_url)
            .query(&[
                ("code", code),
                ("page", "1"),
                ("sm", "title_entity_id.basic"),
                ("clusterId", ""),
            ])
            .header(REFERER, &self.endpoints.naver_referer)
            .send()
            .await?;

        let html = ensure_success(resp).await?.text().await?;
        parse_news_title(&html)
    }
}

/// JSON 배열의 첫 항목에서 `title` 또는 `headline`을 꺼냅니다.
fn first_title(items: Option<&Value>) -> ProviderResult<String> {
    let first = items
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .ok_or_else(|| ProviderError::missing("No news items"))?;

    ["title", "headline"]
        .iter()
        .filter_map(|key| first.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|title| !title.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProviderError::missing("No title in news item"))
}

/// 네이버 뉴스 목록 HTML에서 첫 번째 제목을 추출합니다.
fn parse_news_title(html: &str) -> ProviderResult<String> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("td.title > a").map_err(|e| ProviderError::Parse(e.to_string()))?;

    document
        .select(&selector)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .find(|title| !title.is_empty())
        .ok_or_else(|| ProviderError::missing("No title in news HTML"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_title_prefers_title_then_headline() {
        let items = json!([{"title": "Apple hits record"}]);
        assert_eq!(first_title(Some(&items)).unwrap(), "Apple hits record");

        let items = json!([{"headline": "  Tesla recalls  "}]);
        assert_eq!(first_title(Some(&items)).unwrap(), "Tesla recalls");

        let items = json!([{"title": "", "headline": "Fallback headline"}]);
        assert_eq!(first_title(Some(&items)).unwrap(), "Fallback headline");
    }

    #[test]
    fn test_first_title_errors() {
        assert!(first_title(None).is_err());
        assert!(first_title(Some(&json!([]))).is_err());
        assert!(first_title(Some(&json!({"title": "x"}))).is_err());
        assert!(first_title(Some(&json!([{"title": ""}]))).is_err());
    }

    #[test]
    fn test_parse_news_title_from_html() {
        let html = r#"
            <table class="type5">
              <tr><td class="title"><a href="/a">  삼성전자, 3분기 실적 발표 </a></td><td class="info">연합뉴스</td></tr>
              <tr><td class="title"><a href="/b">두 번째 기사</a></td></tr>
            </table>"#;
        assert_eq!(parse_news_title(html).unwrap(), "삼성전자, 3분기 실적 발표");
    }

    #[test]
    fn test_parse_news_title_without_rows() {
        assert!(parse_news_title("<html><body><p>없음</p></body></html>").is_err());
    }
}
