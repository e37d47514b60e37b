//! 네이버 시세/뉴스 조회 통합 테스트 (mockito).

use mockito::{Matcher, Server};
use report_core::{FetchLog, LogStatus, Market};
use report_data::{NaverClient, NaverEndpoints, NewsClient, NewsEndpoints};
use rust_decimal_macros::dec;

fn naver_client(server: &Server) -> NaverClient {
    NaverClient::new(reqwest::Client::new(), NaverEndpoints::with_base(&server.url()))
}

#[tokio::test]
async fn basic_endpoint_quote() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/stock/005930/basic")
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
              "stockName": "삼성전자",
              "closePrice": "71,500",
              "compareToPreviousClosePrice": "1,500",
              "fluctuationsRatio": "2.14",
              "high52wPrice": "88,800",
              "low52wPrice": "49,900",
              "accumulatedTradingVolume": "12,345,678"
            }"#,
        )
        .create_async()
        .await;

    let log = FetchLog::new();
    let quote = naver_client(&server).fetch_quote("005930", &log).await.unwrap();

    assert_eq!(quote.market, Market::Kr);
    assert_eq!(quote.current_price, dec!(71500));
    assert_eq!(quote.prev_close, dec!(70000));
    assert_eq!(quote.price_change, dec!(1500));
    assert_eq!(quote.price_change_pct, dec!(2.14));
    assert_eq!(quote.volume, 12_345_678);
    assert_eq!(quote.news_1.as_deref(), Some("전일 대비 +2.14% 상승"));
    assert_eq!(quote.news_2.as_deref(), Some("52주 범위: ₩49,900 ~ ₩88,800"));

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ticker, "005930");
    assert_eq!(entries[0].market, "KR");
    assert_eq!(entries[0].msg, "₩71,500 (+2.14%)");
}

#[tokio::test]
async fn zero_price_falls_back_to_polling() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/stock/000660/basic")
        .with_header("content-type", "application/json")
        .with_body(r#"{"closePrice": "0", "currentPrice": null}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/realtime/domestic/stock/000660")
        .with_header("content-type", "application/json")
        .with_body(r#"{"datas": [{"closePrice": "70,100", "basePrice": "71,000"}]}"#)
        .create_async()
        .await;

    let log = FetchLog::new();
    let quote = naver_client(&server).fetch_quote("000660", &log).await.unwrap();

    assert_eq!(quote.current_price, dec!(70100));
    assert_eq!(quote.prev_close, dec!(71000));
    assert_eq!(quote.price_change, dec!(-900));
    assert_eq!(quote.price_change_pct, dec!(-1.27));
    assert_eq!(quote.news_1.as_deref(), Some("전일 대비 -1.27% 하락"));
    assert_eq!(quote.news_2, None);

    let entries = log.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].status, LogStatus::Fail);
    assert_eq!(entries[0].msg, "Naver basic: Price is 0");
    assert_eq!(entries[1].status, LogStatus::Ok);
    assert_eq!(entries[1].msg, "Polling: ₩70,100");
}

#[tokio::test]
async fn polling_uses_now_val_when_close_missing() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/stock/035420/basic")
        .with_status(503)
        .create_async()
        .await;
    server
        .mock("GET", "/api/realtime/domestic/stock/035420")
        .with_header("content-type", "application/json")
        .with_body(r#"{"datas": [{"nowVal": 200000, "basePrice": "200,000"}]}"#)
        .create_async()
        .await;

    let quote = naver_client(&server)
        .fetch_quote("035420", &FetchLog::new())
        .await
        .unwrap();

    assert_eq!(quote.current_price, dec!(200000));
    assert_eq!(quote.price_change_pct, dec!(0));
    assert_eq!(quote.news_1.as_deref(), Some("전일 대비 0.00% 보합"));
}

#[tokio::test]
async fn polling_reads_quant_when_base_price_missing() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/stock/000660/basic")
        .with_status(503)
        .create_async()
        .await;
    server
        .mock("GET", "/api/realtime/domestic/stock/000660")
        .with_header("content-type", "application/json")
        .with_body(r#"{"datas": [{"closePrice": "70,100", "quant": "71,000"}]}"#)
        .create_async()
        .await;

    let quote = naver_client(&server)
        .fetch_quote("000660", &FetchLog::new())
        .await
        .unwrap();

    assert_eq!(quote.prev_close, dec!(71000));
    assert_eq!(quote.price_change_pct, dec!(-1.27));
}

#[tokio::test]
async fn out_of_range_basic_quote_falls_back_to_polling() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/stock/005930/basic")
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
              "closePrice": "79,228,162,514,264,337,593,543,950,335",
              "compareToPreviousClosePrice": "-79,228,162,514,264,337,593,543,950,335",
              "fluctuationsRatio": "1.00"
            }"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/realtime/domestic/stock/005930")
        .with_header("content-type", "application/json")
        .with_body(r#"{"datas": [{"closePrice": "71,500", "basePrice": "70,000"}]}"#)
        .create_async()
        .await;

    let log = FetchLog::new();
    let quote = naver_client(&server).fetch_quote("005930", &log).await.unwrap();

    assert_eq!(quote.current_price, dec!(71500));
    let failures = log.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].msg, "Naver basic: Parse error: price out of range");
}

#[tokio::test]
async fn both_tiers_failing_returns_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/stock/999999/basic")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", "/api/realtime/domestic/stock/999999")
        .with_header("content-type", "application/json")
        .with_body(r#"{"datas": []}"#)
        .create_async()
        .await;

    let log = FetchLog::new();
    let quote = naver_client(&server).fetch_quote("999999", &log).await;

    assert!(quote.is_none());
    let failures = log.failures();
    assert_eq!(failures.len(), 2);
    assert!(failures[0].msg.starts_with("Naver basic: HTTP 404"));
    assert_eq!(failures[1].msg, "Polling: No data in polling response");
}

#[tokio::test]
async fn headline_from_news_api() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/stock/005930/basic")
        .with_header("content-type", "application/json")
        .with_body(r#"{"closePrice": "71,500", "compareToPreviousClosePrice": "0", "fluctuationsRatio": "0.00"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/stock/005930/news")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("pageSize".into(), "3".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(r#"{"list": [{"title": "삼성전자, HBM 공급 확대"}]}"#)
        .create_async()
        .await;

    let http = reqwest::Client::new();
    let client = NaverClient::new(http.clone(), NaverEndpoints::with_base(&server.url()))
        .with_news(NewsClient::new(http, NewsEndpoints::with_base(&server.url())));

    let quote = client.fetch_quote("005930", &FetchLog::new()).await.unwrap();

    assert_eq!(quote.news_1.as_deref(), Some("삼성전자, HBM 공급 확대"));
}

#[tokio::test]
async fn headline_falls_back_to_html_list() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/stock/005930/basic")
        .with_header("content-type", "application/json")
        .with_body(r#"{"closePrice": "71,500", "compareToPreviousClosePrice": "500", "fluctuationsRatio": "0.70"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/stock/005930/news")
        .with_status(500)
        .create_async()
        .await;
    server
        .mock("GET", "/item/news_news.naver")
        .match_query(Matcher::UrlEncoded("code".into(), "005930".into()))
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(
            r#"<html><body><table class="type5"><tbody>
                <tr><td class="title"><a href="/item/news_read.naver?article_id=1">외국인 순매수 지속</a></td></tr>
              </tbody></table></body></html>"#,
        )
        .create_async()
        .await;

    let http = reqwest::Client::new();
    let client = NaverClient::new(http.clone(), NaverEndpoints::with_base(&server.url()))
        .with_news(NewsClient::new(http, NewsEndpoints::with_base(&server.url())));

    let log = FetchLog::new();
    let quote = client.fetch_quote("005930", &log).await.unwrap();

    assert_eq!(quote.news_1.as_deref(), Some("외국인 순매수 지속"));
    let warnings: Vec<_> = log
        .entries()
        .into_iter()
        .filter(|e| e.status == LogStatus::Warn)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].msg.starts_with("Naver news: HTTP 500"));
}

#[tokio::test]
#[ignore] // 실제 네트워크 테스트는 ignore
async fn live_samsung_quote() {
    let client = NaverClient::new(reqwest::Client::new(), NaverEndpoints::default());
    let log = FetchLog::new();

    match client.fetch_quote("005930", &log).await {
        Some(quote) => {
            println!("삼성전자: ₩{} ({}%)", quote.current_price, quote.price_change_pct);
            assert_eq!(quote.market, Market::Kr);
        }
        None => println!("조회 실패: {:?}", log.entries()),
    }
}
