//! 뉴스 헤드라인 한국어 번역.
//!
//! Anthropic Messages API를 호출합니다. API 키가 없거나 호출이 실패하면
//! 원문을 그대로 반환하므로 번역은 수집 결과에 영향을 주지 않습니다.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use report_core::{FetchLog, LogScope, Market};

use super::http::{ensure_success, truncate};
use crate::error::{ProviderError, ProviderResult};

/// 기본 번역 모델
pub const DEFAULT_TRANSLATION_MODEL: &str = "claude-haiku-4-5";

/// Messages API 엔드포인트
pub const DEFAULT_TRANSLATION_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// `anthropic-version` 헤더 값
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// 번역 설정.
#[derive(Debug)]
pub struct TranslatorConfig {
    /// API 키 (없으면 번역 생략)
    pub api_key: Option<SecretString>,
    /// 엔드포인트 URL
    pub endpoint: String,
    /// 모델 이름
    pub model: String,
    /// 최대 출력 토큰
    pub max_tokens: u32,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_TRANSLATION_ENDPOINT.to_string(),
            model: DEFAULT_TRANSLATION_MODEL.to_string(),
            max_tokens: 200,
        }
    }
}

impl TranslatorConfig {
    /// API 키를 지정합니다.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// 엔드포인트를 지정합니다.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<RequestMessage>,
}

#[derive(Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// 헤드라인 번역기.
#[derive(Debug)]
pub struct Translator {
    client: Client,
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(client: Client, config: TranslatorConfig) -> Self {
        Self { client, config }
    }

    /// 헤드라인을 한국어로 번역합니다. 어떤 실패든 원문을 반환합니다.
    pub async fn translate(&self, text: &str, ticker: &str, log: &FetchLog) -> String {
        let scope = LogScope::Ticker(ticker, Market::Us);
        let Some(api_key) = &self.config.api_key else {
            log.warn(scope, "ANTHROPIC_API_KEY not set, skipping translation");
            return text.to_string();
        };

        match self.request(text, api_key).await {
            Ok(translated) => {
                log.ok(scope, format!("Translated: {}", truncate(&translated, 40)));
                translated
            }
            Err(e) => {
                log.warn(scope, format!("Translation failed: {}", e));
                text.to_string()
            }
        }
    }

    async fn request(&self, text: &str, api_key: &SecretString) -> ProviderResult<String> {
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![RequestMessage {
                role: "user",
                content: translation_prompt(text),
            }],
        };

        let resp = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;
        let parsed: MessagesResponse = ensure_success(resp).await?.json().await?;

        parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProviderError::missing("No text in translation response"))
    }
}

fn translation_prompt(text: &str) -> String {
    format!(
        "다음 금융 뉴스 제목을 자연스러운 한국어로 번역해줘. 번역문만 출력하고 다른 말은 하지 마.\n\n\"{}\"",
        text
    )
}
