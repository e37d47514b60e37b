//! 환경변수 기반 설정 모듈.

use std::time::Duration;

use report_data::provider::translate::DEFAULT_TRANSLATION_MODEL;
use report_data::{ProviderSettings, TranslatorConfig};
use secrecy::{ExposeSecret, SecretString};

use crate::error::CollectorError;
use crate::Result;

/// Collector 전체 설정
#[derive(Debug)]
pub struct CollectorConfig {
    /// 데이터베이스 URL (배치 모드에서 필수)
    pub database_url: Option<String>,
    /// 외부 데이터 조회 설정
    pub fetch: FetchConfig,
    /// 데몬 모드 설정
    pub daemon: DaemonConfig,
}

/// 외부 데이터 조회 설정
#[derive(Debug)]
pub struct FetchConfig {
    /// 요청 타임아웃 (초)
    pub http_timeout_secs: u64,
    /// 국내 종목 헤드라인 조회 여부
    pub kr_news_enabled: bool,
    /// 번역 모델
    pub translation_model: String,
    /// 번역 API 키 (없으면 번역 생략)
    pub anthropic_api_key: Option<SecretString>,
}

/// 데몬 모드 설정
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// 리포트 실행 주기 (분 단위)
    pub interval_minutes: u64,
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let http_timeout_secs = env_var_parse("HTTP_TIMEOUT_SECS", 15u64);
        if http_timeout_secs == 0 {
            return Err(CollectorError::Config(
                "HTTP_TIMEOUT_SECS는 0보다 커야 합니다".to_string(),
            ));
        }

        let interval_minutes = env_var_parse("DAEMON_INTERVAL_MINUTES", 1440u64);
        if interval_minutes == 0 {
            return Err(CollectorError::Config(
                "DAEMON_INTERVAL_MINUTES는 0보다 커야 합니다".to_string(),
            ));
        }

        Ok(Self {
            database_url: env_var_non_empty("DATABASE_URL"),
            fetch: FetchConfig {
                http_timeout_secs,
                kr_news_enabled: env_var_bool("KR_NEWS_ENABLED", true),
                translation_model: env_var_non_empty("TRANSLATION_MODEL")
                    .unwrap_or_else(|| DEFAULT_TRANSLATION_MODEL.to_string()),
                anthropic_api_key: env_var_non_empty("ANTHROPIC_API_KEY")
                    .map(|key| SecretString::new(key.into_boxed_str())),
            },
            daemon: DaemonConfig { interval_minutes },
        })
    }

    /// 데이터베이스 URL (없으면 설정 에러)
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url.as_deref().ok_or_else(|| {
            CollectorError::Config("DATABASE_URL 환경변수가 설정되지 않았습니다".to_string())
        })
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: 15,
            kr_news_enabled: true,
            translation_model: DEFAULT_TRANSLATION_MODEL.to_string(),
            anthropic_api_key: None,
        }
    }
}

impl FetchConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Provider 구성을 생성합니다.
    pub fn provider_settings(&self) -> ProviderSettings {
        let mut translator = TranslatorConfig {
            model: self.translation_model.clone(),
            ..TranslatorConfig::default()
        };
        if let Some(key) = &self.anthropic_api_key {
            translator = translator.with_api_key(key.expose_secret());
        }

        ProviderSettings {
            timeout: self.http_timeout(),
            kr_news_enabled: self.kr_news_enabled,
            translator,
            ..ProviderSettings::default()
        }
    }
}

impl DaemonConfig {
    /// 리포트 실행 주기를 Duration으로 반환
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
pub fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// 환경변수에서 bool 값 파싱
pub fn env_var_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}

/// 비어 있지 않은 환경변수 값
pub fn env_var_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
