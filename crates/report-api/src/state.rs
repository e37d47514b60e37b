//! 애플리케이션 상태.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use report_collector::modules::ReportStore;
use report_data::QuoteProvider;

/// 핸들러 간에 공유되는 상태.
pub struct AppState {
    /// 요청 인증용 공유 비밀값
    secret_token: SecretString,
    /// 시세 Provider (미국 세션은 프로세스 수명 동안 재사용)
    pub provider: Arc<dyn QuoteProvider>,
    /// 리포트 저장소 (DATABASE_URL이 없으면 None)
    pub store: Option<Arc<dyn ReportStore>>,
    /// API 버전
    pub version: String,
    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        secret_token: SecretString,
        provider: Arc<dyn QuoteProvider>,
        store: Option<Arc<dyn ReportStore>>,
    ) -> Self {
        Self {
            secret_token,
            provider,
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 요청 헤더 값이 공유 비밀값과 일치하는지 확인합니다.
    pub fn verify_token(&self, candidate: &str) -> bool {
        let expected = self.secret_token.expose_secret().as_bytes();
        let candidate = candidate.as_bytes();
        // 길이가 같을 때 모든 바이트를 비교
        expected.len() == candidate.len()
            && expected
                .iter()
                .zip(candidate)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }

    /// 서버 업타임(초)
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
