//! Provider 오류 타입.

use thiserror::Error;

/// 외부 데이터 소스 호출 오류.
///
/// 메시지는 수집 로그에 그대로 기록되므로 짧게 유지합니다.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 네트워크/HTTP 클라이언트 오류
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// 2xx가 아닌 응답
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// 응답에 필요한 데이터가 없음
    #[error("{0}")]
    MissingData(String),

    /// 세션(cookie/crumb) 획득 실패
    #[error("{0}")]
    InvalidSession(String),

    /// 파싱 실패
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    /// 데이터 누락 오류를 생성합니다.
    pub fn missing(msg: impl Into<String>) -> Self {
        ProviderError::MissingData(msg.into())
    }

    /// 등락 계산이 Decimal 범위를 벗어난 응답.
    pub fn out_of_range() -> Self {
        ProviderError::Parse("price out of range".to_string())
    }
}

/// Provider 작업을 위한 Result 타입.
pub type ProviderResult<T> = Result<T, ProviderError>;
