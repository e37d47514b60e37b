//! 공용 HTTP 클라이언트 설정.

use std::time::Duration;

use reqwest::{Client, Response};

use crate::error::{ProviderError, ProviderResult};

/// 브라우저 User-Agent (Yahoo/네이버 모두 봇 요청을 차단함)
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// 기본 요청 타임아웃
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// 오류 메시지에 포함할 응답 본문 최대 길이 (문자 수)
const ERROR_BODY_CHARS: usize = 150;

/// 공용 HTTP 클라이언트를 생성합니다.
pub fn build_client(timeout: Duration) -> ProviderResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(ProviderError::Http)
}

/// 2xx가 아닌 응답을 본문 앞부분이 담긴 오류로 변환합니다.
pub async fn ensure_success(resp: Response) -> ProviderResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body: truncate(body.trim(), ERROR_BODY_CHARS),
    })
}

/// 문자 경계를 지키며 문자열을 자릅니다.
pub fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("삼성전자 실적 발표", 4), "삼성전자");
        assert_eq!(truncate("abc", 10), "abc");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(DEFAULT_TIMEOUT).is_ok());
    }
}
