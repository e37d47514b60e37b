//! API 서버 설정.

use std::net::SocketAddr;

use report_collector::config::{env_var_non_empty, env_var_parse};
use secrecy::SecretString;

use crate::error::ApiError;

/// 서버 설정 구조체.
#[derive(Debug)]
pub struct ApiConfig {
    /// 바인딩할 호스트 주소
    pub host: String,
    /// 바인딩할 포트
    pub port: u16,
    /// 요청 인증용 공유 비밀값 (`x-secret-token`)
    pub secret_token: SecretString,
}

impl ApiConfig {
    /// 환경변수에서 설정을 로드합니다.
    ///
    /// - `API_HOST` (기본: 127.0.0.1)
    /// - `API_PORT` (기본: 3000)
    /// - `REPORT_SECRET_TOKEN` (필수)
    pub fn from_env() -> Result<Self, ApiError> {
        let secret_token = env_var_non_empty("REPORT_SECRET_TOKEN").ok_or_else(|| {
            ApiError::Config("REPORT_SECRET_TOKEN 환경변수가 설정되지 않았습니다".to_string())
        })?;

        Ok(Self {
            host: env_var_non_empty("API_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: env_var_parse("API_PORT", 3000),
            secret_token: SecretString::new(secret_token.into_boxed_str()),
        })
    }

    /// 바인딩 주소
    pub fn socket_addr(&self) -> Result<SocketAddr, ApiError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ApiError::Config(format!("잘못된 바인딩 주소: {}", e)))
    }
}
