//! API 에러 타입과 응답.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use report_core::LogEntry;

/// API 에러.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 인증 실패
    #[error("Unauthorized")]
    Unauthorized,

    /// 설정 에러
    #[error("{0}")]
    Config(String),

    /// 리포트 실행 실패 (수집 로그 포함)
    #[error("{message}")]
    Run {
        message: String,
        logs: Vec<LogEntry>,
    },
}

/// 실패 응답 본문.
///
/// ```json
/// { "success": false, "error": "No stocks found", "logs": [...] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Unauthorized" })),
            )
                .into_response(),
            ApiError::Config(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    success: false,
                    error: message,
                    logs: Vec::new(),
                }),
            )
                .into_response(),
            ApiError::Run { message, logs } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    success: false,
                    error: message,
                    logs,
                }),
            )
                .into_response(),
        }
    }
}
