//! 공유 비밀값 헤더 검증 미들웨어.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::state::AppState;

/// 인증 헤더 이름
pub const SECRET_TOKEN_HEADER: &str = "x-secret-token";

/// `x-secret-token` 헤더가 없거나 일치하지 않으면 401을 반환합니다.
///
/// OPTIONS(CORS preflight) 요청은 검사하지 않습니다.
pub async fn require_secret_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    let authorized = request
        .headers()
        .get(SECRET_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|token| state.verify_token(token));

    if !authorized {
        tracing::warn!(path = %request.uri().path(), "Unauthorized request");
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}
