//! API 라우트.

pub mod health;
pub mod report;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName};
use axum::routing::{any, get};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::{require_secret_token, SECRET_TOKEN_HEADER};
use crate::state::AppState;

/// 전체 라우터를 생성합니다.
///
/// - `GET /health`: 인증 없음
/// - `/`, `/daily-report`: 모든 메서드, `x-secret-token` 필요 (OPTIONS 제외)
pub fn create_router(state: Arc<AppState>) -> Router {
    let report_routes = Router::new()
        .route("/", any(report::daily_report))
        .route("/daily-report", any(report::daily_report))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_secret_token,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(report_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// CORS 레이어. 브라우저 대시보드에서 호출할 수 있도록 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            HeaderName::from_static(SECRET_TOKEN_HEADER),
        ])
        .max_age(Duration::from_secs(3600))
}
