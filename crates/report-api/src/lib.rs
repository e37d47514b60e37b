//! 일일 리포트 HTTP 엔트리 포인트.
//!
//! 단일 엔드포인트로 일일 리포트 실행(`/`, `/daily-report`)과
//! 단일 종목 테스트(`?test=<ticker>`)를 제공합니다.
//! 모든 요청(OPTIONS 제외)은 `x-secret-token` 헤더 검증을 거칩니다.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ApiConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use server::serve;
pub use state::AppState;
