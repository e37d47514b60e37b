//! 에러 타입 정의.

use report_data::ProviderError;
use thiserror::Error;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 데이터베이스 에러
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 관심종목 없음
    #[error("No stocks found")]
    EmptyWatchlist,

    /// 저장소 에러 (잘못된 행, 마이그레이션 실패 등)
    #[error("Store error: {0}")]
    Store(String),

    /// 데이터 소스 에러
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
