//! 리포트 도메인 에러 타입.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// 잘못된 입력 (알 수 없는 시장 코드 등)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}
