//! 일일 시장 리포트 수집기.
//!
//! 이 crate는 다음을 제공합니다:
//! - 관심종목 전체 동시 조회 (부분 실패 허용)
//! - 섹터/시장 분석 결과를 담은 일일 리포트 생성
//! - 날짜 단위 delete-then-insert 저장 (`ReportStore`)
//! - 단일 종목 테스트 조회
//! - CLI 바이너리 (`run`, `test`, `daemon`, `migrate`)

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use stats::CollectionStats;
