//! # Report Core
//!
//! 일일 포트폴리오 리포트 작업의 핵심 도메인 모델과 분석 엔진을 제공합니다.
//!
//! 이 크레이트는 리포트 작업 전반에서 사용되는 기본 타입을 제공합니다:
//! - 시장 구분 및 Decimal 유틸리티
//! - 시세(Quote), 관심종목(WatchEntry), 시그널 타입
//! - 스냅샷/요약 레코드
//! - 수집 로그 (fetch log)
//! - 분석 엔진 (시그널, 섹터 추세, 인사이트)
//! - 로깅 인프라

pub mod analysis;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
