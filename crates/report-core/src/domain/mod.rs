//! 리포트 도메인 모델.
//!
//! - `quote` - 종목별 일일 시세
//! - `watchlist` - 관심종목 메타데이터
//! - `signal` - 종목/시장 시그널 분류
//! - `report` - 스냅샷/요약 레코드
//! - `fetch_log` - 수집 로그

pub mod fetch_log;
pub mod quote;
pub mod report;
pub mod signal;
pub mod watchlist;

pub use fetch_log::*;
pub use quote::*;
pub use report::*;
pub use signal::*;
pub use watchlist::*;
