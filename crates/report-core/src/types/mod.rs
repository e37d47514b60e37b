//! 리포트 작업 전반에서 사용되는 공통 타입.

mod date;
mod decimal;
mod market;

pub use date::*;
pub use decimal::*;
pub use market::*;
