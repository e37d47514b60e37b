//! 리포트 수집 모듈.

pub mod daily_report;
pub mod store;

pub use daily_report::{
    build_summary, run_daily_report, run_single_ticker, DailyReport, ReportOptions,
};
pub use store::{MemoryReportStore, PgReportStore, ReportStore};
