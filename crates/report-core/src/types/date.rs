//! 리포트 기준일 계산.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Asia::Seoul;

/// 주어진 시각의 KST(UTC+9) 기준 날짜를 반환합니다.
pub fn report_date_kst(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Seoul).date_naive()
}

/// 오늘의 리포트 기준일 (KST).
pub fn today_kst() -> NaiveDate {
    report_date_kst(Utc::now())
}
