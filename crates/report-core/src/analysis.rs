//! 분석 엔진.
//!
//! 조회된 시세와 관심종목 메타데이터로 종목 시그널, 섹터 추세,
//! 인사이트 요약, 종합 시그널을 계산합니다. 모든 함수는 순수 함수입니다.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{
    find_entry, InsightDigest, Mover, OverallSignal, PriceChange, SectorTrend, SectorTrends,
    Signal, TrendLabel, WatchEntry,
};
use crate::types::{DecimalExt, Percentage};

/// 상승/하락 상위 종목 수
pub const TOP_MOVERS: usize = 3;

/// 등락률로 종목 시그널을 분류합니다.
pub fn classify_signal(pct: Percentage) -> Signal {
    Signal::classify(pct)
}

/// 섹터별 평균 등락률과 추세 라벨을 계산합니다.
///
/// 관심종목에 없는 티커는 건너뜁니다. 라벨은 반올림 전 평균으로 정합니다.
pub fn sector_trends<T: PriceChange>(rows: &[T], watchlist: &[WatchEntry]) -> SectorTrends {
    let mut grouped: BTreeMap<String, Vec<Percentage>> = BTreeMap::new();

    for row in rows {
        let Some(entry) = find_entry(watchlist, row.ticker()) else {
            continue;
        };
        grouped
            .entry(entry.sector.clone())
            .or_default()
            .push(row.price_change_pct());
    }

    grouped
        .into_iter()
        .map(|(sector, pcts)| {
            let avg = saturating_sum(pcts.iter().copied()) / Decimal::from(pcts.len());
            let trend = SectorTrend {
                trend: TrendLabel::from_average(avg),
                avg: avg.round_pct(),
            };
            (sector, trend)
        })
        .collect()
}

/// 상승/하락 상위 종목과 최고/최저 섹터를 요약합니다.
pub fn insight_digest<T: PriceChange>(rows: &[T], watchlist: &[WatchEntry]) -> InsightDigest {
    let mut movers: Vec<Mover> = rows
        .iter()
        .map(|row| Mover {
            ticker: row.ticker().to_string(),
            company: find_entry(watchlist, row.ticker()).map(|e| e.company_name.clone()),
            change: row.price_change_pct(),
        })
        .collect();

    // 등락률 내림차순 (동률은 입력 순서 유지)
    movers.sort_by(|a, b| b.change.cmp(&a.change));

    let top_gainers: Vec<Mover> = movers
        .iter()
        .take(TOP_MOVERS)
        .filter(|m| m.change > Decimal::ZERO)
        .cloned()
        .collect();

    let top_losers: Vec<Mover> = movers
        .iter()
        .skip(movers.len().saturating_sub(TOP_MOVERS))
        .filter(|m| m.change < Decimal::ZERO)
        .cloned()
        .collect();

    let trends = sector_trends(rows, watchlist);

    InsightDigest {
        top_gainers,
        top_losers,
        sector_leaders: extreme_sector(&trends, Ordering::Greater)
            .map(format_sector)
            .unwrap_or_default(),
        sector_laggards: extreme_sector(&trends, Ordering::Less)
            .map(format_sector)
            .unwrap_or_default(),
    }
}

/// 시장 평균 등락률.
///
/// 분모는 해당 시장의 관심종목 수입니다 (조회 성공 수가 아님, 최소 1).
pub fn market_average<T: PriceChange>(rows: &[T], side: &[&WatchEntry]) -> Percentage {
    let sum = saturating_sum(
        rows.iter()
            .filter(|row| side.iter().any(|e| e.ticker == row.ticker()))
            .map(|row| row.price_change_pct()),
    );
    sum / Decimal::from(side.len().max(1))
}

/// 미국/한국 시장 평균으로 종합 시그널을 정합니다.
pub fn overall_signal(us_avg: Percentage, kr_avg: Percentage) -> OverallSignal {
    OverallSignal::from_market_averages(us_avg, kr_avg)
}

/// Decimal 범위를 넘으면 최대/최소값에서 멈추는 합계
fn saturating_sum(values: impl Iterator<Item = Percentage>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// 평균이 가장 크거나(Greater) 작은(Less) 섹터. 동률이면 먼저 나온 섹터.
fn extreme_sector(trends: &SectorTrends, wanted: Ordering) -> Option<(&String, &SectorTrend)> {
    trends.iter().reduce(|best, current| {
        if current.1.avg.cmp(&best.1.avg) == wanted {
            current
        } else {
            best
        }
    })
}

fn format_sector((sector, trend): (&String, &SectorTrend)) -> String {
    format!("{} ({}%)", sector, trend.avg.to_signed_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quote;
    use crate::types::Market;
    use rust_decimal_macros::dec;

    fn quote(ticker: &str, pct: Decimal) -> Quote {
        let mut q = Quote::from_prices(ticker, Market::Us, dec!(100), dec!(100)).unwrap();
        q.price_change_pct = pct;
        q
    }

    fn watchlist() -> Vec<WatchEntry> {
        vec![
            WatchEntry::new("AAPL", Market::Us, "Apple", "Tech"),
            WatchEntry::new("MSFT", Market::Us, "Microsoft", "Tech"),
            WatchEntry::new("XOM", Market::Us, "Exxon", "Energy"),
            WatchEntry::new("005930", Market::Kr, "삼성전자", "반도체"),
        ]
    }

    #[test]
    fn test_sector_trends_average_and_label() {
        let rows = vec![quote("AAPL", dec!(2)), quote("MSFT", dec!(0.02)), quote("XOM", dec!(-1.5))];
        let trends = sector_trends(&rows, &watchlist());

        let tech = &trends["Tech"];
        assert_eq!(tech.avg, dec!(1.01));
        assert_eq!(tech.trend, TrendLabel::Strong);

        let energy = &trends["Energy"];
        assert_eq!(energy.avg, dec!(-1.5));
        assert_eq!(energy.trend, TrendLabel::Weak);
        assert!(!trends.contains_key("반도체"));
    }

    #[test]
    fn test_sector_trends_skips_unknown_tickers() {
        let rows = vec![quote("TSLA", dec!(10)), quote("AAPL", dec!(1))];
        let trends = sector_trends(&rows, &watchlist());
        assert_eq!(trends.len(), 1);
        assert_eq!(trends["Tech"].avg, dec!(1));
        assert_eq!(trends["Tech"].trend, TrendLabel::Mixed);
    }

    #[test]
    fn test_insight_digest_gainers_and_losers() {
        let rows = vec![
            quote("AAPL", dec!(2.5)),
            quote("MSFT", dec!(-0.5)),
            quote("XOM", dec!(-3.2)),
            quote("005930", dec!(1.1)),
        ];
        let digest = insight_digest(&rows, &watchlist());

        let gainers: Vec<&str> = digest.top_gainers.iter().map(|m| m.ticker.as_str()).collect();
        assert_eq!(gainers, vec!["AAPL", "005930"]);
        assert_eq!(digest.top_gainers[0].company.as_deref(), Some("Apple"));

        let losers: Vec<&str> = digest.top_losers.iter().map(|m| m.ticker.as_str()).collect();
        assert_eq!(losers, vec!["MSFT", "XOM"]);

        assert_eq!(digest.sector_leaders, "반도체 (+1.10%)");
        assert_eq!(digest.sector_laggards, "Energy (-3.20%)");
    }

    #[test]
    fn test_insight_digest_empty() {
        let rows: Vec<Quote> = Vec::new();
        let digest = insight_digest(&rows, &watchlist());
        assert!(digest.top_gainers.is_empty());
        assert!(digest.top_losers.is_empty());
        assert_eq!(digest.sector_leaders, "");
        assert_eq!(digest.sector_laggards, "");
    }

    #[test]
    fn test_market_average_uses_watchlist_divisor() {
        let list = watchlist();
        let us: Vec<&WatchEntry> = list.iter().filter(|e| e.market == Market::Us).collect();
        // 3종목 중 2종목만 성공
        let rows = vec![quote("AAPL", dec!(3)), quote("MSFT", dec!(3))];
        assert_eq!(market_average(&rows, &us), dec!(2));
    }

    #[test]
    fn test_market_average_empty_side_is_zero() {
        let rows = vec![quote("AAPL", dec!(3))];
        assert_eq!(market_average(&rows, &[]), Decimal::ZERO);
        assert_eq!(overall_signal(dec!(3), market_average(&rows, &[])), OverallSignal::Bullish);
    }

    #[test]
    fn test_extreme_changes_do_not_overflow_averages() {
        let rows = vec![quote("A", Decimal::MAX), quote("B", Decimal::MAX)];
        let watchlist = vec![
            WatchEntry::new("A", Market::Us, "A Corp", "Tech"),
            WatchEntry::new("B", Market::Us, "B Corp", "Tech"),
        ];
        let side: Vec<&WatchEntry> = watchlist.iter().collect();

        assert_eq!(market_average(&rows, &side), Decimal::MAX / dec!(2));
        assert_eq!(sector_trends(&rows, &watchlist)["Tech"].trend, TrendLabel::Strong);
    }

    #[test]
    fn test_round_trip_price_to_signal() {
        let q = Quote::from_prices("AAPL", Market::Us, dec!(100), dec!(95)).unwrap();
        assert_eq!(q.price_change, dec!(5));
        assert_eq!(q.price_change_pct, dec!(5.26));
        assert_eq!(classify_signal(q.price_change_pct), Signal::Positive);
    }
}
