//! 분석 엔진 속성 테스트

use proptest::prelude::*;
use report_core::analysis::{insight_digest, market_average, overall_signal, sector_trends};
use report_core::{DecimalExt, Market, OverallSignal, Quote, Signal, TrendLabel, WatchEntry};
use rust_decimal::Decimal;

const SECTORS: [&str; 3] = ["Tech", "Energy", "반도체"];

fn pct_strategy() -> impl Strategy<Value = Decimal> {
    // -20.00% ~ +20.00%
    (-2000i64..=2000).prop_map(|v| Decimal::new(v, 2))
}

fn build(pcts: &[Decimal]) -> (Vec<Quote>, Vec<WatchEntry>) {
    let mut quotes = Vec::new();
    let mut watchlist = Vec::new();
    for (idx, pct) in pcts.iter().enumerate() {
        let ticker = format!("T{}", idx);
        let mut quote = Quote::from_prices(&ticker, Market::Us, Decimal::ONE_HUNDRED, Decimal::ONE_HUNDRED)
            .unwrap();
        quote.price_change_pct = *pct;
        quotes.push(quote);
        watchlist.push(WatchEntry::new(&ticker, Market::Us, format!("Company {}", idx), SECTORS[idx % 3]));
    }
    (quotes, watchlist)
}

proptest! {
    #[test]
    fn signal_buckets_partition_the_line(v in -100_000i64..=100_000) {
        let pct = Decimal::new(v, 3);
        let expected = if pct > Decimal::from(3) {
            Signal::Positive
        } else if pct >= Decimal::from(-1) {
            Signal::Hold
        } else if pct >= Decimal::from(-3) {
            Signal::Watch
        } else {
            Signal::Caution
        };
        prop_assert_eq!(Signal::classify(pct), expected);
    }

    #[test]
    fn digest_movers_respect_sign(pcts in prop::collection::vec(pct_strategy(), 0..12)) {
        let (quotes, watchlist) = build(&pcts);
        let digest = insight_digest(&quotes, &watchlist);

        prop_assert!(digest.top_gainers.len() <= 3);
        prop_assert!(digest.top_losers.len() <= 3);
        prop_assert!(digest.top_gainers.iter().all(|m| m.change > Decimal::ZERO));
        prop_assert!(digest.top_losers.iter().all(|m| m.change < Decimal::ZERO));

        // 정렬한 사본의 상위 3개 중 상승 종목, 하위 3개 중 하락 종목과 일치해야 함
        let mut sorted = pcts.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        let expected_gainers: Vec<Decimal> = sorted
            .iter()
            .take(3)
            .copied()
            .filter(|pct| *pct > Decimal::ZERO)
            .collect();
        let expected_losers: Vec<Decimal> = sorted[sorted.len().saturating_sub(3)..]
            .iter()
            .copied()
            .filter(|pct| *pct < Decimal::ZERO)
            .collect();

        let gainers: Vec<Decimal> = digest.top_gainers.iter().map(|m| m.change).collect();
        let losers: Vec<Decimal> = digest.top_losers.iter().map(|m| m.change).collect();
        prop_assert_eq!(gainers, expected_gainers);
        prop_assert_eq!(losers, expected_losers);

        let positives = pcts.iter().filter(|pct| **pct > Decimal::ZERO).count();
        let negatives = pcts.iter().filter(|pct| **pct < Decimal::ZERO).count();
        prop_assert_eq!(digest.top_gainers.len(), positives.min(3));
        prop_assert_eq!(digest.top_losers.len(), negatives.min(3));
    }

    #[test]
    fn sector_average_is_rounded_mean(pcts in prop::collection::vec(pct_strategy(), 1..12)) {
        let (quotes, watchlist) = build(&pcts);
        let trends = sector_trends(&quotes, &watchlist);

        for (sector_idx, sector) in SECTORS.iter().enumerate() {
            let members: Vec<Decimal> = pcts
                .iter()
                .enumerate()
                .filter(|(idx, _)| idx % 3 == sector_idx)
                .map(|(_, pct)| *pct)
                .collect();
            if members.is_empty() {
                prop_assert!(!trends.contains_key(*sector));
                continue;
            }
            let mean = members.iter().copied().sum::<Decimal>() / Decimal::from(members.len());
            let trend = &trends[*sector];
            prop_assert_eq!(trend.avg, mean.round_pct());
            prop_assert_eq!(trend.trend, TrendLabel::from_average(mean));
        }
    }
}

#[test]
fn empty_kr_side_counts_as_zero() {
    let (quotes, watchlist) = build(&[Decimal::from(4)]);
    let us: Vec<&WatchEntry> = watchlist.iter().collect();
    let kr: Vec<&WatchEntry> = Vec::new();

    let us_avg = market_average(&quotes, &us);
    let kr_avg = market_average(&quotes, &kr);

    assert_eq!(kr_avg, Decimal::ZERO);
    assert_eq!(overall_signal(us_avg, kr_avg), OverallSignal::Bullish);
}
