//! The optimizer must agree with two independent oracles: a plain
//! full-table DP (no double-buffering, float sentinels) and, for tiny
//! inputs, exhaustive enumeration of every legal action sequence.
//!
//! Prices and fees are integer-valued so every comparison is exact.

use proptest::prelude::*;
use trade_dp::{evaluate, ConstraintConfig, PriceSeries, TransactionCap};

/// Reference tabulation over the full state space, one row per day,
/// unreachable states as `f64::NEG_INFINITY`.
fn full_table_profit(prices: &[f64], cap: Option<usize>, cooldown: usize, fee: f64) -> f64 {
    let n = prices.len();
    if n < 2 {
        return 0.0;
    }
    let k = cap.unwrap_or(n / 2).min(n / 2).max(1);
    let neg = f64::NEG_INFINITY;

    let mut hold = vec![neg; k + 1];
    let mut rest = vec![neg; k + 1];
    let mut cool = vec![vec![neg; cooldown + 1]; k + 1];
    rest[0] = 0.0;
    hold[1] = -prices[0];

    for &p in &prices[1..] {
        let prev_hold = hold.clone();
        let prev_rest = rest.clone();
        let prev_cool = cool.clone();
        for t in 1..=k {
            hold[t] = prev_hold[t].max(prev_rest[t - 1] - p);
        }
        for t in 0..=k {
            let sale = prev_hold[t] + p - fee;
            let arrival = if cooldown == 0 { sale } else { prev_cool[t][1] };
            rest[t] = prev_rest[t].max(arrival);
            for d in 1..cooldown {
                cool[t][d] = prev_cool[t][d + 1];
            }
            if cooldown > 0 {
                cool[t][cooldown] = sale;
            }
        }
    }

    let mut best = 0.0f64;
    for t in 0..=k {
        best = best.max(rest[t]);
        for d in 1..=cooldown {
            best = best.max(cool[t][d]);
        }
    }
    best
}

/// Try every legal action sequence (wait/buy/sell per day). Exponential;
/// only usable for very short series.
fn exhaustive_profit(prices: &[f64], cap: Option<usize>, cooldown: usize, fee: f64) -> f64 {
    struct Instance<'a> {
        prices: &'a [f64],
        cap: Option<usize>,
        cooldown: usize,
        fee: f64,
    }

    fn go(ix: &Instance, day: usize, holding: bool, done: usize, frozen: usize, profit: f64) -> f64 {
        if day == ix.prices.len() {
            // A schedule still holding stock is not a valid terminal.
            return if holding { f64::NEG_INFINITY } else { profit };
        }
        let p = ix.prices[day];
        let mut best = go(ix, day + 1, holding, done, frozen.saturating_sub(1), profit);
        if holding {
            let sold = go(ix, day + 1, false, done + 1, ix.cooldown, profit + p - ix.fee);
            best = best.max(sold);
        } else if frozen == 0 && ix.cap.map_or(true, |k| done < k) {
            let bought = go(ix, day + 1, true, done, 0, profit - p);
            best = best.max(bought);
        }
        best
    }

    let ix = Instance {
        prices,
        cap,
        cooldown,
        fee,
    };
    go(&ix, 0, false, 0, 0, 0.0).max(0.0)
}

fn build_config(cap: Option<usize>, cooldown: usize, fee: f64) -> ConstraintConfig {
    let cap = match cap {
        Some(k) => TransactionCap::AtMost(k),
        None => TransactionCap::Unbounded,
    };
    ConstraintConfig::new(cap, cooldown, fee).unwrap()
}

fn arb_cap() -> impl proptest::strategy::Strategy<Value = Option<usize>> {
    prop_oneof![Just(None), (1usize..6).prop_map(Some)]
}

proptest! {
    #[test]
    fn matches_full_table(
        prices in proptest::collection::vec(0i32..100, 0..14),
        cap in arb_cap(),
        cooldown in 0usize..4,
        fee in 0i32..4,
    ) {
        let raw: Vec<f64> = prices.iter().map(|&p| p as f64).collect();
        let series = PriceSeries::new(raw.clone()).unwrap();
        let config = build_config(cap, cooldown, fee as f64);
        let got = evaluate(&series, &config).max_profit;
        let expected = full_table_profit(&raw, cap, cooldown, fee as f64);
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn matches_exhaustive_search(
        prices in proptest::collection::vec(0i32..50, 0..9),
        cap in arb_cap(),
        cooldown in 0usize..3,
        fee in 0i32..3,
    ) {
        let raw: Vec<f64> = prices.iter().map(|&p| p as f64).collect();
        let series = PriceSeries::new(raw.clone()).unwrap();
        let config = build_config(cap, cooldown, fee as f64);
        let got = evaluate(&series, &config).max_profit;
        let expected = exhaustive_profit(&raw, cap, cooldown, fee as f64);
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn negative_prices_match_exhaustive(
        prices in proptest::collection::vec(-50i32..50, 0..8),
        cap in arb_cap(),
        cooldown in 0usize..3,
    ) {
        let raw: Vec<f64> = prices.iter().map(|&p| p as f64).collect();
        let series = PriceSeries::new(raw.clone()).unwrap();
        let config = build_config(cap, cooldown, 0.0);
        let got = evaluate(&series, &config).max_profit;
        let expected = exhaustive_profit(&raw, cap, cooldown, 0.0);
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn oracles_agree_on_a_known_case() {
    let prices = [3.0, 2.0, 6.0, 5.0, 0.0, 3.0];
    assert_eq!(full_table_profit(&prices, Some(2), 0, 0.0), 7.0);
    assert_eq!(exhaustive_profit(&prices, Some(2), 0, 0.0), 7.0);
}
