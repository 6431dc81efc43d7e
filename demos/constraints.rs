//! Example: the same price series under different constraint
//! combinations.
//!
//! Run with:
//! `cargo run --example constraints`

use trade_dp::{evaluate, ConstraintConfig, PriceSeries};

fn main() {
    let prices = PriceSeries::new(vec![1.0, 3.0, 2.0, 8.0, 4.0, 9.0])
        .expect("prices are finite");

    let configs = [
        ("unconstrained", ConstraintConfig::default()),
        (
            "one transaction",
            ConstraintConfig::builder().max_transactions(1).build().unwrap(),
        ),
        (
            "fee 2",
            ConstraintConfig::builder().fee(2.0).build().unwrap(),
        ),
        (
            "cooldown 1 day",
            ConstraintConfig::builder().cooldown_days(1).build().unwrap(),
        ),
        (
            "2 transactions, cooldown 1, fee 2",
            ConstraintConfig::builder()
                .max_transactions(2)
                .cooldown_days(1)
                .fee(2.0)
                .build()
                .unwrap(),
        ),
    ];

    for (label, config) in &configs {
        let result = evaluate(&prices, config);
        println!(
            "{label:<34} profit = {:6.2}, trades = {}",
            result.max_profit,
            result.trades.len()
        );
    }
}
