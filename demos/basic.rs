//! Example: evaluate a price series under the default (unconstrained)
//! configuration and print the realized trades.
//!
//! Run with:
//! `cargo run --example basic`

use trade_dp::{evaluate, ConstraintConfig, PriceSeries};

fn main() {
    let prices = PriceSeries::new(vec![7.0, 1.0, 5.0, 3.0, 6.0, 4.0])
        .expect("prices are finite");

    let result = evaluate(&prices, &ConstraintConfig::default());

    println!("Max profit: {}", result.max_profit);
    println!("Trades:");
    for trade in &result.trades {
        println!(
            "  buy day {:2} at {:6.2}, sell day {:2} at {:6.2}",
            trade.buy_day, prices[trade.buy_day], trade.sell_day, prices[trade.sell_day]
        );
    }
}
