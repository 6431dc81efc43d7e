//! Strategy dispatch and the public evaluation entry point.

use crate::config::{ConstraintConfig, TransactionCap};
use crate::engine::{Trade, TransitionEngine};
use crate::series::PriceSeries;
use crate::utils::max_useful_transactions;

/// Outcome of one evaluation: the optimal profit and the buy/sell days
/// realizing it.
#[derive(Clone, Debug, PartialEq)]
pub struct TradeResult {
    pub max_profit: f64,
    pub trades: Vec<Trade>,
}

impl TradeResult {
    fn no_trades() -> Self {
        Self {
            max_profit: 0.0,
            trades: Vec::new(),
        }
    }
}

/// The evaluation strategy chosen for a `(series length, config)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Zero or one day: no transaction can complete.
    Trivial,
    /// No binding constraint: sum every positive day-to-day delta, O(n).
    GreedySweep,
    /// Full tabulation. `cap = None` collapses the transaction dimension
    /// (unbounded cap with cooldown and/or fee active).
    Tabulate { cap: Option<usize> },
}

impl Strategy {
    /// Dispatch policy, in priority order.
    ///
    /// The greedy sweep is an exact algebraic equivalence, not an
    /// approximation: an unconstrained trader can realize every positive
    /// daily delta with back-to-back transactions. A cap of `n/2` or
    /// more is equivalent to no cap, since no schedule on `n` days
    /// completes more transactions than that; the same bound clamps
    /// oversized tracked caps so tabulation cost never exceeds O(n²).
    pub fn select(n: usize, config: &ConstraintConfig) -> Strategy {
        if n <= 1 {
            return Strategy::Trivial;
        }
        let plain = config.has_plain_axes();
        match config.max_transactions() {
            TransactionCap::Unbounded if plain => Strategy::GreedySweep,
            TransactionCap::AtMost(k) if plain && k >= max_useful_transactions(n) => {
                Strategy::GreedySweep
            }
            TransactionCap::Unbounded => Strategy::Tabulate { cap: None },
            TransactionCap::AtMost(k) => Strategy::Tabulate {
                cap: Some(k.min(max_useful_transactions(n))),
            },
        }
    }
}

/// Maximum-profit evaluation of `prices` under `config`.
///
/// Pure: no side effects and no retained state, so concurrent calls over
/// a shared [`PriceSeries`] are safe. Degenerate inputs (empty or
/// single-day series) resolve to profit 0 without invoking the engine.
pub fn evaluate(prices: &PriceSeries, config: &ConstraintConfig) -> TradeResult {
    match Strategy::select(prices.len(), config) {
        Strategy::Trivial => TradeResult::no_trades(),
        Strategy::GreedySweep => greedy_sweep(prices),
        Strategy::Tabulate { cap } => {
            let engine = TransitionEngine::new(prices, config, cap);
            let (max_profit, trades) = engine.run();
            TradeResult { max_profit, trades }
        }
    }
}

/// Capture every positive day-to-day increase: buy at the bottom of each
/// descent, sell at the top of the following climb. The realized profit
/// equals `Σ max(0, price[i] − price[i-1])`.
fn greedy_sweep(prices: &PriceSeries) -> TradeResult {
    let n = prices.len();
    let mut trades = Vec::new();
    let mut max_profit = 0.0;
    let mut day = 0;
    while day + 1 < n {
        while day + 1 < n && prices[day + 1] <= prices[day] {
            day += 1;
        }
        if day + 1 >= n {
            break;
        }
        let buy_day = day;
        while day + 1 < n && prices[day + 1] > prices[day] {
            day += 1;
        }
        max_profit += prices[day] - prices[buy_day];
        trades.push(Trade {
            buy_day,
            sell_day: day,
        });
    }
    TradeResult { max_profit, trades }
}
