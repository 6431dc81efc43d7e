//! Bounded sequential-trading optimizer.
//!
//! This crate computes the maximum profit attainable from a finite price
//! sequence under a *composable* set of trading constraints:
//!
//! - a cap on the number of completed buy-sell transactions,
//! - a post-sale cooldown period during which buying is disallowed,
//! - a flat per-transaction fee charged at sale time.
//!
//! ## Core idea
//! 1. Model the trader as a small state machine per day: `Holding`,
//!    `Rest` (not holding, eligible to buy), and a chain of `Cooling`
//!    states after each sale.
//! 2. Configure the constraint axes with [`ConstraintConfig`]; every
//!    textbook variant (single transaction, k transactions, cooldown,
//!    fee, unconstrained) is a configuration of the same recurrence,
//!    not a separate code path.
//! 3. Let [`evaluate`] pick the cheapest correct strategy: a closed-form
//!    greedy sweep when no constraint binds, or the full
//!    [`TransitionEngine`] tabulation otherwise.
//!
//! The result carries both the optimal profit and the reconstructed
//! buy/sell days that realize it.
//!
//! ## Quick start
//! ```
//! use trade_dp::{evaluate, ConstraintConfig, PriceSeries};
//!
//! let prices = PriceSeries::new(vec![3.0, 2.0, 6.0, 5.0, 0.0, 3.0]).unwrap();
//! let config = ConstraintConfig::builder().max_transactions(2).build().unwrap();
//! let result = evaluate(&prices, &config);
//! assert_eq!(result.max_profit, 7.0);
//! assert_eq!(result.trades.len(), 2);
//! ```
//!
//! ## Constraint axes
//! All three axes default to "no constraint", so the default config
//! degrades to the classic unconstrained-profit problem:
//! ```
//! use trade_dp::{evaluate, ConstraintConfig, PriceSeries};
//!
//! let prices = PriceSeries::new(vec![7.0, 1.0, 5.0, 3.0, 6.0, 4.0]).unwrap();
//! let profit = evaluate(&prices, &ConstraintConfig::default()).max_profit;
//! assert_eq!(profit, 7.0); // (5 - 1) + (6 - 3)
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod optimizer;
pub mod series;
pub mod state;
pub mod utils;

pub use crate::builder::ConstraintConfigBuilder;
pub use crate::config::{ConfigError, ConstraintConfig, TransactionCap};
pub use crate::engine::{Trade, TransitionEngine};
pub use crate::optimizer::{evaluate, Strategy, TradeResult};
pub use crate::series::{PriceSeries, SeriesError};
