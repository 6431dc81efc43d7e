//! Day-by-day transition engine for the trading state machine.
//!
//! This module implements the two phases of an evaluation:
//! 1. A forward pass that tabulates, for every day, the best profit of
//!    each `(transaction slot, position)` state, double-buffering two
//!    day-slices and recording the transition chosen per cell.
//! 2. A backward walk over the recorded decisions that recovers the
//!    buy/sell days realizing the optimum.
//!
//! One recurrence family serves every constraint combination; cooldown
//! and the transaction cap only change the shape of the state space, and
//! the fee is a uniform subtraction applied at sale time.

use crate::config::ConstraintConfig;
use crate::series::PriceSeries;
use crate::state::{DaySlice, DecisionSlice, HoldChoice, Position, ProfitCell, RestChoice};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One completed transaction on the reconstructed optimal schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trade {
    pub buy_day: usize,
    pub sell_day: usize,
}

/// Tabulating evaluator for one `(prices, config)` instance.
///
/// `cap` controls the transaction dimension: `Some(k)` tracks the count
/// up to `k` (one slot per count), `None` collapses the dimension to a
/// single slot for an unbounded cap. Callers clamp oversized caps before
/// constructing the engine; see [`Strategy::select`].
///
/// [`Strategy::select`]: crate::optimizer::Strategy::select
pub struct TransitionEngine<'a> {
    prices: &'a PriceSeries,
    config: &'a ConstraintConfig,
    cap: Option<usize>,
}

/// Result of advancing one slot by one day.
struct SlotStep {
    hold: ProfitCell,
    hold_choice: HoldChoice,
    rest: ProfitCell,
    rest_choice: RestChoice,
    cooling: Vec<ProfitCell>,
}

impl<'a> TransitionEngine<'a> {
    /// # Panics
    /// Panics if a tracked cap of zero is requested; `Strategy::select`
    /// never produces one.
    pub fn new(prices: &'a PriceSeries, config: &'a ConstraintConfig, cap: Option<usize>) -> Self {
        if let Some(k) = cap {
            assert!(k >= 1, "tracked cap must be at least 1");
        }
        Self {
            prices,
            config,
            cap,
        }
    }

    fn slots(&self) -> usize {
        match self.cap {
            Some(k) => k + 1,
            None => 1,
        }
    }

    /// Slot holding the first purchase. With a tracked cap, slot `t`
    /// means "t transactions counting the one in progress", so slot 0
    /// never holds.
    fn first_hold_slot(&self) -> usize {
        match self.cap {
            Some(_) => 1,
            None => 0,
        }
    }

    /// Day-0 base case: resting with zero profit, or having bought at
    /// the opening price. Everything else is unreachable.
    fn init_slice(&self) -> DaySlice {
        let mut slice = DaySlice::unreachable(self.slots(), self.config.cooldown_days());
        slice.rest[0] = ProfitCell::ZERO;
        slice.hold[self.first_hold_slot()] = ProfitCell::Reached(-self.prices[0]);
        slice
    }

    /// Advance slot `t` from the previous day-slice. Reads only `prev`,
    /// so slots may be computed in any order (or in parallel).
    fn advance_slot(&self, price: f64, prev: &DaySlice, t: usize) -> SlotStep {
        let stages = prev.stages();

        // Keep holding, or buy today out of an eligible rest state. A buy
        // consumes a transaction slot when the count is tracked.
        let buy_source = match self.cap {
            Some(_) if t == 0 => ProfitCell::Unreachable,
            Some(_) => prev.rest[t - 1],
            None => prev.rest[t],
        };
        let carried = prev.hold[t];
        let bought = buy_source.offset(-price);
        let (hold, hold_choice) = if carried.improved_by(&bought) {
            (bought, HoldChoice::Buy)
        } else {
            (carried, HoldChoice::Carry)
        };

        // Selling today completes the slot's transaction and pays the fee.
        let sale = prev.hold[t].offset(price - self.config.fee());

        // Keep resting, or receive a completed sale: directly when no
        // cooldown is configured, otherwise from the end of the chain.
        let arrival = if stages == 0 { sale } else { prev.cooling(t, 1) };
        let waited = prev.rest[t];
        let (rest, rest_choice) = if waited.improved_by(&arrival) {
            let choice = if stages == 0 {
                RestChoice::Sell
            } else {
                RestChoice::Thaw
            };
            (arrival, choice)
        } else {
            (waited, RestChoice::Wait)
        };

        // The cooling chain shifts one day forward; a sale today enters
        // at the far end.
        let mut cooling = Vec::with_capacity(stages);
        for remaining in 1..stages {
            cooling.push(prev.cooling(t, remaining + 1));
        }
        if stages > 0 {
            cooling.push(sale);
        }

        SlotStep {
            hold,
            hold_choice,
            rest,
            rest_choice,
            cooling,
        }
    }

    #[cfg(feature = "parallel")]
    fn advance_all(&self, price: f64, prev: &DaySlice) -> Vec<SlotStep> {
        (0..prev.slots())
            .into_par_iter()
            .map(|t| self.advance_slot(price, prev, t))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn advance_all(&self, price: f64, prev: &DaySlice) -> Vec<SlotStep> {
        (0..prev.slots())
            .map(|t| self.advance_slot(price, prev, t))
            .collect()
    }

    /// Forward pass over all days. Returns the final day-slice and the
    /// per-day decision records.
    fn tabulate(&self) -> (DaySlice, Vec<DecisionSlice>) {
        let n = self.prices.len();
        let slots = self.slots();
        let stages = self.config.cooldown_days();

        let mut prev = self.init_slice();
        let mut decisions = Vec::with_capacity(n);
        let mut day0 = DecisionSlice::defaults(slots);
        day0.hold[self.first_hold_slot()] = HoldChoice::Buy;
        decisions.push(day0);

        for day in 1..n {
            #[cfg(feature = "tracing")]
            let span = tracing::trace_span!("advance_day", day);
            #[cfg(feature = "tracing")]
            let _enter = span.enter();

            let price = self.prices[day];
            let steps = self.advance_all(price, &prev);
            let mut next = DaySlice::unreachable(slots, stages);
            let mut dec = DecisionSlice::defaults(slots);
            for (t, step) in steps.into_iter().enumerate() {
                next.hold[t] = step.hold;
                dec.hold[t] = step.hold_choice;
                next.rest[t] = step.rest;
                dec.rest[t] = step.rest_choice;
                for (idx, cell) in step.cooling.into_iter().enumerate() {
                    next.set_cooling(t, idx + 1, cell);
                }
            }
            decisions.push(dec);
            prev = next;
        }

        (prev, decisions)
    }

    /// Run the tabulation and reconstruct the trades realizing the
    /// optimum.
    ///
    /// Returns `(max_profit, trades)`. The profit is never negative:
    /// the all-wait schedule keeps `rest[0] = 0` reachable on every day,
    /// and holding is never accepted as a terminal state.
    pub fn run(&self) -> (f64, Vec<Trade>) {
        if self.prices.len() <= 1 {
            return (0.0, Vec::new());
        }

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("engine_run", days = self.prices.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let (last, decisions) = self.tabulate();
        let (slot, position, profit) = last
            .best_terminal()
            .expect("rest[0] is reachable on every day");
        let trades = self.reconstruct(&decisions, slot, position);
        (profit, trades)
    }

    /// Walk the recorded decisions backward from the chosen terminal
    /// state, emitting one trade per completed sale. Cooling stages have
    /// no recorded choice: stage `d` always came from stage `d+1`, and
    /// the far end of the chain coincides with a sale day.
    fn reconstruct(
        &self,
        decisions: &[DecisionSlice],
        mut slot: usize,
        mut position: Position,
    ) -> Vec<Trade> {
        let stages = self.config.cooldown_days();
        let mut trades = Vec::new();
        let mut day = decisions.len() - 1;
        let mut pending_sell: Option<usize> = None;

        loop {
            match position {
                Position::Rest => match decisions[day].rest[slot] {
                    RestChoice::Wait => {
                        if day == 0 {
                            break;
                        }
                        day -= 1;
                    }
                    RestChoice::Sell => {
                        pending_sell = Some(day);
                        position = Position::Holding;
                        day -= 1;
                    }
                    RestChoice::Thaw => {
                        position = Position::Cooling(1);
                        day -= 1;
                    }
                },
                Position::Cooling(remaining) => {
                    if remaining == stages {
                        pending_sell = Some(day);
                        position = Position::Holding;
                    } else {
                        position = Position::Cooling(remaining + 1);
                    }
                    day -= 1;
                }
                Position::Holding => match decisions[day].hold[slot] {
                    HoldChoice::Carry => {
                        day -= 1;
                    }
                    HoldChoice::Buy => {
                        let sell_day = pending_sell
                            .take()
                            .expect("every buy on the optimal walk is matched by a later sale");
                        trades.push(Trade {
                            buy_day: day,
                            sell_day,
                        });
                        if self.cap.is_some() {
                            slot -= 1;
                        }
                        position = Position::Rest;
                        if day == 0 {
                            break;
                        }
                        day -= 1;
                    }
                },
            }
        }

        trades.reverse();
        trades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransactionCap;

    fn series(prices: &[f64]) -> PriceSeries {
        PriceSeries::new(prices.to_vec()).unwrap()
    }

    fn config(cap: TransactionCap, cooldown: usize, fee: f64) -> ConstraintConfig {
        ConstraintConfig::new(cap, cooldown, fee).unwrap()
    }

    #[test]
    fn fee_collapsed_mode() {
        let prices = series(&[1.0, 3.0, 2.0, 8.0, 4.0, 9.0]);
        let cfg = config(TransactionCap::Unbounded, 0, 2.0);
        let engine = TransitionEngine::new(&prices, &cfg, None);
        let (profit, trades) = engine.run();
        assert_eq!(profit, 8.0);
        assert_eq!(
            trades,
            vec![
                Trade { buy_day: 0, sell_day: 3 },
                Trade { buy_day: 4, sell_day: 5 },
            ]
        );
    }

    #[test]
    fn tracked_cap_two_transactions() {
        let prices = series(&[3.0, 2.0, 6.0, 5.0, 0.0, 3.0]);
        let cfg = config(TransactionCap::AtMost(2), 0, 0.0);
        let engine = TransitionEngine::new(&prices, &cfg, Some(2));
        let (profit, trades) = engine.run();
        assert_eq!(profit, 7.0);
        assert_eq!(
            trades,
            vec![
                Trade { buy_day: 1, sell_day: 2 },
                Trade { buy_day: 4, sell_day: 5 },
            ]
        );
    }

    #[test]
    fn cooldown_chain_delays_rebuy() {
        // Selling on day 1 with one cooldown day permits the next buy on
        // day 3 at the earliest.
        let prices = series(&[1.0, 2.0, 3.0, 0.0, 2.0]);
        let cfg = config(TransactionCap::Unbounded, 1, 0.0);
        let engine = TransitionEngine::new(&prices, &cfg, None);
        let (profit, trades) = engine.run();
        assert_eq!(profit, 3.0);
        assert_eq!(
            trades,
            vec![
                Trade { buy_day: 0, sell_day: 1 },
                Trade { buy_day: 3, sell_day: 4 },
            ]
        );
    }

    #[test]
    fn long_cooldown_forces_single_trade() {
        let prices = series(&[1.0, 10.0, 1.0, 10.0]);
        let unconstrained = config(TransactionCap::Unbounded, 0, 0.0);
        let engine = TransitionEngine::new(&prices, &unconstrained, None);
        assert_eq!(engine.run().0, 18.0);

        let cooled = config(TransactionCap::Unbounded, 1, 0.0);
        let engine = TransitionEngine::new(&prices, &cooled, None);
        let (profit, trades) = engine.run();
        assert_eq!(profit, 9.0);
        assert_eq!(trades.len(), 1);
    }

    #[test]
    fn flat_series_yields_no_trades() {
        let prices = series(&[5.0, 5.0, 5.0]);
        let cfg = config(TransactionCap::AtMost(1), 0, 0.0);
        let engine = TransitionEngine::new(&prices, &cfg, Some(1));
        let (profit, trades) = engine.run();
        assert_eq!(profit, 0.0);
        assert!(trades.is_empty());
    }

    #[test]
    fn negative_prices_are_ordinary_values() {
        let prices = series(&[-5.0, -1.0]);
        let cfg = config(TransactionCap::AtMost(1), 0, 0.0);
        let engine = TransitionEngine::new(&prices, &cfg, Some(1));
        let (profit, trades) = engine.run();
        assert_eq!(profit, 4.0);
        assert_eq!(trades, vec![Trade { buy_day: 0, sell_day: 1 }]);
    }

    #[test]
    fn combined_axes_respect_each_other() {
        // Cap 2, cooldown 1, fee 2: the best schedule sells on day 1 and
        // must skip the day-2 rebound entirely.
        let prices = series(&[2.0, 9.0, 1.0, 8.0, 3.0, 10.0]);
        let cfg = config(TransactionCap::AtMost(2), 1, 2.0);
        let engine = TransitionEngine::new(&prices, &cfg, Some(2));
        let (profit, trades) = engine.run();
        assert_eq!(profit, 10.0);
        assert_eq!(
            trades,
            vec![
                Trade { buy_day: 0, sell_day: 1 },
                Trade { buy_day: 4, sell_day: 5 },
            ]
        );
    }
}
