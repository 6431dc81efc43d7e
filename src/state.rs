//! Per-day DP state containers and the decision records used to
//! reconstruct trades.
//!
//! Each `DaySlice` holds every cell value for one day; the engine
//! double-buffers two of them, since day `i` depends only on day `i-1`.

use std::cmp::Ordering;

/// Profit value of a single DP cell.
///
/// Unreachable states carry an explicit tag rather than a negative-infinity
/// float, so max comparisons never mix sentinel arithmetic with real
/// profits. Reached values order via `f64::total_cmp`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProfitCell {
    Unreachable,
    Reached(f64),
}

impl ProfitCell {
    pub const ZERO: ProfitCell = ProfitCell::Reached(0.0);

    #[inline]
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProfitCell::Reached(_))
    }

    /// The profit if reached.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            ProfitCell::Reached(v) => Some(*v),
            ProfitCell::Unreachable => None,
        }
    }

    /// Shift a reached value by `delta`; unreachable stays unreachable.
    #[inline]
    pub fn offset(self, delta: f64) -> ProfitCell {
        match self {
            ProfitCell::Reached(v) => ProfitCell::Reached(v + delta),
            ProfitCell::Unreachable => ProfitCell::Unreachable,
        }
    }

    /// True when `candidate` is strictly better than `self`. Ties keep
    /// `self`, which lets the engine prefer "do nothing" transitions and
    /// hence fewer trades at equal profit.
    #[inline]
    pub fn improved_by(&self, candidate: &ProfitCell) -> bool {
        match (self, candidate) {
            (_, ProfitCell::Unreachable) => false,
            (ProfitCell::Unreachable, ProfitCell::Reached(_)) => true,
            (ProfitCell::Reached(a), ProfitCell::Reached(b)) => b.total_cmp(a) == Ordering::Greater,
        }
    }
}

/// Trader position within a day. `Cooling(d)` carries the remaining
/// ineligible days, `1..=cooldown_days`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Holding,
    Rest,
    Cooling(usize),
}

/// All DP cell values for one day: a `hold` and a `rest` cell per
/// transaction slot, plus the cooling chain per slot (flattened,
/// slot-major).
#[derive(Clone, Debug)]
pub struct DaySlice {
    pub hold: Vec<ProfitCell>,
    pub rest: Vec<ProfitCell>,
    cooling: Vec<ProfitCell>,
    stages: usize,
}

impl DaySlice {
    /// A slice with every cell unreachable.
    pub fn unreachable(slots: usize, stages: usize) -> Self {
        Self {
            hold: vec![ProfitCell::Unreachable; slots],
            rest: vec![ProfitCell::Unreachable; slots],
            cooling: vec![ProfitCell::Unreachable; slots * stages],
            stages,
        }
    }

    pub fn slots(&self) -> usize {
        self.hold.len()
    }

    pub fn stages(&self) -> usize {
        self.stages
    }

    /// Cooling cell for `slot` with `remaining` ineligible days,
    /// `1..=stages`.
    #[inline]
    pub fn cooling(&self, slot: usize, remaining: usize) -> ProfitCell {
        debug_assert!((1..=self.stages).contains(&remaining));
        self.cooling[slot * self.stages + (remaining - 1)]
    }

    #[inline]
    pub fn set_cooling(&mut self, slot: usize, remaining: usize, cell: ProfitCell) {
        debug_assert!((1..=self.stages).contains(&remaining));
        self.cooling[slot * self.stages + (remaining - 1)] = cell;
    }

    /// Best reachable not-holding cell across every slot and cooling
    /// stage; holding is never a valid terminal position. Scans in a
    /// fixed order so equal-profit answers resolve to the lowest slot
    /// (fewest trades).
    pub fn best_terminal(&self) -> Option<(usize, Position, f64)> {
        let mut best: Option<(usize, Position, f64)> = None;
        let mut consider = |slot: usize, pos: Position, cell: ProfitCell| {
            if let ProfitCell::Reached(v) = cell {
                let beaten = match best {
                    Some((_, _, b)) => v.total_cmp(&b) == Ordering::Greater,
                    None => true,
                };
                if beaten {
                    best = Some((slot, pos, v));
                }
            }
        };
        for slot in 0..self.slots() {
            consider(slot, Position::Rest, self.rest[slot]);
        }
        for slot in 0..self.slots() {
            for remaining in 1..=self.stages {
                consider(slot, Position::Cooling(remaining), self.cooling(slot, remaining));
            }
        }
        best
    }
}

/// How the holding cell of a slot was produced on a given day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldChoice {
    /// Kept yesterday's holding.
    Carry,
    /// Bought today.
    Buy,
}

/// How the rest cell of a slot was produced on a given day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestChoice {
    /// Kept yesterday's rest.
    Wait,
    /// Sold today (only without cooldown).
    Sell,
    /// Cooldown completed yesterday.
    Thaw,
}

/// Per-day record of the transition chosen for every slot; the backward
/// walk reads these instead of re-deriving transitions.
#[derive(Clone, Debug)]
pub struct DecisionSlice {
    pub hold: Vec<HoldChoice>,
    pub rest: Vec<RestChoice>,
}

impl DecisionSlice {
    pub fn defaults(slots: usize) -> Self {
        Self {
            hold: vec![HoldChoice::Carry; slots],
            rest: vec![RestChoice::Wait; slots],
        }
    }
}
