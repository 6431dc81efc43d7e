//! Assorted small helpers shared by the optimizer and the engine.

/// Largest number of buy-sell pairs any schedule can complete in `n`
/// days: each transaction needs a distinct buy day and a later sell day.
///
/// Caps at or above this value are equivalent to no cap at all, which
/// bounds tabulation cost to O(n²) even for "unbounded" requests.
#[inline]
pub fn max_useful_transactions(n: usize) -> usize {
    n / 2
}
