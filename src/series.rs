//! Immutable price sequences indexed by trading day.

use std::ops::Index;
use thiserror::Error;

/// Errors detected while constructing a [`PriceSeries`].
#[derive(Debug, Error)]
pub enum SeriesError {
    /// A `NaN` or infinite price would poison every max comparison in the
    /// engine, so it is rejected up front.
    #[error("price at day {index} is not a finite number (got {value})")]
    NonFinitePrice { index: usize, value: f64 },
}

/// An ordered, immutable sequence of prices; index `i` is trading day `i`.
///
/// An empty series is valid and trivially yields profit 0. Prices may be
/// zero or negative; only non-finite values are rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries {
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from raw prices, validating every value eagerly.
    pub fn new(prices: Vec<f64>) -> Result<Self, SeriesError> {
        for (index, &value) in prices.iter().enumerate() {
            if !value.is_finite() {
                return Err(SeriesError::NonFinitePrice { index, value });
            }
        }
        Ok(Self { prices })
    }

    /// Number of trading days.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// True when the series has no days.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Price on `day`, or `None` past the end.
    pub fn get(&self, day: usize) -> Option<f64> {
        self.prices.get(day).copied()
    }

    /// Iterate over `(day, price)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.prices.iter().copied().enumerate()
    }

    /// The raw prices as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.prices
    }
}

impl Index<usize> for PriceSeries {
    type Output = f64;

    fn index(&self, day: usize) -> &f64 {
        &self.prices[day]
    }
}

impl TryFrom<Vec<f64>> for PriceSeries {
    type Error = SeriesError;

    fn try_from(prices: Vec<f64>) -> Result<Self, SeriesError> {
        PriceSeries::new(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_is_valid() {
        let s = PriceSeries::new(Vec::new()).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert_eq!(s.get(0), None);
    }

    #[test]
    fn negative_and_zero_prices_are_valid() {
        let s = PriceSeries::new(vec![-3.5, 0.0, 2.0]).unwrap();
        assert_eq!(s[0], -3.5);
        assert_eq!(s[1], 0.0);
    }

    #[test]
    fn nan_is_rejected_with_index() {
        let err = PriceSeries::new(vec![1.0, f64::NAN, 2.0]).unwrap_err();
        match err {
            SeriesError::NonFinitePrice { index, .. } => assert_eq!(index, 1),
        }
    }

    #[test]
    fn infinity_is_rejected() {
        assert!(PriceSeries::new(vec![f64::INFINITY]).is_err());
        assert!(PriceSeries::new(vec![f64::NEG_INFINITY]).is_err());
    }

    #[test]
    fn iter_yields_day_price_pairs() {
        let s = PriceSeries::new(vec![5.0, 7.0]).unwrap();
        let pairs: Vec<_> = s.iter().collect();
        assert_eq!(pairs, vec![(0, 5.0), (1, 7.0)]);
    }
}
