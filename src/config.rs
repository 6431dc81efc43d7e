//! Validated trading constraints.
//!
//! The three axes are independent and each defaults to "no constraint",
//! so an unconfigured [`ConstraintConfig`] degrades the engine to the
//! classic unconstrained-profit problem.

use crate::builder::ConstraintConfigBuilder;
use thiserror::Error;

/// Bound on the number of completed buy-sell transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionCap {
    /// No limit on the number of transactions.
    Unbounded,
    /// At most this many completed transactions; must be at least 1.
    AtMost(usize),
}

/// Errors detected while constructing a [`ConstraintConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_transactions must allow at least one transaction; use TransactionCap::Unbounded for no cap")]
    ZeroTransactionCap,
    #[error("fee must be non-negative (got {0})")]
    NegativeFee(f64),
    #[error("fee must be a finite number (got {0})")]
    NonFiniteFee(f64),
}

/// The validated set of recognized trading constraints.
///
/// Fields are private so that every live value has passed validation;
/// the engine performs no defensive re-checking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstraintConfig {
    max_transactions: TransactionCap,
    cooldown_days: usize,
    fee: f64,
}

impl ConstraintConfig {
    /// Validate and build a config. `cooldown_days` is non-negative by
    /// type; the cap and fee are checked eagerly here.
    pub fn new(
        max_transactions: TransactionCap,
        cooldown_days: usize,
        fee: f64,
    ) -> Result<Self, ConfigError> {
        if max_transactions == TransactionCap::AtMost(0) {
            return Err(ConfigError::ZeroTransactionCap);
        }
        if !fee.is_finite() {
            return Err(ConfigError::NonFiniteFee(fee));
        }
        if fee < 0.0 {
            return Err(ConfigError::NegativeFee(fee));
        }
        Ok(Self {
            max_transactions,
            cooldown_days,
            fee,
        })
    }

    /// The no-constraint configuration: unbounded cap, no cooldown, no fee.
    pub fn unconstrained() -> Self {
        Self {
            max_transactions: TransactionCap::Unbounded,
            cooldown_days: 0,
            fee: 0.0,
        }
    }

    /// Fluent construction; see [`ConstraintConfigBuilder`].
    pub fn builder() -> ConstraintConfigBuilder {
        ConstraintConfigBuilder::new()
    }

    pub fn max_transactions(&self) -> TransactionCap {
        self.max_transactions
    }

    pub fn cooldown_days(&self) -> usize {
        self.cooldown_days
    }

    pub fn fee(&self) -> f64 {
        self.fee
    }

    /// True when neither cooldown nor fee is active.
    pub(crate) fn has_plain_axes(&self) -> bool {
        self.cooldown_days == 0 && self.fee == 0.0
    }
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self::unconstrained()
    }
}
