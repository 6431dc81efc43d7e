use crate::config::{ConfigError, ConstraintConfig, TransactionCap};

/// Fluent builder for [`ConstraintConfig`]; every axis left unset keeps
/// its no-constraint default. Validation happens once, in [`build`].
///
/// [`build`]: ConstraintConfigBuilder::build
#[derive(Clone, Debug, Default)]
pub struct ConstraintConfigBuilder {
    max_transactions: Option<TransactionCap>,
    cooldown_days: Option<usize>,
    fee: Option<f64>,
}

impl ConstraintConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap completed transactions at `k`.
    pub fn max_transactions(mut self, k: usize) -> Self {
        self.max_transactions = Some(TransactionCap::AtMost(k));
        self
    }

    /// Remove any transaction cap (the default).
    pub fn unbounded(mut self) -> Self {
        self.max_transactions = Some(TransactionCap::Unbounded);
        self
    }

    pub fn cooldown_days(mut self, days: usize) -> Self {
        self.cooldown_days = Some(days);
        self
    }

    pub fn fee(mut self, fee: f64) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn build(self) -> Result<ConstraintConfig, ConfigError> {
        ConstraintConfig::new(
            self.max_transactions.unwrap_or(TransactionCap::Unbounded),
            self.cooldown_days.unwrap_or(0),
            self.fee.unwrap_or(0.0),
        )
    }
}
