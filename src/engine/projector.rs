use crate::types::{Monetary, MonetaryError};

/// Running account balance for the duration of one unit of work.
///
/// Every operation returns the quantized result, so rounding happens per step
/// and never accumulates.
#[derive(Debug, Clone, Copy)]
pub struct BalanceProjector {
    balance: Monetary
}

impl BalanceProjector {
    pub fn new(balance: Monetary) -> Self {
        Self { balance }
    }

    pub fn current(&self) -> Monetary {
        self.balance
    }

    /// Applies a deposit (positive) or withdrawal (negative).
    pub fn adjust(&mut self, delta: Monetary) -> Result<Monetary, MonetaryError> {
        self.balance = self.balance.checked_add(delta)?;
        Ok(self.balance)
    }

    /// Charges one transaction's amount against the balance.
    pub fn debit(&mut self, amount: Monetary) -> Result<Monetary, MonetaryError> {
        self.balance = self.balance.checked_sub(amount)?;
        Ok(self.balance)
    }
}
