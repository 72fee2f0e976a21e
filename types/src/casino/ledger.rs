use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected debit: the requested amount exceeds the current balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("insufficient balance: need {needed}, have {available}")]
pub struct InsufficientBalance {
    pub needed: u64,
    pub available: u64,
}

/// Single-player balance in cents.
///
/// The ledger is the sole owner of balance mutations: a round debits its
/// stake up front and credits the payout only on a win or cash-out. The
/// sufficiency check lives inside `debit`, so the balance can never
/// underflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: u64,
}

impl Ledger {
    pub fn new(initial_balance: u64) -> Self {
        Self {
            balance: initial_balance,
        }
    }

    /// Read-only snapshot of the current balance.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Remove `amount` from the balance, failing without mutation if the
    /// balance cannot cover it.
    pub fn debit(&mut self, amount: u64) -> Result<(), InsufficientBalance> {
        if amount > self.balance {
            return Err(InsufficientBalance {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Add `amount` to the balance. Never fails.
    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }
}
