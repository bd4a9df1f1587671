//! Ledger-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("pool total is zero, cannot compute a proportional payout")]
    DivideByZero,

    #[error("arithmetic overflow in share accounting")]
    Overflow,
}
