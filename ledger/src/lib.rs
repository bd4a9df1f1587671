//! Proportional share accounting for the pool.
//!
//! The ledger maps each member to the shares they own and maintains the
//! pool total. Shares are denominated in the same raw units as contributed
//! currency and represent ownership weight only — reward accrual never
//! touches them.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::StakeLedger;
