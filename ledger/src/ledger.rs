//! The share ledger.

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tontine_types::{Address, Amount};

/// Maps member identity to owned shares and maintains the pool total.
///
/// Invariant: `sum(shares) == total` at the start and end of every
/// operation. Every mutation performs its fallible checks before touching
/// either side, so a failed call leaves the ledger exactly as it was.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StakeLedger {
    shares: HashMap<Address, Amount>,
    total: Amount,
}

impl StakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `member`'s share and to the pool total.
    ///
    /// Never fails for a non-zero amount short of u128 overflow.
    pub fn deposit(&mut self, member: &Address, amount: Amount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        let share = self.share_of(member);
        let new_share = share.checked_add(amount).ok_or(LedgerError::Overflow)?;
        let new_total = self.total.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.shares.insert(member.clone(), new_share);
        self.total = new_total;
        Ok(())
    }

    /// Compute `member`'s proportional cut of `free_balance`:
    /// `free_balance * share / total`, truncating integer division.
    ///
    /// Read-only; a member with no shares gets a zero payout.
    pub fn payout(&self, free_balance: Amount, member: &Address) -> Result<Amount, LedgerError> {
        if self.total.is_zero() {
            return Err(LedgerError::DivideByZero);
        }
        let share = self.share_of(member);
        let scaled = free_balance
            .raw()
            .checked_mul(share.raw())
            .ok_or(LedgerError::Overflow)?;
        Ok(Amount::new(scaled / self.total.raw()))
    }

    /// Zero `member`'s share and subtract it from the pool total.
    ///
    /// Returns the cleared share (zero for an unknown member).
    pub fn clear(&mut self, member: &Address) -> Amount {
        match self.shares.remove(member) {
            Some(share) => {
                self.total = self.total.saturating_sub(share);
                share
            }
            None => Amount::ZERO,
        }
    }

    /// The share currently owned by `member`.
    pub fn share_of(&self, member: &Address) -> Amount {
        self.shares.get(member).copied().unwrap_or(Amount::ZERO)
    }

    /// Sum of all shares.
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Number of members holding a non-zero share.
    pub fn member_count(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Iterate over all members and their shares.
    pub fn members(&self) -> impl Iterator<Item = (&Address, Amount)> {
        self.shares.iter().map(|(addr, share)| (addr, *share))
    }

    /// Verify `sum(shares) == total`. Exercised by tests after every
    /// operation sequence.
    pub fn is_consistent(&self) -> bool {
        let sum = self
            .shares
            .values()
            .try_fold(Amount::ZERO, |acc, s| acc.checked_add(*s));
        sum == Some(self.total)
    }
}
