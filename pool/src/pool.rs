//! The pool lifecycle engine.

use crate::error::PoolError;
use crate::params::PoolParams;
use crate::state::PoolState;
use tontine_backend::StakingBackend;
use tontine_ledger::{LedgerError, StakeLedger};
use tontine_types::{Address, Amount};
use tontine_voting::{VoteOutcome, VoteRound};

/// A pooled delegation fund.
///
/// Pools deposits from independent members into one delegation position
/// against a fixed candidate, tracks proportional ownership in a
/// [`StakeLedger`], and gates entering, exiting, and resetting the
/// position behind stake-weighted [`VoteRound`]s.
///
/// Every operation runs to completion or aborts before the next begins;
/// mutating operations take `&mut self`, so the borrow checker rules out
/// re-entry through the backend within an operation. Fallible steps —
/// including every backend call — happen before local state is touched,
/// so an aborted operation leaves no partial change behind. The one
/// deliberate exception: a concluded vote round resets even when its
/// bound action fails, and a revoke confirmed gone by the backend moves
/// the pool to `Revoked` even when the payout that triggered the check
/// fails afterwards (the external world has already moved; rolling back
/// the local state would manufacture the very inconsistency the
/// cross-checks exist to catch).
pub struct DelegationPool<B: StakingBackend> {
    /// The pool's own account, as known to the backend.
    account: Address,
    /// The candidate all pooled funds delegate to. Fixed at construction.
    target: Address,
    params: PoolParams,
    state: PoolState,
    ledger: StakeLedger,
    free_balance: Amount,
    revoke_round: VoteRound,
    reset_round: VoteRound,
    backend: B,
}

impl<B: StakingBackend> DelegationPool<B> {
    /// Create a pool in `Collecting` with a fixed target candidate.
    pub fn new(account: Address, target: Address, params: PoolParams, backend: B) -> Self {
        Self {
            account,
            target,
            params,
            state: PoolState::Collecting,
            ledger: StakeLedger::new(),
            free_balance: Amount::ZERO,
            revoke_round: VoteRound::new(),
            reset_round: VoteRound::new(),
            backend,
        }
    }

    /// Deposit `amount` for `member`.
    ///
    /// While `Collecting`, the deposit that brings the total to the
    /// minimum entry stake delegates the full free balance and moves the
    /// pool to `Staking`. While `Staking`, the deposit is bonded on top of
    /// the existing delegation. Any other state rejects the deposit.
    pub fn deposit(&mut self, member: &Address, amount: Amount) -> Result<(), PoolError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount.into());
        }
        let free = self
            .free_balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let total = self
            .ledger
            .total()
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        match self.state {
            PoolState::Collecting => {
                if total >= self.params.min_entry_stake {
                    self.ensure_backend_agreement(false)?;
                    let candidate_count =
                        self.backend.candidate_delegation_count(&self.target)?;
                    let delegator_count =
                        self.backend.delegator_delegation_count(&self.account)?;
                    self.backend
                        .delegate(&self.target, free, candidate_count, delegator_count)?;
                    self.ledger.deposit(member, amount)?;
                    self.free_balance = free;
                    self.revoke_round.reset();
                    self.reset_round.reset();
                    self.state = PoolState::Staking;
                    tracing::info!(member = %member, amount = %amount, "deposit received");
                    tracing::info!(
                        target = %self.target,
                        delegated = %free,
                        "entry stake reached, pool entered staking"
                    );
                } else {
                    self.ledger.deposit(member, amount)?;
                    self.free_balance = free;
                    tracing::info!(member = %member, amount = %amount, "deposit received");
                }
                Ok(())
            }
            PoolState::Staking => {
                self.ensure_backend_agreement(true)?;
                self.backend.bond_more(&self.target, amount)?;
                self.ledger.deposit(member, amount)?;
                self.free_balance = free;
                tracing::info!(member = %member, amount = %amount, "deposit received");
                tracing::debug!(target = %self.target, amount = %amount, "deposit bonded");
                Ok(())
            }
            state => Err(PoolError::WrongState {
                state,
                op: "deposit",
            }),
        }
    }

    /// Withdraw `member`'s proportional cut of the free balance, paid to
    /// `recipient`. Returns the amount transferred out.
    ///
    /// Illegal while `Staking` — delegated funds are illiquid. While
    /// `Revoking`, the scheduled revoke is re-attempted first; if the
    /// backend still reports an active delegation its delay has not
    /// elapsed and the call fails with [`PoolError::RevokePending`], to be
    /// retried later.
    pub fn withdraw(&mut self, member: &Address, recipient: &Address) -> Result<Amount, PoolError> {
        match self.state {
            PoolState::Staking => Err(PoolError::WrongState {
                state: self.state,
                op: "withdraw",
            }),
            PoolState::Revoking => {
                self.try_execute_revoke()?;
                self.pay_out(member, recipient)
            }
            PoolState::Collecting | PoolState::Revoked => self.pay_out(member, recipient),
        }
    }

    /// Cast `voter`'s stake behind revoking the pool's delegation.
    ///
    /// Only legal while `Staking`. When the round's tally exceeds
    /// `total - vote_slack` the revoke is scheduled with the backend and
    /// the pool moves to `Revoking`. A concluded round resets both vote
    /// rounds unconditionally, even when the backend call fails.
    pub fn vote_to_revoke(&mut self, voter: &Address) -> Result<(), PoolError> {
        if self.state != PoolState::Staking {
            return Err(PoolError::WrongState {
                state: self.state,
                op: "vote-to-revoke",
            });
        }
        let weight = self.ledger.share_of(voter);
        let outcome = self.revoke_round.cast(
            voter,
            weight,
            self.ledger.total(),
            self.params.vote_slack,
        )?;
        tracing::debug!(voter = %voter, weight = %weight, tally = %self.revoke_round.tally(), "revoke vote cast");
        if outcome == VoteOutcome::Concluded {
            let result = self.schedule_revoke();
            self.revoke_round.reset();
            self.reset_round.reset();
            result?;
        }
        Ok(())
    }

    /// Cast `voter`'s stake behind resetting the pool to `Collecting`.
    ///
    /// Illegal while `Staking`. On conclusion the backend must confirm the
    /// pool holds no active delegation; the pool then returns to
    /// `Collecting` with both vote rounds cleared. A concluded round
    /// resets both rounds unconditionally, even when the bound action
    /// fails.
    pub fn vote_to_reset(&mut self, voter: &Address) -> Result<(), PoolError> {
        if self.state == PoolState::Staking {
            return Err(PoolError::WrongState {
                state: self.state,
                op: "vote-to-reset",
            });
        }
        let weight = self.ledger.share_of(voter);
        let outcome = self.reset_round.cast(
            voter,
            weight,
            self.ledger.total(),
            self.params.vote_slack,
        )?;
        tracing::debug!(voter = %voter, weight = %weight, tally = %self.reset_round.tally(), "reset vote cast");
        if outcome == VoteOutcome::Concluded {
            let result = self.reset_pool();
            self.reset_round.reset();
            self.revoke_round.reset();
            result?;
        }
        Ok(())
    }

    /// Credit a balance increase produced by the backend (staking
    /// rewards). Shares are unaffected; rewards raise every member's
    /// proportional payout instead.
    pub fn credit_rewards(&mut self, amount: Amount) -> Result<(), PoolError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount.into());
        }
        self.free_balance = self
            .free_balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        tracing::debug!(amount = %amount, "rewards credited");
        Ok(())
    }

    /// The pool's current lifecycle state.
    pub fn state(&self) -> PoolState {
        self.state
    }

    /// The candidate the pool delegates to.
    pub fn target(&self) -> &Address {
        &self.target
    }

    /// The pool's own account.
    pub fn account(&self) -> &Address {
        &self.account
    }

    /// The share currently owned by `member`.
    pub fn share_of(&self, member: &Address) -> Amount {
        self.ledger.share_of(member)
    }

    /// Sum of all member shares.
    pub fn total_stake(&self) -> Amount {
        self.ledger.total()
    }

    /// The pool's currently held balance.
    pub fn free_balance(&self) -> Amount {
        self.free_balance
    }

    /// Current weighted tally of the revoke round.
    pub fn revoke_tally(&self) -> Amount {
        self.revoke_round.tally()
    }

    /// Current weighted tally of the reset round.
    pub fn reset_tally(&self) -> Amount {
        self.reset_round.tally()
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    /// Direct access to the backend (tests inspect the nullable through
    /// this).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Verify the ledger's `sum(shares) == total` invariant.
    pub fn is_consistent(&self) -> bool {
        self.ledger.is_consistent()
    }

    fn schedule_revoke(&mut self) -> Result<(), PoolError> {
        self.backend.schedule_revoke(&self.target)?;
        self.state = PoolState::Revoking;
        tracing::info!(target = %self.target, "revoke scheduled, pool is revoking");
        Ok(())
    }

    /// Re-attempt the scheduled revoke. Moves to `Revoked` once the
    /// backend confirms the delegation is gone.
    fn try_execute_revoke(&mut self) -> Result<(), PoolError> {
        self.backend
            .execute_delegation_request(&self.account, &self.target)?;
        if self.backend.is_delegator(&self.account)? {
            return Err(PoolError::RevokePending);
        }
        self.state = PoolState::Revoked;
        tracing::info!("revoke executed, pool is revoked");
        Ok(())
    }

    fn reset_pool(&mut self) -> Result<(), PoolError> {
        match self.state {
            PoolState::Collecting | PoolState::Revoked => {}
            state => {
                return Err(PoolError::WrongState { state, op: "reset" });
            }
        }
        self.ensure_backend_agreement(false)?;
        self.state = PoolState::Collecting;
        tracing::info!("pool reset to collecting");
        Ok(())
    }

    fn pay_out(&mut self, member: &Address, recipient: &Address) -> Result<Amount, PoolError> {
        self.ensure_backend_agreement(false)?;
        let amount = self.ledger.payout(self.free_balance, member)?;
        if self.free_balance < amount {
            return Err(PoolError::InsufficientFreeBalance {
                needed: amount,
                available: self.free_balance,
            });
        }
        self.ledger.clear(member);
        self.free_balance = self.free_balance.saturating_sub(amount);
        tracing::info!(
            member = %member,
            recipient = %recipient,
            amount = %amount,
            "withdrawal paid"
        );
        Ok(amount)
    }

    /// Compare the pool's believed delegation status against the
    /// backend's authoritative answer. A mismatch aborts the operation —
    /// the local state is advisory and is never repaired automatically.
    fn ensure_backend_agreement(&self, expect_delegating: bool) -> Result<(), PoolError> {
        let delegating = self.backend.is_delegator(&self.account)?;
        if delegating != expect_delegating {
            tracing::error!(
                state = %self.state,
                delegating,
                "backend disagrees with pool state"
            );
            return Err(PoolError::BackendInconsistency {
                state: self.state,
                delegating,
            });
        }
        Ok(())
    }
}
