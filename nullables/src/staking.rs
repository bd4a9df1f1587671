//! Nullable staking backend — records delegation calls without performing them.

use std::cell::{Cell, RefCell};
use tontine_backend::{BackendError, StakingBackend};
use tontine_types::{Address, Amount};

/// A mutating backend call the nullable accepted, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendCall {
    Delegate {
        candidate: Address,
        amount: Amount,
        candidate_delegation_count: u32,
        delegator_delegation_count: u32,
    },
    BondMore {
        candidate: Address,
        amount: Amount,
    },
    ScheduleRevoke {
        candidate: Address,
    },
    ExecuteDelegationRequest {
        pool: Address,
        candidate: Address,
    },
}

/// A test staking backend.
///
/// Delegation status only changes when the test tells it to: a scheduled
/// revoke is honored by `execute_delegation_request` only after
/// [`set_revoke_ready`] has been called with `true`, simulating the
/// external delay the real backend imposes.
///
/// [`set_revoke_ready`]: NullStakingBackend::set_revoke_ready
pub struct NullStakingBackend {
    delegating: Cell<bool>,
    bonded: Cell<Amount>,
    revoke_scheduled: Cell<bool>,
    revoke_ready: Cell<bool>,
    candidate_delegations: Cell<u32>,
    fail_next: RefCell<Option<String>>,
    calls: RefCell<Vec<BackendCall>>,
}

impl NullStakingBackend {
    pub fn new() -> Self {
        Self {
            delegating: Cell::new(false),
            bonded: Cell::new(Amount::ZERO),
            revoke_scheduled: Cell::new(false),
            revoke_ready: Cell::new(false),
            candidate_delegations: Cell::new(0),
            fail_next: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Control whether the backend's revoke delay has elapsed.
    pub fn set_revoke_ready(&self, ready: bool) {
        self.revoke_ready.set(ready);
    }

    /// Force the pool's delegator status, bypassing the call flow. Used to
    /// manufacture disagreements between pool and backend.
    pub fn set_delegating(&self, delegating: bool) {
        self.delegating.set(delegating);
    }

    /// Seed the candidate's existing delegation count.
    pub fn set_candidate_delegations(&self, count: u32) {
        self.candidate_delegations.set(count);
    }

    /// Make the next backend call fail with `reason`.
    pub fn fail_next_call(&self, reason: &str) {
        *self.fail_next.borrow_mut() = Some(reason.to_string());
    }

    /// Whether the nullable currently considers the pool a delegator.
    pub fn is_delegating(&self) -> bool {
        self.delegating.get()
    }

    /// Total amount bonded through `delegate` and `bond_more`.
    pub fn bonded(&self) -> Amount {
        self.bonded.get()
    }

    /// Whether a revoke is currently scheduled.
    pub fn revoke_scheduled(&self) -> bool {
        self.revoke_scheduled.get()
    }

    /// All mutating calls accepted so far (for assertions).
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.borrow().clone()
    }

    fn take_fault(&self) -> Result<(), BackendError> {
        match self.fail_next.borrow_mut().take() {
            Some(reason) => Err(BackendError::Unavailable(reason)),
            None => Ok(()),
        }
    }

    fn record(&self, call: BackendCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for NullStakingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StakingBackend for NullStakingBackend {
    fn is_delegator(&self, _pool: &Address) -> Result<bool, BackendError> {
        self.take_fault()?;
        Ok(self.delegating.get())
    }

    fn delegate(
        &self,
        candidate: &Address,
        amount: Amount,
        candidate_delegation_count: u32,
        delegator_delegation_count: u32,
    ) -> Result<(), BackendError> {
        self.take_fault()?;
        if self.delegating.get() {
            return Err(BackendError::Rejected(
                "delegation already exists".to_string(),
            ));
        }
        self.record(BackendCall::Delegate {
            candidate: candidate.clone(),
            amount,
            candidate_delegation_count,
            delegator_delegation_count,
        });
        self.delegating.set(true);
        self.bonded.set(amount);
        self.candidate_delegations
            .set(self.candidate_delegations.get() + 1);
        Ok(())
    }

    fn bond_more(&self, candidate: &Address, amount: Amount) -> Result<(), BackendError> {
        self.take_fault()?;
        if !self.delegating.get() {
            return Err(BackendError::Rejected("no active delegation".to_string()));
        }
        self.record(BackendCall::BondMore {
            candidate: candidate.clone(),
            amount,
        });
        let bonded = self
            .bonded
            .get()
            .checked_add(amount)
            .ok_or_else(|| BackendError::Rejected("bond overflow".to_string()))?;
        self.bonded.set(bonded);
        Ok(())
    }

    fn schedule_revoke(&self, candidate: &Address) -> Result<(), BackendError> {
        self.take_fault()?;
        if !self.delegating.get() {
            return Err(BackendError::Rejected("no active delegation".to_string()));
        }
        self.record(BackendCall::ScheduleRevoke {
            candidate: candidate.clone(),
        });
        self.revoke_scheduled.set(true);
        Ok(())
    }

    fn execute_delegation_request(
        &self,
        pool: &Address,
        candidate: &Address,
    ) -> Result<(), BackendError> {
        self.take_fault()?;
        self.record(BackendCall::ExecuteDelegationRequest {
            pool: pool.clone(),
            candidate: candidate.clone(),
        });
        // Delay not elapsed: the request stays pending and the pool remains
        // a delegator. This is the "not yet ready" answer, not an error.
        if self.revoke_scheduled.get() && self.revoke_ready.get() {
            self.delegating.set(false);
            self.revoke_scheduled.set(false);
            self.bonded.set(Amount::ZERO);
            self.candidate_delegations
                .set(self.candidate_delegations.get().saturating_sub(1));
        }
        Ok(())
    }

    fn candidate_delegation_count(&self, _candidate: &Address) -> Result<u32, BackendError> {
        self.take_fault()?;
        Ok(self.candidate_delegations.get())
    }

    fn delegator_delegation_count(&self, _pool: &Address) -> Result<u32, BackendError> {
        self.take_fault()?;
        Ok(if self.delegating.get() { 1 } else { 0 })
    }
}
