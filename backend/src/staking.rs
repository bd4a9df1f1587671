//! The staking backend interface.

use crate::BackendError;
use tontine_types::{Address, Amount};

/// Interface to the authoritative external delegation service.
///
/// Implementations perform the actual delegation, bonding, and revocation
/// against a candidate. These calls are authoritative: the pool's local
/// state is advisory and defers to [`is_delegator`] answers.
///
/// A scheduled revoke is gated by a delay the pool cannot observe.
/// [`execute_delegation_request`] may be invoked any number of times
/// across separate operations until the backend honors it; an answer of
/// "still delegating" afterwards means "not yet ready", not an error.
///
/// [`is_delegator`]: StakingBackend::is_delegator
/// [`execute_delegation_request`]: StakingBackend::execute_delegation_request
pub trait StakingBackend {
    /// Whether `pool` currently holds an active delegation.
    fn is_delegator(&self, pool: &Address) -> Result<bool, BackendError>;

    /// Open a delegation of `amount` to `candidate`.
    ///
    /// The two counts are hints the backend requires for its own weight
    /// bookkeeping; obtain them from [`candidate_delegation_count`] and
    /// [`delegator_delegation_count`] immediately before the call.
    ///
    /// [`candidate_delegation_count`]: StakingBackend::candidate_delegation_count
    /// [`delegator_delegation_count`]: StakingBackend::delegator_delegation_count
    fn delegate(
        &self,
        candidate: &Address,
        amount: Amount,
        candidate_delegation_count: u32,
        delegator_delegation_count: u32,
    ) -> Result<(), BackendError>;

    /// Increase the existing delegation to `candidate` by `amount`.
    fn bond_more(&self, candidate: &Address, amount: Amount) -> Result<(), BackendError>;

    /// Schedule revocation of the delegation to `candidate`.
    fn schedule_revoke(&self, candidate: &Address) -> Result<(), BackendError>;

    /// Attempt to execute a previously scheduled revoke for `pool`.
    ///
    /// A successful return does not mean the delegation is gone: while the
    /// backend's delay has not elapsed the call is a no-op and
    /// `is_delegator` keeps answering true.
    fn execute_delegation_request(
        &self,
        pool: &Address,
        candidate: &Address,
    ) -> Result<(), BackendError>;

    /// Number of delegations currently held against `candidate`.
    fn candidate_delegation_count(&self, candidate: &Address) -> Result<u32, BackendError>;

    /// Number of delegations currently held by `pool`.
    fn delegator_delegation_count(&self, pool: &Address) -> Result<u32, BackendError>;
}
