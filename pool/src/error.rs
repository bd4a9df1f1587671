//! Pool-specific errors.

use crate::state::PoolState;
use thiserror::Error;
use tontine_backend::BackendError;
use tontine_ledger::LedgerError;
use tontine_types::Amount;
use tontine_voting::VoteError;

#[derive(Debug, Error)]
pub enum PoolError {
    /// The operation is not legal in the pool's current state.
    #[error("{op} is not allowed while the pool is {state}")]
    WrongState { state: PoolState, op: &'static str },

    #[error("free balance {available} cannot cover a withdrawal of {needed}")]
    InsufficientFreeBalance { needed: Amount, available: Amount },

    /// The backend has not honored the scheduled revoke yet. Not a defect:
    /// the caller retries once the backend's delay has elapsed.
    #[error("the scheduled revoke has not been executed by the backend yet")]
    RevokePending,

    /// The backend's authoritative delegator answer disagrees with the
    /// pool's local state. Fatal — there is no automatic repair.
    #[error("pool believes it is {state} but backend reports delegating = {delegating}")]
    BackendInconsistency { state: PoolState, delegating: bool },

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("vote error: {0}")]
    Vote(#[from] VoteError),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}
