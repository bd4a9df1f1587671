//! The tontine pool — pooled capital, one delegation position.
//!
//! Members deposit into a shared pot; once the minimum entry stake is
//! reached the whole free balance is delegated to a fixed candidate
//! through the staking backend. Exiting the position (revoke) and
//! returning the pool to collection (reset) are each gated behind a
//! stake-weighted vote round. Withdrawals pay out proportional cuts of
//! the free balance whenever funds are liquid.
//!
//! The backend is authoritative for delegation status. The pool's own
//! state is advisory and every state-changing transition cross-checks it;
//! a disagreement aborts the operation as unrecoverable.

pub mod error;
pub mod params;
pub mod pool;
pub mod state;

pub use error::PoolError;
pub use params::PoolParams;
pub use pool::DelegationPool;
pub use state::PoolState;
