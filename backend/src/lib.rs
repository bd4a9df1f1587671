//! Abstract staking backend trait for the tontine pool.
//!
//! Every delegation service (a parachain staking precompile, an RPC
//! bridge, an in-memory nullable for testing) implements this trait. The
//! rest of the workspace depends only on the trait.

pub mod error;
pub mod staking;

pub use error::BackendError;
pub use staking::StakingBackend;
