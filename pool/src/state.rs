//! Pool lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four phases of the pool lifecycle.
///
/// `Collecting → Staking → Revoking → Revoked → Collecting → …` — the
/// cycle repeats; the pool itself is never destroyed. Exactly one state is
/// active at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolState {
    /// Accepting deposits until the minimum entry stake is reached.
    Collecting,
    /// The pooled balance is delegated. Funds are illiquid.
    Staking,
    /// A revoke is scheduled with the backend, waiting for its delay.
    Revoking,
    /// The delegation is gone. Withdrawals and reset voting are open.
    Revoked,
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Collecting => "collecting",
            Self::Staking => "staking",
            Self::Revoking => "revoking",
            Self::Revoked => "revoked",
        };
        write!(f, "{name}")
    }
}
