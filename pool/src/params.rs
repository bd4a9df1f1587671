//! Pool parameters.

use serde::{Deserialize, Serialize};
use tontine_types::{Amount, UNIT};

/// Tunable constants of the pool contract.
///
/// Both values form part of the pool's external contract and are fixed at
/// construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolParams {
    /// Minimum pooled stake required before the pool may enter Staking.
    pub min_entry_stake: Amount,

    /// Conclusion slack for vote rounds: a round concludes when its tally
    /// exceeds `total - vote_slack`.
    ///
    /// The default of 2 raw units approximates near-unanimity while
    /// tolerating truncation dust. It also means a coalition owning
    /// `total - 1` raw units concludes a round over absent holders; set
    /// this to 1 for exact unanimity.
    pub vote_slack: Amount,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            min_entry_stake: Amount::new(5 * UNIT),
            vote_slack: Amount::new(2),
        }
    }
}
