//! The weighted-majority vote round.

use crate::error::VoteError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tontine_types::{Address, Amount};

/// Result of recording a vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The tally has not crossed the conclusion threshold yet.
    Pending,
    /// The tally crossed the threshold. The caller runs the bound action
    /// and must reset the round afterwards, whether the action succeeded
    /// or not.
    Concluded,
}

/// A single weighted-majority decision in progress.
///
/// Voter membership is a set for O(1) double-vote checks; the weighted
/// tally is a separate running sum. The round itself does not know what
/// decision it authorizes — the caller binds the action.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoteRound {
    voters: HashSet<Address>,
    tally: Amount,
}

impl VoteRound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote of `weight` for `voter`.
    ///
    /// The round concludes when the tally exceeds `total - slack`
    /// (saturating). `slack = 1` is exact unanimity; the conventional
    /// slack of 2 tolerates truncation dust, which also means a coalition
    /// owning `total - 1` concludes the round without the remaining
    /// holders. `slack = 0` never concludes.
    pub fn cast(
        &mut self,
        voter: &Address,
        weight: Amount,
        total: Amount,
        slack: Amount,
    ) -> Result<VoteOutcome, VoteError> {
        if self.voters.contains(voter) {
            return Err(VoteError::AlreadyVoted(voter.clone()));
        }
        if weight.is_zero() {
            return Err(VoteError::NoStake(voter.clone()));
        }
        let tally = self.tally.checked_add(weight).ok_or(VoteError::Overflow)?;
        self.voters.insert(voter.clone());
        self.tally = tally;
        if self.tally > total.saturating_sub(slack) {
            Ok(VoteOutcome::Concluded)
        } else {
            Ok(VoteOutcome::Pending)
        }
    }

    /// Clear the voter set and zero the tally.
    pub fn reset(&mut self) {
        self.voters.clear();
        self.tally = Amount::ZERO;
    }

    /// Whether `voter` is recorded in the current round.
    pub fn has_voted(&self, voter: &Address) -> bool {
        self.voters.contains(voter)
    }

    /// The current weighted tally.
    pub fn tally(&self) -> Amount {
        self.tally
    }

    /// Number of distinct voters recorded.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }
}
