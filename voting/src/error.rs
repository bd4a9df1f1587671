//! Voting-specific errors.

use thiserror::Error;
use tontine_types::Address;

#[derive(Debug, Error)]
pub enum VoteError {
    #[error("{0} has already voted in this round")]
    AlreadyVoted(Address),

    #[error("{0} holds no stake, vote carries no weight")]
    NoStake(Address),

    #[error("arithmetic overflow in vote tally")]
    Overflow,
}
