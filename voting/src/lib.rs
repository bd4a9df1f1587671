//! Stake-weighted voting for pool decisions.
//!
//! A [`VoteRound`] is a single weighted-majority decision in progress. It
//! is generic over what the decision does: the pool keeps one round for
//! revoke authorization and one for reset authorization, both instances of
//! the same primitive.

pub mod error;
pub mod round;

pub use error::VoteError;
pub use round::{VoteOutcome, VoteRound};
