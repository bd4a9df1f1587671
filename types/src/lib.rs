//! Fundamental types for the tontine pool.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: account addresses and currency amounts.

pub mod address;
pub mod amount;

pub use address::Address;
pub use amount::{Amount, UNIT};
