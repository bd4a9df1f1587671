//! Nullable infrastructure for deterministic testing.
//!
//! The staking backend is the pool's only external dependency. This crate
//! provides a test-friendly implementation that:
//! - Returns deterministic values
//! - Can be controlled programmatically (revoke readiness, fault injection)
//! - Records every mutating call for assertions
//! - Never touches a real chain
//!
//! Usage: swap the real backend for the nullable in tests.

pub mod staking;

pub use staking::{BackendCall, NullStakingBackend};
