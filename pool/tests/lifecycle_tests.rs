//! Integration tests exercising the full pool lifecycle:
//! collection → delegation → revoke voting → revoke execution →
//! withdrawal → reset → second cycle.
//!
//! These tests wire the pool against the nullable backend and verify the
//! system works end-to-end — not just in isolation.

use tontine_nullables::{BackendCall, NullStakingBackend};
use tontine_pool::{DelegationPool, PoolError, PoolParams, PoolState};
use tontine_types::{Address, Amount, UNIT};

fn member(name: &str) -> Address {
    Address::new(name)
}

fn new_pool() -> DelegationPool<NullStakingBackend> {
    DelegationPool::new(
        Address::new("pool-account"),
        Address::new("collator-7"),
        PoolParams::default(),
        NullStakingBackend::new(),
    )
}

#[test]
fn full_lifecycle_with_three_members() {
    let mut pool = new_pool();
    let alice = member("alice");
    let bob = member("bob");
    let carol = member("carol");

    // ── Collection phase ─────────────────────────────────────────────
    pool.deposit(&alice, Amount::new(3 * UNIT)).unwrap();
    pool.deposit(&bob, Amount::new(5 * UNIT / 2)).unwrap();
    assert_eq!(pool.state(), PoolState::Staking);
    assert_eq!(
        pool.backend().calls()[0],
        BackendCall::Delegate {
            candidate: Address::new("collator-7"),
            amount: Amount::new(5_500),
            candidate_delegation_count: 0,
            delegator_delegation_count: 0,
        }
    );

    // ── Late joiner bonds on top ─────────────────────────────────────
    pool.deposit(&carol, Amount::from_units(2)).unwrap();
    assert_eq!(pool.backend().bonded(), Amount::new(7_500));
    assert_eq!(pool.total_stake(), Amount::new(7_500));
    assert!(pool.is_consistent());

    // ── Revoke voting: all three members must align ──────────────────
    pool.vote_to_revoke(&alice).unwrap();
    pool.vote_to_revoke(&bob).unwrap();
    assert_eq!(pool.state(), PoolState::Staking);
    assert_eq!(pool.revoke_tally(), Amount::new(5_500));

    pool.vote_to_revoke(&carol).unwrap();
    assert_eq!(pool.state(), PoolState::Revoking);
    assert!(pool.backend().revoke_scheduled());
    assert_eq!(pool.revoke_tally(), Amount::ZERO);

    // ── Exit: poll until the backend honors the revoke ───────────────
    assert!(matches!(
        pool.withdraw(&alice, &alice),
        Err(PoolError::RevokePending)
    ));
    pool.backend().set_revoke_ready(true);

    // Rewards arrived while the position unwound.
    pool.credit_rewards(Amount::new(1_500)).unwrap();

    let paid = pool.withdraw(&alice, &member("alice-payout")).unwrap();
    assert_eq!(pool.state(), PoolState::Revoked);
    // (7500 + 1500) * 3000 / 7500 = 3600
    assert_eq!(paid, Amount::new(3_600));
    assert_eq!(pool.share_of(&alice), Amount::ZERO);
    assert!(pool.is_consistent());

    // ── Reset: remaining members vote the pool back to collection ────
    pool.vote_to_reset(&bob).unwrap();
    assert_eq!(pool.state(), PoolState::Revoked);
    pool.vote_to_reset(&carol).unwrap();
    assert_eq!(pool.state(), PoolState::Collecting);

    // ── Second cycle: the pool delegates again ───────────────────────
    pool.deposit(&member("dave"), Amount::from_units(1)).unwrap();
    assert_eq!(pool.state(), PoolState::Staking);
    let delegates: Vec<_> = pool
        .backend()
        .calls()
        .into_iter()
        .filter(|c| matches!(c, BackendCall::Delegate { .. }))
        .collect();
    assert_eq!(delegates.len(), 2);
}

#[test]
fn wrong_state_matrix() {
    // Deposits are rejected in Revoking and Revoked; withdrawals in
    // Staking; reset votes in Staking; revoke votes everywhere else.
    let mut pool = new_pool();
    let alice = member("alice");
    pool.deposit(&alice, Amount::from_units(5)).unwrap();
    assert_eq!(pool.state(), PoolState::Staking);

    assert!(matches!(
        pool.withdraw(&alice, &alice),
        Err(PoolError::WrongState { state: PoolState::Staking, .. })
    ));
    assert!(matches!(
        pool.vote_to_reset(&alice),
        Err(PoolError::WrongState { state: PoolState::Staking, .. })
    ));

    pool.vote_to_revoke(&alice).unwrap();
    assert_eq!(pool.state(), PoolState::Revoking);

    assert!(matches!(
        pool.deposit(&alice, Amount::from_units(1)),
        Err(PoolError::WrongState { state: PoolState::Revoking, .. })
    ));
    assert!(matches!(
        pool.vote_to_revoke(&alice),
        Err(PoolError::WrongState { state: PoolState::Revoking, .. })
    ));

    pool.backend().set_revoke_ready(true);
    pool.withdraw(&alice, &alice).unwrap();
    assert_eq!(pool.state(), PoolState::Revoked);

    assert!(matches!(
        pool.deposit(&alice, Amount::from_units(1)),
        Err(PoolError::WrongState { state: PoolState::Revoked, .. })
    ));
    assert!(matches!(
        pool.vote_to_revoke(&alice),
        Err(PoolError::WrongState { state: PoolState::Revoked, .. })
    ));
}

#[test]
fn vote_rounds_clear_when_a_fresh_staking_period_begins() {
    let mut pool = new_pool();
    let alice = member("alice");
    let bob = member("bob");

    pool.deposit(&alice, Amount::from_units(2)).unwrap();
    pool.deposit(&bob, Amount::from_units(2)).unwrap();

    // A reset vote lingers from the collection phase.
    pool.vote_to_reset(&alice).unwrap();
    assert_eq!(pool.reset_tally(), Amount::from_units(2));

    // Crossing the threshold clears both rounds.
    pool.deposit(&bob, Amount::from_units(1)).unwrap();
    assert_eq!(pool.state(), PoolState::Staking);
    assert_eq!(pool.reset_tally(), Amount::ZERO);
    assert_eq!(pool.revoke_tally(), Amount::ZERO);

    // Alice can vote again in the next reset round after the cycle.
    pool.vote_to_revoke(&alice).unwrap();
    pool.vote_to_revoke(&bob).unwrap();
    assert_eq!(pool.state(), PoolState::Revoking);
    pool.vote_to_reset(&alice).unwrap();
    assert_eq!(pool.reset_tally(), Amount::from_units(2));
}

#[test]
fn backend_fault_surfaces_and_pool_recovers() {
    let mut pool = new_pool();
    let alice = member("alice");

    pool.backend().fail_next_call("transient rpc failure");
    let result = pool.deposit(&alice, Amount::from_units(5));
    assert!(matches!(result, Err(PoolError::Backend(_))));
    assert_eq!(pool.state(), PoolState::Collecting);
    assert_eq!(pool.total_stake(), Amount::ZERO);

    // Retrying the identical deposit succeeds once the backend is back.
    pool.deposit(&alice, Amount::from_units(5)).unwrap();
    assert_eq!(pool.state(), PoolState::Staking);
}

#[test]
fn inconsistency_is_sticky_until_backend_agrees_again() {
    let mut pool = new_pool();
    let alice = member("alice");
    pool.deposit(&alice, Amount::from_units(5)).unwrap();

    // The backend loses the delegation behind the pool's back.
    pool.backend().set_delegating(false);
    assert!(matches!(
        pool.deposit(&alice, Amount::from_units(1)),
        Err(PoolError::BackendInconsistency { .. })
    ));
    // No repair was attempted: the pool still believes it is staking.
    assert_eq!(pool.state(), PoolState::Staking);

    // Every further state-changing attempt keeps aborting.
    assert!(matches!(
        pool.deposit(&alice, Amount::from_units(1)),
        Err(PoolError::BackendInconsistency { .. })
    ));
}
