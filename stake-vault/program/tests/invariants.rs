mod common;

use std::thread;

use common::Harness;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spl_stake_vault::StakeVaultError;

#[test]
fn random_sequences_keep_total_equal_to_sum_of_stakes() {
    let h = Harness::initialized();
    let users: Vec<_> = (0..6).map(|_| h.funded_user(500)).collect();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..400 {
        let user = &users[rng.gen_range(0..users.len())];
        let amount = rng.gen_range(0..120);
        if rng.gen_bool(0.6) {
            match h.vault.stake(user, amount) {
                Ok(info) => assert!(info.is_staked),
                Err(e) => assert!(matches!(
                    e,
                    StakeVaultError::InvalidAmount | StakeVaultError::InsufficientBalance
                )),
            }
        } else {
            match h.vault.unstake(user, amount) {
                Ok(info) => assert_eq!(info.is_staked, info.staked_amount > 0),
                Err(e) => assert!(matches!(
                    e,
                    StakeVaultError::InvalidAmount
                        | StakeVaultError::InsufficientStake
                        | StakeVaultError::NoStakeFound
                )),
            }
        }
        h.assert_invariants();
    }

    // every user's tokens are either in their wallet or in custody
    for user in &users {
        let staked = h
            .vault
            .get_stake_info(user)
            .unwrap()
            .map_or(0, |info| info.staked_amount);
        assert_eq!(h.balance(user) + staked, 500);
    }
}

#[test]
fn concurrent_stakers_do_not_lose_updates() {
    let h = Harness::initialized();
    let users: Vec<_> = (0..8).map(|_| h.funded_user(1_000)).collect();

    thread::scope(|s| {
        for user in &users {
            let vault = &h.vault;
            s.spawn(move || {
                for _ in 0..50 {
                    vault.stake(user, 3).unwrap();
                }
                for _ in 0..20 {
                    vault.unstake(user, 2).unwrap();
                }
            });
        }
    });

    assert_eq!(h.total_staked(), 8 * (150 - 40));
    for user in &users {
        assert_eq!(h.stake_info(user).staked_amount, 110);
        assert_eq!(h.balance(user), 890);
    }
    h.assert_invariants();
}

#[test]
fn concurrent_calls_for_one_user_are_serialized() {
    let h = Harness::initialized();
    let user = h.funded_user(100);

    // 200 attempts at 1 token each; exactly 100 can succeed
    let successes: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let vault = &h.vault;
                let user = &user;
                s.spawn(move || (0..50).filter(|_| vault.stake(user, 1).is_ok()).count())
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).sum()
    });

    assert_eq!(successes, 100);
    assert_eq!(h.balance(&user), 0);
    assert_eq!(h.stake_info(&user).staked_amount, 100);
    h.assert_invariants();
}
