//! Admin Operation Tests
//!
//! Owner gating on every admin operation, ownership handover, dev address
//! redirection, and the per-pool minimum-lock setter.

mod common;

use common::*;
use time_weighted_farming::*;

#[test]
fn admin_operations_require_the_registered_owner() -> TestResult {
    let t = setup_farm();
    let pool_id = funded_pool(&t, default_params());
    let intruder = account(0x66);

    for err in [
        t.farm.change_owner(intruder, intruder).unwrap_err(),
        t.farm.change_dev(intruder, intruder).unwrap_err(),
        t.farm
            .set_allow_emergency_withdraw(intruder, pool_id, true)
            .unwrap_err(),
        t.farm
            .set_min_locked_duration(intruder, pool_id, DAY)
            .unwrap_err(),
    ] {
        assert_eq!(err, FarmError::InsufficientPermission { caller: intruder });
    }

    let pool = t.farm.pool_info(pool_id)?;
    assert!(!pool.allow_emergency_withdraw);
    assert_eq!(pool.min_locked_duration, TWO_WEEKS);
    Ok(())
}

#[test]
fn ownership_handover_transfers_the_gate() -> TestResult {
    let t = setup_farm();
    let new_owner = account(0x42);

    t.farm.change_owner(owner(), new_owner)?;

    // The old owner lost its rights; the new owner can operate.
    let err = t.farm.add_pool(owner(), default_params()).unwrap_err();
    assert_eq!(err, FarmError::InsufficientPermission { caller: owner() });
    t.farm.add_pool(new_owner, default_params())?;
    Ok(())
}

#[test]
fn change_dev_redirects_future_cuts_only() -> TestResult {
    let t = setup_farm();
    let pool_id = funded_pool(&t, default_params());
    let staker = account(1);
    t.ledger.mint_stake(staker, 1000);
    t.farm.deposit(pool_id, staker, 1000, TWO_WEEKS)?;

    t.clock.advance_blocks(100);
    t.farm.update_pool(pool_id)?;
    let old_dev_paid = t.ledger.reward_balance(dev());
    assert_eq!(old_dev_paid, 100 * 1000 * 3000 / 10_000);

    let new_dev = account(0xD1);
    t.farm.change_dev(owner(), new_dev)?;
    t.clock.advance_blocks(100);
    t.farm.update_pool(pool_id)?;

    assert_eq!(t.ledger.reward_balance(dev()), old_dev_paid);
    assert_eq!(t.ledger.reward_balance(new_dev), 100 * 1000 * 3000 / 10_000);
    assert_invariants(&t, pool_id, &[staker]);
    Ok(())
}

#[test]
fn set_min_locked_duration_applies_to_new_deposits() -> TestResult {
    let t = setup_farm();
    let pool_id = funded_pool(&t, default_params());
    let staker = account(1);
    t.ledger.mint_stake(staker, 2000);

    let err = t.farm.deposit(pool_id, staker, 1000, DAY).unwrap_err();
    assert!(matches!(err, FarmError::LockDurationInvalid { .. }));

    t.farm.set_min_locked_duration(owner(), pool_id, DAY)?;
    t.farm.deposit(pool_id, staker, 1000, DAY)?;

    assert_eq!(t.farm.pool_info(pool_id)?.min_locked_duration, DAY);
    Ok(())
}

#[test]
fn set_min_locked_duration_respects_global_bounds() -> TestResult {
    let t = setup_farm();
    let pool_id = funded_pool(&t, default_params());

    let below = t
        .farm
        .set_min_locked_duration(owner(), pool_id, DAY - 1)
        .unwrap_err();
    assert!(matches!(below, FarmError::LockDurationInvalid { .. }));

    let above = t
        .farm
        .set_min_locked_duration(owner(), pool_id, 31_536_000 + 1)
        .unwrap_err();
    assert!(matches!(above, FarmError::LockDurationInvalid { .. }));
    Ok(())
}
