/*!
 * Pool Scenario Tests
 * The reference create / allocate / duplicate / move / destroy walkthroughs
 */

use pretty_assertions::assert_eq;
use tracked_pool::{call_site, LocalPool, PoolError, SharedPool};

#[test]
fn test_scenario_a_individual_and_bulk_release() {
    let mut pool = LocalPool::new(call_site!("P"));
    let x = pool.allocate(64, call_site!("x")).unwrap();
    let _y = pool.allocate(128, call_site!("y")).unwrap();
    assert_eq!(pool.count(), 2);
    assert_eq!(pool.bytes(), 192);

    pool.free(x).unwrap();
    assert_eq!(pool.count(), 1);
    assert_eq!(pool.bytes(), 128);

    pool.free_all().unwrap();
    assert_eq!(pool.count(), 0);
    assert!(pool.destroy().is_ok());
}

#[test]
fn test_scenario_b_duplicate() {
    let mut pool = LocalPool::new(call_site!("P"));
    let z = pool.allocate(10, call_site!("z")).unwrap();
    pool.view_mut(z).unwrap().copy_from_slice(b"abcdefghij");

    let w = pool.duplicate(z, 10, call_site!("w")).unwrap();
    assert_ne!(w, z);
    assert_eq!(pool.view(w).unwrap(), pool.view(z).unwrap());

    pool.free(z).unwrap();
    pool.free(w).unwrap();
    assert!(pool.destroy().is_ok());
}

#[test]
fn test_scenario_c_cross_pool_reallocate() {
    let mut p1 = LocalPool::new(call_site!("P1"));
    let mut p2 = LocalPool::new(call_site!("P2"));

    let a = p1.allocate(32, call_site!("a")).unwrap();
    let b = p2.reallocate_from(&mut p1, a, 64, call_site!("b")).unwrap();
    assert_eq!(p1.bytes(), 0);
    assert_eq!(p2.bytes(), 64);
    assert_eq!(b.pool(), p2.id());

    // The old handle is gone from both pools
    assert_eq!(p1.free(a), Err(PoolError::StaleHandle(a)));
    assert!(matches!(p2.free(a), Err(PoolError::ForeignPointer { .. })));

    p2.free(b).unwrap();
    assert!(p1.destroy().is_ok());
    assert!(p2.destroy().is_ok());
}

#[test]
fn test_scenario_c_on_shared_pools() {
    let p1 = SharedPool::new(call_site!("P1"));
    let p2 = SharedPool::new(call_site!("P2"));

    let a = p1.allocate(32, call_site!("a")).unwrap();
    p1.write_at(a, 0, b"moved").unwrap();
    let b = p2.reallocate_from(&p1, a, 64, call_site!("b")).unwrap();

    assert_eq!(p1.bytes(), 0);
    assert_eq!(p2.bytes(), 64);
    assert_eq!(&p2.read_to_vec(b).unwrap()[..5], b"moved");
    p2.free(b).unwrap();
}

#[test]
fn test_destroy_rejected_while_non_empty() {
    let mut pool = LocalPool::new(call_site!("P"));
    let h = pool.allocate(1, call_site!()).unwrap();

    let rejected = pool.destroy().unwrap_err();
    assert_eq!(
        rejected.error().to_string(),
        format!("{} still tracks 1 allocations (1 bytes)", h.pool())
    );

    let mut pool = rejected.into_inner();
    assert_eq!(pool.size_of(h), Ok(1));
    pool.free(h).unwrap();
    assert!(pool.destroy().is_ok());
}
