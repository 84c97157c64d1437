/*!
 * Pool Property Tests
 * Byte accounting and content preservation under random histories
 */

use proptest::prelude::*;
use tracked_pool::{call_site, Handle, LocalPool};

#[derive(Debug, Clone)]
enum Op {
    Allocate(usize),
    ZeroAllocate(usize, usize),
    Free(usize),
    Reallocate(usize, usize),
    Duplicate(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1usize..256).prop_map(Op::Allocate),
        (1usize..16, 1usize..16).prop_map(|(c, s)| Op::ZeroAllocate(c, s)),
        any::<usize>().prop_map(Op::Free),
        (any::<usize>(), 1usize..256).prop_map(|(i, s)| Op::Reallocate(i, s)),
        (any::<usize>(), 1usize..256).prop_map(|(i, s)| Op::Duplicate(i, s)),
    ]
}

proptest! {
    #[test]
    fn bytes_equal_sum_of_live_sizes(ops in prop::collection::vec(op(), 0..64)) {
        let mut pool = LocalPool::new(call_site!("property"));
        let mut live: Vec<(Handle, usize)> = Vec::new();

        for op in ops {
            match op {
                Op::Allocate(size) => {
                    live.push((pool.allocate(size, call_site!()).unwrap(), size));
                }
                Op::ZeroAllocate(count, size) => {
                    live.push((pool.zero_allocate(count, size, call_site!()).unwrap(), count * size));
                }
                Op::Free(i) if !live.is_empty() => {
                    let (handle, size) = live.swap_remove(i % live.len());
                    prop_assert_eq!(pool.free(handle).unwrap(), size);
                }
                Op::Reallocate(i, size) if !live.is_empty() => {
                    let slot = i % live.len();
                    let moved = pool.reallocate(live[slot].0, size, call_site!()).unwrap();
                    live[slot] = (moved, size);
                }
                Op::Duplicate(i, size) if !live.is_empty() => {
                    let source = live[i % live.len()].0;
                    live.push((pool.duplicate(source, size, call_site!()).unwrap(), size));
                }
                _ => {}
            }

            prop_assert_eq!(pool.count(), live.len());
            prop_assert_eq!(pool.bytes(), live.iter().map(|(_, size)| size).sum::<usize>());
        }

        pool.free_all().unwrap();
        prop_assert_eq!(pool.count(), 0);
        prop_assert_eq!(pool.bytes(), 0);
        prop_assert!(pool.destroy().is_ok());
    }

    #[test]
    fn reallocate_preserves_prefix(
        data in prop::collection::vec(any::<u8>(), 1..128),
        new_size in 1usize..256,
    ) {
        let mut pool = LocalPool::new(call_site!());
        let h = pool.allocate(data.len(), call_site!()).unwrap();
        pool.write_at(h, 0, &data).unwrap();

        let moved = pool.reallocate(h, new_size, call_site!()).unwrap();
        let bytes = pool.read_to_vec(moved).unwrap();
        let keep = data.len().min(new_size);

        prop_assert_eq!(bytes.len(), new_size);
        prop_assert_eq!(&bytes[..keep], &data[..keep]);
        prop_assert!(bytes[keep..].iter().all(|b| *b == 0));
        pool.free_all().unwrap();
    }

    #[test]
    fn duplicate_copies_prefix_and_keeps_source(
        data in prop::collection::vec(any::<u8>(), 1..128),
        copy_size in 1usize..256,
    ) {
        let mut pool = LocalPool::new(call_site!());
        let source = pool.allocate(data.len(), call_site!()).unwrap();
        pool.write_at(source, 0, &data).unwrap();

        let copy = pool.duplicate(source, copy_size, call_site!()).unwrap();
        let keep = data.len().min(copy_size);

        prop_assert_ne!(copy, source);
        prop_assert_eq!(&pool.view(copy).unwrap()[..keep], &data[..keep]);
        prop_assert_eq!(pool.view(source).unwrap(), &data[..]);
        pool.free_all().unwrap();
    }

    #[test]
    fn destroy_only_when_empty(sizes in prop::collection::vec(1usize..64, 1..16)) {
        let mut pool = LocalPool::new(call_site!());
        let handles: Vec<_> = sizes
            .iter()
            .map(|size| pool.allocate(*size, call_site!()).unwrap())
            .collect();

        for handle in &handles {
            let rejected = pool.destroy();
            prop_assert!(rejected.is_err());
            pool = rejected.unwrap_err().into_inner();
            pool.free(*handle).unwrap();
        }
        prop_assert!(pool.destroy().is_ok());
    }
}
