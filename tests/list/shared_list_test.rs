/*!
 * Shared List Tests
 * Owning list behind a reader/writer lock
 */

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use tracked_pool::{ListError, Policy, SharedList};

#[test]
fn test_insert_around_pivots() {
    let list = SharedList::new();
    let mid = list.push_back(2).unwrap();
    list.insert_prev(mid, 1).unwrap();
    list.insert_next(mid, 3).unwrap();
    list.push_front(0).unwrap();

    assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    assert_eq!(list.len(), 4);
    assert_eq!(list.key_at(2).unwrap(), mid);
}

#[test]
fn test_with_value_reads_in_place() {
    let list = SharedList::new();
    list.push_back(String::from("alpha")).unwrap();
    list.push_back(String::from("beta")).unwrap();

    let len = list.with_value(1, String::len).unwrap();
    assert_eq!(len, 4);
    assert_eq!(
        list.with_value(2, String::len),
        Err(ListError::OutOfBounds { index: 2, size: 2 })
    );
}

#[test]
fn test_erase_returns_value_and_invalidates_key() {
    let list = SharedList::new();
    let key = list.push_back("gone").unwrap();
    list.push_back("kept").unwrap();

    assert_eq!(list.erase(key).unwrap(), "gone");
    assert!(matches!(list.erase(key), Err(ListError::MissingNode(_))));
    assert_eq!(list.to_vec(), vec!["kept"]);
}

#[test]
fn test_key_from_other_list_is_rejected() {
    let first = SharedList::new();
    let second = SharedList::new();
    let key = first.push_back("first's value").unwrap();
    second.push_back("second's value").unwrap();

    let foreign = ListError::ForeignNode {
        node: key.key(),
        list: second.id(),
    };
    assert_eq!(key.list(), first.id());
    assert_eq!(second.erase(key), Err(foreign.clone()));
    assert_eq!(second.insert_prev(key, "x"), Err(foreign));

    assert_eq!(second.to_vec(), vec!["second's value"]);
    assert_eq!(first.len(), 1);
    assert_eq!(first.erase(key).unwrap(), "first's value");
}

#[test]
fn test_destroy_through_clone_is_rejected_while_non_empty() {
    let list = SharedList::new();
    let other = list.clone();
    list.push_back(7u32).unwrap();

    let rejected = other.destroy().unwrap_err();
    assert_eq!(
        rejected.error(),
        &ListError::NonEmptyOnDestroy {
            list: list.id(),
            size: 1,
        }
    );
    let other = rejected.into_inner();
    assert_eq!(other.to_vec(), vec![7]);

    assert_eq!(list.clear().unwrap(), 1);
    assert!(other.destroy().is_ok());
    // The remaining clone still owns a usable list
    list.push_back(8).unwrap();
    assert_eq!(list.to_vec(), vec![8]);
}

#[test]
fn test_destroy_racing_with_pushes() {
    let list = SharedList::new();
    let pusher = {
        let list = list.clone();
        thread::spawn(move || {
            for i in 0..200u32 {
                list.push_back(i).unwrap();
            }
        })
    };

    let mut attempt = list.clone();
    for _ in 0..200 {
        match attempt.destroy() {
            Ok(()) => attempt = list.clone(),
            Err(rejected) => {
                assert!(matches!(
                    rejected.error(),
                    ListError::NonEmptyOnDestroy { size, .. } if (1..=200).contains(size)
                ));
                attempt = rejected.into_inner();
            }
        }
    }

    pusher.join().unwrap();
    assert_eq!(list.len(), 200);
    assert!(attempt.destroy().is_err());
}

#[test]
fn test_permissive_pop() {
    let list: SharedList<u8> = SharedList::with_policy(Policy::permissive());
    assert_eq!(list.pop_front().unwrap(), None);

    let strict: SharedList<u8> = SharedList::new();
    assert_eq!(strict.pop_back(), Err(ListError::EmptyPop(strict.id())));
}

#[test]
fn test_concurrent_readers_and_writers() {
    let list = Arc::new(SharedList::new());
    for i in 0..50 {
        list.push_back(i).unwrap();
    }

    let writer = {
        let list = Arc::clone(&list);
        thread::spawn(move || {
            for _ in 0..50 {
                list.pop_front().unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..3)
        .map(|_| {
            let list = Arc::clone(&list);
            thread::spawn(move || {
                for _ in 0..100 {
                    let snapshot = list.to_vec();
                    assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert!(list.is_empty());
}
