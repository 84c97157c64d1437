/*!
 * List Property Tests
 * Index lookup and size bookkeeping under random operation sequences
 */

use proptest::prelude::*;
use tracked_pool::{IntrusiveList, Linked, Node, NodeArena, NodeKey};

#[derive(Debug, Clone)]
enum Op {
    PushBack,
    PushFront,
    InsertNext(usize),
    InsertPrev(usize),
    Erase(usize),
    PopBack,
    PopFront,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::PushBack),
        Just(Op::PushFront),
        any::<usize>().prop_map(Op::InsertNext),
        any::<usize>().prop_map(Op::InsertPrev),
        any::<usize>().prop_map(Op::Erase),
        Just(Op::PopBack),
        Just(Op::PopFront),
    ]
}

/// Walk `steps` next-links from the front
fn walk(list: &IntrusiveList, nodes: &NodeArena<Node<u32>>, steps: usize) -> Option<NodeKey> {
    let mut cursor = list.front();
    for _ in 0..steps {
        cursor = nodes.get(cursor?)?.link().next();
    }
    cursor
}

proptest! {
    #[test]
    fn get_matches_forward_walk(len in 0usize..64) {
        let mut nodes = NodeArena::new();
        let mut list = IntrusiveList::new();
        for i in 0..len {
            let key = nodes.insert(Node::new(i as u32));
            list.push_back(&mut nodes, key).unwrap();
        }

        for idx in 0..len {
            prop_assert_eq!(list.get(&nodes, idx).ok(), walk(&list, &nodes, idx));
        }
        prop_assert!(list.get(&nodes, len).is_err());
    }

    #[test]
    fn size_tracks_linked_nodes(ops in prop::collection::vec(op(), 0..128)) {
        let mut nodes = NodeArena::new();
        let mut list = IntrusiveList::new();
        let mut model: Vec<NodeKey> = Vec::new();
        let mut next_value = 0u32;

        for op in ops {
            match op {
                Op::PushBack => {
                    let key = nodes.insert(Node::new(next_value));
                    list.push_back(&mut nodes, key).unwrap();
                    model.push(key);
                }
                Op::PushFront => {
                    let key = nodes.insert(Node::new(next_value));
                    list.push_front(&mut nodes, key).unwrap();
                    model.insert(0, key);
                }
                Op::InsertNext(at) if !model.is_empty() => {
                    let at = at % model.len();
                    let key = nodes.insert(Node::new(next_value));
                    list.insert_next(&mut nodes, model[at], key).unwrap();
                    model.insert(at + 1, key);
                }
                Op::InsertPrev(at) if !model.is_empty() => {
                    let at = at % model.len();
                    let key = nodes.insert(Node::new(next_value));
                    list.insert_prev(&mut nodes, model[at], key).unwrap();
                    model.insert(at, key);
                }
                Op::Erase(at) if !model.is_empty() => {
                    let key = model.remove(at % model.len());
                    list.erase(&mut nodes, key).unwrap();
                }
                Op::PopBack if !model.is_empty() => {
                    prop_assert_eq!(list.pop_back(&mut nodes).unwrap(), model.pop());
                }
                Op::PopFront if !model.is_empty() => {
                    let expected = model.remove(0);
                    prop_assert_eq!(list.pop_front(&mut nodes).unwrap(), Some(expected));
                }
                _ => prop_assert!(model.is_empty()),
            }
            next_value += 1;

            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.front().is_none(), model.is_empty());
            prop_assert_eq!(list.back().is_none(), model.is_empty());
        }

        prop_assert_eq!(list.keys(&nodes), model.clone());
        let mut reversed: Vec<_> = list.iter_rev(&nodes).map(|(key, _)| key).collect();
        reversed.reverse();
        prop_assert_eq!(reversed, model);
    }
}
