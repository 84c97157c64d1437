/*!
 * Intrusive List Tests
 * Membership, ordering and misuse detection over an external arena
 */

use pretty_assertions::assert_eq;
use tracked_pool::{IntrusiveList, ListError, Linked, Node, NodeArena, NodeKey, Policy};

/// A record with its own fields and an embedded link, like a real owner type
#[derive(Debug, Clone)]
struct Task {
    name: &'static str,
    link: tracked_pool::Link,
}

impl Task {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            link: tracked_pool::Link::unlinked(),
        }
    }
}

impl Linked for Task {
    fn link(&self) -> &tracked_pool::Link {
        &self.link
    }

    fn link_mut(&mut self) -> &mut tracked_pool::Link {
        &mut self.link
    }
}

fn names(list: &IntrusiveList, tasks: &NodeArena<Task>) -> Vec<&'static str> {
    list.iter(tasks).map(|(_, task)| task.name).collect()
}

#[test]
fn test_custom_record_type() {
    let mut tasks = NodeArena::new();
    let mut queue = IntrusiveList::new();

    let build = tasks.insert(Task::new("build"));
    let test = tasks.insert(Task::new("test"));
    let deploy = tasks.insert(Task::new("deploy"));
    queue.push_back(&mut tasks, build).unwrap();
    queue.push_back(&mut tasks, deploy).unwrap();
    queue.insert_prev(&mut tasks, deploy, test).unwrap();

    assert_eq!(names(&queue, &tasks), vec!["build", "test", "deploy"]);
    assert_eq!(queue.next_of(&tasks, build).unwrap(), Some(test));
    assert_eq!(queue.prev_of(&tasks, build).unwrap(), None);
    assert_eq!(queue.next_of(&tasks, deploy).unwrap(), None);
}

#[test]
fn test_record_moves_between_lists() {
    let mut tasks = NodeArena::new();
    let mut pending = IntrusiveList::new();
    let mut done = IntrusiveList::new();

    let job = tasks.insert(Task::new("job"));
    pending.push_back(&mut tasks, job).unwrap();

    let err = done.push_back(&mut tasks, job).unwrap_err();
    assert_eq!(
        err,
        ListError::AlreadyLinked {
            node: job,
            owner: pending.id()
        }
    );

    pending.erase(&mut tasks, job).unwrap();
    done.push_back(&mut tasks, job).unwrap();
    assert!(pending.is_empty());
    assert_eq!(done.len(), 1);
    assert_eq!(tasks.get(job).unwrap().link().owner(), Some(done.id()));
}

#[test]
fn test_duplicate_to_use_elsewhere() {
    let mut tasks = NodeArena::new();
    let mut first = IntrusiveList::new();
    let mut second = IntrusiveList::new();

    let original = tasks.insert(Task::new("shared"));
    first.push_back(&mut tasks, original).unwrap();

    let copy = tasks.duplicate(original).unwrap();
    second.push_back(&mut tasks, copy).unwrap();

    assert_eq!(names(&first, &tasks), vec!["shared"]);
    assert_eq!(names(&second, &tasks), vec!["shared"]);
    assert_eq!(tasks.len(), 2);
}

#[test]
fn test_pivot_must_be_member() {
    let mut nodes = NodeArena::new();
    let mut list = IntrusiveList::new();
    let outsider = nodes.insert(Node::new(1));
    let node = nodes.insert(Node::new(2));

    let err = list.insert_next(&mut nodes, outsider, node).unwrap_err();
    assert_eq!(
        err,
        ListError::ForeignNode {
            node: outsider,
            list: list.id()
        }
    );
    assert!(list.is_empty());
    assert!(!nodes.get(node).unwrap().link().is_linked());
}

#[test]
fn test_released_node_is_missing() {
    let mut nodes = NodeArena::new();
    let mut list = IntrusiveList::new();
    let key = nodes.insert(Node::new("gone"));
    nodes.remove(key);

    assert_eq!(
        list.push_front(&mut nodes, key),
        Err(ListError::MissingNode(key))
    );
    assert_eq!(
        list.push_back(&mut nodes, NodeKey::NULL),
        Err(ListError::MissingNode(NodeKey::NULL))
    );
}

#[test]
fn test_pop_order() {
    let mut nodes = NodeArena::new();
    let mut list = IntrusiveList::new();
    let keys: Vec<_> = (0..4).map(|i| nodes.insert(Node::new(i))).collect();
    for key in &keys {
        list.push_back(&mut nodes, *key).unwrap();
    }

    assert_eq!(list.pop_front(&mut nodes).unwrap(), Some(keys[0]));
    assert_eq!(list.pop_back(&mut nodes).unwrap(), Some(keys[3]));
    assert_eq!(list.len(), 2);
    assert_eq!(list.front(), Some(keys[1]));
    assert_eq!(list.back(), Some(keys[2]));
}

#[test]
fn test_empty_pop_is_error_by_default() {
    let mut nodes: NodeArena<Node<u8>> = NodeArena::new();
    let mut list = IntrusiveList::new();

    let err = list.pop_front(&mut nodes).unwrap_err();
    assert_eq!(err, ListError::EmptyPop(list.id()));
    assert!(err.to_string().contains("empty"));
}

#[test]
fn test_empty_pop_tolerated() {
    let mut nodes: NodeArena<Node<u8>> = NodeArena::new();
    let mut list = IntrusiveList::with_policy(Policy::default().with_empty_pop(true));

    assert_eq!(list.pop_back(&mut nodes), Ok(None));
    assert_eq!(list.pop_front(&mut nodes), Ok(None));
}

#[test]
fn test_get_out_of_bounds_reports_size() {
    let mut nodes = NodeArena::new();
    let mut list = IntrusiveList::new();
    let key = nodes.insert(Node::new(()));
    list.push_back(&mut nodes, key).unwrap();

    assert_eq!(list.get(&nodes, 0), Ok(key));
    assert_eq!(
        list.get(&nodes, 1),
        Err(ListError::OutOfBounds { index: 1, size: 1 })
    );
}

#[test]
fn test_destroy_non_empty_hands_list_back() {
    let mut nodes = NodeArena::new();
    let mut list = IntrusiveList::new();
    let id = list.id();
    let key = nodes.insert(Node::new('x'));
    list.push_back(&mut nodes, key).unwrap();

    let rejected = list.destroy().unwrap_err();
    assert_eq!(
        rejected.error(),
        &ListError::NonEmptyOnDestroy { list: id, size: 1 }
    );

    let mut list = rejected.into_inner();
    assert_eq!(list.id(), id);
    list.clear(&mut nodes).unwrap();
    assert!(list.destroy().is_ok());
    assert!(!nodes.get(key).unwrap().link().is_linked());
}
