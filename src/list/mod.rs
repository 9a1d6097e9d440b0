use std::fmt::{Debug, Formatter};

use crate::list::cursor::Cursor;
use crate::seq::SimpleList;
use crate::{IntoIter, Iter};

pub mod cursor;
pub mod iterator;

/// A stable handle to an arena slot.
///
/// Links between nodes are plain indices into the owning list's arena. They
/// are copyable and comparable and carry no lifetime or ownership: the arena
/// owns every slot, the indices merely navigate between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeIndex(pub(crate) usize);

/// The dummy sentinel always lives in arena slot 0.
pub(crate) const SENTINEL: NodeIndex = NodeIndex(0);

/// The `List` is a circularly-linked, doubly-linked list with a dummy
/// sentinel node, stored in an arena and addressed by stable slot indices.
/// It allows inserting and removing elements at any cursor position in
/// constant time; reaching an arbitrary position takes *O*(*n*) time.
///
/// The sentinel is always part of the cycle and never holds a value, so no
/// link is ever null: `sentinel.next` is the first element (or the sentinel
/// itself when the list is empty) and `sentinel.prev` is the last.
///
/// The list also keeps a change counter that is advanced on every structural
/// mutation. Cursors snapshot it and refuse to operate once it has moved on
/// without them; see [`Cursor`].
#[derive(Clone)]
pub struct List<T> {
    /// Arena of nodes. Slot 0 is the sentinel, which never moves and never
    /// holds a value.
    nodes: Vec<Node<T>>,
    /// Detached slots awaiting reuse. A detached slot keeps its stale links
    /// until it is reattached.
    free: Vec<NodeIndex>,
    /// The number of live (non-sentinel, non-detached) nodes.
    pub(crate) len: usize,
    /// Advanced on every structural mutation, never reset.
    pub(crate) changes: u64,
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) next: NodeIndex,
    pub(crate) prev: NodeIndex,
    /// `None` for the sentinel and for detached slots.
    pub(crate) value: Option<T>,
}

// Link-splicing layer. No bounds or existence checks are made here beyond
// debug assertions; the cursor layer enforces all preconditions.
impl<T> List<T> {
    pub(crate) fn node(&self, at: NodeIndex) -> &Node<T> {
        &self.nodes[at.0]
    }

    pub(crate) fn node_mut(&mut self, at: NodeIndex) -> &mut Node<T> {
        &mut self.nodes[at.0]
    }

    pub(crate) fn next_of(&self, at: NodeIndex) -> NodeIndex {
        self.node(at).next
    }

    pub(crate) fn prev_of(&self, at: NodeIndex) -> NodeIndex {
        self.node(at).prev
    }

    /// Returns the value held by a live slot.
    ///
    /// Panics if `at` is the sentinel or a detached slot, neither of which
    /// is reachable through a well-formed cursor position.
    pub(crate) fn value(&self, at: NodeIndex) -> &T {
        self.nodes[at.0].value.as_ref().expect("slot holds no value")
    }

    pub(crate) fn connect(&mut self, prev: NodeIndex, next: NodeIndex) {
        self.node_mut(prev).next = next;
        self.node_mut(next).prev = prev;
    }

    /// Allocates a node holding `value` and splices it between the adjacent
    /// slots `prev` and `next`. Detached slots are reused before the arena
    /// grows.
    pub(crate) fn attach(&mut self, prev: NodeIndex, next: NodeIndex, value: T) -> NodeIndex {
        debug_assert_eq!(self.node(prev).next, next);
        debug_assert_eq!(self.node(next).prev, prev);
        let node = match self.free.pop() {
            Some(slot) => {
                self.node_mut(slot).value = Some(value);
                slot
            }
            None => {
                let slot = NodeIndex(self.nodes.len());
                self.nodes.push(Node {
                    next,
                    prev,
                    value: Some(value),
                });
                slot
            }
        };
        self.connect(prev, node);
        self.connect(node, next);
        self.len += 1;
        node
    }

    /// Splices `node` out of the cycle and takes its value.
    ///
    /// The detached slot's own `prev`/`next` still point into the old cycle:
    /// a cursor repairing itself reads through them during the same logical
    /// step, so they must keep resolving to live slots.
    pub(crate) fn detach(&mut self, node: NodeIndex) -> T {
        let (prev, next) = {
            let n = self.node(node);
            (n.prev, n.next)
        };
        self.connect(prev, next);
        self.len -= 1;
        self.free.push(node);
        self.node_mut(node)
            .value
            .take()
            .expect("detached a slot holding no value")
    }

    /// Advances the change counter and returns the new value.
    pub(crate) fn bump(&mut self) -> u64 {
        self.changes += 1;
        self.changes
    }
}

impl<T> List<T> {
    /// Creates an empty `List`: the sentinel linked to itself, no elements.
    ///
    /// # Examples
    /// ```
    /// use cdll::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                next: SENTINEL,
                prev: SENTINEL,
                value: None,
            }],
            free: Vec::new(),
            len: 0,
            changes: 0,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements in the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`.
    ///
    /// This is a structural mutation: live cursors become stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.front(), None);
    /// ```
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].next = SENTINEL;
        self.nodes[0].prev = SENTINEL;
        self.free.clear();
        if self.len != 0 {
            self.len = 0;
            self.bump();
        }
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(self.value(self.next_of(SENTINEL)))
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1);
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(self.value(self.prev_of(SENTINEL)))
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Some(&2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    pub fn push_front(&mut self, value: T) {
        let first = self.next_of(SENTINEL);
        self.attach(SENTINEL, first, value);
        self.bump();
    }

    /// Appends an element to the back of the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, value: T) {
        let last = self.prev_of(SENTINEL);
        self.attach(last, SENTINEL, value);
        self.bump();
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let first = self.next_of(SENTINEL);
        let value = self.detach(first);
        self.bump();
        Some(value)
    }

    /// Removes the last element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let last = self.prev_of(SENTINEL);
        let value = self.detach(last);
        self.bump();
        Some(value)
    }

    /// Provides a cursor positioned before the first element.
    ///
    /// The cursor does not borrow the list; it is handed the list on every
    /// operation instead, so several cursors can be live at once. See
    /// [`Cursor`] for the traversal and editing operations and the
    /// fail-fast rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.next(&list), Ok(&1));
    /// assert_eq!(cursor.next(&list), Ok(&2));
    /// ```
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self)
    }

    /// Provides a forward iterator.
    ///
    /// Each call yields an independent traversal starting from the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T> SimpleList<T> for List<T> {
    type Cursor = Cursor;

    fn len(&self) -> usize {
        List::len(self)
    }

    fn list_cursor(&self) -> Cursor {
        self.cursor()
    }

    fn values(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type
// parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::list::{List, SENTINEL};
    use std::iter::FromIterator;

    /// Walking `next` from the sentinel's successor exactly `len` times must
    /// return to the sentinel, and every node must agree with its neighbors.
    fn assert_well_formed<T>(list: &List<T>) {
        let mut at = list.next_of(SENTINEL);
        for _ in 0..list.len() {
            assert_ne!(at, SENTINEL, "cycle shorter than len");
            assert_eq!(list.prev_of(list.next_of(at)), at);
            assert_eq!(list.next_of(list.prev_of(at)), at);
            at = list.next_of(at);
        }
        assert_eq!(at, SENTINEL, "cycle longer than len");
        assert_eq!(list.len(), list.iter().count());
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        assert_well_formed(&list);
        list.push_back(1);
        assert!(!list.is_empty());
        assert_well_formed(&list);
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
        assert_well_formed(&list);
    }

    #[test]
    fn sentinel_self_linked_iff_empty() {
        let mut list = List::new();
        assert_eq!(list.next_of(SENTINEL), SENTINEL);
        assert_eq!(list.prev_of(SENTINEL), SENTINEL);

        list.push_back('a');
        assert_ne!(list.next_of(SENTINEL), SENTINEL);
        assert_ne!(list.prev_of(SENTINEL), SENTINEL);

        list.pop_front();
        assert_eq!(list.next_of(SENTINEL), SENTINEL);
        assert_eq!(list.prev_of(SENTINEL), SENTINEL);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), None);

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        assert_well_formed(&list);
        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_front(), Some(1));
        assert!(list.is_empty());
    }

    #[test]
    fn list_len_tracks_mutations() {
        let mut list = List::from_iter(0..5);
        assert_eq!(list.len(), 5);
        assert_well_formed(&list);

        list.pop_front();
        list.pop_back();
        assert_eq!(list.len(), 3);
        assert_well_formed(&list);

        list.clear();
        assert_eq!(list.len(), 0);
        assert_well_formed(&list);
    }

    #[test]
    fn detached_slots_are_reused() {
        let mut list = List::from_iter(0..4);
        let slots = list.nodes.len();

        list.pop_front();
        list.pop_back();
        list.push_back(9);
        list.push_back(10);
        assert_eq!(list.nodes.len(), slots, "arena grew despite free slots");
        assert_well_formed(&list);
        assert_eq!(Vec::from_iter(list), vec![1, 2, 9, 10]);
    }

    #[test]
    fn structural_mutations_advance_change_counter() {
        let mut list = List::new();
        let mut last = list.changes;
        list.push_back(1);
        assert!(list.changes > last);
        last = list.changes;
        list.pop_front();
        assert!(list.changes > last);
        last = list.changes;
        list.clear(); // already empty, not a structural change
        assert_eq!(list.changes, last);
    }

    #[test]
    fn list_eq_and_debug() {
        let list = List::from_iter([1, 2, 3]);
        assert_eq!(list, List::from_iter([1, 2, 3]));
        assert_ne!(list, List::from_iter([1, 2]));
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");
    }
}
