//! A non-circular, sentinel-free list variant.
//!
//! [`LinearList`] stores the same kind of arena-backed nodes as
//! [`List`](crate::List), but there is no dummy node: the list keeps
//! explicit, possibly absent `front` and `back` handles, and every link at a
//! boundary is an `Option`. The empty list is a distinguished state here,
//! whereas the sentinel variant has none.
//!
//! From the outside the two variants are interchangeable: both implement
//! [`SimpleList`] and produce identical value sequences and identical
//! fail-fast behavior. The sentinel exists purely to remove the boundary
//! special cases at the link-splicing level, and this module is what those
//! special cases look like when they are not removed.

use std::fmt::{Debug, Formatter};
use std::iter::{FromIterator, FusedIterator};

use crate::error::CursorError;
use crate::list::NodeIndex;
use crate::seq::{SeqCursor, SimpleList};

/// A doubly-linked list without a sentinel, ends terminated by `None`.
///
/// Mutation goes through [`LinearCursor`]; see [`cursor`](LinearList::cursor).
///
/// # Examples
///
/// ```
/// use cdll::LinearList;
/// use std::iter::FromIterator;
///
/// let list = LinearList::from_iter([1, 2, 3]);
/// let mut cursor = list.cursor();
/// assert_eq!(cursor.next(&list), Ok(&1));
/// ```
pub struct LinearList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<NodeIndex>,
    front: Option<NodeIndex>,
    back: Option<NodeIndex>,
    len: usize,
    changes: u64,
}

struct Slot<T> {
    next: Option<NodeIndex>,
    prev: Option<NodeIndex>,
    /// `None` for detached slots.
    value: Option<T>,
}

impl<T> LinearList<T> {
    fn slot(&self, at: NodeIndex) -> &Slot<T> {
        &self.slots[at.0]
    }

    fn value(&self, at: NodeIndex) -> &T {
        self.slots[at.0].value.as_ref().expect("slot holds no value")
    }

    /// Allocates a node between `prev` and `next`, either of which may be
    /// the absent boundary. Updates `front`/`back` accordingly.
    fn alloc(&mut self, prev: Option<NodeIndex>, next: Option<NodeIndex>, value: T) -> NodeIndex {
        let node = match self.free.pop() {
            Some(slot) => {
                let reused = &mut self.slots[slot.0];
                reused.prev = prev;
                reused.next = next;
                reused.value = Some(value);
                slot
            }
            None => {
                self.slots.push(Slot {
                    next,
                    prev,
                    value: Some(value),
                });
                NodeIndex(self.slots.len() - 1)
            }
        };
        match prev {
            Some(p) => self.slots[p.0].next = Some(node),
            None => self.front = Some(node),
        }
        match next {
            Some(n) => self.slots[n.0].prev = Some(node),
            None => self.back = Some(node),
        }
        self.len += 1;
        node
    }

    /// Splices `node` out and takes its value. The detached slot keeps its
    /// stale links for the same reason the sentinel variant does: cursor
    /// repair reads through them within the same step.
    fn unlink(&mut self, node: NodeIndex) -> T {
        let (prev, next) = {
            let s = self.slot(node);
            (s.prev, s.next)
        };
        match prev {
            Some(p) => self.slots[p.0].next = next,
            None => self.front = next,
        }
        match next {
            Some(n) => self.slots[n.0].prev = prev,
            None => self.back = prev,
        }
        self.len -= 1;
        self.free.push(node);
        self.slots[node.0]
            .value
            .take()
            .expect("detached a slot holding no value")
    }

    fn bump(&mut self) -> u64 {
        self.changes += 1;
        self.changes
    }
}

impl<T> LinearList<T> {
    /// Creates an empty `LinearList`.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            front: None,
            back: None,
            len: 0,
            changes: 0,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an element to the back of the list.
    ///
    /// This is a structural mutation: live cursors become stale.
    pub fn push_back(&mut self, value: T) {
        let back = self.back;
        self.alloc(back, None, value);
        self.bump();
    }

    /// Provides a cursor positioned before the first element.
    ///
    /// Same contract as [`List::cursor`](crate::List::cursor): the cursor
    /// does not borrow the list and goes stale as soon as anything else
    /// structurally mutates it.
    pub fn cursor(&self) -> LinearCursor {
        LinearCursor {
            pos: 0,
            before: None,
            after: self.front,
            visited: None,
            stamp: self.changes,
        }
    }

    /// Provides a forward iterator. Each call yields an independent
    /// traversal starting from the front.
    pub fn iter(&self) -> LinearIter<'_, T> {
        LinearIter {
            list: self,
            at: self.front,
        }
    }
}

impl<T> Default for LinearList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for LinearList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for LinearList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinearList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinearList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value));
    }
}

impl<T> SimpleList<T> for LinearList<T> {
    type Cursor = LinearCursor;

    fn len(&self) -> usize {
        LinearList::len(self)
    }

    fn list_cursor(&self) -> LinearCursor {
        self.cursor()
    }

    fn values(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

/// A fail-fast bidirectional cursor over a [`LinearList`].
///
/// Behaves exactly like [`Cursor`](crate::Cursor), except that the nodes
/// straddling the gap are absent at the boundaries instead of resolving
/// through a sentinel.
#[derive(Debug, Clone)]
pub struct LinearCursor {
    pos: usize,
    before: Option<NodeIndex>,
    after: Option<NodeIndex>,
    visited: Option<NodeIndex>,
    stamp: u64,
}

impl LinearCursor {
    fn check<T>(&self, list: &LinearList<T>) -> Result<(), CursorError> {
        if self.stamp != list.changes {
            return Err(CursorError::StaleCursor);
        }
        Ok(())
    }

    /// Returns `true` if a call to [`next`](LinearCursor::next) would yield
    /// an element.
    pub fn has_next<T>(&self, list: &LinearList<T>) -> Result<bool, CursorError> {
        self.check(list)?;
        Ok(self.pos < list.len)
    }

    /// Returns `true` if a call to [`previous`](LinearCursor::previous)
    /// would yield an element.
    pub fn has_previous<T>(&self, list: &LinearList<T>) -> Result<bool, CursorError> {
        self.check(list)?;
        Ok(self.pos > 0)
    }

    /// Returns the index of the element a call to
    /// [`next`](LinearCursor::next) would yield.
    pub fn next_index<T>(&self, list: &LinearList<T>) -> Result<usize, CursorError> {
        self.check(list)?;
        Ok(self.pos)
    }

    /// Returns the index of the element a call to
    /// [`previous`](LinearCursor::previous) would yield, or `None` at the
    /// front.
    pub fn previous_index<T>(&self, list: &LinearList<T>) -> Result<Option<usize>, CursorError> {
        self.check(list)?;
        Ok(self.pos.checked_sub(1))
    }

    /// Moves the cursor over the next element and returns a reference to it.
    pub fn next<'l, T>(&mut self, list: &'l LinearList<T>) -> Result<&'l T, CursorError> {
        if !self.has_next(list)? {
            return Err(CursorError::EndOfSequence);
        }
        let node = match self.after {
            Some(node) => node,
            None => return Err(CursorError::EndOfSequence),
        };
        self.visited = Some(node);
        self.before = Some(node);
        self.after = list.slot(node).next;
        self.pos += 1;
        Ok(list.value(node))
    }

    /// Moves the cursor back over the previous element and returns a
    /// reference to it.
    pub fn previous<'l, T>(&mut self, list: &'l LinearList<T>) -> Result<&'l T, CursorError> {
        if !self.has_previous(list)? {
            return Err(CursorError::EndOfSequence);
        }
        let node = match self.before {
            Some(node) => node,
            None => return Err(CursorError::EndOfSequence),
        };
        self.visited = Some(node);
        self.after = Some(node);
        self.before = list.slot(node).prev;
        self.pos -= 1;
        Ok(list.value(node))
    }

    /// Inserts `value` into the cursor gap; the cursor ends up immediately
    /// after the new element. Structural; siblings become stale.
    pub fn add<T>(&mut self, list: &mut LinearList<T>, value: T) -> Result<(), CursorError> {
        self.check(list)?;
        let node = list.alloc(self.before, self.after, value);
        self.before = Some(node);
        self.pos += 1;
        self.visited = None;
        self.stamp = list.bump();
        Ok(())
    }

    /// Removes the most recently visited element. Structural; siblings
    /// become stale.
    pub fn remove<T>(&mut self, list: &mut LinearList<T>) -> Result<(), CursorError> {
        self.check(list)?;
        let node = self.visited.take().ok_or(CursorError::NoCurrentElement)?;
        if self.after == Some(node) {
            self.after = list.slot(node).next;
        }
        if self.before == Some(node) {
            self.before = list.slot(node).prev;
            self.pos -= 1;
        }
        list.unlink(node);
        self.stamp = list.bump();
        Ok(())
    }

    /// Replaces the value of the most recently visited element in place.
    /// Not structural; siblings stay valid.
    pub fn set<T>(&mut self, list: &mut LinearList<T>, value: T) -> Result<(), CursorError> {
        self.check(list)?;
        match self.visited {
            Some(node) => {
                list.slots[node.0].value = Some(value);
                Ok(())
            }
            None => Err(CursorError::NoCurrentElement),
        }
    }
}

impl<T> SeqCursor<T> for LinearCursor {
    type List = LinearList<T>;

    fn has_next(&self, list: &LinearList<T>) -> Result<bool, CursorError> {
        LinearCursor::has_next(self, list)
    }

    fn has_previous(&self, list: &LinearList<T>) -> Result<bool, CursorError> {
        LinearCursor::has_previous(self, list)
    }

    fn next<'l>(&mut self, list: &'l LinearList<T>) -> Result<&'l T, CursorError> {
        LinearCursor::next(self, list)
    }

    fn previous<'l>(&mut self, list: &'l LinearList<T>) -> Result<&'l T, CursorError> {
        LinearCursor::previous(self, list)
    }

    fn next_index(&self, list: &LinearList<T>) -> Result<usize, CursorError> {
        LinearCursor::next_index(self, list)
    }

    fn previous_index(&self, list: &LinearList<T>) -> Result<Option<usize>, CursorError> {
        LinearCursor::previous_index(self, list)
    }

    fn add(&mut self, list: &mut LinearList<T>, value: T) -> Result<(), CursorError> {
        LinearCursor::add(self, list, value)
    }

    fn remove(&mut self, list: &mut LinearList<T>) -> Result<(), CursorError> {
        LinearCursor::remove(self, list)
    }

    fn set(&mut self, list: &mut LinearList<T>, value: T) -> Result<(), CursorError> {
        LinearCursor::set(self, list, value)
    }
}

/// A forward iterator over the elements of a [`LinearList`].
pub struct LinearIter<'a, T> {
    list: &'a LinearList<T>,
    at: Option<NodeIndex>,
}

impl<'a, T> Iterator for LinearIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.at?;
        self.at = self.list.slot(node).next;
        Some(self.list.value(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.list.len()))
    }
}

impl<'a, T> FusedIterator for LinearIter<'a, T> {}

impl<'a, T> IntoIterator for &'a LinearList<T> {
    type Item = &'a T;
    type IntoIter = LinearIter<'a, T>;

    fn into_iter(self) -> LinearIter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::LinearList;
    use crate::error::CursorError;
    use std::iter::FromIterator;

    #[test]
    fn empty_list_is_a_distinguished_state() {
        let mut list = LinearList::new();
        assert!(list.is_empty());
        assert_eq!(list.front, None);
        assert_eq!(list.back, None);

        let mut cursor = list.cursor();
        assert_eq!(cursor.has_next(&list), Ok(false));
        assert_eq!(cursor.has_previous(&list), Ok(false));

        cursor.add(&mut list, "X").unwrap();
        assert_eq!(list.front, list.back);
        assert!(list.front.is_some());
        assert_eq!(cursor.has_previous(&list), Ok(true));
        assert_eq!(cursor.previous(&list), Ok(&"X"));
    }

    #[test]
    fn round_trip_matches_insertion_order() {
        let mut list = LinearList::new();
        let mut cursor = list.cursor();
        for value in ["A", "B", "C"] {
            cursor.add(&mut list, value).unwrap();
        }
        assert_eq!(Vec::from_iter(list.iter()), vec![&"A", &"B", &"C"]);

        let mut backward = Vec::new();
        while cursor.has_previous(&list).unwrap() {
            backward.push(*cursor.previous(&list).unwrap());
        }
        assert_eq!(backward, ["C", "B", "A"]);
    }

    #[test]
    fn boundary_removal_repairs_front_and_back() {
        let mut list = LinearList::from_iter([1, 2, 3]);
        let mut cursor = list.cursor();

        cursor.next(&list).unwrap();
        cursor.remove(&mut list).unwrap(); // removed the front
        assert_eq!(Vec::from_iter(list.iter()), vec![&2, &3]);

        while cursor.has_next(&list).unwrap() {
            cursor.next(&list).unwrap();
        }
        cursor.remove(&mut list).unwrap(); // removed the back
        assert_eq!(Vec::from_iter(list.iter()), vec![&2]);
        assert_eq!(list.back, list.front);
    }

    #[test]
    fn remove_behind_the_gap_shifts_the_position() {
        let mut list = LinearList::from_iter(["A", "B", "C", "D"]);
        let mut cursor = list.cursor();

        cursor.next(&list).unwrap();
        cursor.next(&list).unwrap();
        cursor.remove(&mut list).unwrap();
        assert_eq!(cursor.previous(&list), Ok(&"A"));
    }

    #[test]
    fn fails_fast_like_the_sentinel_variant() {
        let mut list = LinearList::from_iter([1, 2, 3]);
        let mut cursor1 = list.cursor();
        let mut cursor2 = list.cursor();

        cursor1.next(&list).unwrap();
        cursor1.remove(&mut list).unwrap();

        assert_eq!(cursor2.next(&list), Err(CursorError::StaleCursor));
        assert_eq!(cursor2.add(&mut list, 9), Err(CursorError::StaleCursor));
        assert_eq!(cursor1.next(&list), Ok(&2));
    }

    #[test]
    fn set_does_not_invalidate_siblings() {
        let mut list = LinearList::from_iter([1, 2, 3]);
        let mut cursor1 = list.cursor();
        let mut cursor2 = list.cursor();

        cursor1.next(&list).unwrap();
        cursor1.set(&mut list, 10).unwrap();
        assert_eq!(cursor2.next(&list), Ok(&10));
    }
}
