use crate::error::CursorError;
use crate::list::{List, NodeIndex, SENTINEL};
use crate::seq::SeqCursor;

/// A fail-fast bidirectional cursor (list-iterator) over a [`List`].
///
/// The cursor conceptually sits in the *gap* between two adjacent nodes. In
/// a list with length *n* there are *n* + 1 gaps, indexed by 0, 1, ..., *n*:
/// the position is the number of elements before the gap, which is also the
/// index of the element a call to [`next`](Cursor::next) would yield. On a
/// circular list the two nodes straddling the gap are always well defined,
/// including at both ends, where they resolve through the sentinel.
///
/// A `Cursor` does not borrow its list. Every operation is handed the list
/// as a parameter instead, which is what allows several cursors over the
/// same list to be live at once. A cursor must only ever be handed the list
/// that created it.
///
/// # Fail-fast
///
/// The cursor records the list's change counter when it is created and
/// whenever it mutates the list itself. Every operation first compares that
/// snapshot against the list and returns [`CursorError::StaleCursor`] on
/// mismatch, before touching any state: once a sibling cursor (or the list
/// directly) performs a structural mutation, this cursor is permanently
/// stale and must be discarded. [`set`](Cursor::set) is deliberately not a
/// structural mutation and invalidates nobody.
///
/// This detects *sequential* interference only. The list is not a
/// thread-safe structure and the check is a best-effort diagnostic, not a
/// correctness mechanism under parallel mutation.
///
/// # Examples
///
/// Here is a simple example showing how the cursor moves over the gaps (the
/// cursor gap is denoted by `|`).
/// ```
/// use cdll::List;
/// use std::iter::FromIterator;
///
/// // Create a list: [ A B C D ]
/// let list = List::from_iter(['A', 'B', 'C', 'D']);
///
/// // A fresh cursor sits before the first element: [|A B C D ]
/// let mut cursor = list.cursor();
/// assert_eq!(cursor.next_index(&list), Ok(0));
///
/// // Passing over an element yields it: [ A|B C D ]
/// assert_eq!(cursor.next(&list), Ok(&'A'));
/// assert_eq!(cursor.next_index(&list), Ok(1));
///
/// // And backing up yields it again: [|A B C D ]
/// assert_eq!(cursor.previous(&list), Ok(&'A'));
/// assert_eq!(cursor.has_previous(&list), Ok(false));
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    /// Number of elements before the gap; index of the next forward element.
    pos: usize,
    /// The node just behind the gap (the sentinel at position 0).
    before: NodeIndex,
    /// The node just ahead of the gap (the sentinel at position `len`).
    after: NodeIndex,
    /// The node eligible for `remove`/`set`: the one most recently passed
    /// over. `None` on a fresh cursor and after `add`/`remove`.
    visited: Option<NodeIndex>,
    /// The list's change counter as last observed by this cursor.
    stamp: u64,
}

impl Cursor {
    pub(crate) fn new<T>(list: &List<T>) -> Self {
        Self {
            pos: 0,
            before: SENTINEL,
            after: list.next_of(SENTINEL),
            visited: None,
            stamp: list.changes,
        }
    }

    /// The fail-fast check. Every operation starts here and aborts without
    /// touching cursor or list state when the snapshot no longer matches.
    fn check<T>(&self, list: &List<T>) -> Result<(), CursorError> {
        if self.stamp != list.changes {
            return Err(CursorError::StaleCursor);
        }
        Ok(())
    }

    /// Returns `true` if a call to [`next`](Cursor::next) would yield an
    /// element.
    ///
    /// Asking never moves the cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    ///
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.has_next(&list), Ok(true));
    /// cursor.next(&list).unwrap();
    /// assert_eq!(cursor.has_next(&list), Ok(false));
    /// ```
    pub fn has_next<T>(&self, list: &List<T>) -> Result<bool, CursorError> {
        self.check(list)?;
        Ok(self.pos < list.len)
    }

    /// Returns `true` if a call to [`previous`](Cursor::previous) would
    /// yield an element.
    pub fn has_previous<T>(&self, list: &List<T>) -> Result<bool, CursorError> {
        self.check(list)?;
        Ok(self.pos > 0)
    }

    /// Returns the index of the element a call to [`next`](Cursor::next)
    /// would yield, which is the cursor position itself.
    pub fn next_index<T>(&self, list: &List<T>) -> Result<usize, CursorError> {
        self.check(list)?;
        Ok(self.pos)
    }

    /// Returns the index of the element a call to
    /// [`previous`](Cursor::previous) would yield, or `None` when the
    /// cursor sits before the first element.
    pub fn previous_index<T>(&self, list: &List<T>) -> Result<Option<usize>, CursorError> {
        self.check(list)?;
        Ok(self.pos.checked_sub(1))
    }

    /// Moves the cursor over the next element and returns a reference to
    /// it. The element becomes the current one for [`remove`](Cursor::remove)
    /// and [`set`](Cursor::set).
    ///
    /// Returns [`CursorError::EndOfSequence`] when the cursor already sits
    /// behind the last element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::{CursorError, List};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let mut cursor = list.cursor();
    ///
    /// assert_eq!(cursor.next(&list), Ok(&1));
    /// assert_eq!(cursor.next(&list), Ok(&2));
    /// assert_eq!(cursor.next(&list), Err(CursorError::EndOfSequence));
    /// ```
    pub fn next<'l, T>(&mut self, list: &'l List<T>) -> Result<&'l T, CursorError> {
        if !self.has_next(list)? {
            return Err(CursorError::EndOfSequence);
        }
        self.visited = Some(self.after);
        self.before = self.after;
        self.after = list.next_of(self.after);
        self.pos += 1;
        Ok(list.value(self.before))
    }

    /// Moves the cursor back over the previous element and returns a
    /// reference to it. The element becomes the current one for
    /// [`remove`](Cursor::remove) and [`set`](Cursor::set).
    ///
    /// Returns [`CursorError::EndOfSequence`] when the cursor already sits
    /// before the first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::{CursorError, List};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.previous(&list), Err(CursorError::EndOfSequence));
    ///
    /// cursor.next(&list).unwrap();
    /// assert_eq!(cursor.previous(&list), Ok(&1));
    /// ```
    pub fn previous<'l, T>(&mut self, list: &'l List<T>) -> Result<&'l T, CursorError> {
        if !self.has_previous(list)? {
            return Err(CursorError::EndOfSequence);
        }
        self.visited = Some(self.before);
        self.after = self.before;
        self.before = list.prev_of(self.before);
        self.pos -= 1;
        Ok(list.value(self.after))
    }

    /// Inserts `value` into the cursor gap, no matter which direction the
    /// cursor last moved in. The cursor ends up immediately after the new
    /// element, and there is no current element afterwards.
    ///
    /// This is a structural mutation: sibling cursors become stale, this
    /// cursor stays fresh.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 3]);
    /// let mut cursor = list.cursor();
    ///
    /// cursor.next(&list).unwrap();
    /// cursor.add(&mut list, 2).unwrap();
    /// assert_eq!(list, List::from_iter([1, 2, 3]));
    ///
    /// // The cursor sits right after the inserted element.
    /// assert_eq!(cursor.next(&list), Ok(&3));
    /// ```
    pub fn add<T>(&mut self, list: &mut List<T>, value: T) -> Result<(), CursorError> {
        self.check(list)?;
        let node = list.attach(self.before, self.after, value);
        self.before = node;
        self.pos += 1;
        self.visited = None;
        self.stamp = list.bump();
        Ok(())
    }

    /// Removes the element most recently yielded by [`next`](Cursor::next)
    /// or [`previous`](Cursor::previous) from the list.
    ///
    /// Returns [`CursorError::NoCurrentElement`] when no element has been
    /// visited yet, or when it was already consumed by a prior remove.
    ///
    /// This is a structural mutation: sibling cursors become stale, this
    /// cursor stays fresh.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::{CursorError, List};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor();
    ///
    /// cursor.next(&list).unwrap();
    /// cursor.remove(&mut list).unwrap();
    /// assert_eq!(list, List::from_iter([2, 3]));
    ///
    /// // The element is consumed; a second remove has nothing to act on.
    /// assert_eq!(cursor.remove(&mut list), Err(CursorError::NoCurrentElement));
    /// ```
    pub fn remove<T>(&mut self, list: &mut List<T>) -> Result<(), CursorError> {
        self.check(list)?;
        let node = self.visited.take().ok_or(CursorError::NoCurrentElement)?;
        // Repair the gap before the links go stale. A forward neighbor just
        // re-points; a backward neighbor also shortens the prefix, because
        // the position counts the elements before the gap.
        if self.after == node {
            self.after = list.next_of(node);
        }
        if self.before == node {
            self.before = list.prev_of(node);
            self.pos -= 1;
        }
        list.detach(node);
        self.stamp = list.bump();
        Ok(())
    }

    /// Replaces the value of the element most recently yielded by
    /// [`next`](Cursor::next) or [`previous`](Cursor::previous).
    ///
    /// Returns [`CursorError::NoCurrentElement`] when no element has been
    /// visited yet, or when it was already consumed by a prior remove.
    ///
    /// Replacing a value is *not* a structural mutation: the change counter
    /// stays put and sibling cursors remain valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdll::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor();
    ///
    /// cursor.next(&list).unwrap();
    /// cursor.set(&mut list, 7).unwrap();
    /// assert_eq!(list, List::from_iter([7, 2, 3]));
    /// ```
    pub fn set<T>(&mut self, list: &mut List<T>, value: T) -> Result<(), CursorError> {
        self.check(list)?;
        match self.visited {
            Some(node) => {
                list.node_mut(node).value = Some(value);
                Ok(())
            }
            None => Err(CursorError::NoCurrentElement),
        }
    }
}

impl<T> SeqCursor<T> for Cursor {
    type List = List<T>;

    fn has_next(&self, list: &List<T>) -> Result<bool, CursorError> {
        Cursor::has_next(self, list)
    }

    fn has_previous(&self, list: &List<T>) -> Result<bool, CursorError> {
        Cursor::has_previous(self, list)
    }

    fn next<'l>(&mut self, list: &'l List<T>) -> Result<&'l T, CursorError> {
        Cursor::next(self, list)
    }

    fn previous<'l>(&mut self, list: &'l List<T>) -> Result<&'l T, CursorError> {
        Cursor::previous(self, list)
    }

    fn next_index(&self, list: &List<T>) -> Result<usize, CursorError> {
        Cursor::next_index(self, list)
    }

    fn previous_index(&self, list: &List<T>) -> Result<Option<usize>, CursorError> {
        Cursor::previous_index(self, list)
    }

    fn add(&mut self, list: &mut List<T>, value: T) -> Result<(), CursorError> {
        Cursor::add(self, list, value)
    }

    fn remove(&mut self, list: &mut List<T>) -> Result<(), CursorError> {
        Cursor::remove(self, list)
    }

    fn set(&mut self, list: &mut List<T>, value: T) -> Result<(), CursorError> {
        Cursor::set(self, list, value)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CursorError;
    use crate::list::List;
    use std::iter::FromIterator;

    #[test]
    fn round_trip_forward_and_backward() {
        let mut list = List::new();
        let mut cursor = list.cursor();
        for value in ["A", "B", "C"] {
            cursor.add(&mut list, value).unwrap();
        }

        let mut forward = Vec::new();
        while cursor.has_previous(&list).unwrap() {
            cursor.previous(&list).unwrap();
        }
        while cursor.has_next(&list).unwrap() {
            forward.push(*cursor.next(&list).unwrap());
        }
        assert_eq!(forward, ["A", "B", "C"]);

        let mut backward = Vec::new();
        while cursor.has_previous(&list).unwrap() {
            backward.push(*cursor.previous(&list).unwrap());
        }
        assert_eq!(backward, ["C", "B", "A"]);
    }

    #[test]
    fn positional_reads_are_idempotent() {
        let list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor();
        cursor.next(&list).unwrap();

        for _ in 0..3 {
            assert_eq!(cursor.has_next(&list), Ok(true));
            assert_eq!(cursor.has_previous(&list), Ok(true));
            assert_eq!(cursor.next_index(&list), Ok(1));
            assert_eq!(cursor.previous_index(&list), Ok(Some(0)));
        }
        assert_eq!(cursor.next(&list), Ok(&2));
    }

    #[test]
    fn empty_list_edge_cases() {
        let mut list = List::new();
        let mut cursor = list.cursor();

        assert_eq!(cursor.has_next(&list), Ok(false));
        assert_eq!(cursor.has_previous(&list), Ok(false));
        assert_eq!(cursor.next_index(&list), Ok(0));
        assert_eq!(cursor.previous_index(&list), Ok(None));

        cursor.add(&mut list, "X").unwrap();
        assert_eq!(cursor.has_previous(&list), Ok(true));
        assert_eq!(cursor.has_next(&list), Ok(false));
        assert_eq!(cursor.previous(&list), Ok(&"X"));
    }

    #[test]
    fn add_inserts_at_the_gap_in_both_directions() {
        let mut list = List::from_iter([1, 4]);
        let mut cursor = list.cursor();

        cursor.next(&list).unwrap();
        cursor.add(&mut list, 2).unwrap();

        // After backing up, the gap sits before the element just yielded;
        // the insert lands there regardless of the direction of travel.
        cursor.next(&list).unwrap();
        cursor.previous(&list).unwrap();
        cursor.add(&mut list, 3).unwrap();

        assert_eq!(list, List::from_iter([1, 2, 3, 4]));
    }

    #[test]
    fn remove_behind_the_gap_shifts_the_position() {
        let mut list = List::from_iter(["A", "B", "C", "D"]);
        let mut cursor = list.cursor();

        cursor.next(&list).unwrap();
        cursor.next(&list).unwrap();
        assert_eq!(cursor.next_index(&list), Ok(2));

        cursor.remove(&mut list).unwrap();
        assert_eq!(cursor.next_index(&list), Ok(1));
        assert_eq!(cursor.previous(&list), Ok(&"A"));
        assert_eq!(list, List::from_iter(["A", "C", "D"]));
    }

    #[test]
    fn remove_ahead_of_the_gap_keeps_the_position() {
        let mut list = List::from_iter(["A", "B", "C"]);
        let mut cursor = list.cursor();

        cursor.next(&list).unwrap();
        cursor.next(&list).unwrap();
        cursor.previous(&list).unwrap(); // visited B, now ahead of the gap

        cursor.remove(&mut list).unwrap();
        assert_eq!(cursor.next_index(&list), Ok(1));
        assert_eq!(cursor.next(&list), Ok(&"C"));
        assert_eq!(list, List::from_iter(["A", "C"]));
    }

    #[test]
    fn remove_and_set_need_a_visited_element() {
        let mut list = List::from_iter([1, 2]);
        let mut cursor = list.cursor();

        assert_eq!(cursor.remove(&mut list), Err(CursorError::NoCurrentElement));
        assert_eq!(cursor.set(&mut list, 9), Err(CursorError::NoCurrentElement));

        cursor.next(&list).unwrap();
        cursor.add(&mut list, 5).unwrap(); // add consumes the visited element
        assert_eq!(cursor.set(&mut list, 9), Err(CursorError::NoCurrentElement));
    }

    #[test]
    fn set_replaces_in_place_and_can_repeat() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor();

        cursor.next(&list).unwrap();
        cursor.next(&list).unwrap();
        cursor.set(&mut list, 20).unwrap();
        cursor.set(&mut list, 200).unwrap();
        assert_eq!(list, List::from_iter([1, 200, 3]));

        // The element is still current and can be removed.
        cursor.remove(&mut list).unwrap();
        assert_eq!(list, List::from_iter([1, 3]));
    }

    #[test]
    fn sibling_mutation_makes_a_cursor_stale() {
        let mut list = List::from_iter(["A", "B", "C"]);
        let mut cursor1 = list.cursor();
        let mut cursor2 = list.cursor();

        cursor1.next(&list).unwrap();
        cursor1.remove(&mut list).unwrap();

        // Every operation on the other cursor must now fail, repeatably,
        // and without touching the list.
        assert_eq!(cursor2.next(&list), Err(CursorError::StaleCursor));
        assert_eq!(cursor2.has_next(&list), Err(CursorError::StaleCursor));
        assert_eq!(cursor2.next_index(&list), Err(CursorError::StaleCursor));
        assert_eq!(cursor2.add(&mut list, "X"), Err(CursorError::StaleCursor));
        assert_eq!(list, List::from_iter(["B", "C"]));

        // The mutating cursor stays in sync with its own changes.
        assert_eq!(cursor1.next(&list), Ok(&"B"));
    }

    #[test]
    fn direct_list_mutation_makes_cursors_stale() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor();

        list.push_back(4);
        assert_eq!(cursor.next(&list), Err(CursorError::StaleCursor));
    }

    #[test]
    fn set_does_not_invalidate_siblings() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor1 = list.cursor();
        let mut cursor2 = list.cursor();

        cursor1.next(&list).unwrap();
        cursor1.set(&mut list, 10).unwrap();

        assert_eq!(cursor2.next(&list), Ok(&10));
    }

    #[test]
    fn interleaved_removal_keeps_list_well_formed() {
        // Strip the even values walking forward, then the rest walking back.
        let mut list = List::from_iter(0..8);
        let mut cursor = list.cursor();

        while cursor.has_next(&list).unwrap() {
            let value = *cursor.next(&list).unwrap();
            if value % 2 == 0 {
                cursor.remove(&mut list).unwrap();
            }
        }
        assert_eq!(list, List::from_iter([1, 3, 5, 7]));

        while cursor.has_previous(&list).unwrap() {
            cursor.previous(&list).unwrap();
            cursor.remove(&mut list).unwrap();
        }
        assert!(list.is_empty());
        assert_eq!(cursor.next_index(&list), Ok(0));
    }
}
