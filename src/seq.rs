//! The sequence-container contract shared by every list variant.
//!
//! A container that can produce a forward value sequence and a fail-fast
//! cursor is interchangeable for traversal and printing purposes, no matter
//! how it represents its links internally. The sentinel-based [`List`] and
//! the sentinel-free [`LinearList`] both implement [`SimpleList`], and code
//! such as the experiment harness is written only against these traits.
//!
//! [`List`]: crate::List
//! [`LinearList`]: crate::LinearList

use crate::error::CursorError;

/// An ordered sequence container that can be traversed and edited through a
/// cursor.
///
/// # Examples
///
/// A function generic over the contract works with every variant:
///
/// ```
/// use cdll::{CursorError, LinearList, List, SeqCursor, SimpleList};
///
/// fn collect<L: SimpleList<i32>>(list: &L) -> Vec<i32> {
///     list.values().copied().collect()
/// }
///
/// fn append<L: SimpleList<i32>>(list: &mut L, value: i32) -> Result<(), CursorError> {
///     let mut cursor = list.list_cursor();
///     while cursor.has_next(list)? {
///         cursor.next(list)?;
///     }
///     cursor.add(list, value)
/// }
///
/// let mut circular = List::new();
/// let mut linear = LinearList::new();
/// for value in 1..=3 {
///     append(&mut circular, value).unwrap();
///     append(&mut linear, value).unwrap();
/// }
/// assert_eq!(collect(&circular), collect(&linear));
/// ```
pub trait SimpleList<T> {
    /// The cursor type produced by [`list_cursor`](SimpleList::list_cursor).
    type Cursor: SeqCursor<T, List = Self>;

    /// Returns the number of elements in the container.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a fresh cursor positioned before the first element.
    fn list_cursor(&self) -> Self::Cursor;

    /// Returns a lazy forward traversal of the values.
    ///
    /// Each call yields an independent traversal starting from the front.
    /// The view is read-only; it does not support removal.
    fn values(&self) -> Box<dyn Iterator<Item = &T> + '_>;
}

/// A fail-fast bidirectional cursor over a [`SimpleList`].
///
/// The cursor does not borrow its list; every operation takes the list as a
/// parameter instead. This is what allows several cursors over the same list
/// to be alive at once, which in turn is what the fail-fast check is for: a
/// cursor records the list's change counter when it is created and whenever
/// it mutates the list itself, and every operation first compares that
/// snapshot against the list. On mismatch the operation returns
/// [`CursorError::StaleCursor`] without touching any state.
///
/// A cursor must only ever be handed the list that created it. Mixing lists
/// and cursors is not detected beyond the change-counter comparison and may
/// panic on out-of-range slots.
pub trait SeqCursor<T> {
    /// The container type this cursor traverses.
    type List: ?Sized;

    /// Returns `true` if a call to [`next`](SeqCursor::next) would succeed.
    fn has_next(&self, list: &Self::List) -> Result<bool, CursorError>;

    /// Returns `true` if a call to [`previous`](SeqCursor::previous) would
    /// succeed.
    fn has_previous(&self, list: &Self::List) -> Result<bool, CursorError>;

    /// Advances over the next element and returns a reference to it.
    fn next<'l>(&mut self, list: &'l Self::List) -> Result<&'l T, CursorError>;

    /// Backs up over the previous element and returns a reference to it.
    fn previous<'l>(&mut self, list: &'l Self::List) -> Result<&'l T, CursorError>;

    /// Returns the index of the element a call to [`next`](SeqCursor::next)
    /// would yield.
    fn next_index(&self, list: &Self::List) -> Result<usize, CursorError>;

    /// Returns the index of the element a call to
    /// [`previous`](SeqCursor::previous) would yield, or `None` when the
    /// cursor sits before the first element.
    fn previous_index(&self, list: &Self::List) -> Result<Option<usize>, CursorError>;

    /// Inserts `value` at the cursor gap; the cursor ends up immediately
    /// after the new element.
    fn add(&mut self, list: &mut Self::List, value: T) -> Result<(), CursorError>;

    /// Removes the most recently visited element.
    fn remove(&mut self, list: &mut Self::List) -> Result<(), CursorError>;

    /// Replaces the value of the most recently visited element in place.
    ///
    /// This is not a structural change: it does not advance the list's
    /// change counter and therefore does not invalidate sibling cursors.
    fn set(&mut self, list: &mut Self::List, value: T) -> Result<(), CursorError>;
}
