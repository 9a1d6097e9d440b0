//! This crate provides a circularly-linked, doubly-linked list with a dummy
//! sentinel node and fail-fast cursors, implemented on top of an index
//! arena.
//!
//! The [`List`] allows inserting and removing elements at any cursor
//! position in constant time. All structural change flows through
//! [`Cursor`] operations; a cursor that falls behind a sibling's structural
//! change refuses to run and reports [`CursorError::StaleCursor`] instead.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use cdll::{CursorError, List};
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 4]);
//!
//! let mut cursor = list.cursor();
//! cursor.next(&list)?;
//! cursor.next(&list)?;
//! cursor.add(&mut list, 3)?; // insert 3 into the gap after 2
//! assert_eq!(list, List::from_iter([1, 2, 3, 4]));
//!
//! let mut other = list.cursor();
//! cursor.next(&list)?;
//! cursor.remove(&mut list)?; // removes 4; `other` is now stale
//! assert_eq!(other.next(&list), Err(CursorError::StaleCursor));
//! # Ok::<(), CursorError>(())
//! ```
//!
//! # Memory Layout
//!
//! The nodes of a list live in an arena and are addressed by stable slot
//! indices; `next` and `prev` are plain indices, so the cyclic structure
//! needs no owning references and no unsafe aliasing:
//!
//! ```text
//!           slot 0               slot 1               slot 2
//!     ╔═════════════╗      ┌─────────────┐      ┌─────────────┐
//!     ║  next ──→ 1 ║      │  next ──→ 2 │      │  next ──→ 0 │
//!     ╟─────────────╢      ├─────────────┤      ├─────────────┤
//!     ║  prev ──→ 2 ║      │  prev ──→ 0 │      │  prev ──→ 1 │
//!     ╟─────────────╢      ├─────────────┤      ├─────────────┤
//!     ║  (no value) ║      │  value: T   │      │  value: T   │
//!     ╚═════════════╝      └─────────────┘      └─────────────┘
//!        sentinel             element 0            element 1
//! ```
//!
//! Slot 0 is the dummy sentinel: always present, never removed, never
//! holding a value. `sentinel.next` is the first element and
//! `sentinel.prev` is the last; in an empty list both point back at the
//! sentinel itself, so no link is ever null in the circular variant.
//! Removed slots go on a free list and are reused by later insertions; a
//! just-detached slot keeps its old links so that cursor bookkeeping can
//! still read through it while repairing itself.
//!
//! # Iteration
//!
//! [`List::iter`] provides a plain forward view of the values. Each call
//! starts an independent traversal, and the view never mutates:
//!
//! ```
//! use cdll::List;
//! use std::iter::FromIterator;
//!
//! let list = List::from_iter([1, 2, 3]);
//! assert_eq!(list.iter().sum::<i32>(), 6);
//! assert_eq!(list.iter().rev().next(), Some(&3)); // double-ended
//! ```
//!
//! # Cursors and fail-fast
//!
//! A [`Cursor`] sits in the gap between two adjacent elements and can move
//! and edit in both directions. Cursors do not borrow the list; they are
//! handed the list on every call, so any number of them can be live at
//! once. Each cursor snapshots the list's change counter and checks it
//! before every operation — the first operation after a sibling's `add` or
//! `remove` fails with [`CursorError::StaleCursor`] rather than running on
//! a structure that shifted underneath it. Replacing a value with
//! [`Cursor::set`] is not a structural change and invalidates nobody.
//!
//! This detects sequential interference between cursors over the same
//! list. It is a best-effort diagnostic: the list is not thread-safe and
//! the counter gives no guarantee under parallel mutation.
//!
//! # Variants
//!
//! The sentinel exists to eliminate null-link special cases, not to change
//! behavior. [`LinearList`] is the same container without the sentinel —
//! explicit `Option` ends and a distinguished empty state — and behaves
//! identically through the [`SimpleList`]/[`SeqCursor`] contract, which is
//! what generic traversal code should be written against.

#[doc(inline)]
pub use error::CursorError;
#[doc(inline)]
pub use linear::{LinearCursor, LinearIter, LinearList};
#[doc(inline)]
pub use list::cursor::Cursor;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use seq::{SeqCursor, SimpleList};

pub mod error;
pub mod linear;
pub mod list;
pub mod seq;
