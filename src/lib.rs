//! This crate provides a doubly-linked sequence with owned nodes, index-addressed
//! access, and bidirectional cursors.
//!
//! The [`List`] pushes and pops at either end in constant time. Reading,
//! inserting or removing at an index walks from the front node, so it takes
//! *O*(*index*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use linked_seq::List;
//!
//! let mut list = List::new();
//! list.push_back(10);
//! list.push_back(20);
//! list.push_front(5);
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.front(), Ok(&5));
//! assert_eq!(list.back(), Ok(&20));
//!
//! list.insert_at(1, 7).unwrap();
//! assert_eq!(list.at(1), Ok(&7));
//! assert_eq!(list.remove_at(2), Ok(10));
//! assert_eq!(list.pop_front(), Ok(5));
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                         Ghost node  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        └───────────┘
//! │  ║ element T ║           ║ element T ║                            ↑   ↑
//! │  ╚═══════════╝           ╚═══════════╝                            │   │
//! │      Node 0                  Node 1                               │   │
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains:
//! - a pointer `ghost` that points to the ghost node;
//! - a length field `len`, so that the length and every index check take
//!   constant time.
//!
//! Each element of the list `List<T>` lives in its own heap node, which contains
//! the `next` and `prev` links and the element itself. The ghost node holds only
//! the links: `ghost.next` is the first element and `ghost.prev` is the last one,
//! and the first element's `prev` and the last element's `next` point back to the
//! ghost. An empty list's ghost node links to itself.
//!
//! A node is allocated when its element enters the list and freed when the
//! element leaves it. Dropping the list frees the remaining nodes one by one,
//! from front to back.
//!
//! # Errors
//!
//! Operations that need an element or a valid index return a [`Result`] with a
//! [`ListError`]: [`ListError::EmptyContainer`] for `front`, `back`, `pop_front`
//! and `pop_back` on an empty list, and [`ListError::IndexOutOfRange`] for an
//! index outside the list. A rejected operation leaves the list unchanged.
//!
//! ```
//! use linked_seq::{List, ListError};
//!
//! let mut list: List<i32> = List::new();
//! assert_eq!(list.pop_front(), Err(ListError::EmptyContainer));
//! assert_eq!(
//!     list.remove_at(0),
//!     Err(ListError::IndexOutOfRange { index: 0, len: 0 })
//! );
//! ```
//!
//! Rejections are also reported through the [`log`] facade at the `debug`
//! level. The crate never installs a logger.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//! [`IterMut`] provides mutability of the elements (but not the linked structure of
//! the list).
//!
//! ```
//! use linked_seq::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! The cursors [`Cursor`] and [`CursorMut`] are bidirectional positions over the
//! list. Moving past either end of the list lands on the end position, which
//! never yields an element, and all end positions compare equal. A
//! [`CursorMut`] can mutate the element it points to, but no cursor can change
//! the linked structure of the list.
//!
//! ```
//! use linked_seq::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//!
//! let mut cursor = list.cursor_back_mut();
//! assert_eq!(cursor.current(), Some(&3));
//! assert!(cursor.move_prev());
//! *cursor.current_mut().unwrap() = 20;
//! assert!(cursor.move_prev());
//! assert!(cursor.move_prev());
//! assert!(cursor.is_end());
//!
//! assert_eq!(Vec::from_iter(list), vec![1, 20, 3]);
//! ```
//!
//! # Invalidation
//!
//! Every structural change (push, pop, insert, remove, clear) invalidates all
//! cursors, iterators and element references obtained before it. Cursors and
//! iterators borrow the list and structural changes need `&mut List`, so using an
//! invalidated one is rejected at compile time:
//!
//! ```compile_fail
//! use linked_seq::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let front = list.front().unwrap();
//!
//! // Won't compile, because `front` still borrows the list.
//! list.pop_front().unwrap();
//! println!("{}", front);
//! ```
//!
//! [`List`]: crate::List
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Cursor`]: crate::list::cursor::Cursor
//! [`CursorMut`]: crate::list::cursor::CursorMut
//! [`ListError`]: crate::ListError
//! [`ListError::EmptyContainer`]: crate::ListError::EmptyContainer
//! [`ListError::IndexOutOfRange`]: crate::ListError::IndexOutOfRange
//! [`Result`]: crate::Result

#[doc(inline)]
pub use error::{ListError, Result};
#[doc(inline)]
pub use list::cursor::{Cursor, CursorMut};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub mod error;
pub mod list;
