use crate::list::{Links, List, Node};
use std::fmt;
use std::fmt::Formatter;
use std::ptr::NonNull;

/// A cursor over a `List`.
///
/// A `Cursor` is a bidirectional position in the list. In a list with length
/// *n*, there are *n* + 1 positions, indexed by 0, 1, ..., *n*, where *n* is the
/// end of the list (the ghost node). Moving forward past the last element, or
/// backward past the first element, lands on the end. The end never yields an
/// element, and moving from it does nothing.
///
/// A cursor only knows its position: it cannot be built from a node, and it
/// cannot change the linked structure of the list.
///
/// # Examples
///
/// ```
/// use linked_seq::List;
/// use std::iter::FromIterator;
///
/// let list = List::from_iter([100, 150]);
///
/// // Forward, from the front to the end.
/// let mut cursor = list.cursor_front();
/// assert_eq!(cursor.current(), Some(&100));
/// assert!(cursor.move_next());
/// assert_eq!(cursor.current(), Some(&150));
/// assert!(cursor.move_next());
/// assert!(cursor.is_end());
/// assert_eq!(cursor, list.cursor_end());
///
/// // The end is never passed through.
/// assert!(!cursor.move_next());
/// assert_eq!(cursor.current(), None);
///
/// // Backward, from the back to the end.
/// let mut cursor = list.cursor_back();
/// assert_eq!(cursor.current(), Some(&150));
/// assert!(cursor.move_prev());
/// assert_eq!(cursor.current(), Some(&100));
/// assert!(cursor.move_prev());
/// assert!(cursor.is_end());
/// ```
///
/// Any structural change of the list invalidates its cursors, which the borrow
/// checker enforces:
///
/// ```compile_fail
/// use linked_seq::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let cursor = list.cursor_front();
///
/// // Won't compile, because the list is borrowed by the cursor.
/// list.push_front(0);
/// println!("{:?}", cursor.current());
/// ```
pub struct Cursor<'a, T: 'a> {
    index: usize,
    current: NonNull<Links>,
    list: &'a List<T>,
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            current: self.current,
            list: self.list,
        }
    }
}

/// Compare cursors by their positions.
///
/// Two cursors are equal if both are at an end, or both are at the same node.
///
/// # Examples
/// ```
/// use linked_seq::List;
/// use std::iter::FromIterator;
///
/// let list = List::from_iter([1, 2, 3]);
/// let cursor1 = list.cursor_front();
/// let mut cursor2 = cursor1.clone();
/// assert_eq!(cursor1, cursor2);
///
/// cursor2.move_next();
/// assert_ne!(cursor1, cursor2);
///
/// // Every way of reaching the end gives the same position.
/// let mut cursor3 = list.cursor_front();
/// cursor3.move_prev();
/// let mut cursor4 = list.cursor_back();
/// cursor4.move_next();
/// assert_eq!(cursor3, cursor4);
/// assert_eq!(cursor3, list.cursor_end());
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        (self.is_end() && other.is_end()) || self.current == other.current
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// A cursor over a `List` that can mutate the element it points to.
///
/// The lifetime of the yielded mutable reference is tied to the cursor itself,
/// so a `CursorMut` gives access to one element at a time. Like [`Cursor`], it
/// cannot change the linked structure of the list.
///
/// # Examples
///
/// ```
/// use linked_seq::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut cursor = list.cursor_front_mut();
/// while let Some(x) = cursor.current_mut() {
///     *x *= 2;
///     cursor.move_next();
/// }
/// assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
/// ```
///
/// The list is not accessible while a `CursorMut` is in use:
///
/// ```compile_fail
/// use linked_seq::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut cursor = list.cursor_front_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current_mut());
/// ```
pub struct CursorMut<'a, T: 'a> {
    index: usize,
    current: NonNull<Links>,
    list: &'a mut List<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            fn next_node(&self) -> NonNull<Links> {
                // SAFETY: `current.next` is always valid since the list is closed
                // into a ring by the ghost node.
                unsafe { self.current.as_ref().next }
            }
            fn prev_node(&self) -> NonNull<Links> {
                // SAFETY: `current.prev` is always valid since the list is closed
                // into a ring by the ghost node.
                unsafe { self.current.as_ref().prev }
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Return the position of the cursor. The end is at `len`.
            pub fn index(&self) -> usize {
                self.index
            }

            /// Returns the length of the list. See [`List::len`].
            pub fn len(&self) -> usize {
                self.list.len()
            }

            /// Returns `true` if the list is empty. See [`List::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Returns `true` if the cursor is at the end of the list.
            pub fn is_end(&self) -> bool {
                self.current == self.list.ghost_node()
            }

            /// Move the cursor to the next position, and return `true`;
            /// or return `false` and stay put if it is already at the end.
            ///
            /// Moving forward from the last element reaches the end.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_next(&mut self) -> bool {
                if self.is_end() {
                    return false;
                }
                self.current = self.next_node();
                self.index += 1;
                true
            }

            /// Move the cursor to the previous position, and return `true`;
            /// or return `false` and stay put if it is already at the end.
            ///
            /// Moving backward from the first element reaches the end.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_prev(&mut self) -> bool {
                if self.is_end() {
                    return false;
                }
                self.current = self.prev_node();
                self.index = if self.is_end() {
                    self.list.len()
                } else {
                    self.index - 1
                };
                true
            }

            /// Set the cursor to the first element (or the end if the list is empty).
            #[inline]
            pub fn move_to_front(&mut self) {
                self.index = 0;
                self.current = self.list.front_node();
            }

            /// Set the cursor to the last element (or the end if the list is empty).
            #[inline]
            pub fn move_to_back(&mut self) {
                self.index = self.list.len().saturating_sub(1);
                self.current = self.list.back_node();
            }

            /// Set the cursor to the end of the list.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.index = self.list.len();
                self.current = self.list.ghost_node();
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("current", &self.current())
                    .field("index", &self.index)
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, current: NonNull<Links>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    /// Return a reference to the current element, or `None` at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.cursor(0).unwrap().current(), Some(&1));
    /// assert_eq!(list.cursor(2).unwrap().current(), Some(&3));
    /// assert_eq!(list.cursor(3).unwrap().current(), None);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        if self.is_end() {
            return None;
        }
        // SAFETY: every node but the ghost node is an element node, and the list
        // is borrowed for `'a`.
        unsafe { Some(Node::get(self.current)) }
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, current: NonNull<Links>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    /// Return a reference to the current element, or `None` at the end.
    pub fn current(&self) -> Option<&T> {
        if self.is_end() {
            return None;
        }
        // SAFETY: every node but the ghost node is an element node, and the
        // element is borrowed through the cursor.
        unsafe { Some(Node::get(self.current)) }
    }

    /// Return a mutable reference to the current element, or `None` at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// let mut cursor = list.cursor_mut(0).unwrap();
    /// *cursor.current_mut().unwrap() *= 5;
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// // Cannot mutate the end.
    /// assert!(list.cursor_end_mut().current_mut().is_none());
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        if self.is_end() {
            return None;
        }
        // SAFETY: every node but the ghost node is an element node, and the
        // element is mutably borrowed through the cursor.
        unsafe { Some(Node::get_mut(self.current)) }
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.current, self.index)
    }

    /// Convert the mutable cursor to an immutable one.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.list, self.current, self.index)
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}
