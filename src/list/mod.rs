use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::{debug, trace};

use crate::error::{ListError, Result};
use crate::list::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

/// The `List` is a doubly-linked sequence with owned nodes.
///
/// Pushing and popping at either end take constant time. Reading, inserting or
/// removing at an index walks from the front node, so it takes *O*(*index*) time.
/// Callers that visit many positions should keep a [`Cursor`] instead.
///
/// The `List` contains:
/// - a pointer `ghost` to the ghost node, whose `next` is the first element and
///   whose `prev` is the last element;
/// - a length field `len`, so that [`List::len`] and every index check are
///   *O*(1).
///
/// # Naming Conventions
///
/// - *element index*: `0..len`, the positions holding an element;
/// - *position*: `0..=len`, the element indices plus the ghost node at `len`,
///   which is the "end" of every cursor.
pub struct List<T> {
    ghost: NonNull<Links>,
    /// the length of the list
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// The links of a node. The ghost node is a bare `Links` without payload.
pub(crate) struct Links {
    pub(crate) next: NonNull<Links>,
    pub(crate) prev: NonNull<Links>,
}

/// An element node. `links` must be the first field, so that a pointer to the
/// links of an element node is also a pointer to the node itself.
#[repr(C)]
pub(crate) struct Node<T> {
    links: Links,
    element: T,
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Links> {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> NonNull<Links> {
        // SAFETY: the ghost node lives as long as the list, and `ghost.next` is
        // either the ghost itself or the first element.
        unsafe { self.ghost.as_ref().next }
    }
    pub(crate) fn back_node(&self) -> NonNull<Links> {
        // SAFETY: the ghost node lives as long as the list, and `ghost.prev` is
        // either the ghost itself or the last element.
        unsafe { self.ghost.as_ref().prev }
    }

    /// Walk forward `steps` nodes from the front node.
    ///
    /// `steps == len` reaches the ghost node.
    fn node_at(&self, steps: usize) -> NonNull<Links> {
        debug_assert!(steps <= self.len, "Cannot walk past the ghost node");
        let mut node = self.front_node();
        for _ in 0..steps {
            // SAFETY: at most `len` steps from the front node stay inside the list.
            node = unsafe { node.as_ref().next };
        }
        node
    }

    /// Allocate a node holding `element` and attach it between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belong
    /// to the list, or whether they are adjacent (only in `#[cfg(debug_assertions)]`).
    ///
    /// The node is fully allocated before any link is touched, so an allocation
    /// failure leaves the list as it was.
    unsafe fn attach_node(
        &mut self,
        prev: NonNull<Links>,
        next: NonNull<Links>,
        element: T,
    ) -> NonNull<Links> {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        let node = Node::new_detached(element);
        connect(prev, node);
        connect(node, next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
        node
    }

    /// Detach the element node `node` from the list, free it, and return its element.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list.
    /// Passing the ghost node is a bug, caught in `#[cfg(debug_assertions)]`.
    unsafe fn detach_node(&mut self, node: NonNull<Links>) -> T {
        debug_assert!(node != self.ghost, "Cannot detach the ghost node");
        let node = Box::from_raw(node.cast::<Node<T>>().as_ptr());
        connect(node.links.prev, node.links.next);
        self.len -= 1;
        Node::into_element(node)
    }

    fn ensure_non_empty(&self, op: &'static str) -> Result<()> {
        if self.is_empty() {
            debug!("`{}` rejected: the list is empty", op);
            return Err(ListError::EmptyContainer);
        }
        Ok(())
    }

    /// Check that `index` addresses an element, i.e. `index < len`.
    fn ensure_element(&self, op: &'static str, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(self.out_of_range(op, index));
        }
        Ok(())
    }

    /// Check that `index` addresses a position, i.e. `index <= len`.
    fn ensure_position(&self, op: &'static str, index: usize) -> Result<()> {
        if index > self.len {
            return Err(self.out_of_range(op, index));
        }
        Ok(())
    }

    fn out_of_range(&self, op: &'static str, index: usize) -> ListError {
        debug!(
            "`{}` rejected: index {} is out of range for length {}",
            op, index, self.len
        );
        ListError::IndexOutOfRange {
            index,
            len: self.len,
        }
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use linked_seq::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        let ghost = new_ghost();
        let len = 0;
        let _marker = PhantomData;
        Self {
            ghost,
            len,
            _marker,
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
    /// use linked_seq::List;
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

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
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

    /// Removes all elements from the `List`, from front to back.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert!(list.front().is_err());
    /// ```
    pub fn clear(&mut self) {
        while !self.is_empty() {
            // SAFETY: the list is not empty, so the front node is an element node.
            unsafe {
                self.detach_node(self.front_node());
            }
        }
    }

    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), Err(ListError::EmptyContainer));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Ok(&1));
    /// ```
    pub fn front(&self) -> Result<&T> {
        self.ensure_non_empty("front")?;
        // SAFETY: the list is not empty, so the front node is an element node.
        Ok(unsafe { Node::get(self.front_node()) })
    }

    /// Provides a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.front_mut().is_err());
    ///
    /// list.push_front(1);
    /// *list.front_mut().unwrap() = 5;
    /// assert_eq!(list.front(), Ok(&5));
    /// ```
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.ensure_non_empty("front_mut")?;
        // SAFETY: the list is not empty, so the front node is an element node.
        Ok(unsafe { Node::get_mut(self.front_node()) })
    }

    /// Provides a reference to the back element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), Err(ListError::EmptyContainer));
    ///
    /// list.push_back(1);
    /// list.push_back(2);
    /// assert_eq!(list.back(), Ok(&2));
    /// ```
    pub fn back(&self) -> Result<&T> {
        self.ensure_non_empty("back")?;
        // SAFETY: the list is not empty, so the back node is an element node.
        Ok(unsafe { Node::get(self.back_node()) })
    }

    /// Provides a mutable reference to the back element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.ensure_non_empty("back_mut")?;
        // SAFETY: the list is not empty, so the back node is an element node.
        Ok(unsafe { Node::get_mut(self.back_node()) })
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
    /// use linked_seq::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Ok(&2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Ok(&1));
    /// assert_eq!(list.back(), Ok(&2));
    /// ```
    pub fn push_front(&mut self, elt: T) {
        let (prev, next) = (self.ghost_node(), self.front_node());
        // SAFETY: the ghost node and the front node are adjacent nodes of the list.
        unsafe {
            self.attach_node(prev, next, elt);
        }
    }

    /// Removes the first element and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), Err(ListError::EmptyContainer));
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Ok(3));
    /// assert_eq!(list.pop_front(), Ok(1));
    /// assert_eq!(list.pop_front(), Err(ListError::EmptyContainer));
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        self.ensure_non_empty("pop_front")?;
        // SAFETY: the list is not empty, so the front node is an element node.
        Ok(unsafe { self.detach_node(self.front_node()) })
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Ok(&3));
    /// ```
    pub fn push_back(&mut self, elt: T) {
        let (prev, next) = (self.back_node(), self.ghost_node());
        // SAFETY: the back node and the ghost node are adjacent nodes of the list.
        unsafe {
            self.attach_node(prev, next, elt);
        }
    }

    /// Removes the last element from a list and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.pop_back().is_err());
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Ok(3));
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        self.ensure_non_empty("pop_back")?;
        // SAFETY: the list is not empty, so the back node is an element node.
        Ok(unsafe { self.detach_node(self.back_node()) })
    }

    /// Provides a reference to the element at the given index.
    ///
    /// The element is found by walking forward from the front node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*index*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([200, 100, 150, -99]);
    /// assert_eq!(list.at(1), Ok(&100));
    /// assert_eq!(list.at(3), Ok(&-99));
    /// assert_eq!(list.at(4), Err(ListError::IndexOutOfRange { index: 4, len: 4 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        self.ensure_element("at", index)?;
        // SAFETY: `index < len`, so the node is an element node.
        Ok(unsafe { Node::get(self.node_at(index)) })
    }

    /// Provides a mutable reference to the element at the given index.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*index*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// *list.at_mut(1).unwrap() *= 10;
    /// assert_eq!(Vec::from_iter(list), vec![1, 20, 3]);
    /// ```
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.ensure_element("at_mut", index)?;
        // SAFETY: `index < len`, so the node is an element node.
        Ok(unsafe { Node::get_mut(self.node_at(index)) })
    }

    /// Inserts an element at the given element index.
    ///
    /// - `index == 0` behaves as [`List::push_front`];
    /// - `index == len - 1` behaves as [`List::push_back`], so the new element
    ///   lands *after* the current last element;
    /// - any other index places the new element before the current occupant of
    ///   `index`, shifting it and everything after it one position back.
    ///
    /// Inserting at `len` is rejected. Use [`List::insert_before`] for the
    /// uniform "insert before `index`" behavior that also accepts `len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*index*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4]);
    ///
    /// list.insert_at(2, 10).unwrap();
    /// assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2, 10, 3, 4]);
    ///
    /// // The last index appends.
    /// list.insert_at(4, 20).unwrap();
    /// assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2, 10, 3, 4, 20]);
    ///
    /// assert!(list.insert_at(6, 30).is_err());
    /// ```
    pub fn insert_at(&mut self, index: usize, elt: T) -> Result<()> {
        self.ensure_element("insert_at", index)?;
        match index {
            0 => self.push_front(elt),
            index if index == self.len - 1 => self.push_back(elt),
            index => {
                let next = self.node_at(index);
                // SAFETY: `0 < index < len`, so `next` and its previous node are
                // adjacent element nodes.
                unsafe {
                    self.attach_node(next.as_ref().prev, next, elt);
                }
            }
        }
        Ok(())
    }

    /// Removes the element at the given element index and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*index*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([200, 100, 150, -99]);
    ///
    /// assert_eq!(list.remove_at(1), Ok(100));
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list.at(1), Ok(&150));
    ///
    /// assert!(list.remove_at(3).is_err());
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.ensure_element("remove_at", index)?;
        match index {
            0 => self.pop_front(),
            index if index == self.len - 1 => self.pop_back(),
            // SAFETY: `0 < index < len - 1`, so the node is an element node.
            index => Ok(unsafe { self.detach_node(self.node_at(index)) }),
        }
    }

    /// Inserts an element so that it ends up at `index`, shifting the current
    /// occupant and everything after it one position back.
    ///
    /// Unlike [`List::insert_at`], every position `0..=len` is accepted, and
    /// `insert_before(len, elt)` appends.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*index*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// list.insert_before(2, 4).unwrap();
    /// list.insert_before(4, 5).unwrap();
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn insert_before(&mut self, index: usize, elt: T) -> Result<()> {
        self.ensure_position("insert_before", index)?;
        let next = self.node_at(index);
        // SAFETY: `next` is a node of the list (possibly the ghost node), and
        // its previous node is adjacent to it.
        unsafe {
            self.attach_node(next.as_ref().prev, next, elt);
        }
        Ok(())
    }

    /// Provides a cursor at the given position.
    ///
    /// By convention, the cursor is at the end (the ghost node) if `at == len`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.cursor(1).unwrap().current(), Some(&2));
    /// assert!(list.cursor(3).unwrap().is_end());
    /// assert!(list.cursor(4).is_err());
    /// ```
    pub fn cursor(&self, at: usize) -> Result<Cursor<'_, T>> {
        self.ensure_position("cursor", at)?;
        Ok(Cursor::new(self, self.node_at(at), at))
    }

    /// Provides a cursor at the first element.
    ///
    /// The cursor is at the end if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.cursor_front().current(), Some(&1));
    ///
    /// let empty = List::<i32>::new();
    /// assert!(empty.cursor_front().is_end());
    /// ```
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node(), 0)
    }

    /// Provides a cursor at the last element.
    ///
    /// The cursor is at the end if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let cursor = list.cursor_back();
    /// assert_eq!(cursor.current(), Some(&3));
    /// assert_eq!(cursor.index(), 2);
    /// ```
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.back_node(), self.len.saturating_sub(1))
    }

    /// Provides a cursor at the end (the ghost node).
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.ghost_node(), self.len)
    }

    /// Provides a mutable cursor at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// if let Some(x) = list.cursor_mut(1).unwrap().current_mut() {
    ///     *x = 7;
    /// }
    /// assert_eq!(Vec::from_iter(list), vec![1, 7, 3]);
    /// ```
    pub fn cursor_mut(&mut self, at: usize) -> Result<CursorMut<'_, T>> {
        self.ensure_position("cursor_mut", at)?;
        let current = self.node_at(at);
        Ok(CursorMut::new(self, current, at))
    }

    /// Provides a mutable cursor at the first element.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let current = self.front_node();
        CursorMut::new(self, current, 0)
    }

    /// Provides a mutable cursor at the last element.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        let (current, index) = (self.back_node(), self.len.saturating_sub(1));
        CursorMut::new(self, current, index)
    }

    /// Provides a mutable cursor at the end (the ghost node).
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let (current, index) = (self.ghost_node(), self.len);
        CursorMut::new(self, current, index)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let mut list: List<u32> = List::new();
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

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let mut list: List<u32> = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
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

impl Links {
    fn dangling() -> Self {
        Links {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
        }
    }
}

impl<T> Node<T> {
    /// Allocate a detached node with given element.
    ///
    /// Its links are dangling until it is attached.
    fn new_detached(element: T) -> NonNull<Links> {
        let node = Box::new(Node {
            links: Links::dangling(),
            element,
        });
        NonNull::from(Box::leak(node)).cast()
    }

    fn into_element(self: Box<Self>) -> T {
        self.element
    }

    /// It is unsafe because `node` must be an element node of a list that
    /// outlives `'a`, and not be mutably borrowed during `'a`.
    pub(crate) unsafe fn get<'a>(node: NonNull<Links>) -> &'a T
    where
        T: 'a,
    {
        &(*node.cast::<Self>().as_ptr()).element
    }

    /// It is unsafe because `node` must be an element node of a list that
    /// outlives `'a`, and not be borrowed elsewhere during `'a`.
    pub(crate) unsafe fn get_mut<'a>(node: NonNull<Links>) -> &'a mut T
    where
        T: 'a,
    {
        &mut (*node.cast::<Self>().as_ptr()).element
    }
}

/// Link `prev -> next` and `prev <- next`.
///
/// It is unsafe because both pointers must be live nodes.
unsafe fn connect(prev: NonNull<Links>, next: NonNull<Links>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

fn new_ghost() -> NonNull<Links> {
    let ghost = NonNull::from(Box::leak(Box::new(Links::dangling())));
    // SAFETY: the ghost node was just allocated; an empty list links it to itself.
    unsafe {
        connect(ghost, ghost);
    }
    ghost
}

#[cfg(debug_assertions)]
fn assert_adjacent(prev: NonNull<Links>, next: NonNull<Links>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        trace!("dropping a list of {} nodes", self.len);
        self.clear();
        // SAFETY: the ghost node was leaked from a box in `new_ghost`, and no
        // element node refers to it any more.
        unsafe {
            drop(Box::from_raw(self.ghost.as_ptr()));
        }
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
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
    use crate::error::ListError;
    use crate::list::List;
    use std::cell::RefCell;
    use std::fmt::Debug;
    use std::iter::FromIterator;

    /// Walk the list in both directions and check every link against its
    /// neighbours and the stored length.
    fn assert_well_formed<T>(list: &List<T>) {
        let ghost = list.ghost_node();
        let mut node = ghost;
        for _ in 0..=list.len() {
            let next = unsafe { node.as_ref().next };
            assert_eq!(unsafe { next.as_ref().prev }, node);
            node = next;
        }
        assert_eq!(node, ghost, "forward walk must return to the ghost node");
        let mut node = ghost;
        for _ in 0..=list.len() {
            node = unsafe { node.as_ref().prev };
        }
        assert_eq!(node, ghost, "backward walk must return to the ghost node");
        assert_eq!(list.is_empty(), list.front_node() == ghost);
        assert_eq!(list.is_empty(), list.back_node() == ghost);
    }

    fn list_eq<T, I>(list: &List<T>, expected: I)
    where
        T: Debug + Clone + Eq,
        I: IntoIterator<Item = T>,
    {
        assert_well_formed(list);
        assert_eq!(
            Vec::from_iter(list.iter().cloned()),
            Vec::from_iter(expected)
        );
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        assert_well_formed(&list);
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_back(), Ok(1));
        assert!(list.is_empty());
        assert_well_formed(&list);
    }

    #[derive(Debug)]
    struct DropChecker<'a, T: Copy> {
        value: T,
        dropped: &'a RefCell<Vec<T>>,
    }
    impl<'a, T: Copy> DropChecker<'a, T> {
        fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
            Self { value, dropped }
        }
    }
    impl<'a, T: Copy> Drop for DropChecker<'a, T> {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.value);
        }
    }

    #[test]
    fn list_drop() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_drops_each_element_once() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        for i in 0..6 {
            list.push_back(DropChecker::new(i, &dropped));
        }
        let removed = list.remove_at(2).unwrap();
        assert!(dropped.borrow().is_empty(), "removing moves the element out");
        drop(removed);
        assert_eq!(dropped.borrow().as_slice(), &[2]);

        list.pop_front().unwrap();
        list.pop_back().unwrap();
        assert_eq!(dropped.borrow().as_slice(), &[2, 0, 5]);

        list.insert_at(1, DropChecker::new(6, &dropped)).unwrap();
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[2, 0, 5, 1, 6, 3, 4]);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        assert_eq!(list.front(), Err(ListError::EmptyContainer));
        assert_eq!(list.back(), Err(ListError::EmptyContainer));
        assert_eq!(list.pop_front(), Err(ListError::EmptyContainer));
        assert_eq!(list.pop_back(), Err(ListError::EmptyContainer));

        list.push_back(1);
        assert_eq!(list.back(), Ok(&1));
        assert_eq!(list.pop_front(), Ok(1));
        assert_eq!(list.pop_back(), Err(ListError::EmptyContainer));
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        list_eq(&list, vec![2, 1, 3]);
        assert_eq!(list.back(), Ok(&3));
        assert_eq!(list.front(), Ok(&2));
        assert_eq!(list.pop_front(), Ok(2));
        assert_eq!(list.pop_back(), Ok(3));

        assert_eq!(list.front(), Ok(&1));
        assert_eq!(list.pop_front(), Ok(1));
        assert_eq!(list.front(), Err(ListError::EmptyContainer));
        assert_eq!(list.back(), Err(ListError::EmptyContainer));
        assert!(list.is_empty());
        assert_well_formed(&list);
    }

    #[test]
    fn list_push_back_pop_front_round_trip() {
        let mut list = List::new();
        for i in 0..16 {
            list.push_back(i);
            assert_eq!(list.len(), i + 1);
        }
        let popped = Vec::from_iter(std::iter::from_fn(|| list.pop_front().ok()));
        assert_eq!(popped, Vec::from_iter(0..16));
        assert!(list.is_empty());
    }

    #[test]
    fn list_front_and_back_mut() {
        let mut list = List::from_iter([1, 2, 3]);
        *list.front_mut().unwrap() = 10;
        *list.back_mut().unwrap() = 30;
        list_eq(&list, vec![10, 2, 30]);

        let mut empty = List::<i32>::new();
        assert_eq!(empty.front_mut(), Err(ListError::EmptyContainer));
        assert_eq!(empty.back_mut(), Err(ListError::EmptyContainer));
    }

    #[test]
    fn list_at() {
        let list = List::from_iter(0..10);
        for i in 0..10 {
            assert_eq!(list.at(i), Ok(&i));
            // Queries are idempotent.
            assert_eq!(list.at(i), Ok(&i));
        }
        assert_eq!(
            list.at(10),
            Err(ListError::IndexOutOfRange { index: 10, len: 10 })
        );
        assert_eq!(list.len(), 10);

        let empty = List::<i32>::new();
        assert_eq!(
            empty.at(0),
            Err(ListError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn list_insert_at_and_remove_at() {
        let mut list = List::from_iter(0..10);
        list.insert_at(5, 10).unwrap();
        list_eq(&list, (0..5).chain(Some(10)).chain(5..10));
        assert_eq!(list.at(5), Ok(&10));
        assert_eq!(list.at(6), Ok(&5));

        assert_eq!(list.remove_at(10), Ok(9));
        assert_eq!(list.back(), Ok(&8));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9));

        list.insert_at(0, 11).unwrap();
        assert_eq!(list.front(), Ok(&11));
        list_eq(&list, Some(11).into_iter().chain(0..5).chain(Some(10)).chain(5..9));

        assert_eq!(list.remove_at(0), Ok(11));
        assert_eq!(list.front(), Ok(&0));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9));

        // The last index appends after the current last element.
        list.insert_at(9, 12).unwrap();
        assert_eq!(list.back(), Ok(&12));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9).chain(Some(12)));

        assert_eq!(list.remove_at(5), Ok(10));
        list_eq(&list, (0..9).chain(Some(12)));
    }

    #[test]
    fn list_insert_at_single_element() {
        let mut list = List::from_iter(Some(1));
        list.insert_at(0, 0).unwrap();
        list_eq(&list, vec![0, 1]);
        list.insert_at(1, 2).unwrap();
        list_eq(&list, vec![0, 1, 2]);
    }

    #[test]
    fn list_index_out_of_range() {
        let mut list = List::from_iter([1, 2, 3]);
        let err = ListError::IndexOutOfRange { index: 3, len: 3 };
        assert_eq!(list.at(3), Err(err));
        assert_eq!(list.at_mut(3), Err(err));
        assert_eq!(list.insert_at(3, 4), Err(err));
        assert_eq!(list.remove_at(3), Err(err));
        assert_eq!(
            list.insert_before(4, 4),
            Err(ListError::IndexOutOfRange { index: 4, len: 3 })
        );
        assert!(list.cursor(4).is_err());
        assert!(list.cursor_mut(4).is_err());
        // A rejected operation leaves the list untouched.
        list_eq(&list, vec![1, 2, 3]);

        let mut empty = List::new();
        assert_eq!(
            empty.insert_at(0, 1),
            Err(ListError::IndexOutOfRange { index: 0, len: 0 })
        );
        assert!(empty.remove_at(0).is_err());
        assert!(empty.is_empty());
    }

    #[test]
    fn list_insert_before() {
        let mut list = List::new();
        list.insert_before(0, 2).unwrap();
        list.insert_before(0, 0).unwrap();
        list.insert_before(1, 1).unwrap();
        list.insert_before(3, 3).unwrap();
        list_eq(&list, 0..4);
        for i in 0..4 {
            let mut list = List::from_iter(0..4);
            list.insert_before(i, 10).unwrap();
            assert_eq!(list.at(i), Ok(&10));
            assert_eq!(list.len(), 5);
            assert_well_formed(&list);
        }
    }

    #[test]
    fn list_clear() {
        let mut list = List::from_iter(0..5);
        list.clear();
        assert!(list.is_empty());
        assert_well_formed(&list);
        list.push_back(1);
        list_eq(&list, Some(1));
    }

    #[test]
    fn list_scenarios() {
        let mut list = List::new();
        list.push_back(10);
        list.push_back(20);
        list.push_front(5);
        list_eq(&list, vec![5, 10, 20]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Ok(&5));
        assert_eq!(list.back(), Ok(&20));

        assert_eq!(list.pop_front(), Ok(5));
        assert_eq!(list.front(), Ok(&10));
        assert_eq!(list.pop_front(), Ok(10));
        assert_eq!(list.front(), Ok(&20));
        assert_eq!(list.pop_front(), Ok(20));
        assert!(list.is_empty());

        list.push_back(100);
        list.push_back(150);
        list.push_back(-99);
        list.push_front(200);
        list_eq(&list, vec![200, 100, 150, -99]);
        assert_eq!(list.len(), 4);
        assert_eq!(list.back(), Ok(&-99));
        assert_eq!(list.at(1), Ok(&100));

        assert_eq!(list.remove_at(1), Ok(100));
        assert_eq!(list.len(), 3);
        assert_eq!(list.at(1), Ok(&150));

        list.insert_at(1, 100).unwrap();
        assert_eq!(list.at(1), Ok(&100));
        assert_eq!(list.len(), 4);

        list.remove_at(0).unwrap();
        list.remove_at(2).unwrap();
        assert_eq!(list.len(), 2);
        list_eq(&list, vec![100, 150]);

        assert_eq!(Vec::from_iter(list.iter()), vec![&100, &150]);
        assert_eq!(Vec::from_iter(list.iter().rev()), vec![&150, &100]);
    }
}
