use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr;
use super::{Links, Node, Position, NIL};
use super::super::balance::{Dir, Left, Right};

/// Returns the in-order successor of `node`. The successor of the maximum is the sentinel and
/// the successor of the sentinel is the minimum.
pub fn next<L: Links + ?Sized>(links: &L, node: usize) -> usize { step::<Right, L>(links, node) }

/// Returns the in-order predecessor of `node`. The predecessor of the minimum is the sentinel
/// and the predecessor of the sentinel is the maximum.
pub fn prev<L: Links + ?Sized>(links: &L, node: usize) -> usize { step::<Left, L>(links, node) }

fn step<D: Dir, L: Links + ?Sized>(links: &L, mut node: usize) -> usize {
    // the sentinel caches the minimum on its left and the maximum on its right
    if node == NIL { return D::Opposite::forward(links, NIL); }

    let child = D::forward(links, node);
    if child != NIL { return D::Opposite::extremum(links, child); }

    let mut parent = links.parent(node);

    while parent != NIL && D::forward(links, parent) == node {
        node = parent;
        parent = links.parent(node);
    }

    parent
}

/// A bidirectional cursor over the elements of a `Map` or `Set` in ascending order.
///
/// A cursor always rests on an element or on the end position, which sits both after the
/// maximum and before the minimum: moving forward from the end wraps to the minimum and moving
/// backward from the end wraps to the maximum.
///
/// # Examples
///
/// ```
/// let mut set = tree::Set::new();
///
/// set.insert(2);
/// set.insert(1);
/// set.insert(3);
///
/// let mut cursor = set.find(&2);
/// assert_eq!(cursor.get(), Some(&2));
///
/// cursor.move_next();
/// assert_eq!(cursor.get(), Some(&3));
///
/// cursor.move_next();
/// assert!(cursor.is_end());
/// assert_eq!(cursor, set.end());
///
/// cursor.move_prev();
/// cursor.move_prev();
/// cursor.move_prev();
/// assert_eq!(cursor, set.begin());
/// ```
pub struct Cursor<'a, T: 'a> {
    nodes: &'a [Node<T>],
    node: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>], node: usize) -> Self {
        Cursor { nodes: nodes, node: node }
    }

    /// Returns the cursor's position, for use with `insert_hint` and `erase_at`.
    pub fn position(&self) -> Position { Position(self.node) }

    /// Checks if the cursor rests on the end position.
    pub fn is_end(&self) -> bool { self.node == NIL }

    /// Returns a reference to the element under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&'a T> { self.nodes[self.node].value.as_ref() }

    /// Moves the cursor to the next element in ascending order.
    pub fn move_next(&mut self) { self.node = next(self.nodes, self.node); }

    /// Moves the cursor to the previous element in ascending order.
    pub fn move_prev(&mut self) { self.node = prev(self.nodes, self.node); }

    /// Returns a reference to the element after the cursor without moving it.
    pub fn peek_next(&self) -> Option<&'a T> {
        self.nodes[next(self.nodes, self.node)].value.as_ref()
    }

    /// Returns a reference to the element before the cursor without moving it.
    pub fn peek_prev(&self) -> Option<&'a T> {
        self.nodes[prev(self.nodes, self.node)].value.as_ref()
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self { *self }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.node == other.node
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> Debug for Cursor<'a, T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// A cursor that walks a `Map` or `Set` in descending order.
///
/// It wraps a forward cursor positioned one past the element it refers to, so the reverse
/// cursor built from the end position refers to the maximum.
///
/// # Examples
///
/// ```
/// let set: tree::Set<_> = vec![1, 2, 3].into_iter().collect();
///
/// let mut cursor = set.rbegin();
/// assert_eq!(cursor.get(), Some(&3));
///
/// cursor.move_next();
/// assert_eq!(cursor.get(), Some(&2));
/// assert_eq!(cursor.base().get(), Some(&3));
///
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor, set.rend());
/// ```
pub struct RevCursor<'a, T: 'a> {
    base: Cursor<'a, T>,
}

impl<'a, T> RevCursor<'a, T> {
    /// Creates a reverse cursor referring to the element before `base`.
    pub fn new(base: Cursor<'a, T>) -> Self { RevCursor { base: base } }

    /// Returns the underlying forward cursor, which rests one element after this one.
    pub fn base(&self) -> Cursor<'a, T> { self.base }

    /// Returns a reference to the element under the cursor, or `None` past the minimum.
    pub fn get(&self) -> Option<&'a T> { self.base.peek_prev() }

    /// Moves the cursor to the next element in descending order.
    pub fn move_next(&mut self) { self.base.move_prev(); }

    /// Moves the cursor to the previous element in descending order.
    pub fn move_prev(&mut self) { self.base.move_next(); }
}

impl<'a, T> Clone for RevCursor<'a, T> {
    fn clone(&self) -> Self { *self }
}

impl<'a, T> Copy for RevCursor<'a, T> {}

impl<'a, T> PartialEq for RevCursor<'a, T> {
    fn eq(&self, other: &Self) -> bool { self.base == other.base }
}

impl<'a, T> Eq for RevCursor<'a, T> {}

impl<'a, T> Debug for RevCursor<'a, T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("RevCursor").field(&self.get()).finish()
    }
}

pub struct Iter<'a, T: 'a> {
    nodes: &'a [Node<T>],
    front: usize,
    back: usize,
    size: usize,
}

impl<'a, T> Iter<'a, T> {
    pub fn new(nodes: &'a [Node<T>], size: usize) -> Self {
        Iter { nodes: nodes, front: nodes[NIL].left, back: NIL, size: size }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter { nodes: self.nodes, front: self.front, back: self.back, size: self.size }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.size == 0 { return None; }
        let node = self.front;
        self.front = next(self.nodes, node);
        self.size -= 1;
        self.nodes[node].value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.size == 0 { return None; }
        self.back = prev(self.nodes, self.back);
        self.size -= 1;
        self.nodes[self.back].value.as_ref()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Reads links through a raw arena pointer without creating references to whole nodes, so
/// that element references handed out by `IterMut` are never aliased.
struct RawLinks<T>(*mut Node<T>);

impl<T> Links for RawLinks<T> {
    fn parent(&self, node: usize) -> usize { unsafe { (*self.0.add(node)).parent } }
    fn left(&self, node: usize) -> usize { unsafe { (*self.0.add(node)).left } }
    fn right(&self, node: usize) -> usize { unsafe { (*self.0.add(node)).right } }
}

pub struct IterMut<'a, T: 'a> {
    links: RawLinks<T>,
    front: usize,
    back: usize,
    size: usize,
    _marker: PhantomData<&'a mut [Node<T>]>,
}

impl<'a, T> IterMut<'a, T> {
    pub fn new(nodes: &'a mut [Node<T>], size: usize) -> Self {
        let front = nodes[NIL].left;

        IterMut {
            links: RawLinks(nodes.as_mut_ptr()),
            front: front,
            back: NIL,
            size: size,
            _marker: PhantomData,
        }
    }

    fn value(&mut self, node: usize) -> Option<&'a mut T> {
        // every live node is yielded at most once, so the returned borrows are disjoint
        unsafe { (*self.links.0.add(node)).value.as_mut() }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.size == 0 { return None; }
        let node = self.front;
        self.front = next(&self.links, node);
        self.size -= 1;
        self.value(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.size == 0 { return None; }
        self.back = prev(&self.links, self.back);
        self.size -= 1;
        let back = self.back;
        self.value(back)
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

unsafe impl<'a, T> Send for IterMut<'a, T> where T: Send {}
unsafe impl<'a, T> Sync for IterMut<'a, T> where T: Sync {}

#[derive(Clone)]
pub struct IntoIter<T> {
    nodes: Vec<Node<T>>,
    front: usize,
    back: usize,
    size: usize,
}

impl<T> IntoIter<T> {
    pub fn new(nodes: Vec<Node<T>>, size: usize) -> Self {
        let front = nodes[NIL].left;
        IntoIter { nodes: nodes, front: front, back: NIL, size: size }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.size == 0 { return None; }
        let node = self.front;
        self.front = next(&self.nodes[..], node);
        self.size -= 1;
        self.nodes[node].value.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.size == 0 { return None; }
        self.back = prev(&self.nodes[..], self.back);
        self.size -= 1;
        self.nodes[self.back].value.take()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

/// Iterates over the half-open interval of positions `[front, back)`.
pub struct Range<'a, T: 'a> {
    nodes: &'a [Node<T>],
    front: usize,
    back: usize,
}

impl<'a, T> Range<'a, T> {
    pub fn new(nodes: &'a [Node<T>], front: usize, back: usize) -> Self {
        Range { nodes: nodes, front: front, back: back }
    }
}

impl<'a, T> Clone for Range<'a, T> {
    fn clone(&self) -> Self { Range { nodes: self.nodes, front: self.front, back: self.back } }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back { return None; }
        let node = self.front;
        self.front = next(self.nodes, node);
        self.nodes[node].value.as_ref()
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back { return None; }
        self.back = prev(self.nodes, self.back);
        self.nodes[self.back].value.as_ref()
    }
}

impl<'a, T> FusedIterator for Range<'a, T> {}

/// Like `Range`, but yields mutable references. Stepping reads links through `RawLinks`.
pub struct RangeMut<'a, T: 'a> {
    links: RawLinks<T>,
    front: usize,
    back: usize,
    _marker: PhantomData<&'a mut [Node<T>]>,
}

impl<'a, T> RangeMut<'a, T> {
    pub fn new(nodes: &'a mut [Node<T>], front: usize, back: usize) -> Self {
        RangeMut {
            links: RawLinks(nodes.as_mut_ptr()),
            front: front,
            back: back,
            _marker: PhantomData,
        }
    }

    fn value(&mut self, node: usize) -> Option<&'a mut T> {
        // the interval shrinks past `node` before it is yielded
        unsafe { (*self.links.0.add(node)).value.as_mut() }
    }
}

impl<'a, T> Iterator for RangeMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.front == self.back { return None; }
        let node = self.front;
        self.front = next(&self.links, node);
        self.value(node)
    }
}

impl<'a, T> DoubleEndedIterator for RangeMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.front == self.back { return None; }
        self.back = prev(&self.links, self.back);
        let back = self.back;
        self.value(back)
    }
}

impl<'a, T> FusedIterator for RangeMut<'a, T> {}

unsafe impl<'a, T> Send for RangeMut<'a, T> where T: Send {}
unsafe impl<'a, T> Sync for RangeMut<'a, T> where T: Sync {}
