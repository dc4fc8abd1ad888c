//! The red-black tree engine shared by `Map` and `Set`.
//!
//! Nodes live in an arena and link to each other by index. Slot `NIL` holds the sentinel: it is
//! every leaf's child, the root's parent, the end position of every cursor, and it caches the
//! minimum (`left`), maximum (`right`) and root (`parent`) of the tree. Vacated slots are kept
//! on a free list, so a node never moves while it holds an element.

mod iter;

#[cfg(test)]
mod test;

use compare::Compare;
use log::trace;
use std::alloc::Layout;
use std::cmp::Ordering::*;
use std::marker::PhantomData;
use std::mem;
use super::balance::{Color, Dir, Left, Right};
use super::error::{self, Error};
use super::key::KeyOf;

pub use self::iter::{Cursor, IntoIter, Iter, IterMut, Range, RangeMut, RevCursor};
pub(crate) use self::iter::{next, prev};

/// The arena slot of the sentinel.
pub const NIL: usize = 0;

#[derive(Clone, Debug)]
pub struct Node<T> {
    pub parent: usize,
    pub left: usize,
    pub right: usize,
    pub color: Color,
    pub value: Option<T>,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Node { parent: NIL, left: NIL, right: NIL, color: Color::Black, value: None }
    }

    fn new(parent: usize, value: T) -> Self {
        Node { parent: parent, left: NIL, right: NIL, color: Color::Red, value: Some(value) }
    }
}

/// Read access to the structural links of an arena.
///
/// Traversal only needs the links, so it is written against this trait rather than against
/// `[Node<T>]`, which lets mutable iterators walk the tree without borrowing the values.
pub trait Links {
    fn parent(&self, node: usize) -> usize;
    fn left(&self, node: usize) -> usize;
    fn right(&self, node: usize) -> usize;
}

impl<T> Links for [Node<T>] {
    fn parent(&self, node: usize) -> usize { self[node].parent }
    fn left(&self, node: usize) -> usize { self[node].left }
    fn right(&self, node: usize) -> usize { self[node].right }
}

/// A handle to an element's place in a `Map` or `Set`, or to its end position.
///
/// Positions are obtained from cursors and stay valid while other elements are inserted or
/// removed. Removing the element a position refers to invalidates it. So does removing that
/// element's in-order successor when the successor has two children, because the element is
/// then moved into the successor's node. Using an invalidated position is a logic error: it
/// either panics or refers to an unspecified element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position(pub(crate) usize);

impl Position {
    /// Checks if this is the end position.
    pub fn is_end(self) -> bool { self.0 == NIL }
}

/// The vacant child link under which a new node is to be attached.
#[derive(Clone, Copy, Debug)]
pub struct Slot {
    parent: usize,
    left: bool,
}

pub struct Tree<T, X, C> {
    pub(crate) nodes: Vec<Node<T>>,
    free: Vec<usize>,
    pub(crate) root: usize,
    len: usize,
    cmp: C,
    _key: PhantomData<fn() -> X>,
}

impl<T, X, C> Tree<T, X, C> {
    pub fn with_cmp(cmp: C) -> Self {
        Tree {
            nodes: vec![Node::sentinel()],
            free: vec![],
            root: NIL,
            len: 0,
            cmp: cmp,
            _key: PhantomData,
        }
    }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn cmp(&self) -> &C { &self.cmp }

    pub(crate) fn color(&self, node: usize) -> Color { self.nodes[node].color }

    pub(crate) fn parent(&self, node: usize) -> usize { self.nodes[node].parent }

    /// The minimum node, or `NIL` if the tree is empty.
    pub fn first(&self) -> usize { self.nodes[NIL].left }

    /// The maximum node, or `NIL` if the tree is empty.
    pub fn last(&self) -> usize { self.nodes[NIL].right }

    /// Checks if `node` currently holds an element.
    pub fn is_live(&self, node: usize) -> bool {
        self.nodes.get(node).map_or(false, |n| n.value.is_some())
    }

    pub fn value(&self, node: usize) -> Option<&T> {
        self.nodes.get(node).and_then(|n| n.value.as_ref())
    }

    pub fn value_mut(&mut self, node: usize) -> Option<&mut T> {
        self.nodes.get_mut(node).and_then(|n| n.value.as_mut())
    }

    pub(crate) fn live(&self, node: usize) -> &T {
        self.nodes[node].value.as_ref().expect("live node holds an element")
    }

    pub(crate) fn live_mut(&mut self, node: usize) -> &mut T {
        self.nodes[node].value.as_mut().expect("live node holds an element")
    }

    pub fn cursor(&self, node: usize) -> Cursor<'_, T> { Cursor::new(&self.nodes, node) }

    pub fn iter(&self) -> Iter<'_, T> { Iter::new(&self.nodes, self.len) }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> { IterMut::new(&mut self.nodes, self.len) }

    pub fn into_iter(self) -> IntoIter<T> { IntoIter::new(self.nodes, self.len) }

    /// Returns an iterator over the half-open position interval `[front, back)`.
    pub fn range(&self, front: usize, back: usize) -> Range<'_, T> {
        Range::new(&self.nodes, front, back)
    }

    pub fn range_mut(&mut self, front: usize, back: usize) -> RangeMut<'_, T> {
        RangeMut::new(&mut self.nodes, front, back)
    }

    /// Points `parent`'s link to `old` at `new` instead. When `parent` is the sentinel, `new`
    /// becomes the root.
    pub(crate) fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new;
            self.nodes[NIL].parent = new;
        } else if self.nodes[parent].left == old {
            self.nodes[parent].left = new;
        } else {
            self.nodes[parent].right = new;
        }
    }

    fn alloc(&mut self, node: Node<T>) -> Result<usize, Error> {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                Ok(index)
            }
            None => {
                self.nodes.try_reserve(1)
                    .map_err(|_| Error::Alloc { layout: Layout::new::<Node<T>>() })?;
                self.nodes.push(node);
                Ok(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, node: usize) -> T {
        let value = mem::replace(&mut self.nodes[node], Node::sentinel()).value;
        self.free.push(node);
        value.expect("released node holds an element")
    }

    fn swap_values(&mut self, a: usize, b: usize) {
        let a_value = self.nodes[a].value.take();
        let b_value = mem::replace(&mut self.nodes[b].value, a_value);
        self.nodes[a].value = b_value;
    }

    /// Attaches a new red node holding `value` under `slot` and rebalances.
    pub fn link(&mut self, slot: Slot, value: T) -> Result<usize, Error> {
        let node = self.alloc(Node::new(slot.parent, value))?;

        if slot.parent == NIL {
            self.root = node;
            let sentinel = &mut self.nodes[NIL];
            sentinel.parent = node;
            sentinel.left = node;
            sentinel.right = node;
        } else if slot.left {
            self.nodes[slot.parent].left = node;
            if self.nodes[NIL].left == slot.parent { self.nodes[NIL].left = node; }
        } else {
            self.nodes[slot.parent].right = node;
            if self.nodes[NIL].right == slot.parent { self.nodes[NIL].right = node; }
        }

        self.len += 1;
        self.rebalance_insert(node);
        Ok(node)
    }

    /// Splices `node` out of the tree and returns its element.
    ///
    /// A node with two children trades elements with its in-order predecessor, whose node (with
    /// at most one child) is then spliced out in its place.
    fn unlink(&mut self, mut node: usize) -> T {
        if self.nodes[node].left != NIL && self.nodes[node].right != NIL {
            let pred = Right::extremum(&self.nodes[..], self.nodes[node].left);
            self.swap_values(node, pred);
            node = pred;
        }

        let parent = self.nodes[node].parent;
        let left = self.nodes[node].left;
        let child = if left != NIL { left } else { self.nodes[node].right };

        if self.nodes[NIL].left == node {
            self.nodes[NIL].left =
                if child != NIL { Left::extremum(&self.nodes[..], child) } else { parent };
        }

        if self.nodes[NIL].right == node {
            self.nodes[NIL].right =
                if child != NIL { Right::extremum(&self.nodes[..], child) } else { parent };
        }

        if child != NIL { self.nodes[child].parent = parent; }
        self.replace_child(parent, node, child);

        let color = self.nodes[node].color;
        let value = self.release(node);
        self.len -= 1;

        if color == Color::Black { self.rebalance_remove(child, parent); }
        value
    }

    /// Removes the element at `node`, returning it and the position that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `node` holds no element.
    pub fn erase_at(&mut self, node: usize) -> (T, usize) {
        assert!(self.is_live(node), "position {} holds no element", node);
        let following = next(&self.nodes[..], node);
        (self.unlink(node), following)
    }

    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.first();
        if first == NIL { None } else { Some(self.unlink(first)) }
    }

    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.last();
        if last == NIL { None } else { Some(self.unlink(last)) }
    }

    /// Destroys every node, leaving the tree empty.
    ///
    /// Nodes are destroyed in post-order by walking the parent links, so neither the call stack
    /// nor an auxiliary stack grows with the tree's height.
    pub fn clear(&mut self) {
        let mut node = self.root;

        while node != NIL {
            let Node { parent, left, right, .. } = self.nodes[node];

            if left != NIL {
                node = left;
            } else if right != NIL {
                node = right;
            } else {
                if parent != NIL {
                    if self.nodes[parent].left == node {
                        self.nodes[parent].left = NIL;
                    } else {
                        self.nodes[parent].right = NIL;
                    }
                }

                self.nodes[node].value = None;
                node = parent;
            }
        }

        trace!("cleared tree of {} elements", self.len);

        self.nodes.truncate(1);
        self.nodes[NIL] = Node::sentinel();
        self.free.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// Exchanges the contents of two trees in constant time. Comparators stay in place.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.nodes, &mut other.nodes);
        mem::swap(&mut self.free, &mut other.free);
        mem::swap(&mut self.root, &mut other.root);
        mem::swap(&mut self.len, &mut other.len);
    }
}

impl<T, X, C> Tree<T, X, C> where X: KeyOf<T> {
    fn key(&self, node: usize) -> &X::Key { X::key_of(self.live(node)) }

    /// Searches for `key`, returning its node or the vacant slot where it belongs.
    pub fn search<Q: ?Sized>(&self, key: &Q) -> Result<usize, Slot>
        where C: Compare<Q, X::Key> {

        let mut slot = Slot { parent: NIL, left: true };
        let mut node = self.root;

        while node != NIL {
            slot.parent = node;

            match self.cmp.compare(key, self.key(node)) {
                Equal => return Ok(node),
                Less => { slot.left = true; node = self.nodes[node].left; }
                Greater => { slot.left = false; node = self.nodes[node].right; }
            }
        }

        Err(slot)
    }

    /// Returns the node holding `key`, or `NIL`.
    pub fn find<Q: ?Sized>(&self, key: &Q) -> usize where C: Compare<Q, X::Key> {
        self.search(key).unwrap_or(NIL)
    }

    pub fn try_insert(&mut self, value: T) -> Result<(usize, bool), Error>
        where C: Compare<X::Key> {

        match self.search(X::key_of(&value)) {
            Ok(node) => Ok((node, false)),
            Err(slot) => self.link(slot, value).map(|node| (node, true)),
        }
    }

    /// Inserts `value` unless an element with an equal key is present. Returns the node holding
    /// the key and whether `value` was inserted; a rejected `value` is dropped.
    pub fn insert(&mut self, value: T) -> (usize, bool) where C: Compare<X::Key> {
        error::unwrap_or_abort(self.try_insert(value))
    }

    /// Inserts `value`, starting the search at `hint` when the new element belongs immediately
    /// before it. Falls back to a search from the root otherwise.
    pub fn insert_hint(&mut self, hint: usize, value: T) -> usize where C: Compare<X::Key> {
        let slot = match self.hint_slot(hint, X::key_of(&value)) {
            Some(Ok(node)) => return node,
            Some(Err(slot)) => slot,
            None => match self.search(X::key_of(&value)) {
                Ok(node) => return node,
                Err(slot) => slot,
            },
        };

        error::unwrap_or_abort(self.link(slot, value))
    }

    /// Checks `hint` against its neighbors. Returns `None` if it is of no use for `key`.
    fn hint_slot(&self, hint: usize, key: &X::Key) -> Option<Result<usize, Slot>>
        where C: Compare<X::Key> {

        if hint == NIL {
            let last = self.last();

            return if last != NIL && self.cmp.compares_gt(key, self.key(last)) {
                Some(Err(Slot { parent: last, left: false }))
            } else {
                None
            };
        }

        if !self.is_live(hint) { return None; }

        match self.cmp.compare(key, self.key(hint)) {
            Equal => Some(Ok(hint)),
            Less => {
                if hint == self.first() { return Some(Err(Slot { parent: hint, left: true })); }

                let before = prev(&self.nodes[..], hint);
                if !self.cmp.compares_gt(key, self.key(before)) { return None; }

                Some(Err(if self.nodes[before].right == NIL {
                    Slot { parent: before, left: false }
                } else {
                    Slot { parent: hint, left: true }
                }))
            }
            Greater => {
                if hint == self.last() { return Some(Err(Slot { parent: hint, left: false })); }

                let after = next(&self.nodes[..], hint);
                if !self.cmp.compares_lt(key, self.key(after)) { return None; }

                Some(Err(if self.nodes[hint].right == NIL {
                    Slot { parent: hint, left: false }
                } else {
                    Slot { parent: after, left: true }
                }))
            }
        }
    }

    /// Removes the element with the given key. An absent key leaves the tree untouched.
    pub fn erase<Q: ?Sized>(&mut self, key: &Q) -> Option<T> where C: Compare<Q, X::Key> {
        match self.search(key) {
            Ok(node) => Some(self.unlink(node)),
            Err(_) => None,
        }
    }

    /// The first node whose key is not less than `key`, or `NIL`.
    pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> usize where C: Compare<Q, X::Key> {
        let mut bound = NIL;
        let mut node = self.root;

        while node != NIL {
            if self.cmp.compares_gt(key, self.key(node)) {
                node = self.nodes[node].right;
            } else {
                bound = node;
                node = self.nodes[node].left;
            }
        }

        bound
    }

    /// The first node whose key is greater than `key`, or `NIL`.
    pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> usize where C: Compare<Q, X::Key> {
        let mut bound = NIL;
        let mut node = self.root;

        while node != NIL {
            if self.cmp.compares_lt(key, self.key(node)) {
                bound = node;
                node = self.nodes[node].left;
            } else {
                node = self.nodes[node].right;
            }
        }

        bound
    }

    /// The greatest node whose key is less than (or, if `inclusive`, equal to) `key`, or `NIL`.
    pub fn pred<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> usize
        where C: Compare<Q, X::Key> {

        let bound = if inclusive { self.upper_bound(key) } else { self.lower_bound(key) };
        if bound == self.first() { NIL } else { prev(&self.nodes[..], bound) }
    }

    /// The least node whose key is greater than (or, if `inclusive`, equal to) `key`, or `NIL`.
    pub fn succ<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> usize
        where C: Compare<Q, X::Key> {

        if inclusive { self.lower_bound(key) } else { self.upper_bound(key) }
    }

    /// Checks that `front` does not come after `back`, so that `[front, back)` is a valid
    /// interval.
    pub fn is_ordered_interval(&self, front: usize, back: usize) -> bool
        where C: Compare<X::Key> {

        front == NIL && back == NIL || back == NIL ||
            front != NIL && !self.cmp.compares_gt(self.key(front), self.key(back))
    }
}

impl<T, X, C> Clone for Tree<T, X, C> where T: Clone, C: Clone {
    fn clone(&self) -> Self {
        Tree {
            nodes: self.nodes.clone(),
            free: self.free.clone(),
            root: self.root,
            len: self.len,
            cmp: self.cmp.clone(),
            _key: PhantomData,
        }
    }
}
