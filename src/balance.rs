//! Red-black balance metadata, rotations and the rebalancing passes run after insertions and
//! removals.
//!
//! Every case is written once, for a deficiency or a new node on side `D`, and mirrored through
//! the `Dir` trait.

use super::node::{Links, Node, Tree, NIL};

/// A node's color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Red nodes never have red children.
    Red,
    /// The sentinel and the root are always black.
    Black,
}

use self::Color::*;

/// A side of a node.
pub trait Dir: Sized {
    type Opposite: Dir<Opposite = Self>;

    fn forward<L: Links + ?Sized>(links: &L, node: usize) -> usize;
    fn forward_mut<T>(node: &mut Node<T>) -> &mut usize;

    /// Follows `D` links from `node` (which must not be the sentinel) as far as possible.
    fn extremum<L: Links + ?Sized>(links: &L, mut node: usize) -> usize {
        loop {
            let child = Self::forward(links, node);
            if child == NIL { return node; }
            node = child;
        }
    }
}

#[allow(unused)] // uninhabited marker
pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    fn forward<L: Links + ?Sized>(links: &L, node: usize) -> usize { links.left(node) }
    fn forward_mut<T>(node: &mut Node<T>) -> &mut usize { &mut node.left }
}

#[allow(unused)] // uninhabited marker
pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    fn forward<L: Links + ?Sized>(links: &L, node: usize) -> usize { links.right(node) }
    fn forward_mut<T>(node: &mut Node<T>) -> &mut usize { &mut node.right }
}

impl<T, X, C> Tree<T, X, C> {
    //        p                  p
    //        |                  |
    //      node               pivot
    //     /    \     <D=Left>  /    \
    //    a    pivot    ==>   node    c
    //        /    \         /    \
    //     inner    c       a    inner
    //
    /// Rotates `node` down towards `D`, promoting its `D::Opposite` child into its place.
    ///
    /// Exactly three parent/child link pairs change. When `node` was the root, the sentinel's
    /// root link is redirected to the promoted child.
    pub(crate) fn rotate<D: Dir>(&mut self, node: usize) {
        let pivot = D::Opposite::forward(&self.nodes[..], node);
        let inner = D::forward(&self.nodes[..], pivot);

        *D::Opposite::forward_mut(&mut self.nodes[node]) = inner;
        if inner != NIL { self.nodes[inner].parent = node; }

        let parent = self.nodes[node].parent;
        self.nodes[pivot].parent = parent;
        self.replace_child(parent, node, pivot);

        *D::forward_mut(&mut self.nodes[pivot]) = node;
        self.nodes[node].parent = pivot;
    }

    /// Restores the red-black invariants after `node` was linked in as a red leaf.
    pub(crate) fn rebalance_insert(&mut self, mut node: usize) {
        // the root's parent is the black sentinel, so a red parent always has a parent itself
        while self.color(self.parent(node)) == Red {
            let parent = self.parent(node);
            let grandparent = self.parent(parent);

            node = if self.nodes[grandparent].left == parent {
                self.insert_case::<Left>(node)
            } else {
                self.insert_case::<Right>(node)
            };
        }

        let root = self.root;
        self.nodes[root].color = Black;
    }

    /// Resolves one red-red violation between `node` and its parent, which hangs on side `D` of
    /// the grandparent. Returns the node at which to continue.
    fn insert_case<D: Dir>(&mut self, mut node: usize) -> usize {
        let parent = self.parent(node);
        let grandparent = self.parent(parent);
        let uncle = D::Opposite::forward(&self.nodes[..], grandparent);

        if self.color(uncle) == Red {
            self.nodes[parent].color = Black;
            self.nodes[uncle].color = Black;
            self.nodes[grandparent].color = Red;
            return grandparent;
        }

        // inner grandchild: straighten the zig-zag first
        if D::Opposite::forward(&self.nodes[..], parent) == node {
            node = parent;
            self.rotate::<D>(node);
        }

        let parent = self.parent(node);
        self.nodes[parent].color = Black;
        self.nodes[grandparent].color = Red;
        self.rotate::<D::Opposite>(grandparent);
        node
    }

    /// Resolves the black-height deficiency left when a black node was spliced out, leaving
    /// `node` (possibly the sentinel) as the child of `parent`.
    pub(crate) fn rebalance_remove(&mut self, mut node: usize, mut parent: usize) {
        while node != self.root && self.color(node) == Black {
            let (next, next_parent) = if self.nodes[parent].left == node {
                self.remove_case::<Left>(parent)
            } else {
                self.remove_case::<Right>(parent)
            };

            node = next;
            parent = next_parent;
        }

        if node != NIL { self.nodes[node].color = Black; }
    }

    /// Performs one step of the double-black fixup for a deficiency on side `D` of `parent`.
    /// Returns the new deficient position and its parent.
    fn remove_case<D: Dir>(&mut self, parent: usize) -> (usize, usize) {
        // the deficient side is one black node short, so the sibling is a real node
        let mut sibling = D::Opposite::forward(&self.nodes[..], parent);

        // red sibling: rotate it above the parent so the new sibling is black
        if self.color(sibling) == Red {
            self.nodes[sibling].color = Black;
            self.nodes[parent].color = Red;
            self.rotate::<D>(parent);
            sibling = D::Opposite::forward(&self.nodes[..], parent);
        }

        let near = D::forward(&self.nodes[..], sibling);
        let far = D::Opposite::forward(&self.nodes[..], sibling);

        // black sibling, black nephews: push the deficiency up
        if self.color(near) == Black && self.color(far) == Black {
            self.nodes[sibling].color = Red;
            return (parent, self.parent(parent));
        }

        // black sibling, red near nephew only: make it the far one
        if self.color(far) == Black {
            self.nodes[near].color = Black;
            self.nodes[sibling].color = Red;
            self.rotate::<D::Opposite>(sibling);
            sibling = D::Opposite::forward(&self.nodes[..], parent);
        }

        // black sibling, red far nephew: one rotation absorbs the deficiency
        let parent_color = self.nodes[parent].color;
        self.nodes[sibling].color = parent_color;
        self.nodes[parent].color = Black;
        let far = D::Opposite::forward(&self.nodes[..], sibling);
        self.nodes[far].color = Black;
        self.rotate::<D>(parent);

        (self.root, NIL)
    }
}
