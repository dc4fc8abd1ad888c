//! An ordered set based on a red-black tree.

use compare::{Compare, Natural};
use std::cmp::Ordering;
use std::cmp::Ordering::*;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter;
use std::ops::Bound;
use super::error::Error;
use super::key::Identity;
use super::node::{Cursor, Position, RevCursor, Tree, NIL};

pub use super::node::{IntoIter, Iter, Range};

/// An ordered set based on a red-black tree.
///
/// The behavior of this set is undefined if an item's ordering relative to any other item changes
/// while the item is in the set. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct Set<T, C = Natural<T>> where C: Compare<T> {
    tree: Tree<T, Identity, C>,
}

impl<T> Set<T> where T: Ord {
    /// Creates an empty set ordered according to the natural order of its items.
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
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Set::with_cmp(compare::natural()) }
}

impl<T, C> Set<T, C> where C: Compare<T> {
    /// Creates an empty set ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut set = tree::Set::with_cmp(natural().rev());
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { Set { tree: Tree::with_cmp(cmp) } }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool { self.tree.is_empty() }

    /// Returns the number of items in the set.
    pub fn len(&self) -> usize { self.tree.len() }

    /// Returns a reference to the set's comparator.
    pub fn cmp(&self) -> &C { self.tree.cmp() }

    /// Removes all items from the set.
    pub fn clear(&mut self) { self.tree.clear(); }

    /// Exchanges the items of two sets in constant time. The comparators are not exchanged.
    pub fn swap(&mut self, other: &mut Self) { self.tree.swap(&mut other.tree); }

    /// Inserts an item into the set unless an equal item is already present, returning the
    /// position of the item in the set and whether the given item was inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree::Set::new();
    ///
    /// assert!(set.insert(1).1);
    /// assert!(!set.insert(1).1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, item: T) -> (Position, bool) {
        let (node, inserted) = self.tree.insert(item);
        (Position(node), inserted)
    }

    /// Like `insert`, but returns an error instead of aborting when memory for the new item
    /// cannot be allocated.
    pub fn try_insert(&mut self, item: T) -> Result<(Position, bool), Error> {
        self.tree.try_insert(item).map(|(node, inserted)| (Position(node), inserted))
    }

    /// Inserts an item into the set, using `hint` as a suggestion of where it belongs. See
    /// [`Map::insert_hint`](../map/struct.Map.html#method.insert_hint).
    pub fn insert_hint(&mut self, hint: Position, item: T) -> Position {
        Position(self.tree.insert_hint(hint.0, item))
    }

    /// Removes the item equal to the given one, returning `true` if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree::Set::new();
    ///
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool where C: Compare<Q, T> {
        self.tree.erase(item).is_some()
    }

    /// Removes and returns the item equal to the given one, if any.
    pub fn take<Q: ?Sized>(&mut self, item: &Q) -> Option<T> where C: Compare<Q, T> {
        self.tree.erase(item)
    }

    /// Removes the item at the given position, returning it along with the position of the
    /// item that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end position or does not refer to an item.
    pub fn erase_at(&mut self, pos: Position) -> (T, Position) {
        let (item, next) = self.tree.erase_at(pos.0);
        (item, Position(next))
    }

    /// Checks if the set contains an item equal to the given one.
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where C: Compare<Q, T> {
        self.tree.find(item) != NIL
    }

    /// Returns the number of items equal to the given one, which is either 0 or 1.
    pub fn count<Q: ?Sized>(&self, item: &Q) -> usize where C: Compare<Q, T> {
        if self.contains(item) { 1 } else { 0 }
    }

    /// Returns a reference to the item equal to the given one, if any.
    pub fn get<Q: ?Sized>(&self, item: &Q) -> Option<&T> where C: Compare<Q, T> {
        self.tree.value(self.tree.find(item))
    }

    /// Returns a cursor resting on the item equal to the given one, or on the end position.
    pub fn find<Q: ?Sized>(&self, item: &Q) -> Cursor<'_, T> where C: Compare<Q, T> {
        self.tree.cursor(self.tree.find(item))
    }

    /// Returns a cursor resting on the first item not less than the given one.
    pub fn lower_bound<Q: ?Sized>(&self, item: &Q) -> Cursor<'_, T> where C: Compare<Q, T> {
        self.tree.cursor(self.tree.lower_bound(item))
    }

    /// Returns a cursor resting on the first item greater than the given one.
    pub fn upper_bound<Q: ?Sized>(&self, item: &Q) -> Cursor<'_, T> where C: Compare<Q, T> {
        self.tree.cursor(self.tree.upper_bound(item))
    }

    /// Returns the pair `(lower_bound(item), upper_bound(item))`.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree::Set<_> = vec![1, 3, 5].into_iter().collect();
    ///
    /// let (lo, hi) = set.equal_range(&3);
    /// assert_eq!(lo.get(), Some(&3));
    /// assert_eq!(hi.get(), Some(&5));
    ///
    /// let (lo, hi) = set.equal_range(&4);
    /// assert_eq!(lo, hi);
    /// ```
    pub fn equal_range<Q: ?Sized>(&self, item: &Q) -> (Cursor<'_, T>, Cursor<'_, T>)
        where C: Compare<Q, T> {

        (self.lower_bound(item), self.upper_bound(item))
    }

    pub fn begin(&self) -> Cursor<'_, T> { self.tree.cursor(self.tree.first()) }

    pub fn end(&self) -> Cursor<'_, T> { self.tree.cursor(NIL) }

    pub fn rbegin(&self) -> RevCursor<'_, T> { RevCursor::new(self.end()) }

    pub fn rend(&self) -> RevCursor<'_, T> { RevCursor::new(self.begin()) }

    /// Returns a cursor resting on the given position.
    ///
    /// # Panics
    ///
    /// May panic if `pos` was invalidated.
    pub fn cursor(&self, pos: Position) -> Cursor<'_, T> {
        assert!(pos.is_end() || self.tree.is_live(pos.0), "invalid position");
        self.tree.cursor(pos.0)
    }

    /// Returns a reference to the set's maximum item, or `None` if the set is empty.
    pub fn last(&self) -> Option<&T> { self.tree.value(self.tree.last()) }

    /// Removes and returns the set's maximum item, or `None` if the set is empty.
    pub fn pop_last(&mut self) -> Option<T> { self.tree.pop_last() }

    /// Returns a reference to the set's minimum item, or `None` if the set is empty.
    pub fn first(&self) -> Option<&T> { self.tree.value(self.tree.first()) }

    /// Removes and returns the set's minimum item, or `None` if the set is empty.
    pub fn pop_first(&mut self) -> Option<T> { self.tree.pop_first() }

    /// Returns a reference to the predecessor of the given item, or `None` if no such item is
    /// present in the set.
    ///
    /// If `inclusive` is `false`, this method finds the greatest item that is strictly less
    /// than the given item. If `inclusive` is `true`, this method finds the greatest item that
    /// is less than or equal to the given item.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree::Set<_> = vec![1, 2, 3].into_iter().collect();
    ///
    /// assert_eq!(set.pred(&1, false), None);
    /// assert_eq!(set.pred(&2, false), Some(&1));
    /// assert_eq!(set.pred(&2, true), Some(&2));
    /// assert_eq!(set.pred(&9, false), Some(&3));
    /// ```
    pub fn pred<Q: ?Sized>(&self, item: &Q, inclusive: bool) -> Option<&T>
        where C: Compare<Q, T> {

        self.tree.value(self.tree.pred(item, inclusive))
    }

    /// Returns a reference to the successor of the given item, or `None` if no such item is
    /// present in the set.
    ///
    /// If `inclusive` is `false`, this method finds the smallest item that is strictly greater
    /// than the given item. If `inclusive` is `true`, this method finds the smallest item that
    /// is greater than or equal to the given item.
    pub fn succ<Q: ?Sized>(&self, item: &Q, inclusive: bool) -> Option<&T>
        where C: Compare<Q, T> {

        self.tree.value(self.tree.succ(item, inclusive))
    }

    /// Returns an iterator that consumes the set, yielding its items in ascending order.
    pub fn into_iter(self) -> IntoIter<T> { self.tree.into_iter() }

    /// Returns an iterator over the set's items in ascending order.
    pub fn iter(&self) -> Iter<'_, T> { self.tree.iter() }

    /// Returns an iterator over the set's items that lie in the given range, in ascending
    /// order. A range whose lower end lies above its upper end is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Excluded, Included};
    ///
    /// let set: tree::Set<_> = (0..10).collect();
    ///
    /// let items: Vec<_> = set.range(Excluded(&2), Included(&5)).cloned().collect();
    /// assert_eq!(items, [3, 4, 5]);
    /// ```
    pub fn range<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> Range<'_, T> where C: Compare<Min, T> + Compare<Max, T> {

        let front = match min {
            Bound::Included(item) => self.tree.lower_bound(item),
            Bound::Excluded(item) => self.tree.upper_bound(item),
            Bound::Unbounded => self.tree.first(),
        };

        let back = match max {
            Bound::Included(item) => self.tree.upper_bound(item),
            Bound::Excluded(item) => self.tree.lower_bound(item),
            Bound::Unbounded => NIL,
        };

        if self.tree.is_ordered_interval(front, back) {
            self.tree.range(front, back)
        } else {
            self.tree.range(NIL, NIL)
        }
    }
}

impl<T, C> Debug for Set<T, C> where T: Debug, C: Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> Default for Set<T, C> where C: Compare<T> + Default {
    fn default() -> Self { Set::with_cmp(Default::default()) }
}

impl<T, C> Extend<T> for Set<T, C> where C: Compare<T> {
    fn extend<I: IntoIterator<Item=T>>(&mut self, it: I) {
        for item in it { self.insert(item); }
    }
}

impl<T, C> iter::FromIterator<T> for Set<T, C> where C: Compare<T> + Default {
    fn from_iter<I: IntoIterator<Item=T>>(it: I) -> Self {
        let mut set: Self = Default::default();
        set.extend(it);
        set
    }
}

impl<T, C> Hash for Set<T, C> where T: Hash, C: Compare<T> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        self.len().hash(h);
        for item in self.iter() { item.hash(h); }
    }
}

impl<'a, T, C> IntoIterator for &'a Set<T, C> where C: Compare<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T, C> IntoIterator for Set<T, C> where C: Compare<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> { self.into_iter() }
}

impl<T, C> PartialEq for Set<T, C> where C: Compare<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() &&
            self.iter().zip(other.iter()).all(|(l, r)| self.cmp().compares_eq(l, r))
    }
}

impl<T, C> Eq for Set<T, C> where C: Compare<T> {}

impl<T, C> PartialOrd for Set<T, C> where C: Compare<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(Ord::cmp(self, other)) }
}

impl<T, C> Ord for Set<T, C> where C: Compare<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Equal,
                (None, Some(_)) => return Less,
                (Some(_), None) => return Greater,
                (Some(l), Some(r)) => match self.cmp().compare(l, r) {
                    Equal => {}
                    non_eq => return non_eq,
                },
            }
        }
    }
}
