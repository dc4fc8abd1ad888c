//! An ordered map based on a red-black tree.

use compare::{Compare, Natural};
use std::cmp::Ordering;
use std::cmp::Ordering::*;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter::{self, FusedIterator, IntoIterator};
use std::mem;
use std::ops::{self, Bound};
use super::error::{self, Error};
use super::key::First;
use super::node::{self, Cursor, Position, RevCursor, Slot, Tree, NIL};

/// An ordered map based on a red-black tree.
///
/// Each entry is stored as a `(K, V)` pair in its own node. Inserting or removing entries never
/// moves other entries, so a `Position` obtained from a cursor stays valid across unrelated
/// mutations.
///
/// The behavior of this map is undefined if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct Map<K, V, C = Natural<K>> where C: Compare<K> {
    tree: Tree<(K, V), First, C>,
}

fn pair<K, V>(entry: &(K, V)) -> (&K, &V) { (&entry.0, &entry.1) }

fn pair_mut<K, V>(entry: &mut (K, V)) -> (&K, &mut V) {
    let &mut (ref key, ref mut value) = entry;
    (key, value)
}

impl<K, V> Map<K, V> where K: Ord {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Map::with_cmp(compare::natural()) }
}

impl<K, V, C> Map<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut map = tree::Map::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { Map { tree: Tree::with_cmp(cmp) } }

    /// Checks if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    /// assert!(map.is_empty());
    ///
    /// map.insert(2, "b");
    /// assert!(!map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.tree.is_empty() }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.tree.len() }

    /// Returns a reference to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let map: tree::Map<i32, &str> = tree::Map::new();
    /// assert!(map.cmp().compares_lt(&1, &2));
    ///
    /// let map: tree::Map<i32, &str, _> = tree::Map::with_cmp(natural().rev());
    /// assert!(map.cmp().compares_gt(&1, &2));
    /// ```
    pub fn cmp(&self) -> &C { self.tree.cmp() }

    /// Removes all entries from the map.
    ///
    /// Entries are dropped without recursion, so clearing a map never overflows the stack.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// map.clear();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert_eq!(map.iter().next(), None);
    /// ```
    pub fn clear(&mut self) { self.tree.clear(); }

    /// Exchanges the entries of two maps in constant time. The comparators are not exchanged.
    pub fn swap(&mut self, other: &mut Self) { self.tree.swap(&mut other.tree); }

    /// Inserts an entry into the map unless it already contains the key.
    ///
    /// Returns the position of the entry holding the key and whether the entry was inserted.
    /// When the key is present, the map is left untouched and the given key and value are
    /// dropped; use `insert_or_assign` or the entry API to overwrite.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    ///
    /// let (pos, inserted) = map.insert(1, "a");
    /// assert!(inserted);
    /// assert_eq!(map.cursor(pos).get(), Some(&(1, "a")));
    ///
    /// let (same, inserted) = map.insert(1, "b");
    /// assert!(!inserted);
    /// assert_eq!(same, pos);
    /// assert_eq!(map[&1], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        let (node, inserted) = self.tree.insert((key, value));
        (Position(node), inserted)
    }

    /// Like `insert`, but returns an error instead of aborting when memory for the new entry
    /// cannot be allocated.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(Position, bool), Error> {
        self.tree.try_insert((key, value)).map(|(node, inserted)| (Position(node), inserted))
    }

    /// Inserts an entry into the map, returning the previous value, if any, associated with
    /// the key. The key already in the map is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    /// assert_eq!(map.insert_or_assign(1, "a"), None);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.insert_or_assign(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut e) => Some(e.insert(value)),
            Entry::Vacant(e) => { e.insert(value); None }
        }
    }

    /// Inserts an entry into the map, using `hint` as a suggestion of where it belongs.
    ///
    /// The search starts at `hint` when the key sorts immediately before the entry at `hint`
    /// (or after the maximum, if `hint` is the end position), and at the root otherwise. Returns
    /// the position of the entry holding the key; like `insert`, an existing entry is never
    /// overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    /// let mut hint = map.end().position();
    ///
    /// for (i, c) in "abc".chars().enumerate() {
    ///     map.insert_hint(hint, i, c);
    ///     hint = map.end().position();
    /// }
    ///
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&0, &'a'), (&1, &'b'), (&2, &'c')]);
    /// ```
    pub fn insert_hint(&mut self, hint: Position, key: K, value: V) -> Position {
        Position(self.tree.insert_hint(hint.0, (key, value)))
    }

    /// Removes and returns the entry whose key is equal to the given key, returning
    /// `None` if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove(&1), Some((1, "a")));
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)> where C: Compare<Q, K> {
        self.tree.erase(key)
    }

    /// Removes the entry at the given position, returning it along with the position of the
    /// entry that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end position or does not refer to an entry.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: tree::Map<_, _> = (0..6).map(|i| (i, i * i)).collect();
    ///
    /// let mut pos = map.begin().position();
    ///
    /// // remove every other entry
    /// while !pos.is_end() {
    ///     let (_, next) = map.erase_at(pos);
    ///     let mut cursor = map.cursor(next);
    ///     if !cursor.is_end() { cursor.move_next(); }
    ///     pos = cursor.position();
    /// }
    ///
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &1), (&3, &9), (&5, &25)]);
    /// ```
    pub fn erase_at(&mut self, pos: Position) -> ((K, V), Position) {
        let (entry, next) = self.tree.erase_at(pos.0);
        (entry, Position(next))
    }

    /// Returns the map's entry corresponding to the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut counts = tree::Map::new();
    ///
    /// for s in vec!["a", "b", "a", "c", "a", "b"] {
    ///     *counts.entry(s).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(counts[&"a"], 3);
    /// assert_eq!(counts[&"b"], 2);
    /// assert_eq!(counts[&"c"], 1);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C> {
        match self.tree.search(&key) {
            Ok(node) => Entry::Occupied(OccupiedEntry { tree: &mut self.tree, node: node }),
            Err(slot) => Entry::Vacant(VacantEntry { tree: &mut self.tree, slot: slot, key: key }),
        }
    }

    /// Returns a mutable reference to the value associated with the given key, inserting
    /// `V::default()` first if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    ///
    /// *map.get_or_default("a") += 2;
    /// *map.get_or_default("a") += 3;
    /// assert_eq!(map.get_or_default("b"), &mut 0);
    ///
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&"a", &5), (&"b", &0)]);
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V where V: Default {
        self.entry(key).or_default()
    }

    /// Returns a reference to the value associated with the given key, or
    /// `Error::KeyNotFound` if the map does not contain the key. The map is never modified.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(tree::Error::KeyNotFound));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn at<Q: ?Sized>(&self, key: &Q) -> Result<&V, Error> where C: Compare<Q, K> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Checks if the map contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    /// assert!(!map.contains_key(&1));
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.tree.find(key) != NIL
    }

    /// Returns the number of entries with the given key, which is either 0 or 1.
    pub fn count<Q: ?Sized>(&self, key: &Q) -> usize where C: Compare<Q, K> {
        if self.contains_key(key) { 1 } else { 0 }
    }

    /// Returns a reference to the value associated with the given key, or `None` if the map
    /// does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        self.tree.value(self.tree.find(key)).map(|e| &e.1)
    }

    /// Returns a mutable reference to the value associated with the given key, or `None` if
    /// the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    /// map.insert(1, "a");
    ///
    /// *map.get_mut(&1).unwrap() = "b";
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        let node = self.tree.find(key);
        self.tree.value_mut(node).map(|e| &mut e.1)
    }

    /// Returns a cursor resting on the entry with the given key, or on the end position if the
    /// map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: tree::Map<_, _> = vec![(1, "a"), (2, "b")].into_iter().collect();
    ///
    /// assert_eq!(map.find(&2).get(), Some(&(2, "b")));
    /// assert_eq!(map.find(&3), map.end());
    /// ```
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Cursor<'_, (K, V)> where C: Compare<Q, K> {
        self.tree.cursor(self.tree.find(key))
    }

    /// Returns a cursor resting on the first entry whose key is not less than the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: tree::Map<_, _> = vec![(1, "a"), (3, "c")].into_iter().collect();
    ///
    /// assert_eq!(map.lower_bound(&1).get(), Some(&(1, "a")));
    /// assert_eq!(map.lower_bound(&2).get(), Some(&(3, "c")));
    /// assert!(map.lower_bound(&4).is_end());
    /// ```
    pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Cursor<'_, (K, V)> where C: Compare<Q, K> {
        self.tree.cursor(self.tree.lower_bound(key))
    }

    /// Returns a cursor resting on the first entry whose key is greater than the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: tree::Map<_, _> = vec![(1, "a"), (3, "c")].into_iter().collect();
    ///
    /// assert_eq!(map.upper_bound(&1).get(), Some(&(3, "c")));
    /// assert!(map.upper_bound(&3).is_end());
    /// ```
    pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Cursor<'_, (K, V)> where C: Compare<Q, K> {
        self.tree.cursor(self.tree.upper_bound(key))
    }

    /// Returns the pair `(lower_bound(key), upper_bound(key))`, which delimits the entries with
    /// the given key.
    pub fn equal_range<Q: ?Sized>(&self, key: &Q) -> (Cursor<'_, (K, V)>, Cursor<'_, (K, V)>)
        where C: Compare<Q, K> {

        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns a cursor resting on the minimum entry, or on the end position if the map is
    /// empty.
    pub fn begin(&self) -> Cursor<'_, (K, V)> { self.tree.cursor(self.tree.first()) }

    /// Returns a cursor resting on the end position.
    pub fn end(&self) -> Cursor<'_, (K, V)> { self.tree.cursor(NIL) }

    /// Returns a reverse cursor resting on the maximum entry.
    pub fn rbegin(&self) -> RevCursor<'_, (K, V)> { RevCursor::new(self.end()) }

    /// Returns a reverse cursor resting past the minimum entry.
    pub fn rend(&self) -> RevCursor<'_, (K, V)> { RevCursor::new(self.begin()) }

    /// Returns a cursor resting on the given position.
    ///
    /// # Panics
    ///
    /// May panic if `pos` was invalidated.
    pub fn cursor(&self, pos: Position) -> Cursor<'_, (K, V)> {
        assert!(pos.is_end() || self.tree.is_live(pos.0), "invalid position");
        self.tree.cursor(pos.0)
    }

    /// Returns a reference to the maximum key and its value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    /// assert_eq!(map.last(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.last(), Some((&3, &"c")));
    /// ```
    pub fn last(&self) -> Option<(&K, &V)> { self.tree.value(self.tree.last()).map(pair) }

    /// Removes and returns the entry with the maximum key, or `None` if the map is empty.
    pub fn pop_last(&mut self) -> Option<(K, V)> { self.tree.pop_last() }

    /// Returns a reference to the maximum key and a mutable reference to its value, or `None`
    /// if the map is empty.
    pub fn last_mut(&mut self) -> Option<(&K, &mut V)> {
        let last = self.tree.last();
        self.tree.value_mut(last).map(pair_mut)
    }

    /// Returns the entry with the maximum key, or `None` if the map is empty.
    pub fn last_entry(&mut self) -> Option<OccupiedEntry<'_, K, V, C>> {
        let node = self.tree.last();
        if node == NIL { None } else { Some(OccupiedEntry { tree: &mut self.tree, node: node }) }
    }

    /// Returns a reference to the minimum key and its value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    /// assert_eq!(map.first(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.first(), Some((&1, &"a")));
    /// ```
    pub fn first(&self) -> Option<(&K, &V)> { self.tree.value(self.tree.first()).map(pair) }

    /// Removes and returns the entry with the minimum key, or `None` if the map is empty.
    pub fn pop_first(&mut self) -> Option<(K, V)> { self.tree.pop_first() }

    /// Returns a reference to the minimum key and a mutable reference to its value, or `None`
    /// if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: tree::Map<_, _> = vec![(1, 10), (2, 20)].into_iter().collect();
    ///
    /// *map.first_mut().unwrap().1 += 5;
    /// assert_eq!(map.get(&1), Some(&15));
    ///
    /// let entry = map.first_entry().unwrap();
    /// assert_eq!(entry.remove(), (1, 15));
    /// assert_eq!(map.last_entry().map(|e| *e.get()), Some(20));
    /// ```
    pub fn first_mut(&mut self) -> Option<(&K, &mut V)> {
        let first = self.tree.first();
        self.tree.value_mut(first).map(pair_mut)
    }

    /// Returns the entry with the minimum key, or `None` if the map is empty.
    pub fn first_entry(&mut self) -> Option<OccupiedEntry<'_, K, V, C>> {
        let node = self.tree.first();
        if node == NIL { None } else { Some(OccupiedEntry { tree: &mut self.tree, node: node }) }
    }

    /// Returns a reference to the predecessor of the given key and its value, or `None` if no
    /// such key is present in the map.
    ///
    /// If `inclusive` is `false`, this method finds the greatest key that is strictly less than
    /// the given key. If `inclusive` is `true`, this method finds the greatest key that is less
    /// than or equal to the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: tree::Map<_, _> = vec![(10, 'x'), (20, 'y'), (30, 'z')].into_iter().collect();
    ///
    /// assert_eq!(map.pred(&10, false), None);
    /// assert_eq!(map.pred(&25, false), Some((&20, &'y')));
    /// assert_eq!(map.pred(&30, false), Some((&20, &'y')));
    /// assert_eq!(map.pred(&30, true), Some((&30, &'z')));
    /// assert_eq!(map.pred(&99, true), Some((&30, &'z')));
    /// ```
    pub fn pred<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
        where C: Compare<Q, K> {

        self.tree.value(self.tree.pred(key, inclusive)).map(pair)
    }

    /// Returns a reference to the successor of the given key and its value, or `None` if no
    /// such key is present in the map.
    ///
    /// If `inclusive` is `false`, this method finds the smallest key that is strictly greater
    /// than the given key. If `inclusive` is `true`, this method finds the smallest key that is
    /// greater than or equal to the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: tree::Map<_, _> = vec![(10, 'x'), (20, 'y'), (30, 'z')].into_iter().collect();
    ///
    /// assert_eq!(map.succ(&5, false), Some((&10, &'x')));
    /// assert_eq!(map.succ(&10, false), Some((&20, &'y')));
    /// assert_eq!(map.succ(&10, true), Some((&10, &'x')));
    /// assert_eq!(map.succ(&30, false), None);
    /// ```
    pub fn succ<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
        where C: Compare<Q, K> {

        self.tree.value(self.tree.succ(key, inclusive)).map(pair)
    }

    /// Returns an iterator that consumes the map.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.into_iter();
    /// assert_eq!(it.next(), Some((1, "a")));
    /// assert_eq!(it.next(), Some((2, "b")));
    /// assert_eq!(it.next(), Some((3, "c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn into_iter(self) -> IntoIter<K, V> { IntoIter(self.tree.into_iter()) }

    /// Returns an iterator over the map's entries with immutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next_back(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> { Iter(self.tree.iter()) }

    /// Returns an iterator over the map's entries with mutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = tree::Map::new();
    ///
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    ///
    /// let mut i = 1;
    ///
    /// for (_, value) in map.iter_mut() {
    ///     assert_eq!(i, *value);
    ///     *value *= 2;
    ///     i += 1;
    /// }
    ///
    /// assert_eq!(map[&"a"], 2);
    /// assert_eq!(map[&"b"], 4);
    /// assert_eq!(map[&"c"], 6);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> { IterMut(self.tree.iter_mut()) }

    /// Returns an iterator over the map's entries whose keys lie in the given range with
    /// immutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    /// A range whose lower end lies above its upper end is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Excluded, Included, Unbounded};
    ///
    /// let map: tree::Map<_, _> = (0..10).map(|i| (i, i * 2)).collect();
    ///
    /// let keys = |min, max| map.range(min, max).map(|(k, _)| *k).collect::<Vec<_>>();
    ///
    /// assert_eq!(keys(Included(&3), Excluded(&6)), [3, 4, 5]);
    /// assert_eq!(keys(Excluded(&7), Unbounded), [8, 9]);
    /// assert_eq!(keys(Unbounded, Included(&1)), [0, 1]);
    /// assert!(keys(Included(&6), Included(&2)).is_empty());
    /// ```
    pub fn range<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> Range<'_, K, V> where C: Compare<Min, K> + Compare<Max, K> {

        let (front, back) = self.interval(min, max);
        Range(self.tree.range(front, back))
    }

    /// Returns an iterator over the map's entries whose keys lie in the given range with
    /// mutable references to the values.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Included, Unbounded};
    ///
    /// let mut map: tree::Map<_, _> = (0..5).map(|i| (i, 0)).collect();
    ///
    /// for (_, value) in map.range_mut(Included(&3), Unbounded::<&i32>) { *value = 1; }
    /// assert_eq!(map.iter().map(|(_, v)| *v).collect::<Vec<_>>(), [0, 0, 0, 1, 1]);
    /// ```
    pub fn range_mut<Min: ?Sized, Max: ?Sized>(&mut self, min: Bound<&Min>, max: Bound<&Max>)
        -> RangeMut<'_, K, V> where C: Compare<Min, K> + Compare<Max, K> {

        let (front, back) = self.interval(min, max);
        RangeMut(self.tree.range_mut(front, back))
    }

    /// Resolves a pair of bounds to a half-open node interval, which is empty when the lower
    /// end lies above the upper end.
    fn interval<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> (usize, usize) where C: Compare<Min, K> + Compare<Max, K> {

        let front = match min {
            Bound::Included(key) => self.tree.lower_bound(key),
            Bound::Excluded(key) => self.tree.upper_bound(key),
            Bound::Unbounded => self.tree.first(),
        };

        let back = match max {
            Bound::Included(key) => self.tree.upper_bound(key),
            Bound::Excluded(key) => self.tree.lower_bound(key),
            Bound::Unbounded => NIL,
        };

        if self.tree.is_ordered_interval(front, back) { (front, back) } else { (NIL, NIL) }
    }
}

impl<K, V, C> Debug for Map<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Default for Map<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { Map::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for Map<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C> iter::FromIterator<(K, V)> for Map<K, V, C> where C: Compare<K> + Default {
    fn from_iter<I: IntoIterator<Item=(K, V)>>(it: I) -> Self {
        let mut map: Self = Default::default();
        map.extend(it);
        map
    }
}

impl<K, V, C> Hash for Map<K, V, C> where K: Hash, V: Hash, C: Compare<K> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        self.len().hash(h);
        for e in self.iter() { e.hash(h); }
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for Map<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;
    fn index(&self, key: &Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V, C> IntoIterator for &'a Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V, C> IntoIterator for Map<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { self.into_iter() }
}

impl<K, V, C> PartialEq for Map<K, V, C> where V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(l, r)| {
            self.cmp().compares_eq(l.0, r.0) && l.1 == r.1
        })
    }
}

impl<K, V, C> Eq for Map<K, V, C> where V: Eq, C: Compare<K> {}

impl<K, V, C> PartialOrd for Map<K, V, C> where V: PartialOrd, C: Compare<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Some(Equal),
                (None, Some(_)) => return Some(Less),
                (Some(_), None) => return Some(Greater),
                (Some(l), Some(r)) => match self.cmp().compare(l.0, r.0) {
                    Equal => match l.1.partial_cmp(r.1) {
                        Some(Equal) => {}
                        non_eq => return non_eq,
                    },
                    non_eq => return Some(non_eq),
                },
            }
        }
    }
}

impl<K, V, C> Ord for Map<K, V, C> where V: Ord, C: Compare<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Equal,
                (None, Some(_)) => return Less,
                (Some(_), None) => return Greater,
                (Some(l), Some(r)) => match self.cmp().compare(l.0, r.0) {
                    Equal => match l.1.cmp(r.1) {
                        Equal => {}
                        non_eq => return non_eq,
                    },
                    non_eq => return non_eq,
                },
            }
        }
    }
}

/// An iterator that consumes the map.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`Map::into_iter`](struct.Map.html#method.into_iter) or the
/// `IntoIterator` trait:
///
/// ```
/// let mut map = tree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
#[derive(Clone)]
pub struct IntoIter<K, V>(node::IntoIter<(K, V)>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An iterator over the map's entries with immutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`Map::iter`](struct.Map.html#method.iter) or the `IntoIterator` trait:
///
/// ```
/// let mut map = tree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in &map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct Iter<'a, K: 'a, V: 'a>(node::Iter<'a, (K, V)>);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> { Iter(self.0.clone()) }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next().map(pair) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back().map(pair) }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An iterator over the map's entries with mutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`Map::iter_mut`](struct.Map.html#method.iter_mut) or the
/// `IntoIterator` trait:
///
/// ```
/// let mut map = tree::Map::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// for (key, value) in &mut map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct IterMut<'a, K: 'a, V: 'a>(node::IterMut<'a, (K, V)>);

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next().map(pair_mut) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next_back().map(pair_mut) }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// An iterator over the map's entries whose keys lie in a given range with immutable references
/// to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// Acquire through [`Map::range`](struct.Map.html#method.range).
pub struct Range<'a, K: 'a, V: 'a>(node::Range<'a, (K, V)>);

impl<'a, K, V> Clone for Range<'a, K, V> {
    fn clone(&self) -> Range<'a, K, V> { Range(self.0.clone()) }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next().map(pair) }
}

impl<'a, K, V> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back().map(pair) }
}

impl<'a, K, V> FusedIterator for Range<'a, K, V> {}

/// An iterator over the map's entries whose keys lie in a given range with mutable references
/// to the values.
///
/// Acquire through [`Map::range_mut`](struct.Map.html#method.range_mut).
pub struct RangeMut<'a, K: 'a, V: 'a>(node::RangeMut<'a, (K, V)>);

impl<'a, K, V> Iterator for RangeMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next().map(pair_mut) }
}

impl<'a, K, V> DoubleEndedIterator for RangeMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next_back().map(pair_mut) }
}

impl<'a, K, V> FusedIterator for RangeMut<'a, K, V> {}

/// An entry in the map.
///
/// See [`Map::entry`](struct.Map.html#method.entry) for an example.
pub enum Entry<'a, K: 'a, V: 'a, C: 'a> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, C>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, C>),
}

impl<'a, K, V, C> Entry<'a, K, V, C> {
    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K {
        match *self {
            Entry::Occupied(ref e) => e.key(),
            Entry::Vacant(ref e) => e.key(),
        }
    }

    /// Returns a mutable reference to the entry's value, inserting the given default value
    /// into the map if the entry is vacant.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(default),
        }
    }

    /// Returns a mutable reference to the entry's value, inserting the result of calling the
    /// given function into the map if the entry is vacant.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V where F: FnOnce() -> V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(default()),
        }
    }

    /// Returns a mutable reference to the entry's value, inserting `V::default()` into the map
    /// if the entry is vacant.
    pub fn or_default(self) -> &'a mut V where V: Default {
        self.or_insert_with(V::default)
    }
}

/// An occupied entry.
///
/// See [`Map::entry`](struct.Map.html#method.entry) for an example.
pub struct OccupiedEntry<'a, K: 'a, V: 'a, C: 'a> {
    tree: &'a mut Tree<(K, V), First, C>,
    node: usize,
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> {
    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K { &self.tree.live(self.node).0 }

    /// Returns a reference to the entry's value.
    pub fn get(&self) -> &V { &self.tree.live(self.node).1 }

    /// Returns a mutable reference to the entry's value.
    pub fn get_mut(&mut self) -> &mut V { &mut self.tree.live_mut(self.node).1 }

    /// Returns a mutable reference to the entry's value with the same lifetime as the map.
    pub fn into_mut(self) -> &'a mut V { &mut self.tree.live_mut(self.node).1 }

    /// Replaces the entry's value with the given one, returning the old one.
    pub fn insert(&mut self, value: V) -> V { mem::replace(self.get_mut(), value) }

    /// Returns the entry's position.
    pub fn position(&self) -> Position { Position(self.node) }

    /// Removes the entry from the map and returns its key and value.
    pub fn remove(self) -> (K, V) { self.tree.erase_at(self.node).0 }
}

/// A vacant entry.
///
/// See [`Map::entry`](struct.Map.html#method.entry) for an example.
pub struct VacantEntry<'a, K: 'a, V: 'a, C: 'a> {
    tree: &'a mut Tree<(K, V), First, C>,
    slot: Slot,
    key: K,
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C> {
    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K { &self.key }

    /// Returns the entry's key, leaving the map untouched.
    pub fn into_key(self) -> K { self.key }

    /// Inserts the entry into the map with the given value, returning a mutable reference to
    /// the value with the same lifetime as the map.
    pub fn insert(self, value: V) -> &'a mut V {
        let node = error::unwrap_or_abort(self.tree.link(self.slot, (self.key, value)));
        &mut self.tree.live_mut(node).1
    }
}
