//! A last-in, first-out adapter over a sequence container.

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::marker::PhantomData;
use super::vector::Vector;

/// A sequence that can be grown, shrunk and inspected at its back.
pub trait BackSequence {
    /// The element type.
    type Item;

    fn push_back(&mut self, item: Self::Item);
    fn pop_back(&mut self) -> Option<Self::Item>;
    fn back(&self) -> Option<&Self::Item>;
    fn back_mut(&mut self) -> Option<&mut Self::Item>;
    fn len(&self) -> usize;
}

impl<T> BackSequence for Vector<T> {
    type Item = T;

    fn push_back(&mut self, item: T) { Vector::push_back(self, item) }
    fn pop_back(&mut self) -> Option<T> { Vector::pop_back(self) }
    fn back(&self) -> Option<&T> { Vector::back(self) }
    fn back_mut(&mut self) -> Option<&mut T> { Vector::back_mut(self) }
    fn len(&self) -> usize { Vector::len(self) }
}

impl<T> BackSequence for Vec<T> {
    type Item = T;

    fn push_back(&mut self, item: T) { self.push(item) }
    fn pop_back(&mut self) -> Option<T> { self.pop() }
    fn back(&self) -> Option<&T> { self.last() }
    fn back_mut(&mut self) -> Option<&mut T> { self.last_mut() }
    fn len(&self) -> usize { Vec::len(self) }
}

/// A stack that stores its elements in an underlying `BackSequence`.
///
/// # Examples
///
/// ```
/// let mut stack = tree::Stack::new();
///
/// stack.push(1);
/// stack.push(2);
/// stack.push(3);
/// assert_eq!(stack.top(), Some(&3));
///
/// stack.pop();
/// assert_eq!(stack.top(), Some(&2));
/// assert_eq!(stack.len(), 2);
/// ```
pub struct Stack<T, S = Vector<T>> where S: BackSequence<Item=T> {
    seq: S,
    _item: PhantomData<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack over a `Vector`.
    pub fn new() -> Self { Stack::from_sequence(Vector::new()) }
}

impl<T, S> Stack<T, S> where S: BackSequence<Item=T> {
    /// Creates a stack whose top is the back of the given sequence.
    pub fn from_sequence(seq: S) -> Self { Stack { seq: seq, _item: PhantomData } }

    pub fn push(&mut self, item: T) { self.seq.push_back(item); }

    /// Removes and returns the top element, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> { self.seq.pop_back() }

    pub fn top(&self) -> Option<&T> { self.seq.back() }

    pub fn top_mut(&mut self) -> Option<&mut T> { self.seq.back_mut() }

    pub fn len(&self) -> usize { self.seq.len() }

    pub fn is_empty(&self) -> bool { self.seq.len() == 0 }

    pub fn as_inner(&self) -> &S { &self.seq }

    /// Returns the underlying sequence.
    pub fn into_inner(self) -> S { self.seq }
}

impl<T, S> Clone for Stack<T, S> where S: BackSequence<Item=T> + Clone {
    fn clone(&self) -> Self { Stack::from_sequence(self.seq.clone()) }
}

impl<T, S> Debug for Stack<T, S> where S: BackSequence<Item=T> + Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Stack").field(&self.seq).finish()
    }
}

impl<T, S> Default for Stack<T, S> where S: BackSequence<Item=T> + Default {
    fn default() -> Self { Stack::from_sequence(S::default()) }
}

impl<T, S> Hash for Stack<T, S> where S: BackSequence<Item=T> + Hash {
    fn hash<H: hash::Hasher>(&self, h: &mut H) { self.seq.hash(h); }
}

impl<T, S> PartialEq for Stack<T, S> where S: BackSequence<Item=T> + PartialEq {
    fn eq(&self, other: &Self) -> bool { self.seq == other.seq }
}

impl<T, S> Eq for Stack<T, S> where S: BackSequence<Item=T> + Eq {}

impl<T, S> PartialOrd for Stack<T, S> where S: BackSequence<Item=T> + PartialOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { self.seq.partial_cmp(&other.seq) }
}

impl<T, S> Ord for Stack<T, S> where S: BackSequence<Item=T> + Ord {
    fn cmp(&self, other: &Self) -> Ordering { self.seq.cmp(&other.seq) }
}
