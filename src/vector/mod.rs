//! A contiguous growable array.
//!
//! The first allocation is sized exactly to what was asked for. Later growth at least doubles
//! the capacity, so pushes run in amortized constant time. Insertions that need more room move
//! the prefix, the new elements and the suffix into the fresh buffer in a single pass instead of
//! growing first and shifting afterwards.

mod raw;

use log::trace;
use std::cmp::{self, Ordering};
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter::{self, FusedIterator};
use std::mem::{self, ManuallyDrop};
use std::ops::{self, Deref, DerefMut};
use std::ptr;
use std::slice;
use self::raw::RawBuf;
use super::error::{self, Error};

/// A contiguous growable array.
///
/// `Vector` dereferences to a slice, so slice methods, indexing and borrowed iteration are all
/// available directly.
///
/// # Examples
///
/// ```
/// let mut v = tree::Vector::from_elem(4, 3);
/// assert_eq!(v.capacity(), 3);
///
/// v.push_back(3);
/// v.insert(1, 12);
/// v.insert(0, 21);
///
/// assert_eq!(*v, [21, 4, 12, 4, 4, 3]);
/// assert_eq!(v.capacity(), 6);
/// ```
pub struct Vector<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> Vector<T> {
    /// Creates an empty vector without allocating.
    pub fn new() -> Self { Vector { buf: RawBuf::new(), len: 0 } }

    /// Creates an empty vector with room for exactly `cap` elements.
    ///
    /// # Panics
    ///
    /// Panics if `cap` exceeds `max_len()`.
    pub fn with_capacity(cap: usize) -> Self {
        error::unwrap_or_abort(Vector::try_with_capacity(cap))
    }

    /// Like `with_capacity`, but returns an error instead of panicking or aborting.
    pub fn try_with_capacity(cap: usize) -> Result<Self, Error> {
        Ok(Vector { buf: RawBuf::with_capacity(cap)?, len: 0 })
    }

    /// Creates a vector holding `n` clones of `value`, with a capacity of exactly `n`.
    pub fn from_elem(value: T, n: usize) -> Self where T: Clone {
        let mut v = Vector::with_capacity(n);
        v.insert_n(0, n, value);
        v
    }

    /// The largest number of elements a vector of `T` can hold.
    pub fn max_len() -> usize { RawBuf::<T>::max_len() }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the number of elements the vector can hold without reallocating.
    pub fn capacity(&self) -> usize { self.buf.cap() }

    pub fn as_slice(&self) -> &[T] { self }

    pub fn as_mut_slice(&mut self) -> &mut [T] { self }

    /// Returns a reference to the element at `index`, or `Error::OutOfRange`.
    ///
    /// # Examples
    ///
    /// ```
    /// let v: tree::Vector<_> = vec![1, 2].into_iter().collect();
    ///
    /// assert_eq!(v.at(1), Ok(&2));
    /// assert_eq!(v.at(2), Err(tree::Error::OutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.len;
        self.get(index).ok_or(Error::OutOfRange { index: index, len: len })
    }

    /// Returns a mutable reference to the element at `index`, or `Error::OutOfRange`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.get_mut(index).ok_or(Error::OutOfRange { index: index, len: len })
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T { &*self.buf.ptr().add(index) }

    pub fn front(&self) -> Option<&T> { self.first() }

    pub fn front_mut(&mut self) -> Option<&mut T> { self.first_mut() }

    pub fn back(&self) -> Option<&T> { self.last() }

    pub fn back_mut(&mut self) -> Option<&mut T> { self.last_mut() }

    /// Computes the capacity to grow to when `additional` more elements must fit.
    fn grown_capacity(&self, additional: usize) -> Result<usize, Error> {
        let max = Vector::<T>::max_len();

        let required = match self.len.checked_add(additional) {
            Some(required) if required <= max => required,
            _ => return Err(Error::CapacityOverflow {
                requested: self.len.saturating_add(additional),
                max: max,
            }),
        };

        let cap = self.capacity();
        if cap == 0 { return Ok(required); }
        Ok(cmp::min(cmp::max(required, cap.saturating_mul(2)), max))
    }

    /// Moves the elements into a fresh buffer of exactly `cap` slots.
    fn reallocate(&mut self, cap: usize) -> Result<(), Error> {
        let buf = RawBuf::with_capacity(cap)?;
        trace!("reallocating vector of {} elements from {} to {} slots",
               self.len, self.capacity(), buf.cap());

        unsafe { ptr::copy_nonoverlapping(self.buf.ptr(), buf.ptr(), self.len); }
        self.buf = buf;
        Ok(())
    }

    /// Makes room for `count` elements at `index` and returns a pointer to the first slot of
    /// the gap. The elements from `index` on are moved `count` slots up, into a fresh buffer if
    /// the current one is too small.
    ///
    /// On return the vector's length covers only the elements before the gap; the caller must
    /// fill the gap and then set the length to the old length plus `count`. Should filling
    /// panic, the elements after the gap are leaked, never dropped twice.
    fn open_gap(&mut self, index: usize, count: usize) -> Result<*mut T, Error> {
        let len = self.len;
        debug_assert!(index <= len);

        if count <= self.capacity() - len {
            unsafe {
                let at = self.buf.ptr().add(index);
                ptr::copy(at, at.add(count), len - index);
            }
        } else {
            let buf = RawBuf::with_capacity(self.grown_capacity(count)?)?;
            trace!("reallocating vector of {} elements from {} to {} slots around a gap of {}",
                   len, self.capacity(), buf.cap(), count);

            unsafe {
                ptr::copy_nonoverlapping(self.buf.ptr(), buf.ptr(), index);
                ptr::copy_nonoverlapping(self.buf.ptr().add(index), buf.ptr().add(index + count),
                                         len - index);
            }

            self.buf = buf;
        }

        self.len = index;
        Ok(unsafe { self.buf.ptr().add(index) })
    }

    /// Ensures the vector can hold at least `cap` elements in total. Never shrinks.
    ///
    /// # Panics
    ///
    /// Panics if `cap` exceeds `max_len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut v = tree::Vector::<u8>::new();
    ///
    /// v.reserve(0);
    /// assert_eq!(v.capacity(), 0);
    ///
    /// v.reserve(10);
    /// assert_eq!(v.capacity(), 10);
    ///
    /// v.reserve(5);
    /// assert_eq!(v.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, cap: usize) { error::unwrap_or_abort(self.try_reserve(cap)) }

    /// Like `reserve`, but returns an error instead of panicking or aborting.
    pub fn try_reserve(&mut self, cap: usize) -> Result<(), Error> {
        if cap <= self.capacity() { return Ok(()); }
        self.reallocate(cap)
    }

    /// Shrinks the capacity to the length.
    pub fn shrink_to_fit(&mut self) {
        if mem::size_of::<T>() != 0 && self.capacity() > self.len {
            let len = self.len;
            error::unwrap_or_abort(self.reallocate(len));
        }
    }

    /// Appends an element.
    ///
    /// # Panics
    ///
    /// Panics if the new length exceeds `max_len()`.
    pub fn push_back(&mut self, value: T) {
        error::unwrap_or_abort(self.try_push_back(value))
    }

    /// Like `push_back`, but returns an error instead of panicking or aborting. The value is
    /// dropped on error.
    pub fn try_push_back(&mut self, value: T) -> Result<(), Error> {
        if self.len == self.capacity() {
            let cap = self.grown_capacity(1)?;
            self.reallocate(cap)?;
        }

        unsafe { ptr::write(self.buf.ptr().add(self.len), value); }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element, or `None` if the vector is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 { return None; }
        self.len -= 1;
        Some(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
    }

    /// Inserts an element at `index`, shifting all elements after it up by one.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) {
        error::unwrap_or_abort(self.try_insert(index, value))
    }

    /// Like `insert`, but returns `Error::OutOfRange` if `index > len()` and never panics or
    /// aborts.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        let len = self.len;
        if index > len { return Err(Error::OutOfRange { index: index, len: len }); }

        let gap = self.open_gap(index, 1)?;
        unsafe { ptr::write(gap, value); }
        self.len = len + 1;
        Ok(())
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut v: tree::Vector<_> = vec![1, 2].into_iter().collect();
    /// v.insert_n(1, 3, 0);
    /// assert_eq!(*v, [1, 0, 0, 0, 2]);
    /// ```
    pub fn insert_n(&mut self, index: usize, count: usize, value: T) where T: Clone {
        let len = self.len;
        assert!(index <= len, "insertion index {} out of range for length {}", index, len);

        let gap = error::unwrap_or_abort(self.open_gap(index, count));

        if count > 0 {
            unsafe {
                for i in 0..count - 1 { ptr::write(gap.add(i), value.clone()); }
                ptr::write(gap.add(count - 1), value);
            }
        }

        self.len = len + count;
    }

    /// Inserts clones of the elements of `items` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_from_slice(&mut self, index: usize, items: &[T]) where T: Clone {
        let len = self.len;
        assert!(index <= len, "insertion index {} out of range for length {}", index, len);

        let gap = error::unwrap_or_abort(self.open_gap(index, items.len()));

        for (i, item) in items.iter().enumerate() {
            unsafe { ptr::write(gap.add(i), item.clone()); }
        }

        self.len = len + items.len();
    }

    /// Removes and returns the element at `index`, shifting all elements after it down by one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(index < len, "removal index {} out of range for length {}", index, len);

        unsafe {
            let at = self.buf.ptr().add(index);
            let value = ptr::read(at);
            ptr::copy(at.add(1), at, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Drops the elements in `range`, shifting the elements after it down.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or extends past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut v: tree::Vector<_> = (0..6).collect();
    /// v.erase_range(1..4);
    /// assert_eq!(*v, [0, 4, 5]);
    /// ```
    pub fn erase_range(&mut self, range: ops::Range<usize>) {
        let len = self.len;
        let ops::Range { start, end } = range;
        assert!(start <= end && end <= len, "range {}..{} out of range for length {}",
                start, end, len);

        unsafe {
            // a panicking destructor leaks the tail instead of exposing dropped slots
            self.len = start;
            let at = self.buf.ptr().add(start);
            ptr::drop_in_place(slice::from_raw_parts_mut(at, end - start));
            ptr::copy(at.add(end - start), at, len - end);
            self.len = len - (end - start);
        }
    }

    /// Drops the elements from `len` on. Has no effect if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len { return; }

        let tail = self.len - len;
        self.len = len;
        unsafe { ptr::drop_in_place(slice::from_raw_parts_mut(self.buf.ptr().add(len), tail)); }
    }

    /// Drops all elements, keeping the allocation.
    pub fn clear(&mut self) { self.truncate(0); }

    /// Resizes the vector to `len` elements, appending clones of `value` or truncating.
    pub fn resize(&mut self, len: usize, value: T) where T: Clone {
        if len > self.len {
            let at = self.len;
            self.insert_n(at, len - at, value);
        } else {
            self.truncate(len);
        }
    }

    /// Resizes the vector to `len` elements, appending the results of `f` or truncating.
    pub fn resize_with<F>(&mut self, len: usize, mut f: F) where F: FnMut() -> T {
        if len > self.len {
            self.reserve_for(len - self.len);
            while self.len < len { self.push_back(f()); }
        } else {
            self.truncate(len);
        }
    }

    /// Grows the buffer by the growth policy so that `additional` more elements fit.
    fn reserve_for(&mut self, additional: usize) {
        if additional > self.capacity() - self.len {
            let cap = error::unwrap_or_abort(self.grown_capacity(additional));
            error::unwrap_or_abort(self.reallocate(cap));
        }
    }

    /// Exchanges the contents of two vectors in constant time.
    pub fn swap(&mut self, other: &mut Self) { mem::swap(self, other); }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) { self.truncate(0); }
}

impl<T> Deref for Vector<T> {
    type Target = [T];
    fn deref(&self) -> &[T] { unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) } }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }
}

impl<T> Clone for Vector<T> where T: Clone {
    fn clone(&self) -> Self {
        let mut v = Vector::with_capacity(self.len);
        v.insert_from_slice(0, self);
        v
    }
}

impl<T> Debug for Vector<T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { Debug::fmt(&**self, f) }
}

impl<T> Default for Vector<T> {
    fn default() -> Self { Vector::new() }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item=T>>(&mut self, it: I) {
        let it = it.into_iter();
        self.reserve_for(it.size_hint().0);
        for item in it { self.push_back(item); }
    }
}

impl<'a, T> Extend<&'a T> for Vector<T> where T: 'a + Copy {
    fn extend<I: IntoIterator<Item=&'a T>>(&mut self, it: I) {
        self.extend(it.into_iter().cloned());
    }
}

impl<T> iter::FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item=T>>(it: I) -> Self {
        let mut v = Vector::new();
        v.extend(it);
        v
    }
}

impl<T> Hash for Vector<T> where T: Hash {
    fn hash<H: hash::Hasher>(&self, h: &mut H) { (**self).hash(h); }
}

impl<T> PartialEq for Vector<T> where T: PartialEq {
    fn eq(&self, other: &Self) -> bool { **self == **other }
}

impl<T> Eq for Vector<T> where T: Eq {}

impl<T> PartialOrd for Vector<T> where T: PartialOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { (**self).partial_cmp(&**other) }
}

impl<T> Ord for Vector<T> where T: Ord {
    fn cmp(&self, other: &Self) -> Ordering { (**self).cmp(&**other) }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> slice::Iter<'a, T> { self.iter() }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> slice::IterMut<'a, T> { self.iter_mut() }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let v = ManuallyDrop::new(self);
        let buf = unsafe { ptr::read(&v.buf) };
        IntoIter { buf: buf, front: 0, back: v.len }
    }
}

/// An iterator that consumes a `Vector`.
///
/// # Examples
///
/// ```
/// let v: tree::Vector<_> = vec!["a", "b", "c"].into_iter().collect();
///
/// let mut it = v.into_iter();
/// assert_eq!(it.next(), Some("a"));
/// assert_eq!(it.next_back(), Some("c"));
/// assert_eq!(it.len(), 1);
/// ```
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    front: usize,
    back: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back { return None; }
        self.front += 1;
        Some(unsafe { ptr::read(self.buf.ptr().add(self.front - 1)) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back { return None; }
        self.back -= 1;
        Some(unsafe { ptr::read(self.buf.ptr().add(self.back)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let rest = self.back - self.front;
        self.back = self.front;
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(self.buf.ptr().add(self.front), rest));
        }
    }
}
