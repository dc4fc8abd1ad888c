use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;
use super::super::error::Error;

/// An owned buffer of `cap` uninitialized slots for `T`.
///
/// The buffer never reads, writes or drops elements; it only allocates and frees the storage.
/// Zero-sized types and zero capacities never touch the allocator.
pub struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T> Send for RawBuf<T> where T: Send {}
unsafe impl<T> Sync for RawBuf<T> where T: Sync {}

impl<T> RawBuf<T> {
    /// Returns an unallocated buffer. A buffer of a zero-sized type is never allocated and
    /// always has a capacity of `max_len()`.
    pub fn new() -> Self {
        let cap = if mem::size_of::<T>() == 0 { Self::max_len() } else { 0 };
        RawBuf { ptr: NonNull::dangling(), cap: cap, _marker: PhantomData }
    }

    /// The largest number of elements a buffer of `T` can hold.
    pub fn max_len() -> usize { isize::MAX as usize / mem::size_of::<T>().max(1) }

    fn overflow(cap: usize) -> Error {
        Error::CapacityOverflow { requested: cap, max: Self::max_len() }
    }

    fn layout(cap: usize) -> Result<Layout, Error> {
        if cap > Self::max_len() { return Err(Self::overflow(cap)); }
        Layout::array::<T>(cap).map_err(|_| Self::overflow(cap))
    }

    /// Allocates a buffer with room for exactly `cap` elements.
    pub fn with_capacity(cap: usize) -> Result<Self, Error> {
        if cap > Self::max_len() { return Err(Self::overflow(cap)); }
        if cap == 0 || mem::size_of::<T>() == 0 { return Ok(RawBuf::new()); }

        let layout = Self::layout(cap)?;
        let ptr = unsafe { alloc::alloc(layout) } as *mut T;

        match NonNull::new(ptr) {
            Some(ptr) => Ok(RawBuf { ptr: ptr, cap: cap, _marker: PhantomData }),
            None => Err(Error::Alloc { layout: layout }),
        }
    }

    pub fn ptr(&self) -> *mut T { self.ptr.as_ptr() }

    pub fn cap(&self) -> usize { self.cap }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap == 0 || mem::size_of::<T>() == 0 { return; }

        if let Ok(layout) = Self::layout(self.cap) {
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout); }
        }
    }
}

#[cfg(test)]
mod test {
    use super::RawBuf;
    use super::super::super::error::Error;

    #[test]
    fn test_exact_capacity() {
        let buf = RawBuf::<u64>::with_capacity(7).unwrap();
        assert_eq!(buf.cap(), 7);
        assert_eq!(RawBuf::<u64>::new().cap(), 0);
    }

    #[test]
    fn test_zero_sized() {
        let max = RawBuf::<()>::max_len();

        assert_eq!(max, isize::MAX as usize);
        assert_eq!(RawBuf::<()>::new().cap(), max);
        assert_eq!(RawBuf::<()>::with_capacity(10).unwrap().cap(), max);
        assert!(RawBuf::<()>::with_capacity(max + 1).is_err());
    }

    #[test]
    fn test_overflow() {
        let max = RawBuf::<u32>::max_len();

        match RawBuf::<u32>::with_capacity(max + 1) {
            Err(Error::CapacityOverflow { requested, max: m }) => {
                assert_eq!(requested, max + 1);
                assert_eq!(m, max);
            }
            _ => panic!("expected capacity overflow"),
        }
    }
}
