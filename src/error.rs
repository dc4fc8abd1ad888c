//! Errors signalled by the containers.

use std::alloc::Layout;
use std::error;
use std::fmt;

/// An error returned by a fallible container operation.
///
/// Lookups that simply find nothing (`find`, `remove`, `get`) report that through their return
/// value instead; this type is reserved for conditions the caller must handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A checked access named an index at or past the end of the container.
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The container's length at the time of the access.
        len: usize,
    },
    /// The requested capacity cannot be represented.
    CapacityOverflow {
        /// The capacity that was asked for.
        requested: usize,
        /// The largest capacity the container supports for its element type.
        max: usize,
    },
    /// The global allocator failed to provide memory for the given layout.
    Alloc {
        /// The layout of the failed request.
        layout: Layout,
    },
    /// A checked map lookup did not find its key.
    KeyNotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::OutOfRange { index, len } =>
                write!(f, "index {} out of range for length {}", index, len),
            Error::CapacityOverflow { requested, max } =>
                write!(f, "capacity {} exceeds maximum of {}", requested, max),
            Error::Alloc { layout } =>
                write!(f, "memory allocation of {} bytes failed", layout.size()),
            Error::KeyNotFound => write!(f, "key not found"),
        }
    }
}

impl error::Error for Error {}

/// Turns an error from an infallible wrapper into the matching panic or abort.
///
/// Allocation failures go through `handle_alloc_error`, like the standard collections.
pub(crate) fn unwrap_or_abort<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(t) => t,
        Err(Error::Alloc { layout }) => std::alloc::handle_alloc_error(layout),
        Err(err) => panic!("{}", err),
    }
}

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn display() {
        assert_eq!(Error::OutOfRange { index: 4, len: 2 }.to_string(),
                   "index 4 out of range for length 2");
        assert_eq!(Error::CapacityOverflow { requested: 10, max: 5 }.to_string(),
                   "capacity 10 exceeds maximum of 5");
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
    }
}
