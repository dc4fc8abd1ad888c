//! Ordered associative containers based on a red-black tree, a contiguous growable array and a
//! stack adapter.
//!
//! `Map` and `Set` share one tree engine. Their nodes live in an index arena whose slot 0 is a
//! sentinel that doubles as the end position, so cursors can step in both directions from any
//! element in amortized constant time and wrap around at the end. Inserting or removing an
//! element never moves the others, which keeps `Position` handles valid across unrelated
//! mutations.
//!
//! # Examples
//!
//! ```
//! let mut map = tree::Map::new();
//!
//! for (i, word) in "the quick brown fox".split(' ').enumerate() {
//!     map.insert(word, i);
//! }
//!
//! assert_eq!(map.first(), Some((&"brown", &2)));
//! assert_eq!(map.lower_bound(&"p").get(), Some(&("quick", 1)));
//!
//! let mut stack = tree::Stack::new();
//! for (word, _) in &map { stack.push(*word); }
//! assert_eq!(stack.pop(), Some("the"));
//! ```

mod balance;
mod error;
mod key;
mod node;
pub mod map;
pub mod set;
pub mod stack;
pub mod vector;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use error::Error;
pub use key::{First, Identity, KeyOf};
pub use map::Map;
pub use node::{Cursor, Position, RevCursor};
pub use set::Set;
pub use stack::{BackSequence, Stack};
pub use vector::Vector;
