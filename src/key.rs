//! Key extraction policies.
//!
//! The tree engine stores whole values and orders them by a key borrowed out of each value. A
//! `Set` uses the value itself as its key; a `Map` stores `(K, V)` pairs and orders them by `K`.

/// Borrows the ordering key out of a stored value.
pub trait KeyOf<T> {
    /// The key type.
    type Key;

    /// Returns a reference to the value's key.
    fn key_of(value: &T) -> &Self::Key;
}

/// Orders values by themselves.
#[derive(Clone, Copy, Debug)]
pub enum Identity {}

impl<T> KeyOf<T> for Identity {
    type Key = T;
    fn key_of(value: &T) -> &T { value }
}

/// Orders pairs by their first component.
#[derive(Clone, Copy, Debug)]
pub enum First {}

impl<K, V> KeyOf<(K, V)> for First {
    type Key = K;
    fn key_of(value: &(K, V)) -> &K { &value.0 }
}
