use thiserror::Error;

/// Errors reported by the strict operations of an [`IndexedMap`](crate::IndexedMap).
///
/// The lenient operations report the same conditions as `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A position outside `[0, len)` was addressed.
    #[error("index {index} is out of bounds for a map of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The key is not present in the map.
    #[error("key not found")]
    KeyNotFound,

    /// The key is already present at `index`; positions are never duplicated.
    #[error("key is already present at index {index}")]
    DuplicateKey { index: usize },
}
