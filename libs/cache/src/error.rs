//! Cache error types.

use std::sync::Arc;

/// The cache result type.
pub type Result<T> = std::result::Result<T, Error>;

/// A result type whose error is reference counted, so that a single failure
/// can be observed by every handle to the same cache entry.
pub type ArcResult<T> = std::result::Result<T, Arc<Error>>;

/// A cache error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The generator for a cache entry panicked.
    #[error("generator panicked")]
    Panic,
    /// A key could not be serialized for content hashing.
    #[error(transparent)]
    Serialization(#[from] flexbuffers::SerializationError),
}
