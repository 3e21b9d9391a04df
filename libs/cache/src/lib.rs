//! An in-memory, single-flight cache for generated values.
//!
//! Values are generated at most once per key: concurrent requests for the
//! same key during an in-flight generation all observe the single completed
//! result, and never trigger a second generation.
#![warn(missing_docs)]

use std::any::Any;
use std::hash::Hash;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use sha2::{Digest, Sha256};

use error::{ArcResult, Error};

pub mod error;
pub mod mem;

/// A cacheable object.
///
/// # Examples
///
/// ```
/// use cache::Cacheable;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Deserialize, Serialize, Hash, Eq, PartialEq)]
/// pub struct Params {
///     param1: u64,
///     param2: String,
/// };
///
/// impl Cacheable for Params {
///     type Output = u64;
///     type Error = anyhow::Error;
///
///     fn generate(&self) -> anyhow::Result<u64> {
///         if self.param1 == 5 {
///             anyhow::bail!("invalid param");
///         }
///         Ok(2 * self.param1)
///     }
/// }
/// ```
pub trait Cacheable: Hash + Eq + Send + Sync + Any {
    /// The output produced by generating the object.
    type Output: Send + Sync;
    /// The error type returned by [`Cacheable::generate`].
    type Error: Send + Sync;

    /// Generates the output of the cacheable object.
    fn generate(&self) -> std::result::Result<Self::Output, Self::Error>;
}

impl<T: Cacheable> Cacheable for Arc<T> {
    type Output = T::Output;
    type Error = T::Error;

    fn generate(&self) -> std::result::Result<Self::Output, Self::Error> {
        <T as Cacheable>::generate(self)
    }
}

/// A handle to a cache entry that might still be generating.
#[derive(Debug)]
pub struct CacheHandle<V>(pub(crate) Arc<OnceCell<ArcResult<V>>>);

impl<V> Default for CacheHandle<V> {
    fn default() -> Self {
        Self(Arc::new(OnceCell::new()))
    }
}

impl<V> Clone for CacheHandle<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V> CacheHandle<V> {
    pub(crate) fn set(&self, value: ArcResult<V>) {
        if self.0.set(value).is_err() {
            tracing::error!("failed to set cache handle value");
            panic!("failed to set cache handle value");
        }
    }

    /// Blocks on the cache entry, returning the result once it is ready.
    ///
    /// Returns an error if the generator panicked.
    pub fn try_get(&self) -> ArcResult<&V> {
        self.0.wait().as_ref().map_err(|e| e.clone())
    }

    /// Checks whether the underlying entry is ready.
    ///
    /// Returns the entry if available, otherwise returns [`None`].
    pub fn poll(&self) -> Option<ArcResult<&V>> {
        Some(self.0.get()?.as_ref().map_err(|e| e.clone()))
    }

    /// Blocks on the cache entry, returning its value.
    ///
    /// # Panics
    ///
    /// Panics if the generator panicked.
    pub fn get(&self) -> &V {
        self.try_get().expect("generator failed")
    }

    /// Blocks on the cache entry, returning the error thrown during
    /// generation.
    ///
    /// # Panics
    ///
    /// Panics if no error was thrown.
    pub fn get_err(&self) -> Arc<Error> {
        self.0.wait().as_ref().err().cloned().expect("no error found")
    }
}

impl<V, E> CacheHandle<std::result::Result<V, E>> {
    /// Blocks on the cache entry, returning the inner value.
    ///
    /// # Panics
    ///
    /// Panics if the generator panicked or returned an error.
    pub fn unwrap_inner(&self) -> &V {
        self.get().as_ref().ok().expect("generator returned error")
    }

    /// Blocks on the cache entry, returning the inner error.
    ///
    /// # Panics
    ///
    /// Panics if the generator panicked or returned a value.
    pub fn unwrap_err_inner(&self) -> &E {
        self.get().as_ref().err().expect("generator returned value")
    }
}

/// Hashes the canonical serialization of `key`.
///
/// The serialization is field-order-sensitive, so two keys hash identically
/// iff their serialized records are identical.
pub fn content_hash<K: Serialize>(key: &K) -> error::Result<String> {
    let bytes = flexbuffers::to_vec(key)?;
    Ok(hash(&bytes))
}

pub(crate) fn hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
