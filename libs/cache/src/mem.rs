//! In-memory caching utilities.

use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::error::Error;
use crate::{CacheHandle, Cacheable};

/// An abstraction for generating values in the background and caching them
/// based on hashable keys in memory.
///
/// Each key owns a single once-settable cell: the first request for a key
/// spawns its generator, and every later or concurrent request for the same
/// key shares the same cell and thus the same generated value.
#[derive(Default, Debug, Clone)]
pub struct TypeCache {
    /// A map from key type to another map from key to value handle.
    ///
    /// Effectively, the type of this map is
    /// `TypeId::of::<K>() -> HashMap<Arc<K>, CacheHandle<V>>`.
    cells: HashMap<TypeId, Arc<Mutex<dyn Any + Send + Sync>>>,
}

impl TypeCache {
    /// Creates a new cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures that a value corresponding to `key` is generated, using
    /// `generate_fn` to generate it if it has not already been generated.
    ///
    /// Returns a handle to the value. If the value is not yet generated, it is
    /// generated in the background.
    ///
    /// # Panics
    ///
    /// Panics if a different type `V` is already associated with type `K`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cache::mem::TypeCache;
    ///
    /// let mut cache = TypeCache::new();
    ///
    /// fn generate_fn(tuple: &(u64, u64)) -> u64 {
    ///     tuple.0 + tuple.1
    /// }
    ///
    /// let handle = cache.generate((5, 6), generate_fn);
    /// assert_eq!(*handle.get(), 11);
    ///
    /// // Does not call `generate_fn` again as the result has been cached.
    /// let handle = cache.generate((5, 6), generate_fn);
    /// assert_eq!(*handle.get(), 11);
    /// ```
    pub fn generate<K: Hash + Eq + Any + Send + Sync, V: Send + Sync + Any>(
        &mut self,
        key: K,
        generate_fn: impl FnOnce(&K) -> V + Send + Any,
    ) -> CacheHandle<V> {
        self.generate_arc(Arc::new(key), generate_fn)
    }

    /// Like [`TypeCache::generate`], but takes the key by [`Arc`], avoiding a
    /// clone when the caller retains the key.
    pub fn generate_arc<K: Hash + Eq + Any + Send + Sync, V: Send + Sync + Any>(
        &mut self,
        key: Arc<K>,
        generate_fn: impl FnOnce(&K) -> V + Send + Any,
    ) -> CacheHandle<V> {
        let entry = self
            .cells
            .entry(TypeId::of::<K>())
            .or_insert_with(|| {
                Arc::new(Mutex::<HashMap<Arc<K>, CacheHandle<V>>>::default())
            })
            .clone();

        let mut entry_locked = entry.lock().unwrap();

        let entry = entry_locked
            .downcast_mut::<HashMap<Arc<K>, CacheHandle<V>>>()
            .expect("a different value type is already cached under this key type")
            .entry(key.clone());

        match entry {
            Entry::Occupied(o) => o.get().clone(),
            Entry::Vacant(v) => {
                let handle = v.insert(CacheHandle::default()).clone();
                let handle2 = handle.clone();

                thread::spawn(move || {
                    let handle3 = handle2.clone();
                    let worker = thread::spawn(move || {
                        let value = generate_fn(key.as_ref());
                        handle3.set(Ok(value));
                    });
                    if worker.join().is_err() {
                        tracing::warn!("cache generator panicked");
                        handle2.set(Err(Arc::new(Error::Panic)));
                    }
                });

                handle
            }
        }
    }

    /// Gets a handle to a cacheable object from the cache, generating the
    /// object in the background if needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cache::{mem::TypeCache, Cacheable};
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
    ///
    /// let mut cache = TypeCache::new();
    ///
    /// let handle = cache.get(Params {
    ///     param1: 50,
    ///     param2: "cache".to_string(),
    /// });
    /// assert_eq!(*handle.unwrap_inner(), 100);
    ///
    /// let handle = cache.get(Params {
    ///     param1: 5,
    ///     param2: "cache".to_string(),
    /// });
    /// assert_eq!(
    ///     format!("{}", handle.unwrap_err_inner().root_cause()),
    ///     "invalid param"
    /// );
    /// ```
    pub fn get<K: Cacheable>(
        &mut self,
        key: K,
    ) -> CacheHandle<std::result::Result<K::Output, K::Error>> {
        self.generate(key, |key| key.generate())
    }
}
