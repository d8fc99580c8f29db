use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::sync::{PoisonError, RwLock};

use hashbrown::hash_map::RawEntryMut;

use crate::hash::{Equivalent, FixedHashState, HashMap};

// -----------------------------------------------------------------------------
// KeyedCache

/// A thread-safe, grow-only map with get-or-create semantics.
///
/// Values are handed out by clone, so `V` is usually an [`Arc`] or another
/// cheap handle.
///
/// Lookups first take the read lock. On a miss the write lock is taken, the
/// key is checked again, and the value is built while the write lock is held.
/// So under concurrent first access exactly one factory call succeeds per key,
/// and every caller receives the value that was stored. A failed factory call
/// stores nothing, and the next caller tries again.
///
/// Keys can be looked up through any borrowed form implementing
/// [`Equivalent`], so a hit never needs to allocate an owned key.
///
/// # Examples
///
/// ```
/// use sh_utils::KeyedCache;
///
/// let cache: KeyedCache<String, usize> = KeyedCache::new();
///
/// let len = cache.get_or_insert_with("hello", |k| k.to_owned(), || 5);
/// assert_eq!(len, 5);
///
/// // Already present: the factory is not called.
/// let len = cache.get_or_insert_with("hello", |k| k.to_owned(), || unreachable!());
/// assert_eq!(len, 5);
/// assert_eq!(cache.len(), 1);
/// ```
///
/// [`Arc`]: std::sync::Arc
pub struct KeyedCache<K, V, S = FixedHashState> {
    map: RwLock<HashMap<K, V, S>>,
}

impl<K, V> KeyedCache<K, V> {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::with_hasher(FixedHashState)),
        }
    }
}

impl<K, V> Default for KeyedCache<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for KeyedCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCache")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<K, V, S> KeyedCache<K, V, S> {
    /// Returns the number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, S> KeyedCache<K, V, S>
where
    K: Hash + Eq,
    V: Clone,
    S: BuildHasher,
{
    /// Returns a clone of the value stored for `key`, if any.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Returns the value for `key`, building and storing it on first access.
    ///
    /// `to_key` turns the borrowed key into an owned one and only runs when
    /// the value is inserted.
    pub fn get_or_insert_with<Q>(
        &self,
        key: &Q,
        to_key: impl FnOnce(&Q) -> K,
        f: impl FnOnce() -> V,
    ) -> V
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        match self.get_or_try_insert_with(key, to_key, || Ok::<V, core::convert::Infallible>(f()))
        {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// If `f` fails, nothing is stored and the error is returned to this caller only.
    pub fn get_or_try_insert_with<Q, E>(
        &self,
        key: &Q,
        to_key: impl FnOnce(&Q) -> K,
        f: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        match map.raw_entry_mut().from_key(key) {
            // Another thread won the race between our read and write locks.
            RawEntryMut::Occupied(entry) => Ok(entry.get().clone()),
            RawEntryMut::Vacant(entry) => {
                let value = f()?;
                entry.insert(to_key(key), value.clone());
                Ok(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::KeyedCache;

    #[test]
    fn failed_factory_is_not_cached() {
        let cache: KeyedCache<u32, Arc<str>> = KeyedCache::new();

        let first: Result<_, &str> = cache.get_or_try_insert_with(&1u32, |k| *k, || Err("boom"));
        assert_eq!(first, Err("boom"));
        assert!(cache.is_empty());

        let second: Result<_, &str> =
            cache.get_or_try_insert_with(&1u32, |k| *k, || Ok(Arc::from("ok")));
        assert_eq!(second.as_deref(), Ok("ok"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn borrowed_lookup_matches_owned_key() {
        let cache: KeyedCache<String, i32> = KeyedCache::new();
        cache.get_or_insert_with("k", |k| k.to_owned(), || 3);
        assert_eq!(cache.get("k"), Some(3));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn concurrent_first_access_builds_once() {
        let cache: KeyedCache<u8, Arc<usize>> = KeyedCache::new();
        let builds = AtomicUsize::new(0);

        let seen: Vec<Arc<usize>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        cache.get_or_insert_with(&0u8, |k| *k, || {
                            Arc::new(builds.fetch_add(1, Ordering::SeqCst))
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(seen.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
