// Memoization keyed by request inputs, with a time-to-live
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

type Slot<V> = Arc<Mutex<Option<CacheEntry<V>>>>;

/// Computed values are reused until `ttl` elapses. Failed computations are
/// never stored. Each key has its own lock, held while computing: concurrent
/// callers for the same key wait for the first result instead of recomputing
/// it, while other keys proceed independently.
pub struct FrameCache<K, V> {
    ttl: Duration,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> FrameCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot_for(&key).await;
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.inserted_at.elapsed() < self.ttl {
                tracing::debug!("Cache hit for {:?}", key);
                return Ok(cached.value.clone());
            }
        }

        tracing::debug!("Cache miss for {:?}", key);
        let value = compute().await?;
        *entry = Some(CacheEntry {
            value: value.clone(),
            inserted_at: Instant::now(),
        });

        Ok(value)
    }

    /// Slot for `key`, dropping idle slots that are empty or expired
    async fn slot_for(&self, key: &K) -> Slot<V> {
        let ttl = self.ttl;
        let mut slots = self.slots.lock().await;

        slots.retain(|k, slot| {
            k == key
                || match slot.try_lock() {
                    Ok(entry) => entry
                        .as_ref()
                        .is_some_and(|e| e.inserted_at.elapsed() < ttl),
                    // busy computing
                    Err(_) => true,
                }
        });

        slots.entry(key.clone()).or_default().clone()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        let slots: Vec<Slot<V>> = self.slots.lock().await.values().cloned().collect();
        let mut filled = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                filled += 1;
            }
        }
        filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    async fn compute(calls: &AtomicUsize, value: u32) -> Result<u32, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test]
    async fn test_hit_reuses_value() {
        let cache = FrameCache::new(Duration::from_secs(300));
        let calls = AtomicUsize::new(0);

        let first = cache.get_or_try_insert_with(7u32, || compute(&calls, 1)).await;
        let second = cache.get_or_try_insert_with(7u32, || compute(&calls, 2)).await;

        assert_eq!(first, Ok(1));
        assert_eq!(second, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_compute_separately() {
        let cache = FrameCache::new(Duration::from_secs(300));
        let calls = AtomicUsize::new(0);

        cache.get_or_try_insert_with(1u32, || compute(&calls, 10)).await.unwrap();
        let other = cache.get_or_try_insert_with(2u32, || compute(&calls, 20)).await;

        assert_eq!(other, Ok(20));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_expired_entry_recomputes() {
        let cache = FrameCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        cache.get_or_try_insert_with(1u32, || compute(&calls, 10)).await.unwrap();
        let again = cache.get_or_try_insert_with(1u32, || compute(&calls, 11)).await;

        assert_eq!(again, Ok(11));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache: FrameCache<u32, u32> = FrameCache::new(Duration::from_secs(300));

        let failed = cache
            .get_or_try_insert_with(1, || async { Err::<u32, _>("boom".to_string()) })
            .await;
        assert!(failed.is_err());
        assert_eq!(cache.len().await, 0);

        let ok = cache.get_or_try_insert_with(1, || async { Ok::<_, String>(5) }).await;
        assert_eq!(ok, Ok(5));
    }

    #[tokio::test]
    async fn test_slow_key_does_not_block_other_keys() {
        let cache: Arc<FrameCache<u32, u32>> = Arc::new(FrameCache::new(Duration::from_secs(300)));
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());

        let slow = {
            let cache = cache.clone();
            let started = started.clone();
            let release = release.clone();
            tokio::spawn(async move {
                cache
                    .get_or_try_insert_with(1, || async move {
                        started.notify_one();
                        release.notified().await;
                        Ok::<_, String>(1)
                    })
                    .await
            })
        };

        started.notified().await;
        let fast = tokio::time::timeout(
            Duration::from_secs(5),
            cache.get_or_try_insert_with(2, || async { Ok::<_, String>(2) }),
        )
        .await
        .expect("key 2 waited on key 1");
        assert_eq!(fast, Ok(2));

        release.notify_one();
        assert_eq!(slow.await.unwrap(), Ok(1));
        assert_eq!(cache.len().await, 2);
    }
}
