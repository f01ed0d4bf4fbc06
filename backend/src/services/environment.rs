//! Environment cache in front of the weather data source
//!
//! Keyed by location name, bounded by a TTL, and coalescing concurrent
//! requests for the same key into a single upstream fetch. The clock and
//! the source are injected so TTL behavior is testable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::broadcast;

use shared::{validate_location, EnvironmentReading};

use crate::error::{AppError, AppResult};

/// Supplier of weather readings for a named location
#[async_trait]
pub trait EnvironmentSource: Send + Sync {
    async fn fetch(&self, location: &str) -> AppResult<EnvironmentReading>;
}

/// Injected time source
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

type FetchResult = Result<EnvironmentReading, String>;

struct CacheInner {
    entries: HashMap<String, EnvironmentReading>,
    in_flight: HashMap<String, broadcast::Sender<FetchResult>>,
}

enum FetchRole {
    /// This caller performs the fetch and broadcasts the result
    Lead(broadcast::Sender<FetchResult>),
    /// Another caller is already fetching this location
    Wait(broadcast::Receiver<FetchResult>),
}

/// Time-bounded, deduplicating cache over an [`EnvironmentSource`]
pub struct EnvironmentCache {
    source: Arc<dyn EnvironmentSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    inner: Mutex<CacheInner>,
}

impl EnvironmentCache {
    pub fn new(source: Arc<dyn EnvironmentSource>, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Arc<dyn EnvironmentSource>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            clock,
            ttl,
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                in_flight: HashMap::new(),
            }),
        }
    }

    /// Get the reading for a location, fetching through the source on a
    /// miss or after TTL expiry
    ///
    /// Concurrent calls for the same location share one upstream fetch;
    /// every waiter receives the same result. Source failures reach all
    /// waiters and are never cached, so the next call retries.
    pub async fn get(&self, location: &str) -> AppResult<EnvironmentReading> {
        validate_location(location).map_err(|msg| AppError::Validation {
            field: "location".to_string(),
            message: msg.to_string(),
            message_bn: "অবস্থান খালি হতে পারবে না".to_string(),
        })?;
        let key = location.trim().to_string();

        let role = {
            let mut inner = self.lock_inner();
            if let Some(reading) = inner.entries.get(&key) {
                if self.clock.now() - reading.fetched_at < self.ttl {
                    return Ok(reading.clone());
                }
            }
            match inner.in_flight.get(&key) {
                Some(sender) => FetchRole::Wait(sender.subscribe()),
                None => {
                    let (sender, _) = broadcast::channel(1);
                    inner.in_flight.insert(key.clone(), sender.clone());
                    FetchRole::Lead(sender)
                }
            }
        };

        match role {
            FetchRole::Wait(mut receiver) => match receiver.recv().await {
                Ok(Ok(reading)) => Ok(reading),
                Ok(Err(message)) => Err(AppError::EnvironmentUnavailable(message)),
                Err(_) => Err(AppError::EnvironmentUnavailable(
                    "environment fetch was interrupted".to_string(),
                )),
            },
            FetchRole::Lead(sender) => {
                let result = self.source.fetch(&key).await;

                let shared: FetchResult = {
                    let mut inner = self.lock_inner();
                    inner.in_flight.remove(&key);
                    match result {
                        Ok(mut reading) => {
                            reading.fetched_at = self.clock.now();
                            inner.entries.insert(key.clone(), reading.clone());
                            Ok(reading)
                        }
                        Err(err) => Err(err.to_string()),
                    }
                };

                // Waiters may have gone away; a failed send is fine
                let _ = sender.send(shared.clone());
                shared.map_err(AppError::EnvironmentUnavailable)
            }
        }
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        // The lock is never held across an await; recover from poisoning
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct FakeSource {
        calls: AtomicUsize,
        failing: AtomicBool,
        delay_ms: u64,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
                delay_ms: 0,
            }
        }

        fn with_delay(delay_ms: u64) -> Self {
            Self {
                delay_ms,
                ..Self::new()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EnvironmentSource for FakeSource {
        async fn fetch(&self, location: &str) -> AppResult<EnvironmentReading> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            }
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::EnvironmentUnavailable("source down".to_string()));
            }
            Ok(EnvironmentReading::neutral(location, Utc::now()))
        }
    }

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(start),
            }
        }

        fn advance(&self, duration: Duration) {
            let mut now = self.now.lock().unwrap();
            *now = *now + duration;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn ttl() -> Duration {
        Duration::seconds(300)
    }

    #[tokio::test]
    async fn cache_hit_performs_no_io() {
        let source = Arc::new(FakeSource::new());
        let cache = EnvironmentCache::new(source.clone(), ttl());

        let first = cache.get("Dhaka").await.unwrap();
        let second = cache.get("Dhaka").await.unwrap();

        assert_eq!(source.call_count(), 1);
        assert_eq!(first.fetched_at, second.fetched_at);
    }

    #[tokio::test]
    async fn distinct_locations_fetch_separately() {
        let source = Arc::new(FakeSource::new());
        let cache = EnvironmentCache::new(source.clone(), ttl());

        cache.get("Dhaka").await.unwrap();
        cache.get("Rajshahi").await.unwrap();

        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn concurrent_gets_coalesce_into_one_fetch() {
        let source = Arc::new(FakeSource::with_delay(50));
        let cache = Arc::new(EnvironmentCache::new(source.clone(), ttl()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move { cache.get("Dhaka").await }));
        }

        let mut fetched_at = None;
        for handle in handles {
            let reading = handle.await.unwrap().unwrap();
            // All waiters see the same reading
            if let Some(previous) = fetched_at {
                assert_eq!(previous, reading.fetched_at);
            }
            fetched_at = Some(reading.fetched_at);
        }

        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn ttl_expiry_triggers_refetch() {
        let start = Utc::now();
        let clock = Arc::new(ManualClock::new(start));
        let source = Arc::new(FakeSource::new());
        let cache = EnvironmentCache::with_clock(source.clone(), ttl(), clock.clone());

        cache.get("Dhaka").await.unwrap();
        clock.advance(Duration::seconds(299));
        cache.get("Dhaka").await.unwrap();
        assert_eq!(source.call_count(), 1);

        clock.advance(Duration::seconds(2));
        cache.get("Dhaka").await.unwrap();
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn source_failure_is_not_cached() {
        let source = Arc::new(FakeSource::new());
        source.failing.store(true, Ordering::SeqCst);
        let cache = EnvironmentCache::new(source.clone(), ttl());

        let err = cache.get("Dhaka").await.unwrap_err();
        assert!(matches!(err, AppError::EnvironmentUnavailable(_)));

        source.failing.store(false, Ordering::SeqCst);
        cache.get("Dhaka").await.unwrap();
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn concurrent_waiters_all_see_the_failure() {
        let source = Arc::new(FakeSource::with_delay(50));
        source.failing.store(true, Ordering::SeqCst);
        let cache = Arc::new(EnvironmentCache::new(source.clone(), ttl()));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move { cache.get("Dhaka").await }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_err());
        }
        // Failures are never cached, so a straggler may retry; every
        // caller still ends with an error
        assert!(source.call_count() >= 1);
    }

    #[tokio::test]
    async fn empty_location_is_rejected_without_io() {
        let source = Arc::new(FakeSource::new());
        let cache = EnvironmentCache::new(source.clone(), ttl());

        let err = cache.get("   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(source.call_count(), 0);
    }
}
