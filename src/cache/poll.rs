//! Single-flight poll cache.
//!
//! Wraps an async producer. A value stays fresh for `ttl`, measured from the
//! moment the fetch that produced it completed. While a fetch is running, every
//! caller joins it instead of starting another one. Failures are handed to
//! every joined caller and are never cached.

use crate::error::SdkError;

use async_lock::Mutex;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

type Producer<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, SdkError>> + Send + Sync>;
type Flight<T> = Shared<BoxFuture<'static, Result<T, Arc<SdkError>>>>;

enum Slot<T> {
    Empty,
    Fresh {
        value: T,
        fetched_at: Instant,
    },
    InFlight {
        flight: Flight<T>,
        generation: u64,
    },
}

struct State<T> {
    slot: Slot<T>,
    generation: u64,
}

pub struct PollCache<T> {
    producer: Producer<T>,
    ttl: Duration,
    state: Mutex<State<T>>,
}

impl<T> PollCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(ttl: Duration, producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, SdkError>> + Send + 'static,
    {
        Self {
            producer: Arc::new(move || producer().boxed()),
            ttl,
            state: Mutex::new(State {
                slot: Slot::Empty,
                generation: 0,
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the fresh value, join the running fetch, or start a new one.
    pub async fn get(&self) -> Result<T, SdkError> {
        let (flight, generation) = {
            let mut state = self.state.lock().await;

            if let Slot::Fresh { value, fetched_at } = &state.slot {
                if fetched_at.elapsed() < self.ttl {
                    tracing::debug!("poll cache hit");
                    return Ok(value.clone());
                }
            }

            if let Slot::InFlight { flight, generation } = &state.slot {
                tracing::debug!(generation, "joining in-flight refresh");
                (flight.clone(), *generation)
            } else {
                state.generation += 1;
                let generation = state.generation;
                let flight = (self.producer)()
                    .map(|result| result.map_err(Arc::new))
                    .boxed()
                    .shared();
                state.slot = Slot::InFlight {
                    flight: flight.clone(),
                    generation,
                };
                tracing::debug!(generation, "starting refresh");
                (flight, generation)
            }
        };

        let outcome = flight.await;
        self.settle(generation, &outcome).await;
        outcome.map_err(SdkError::RefreshFailed)
    }

    /// The last stored value, regardless of age. `None` while empty or while a refresh runs.
    pub async fn peek(&self) -> Option<T> {
        match &self.state.lock().await.slot {
            Slot::Fresh { value, .. } => Some(value.clone()),
            _ => None,
        }
    }

    pub async fn is_in_flight(&self) -> bool {
        matches!(self.state.lock().await.slot, Slot::InFlight { .. })
    }

    /// Drop the cached value so the next `get()` fetches.
    ///
    /// A fetch already running is not affected and still stores its result.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        if matches!(state.slot, Slot::Fresh { .. }) {
            state.slot = Slot::Empty;
        }
    }

    /// Store the outcome of a flight, once. Later joiners of the same flight
    /// find the slot already settled and leave it alone.
    async fn settle(&self, generation: u64, outcome: &Result<T, Arc<SdkError>>) {
        let mut state = self.state.lock().await;
        let current = matches!(
            &state.slot,
            Slot::InFlight { generation: g, .. } if *g == generation
        );
        if !current {
            return;
        }

        state.slot = match outcome {
            Ok(value) => Slot::Fresh {
                value: value.clone(),
                fetched_at: Instant::now(),
            },
            Err(err) => {
                tracing::warn!(generation, error = %err, "refresh failed");
                Slot::Empty
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_cache(
        ttl: Duration,
        delay: Duration,
        fail_first: usize,
    ) -> (PollCache<usize>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let cache = PollCache::new(ttl, move || {
            let counter = counter.clone();
            async move {
                let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
                tokio::time::sleep(delay).await;
                if call <= fail_first {
                    Err(SdkError::Other(format!("boom {}", call)))
                } else {
                    Ok(call)
                }
            }
        });
        (cache, calls)
    }

    #[tokio::test]
    async fn test_concurrent_gets_share_one_fetch() {
        let (cache, calls) =
            counting_cache(Duration::from_secs(60), Duration::from_millis(50), 0);
        let (a, b) = tokio::join!(cache.get(), cache.get());
        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fresh_value_served_without_fetch() {
        let (cache, calls) = counting_cache(Duration::from_secs(60), Duration::ZERO, 0);
        assert_eq!(cache.get().await.unwrap(), 1);
        assert_eq!(cache.get().await.unwrap(), 1);
        assert_eq!(cache.peek().await, Some(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_value_triggers_exactly_one_fetch() {
        let (cache, calls) = counting_cache(Duration::from_millis(30), Duration::ZERO, 0);
        assert_eq!(cache.get().await.unwrap(), 1);
        tokio::time::sleep(Duration::from_millis(60)).await;
        let (a, b) = tokio::join!(cache.get(), cache.get());
        assert_eq!(a.unwrap(), 2);
        assert_eq!(b.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_reaches_every_waiter_and_is_not_cached() {
        let (cache, calls) =
            counting_cache(Duration::from_secs(60), Duration::from_millis(20), 1);
        let (a, b) = tokio::join!(cache.get(), cache.get());
        for result in [a, b] {
            match result {
                Err(SdkError::RefreshFailed(cause)) => {
                    assert_eq!(cause.to_string(), "boom 1");
                }
                other => panic!("expected RefreshFailed, got {:?}", other),
            }
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.peek().await, None);
        assert!(!cache.is_in_flight().await);

        assert_eq!(cache.get().await.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let (cache, calls) = counting_cache(Duration::from_secs(60), Duration::ZERO, 0);
        cache.get().await.unwrap();
        cache.invalidate().await;
        assert_eq!(cache.peek().await, None);
        assert_eq!(cache.get().await.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_spawned_callers_share_flight() {
        let (cache, calls) =
            counting_cache(Duration::from_secs(60), Duration::from_millis(50), 0);
        let cache = Arc::new(cache);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get().await.unwrap() })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
