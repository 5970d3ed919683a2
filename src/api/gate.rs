use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use std::any::Any;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::{FsrError, RequestErrorKind, Result};

/// Admission control for outbound register calls.
///
/// Every request acquires a [`Permit`] before the transport is invoked and
/// holds it until the response has been read. The permit is released when it
/// is dropped, so an early return, an error or a cancelled future all give it
/// back.
#[async_trait]
pub trait RequestGate: Send + Sync {
    /// Wait until the strategy admits one more request
    async fn acquire(&self) -> Result<Permit>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// Scoped admission token returned by [`RequestGate::acquire`]
#[must_use = "the request is only admitted while the permit is held"]
pub struct Permit {
    _guard: Option<Box<dyn Any + Send + Sync>>,
}

impl Permit {
    /// A permit with nothing to release
    pub fn unguarded() -> Self {
        Self { _guard: None }
    }

    /// A permit that releases `guard` when dropped
    pub fn guarded<G: Send + Sync + 'static>(guard: G) -> Self {
        Self {
            _guard: Some(Box::new(guard)),
        }
    }
}

impl std::fmt::Debug for Permit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Permit")
            .field("guarded", &self._guard.is_some())
            .finish()
    }
}

/// Pass-through gate for single calls and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct Unlimited;

#[async_trait]
impl RequestGate for Unlimited {
    async fn acquire(&self) -> Result<Permit> {
        Ok(Permit::unguarded())
    }

    fn name(&self) -> &'static str {
        "unlimited"
    }
}

/// Caps the number of requests in flight
#[derive(Debug, Clone)]
pub struct ConcurrencyLimit {
    semaphore: Arc<Semaphore>,
    max_concurrent: usize,
}

impl ConcurrencyLimit {
    pub fn new(max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Permits not currently held by a request
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Stop admitting requests; pending and future acquires fail
    pub fn close(&self) {
        self.semaphore.close();
    }
}

#[async_trait]
impl RequestGate for ConcurrencyLimit {
    async fn acquire(&self) -> Result<Permit> {
        let permit: OwnedSemaphorePermit =
            Arc::clone(&self.semaphore).acquire_owned().await.map_err(|_| {
                FsrError::request(RequestErrorKind::GateClosed, "request gate is closed")
            })?;
        Ok(Permit::guarded(permit))
    }

    fn name(&self) -> &'static str {
        "concurrency"
    }
}

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Admits at most `limit` requests per `window`, allowing bursts up to `limit`
#[derive(Clone)]
pub struct TokenBucket {
    limiter: Arc<DirectRateLimiter>,
}

impl TokenBucket {
    pub fn new(window: Duration, limit: u32) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(quota_from_window(window, limit))),
        }
    }
}

impl std::fmt::Debug for TokenBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBucket").finish_non_exhaustive()
    }
}

#[async_trait]
impl RequestGate for TokenBucket {
    async fn acquire(&self) -> Result<Permit> {
        // Budget is consumed on admission; nothing to give back on drop.
        self.limiter.until_ready().await;
        Ok(Permit::unguarded())
    }

    fn name(&self) -> &'static str {
        "token_bucket"
    }
}

/// Longest time between two admissions a token bucket will wait (one day)
const MAX_REPLENISH_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

fn quota_from_window(window: Duration, limit: u32) -> Quota {
    let safe_limit = limit.max(1);
    let burst = NonZeroU32::new(safe_limit).unwrap_or(NonZeroU32::MIN);

    let seconds_per_cell = (window.as_secs_f64() / f64::from(safe_limit)).max(0.001);
    let period = Duration::try_from_secs_f64(seconds_per_cell)
        .unwrap_or(MAX_REPLENISH_PERIOD)
        .min(MAX_REPLENISH_PERIOD);

    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(burst))
        .allow_burst(burst)
}
