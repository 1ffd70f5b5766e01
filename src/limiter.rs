use std::sync::Arc;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Default number of simultaneous translation calls
pub const DEFAULT_CONCURRENCY_CAP: usize = 100;

/// Largest cap the underlying semaphore can hold
pub const MAX_CONCURRENCY_CAP: usize = Semaphore::MAX_PERMITS;

/// Bounded admission gate for translation calls.
///
/// Cloning shares the same slots.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One occupied slot. The slot frees when the token is dropped.
#[derive(Debug)]
pub struct LimiterToken {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyLimiter {
    /// # Panics
    /// Panics if `capacity` is 0 or exceeds [`MAX_CONCURRENCY_CAP`]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "concurrency capacity must be >= 1");
        assert!(
            capacity <= MAX_CONCURRENCY_CAP,
            "concurrency capacity must be <= {}",
            MAX_CONCURRENCY_CAP
        );
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait for a free slot.
    pub async fn acquire(&self) -> Result<LimiterToken, AcquireError> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
        Ok(LimiterToken { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Slots currently held.
    pub fn in_use(&self) -> usize {
        self.capacity - self.available()
    }
}
