//! Global rate limiter shared by every enrichment worker

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Token bucket allowing `rate` calls per second
///
/// The bucket holds at most `rate` tokens and refills continuously. Callers
/// queue on a fair mutex, so permits are handed out in arrival order, and the
/// caller at the head of the queue sleeps until a token is available.
/// [`acquire`](Self::acquire) never fails.
///
/// # Examples
///
/// ```
/// use binscan_lookup::RateLimiter;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let limiter = RateLimiter::per_second(2);
/// limiter.acquire().await;
/// limiter.acquire().await;
/// // A third call within the same second would wait for a refill
/// # }
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    rate: f64,
    capacity: f64,
    bucket: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Allow `calls` calls per second (at least 1)
    pub fn per_second(calls: u32) -> Self {
        let rate = f64::from(calls.max(1));
        Self {
            rate,
            capacity: rate,
            bucket: Mutex::new(Bucket {
                tokens: rate,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Calls allowed per second
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Wait until a call may be issued, then consume one token
    pub async fn acquire(&self) {
        let mut bucket = self.bucket.lock().await;
        self.refill(&mut bucket);

        if bucket.tokens < 1.0 {
            let wait = Duration::from_secs_f64((1.0 - bucket.tokens) / self.rate);
            tracing::trace!("Rate limit reached, waiting {:?}", wait);
            sleep(wait).await;
            self.refill(&mut bucket);
        }

        // sleep() never wakes early, so the token is there; clamp float drift
        bucket.tokens = (bucket.tokens - 1.0).max(0.0);
    }

    fn refill(&self, bucket: &mut Bucket) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.rate).min(self.capacity);
        bucket.last_refill = now;
    }
}
