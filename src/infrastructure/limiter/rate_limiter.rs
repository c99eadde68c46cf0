use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::sleep;

/// A token bucket which allows fractional tokens for precise refill
#[derive(Debug)]
struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
    last_seen: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, refill_per_sec: f64) -> Self {
        let now = Instant::now();
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            last_refill: now,
            last_seen: now,
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.last_refill = now;
        }
    }

    /// Small epsilon to avoid fp surprises
    fn try_consume(&mut self) -> bool {
        self.last_seen = Instant::now();
        self.refill();
        if self.tokens + 1e-12 >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Seconds until one token is available again.
    fn retry_after(&self) -> u64 {
        let missing = (1.0 - self.tokens).max(0.0);
        ((missing / self.refill_per_sec).ceil() as u64).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after_secs: u64 },
}

/// Per-key token buckets, e.g. one per client ip on the sign-in endpoint.
#[derive(Clone)]
pub struct RateLimiterStore {
    map: Arc<DashMap<String, Arc<Mutex<TokenBucket>>>>,
    capacity: f64,
    refill_per_sec: f64,
    bucket_ttl: Duration,
}

impl RateLimiterStore {
    /// `limit` requests per `window`, refilled continuously.
    pub fn new(limit: u64, window: Duration, bucket_ttl: Duration) -> Self {
        let capacity = limit.max(1) as f64;
        Self {
            map: Arc::new(DashMap::new()),
            capacity,
            refill_per_sec: capacity / window.as_secs_f64().max(1.0),
            bucket_ttl,
        }
    }

    /// Spawns the task dropping buckets idle for longer than the ttl.
    pub fn start_eviction(&self) {
        let map = self.map.clone();
        let ttl = self.bucket_ttl;
        tokio::spawn(async move {
            let interval = Duration::from_secs(30);
            loop {
                sleep(interval).await;
                let now = Instant::now();
                map.retain(|_, bucket| now.duration_since(bucket.lock().last_seen) <= ttl);
            }
        });
    }

    fn get_bucket(&self, key: &str) -> Arc<Mutex<TokenBucket>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }
        self.map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(TokenBucket::new(self.capacity, self.refill_per_sec))))
            .clone()
    }

    pub fn check(&self, key: &str) -> RateDecision {
        let bucket = self.get_bucket(key);
        let mut bucket = bucket.lock();
        if bucket.try_consume() {
            RateDecision::Allowed
        } else {
            RateDecision::Limited {
                retry_after_secs: bucket.retry_after(),
            }
        }
    }

    pub fn tracked_keys(&self) -> usize {
        self.map.len()
    }
}
