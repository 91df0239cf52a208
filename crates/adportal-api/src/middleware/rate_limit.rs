//! Token bucket rate limiter for the sign-in endpoints.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tracing::warn;

use adportal_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Buckets tracked before idle ones are swept.
const SWEEP_THRESHOLD: usize = 10_000;

/// Per-client token buckets: `capacity` attempts, refilled continuously.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    buckets: Arc<Mutex<HashMap<String, Bucket>>>,
    capacity: f64,
    refill_per_second: f64,
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: f64,
    updated: Instant,
}

impl Bucket {
    fn refilled(self, now: Instant, capacity: f64, rate: f64) -> Self {
        let gained = now.duration_since(self.updated).as_secs_f64() * rate;
        Self {
            tokens: (self.tokens + gained).min(capacity),
            updated: now,
        }
    }
}

impl RateLimiter {
    pub fn new(max_attempts: u32, refill_per_second: f64) -> Self {
        Self {
            buckets: Arc::new(Mutex::new(HashMap::new())),
            capacity: f64::from(max_attempts),
            refill_per_second,
        }
    }

    /// Takes one attempt from `key`'s bucket; `false` when it is empty.
    pub async fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut buckets = self.buckets.lock().await;

        if buckets.len() >= SWEEP_THRESHOLD {
            let (capacity, rate) = (self.capacity, self.refill_per_second);
            buckets.retain(|_, b| b.refilled(now, capacity, rate).tokens < capacity);
        }

        let bucket = buckets
            .get(key)
            .map(|b| b.refilled(now, self.capacity, self.refill_per_second))
            .unwrap_or(Bucket {
                tokens: self.capacity,
                updated: now,
            });

        let allowed = bucket.tokens >= 1.0;
        let tokens = if allowed { bucket.tokens - 1.0 } else { bucket.tokens };
        buckets.insert(key.to_string(), Bucket { tokens, ..bucket });
        allowed
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.buckets.lock().await.len()
    }
}

/// Throttles sign-in attempts per client address when a limiter is configured.
pub async fn signin_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(limiter) = state.rate_limiter.as_ref() else {
        return next.run(request).await;
    };

    let key = client_key(&request);
    if !limiter.check(&key).await {
        warn!(client = %key, "Sign-in rate limit exceeded");
        return ApiError(AppError::rate_limited(
            "Too many sign-in attempts. Please wait and try again.",
        ))
        .into_response();
    }

    next.run(request).await
}

fn client_key(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    forwarded_for(request.headers()).unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bucket_drains_per_key() {
        let limiter = RateLimiter::new(2, 0.0);
        assert!(limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.1").await);
        assert!(!limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_refill_restores_attempts() {
        let limiter = RateLimiter::new(1, 1000.0);
        assert!(limiter.check("10.0.0.1").await);
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(limiter.check("10.0.0.1").await);
    }

    #[tokio::test]
    async fn test_full_buckets_are_swept() {
        let limiter = RateLimiter::new(5, 1_000_000.0);
        for i in 0..SWEEP_THRESHOLD {
            limiter.check(&format!("client-{i}")).await;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        limiter.check("late").await;
        assert!(limiter.tracked().await < SWEEP_THRESHOLD);
    }

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        assert_eq!(forwarded_for(&headers).as_deref(), Some("203.0.113.9"));
        assert_eq!(forwarded_for(&HeaderMap::new()), None);
    }
}
