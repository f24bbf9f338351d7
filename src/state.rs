//! Shared application state for all routes.

use crate::rate_limit::RateLimiter;
use crate::service::Repositories;
use crate::store::Store;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    /// Shared by the login, registration and contact routes.
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, max_requests: usize, window: Duration) -> Self {
        AppState {
            repos: Repositories::new(store),
            limiter: Arc::new(RateLimiter::new(max_requests, window)),
        }
    }
}
