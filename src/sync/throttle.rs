//! Pacing of outbound app details requests.

use async_trait::async_trait;
use std::time::Duration;

/// Gate awaited before each outbound details request.
#[async_trait]
pub trait SyncThrottle: Send + Sync {
    async fn wait(&self);
}

/// Sleeps for a fixed delay on every call.
pub struct FixedDelayThrottle {
    delay: Duration,
}

impl FixedDelayThrottle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SyncThrottle for FixedDelayThrottle {
    async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Never waits. Used by tests and by zero-delay configurations.
pub struct NoOpThrottle;

#[async_trait]
impl SyncThrottle for NoOpThrottle {
    async fn wait(&self) {}
}
