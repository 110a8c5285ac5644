//! Test utilities for business layer testing with mock servers.
//!
//! [`TestContext`] wires a fully registered [`StateCtx`] to a wiremock server so commands can be
//! exercised end to end without the real API.
//!
//! # Example
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! Mock::given(method("GET")).and(path("/users")) /* ... */ .mount(&test_ctx.mock_server).await;
//!
//! let mut fetcher = UsersFetcher::default();
//! fetcher.sync(&mut test_ctx.ctx);
//! let fetched = test_ctx.wait_for::<FetchUsersCompute>(|c| !c.loading).await;
//! ```

#![cfg(test)]

use std::time::{Duration, Instant};

use tabula_states::{Compute, StateCtx};
use wiremock::MockServer;

use crate::page_url::PageUrl;
use crate::storage::MemoryStorage;
use crate::toast::ToastCenter;
use crate::{BusinessConfig, build_state_ctx};

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Test context that holds a mock server and a configured StateCtx.
pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_storage(MemoryStorage::new()).await
    }

    /// Like [`TestContext::new`], with a bearer token already stored.
    pub async fn authenticated(token: &str) -> Self {
        Self::with_storage(MemoryStorage::with_token(token)).await
    }

    async fn with_storage(storage: MemoryStorage) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;
        let ctx = build_state_ctx(
            BusinessConfig::new(mock_server.uri()),
            storage.shared(),
            PageUrl::default(),
        );
        Self { mock_server, ctx }
    }

    /// Apply published values and re-run dirty computes, as one UI frame would.
    pub fn settle(&mut self) {
        self.ctx.sync_computes();
        self.ctx.run_computed();
        self.ctx.sync_computes();
    }

    /// Poll frames until the compute `T` satisfies `done`.
    ///
    /// # Panics
    /// Panics when the condition does not hold within five seconds.
    pub async fn wait_for<T: Compute + Clone>(&mut self, done: impl Fn(&T) -> bool) -> T {
        let start = Instant::now();
        loop {
            self.settle();
            if let Some(value) = self.ctx.cached::<T>()
                && done(value)
            {
                return value.clone();
            }
            assert!(
                start.elapsed() < WAIT_TIMEOUT,
                "Timed out waiting for {}",
                std::any::type_name::<T>()
            );
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Messages of every toast raised so far that is still on screen.
    pub fn toast_messages(&mut self) -> Vec<String> {
        let center = self.ctx.state_mut::<ToastCenter>();
        center.pump(Instant::now());
        center
            .active()
            .iter()
            .map(|active| active.toast.message.clone())
            .collect()
    }
}
