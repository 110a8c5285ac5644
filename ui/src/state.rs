use std::sync::Arc;

use tabula_business::{
    BusinessConfig, DashboardQuery, MemoryStorage, PageUrl, TokenStorage, build_state_ctx,
};
use tabula_states::StateCtx;

use crate::pages::DashboardState;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    /// Token storage shared with the REST client.
    pub tokens: Arc<dyn TokenStorage>,
    pub dashboard: DashboardState,
}

impl State {
    pub fn new(config: BusinessConfig, tokens: Arc<dyn TokenStorage>, page_url: PageUrl) -> Self {
        let dashboard = DashboardState::new(&DashboardQuery::from_url(&page_url));
        let ctx = build_state_ctx(config, Arc::clone(&tokens), page_url);
        Self {
            ctx,
            tokens,
            dashboard,
        }
    }

    /// State pointed at a mock server, with empty token storage and the default page URL.
    pub fn test(base_url: String) -> Self {
        Self::new(
            BusinessConfig::new(base_url),
            MemoryStorage::new().shared(),
            PageUrl::default(),
        )
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(
            BusinessConfig::default(),
            MemoryStorage::new().shared(),
            PageUrl::default(),
        )
    }
}
