//! Dashboard business layer: REST client, entities, table engine and the states, computes and
//! commands the UI drives through [`tabula_states::StateCtx`].

pub mod api_client;
pub mod columns;
mod config;
pub mod create_user;
pub mod dashboard;
pub mod entities;
pub mod format;
pub mod http;
pub mod page_url;
pub mod storage;
pub mod table;
pub mod toast;
pub mod users_api;

mod test_utils;

use std::sync::Arc;

use tabula_states::StateCtx;

pub use api_client::{ApiClient, ApiError, RequestOptions};
pub use config::{BusinessConfig, ConfigError, DEFAULT_API_URL};
pub use create_user::{
    CreateUserCommand, CreateUserCompute, CreateUserForm, CreateUserInput, CreateUserResult,
};
pub use dashboard::{FetchUsersCommand, FetchUsersCompute, UsersFetcher};
pub use entities::{Person, Role, Row, RowId, User, UserResponse};
pub use page_url::{DashboardQuery, PageUrl};
pub use storage::{MemoryStorage, TOKEN_KEY, TokenStorage};
pub use toast::{Notifier, Toast, ToastCenter, ToastLevel};

/// Register every state, compute and command of the dashboard.
///
/// The [`ApiClient`] raises its error toasts into the registered [`ToastCenter`].
pub fn build_state_ctx(
    config: BusinessConfig,
    storage: Arc<dyn TokenStorage>,
    page_url: PageUrl,
) -> StateCtx {
    let mut ctx = StateCtx::new();

    let toasts = ToastCenter::new();
    let client = ApiClient::new(config.clone(), storage, toasts.notifier());

    ctx.add_state(config);
    ctx.add_state(client);
    ctx.add_state(toasts);
    ctx.add_state(page_url);

    ctx.add_state(CreateUserForm::default());
    ctx.add_state(CreateUserInput::default());

    ctx.record_compute(DashboardQuery::default());
    ctx.record_compute(FetchUsersCompute::default());
    ctx.record_compute(CreateUserCompute::default());

    ctx.record_command(FetchUsersCommand);
    ctx.record_command(CreateUserCommand);

    ctx
}
