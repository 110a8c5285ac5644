//! Users fetch behind the dashboard table.
//!
//! [`FetchUsersCommand`] loads one page for the current [`DashboardQuery`] and publishes it into
//! [`FetchUsersCompute`]. [`UsersFetcher`] re-dispatches whenever the query changes and cancels
//! the superseded request so a late response cannot overwrite a newer one.

use std::any::{Any, TypeId};

use log::{error, info};
use tabula_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, State, StateCtx,
    StateSyncStatus, TaskHandle, Updater, state_assign_impl,
};
use tokio_util::sync::CancellationToken;

use crate::api_client::ApiClient;
use crate::entities::{User, UserResponse};
use crate::page_url::DashboardQuery;
use crate::users_api::{list_users, search_users};

/// Latest users page and the state of the request behind it.
///
/// The previous page stays available while a new one loads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchUsersCompute {
    pub page: Option<UserResponse>,
    /// Query the in-flight or last finished request was made for.
    pub query: Option<DashboardQuery>,
    pub loading: bool,
    pub error: Option<String>,
}

impl FetchUsersCompute {
    pub fn users(&self) -> &[User] {
        self.page.as_ref().map_or(&[], |page| page.users.as_slice())
    }

    pub fn total(&self) -> u64 {
        self.page.as_ref().map_or(0, |page| page.total)
    }
}

impl State for FetchUsersCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

impl Compute for FetchUsersCompute {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 0] = [];
        const COMPUTE_IDS: [TypeId; 0] = [];
        (&STATE_IDS, &COMPUTE_IDS)
    }

    // Written by FetchUsersCommand only.
    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}
}

/// `GET /users?limit=` or, with a search term, `GET /users/search?limit=&q=`.
#[derive(Debug, Default)]
pub struct FetchUsersCommand;

impl Command for FetchUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let query = snap.state::<DashboardQuery>().cloned().unwrap_or_default();
        let previous = snap.state::<FetchUsersCompute>().cloned().unwrap_or_default();
        let client = snap.state::<ApiClient>().cloned();

        Box::pin(async move {
            // A successor may already have published; stay silent.
            if cancel.is_cancelled() {
                info!("FetchUsersCommand: superseded before start");
                return;
            }
            let client = match client {
                Ok(client) => client,
                Err(err) => {
                    error!("FetchUsersCommand: {err}");
                    updater.set(FetchUsersCompute {
                        error: Some(err.to_string()),
                        ..previous
                    });
                    return;
                }
            };

            info!(
                "FetchUsersCommand: limit={} search={:?}",
                query.limit, query.search
            );
            updater.set(FetchUsersCompute {
                query: Some(query.clone()),
                loading: true,
                error: None,
                ..previous.clone()
            });

            let request = async {
                match &query.search {
                    Some(search) => search_users(&client, search, query.limit).await,
                    None => list_users(&client, query.limit).await,
                }
            };
            let result = tokio::select! {
                () = cancel.cancelled() => {
                    info!("FetchUsersCommand: superseded, dropping request");
                    return;
                }
                result = request => result,
            };

            match result {
                Ok(page) => {
                    info!(
                        "FetchUsersCommand: loaded {} of {} users",
                        page.users.len(),
                        page.total
                    );
                    updater.set(FetchUsersCompute {
                        page: Some(page),
                        query: Some(query),
                        loading: false,
                        error: None,
                    });
                }
                Err(err) => {
                    error!("FetchUsersCommand: {err}");
                    updater.set(FetchUsersCompute {
                        query: Some(query),
                        loading: false,
                        error: Some(err.to_string()),
                        ..previous
                    });
                }
            }
        })
    }
}

/// Keeps the users fetch in step with [`DashboardQuery`].
#[derive(Debug, Default)]
pub struct UsersFetcher {
    last: Option<DashboardQuery>,
    in_flight: Option<TaskHandle>,
}

impl UsersFetcher {
    /// Dispatch a fetch when the derived query differs from the last one dispatched.
    ///
    /// Waits while the query is still being re-derived. Returns whether a fetch was dispatched.
    pub fn sync(&mut self, ctx: &mut StateCtx) -> bool {
        if ctx.status_of::<DashboardQuery>() != Some(StateSyncStatus::Clean) {
            return false;
        }
        let Some(query) = ctx.cached::<DashboardQuery>().cloned() else {
            return false;
        };
        if self.last.as_ref() == Some(&query) {
            return false;
        }
        self.refresh(ctx, query)
    }

    /// Fetch again for the last query, e.g. after a user was created.
    pub fn reload(&mut self, ctx: &mut StateCtx) -> bool {
        let query = ctx.cached::<DashboardQuery>().cloned().unwrap_or_default();
        self.refresh(ctx, query)
    }

    fn refresh(&mut self, ctx: &mut StateCtx, query: DashboardQuery) -> bool {
        if let Some(handle) = self.in_flight.take() {
            handle.cancel();
        }
        self.in_flight = ctx.dispatch::<FetchUsersCommand>();
        if self.in_flight.is_some() {
            self.last = Some(query);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::page_url::{LIMIT_PARAM, PageUrl, SEARCH_PARAM};
    use crate::test_utils::TestContext;

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    fn page_json(first_names: &[&str]) -> serde_json::Value {
        let users: Vec<_> = first_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                serde_json::json!({
                    "id": i + 1,
                    "firstName": name,
                    "lastName": "Doe",
                    "age": 30,
                    "gender": "male",
                    "email": format!("{}@example.com", name.to_lowercase())
                })
            })
            .collect();
        serde_json::json!({"users": users, "total": users.len(), "skip": 0, "limit": 10})
    }

    #[tokio::test]
    async fn initial_sync_lists_users_with_default_limit() {
        let mut test_ctx = TestContext::new().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param(LIMIT_PARAM, "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["Emily", "Michael"])))
            .expect(1)
            .mount(&test_ctx.mock_server)
            .await;

        let mut fetcher = UsersFetcher::default();
        test_ctx.settle();
        assert!(fetcher.sync(&mut test_ctx.ctx));
        assert!(!fetcher.sync(&mut test_ctx.ctx), "same query is not refetched");

        let fetched = test_ctx
            .wait_for::<FetchUsersCompute>(|c| !c.loading && c.page.is_some())
            .await;
        assert_eq!(fetched.users().len(), 2);
        assert_eq!(fetched.total(), 2);
    }

    #[tokio::test]
    async fn search_in_url_switches_endpoint() {
        let mut test_ctx = TestContext::new().await;
        Mock::given(method("GET"))
            .and(path("/users/search"))
            .and(query_param("q", "emily"))
            .and(query_param(LIMIT_PARAM, "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["Emily"])))
            .expect(1)
            .mount(&test_ctx.mock_server)
            .await;

        test_ctx.ctx.update::<PageUrl>(|url| {
            url.set_param(SEARCH_PARAM, "emily");
            url.set_param(LIMIT_PARAM, "5");
        });
        test_ctx.settle();

        let mut fetcher = UsersFetcher::default();
        assert!(fetcher.sync(&mut test_ctx.ctx));
        let fetched = test_ctx
            .wait_for::<FetchUsersCompute>(|c| !c.loading && c.page.is_some())
            .await;
        assert_eq!(fetched.users()[0].first_name, "Emily");
        assert_eq!(
            fetched.query.and_then(|q| q.search).as_deref(),
            Some("emily")
        );
    }

    #[tokio::test]
    async fn failure_keeps_previous_page_and_reports_error() {
        let mut test_ctx = TestContext::new().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["Emily"])))
            .up_to_n_times(1)
            .mount(&test_ctx.mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"message": "boom"})),
            )
            .mount(&test_ctx.mock_server)
            .await;

        let mut fetcher = UsersFetcher::default();
        test_ctx.settle();
        fetcher.sync(&mut test_ctx.ctx);
        test_ctx
            .wait_for::<FetchUsersCompute>(|c| !c.loading && c.page.is_some())
            .await;

        assert!(fetcher.reload(&mut test_ctx.ctx));
        let failed = test_ctx
            .wait_for::<FetchUsersCompute>(|c| c.error.is_some())
            .await;
        assert_eq!(failed.users().len(), 1);
        assert!(!failed.loading);
        assert_eq!(test_ctx.toast_messages(), vec!["boom".to_owned()]);
    }

    #[tokio::test]
    async fn fetch_cancelled_before_start_publishes_nothing() {
        let mut test_ctx = TestContext::new().await;
        test_ctx.settle();

        let handle = test_ctx
            .ctx
            .dispatch::<FetchUsersCommand>()
            .expect("runtime is present");
        handle.cancel();

        tokio::time::sleep(Duration::from_millis(100)).await;
        test_ctx.ctx.sync_computes();
        let fetch = test_ctx
            .ctx
            .cached::<FetchUsersCompute>()
            .cloned()
            .unwrap_or_default();
        assert_eq!(fetch, FetchUsersCompute::default(), "no loading flag, no query");

        let requests = test_ctx
            .mock_server
            .received_requests()
            .await
            .unwrap_or_default();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn superseded_fetch_is_cancelled() {
        let mut test_ctx = TestContext::new().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(&["Slow"]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&test_ctx.mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["Fast"])))
            .mount(&test_ctx.mock_server)
            .await;

        let mut fetcher = UsersFetcher::default();
        test_ctx.settle();
        fetcher.sync(&mut test_ctx.ctx);

        test_ctx
            .ctx
            .update::<PageUrl>(|url| url.set_param(SEARCH_PARAM, "fast"));
        test_ctx.settle();
        assert!(fetcher.sync(&mut test_ctx.ctx));

        let fetched = test_ctx
            .wait_for::<FetchUsersCompute>(|c| !c.loading && c.page.is_some())
            .await;
        assert_eq!(fetched.users()[0].first_name, "Fast");

        tokio::time::sleep(Duration::from_millis(700)).await;
        test_ctx.ctx.sync_computes();
        let settled = test_ctx
            .ctx
            .cached::<FetchUsersCompute>()
            .cloned()
            .unwrap_or_default();
        assert_eq!(settled.users()[0].first_name, "Fast");
    }
}
