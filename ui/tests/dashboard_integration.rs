//! Integration tests for the dashboard page.
//!
//! These tests drive the whole app against a mock users API and check that:
//! 1. The users fetch follows the `limit` / `search` query of the page URL
//! 2. Table controls outside the grid (pagination, clear, tabs) work end to end
//! 3. A failed fetch can be retried

mod common;

use std::time::Duration;

use common::{TestCtx, start_server, users};
use egui::accesskit::Role;
use kittest::Queryable;
use tabula_business::page_url::{LIMIT_PARAM, SEARCH_PARAM};
use tabula_business::{FetchUsersCompute, PageUrl};
use tabula_ui::TabulaApp;
use tabula_ui::pages::RETRY_LABEL;
use tabula_ui::widgets::table::NO_RESULT;
use tabula_ui::widgets::table::pagination::{NEXT_PAGE_LABEL, PREVIOUS_PAGE_LABEL};
use tabula_ui::widgets::table::toolbar::CLEAR_LABEL;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn requests_to(ctx: &TestCtx<'_, TabulaApp>, endpoint: &str) -> Vec<wiremock::Request> {
    ctx.mock_server()
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == endpoint)
        .collect()
}

fn query_value(request: &wiremock::Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[tokio::test]
async fn test_users_render_after_initial_fetch() {
    let mut ctx = TestCtx::new_app().await;
    ctx.settle().await;

    let harness = ctx.harness();
    assert!(harness.query_by_label("First0").is_some(), "first user rendered");
    assert!(harness.query_by_label("First2").is_some(), "last user rendered");
    assert!(harness.query_by_label("Page 1 of 1").is_some());
    assert!(harness.query_by_label_contains(NO_RESULT).is_none());

    let fetch = harness
        .state()
        .state()
        .ctx
        .cached::<FetchUsersCompute>()
        .cloned()
        .unwrap_or_default();
    assert!(!fetch.loading);
    assert_eq!(fetch.users().len(), 3);
}

#[tokio::test]
async fn test_default_limit_is_sent() {
    let mut ctx = TestCtx::new_app().await;
    ctx.settle().await;

    let requests = requests_to(&ctx, "/users").await;
    assert_eq!(requests.len(), 1, "exactly one fetch for an unchanged query");
    assert_eq!(query_value(&requests[0], "limit").as_deref(), Some("10"));
}

#[tokio::test]
async fn test_empty_page_shows_no_result() {
    let mut ctx = TestCtx::new_app_at("http://localhost/dashboard", users(0)).await;
    ctx.settle().await;

    assert!(ctx.harness().query_by_label_contains(NO_RESULT).is_some());
    assert!(ctx.harness().query_by_label("Page 1 of 1").is_some());
}

#[tokio::test]
async fn test_url_limit_drives_fetch_and_page_size() {
    let mut ctx = TestCtx::new_app_at("http://localhost/dashboard?limit=5", users(12)).await;
    ctx.settle().await;

    let requests = requests_to(&ctx, "/users").await;
    assert_eq!(query_value(&requests[0], "limit").as_deref(), Some("5"));
    assert!(ctx.harness().query_by_label("Page 1 of 3").is_some());
}

#[tokio::test]
async fn test_url_search_uses_search_endpoint() {
    let mut ctx = TestCtx::new_app_at("http://localhost/dashboard?search=First1", users(3)).await;
    ctx.settle().await;

    let requests = requests_to(&ctx, "/users/search").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(query_value(&requests[0], "q").as_deref(), Some("First1"));
    assert!(requests_to(&ctx, "/users").await.is_empty());

    // The search text also filters the loaded rows.
    let harness = ctx.harness();
    assert!(harness.query_by_label("first1@example.com").is_some());
    assert!(harness.query_by_label("first0@example.com").is_none());
}

#[tokio::test]
async fn test_typing_search_updates_url_and_refetches() {
    let mut ctx = TestCtx::new_app_at("http://localhost/dashboard?limit=5", users(3)).await;
    ctx.settle().await;
    assert!(requests_to(&ctx, "/users/search").await.is_empty());

    // The search box is the only text input on the users tab.
    ctx.harness().get_by_role(Role::TextInput).click();
    ctx.harness_mut().step();
    ctx.harness().get_by_role(Role::TextInput).type_text("First1");
    ctx.settle().await;

    let url = ctx.harness().state().state().ctx.state::<PageUrl>().clone();
    assert_eq!(url.param(SEARCH_PARAM).as_deref(), Some("First1"));
    assert_eq!(url.param(LIMIT_PARAM).as_deref(), Some("5"), "other params kept");

    let requests = requests_to(&ctx, "/users/search").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(query_value(&requests[0], "q").as_deref(), Some("First1"));
    assert_eq!(query_value(&requests[0], "limit").as_deref(), Some("5"));

    let harness = ctx.harness();
    assert!(harness.query_by_label("first1@example.com").is_some());
    assert!(harness.query_by_label("first0@example.com").is_none());
}

#[tokio::test]
async fn test_next_and_previous_page() {
    let mut ctx = TestCtx::new_app_at("http://localhost/dashboard", users(12)).await;
    ctx.settle().await;
    assert!(ctx.harness().query_by_label("Page 1 of 2").is_some());

    ctx.harness().get_by_label(NEXT_PAGE_LABEL).click();
    ctx.settle().await;
    let harness = ctx.harness();
    assert!(harness.query_by_label("Page 2 of 2").is_some());
    assert!(harness.query_by_label("First10").is_some());
    assert!(harness.query_by_label("First0").is_none());

    ctx.harness().get_by_label(PREVIOUS_PAGE_LABEL).click();
    ctx.settle().await;
    assert!(ctx.harness().query_by_label("Page 1 of 2").is_some());

    // Paging is local; no refetch.
    assert_eq!(requests_to(&ctx, "/users").await.len(), 1);
}

#[tokio::test]
async fn test_clear_removes_search_and_refetches() {
    let mut ctx = TestCtx::new_app_at("http://localhost/dashboard?search=First1", users(3)).await;
    ctx.settle().await;

    ctx.harness().get_by_label(CLEAR_LABEL).click();
    ctx.settle().await;

    let harness = ctx.harness();
    let url = harness.state().state().ctx.state::<PageUrl>().clone();
    assert_eq!(url.param(SEARCH_PARAM), None);
    assert!(harness.query_by_label(CLEAR_LABEL).is_none(), "clear hidden once unfiltered");
    assert!(harness.query_by_label("First0").is_some());

    assert_eq!(requests_to(&ctx, "/users").await.len(), 1, "refetched without search");
}

#[tokio::test]
async fn test_invoices_tab_shows_sample_rows() {
    let mut ctx = TestCtx::new_app().await;
    ctx.settle().await;

    ctx.harness().get_by_label("Invoices").click();
    ctx.settle().await;

    let harness = ctx.harness();
    assert!(harness.query_by_label("Francis Sanford MD").is_some());
    assert!(harness.query_by_label("First0").is_none());
}

#[tokio::test]
async fn test_failed_fetch_can_be_retried() {
    let mock_server = start_server().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"message": "boom"})),
        )
        .mount(&mock_server)
        .await;
    let mut ctx = TestCtx::app_on(mock_server, "http://localhost/dashboard");

    ctx.settle().await;
    assert!(ctx.harness().query_by_label(RETRY_LABEL).is_some(), "error offers retry");

    ctx.harness().get_by_label(RETRY_LABEL).click();
    ctx.settle().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(requests_to(&ctx, "/users").await.len(), 2);
}
