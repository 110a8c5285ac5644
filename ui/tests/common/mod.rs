use std::time::Duration;

use egui_kittest::Harness;
use tabula_business::{BusinessConfig, MemoryStorage, PageUrl};
use tabula_ui::TabulaApp;
use tabula_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a, T = State> {
    mock_server: MockServer,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    #[allow(unused)]
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Step, let spawned commands run, step again until their results are on screen.
    #[allow(unused)]
    pub async fn settle(&mut self) {
        for _ in 0..5 {
            self.harness.step();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        for _ in 0..3 {
            self.harness.step();
        }
    }
}

impl<'a> TestCtx<'a, State> {
    /// Harness around a single widget or page, with `/users` serving `users(3)`.
    #[allow(unused)]
    pub async fn new(app: impl FnMut(&mut egui::Ui, &mut State) + 'a) -> Self {
        let mock_server = start_server().await;
        mount_users(&mock_server, users(3)).await;
        let state = State::test(mock_server.uri());
        let harness = Harness::new_ui_state(app, state);

        Self {
            mock_server,
            harness,
        }
    }
}

impl<'a> TestCtx<'a, TabulaApp> {
    /// Full app opened at `page_url`, with both users endpoints serving `users`.
    #[allow(unused)]
    pub async fn new_app_at(page_url: &str, users: serde_json::Value) -> Self {
        let mock_server = start_server().await;
        mount_users(&mock_server, users).await;
        Self::app_on(mock_server, page_url)
    }

    #[allow(unused)]
    pub async fn new_app() -> Self {
        Self::new_app_at("http://localhost/dashboard", users(3)).await
    }

    /// Full app against a server whose mocks the caller already mounted.
    #[allow(unused)]
    pub fn app_on(mock_server: MockServer, page_url: &str) -> Self {
        let state = State::new(
            BusinessConfig::new(mock_server.uri()),
            MemoryStorage::new().shared(),
            PageUrl::parse_or_default(page_url),
        );
        let app = TabulaApp::new(state);
        let harness = Harness::builder()
            .with_size(egui::vec2(1280.0, 1400.0))
            .build_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }
}

#[allow(unused)]
pub async fn start_server() -> MockServer {
    let _ = env_logger::builder().is_test(true).try_init();
    MockServer::start().await
}

/// Serve the same page for `/users` and `/users/search`.
#[allow(unused)]
pub async fn mount_users(mock_server: &MockServer, page: serde_json::Value) {
    for endpoint in ["/users", "/users/search"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
            .mount(mock_server)
            .await;
    }
}

/// A dummyjson users page with `count` users named `First0`, `First1`...
#[allow(unused)]
pub fn users(count: usize) -> serde_json::Value {
    let users: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": i + 1,
                "firstName": format!("First{i}"),
                "lastName": format!("Last{i}"),
                "age": 20 + i,
                "gender": if i % 2 == 0 { "female" } else { "male" },
                "email": format!("first{i}@example.com"),
                "status": if i % 3 == 2 { "inactive" } else { "active" }
            })
        })
        .collect();
    serde_json::json!({
        "users": users,
        "total": count,
        "skip": 0,
        "limit": count
    })
}
