//! Typed calls against the users resource.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api_client::{ApiClient, ApiError, RequestOptions};
use crate::entities::{User, UserResponse};
use crate::http::MultipartForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

impl PaginationParams {
    /// Query pairs for the set fields only.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page".to_owned(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_owned(), limit.to_string()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort".to_owned(), sort.clone()));
        }
        if let Some(order) = self.order {
            query.push(("order".to_owned(), order.as_str().to_owned()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarUploaded {
    pub avatar_url: String,
}

/// File attached by [`upload_avatar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

pub async fn get_users(
    client: &ApiClient,
    params: &PaginationParams,
) -> Result<UserResponse, ApiError> {
    client
        .get("/users", RequestOptions::with_params(params.to_query()))
        .await
}

pub async fn get_user(client: &ApiClient, id: &str) -> Result<User, ApiError> {
    client
        .get(&format!("/users/{id}"), RequestOptions::default())
        .await
}

pub async fn create_user(client: &ApiClient, user: &CreateUserDto) -> Result<User, ApiError> {
    client.post("/users", user, RequestOptions::default()).await
}

pub async fn update_user(
    client: &ApiClient,
    id: &str,
    user: &UpdateUserDto,
) -> Result<User, ApiError> {
    client
        .patch(&format!("/users/{id}"), user, RequestOptions::default())
        .await
}

/// Deleted entity as echoed by the server; `None` on `204 No Content`.
pub async fn delete_user(client: &ApiClient, id: &str) -> Result<Option<Value>, ApiError> {
    client
        .delete(&format!("/users/{id}"), RequestOptions::default())
        .await
}

pub async fn upload_avatar(
    client: &ApiClient,
    id: &str,
    file: AvatarFile,
) -> Result<AvatarUploaded, ApiError> {
    let form = MultipartForm::new().file("avatar", file.file_name, file.mime, file.bytes);
    client
        .upload(&format!("/users/{id}/avatar"), form, RequestOptions::default())
        .await
}

/// `GET /users/search?limit=&q=`.
pub async fn search_users(
    client: &ApiClient,
    query: &str,
    limit: u32,
) -> Result<UserResponse, ApiError> {
    let options = RequestOptions::with_params([
        ("limit".to_owned(), limit.to_string()),
        ("q".to_owned(), query.to_owned()),
    ]);
    client.get("/users/search", options).await
}

/// `GET /users?limit=`.
pub async fn list_users(client: &ApiClient, limit: u32) -> Result<UserResponse, ApiError> {
    let params = PaginationParams {
        limit: Some(limit),
        ..PaginationParams::default()
    };
    get_users(client, &params).await
}

/// `POST /users/add`, used by the creation form.
pub async fn add_user<B: Serialize + ?Sized>(client: &ApiClient, payload: &B) -> Result<User, ApiError> {
    client.post("/users/add", payload, RequestOptions::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BusinessConfig;
    use crate::storage::MemoryStorage;
    use crate::toast::Notifier;

    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApiClient {
        let (notifier, _toasts) = Notifier::channel();
        ApiClient::new(
            BusinessConfig::new(server.uri()),
            MemoryStorage::new().shared(),
            notifier,
        )
    }

    fn user_json(id: u64, first: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "firstName": first,
            "lastName": "Johnson",
            "age": 28,
            "gender": "female",
            "email": "emily.johnson@x.dummyjson.com"
        })
    }

    #[test]
    fn pagination_params_skip_unset_fields() {
        let params = PaginationParams {
            page: Some(2),
            order: Some(SortOrder::Desc),
            ..PaginationParams::default()
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("page".to_owned(), "2".to_owned()),
                ("order".to_owned(), "desc".to_owned())
            ]
        );
        assert!(PaginationParams::default().to_query().is_empty());
    }

    #[test]
    fn update_dto_omits_missing_fields() {
        let dto = UpdateUserDto {
            last_name: Some("Smith".to_owned()),
            ..UpdateUserDto::default()
        };
        assert_eq!(
            serde_json::to_value(&dto).expect("serializable"),
            serde_json::json!({"lastName": "Smith"})
        );
    }

    #[tokio::test]
    async fn get_users_sends_pagination_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("limit", "5"))
            .and(query_param("sort", "firstName"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "users": [user_json(1, "Emily")],
                "total": 208,
                "skip": 0,
                "limit": 5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = PaginationParams {
            limit: Some(5),
            sort: Some("firstName".to_owned()),
            ..PaginationParams::default()
        };
        let page = get_users(&client(&server), &params).await.expect("users");
        assert_eq!(page.total, 208);
        assert_eq!(page.users[0].first_name, "Emily");
    }

    #[tokio::test]
    async fn search_users_uses_search_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/search"))
            .and(query_param("q", "emily"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "users": [], "total": 0, "skip": 0, "limit": 10
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = search_users(&client(&server), "emily", 10)
            .await
            .expect("search");
        assert!(page.users.is_empty());
    }

    #[tokio::test]
    async fn update_user_patches_partial_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/1"))
            .and(body_json(serde_json::json!({"firstName": "Em"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "Em")))
            .expect(1)
            .mount(&server)
            .await;

        let dto = UpdateUserDto {
            first_name: Some("Em".to_owned()),
            ..UpdateUserDto::default()
        };
        let user = update_user(&client(&server), "1", &dto).await.expect("patched");
        assert_eq!(user.first_name, "Em");
    }

    #[tokio::test]
    async fn create_and_get_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(serde_json::json!({
                "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com", "age": "36"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(user_json(209, "Ada")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/209"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(209, "Ada")))
            .mount(&server)
            .await;

        let client = client(&server);
        let dto = CreateUserDto {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            age: "36".to_owned(),
        };
        let created = create_user(&client, &dto).await.expect("created");
        let fetched = get_user(&client, &created.id.to_string())
            .await
            .expect("fetched");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn delete_user_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let deleted = delete_user(&client(&server), "3").await.expect("deleted");
        assert_eq!(deleted, None);
    }

    #[tokio::test]
    async fn upload_avatar_returns_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/3/avatar"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"avatarUrl": "https://cdn/3.png"})),
            )
            .mount(&server)
            .await;

        let file = AvatarFile {
            file_name: "3.png".to_owned(),
            mime: "image/png".to_owned(),
            bytes: vec![1, 2, 3],
        };
        let uploaded = upload_avatar(&client(&server), "3", file)
            .await
            .expect("uploaded");
        assert_eq!(uploaded.avatar_url, "https://cdn/3.png");
    }
}
