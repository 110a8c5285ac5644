//! JSON REST client.
//!
//! Every call goes through [`ApiClient::request`]:
//! - default headers (`content-type: application/json`, bearer token from [`TokenStorage`]),
//!   overridden by per-call headers
//! - optional timeout; an elapsed timeout drops the in-flight request
//! - response negotiation on `content-type`
//!
//! JSON error bodies raise exactly one error toast before the error is returned. Plain-text
//! errors are returned without a toast.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use bon::Builder;
use log::{debug, error};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tabula_states::{State, state_assign_impl};
use thiserror::Error;

use crate::BusinessConfig;
use crate::http::{Client, HttpError, Method, MultipartForm, Response};
use crate::storage::TokenStorage;
use crate::toast::Notifier;

/// Message used when an error response carries none.
pub const FALLBACK_ERROR_MESSAGE: &str = "API Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message} (status {status})")]
    Http {
        status: u16,
        message: String,
        payload: Option<Value>,
    },
    #[error("Request timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("Invalid response type")]
    InvalidResponseType,
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        Self::Network(err.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// Per-call options.
#[derive(Debug, Clone, Default, Builder)]
pub struct RequestOptions {
    /// Query parameters, appended in order.
    #[builder(default)]
    pub params: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    /// Extra headers; these win over the defaults.
    #[builder(default)]
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_params<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: BusinessConfig,
    storage: Arc<dyn TokenStorage>,
    notifier: Notifier,
}

impl ApiClient {
    pub fn new(config: BusinessConfig, storage: Arc<dyn TokenStorage>, notifier: Notifier) -> Self {
        Self {
            config,
            storage,
            notifier,
        }
    }

    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn TokenStorage> {
        &self.storage
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Absolute URLs are used as is; anything else is joined onto the configured base URL.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_owned()
        } else {
            self.config.endpoint(path)
        }
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url_for(path);
        debug!("ApiClient: {method} {url}");
        match self.execute(method, &url, body, options).await {
            Ok(value) => Ok(value),
            Err(err) => {
                error!("API request failed: {method} {url}: {err}");
                Err(err)
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::Get, path, RequestBody::Empty, options)
            .await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = json_body(body)?;
        self.request(Method::Post, path, body, options).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = json_body(body)?;
        self.request(Method::Put, path, body, options).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = json_body(body)?;
        self.request(Method::Patch, path, body, options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::Delete, path, RequestBody::Empty, options)
            .await
    }

    /// `POST` a `multipart/form-data` body.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::Post, path, RequestBody::Multipart(form), options)
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let mut builder = Client::request(method, url).query(options.params);

        if !matches!(body, RequestBody::Multipart(_)) {
            builder = builder.header("content-type", "application/json");
        }
        if let Some(token) = self.storage.token() {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        builder = builder.headers(options.headers);

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value).map_err(ApiError::Serialize)?,
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = match options.timeout {
            Some(limit) => tokio::time::timeout(limit, builder.send())
                .await
                .map_err(|_elapsed| ApiError::Timeout)??,
            None => builder.send().await?,
        };

        self.negotiate(&response)
    }

    fn negotiate<T: DeserializeOwned>(&self, response: &Response) -> Result<T, ApiError> {
        let content_type = response
            .header("content-type")
            .unwrap_or_default()
            .to_lowercase();

        if content_type.contains("application/json") {
            let data: Value = response.json().map_err(ApiError::Decode)?;
            if !response.is_success() {
                let message = data
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(FALLBACK_ERROR_MESSAGE)
                    .to_owned();
                self.notifier.error(message.clone());
                return Err(ApiError::Http {
                    status: response.status,
                    message,
                    payload: Some(data),
                });
            }
            return serde_json::from_value(data).map_err(ApiError::Decode);
        }

        if content_type.contains("text/plain") {
            let text = String::from_utf8_lossy(&response.body).into_owned();
            if !response.is_success() {
                let message = if text.is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_owned()
                } else {
                    text
                };
                return Err(ApiError::Http {
                    status: response.status,
                    message,
                    payload: None,
                });
            }
            return serde_json::from_value(Value::String(text)).map_err(ApiError::Decode);
        }

        if response.status == 204 {
            return serde_json::from_value(Value::Null).map_err(ApiError::Decode);
        }

        Err(ApiError::InvalidResponseType)
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ApiError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(ApiError::Serialize)
}

impl State for ApiClient {
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
