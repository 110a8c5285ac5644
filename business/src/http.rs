//! Thin transport over `reqwest`.
//!
//! Requests are described by a cloneable [`RequestBuilder`]; [`RequestBuilder::send`] returns a
//! [`Response`] holding only owned data (status, lowercased headers, body bytes), so results can
//! cross channels and live in state snapshots. Response negotiation lives in
//! [`crate::api_client`].

use std::collections::HashMap;

/// HTTP method for requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simplified HTTP response that contains only Send-safe data.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Response headers (lowercased keys)
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failure (connection refused, DNS, broken body stream).
#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP error: {}", self.message)
    }
}

impl std::error::Error for HttpError {}

pub type HttpResult<T> = Result<T, HttpError>;

/// One file of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    pub name: String,
    pub file_name: Option<String>,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

/// Owned description of a multipart body; converted to `reqwest::multipart::Form` on send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<MultipartPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            file_name: Some(file_name.into()),
            mime: Some(mime.into()),
            bytes: bytes.into(),
        });
        self
    }

    fn into_reqwest(self) -> HttpResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            let mut body = reqwest::multipart::Part::bytes(part.bytes);
            if let Some(file_name) = part.file_name {
                body = body.file_name(file_name);
            }
            if let Some(mime) = part.mime {
                body = body
                    .mime_str(&mime)
                    .map_err(|e| HttpError::new(format!("invalid mime type {mime}: {e}")))?;
            }
            form = form.part(part.name, body);
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Bytes(Vec<u8>),
    Multipart(MultipartForm),
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    body: Option<Body>,
}

impl RequestBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Header names are stored lowercased so later values replace earlier ones.
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_lowercase(), value.into());
        self
    }

    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self = self.header(name, value);
        }
        self
    }

    pub fn remove_header(mut self, name: &str) -> Self {
        self.headers.remove(&name.to_lowercase());
        self
    }

    pub fn query<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        let json_bytes = serde_json::to_vec(value)?;
        self.body = Some(Body::Bytes(json_bytes));
        Ok(self.header("content-type", "application/json"))
    }

    /// `content-type` (with boundary) is set by the transport; any explicit one is dropped.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(Body::Multipart(form));
        self.remove_header("content-type")
    }

    pub async fn send(self) -> HttpResult<Response> {
        let client = reqwest::Client::new();

        let mut request = match self.method {
            Method::Get => client.get(&self.url),
            Method::Post => client.post(&self.url),
            Method::Put => client.put(&self.url),
            Method::Patch => client.patch(&self.url),
            Method::Delete => client.delete(&self.url),
        };

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }

        let is_multipart = matches!(self.body, Some(Body::Multipart(_)));
        for (name, value) in &self.headers {
            if is_multipart && name == "content-type" {
                continue;
            }
            request = request.header(name, value);
        }

        match self.body {
            Some(Body::Bytes(bytes)) => request = request.body(bytes),
            Some(Body::Multipart(form)) => request = request.multipart(form.into_reqwest()?),
            None => {}
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        // Extract status and headers before consuming the response
        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), v.to_owned());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?
            .to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

/// Entry point for building requests.
///
/// ```ignore
/// let response = Client::request(Method::Get, "https://dummyjson.com/users")
///     .query([("limit", "10")])
///     .send()
///     .await?;
/// ```
pub struct Client;

impl Client {
    pub fn request(method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        let mut response = Response {
            status: 204,
            headers: HashMap::new(),
            body: Vec::new(),
        };
        assert!(response.is_success());

        response.status = 404;
        assert!(!response.is_success());
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_owned(), "application/json".to_owned());

        let response = Response {
            status: 200,
            headers,
            body: Vec::new(),
        };

        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_later_header_overrides_earlier_regardless_of_case() {
        let builder = Client::request(Method::Get, "https://example.com")
            .header("Content-Type", "application/json")
            .header("content-type", "text/plain");

        assert_eq!(builder.headers.len(), 1);
        assert_eq!(builder.headers["content-type"], "text/plain");
    }

    #[test]
    fn test_request_builder_json_sets_content_type() {
        #[derive(serde::Serialize)]
        struct TestBody {
            name: String,
        }

        let builder = Client::request(Method::Post, "https://example.com")
            .header("Content-Type", "text/plain")
            .json(&TestBody {
                name: "test".to_owned(),
            })
            .expect("serializable body");

        assert_eq!(builder.headers["content-type"], "application/json");
        assert_eq!(builder.body, Some(Body::Bytes(br#"{"name":"test"}"#.to_vec())));
    }

    #[test]
    fn test_multipart_drops_explicit_content_type() {
        let form = MultipartForm::new().file("avatar", "me.png", "image/png", vec![1, 2, 3]);
        let builder = Client::request(Method::Post, "https://example.com")
            .header("content-type", "application/json")
            .multipart(form);

        assert!(!builder.headers.contains_key("content-type"));
        match builder.body {
            Some(Body::Multipart(form)) => {
                assert_eq!(form.parts.len(), 1);
                assert_eq!(form.parts[0].file_name.as_deref(), Some("me.png"));
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn test_query_pairs_preserve_order() {
        let builder = Client::request(Method::Get, "https://example.com/users/search")
            .query([("limit", "10"), ("q", "john")]);
        assert_eq!(
            builder.query,
            [
                ("limit".to_owned(), "10".to_owned()),
                ("q".to_owned(), "john".to_owned())
            ]
        );
    }
}
