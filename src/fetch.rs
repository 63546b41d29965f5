//! Request executor shared by every service
//!
//! [`Fetch::request`] is the single place requests leave the client. It
//! attaches the session credential, serializes the body and folds every
//! outcome (success, server-reported failure, transport failure) into an
//! [`ApiResponse`]. Nothing past this boundary needs to handle network errors.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::ClientOptions;
use crate::session::SessionStore;

/// HTTP methods the API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Options for a single request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// The HTTP method
    pub method: HttpMethod,

    /// Extra headers, applied on top of the defaults
    pub headers: HashMap<String, String>,

    /// JSON body. Ignored for GET requests.
    pub body: Option<Value>,

    /// Whether to attach the session credential
    pub requires_auth: bool,
}

impl RequestOptions {
    /// Create options for `method`, requiring auth
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            headers: HashMap::new(),
            body: None,
            requires_auth: true,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Set the JSON body
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set whether the session credential is attached
    pub fn requires_auth(mut self, value: bool) -> Self {
        self.requires_auth = value;
        self
    }
}

/// The uniform result of every request.
///
/// Exactly one of `data` and `error` is set. `status` is the HTTP status, or
/// `0` when no response was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub status: u16,
}

impl<T> ApiResponse<T> {
    /// A successful response
    pub fn success(status: u16, data: Option<T>) -> Self {
        Self {
            data,
            error: None,
            status,
        }
    }

    /// A failed response
    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            status,
        }
    }

    /// A failure where no response was obtained
    pub fn transport(error: impl Into<String>) -> Self {
        Self::failure(0, error)
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, keeping the error message
    pub fn into_result(self) -> Result<Option<T>, String> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }

    /// Map the payload, keeping status and error
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            data: self.data.map(f),
            error: self.error,
            status: self.status,
        }
    }
}

/// Acknowledgement returned by mutations, e.g. `{"message": "group archived successfully"}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessage {
    pub message: String,
}

/// Request executor bound to one API root and one session store
pub struct Fetch {
    client: Client,
    options: ClientOptions,
    session: Arc<dyn SessionStore>,
}

impl Fetch {
    /// Create a new executor
    pub fn new(client: Client, options: ClientOptions, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            options,
            session,
        }
    }

    /// The session store credentials are read from
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// The client options
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Full URL for an endpoint path (which may carry a query string)
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.options.base_url, endpoint)
    }

    /// Send one request and fold the outcome into an envelope.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResponse<T> {
        let url = match Url::parse(&self.url_for(endpoint)) {
            Ok(url) => url,
            Err(err) => {
                error!("API request error: {}", err);
                return ApiResponse::transport(err.to_string());
            }
        };

        let headers = self.build_headers(&options);

        let mut req = self
            .client
            .request(options.method.into(), url)
            .headers(headers);

        if let Some(timeout) = self.options.request_timeout {
            req = req.timeout(timeout);
        }

        if options.method != HttpMethod::Get {
            if let Some(body) = &options.body {
                match serde_json::to_vec(body) {
                    Ok(bytes) => req = req.body(bytes),
                    Err(err) => {
                        error!("API request error: {}", err);
                        return ApiResponse::transport(err.to_string());
                    }
                }
            }
        }

        debug!(method = options.method.as_str(), endpoint, "sending API request");

        let response = match req.send().await {
            Ok(response) => response,
            Err(err) => {
                error!("API request error: {}", err);
                return ApiResponse::transport(err.to_string());
            }
        };

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);

        let payload = if is_json {
            match response.bytes().await {
                Ok(bytes) => serde_json::from_slice::<Value>(&bytes).unwrap_or_else(|_| empty_object()),
                Err(err) => {
                    warn!("Failed to read response body from {}: {}", endpoint, err);
                    empty_object()
                }
            }
        } else {
            empty_object()
        };

        if status.is_success() {
            match serde_json::from_value::<T>(payload) {
                Ok(data) => ApiResponse::success(status.as_u16(), Some(data)),
                Err(err) => {
                    warn!("Unexpected response shape from {}: {}", endpoint, err);
                    ApiResponse::failure(status.as_u16(), format!("unexpected response: {}", err))
                }
            }
        } else {
            let message = payload
                .get("error")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!(
                        "Error {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown Status")
                    )
                });
            debug!(status = status.as_u16(), endpoint, "API request failed");
            ApiResponse::failure(status.as_u16(), message)
        }
    }

    fn build_headers(&self, options: &RequestOptions) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&self.options.client_info) {
            headers.insert("x-client-info", value);
        }

        for (name, value) in &options.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("Skipping invalid header {}", name),
            }
        }

        if options.requires_auth {
            if let Some(token) = self.session.get() {
                if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                    headers.insert(AUTHORIZATION, value);
                }
            }
        }

        headers
    }

    /// Send a GET request
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, requires_auth: bool) -> ApiResponse<T> {
        let options = RequestOptions::new(HttpMethod::Get).requires_auth(requires_auth);
        self.request(endpoint, options).await
    }

    /// Send a POST request with a JSON body
    pub async fn post<T, B>(&self, endpoint: &str, body: &B, requires_auth: bool) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.with_body(HttpMethod::Post, endpoint, body, requires_auth)
            .await
    }

    /// Send a PUT request with a JSON body
    pub async fn put<T, B>(&self, endpoint: &str, body: &B, requires_auth: bool) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.with_body(HttpMethod::Put, endpoint, body, requires_auth)
            .await
    }

    /// Send a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str, requires_auth: bool) -> ApiResponse<T> {
        let options = RequestOptions::new(HttpMethod::Delete).requires_auth(requires_auth);
        self.request(endpoint, options).await
    }

    async fn with_body<T, B>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
        requires_auth: bool,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(err) => {
                error!("API request error: {}", err);
                return ApiResponse::transport(err.to_string());
            }
        };
        let options = RequestOptions::new(method)
            .body(body)
            .requires_auth(requires_auth);
        self.request(endpoint, options).await
    }
}

/// Encode a value for use as a single path segment
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}
