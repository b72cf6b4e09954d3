//! HTTP transport for the Ark API
//!
//! [`ApiClient`] is the seam every resource service is written against: a
//! JSON-in, JSON-out transport with `get`, `post`, `put` and `delete`.
//! [`HttpApiClient`] is the reqwest-backed implementation used by the
//! binaries; tests substitute an in-memory double.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Trait for Ark API transports
///
/// Paths are absolute API paths such as `/api/v1/namespaces/default/tools`.
/// Implementations report transport failures and non-success responses as
/// [`ApiError`]; callers are expected to propagate them unchanged.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issue a GET and return the decoded JSON body
    async fn get(&self, path: &str) -> ApiResult<Value>;

    /// Issue a POST with a JSON body and return the decoded JSON response
    ///
    /// An empty response body is returned as `Value::Null`.
    async fn post(&self, path: &str, body: &Value) -> ApiResult<Value>;

    /// Issue a PUT with a JSON body and return the decoded JSON response
    async fn put(&self, path: &str, body: &Value) -> ApiResult<Value>;

    /// Issue a DELETE, discarding any response body
    async fn delete(&self, path: &str) -> ApiResult<()>;
}

#[async_trait]
impl<T: ApiClient + ?Sized> ApiClient for Arc<T> {
    async fn get(&self, path: &str) -> ApiResult<Value> {
        (**self).get(path).await
    }

    async fn post(&self, path: &str, body: &Value) -> ApiResult<Value> {
        (**self).post(path, body).await
    }

    async fn put(&self, path: &str, body: &Value) -> ApiResult<Value> {
        (**self).put(path, body).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        (**self).delete(path).await
    }
}

#[async_trait]
impl<T: ApiClient + ?Sized> ApiClient for &T {
    async fn get(&self, path: &str) -> ApiResult<Value> {
        (**self).get(path).await
    }

    async fn post(&self, path: &str, body: &Value) -> ApiResult<Value> {
        (**self).post(path, body).await
    }

    async fn put(&self, path: &str, body: &Value) -> ApiResult<Value> {
        (**self).put(path, body).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        (**self).delete(path).await
    }
}

/// reqwest-backed [`ApiClient`]
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
}

impl HttpApiClient {
    /// Build a client from connection settings
    ///
    /// Fails if the base URL does not parse or the token is not a valid
    /// header value.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(ref token) = config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Config(format!("invalid API token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(concat!("ark-common/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path against the base URL, keeping any path prefix
    fn url(&self, path: &str) -> ApiResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }
}

/// Turn a non-success response into [`ApiError::Status`], passing others through
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), body = %body, "Ark API request failed");
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Decode a success response body, treating an empty body as `null`
async fn read_json(response: Response) -> ApiResult<Value> {
    let response = check_status(response).await?;
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl ApiClient for HttpApiClient {
    #[instrument(skip(self))]
    async fn get(&self, path: &str) -> ApiResult<Value> {
        let url = self.url(path)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    #[instrument(skip(self, body))]
    async fn post(&self, path: &str, body: &Value) -> ApiResult<Value> {
        let url = self.url(path)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        read_json(response).await
    }

    #[instrument(skip(self, body))]
    async fn put(&self, path: &str, body: &Value) -> ApiResult<Value> {
        let url = self.url(path)?;
        debug!(%url, "PUT");
        let response = self.client.put(url).json(body).send().await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.url(path)?;
        debug!(%url, "DELETE");
        let response = self.client.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
