use std::time::Instant;

use reqwest::header::{HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{extract_server_message, AdminError, AdminResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

struct RawResponse {
    status: StatusCode,
    bytes: Vec<u8>,
}

/// JSON-over-HTTP access to the admin backend.
///
/// No retries: a failed call surfaces as an error and the user resubmits.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    lang: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> AdminResult<Self> {
        let base_url = normalize_base_url(&config.api_base_url)?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("danci-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AdminError::InvalidConfig(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token: config.api_token.clone().filter(|t| !t.trim().is_empty()),
            lang: config.lang.clone(),
        })
    }

    /// Client with default settings pointed at `base_url`.
    pub fn with_base_url(base_url: &str) -> AdminResult<Self> {
        let config = Config { api_base_url: base_url.to_string(), ..Config::default() };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let request_id = uuid::Uuid::new_v4().to_string();
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, &request_id);
        if let Ok(lang) = HeaderValue::from_str(&self.lang) {
            builder = builder.header(ACCEPT_LANGUAGE, lang);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        (builder, request_id)
    }

    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> AdminResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let (builder, request_id) = self.request(Method::GET, path);
        let body = self.send(builder.query(query), "GET", path, &request_id).await?;
        decode(&body)
    }

    pub async fn post_json<T, B>(&self, path: &str, payload: &B) -> AdminResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (builder, request_id) = self.request(Method::POST, path);
        let body = self.send(builder.json(payload), "POST", path, &request_id).await?;
        decode(&body)
    }

    pub async fn patch_json<T, B>(&self, path: &str, payload: &B) -> AdminResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (builder, request_id) = self.request(Method::PATCH, path);
        let body = self.send(builder.json(payload), "PATCH", path, &request_id).await?;
        decode(&body)
    }

    pub async fn delete(&self, path: &str) -> AdminResult<()> {
        let (builder, request_id) = self.request(Method::DELETE, path);
        self.send(builder, "DELETE", path, &request_id).await?;
        Ok(())
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        method: &'static str,
        path: &str,
        request_id: &str,
    ) -> AdminResult<RawResponse> {
        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            warn!(method, path, request_id, error = %e, "request failed");
            AdminError::Request(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(
            method,
            path,
            request_id,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend response"
        );

        if status.is_success() {
            return Ok(RawResponse { status, bytes: bytes.to_vec() });
        }

        let text = String::from_utf8_lossy(&bytes);
        let message = extract_server_message(&text);
        warn!(method, path, request_id, status = status.as_u16(), message = ?message, "backend error");
        Err(AdminError::api(status, message))
    }
}

fn decode<T: DeserializeOwned>(body: &RawResponse) -> AdminResult<T> {
    // 204 and empty bodies decode as JSON null, which fits `()` and `Option<_>`
    let bytes: &[u8] = if body.status == StatusCode::NO_CONTENT || body.bytes.is_empty() {
        b"null"
    } else {
        &body.bytes
    };
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::error!(error = %e, body = %String::from_utf8_lossy(bytes), "failed to decode backend JSON");
        AdminError::Json(e)
    })
}

fn normalize_base_url(raw: &str) -> AdminResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| AdminError::InvalidConfig(format!("invalid API base URL {trimmed:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AdminError::InvalidConfig(format!(
            "API base URL must be http(s), got {trimmed:?}"
        )));
    }
    Ok(trimmed.to_string())
}
