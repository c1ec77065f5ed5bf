//! # Juice WRLD API Client
//!
//! This module is the integration layer between the crate and the Juice WRLD
//! discography API. It owns the HTTP transport and exposes every endpoint as an
//! async method on [`Client`].
//!
//! ## Architecture
//!
//! ```text
//! Caller (library user, CLI)
//!          ↓
//! Client operations
//!     ├── Catalog (artists, albums, songs, eras, stats, categories, player)
//!     ├── Search (offset/limit → page mapping)
//!     ├── Files (browse, info, download, cover art, zip selection)
//!     ├── Playback (stream URL resolution by range probing)
//!     └── Jobs (server-side zip archive lifecycle)
//!          ↓
//! Transport (headers, status → error mapping, JSON decoding, cancellation)
//!          ↓
//! HTTP Layer (reqwest)
//! ```
//!
//! ## Core Modules
//!
//! - [`catalog`] - Typed read-through access to the discography records
//! - [`search`] - Free-text search mapped onto the paginated song listing
//! - [`files`] - Remote file browsing and raw byte downloads
//! - [`playback`] - Song playback URL resolution and stream probing
//! - [`jobs`] - Fire-and-poll archive job protocol
//! - [`templates`] - Candidate storage path layouts used by playback resolution
//!
//! ## Error Handling
//!
//! Every non-success status is mapped exactly once, in the transport:
//! - **429** → [`Error::RateLimited`]
//! - **404** → [`Error::NotFound`]
//! - **401** → [`Error::Unauthenticated`]
//! - **other ≥ 400** → [`Error::Api`]
//!
//! Network failures, malformed JSON and cancellation stay distinct transport
//! errors. There is deliberately no retry logic; callers own their backoff.
//!
//! ## Cancellation
//!
//! Each operation takes a caller-owned [`CancellationToken`]. The transport races
//! the in-flight request (send and body read) against the token; when the token
//! wins the request future is dropped and [`Error::Cancelled`] is returned.
//!
//! ## Thread Safety
//!
//! [`Client`] is cheap to clone and safe to share across tasks. The only shared
//! state is reqwest's connection pool.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use juicewrld::Client;
//! use tokio_util::sync::CancellationToken;
//!
//! let client = Client::new()?;
//! let cancel = CancellationToken::new();
//! let playback = client.play_song(&cancel, 42).await?;
//! if playback.is_verified() {
//!     println!("{}", playback.stream_url.unwrap_or_default());
//! }
//! client.close();
//! ```

pub mod catalog;
pub mod files;
pub mod jobs;
pub mod playback;
pub mod search;
pub mod templates;

use std::{future::Future, time::Duration};

use bytes::Bytes;
use reqwest::{
    Method, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, RANGE, USER_AGENT},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    config,
    error::{Error, Result},
};

pub use catalog::SongsQuery;
pub use search::SearchQuery;
pub use templates::PathTemplates;

/// First path segment of every API endpoint.
pub const API_PREFIX: &str = "juicewrld";

/// `Accept` value sent with every request, including downloads and probes.
pub const ACCEPT_JSON: &str = "application/json";

/// Query parameters as ordered key/value pairs.
pub type Query = Vec<(&'static str, String)>;

/// HTTP client for the Juice WRLD API.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    user_agent: HeaderValue,
    templates: PathTemplates,
}

impl Client {
    /// Client with default settings against the public API.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Client configured from the environment (see [`crate::config`]).
    pub fn from_env() -> Result<Self> {
        Self::builder()
            .base_url(config::api_url())
            .timeout(config::request_timeout())
            .user_agent(config::user_agent())
            .build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn path_templates(&self) -> &PathTemplates {
        &self.templates
    }

    /// Releases this handle's share of the connection pool.
    ///
    /// Idle pooled connections are closed once the last clone of the client is
    /// closed or dropped.
    pub fn close(self) {
        tracing::debug!(base_url = %self.base_url, "closing client");
        drop(self.http);
    }

    /// Absolute URL for an API endpoint: `<base>/juicewrld/<segments...>/?<query>`.
    ///
    /// Segments are percent-encoded individually and the path always ends with `/`.
    pub fn endpoint_url(&self, segments: &[&str], query: &[(&'static str, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::validation(format!("base URL cannot carry a path: {}", self.base_url)))?;
            path.pop_if_empty();
            path.push(API_PREFIX);
            path.extend(segments);
            path.push("");
        }

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Direct download URL for a storage path, as handed to players.
    pub fn download_url(&self, file_path: &str) -> Result<String> {
        let url = self.endpoint_url(&["files", "download"], &[("path", file_path.to_string())])?;
        Ok(url.to_string())
    }

    pub(crate) fn build(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<RequestBuilder> {
        let url = self.endpoint_url(segments, query)?;
        tracing::debug!(%method, %url, "api request");

        let mut request = self.with_headers(self.http.request(method, url));
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request)
    }

    // Set per request so an injected reqwest client sends them too.
    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(ACCEPT, HeaderValue::from_static(ACCEPT_JSON))
            .header(USER_AGENT, self.user_agent.clone())
    }

    /// Sends a request and maps any status >= 400 onto the error taxonomy.
    pub(crate) async fn send(&self, cancel: &CancellationToken, request: RequestBuilder) -> Result<Response> {
        let response = cancellable(cancel, async { request.send().await.map_err(Error::from) }).await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let message = cancellable(cancel, async { Ok::<_, Error>(response.text().await.unwrap_or_default()) }).await?;
            tracing::debug!(status = status.as_u16(), "api error response");
            return Err(Error::from_status(status, message));
        }

        Ok(response)
    }

    /// Sends a request and parses the 2xx body as JSON into `T`.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        segments: &[&str],
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<T> {
        let request = self.build(method, segments, query, body)?;
        let response = self.send(cancel, request).await?;
        let bytes = cancellable(cancel, async { response.bytes().await.map_err(Error::from) }).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends a request and discards the 2xx body.
    pub(crate) async fn request_empty(
        &self,
        cancel: &CancellationToken,
        method: Method,
        segments: &[&str],
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<()> {
        let request = self.build(method, segments, query, body)?;
        let response = self.send(cancel, request).await?;
        cancellable(cancel, async { response.bytes().await.map_err(Error::from) }).await?;
        Ok(())
    }

    /// Sends a request and returns the raw 2xx body.
    pub(crate) async fn request_bytes(
        &self,
        cancel: &CancellationToken,
        method: Method,
        segments: &[&str],
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<Bytes> {
        let request = self.build(method, segments, query, body)?;
        let response = self.send(cancel, request).await?;
        cancellable(cancel, async { response.bytes().await.map_err(Error::from) }).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<T> {
        self.request(cancel, Method::GET, segments, query, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<T> {
        self.request(cancel, Method::POST, segments, &[], body).await
    }

    /// Range probe: requests only the first byte of `url` and reports status and headers.
    pub(crate) async fn probe(&self, cancel: &CancellationToken, url: &str) -> Result<Probe> {
        let request = self.with_headers(self.http.get(url)).header(RANGE, "bytes=0-0");
        let response = cancellable(cancel, async { request.send().await.map_err(Error::from) }).await?;
        Ok(Probe {
            status: response.status(),
            headers: response.headers().clone(),
        })
    }
}

/// Status and headers of a range probe.
#[derive(Debug, Clone)]
pub(crate) struct Probe {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl Probe {
    pub fn is_available(&self) -> bool {
        self.status == StatusCode::OK || self.status == StatusCode::PARTIAL_CONTENT
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

/// Runs `fut` unless `cancel` fires first.
pub(crate) async fn cancellable<F, T>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = fut => result,
    }
}

/// Builder for configuring a [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<reqwest::Client>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    templates: PathTemplates,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: config::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
            user_agent: config::DEFAULT_USER_AGENT.to_string(),
            templates: PathTemplates::default(),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured reqwest client. The timeout of this builder is then
    /// ignored; `Accept` and User-Agent are still sent with every request.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the API base address. An empty value keeps the default.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.trim().is_empty() {
            self.base_url = url;
        }
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the storage layouts probed by playback resolution.
    pub fn path_templates(mut self, templates: PathTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(self.base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::validation(format!("invalid base URL: {}", self.base_url)));
        }

        let user_agent = HeaderValue::from_str(self.user_agent.trim())
            .map_err(|_| Error::validation(format!("invalid user agent: {}", self.user_agent)))?;

        let http = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder().timeout(self.timeout).build()?,
        };

        Ok(Client {
            http,
            base_url,
            user_agent,
            templates: self.templates,
        })
    }
}
