//! Request dispatcher shared by every resource client.
//!
//! The dispatcher owns the base URL, API version, credentials and the pooled
//! `reqwest` connection. It never turns an HTTP status into an error: callers
//! receive an [`ApiResponse`] and decide what the status means for them.

use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::ClientError;
use crate::catalog::DownloadFormat;

/// Host every endpoint is rooted at.
pub const DEFAULT_BASE_URL: &str = "https://www.facturapi.io/";

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v2";

const USER_AGENT: &str = concat!("facturapi-client/", env!("CARGO_PKG_VERSION"));

/// Query-string pairs forwarded on `GET` and `DELETE` requests.
pub type Query<'a> = [(&'a str, String)];

/// Blocking HTTP dispatcher for the Facturapi REST API.
///
/// One instance holds one connection pool and is meant to be reused for many
/// sequential calls. The status of the most recent response is kept in
/// [`Self::last_status`]; the same status is also carried by each
/// [`ApiResponse`], which is the race-free way to read it.
pub struct Dispatcher {
    base_url: Url,
    api_version: String,
    api_key: String,
    timeout: Option<Duration>,
    http: reqwest::blocking::Client,
    last_status: AtomicU16,
}

impl Dispatcher {
    /// Creates a dispatcher for [`DEFAULT_BASE_URL`] and [`DEFAULT_API_VERSION`].
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            api_version: DEFAULT_API_VERSION.to_owned(),
            api_key: api_key.into(),
            timeout: None,
            http,
            last_status: AtomicU16::new(0),
        })
    }

    /// Points the dispatcher at another host, e.g. a local mock.
    ///
    /// The URL is normalized to include a trailing slash.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        self.base_url = parse_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Overrides the API version tag inserted after the base URL.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Applies a total request timeout to every call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the configured API version, failing when it is blank.
    pub fn api_version(&self) -> Result<&str, ClientError> {
        let version = self.api_version.trim();
        if version.is_empty() {
            return Err(ClientError::MissingApiVersion);
        }
        Ok(version)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Status code of the most recent response, if any request has completed.
    ///
    /// Transport failures leave the previous value untouched.
    pub fn last_status(&self) -> Option<StatusCode> {
        match self.last_status.load(Ordering::Relaxed) {
            0 => None,
            code => StatusCode::from_u16(code).ok(),
        }
    }

    /// Builds `<base>/<version>/<endpoint>/<segments joined by '/'>`.
    ///
    /// An empty segment list leaves a trailing slash after the endpoint.
    /// Segments are percent-encoded individually.
    pub fn build_url(&self, endpoint: &str, segments: &[&str]) -> Result<Url, ClientError> {
        let version = self.api_version()?;
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty().push(version).push(endpoint);
            if segments.is_empty() {
                path.push("");
            } else {
                path.extend(segments);
            }
        }
        Ok(url)
    }

    /// URL of a file download: `<endpoint>/<id>/<format>`.
    pub fn download_url(
        &self,
        endpoint: &str,
        format: DownloadFormat,
        object_id: &str,
    ) -> Result<Url, ClientError> {
        self.build_url(endpoint, &[object_id, format.as_str()])
    }

    /// Sends a `GET` request with optional query parameters.
    pub fn get(&self, url: Url, query: &Query<'_>) -> Result<ApiResponse, ClientError> {
        self.execute(Method::GET, url, query, None)
    }

    /// Sends a `POST` request with an optional JSON body.
    pub fn post(&self, url: Url, body: Option<&Value>) -> Result<ApiResponse, ClientError> {
        self.execute(Method::POST, url, &[], body)
    }

    /// Sends a `PUT` request with an optional JSON body.
    pub fn put(&self, url: Url, body: Option<&Value>) -> Result<ApiResponse, ClientError> {
        self.execute(Method::PUT, url, &[], body)
    }

    /// Sends a `DELETE` request with optional query parameters.
    pub fn delete(&self, url: Url, query: &Query<'_>) -> Result<ApiResponse, ClientError> {
        self.execute(Method::DELETE, url, query, None)
    }

    /// Executes one request and returns the buffered response, whatever its status.
    ///
    /// `query` is sent for `GET`/`DELETE`, `body` for `POST`/`PUT`. Any other
    /// method fails with [`ClientError::UnsupportedMethod`] before touching
    /// the network.
    #[instrument(skip_all, fields(method = %method, url = %url))]
    pub fn execute(
        &self,
        method: Method,
        url: Url,
        query: &Query<'_>,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ClientError> {
        let sends_query = match method.as_str() {
            "GET" | "DELETE" => true,
            "POST" | "PUT" => false,
            other => return Err(ClientError::UnsupportedMethod(other.to_owned())),
        };

        let mut request = self
            .http
            .request(method, url)
            .basic_auth(&self.api_key, None::<&str>)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if sends_query {
            if !query.is_empty() {
                request = request.query(query);
            }
        } else if let Some(json_body) = body {
            request = request.json(json_body);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        debug!("dispatching request");
        let response = request.send().inspect_err(|error| {
            warn!(%error, "transport failure");
        })?;

        let status = response.status();
        self.last_status.store(status.as_u16(), Ordering::Relaxed);
        let payload = response.bytes()?.to_vec();
        debug!(status = status.as_u16(), bytes = payload.len(), "response received");

        Ok(ApiResponse::new(status, payload))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .field("last_status", &self.last_status())
            .finish_non_exhaustive()
    }
}

/// A fully buffered API response.
///
/// Standard resource calls carry JSON; file downloads carry PDF/ZIP bytes or
/// XML text, so the body is kept raw until the caller picks a representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as JSON.
    ///
    /// An empty body is treated as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The `message` field of a JSON error body, if present.
    pub fn error_message(&self) -> Option<String> {
        let value: Value = serde_json::from_slice(&self.body).ok()?;
        value.get("message")?.as_str().map(str::to_owned)
    }

    /// Turns a non-success status into an error.
    ///
    /// 401 maps to [`ClientError::Unauthorized`]; every other non-2xx status
    /// maps to [`ClientError::Api`] carrying the API's `message`, or the raw
    /// body when the API sent none.
    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.is_success() {
            return Ok(self);
        }

        warn!(status = self.status.as_u16(), "API returned an error status");
        if self.status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let message = self.error_message().unwrap_or_else(|| self.text());
        Err(ClientError::Api {
            status: self.status,
            message,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let parsed = Url::parse(raw).map_err(|_| ClientError::InvalidBaseUrl(raw.to_owned()))?;
    if parsed.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(ensure_trailing_slash(parsed))
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let mut path = url.path().to_owned();
        path.push('/');
        url.set_path(&path);
    }
    url
}
