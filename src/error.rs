use thiserror::Error;

/// Errors returned by Facturapi client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is not a valid absolute URL that can carry path segments.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// A required environment variable is missing or empty.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// The API version tag was empty when a request URL was built.
    #[error("api_version must be defined")]
    MissingApiVersion,

    /// The dispatcher only speaks `GET`, `POST`, `PUT` and `DELETE`.
    #[error("unsupported HTTP method '{0}'")]
    UnsupportedMethod(String),

    /// HTTP transport-layer request failure (connection, DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body could not be parsed as JSON, or a payload could not be encoded.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The API rejected the credentials (HTTP 401).
    #[error("invalid API key")]
    Unauthorized,

    /// Non-success HTTP status, with the API's `message` when one was sent.
    #[error("API returned status {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    /// A code that is not part of the corresponding SAT catalog.
    #[error("'{code}' is not a valid {catalog} code")]
    InvalidCatalogCode {
        catalog: &'static str,
        code: String,
    },
}
