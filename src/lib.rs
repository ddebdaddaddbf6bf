//! Typed blocking client for the Facturapi REST API (Mexican CFDI invoicing).
//!
//! Public API layers:
//! - [`Facturapi`]: facade that owns the connection and hands out resource clients.
//! - [`Dispatcher`]: URL building, authentication and request execution.
//! - [`resources`]: one client per API resource family (customers, invoices, ...).
//! - [`models`] and [`catalog`]: typed records, payloads and SAT code catalogs.
//! - [`ClientError`]: unified error type used by all clients.
//!
//! The dispatcher does not interpret HTTP statuses; resource clients turn
//! non-success responses into [`ClientError::Api`] before decoding JSON.

pub mod catalog;
mod client;
mod error;
pub mod http;
pub mod models;
pub mod resources;

/// Facade over every resource client.
pub use client::{API_KEY_ENV, API_VERSION_ENV, BASE_URL_ENV, Facturapi};
/// Error type returned by all client operations.
pub use error::ClientError;
/// Request dispatcher and its buffered response.
pub use http::{ApiResponse, DEFAULT_API_VERSION, DEFAULT_BASE_URL, Dispatcher};
/// Listing filters and the resource capability trait.
pub use resources::{ListParams, Resource};
