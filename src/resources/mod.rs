//! One client per API resource family.
//!
//! A resource client is anything that names a fixed endpoint and can hand out
//! a [`Dispatcher`]; the [`Resource`] trait supplies URL building and the
//! JSON request helpers on top of those two facts. Clients borrow the
//! dispatcher, so they are cheap to create on every call.

pub mod catalogs;
pub mod customers;
pub mod invoices;
pub mod organizations;
pub mod products;
pub mod receipts;
pub mod retentions;
pub mod tools;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::ClientError;
use crate::http::{ApiResponse, Dispatcher, Query};

/// Capability shared by all resource clients.
pub trait Resource {
    /// Path segment right after the API version, e.g. `customers`.
    const ENDPOINT: &'static str;

    fn dispatcher(&self) -> &Dispatcher;

    /// `<base>/<version>/<ENDPOINT>/<segments>`.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        self.dispatcher().build_url(Self::ENDPOINT, segments)
    }

    /// Status of the latest response seen by the underlying dispatcher.
    fn last_status(&self) -> Option<StatusCode> {
        self.dispatcher().last_status()
    }

    /// `GET` and decode a JSON success body.
    fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &Query<'_>,
    ) -> Result<T, ClientError> {
        decode(self.dispatcher().get(self.url(segments)?, query)?)
    }

    /// `POST` a serializable payload and decode a JSON success body.
    fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        payload: Option<&B>,
    ) -> Result<T, ClientError> {
        let body = payload.map(serde_json::to_value).transpose()?;
        decode(self.dispatcher().post(self.url(segments)?, body.as_ref())?)
    }

    /// `PUT` a serializable payload and decode a JSON success body.
    fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        payload: Option<&B>,
    ) -> Result<T, ClientError> {
        let body = payload.map(serde_json::to_value).transpose()?;
        decode(self.dispatcher().put(self.url(segments)?, body.as_ref())?)
    }

    /// `DELETE` and decode a JSON success body.
    fn delete_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &Query<'_>,
    ) -> Result<T, ClientError> {
        decode(self.dispatcher().delete(self.url(segments)?, query)?)
    }

    /// `GET` a file body, failing on non-success statuses.
    fn get_raw(&self, segments: &[&str]) -> Result<ApiResponse, ClientError> {
        self.dispatcher()
            .get(self.url(segments)?, &[])?
            .error_for_status()
    }
}

fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ClientError> {
    response.error_for_status()?.json()
}

/// Declares a borrowed resource client struct bound to `$endpoint`.
macro_rules! resource_client {
    ($(#[$meta:meta])* $name:ident => $endpoint:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name<'a> {
            dispatcher: &'a $crate::http::Dispatcher,
        }

        impl<'a> $name<'a> {
            pub fn new(dispatcher: &'a $crate::http::Dispatcher) -> Self {
                Self { dispatcher }
            }
        }

        impl $crate::resources::Resource for $name<'_> {
            const ENDPOINT: &'static str = $endpoint;

            fn dispatcher(&self) -> &$crate::http::Dispatcher {
                self.dispatcher
            }
        }
    };
}

pub(crate) use resource_client;

/// Filters accepted by the listing endpoints.
///
/// Unset filters are left out of the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Free-text search (`q`).
    pub search: Option<String>,
    /// Only objects created after this instant (`date[gt]`).
    pub start_date: Option<DateTime<Utc>>,
    /// Only objects created before this instant (`date[lt]`).
    pub end_date: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    /// Page size, 1 to 100.
    pub limit: Option<u32>,
    /// Customer id; honored by invoices, receipts and retentions.
    pub customer: Option<String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn created_between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer = Some(customer_id.into());
        self
    }

    /// Query-string pairs in a stable order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(search) = &self.search {
            query.push(("q", search.clone()));
        }
        if let Some(start) = &self.start_date {
            query.push(("date[gt]", format_date(start)));
        }
        if let Some(end) = &self.end_date {
            query.push(("date[lt]", format_date(end)));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(customer) = &self.customer {
            query.push(("customer", customer.clone()));
        }
        query
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body of the email endpoints; without a recipient the server uses the
/// customer's stored address.
#[derive(Serialize)]
struct EmailRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

/// The email endpoints answer `{ "ok": true }`.
fn ok_flag(value: &Value) -> bool {
    value.get("ok").and_then(Value::as_bool).unwrap_or(false)
}
