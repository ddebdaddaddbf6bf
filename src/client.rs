use std::env;
use std::time::Duration;

use reqwest::StatusCode;

use crate::ClientError;
use crate::http::Dispatcher;
use crate::resources::catalogs::CatalogsClient;
use crate::resources::customers::CustomersClient;
use crate::resources::invoices::InvoicesClient;
use crate::resources::organizations::OrganizationsClient;
use crate::resources::products::ProductsClient;
use crate::resources::receipts::ReceiptsClient;
use crate::resources::retentions::RetentionsClient;
use crate::resources::tools::{HealthCheck, ToolsClient};

/// Environment variable holding the secret API key.
pub const API_KEY_ENV: &str = "FACTURAPI_KEY";
/// Optional environment override for the API version.
pub const API_VERSION_ENV: &str = "FACTURAPI_API_VERSION";
/// Optional environment override for the base URL.
pub const BASE_URL_ENV: &str = "FACTURAPI_BASE_URL";

/// Entry point to the Facturapi API.
///
/// Owns one [`Dispatcher`] and hands out resource clients that borrow it, so
/// every resource shares the same connection pool and credentials.
///
/// ```no_run
/// use facturapi::{Facturapi, ListParams};
///
/// let facturapi = Facturapi::new("sk_test_...")?;
/// let customers = facturapi
///     .customers()
///     .all(&ListParams::new().with_search("XAXX010101000"))?;
/// for customer in &customers {
///     println!("{} {}", customer.id, customer.legal_name);
/// }
/// # Ok::<(), facturapi::ClientError>(())
/// ```
#[derive(Debug)]
pub struct Facturapi {
    dispatcher: Dispatcher,
}

impl Facturapi {
    /// Creates a client for the production host and the default API version.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            dispatcher: Dispatcher::new(api_key)?,
        })
    }

    /// Reads the key from `FACTURAPI_KEY`; `FACTURAPI_API_VERSION` and
    /// `FACTURAPI_BASE_URL` are honored when set.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Same as [`Self::from_env`] with variables resolved by `lookup`.
    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = var(API_KEY_ENV).ok_or(ClientError::MissingEnv(API_KEY_ENV))?;
        let mut client = Self::new(api_key)?;

        if let Some(version) = var(API_VERSION_ENV) {
            client = client.with_api_version(version);
        }
        if let Some(base_url) = var(BASE_URL_ENV) {
            client = client.with_base_url(base_url)?;
        }
        Ok(client)
    }

    /// Wraps an already configured dispatcher.
    pub fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        self.dispatcher = self.dispatcher.with_base_url(base_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.dispatcher = self.dispatcher.with_api_version(api_version);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.dispatcher = self.dispatcher.with_timeout(timeout);
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Status of the latest response received through this client.
    pub fn last_status(&self) -> Option<StatusCode> {
        self.dispatcher.last_status()
    }

    pub fn customers(&self) -> CustomersClient<'_> {
        CustomersClient::new(&self.dispatcher)
    }

    pub fn products(&self) -> ProductsClient<'_> {
        ProductsClient::new(&self.dispatcher)
    }

    pub fn invoices(&self) -> InvoicesClient<'_> {
        InvoicesClient::new(&self.dispatcher)
    }

    pub fn receipts(&self) -> ReceiptsClient<'_> {
        ReceiptsClient::new(&self.dispatcher)
    }

    pub fn retentions(&self) -> RetentionsClient<'_> {
        RetentionsClient::new(&self.dispatcher)
    }

    /// Alias of [`Self::retentions`].
    pub fn withholdings(&self) -> RetentionsClient<'_> {
        self.retentions()
    }

    pub fn organizations(&self) -> OrganizationsClient<'_> {
        OrganizationsClient::new(&self.dispatcher)
    }

    pub fn catalogs(&self) -> CatalogsClient<'_> {
        CatalogsClient::new(&self.dispatcher)
    }

    pub fn tools(&self) -> ToolsClient<'_> {
        ToolsClient::new(&self.dispatcher)
    }

    pub fn health(&self) -> HealthCheck<'_> {
        HealthCheck::new(&self.dispatcher)
    }

    /// True when the service reports itself healthy.
    pub fn check_status(&self) -> Result<bool, ClientError> {
        self.health().check_status()
    }
}
