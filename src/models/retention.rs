use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::invoice::{CustomerRef, InvoiceCustomer};

/// A withholding certificate (CFDI de retenciones).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Retention {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub livemode: bool,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<InvoiceCustomer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve_retenc: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Months and fiscal year covered by a retention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPeriod {
    pub mes_ini: u8,
    pub mes_fin: u8,
    pub ejercicio: u16,
}

/// Payload for `POST /retentions`.
///
/// Totals and complements vary per retention key and are passed through
/// `extra` as-is.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewRetention {
    pub customer: CustomerRef,
    pub cve_retenc: String,
    pub periodo: RetentionPeriod,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewRetention {
    pub fn new(
        customer: impl Into<CustomerRef>,
        cve_retenc: impl Into<String>,
        periodo: RetentionPeriod,
    ) -> Self {
        Self {
            customer: customer.into(),
            cve_retenc: cve_retenc.into(),
            periodo,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }
}
