use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::invoice::{CustomerRef, InvoiceItem};
use crate::catalog::{InvoiceUse, PaymentForm, ReceiptPeriodicity};

/// A sale receipt that the customer can turn into an invoice through the
/// organization's self-invoicing portal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub livemode: bool,
    /// `open`, `invoiced_to_customer`, `invoiced_globally` or `canceled`.
    pub status: String,
    #[serde(default)]
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_invoice_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folio_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_form: Option<PaymentForm>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for `POST /receipts`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewReceipt {
    pub items: Vec<InvoiceItem>,
    pub payment_form: PaymentForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folio_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl NewReceipt {
    pub fn new(items: Vec<InvoiceItem>, payment_form: PaymentForm) -> Self {
        Self {
            items,
            payment_form,
            folio_number: None,
            currency: None,
            branch: None,
            external_id: None,
        }
    }
}

/// Payload for `POST /receipts/{id}/invoice`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReceiptInvoiceRequest {
    pub customer: CustomerRef,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub invoice_use: Option<InvoiceUse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folio_number: Option<u64>,
}

impl ReceiptInvoiceRequest {
    pub fn new(customer: impl Into<CustomerRef>) -> Self {
        Self {
            customer: customer.into(),
            invoice_use: None,
            series: None,
            folio_number: None,
        }
    }
}

/// Payload for `POST /receipts/global-invoice`.
///
/// Without `from`/`to` the server groups every open receipt of the period.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GlobalInvoiceRequest {
    pub periodicity: ReceiptPeriodicity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folio_number: Option<u64>,
}

impl GlobalInvoiceRequest {
    pub fn new(periodicity: ReceiptPeriodicity) -> Self {
        Self {
            periodicity,
            from: None,
            to: None,
            series: None,
            folio_number: None,
        }
    }

    #[must_use]
    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }
}
