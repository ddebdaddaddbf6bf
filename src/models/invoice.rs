use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::customer::{Address, NewCustomer};
use super::product::NewProduct;
use crate::catalog::{
    InvoiceRelation, InvoiceType, InvoiceUse, PaymentForm, PaymentMethod, TaxSystem,
};

/// Lifecycle state of an issued CFDI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Valid,
    Canceled,
    Draft,
    #[serde(other)]
    Unknown,
}

/// An invoice (CFDI) issued by the organization.
///
/// Fields without a dedicated member are kept in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub livemode: bool,
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_status: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<InvoiceCustomer>,
    #[serde(default)]
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_form: Option<PaymentForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folio_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Invoice {
    /// True once the SAT accepted the cancellation or the server reports it
    /// as canceled.
    pub fn is_canceled(&self) -> bool {
        self.status == InvoiceStatus::Canceled
            || self.cancellation_status.as_deref() == Some("accepted")
    }
}

/// Snapshot of the receiver stored on an invoice, receipt or retention.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCustomer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub legal_name: String,
    pub tax_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_system: Option<TaxSystem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Either the id of a stored customer or the full data of a new one.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Id(String),
    New(Box<NewCustomer>),
}

impl From<&str> for CustomerRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

impl From<String> for CustomerRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<NewCustomer> for CustomerRef {
    fn from(customer: NewCustomer) -> Self {
        Self::New(Box::new(customer))
    }
}

/// Either the id of a stored product or inline product data.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductRef {
    Id(String),
    New(Box<NewProduct>),
}

impl From<&str> for ProductRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

impl From<String> for ProductRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<NewProduct> for ProductRef {
    fn from(product: NewProduct) -> Self {
        Self::New(Box::new(product))
    }
}

/// A line of an invoice or receipt.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InvoiceItem {
    pub product: ProductRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl InvoiceItem {
    pub fn new(product: impl Into<ProductRef>) -> Self {
        Self {
            product: product.into(),
            quantity: None,
            discount: None,
        }
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }
}

/// CFDIs this invoice relates to, and how.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedDocuments {
    pub relationship: InvoiceRelation,
    pub documents: Vec<String>,
}

/// Payload for `POST /invoices`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewInvoice {
    pub customer: CustomerRef,
    pub items: Vec<InvoiceItem>,
    pub payment_form: PaymentForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub invoice_use: Option<InvoiceUse>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folio_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_documents: Vec<RelatedDocuments>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl NewInvoice {
    pub fn new(
        customer: impl Into<CustomerRef>,
        items: Vec<InvoiceItem>,
        payment_form: PaymentForm,
    ) -> Self {
        Self {
            customer: customer.into(),
            items,
            payment_form,
            payment_method: None,
            invoice_use: None,
            invoice_type: None,
            currency: None,
            exchange: None,
            series: None,
            folio_number: None,
            conditions: None,
            related_documents: Vec::new(),
            external_id: None,
        }
    }

    #[must_use]
    pub fn with_use(mut self, invoice_use: InvoiceUse) -> Self {
        self.invoice_use = Some(invoice_use);
        self
    }

    #[must_use]
    pub fn with_payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = Some(payment_method);
        self
    }

    #[must_use]
    pub fn related_to(mut self, relationship: InvoiceRelation, documents: Vec<String>) -> Self {
        self.related_documents.push(RelatedDocuments {
            relationship,
            documents,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Invoice, InvoiceItem, InvoiceStatus, NewInvoice};
    use crate::catalog::{InvoiceRelation, InvoiceUse, PaymentForm};
    use crate::models::NewProduct;

    #[test]
    fn new_invoice_serializes_refs_untagged() {
        let invoice = NewInvoice::new(
            "cus_1",
            vec![
                InvoiceItem::new("prod_1").with_quantity(2.0),
                InvoiceItem::new(NewProduct::new("Ukulele", "60131324", 345.6)),
            ],
            PaymentForm::Efectivo,
        )
        .with_use(InvoiceUse::GastosEnGeneral)
        .related_to(InvoiceRelation::Sustitucion, vec!["uuid-1".to_owned()]);

        let body = serde_json::to_value(&invoice).expect("serializable");
        assert_eq!(
            body,
            json!({
                "customer": "cus_1",
                "items": [
                    { "product": "prod_1", "quantity": 2.0 },
                    {
                        "product": {
                            "description": "Ukulele",
                            "product_key": "60131324",
                            "price": 345.6
                        }
                    }
                ],
                "payment_form": "01",
                "use": "G03",
                "related_documents": [{ "relationship": "04", "documents": ["uuid-1"] }]
            })
        );
    }

    #[test]
    fn keeps_unmodelled_fields_in_extra() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": "inv_1",
            "created_at": "2024-05-02T12:00:00Z",
            "livemode": false,
            "status": "canceled",
            "cancellation_status": "accepted",
            "total": 116.0,
            "stamp": { "date": "2024-05-02T12:00:01Z" }
        }))
        .expect("valid invoice");

        assert_eq!(invoice.status, InvoiceStatus::Canceled);
        assert!(invoice.is_canceled());
        assert!(invoice.extra.contains_key("stamp"));
    }

    #[test]
    fn unrecognized_status_does_not_fail_decoding() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": "inv_2",
            "created_at": "2024-05-02T12:00:00Z",
            "livemode": true,
            "status": "archived"
        }))
        .expect("valid invoice");
        assert_eq!(invoice.status, InvoiceStatus::Unknown);
        assert!(!invoice.is_canceled());
    }
}
