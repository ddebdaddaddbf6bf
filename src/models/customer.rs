use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::TaxSystem;

/// Fiscal address. Only the postal code is required by the SAT.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub zip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exterior: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
}

impl Address {
    pub fn new(zip: impl Into<String>) -> Self {
        Self {
            zip: zip.into(),
            ..Self::default()
        }
    }
}

/// A customer of the organization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub livemode: bool,
    pub legal_name: String,
    pub tax_id: String,
    pub tax_system: TaxSystem,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payload for `POST /customers`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewCustomer {
    pub legal_name: String,
    pub tax_id: String,
    pub tax_system: TaxSystem,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl NewCustomer {
    pub fn new(
        legal_name: impl Into<String>,
        tax_id: impl Into<String>,
        tax_system: TaxSystem,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            legal_name: legal_name.into(),
            tax_id: tax_id.into(),
            tax_system,
            address: Address::new(zip),
            email: None,
            phone: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Partial update for `PUT /customers/{id}`.
///
/// Only the fields that are set are sent; the server merges them into the
/// stored customer.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_system: Option<TaxSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Result of checking a customer's fiscal data against the SAT.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerValidations {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

/// One failed check, keyed by the JSON path of the offending field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Customer, CustomerUpdate, NewCustomer};
    use crate::catalog::TaxSystem;

    #[test]
    fn decodes_customer_with_nested_address() {
        let customer: Customer = serde_json::from_value(json!({
            "id": "cus_1",
            "created_at": "2024-03-01T18:22:10.000Z",
            "livemode": false,
            "legal_name": "PÚBLICO EN GENERAL",
            "tax_id": "XAXX010101000",
            "tax_system": "616",
            "email": "ventas@example.com",
            "address": {
                "zip": "03020",
                "country": "MEX",
                "street": "Av. Universidad",
                "exterior": "1000"
            }
        }))
        .expect("valid customer");

        assert_eq!(customer.id, "cus_1");
        assert_eq!(customer.legal_name, "PÚBLICO EN GENERAL");
        assert_eq!(customer.tax_id, "XAXX010101000");
        assert_eq!(customer.tax_system, TaxSystem::SinObligacionesFiscales);
        assert_eq!(customer.address.zip, "03020");
        assert_eq!(customer.address.exterior.as_deref(), Some("1000"));
        assert_eq!(customer.address.interior, None);
        assert_eq!(customer.phone, None);
    }

    #[test]
    fn new_customer_omits_unset_contact_fields() {
        let payload = NewCustomer::new(
            "PÚBLICO EN GENERAL",
            "XAXX010101000",
            TaxSystem::SinObligacionesFiscales,
            "03020",
        );
        let body = serde_json::to_value(&payload).expect("serializable");
        assert_eq!(
            body,
            json!({
                "legal_name": "PÚBLICO EN GENERAL",
                "tax_id": "XAXX010101000",
                "tax_system": "616",
                "address": { "zip": "03020" }
            })
        );
    }

    #[test]
    fn update_only_carries_supplied_fields() {
        let update = CustomerUpdate {
            email: Some("nuevo@example.com".to_owned()),
            ..CustomerUpdate::default()
        };
        let body = serde_json::to_value(&update).expect("serializable");
        assert_eq!(body, json!({ "email": "nuevo@example.com" }));
    }
}
