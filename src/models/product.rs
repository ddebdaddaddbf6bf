use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{IepsMode, TaxFactor, TaxType, Taxability};

/// A product or service in the organization's catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub livemode: bool,
    pub description: String,
    pub product_key: String,
    pub price: f64,
    #[serde(default = "default_true")]
    pub tax_included: bool,
    #[serde(default)]
    pub taxes: Vec<ProductTax>,
    #[serde(default)]
    pub local_taxes: Vec<LocalTax>,
    pub unit_key: String,
    pub unit_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxability: Option<Taxability>,
}

fn default_true() -> bool {
    true
}

/// A federal tax applied to a product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductTax {
    pub rate: f64,
    #[serde(rename = "type")]
    pub tax_type: TaxType,
    #[serde(default = "default_factor")]
    pub factor: TaxFactor,
    #[serde(default)]
    pub withholding: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ieps_mode: Option<IepsMode>,
}

fn default_factor() -> TaxFactor {
    TaxFactor::Tasa
}

impl ProductTax {
    /// A transferred (non-withheld) tax at `rate`, applied as a percentage.
    pub fn transferred(tax_type: TaxType, rate: f64) -> Self {
        Self {
            rate,
            tax_type,
            factor: TaxFactor::Tasa,
            withholding: false,
            ieps_mode: None,
        }
    }

    /// A withheld tax at `rate`, applied as a percentage.
    pub fn withheld(tax_type: TaxType, rate: f64) -> Self {
        Self {
            withholding: true,
            ..Self::transferred(tax_type, rate)
        }
    }
}

/// A state or municipal tax. The type is free text defined by the issuer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalTax {
    pub rate: f64,
    #[serde(rename = "type")]
    pub tax_type: String,
    #[serde(default)]
    pub withholding: bool,
}

/// Payload for `POST /products`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewProduct {
    pub description: String,
    pub product_key: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_included: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxability: Option<Taxability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes: Option<Vec<ProductTax>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_taxes: Option<Vec<LocalTax>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

impl NewProduct {
    /// Product with the server defaults for taxes and unit (IVA 16%, piece).
    pub fn new(description: impl Into<String>, product_key: impl Into<String>, price: f64) -> Self {
        Self {
            description: description.into(),
            product_key: product_key.into(),
            price,
            tax_included: None,
            taxability: None,
            taxes: None,
            local_taxes: None,
            unit_key: None,
            unit_name: None,
            sku: None,
        }
    }

    #[must_use]
    pub fn with_taxes(mut self, taxes: Vec<ProductTax>) -> Self {
        self.taxes = Some(taxes);
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit_key: impl Into<String>, unit_name: impl Into<String>) -> Self {
        self.unit_key = Some(unit_key.into());
        self.unit_name = Some(unit_name.into());
        self
    }

    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }
}

/// Partial update for `PUT /products/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_included: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxability: Option<Taxability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes: Option<Vec<ProductTax>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_taxes: Option<Vec<LocalTax>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{NewProduct, Product, ProductTax};
    use crate::catalog::{TaxFactor, TaxType, Taxability};

    #[test]
    fn decodes_product_with_taxes() {
        let product: Product = serde_json::from_value(json!({
            "id": "prod_1",
            "created_at": "2024-01-10T09:00:00Z",
            "livemode": false,
            "description": "Ukulele",
            "product_key": "60131324",
            "price": 345.6,
            "tax_included": true,
            "taxability": "02",
            "taxes": [{ "rate": 0.16, "type": "IVA", "factor": "Tasa", "withholding": false }],
            "local_taxes": [],
            "unit_key": "H87",
            "unit_name": "Pieza",
            "sku": "UKU-01"
        }))
        .expect("valid product");

        assert_eq!(product.taxability, Some(Taxability::SiObjetoDeImpuesto));
        assert_eq!(product.taxes.len(), 1);
        assert_eq!(product.taxes[0].tax_type, TaxType::Iva);
        assert_eq!(product.taxes[0].factor, TaxFactor::Tasa);
        assert!(!product.taxes[0].withholding);
        assert!((product.price - 345.6).abs() < f64::EPSILON);
    }

    #[test]
    fn new_product_serializes_only_given_fields() {
        let payload = NewProduct::new("Ukulele", "60131324", 345.6)
            .with_taxes(vec![ProductTax::withheld(TaxType::Isr, 0.1)]);
        let body = serde_json::to_value(&payload).expect("serializable");
        assert_eq!(
            body,
            json!({
                "description": "Ukulele",
                "product_key": "60131324",
                "price": 345.6,
                "taxes": [{ "rate": 0.1, "type": "ISR", "factor": "Tasa", "withholding": true }]
            })
        );
    }
}
