use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::customer::Address;
use crate::catalog::TaxSystem;

/// An issuing organization managed with a user key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_production_ready: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pending_steps: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal: Option<LegalData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fiscal identity printed on the organization's invoices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalData {
    pub name: String,
    pub legal_name: String,
    pub tax_system: TaxSystem,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
}

/// Branding and folio settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_logo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_folio_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_folio_number_test: Option<u64>,
}

/// Metadata of the uploaded CSD certificate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
}

/// CSD files for `PUT /organizations/{id}/certificate`, base64-encoded into
/// the JSON body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CertificateUpload {
    pub cer: String,
    pub key: String,
    pub password: String,
}

impl CertificateUpload {
    pub fn new(cer: &[u8], key: &[u8], password: impl Into<String>) -> Self {
        Self {
            cer: STANDARD.encode(cer),
            key: STANDARD.encode(key),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for CertificateUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateUpload")
            .field("cer_len", &self.cer.len())
            .field("key_len", &self.key.len())
            .field("password", &"***")
            .finish()
    }
}
