use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tracing::instrument;

use super::{ListParams, Resource, resource_client};
use crate::ClientError;
use crate::models::{CertificateUpload, Customization, LegalData, Organization, OrganizationList};

resource_client! {
    /// Organizations API client. Requires a user key rather than an
    /// organization's secret key.
    OrganizationsClient => "organizations"
}

impl OrganizationsClient<'_> {
    /// Creates an organization with just a commercial name; legal data and
    /// certificates are uploaded afterwards.
    #[instrument(skip(self))]
    pub fn create(&self, name: &str) -> Result<Organization, ClientError> {
        self.post_json(&[], Some(&json!({ "name": name })))
    }

    pub fn all(&self, params: &ListParams) -> Result<OrganizationList, ClientError> {
        self.get_json(&[], &params.to_query())
    }

    pub fn retrieve(&self, id: &str) -> Result<Organization, ClientError> {
        self.get_json(&[id], &[])
    }

    #[instrument(skip(self, legal))]
    pub fn update_legal(&self, id: &str, legal: &LegalData) -> Result<Organization, ClientError> {
        self.put_json(&[id, "legal"], Some(legal))
    }

    #[instrument(skip(self, customization))]
    pub fn update_customization(
        &self,
        id: &str,
        customization: &Customization,
    ) -> Result<Organization, ClientError> {
        self.put_json(&[id, "customization"], Some(customization))
    }

    /// Uploads the logo shown on PDFs and the self-invoicing portal.
    #[instrument(skip(self, logo), fields(bytes = logo.len()))]
    pub fn upload_logo(&self, id: &str, logo: &[u8]) -> Result<Organization, ClientError> {
        let body = json!({ "file": STANDARD.encode(logo) });
        self.put_json(&[id, "logo"], Some(&body))
    }

    /// Uploads the CSD certificate (`.cer`), its private key (`.key`) and the
    /// key's password.
    #[instrument(skip(self, cer, key, password))]
    pub fn upload_certificate(
        &self,
        id: &str,
        cer: &[u8],
        key: &[u8],
        password: &str,
    ) -> Result<Organization, ClientError> {
        self.put_json(
            &[id, "certificate"],
            Some(&CertificateUpload::new(cer, key, password)),
        )
    }

    #[instrument(skip(self))]
    pub fn delete_certificate(&self, id: &str) -> Result<Organization, ClientError> {
        self.delete_json(&[id, "certificate"], &[])
    }

    /// The organization's test secret key.
    pub fn get_test_api_key(&self, id: &str) -> Result<String, ClientError> {
        self.get_json(&[id, "apikeys", "test"], &[])
    }

    /// Invalidates the live secret key and returns the new one.
    #[instrument(skip(self))]
    pub fn renew_live_api_key(&self, id: &str) -> Result<String, ClientError> {
        self.put_json::<_, Value>(&[id, "apikeys", "live"], None)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<Organization, ClientError> {
        self.delete_json(&[id], &[])
    }
}
