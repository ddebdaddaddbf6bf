use serde_json::Value;
use tracing::instrument;

use super::{EmailRequest, ListParams, Resource, ok_flag, resource_client};
use crate::ClientError;
use crate::catalog::DownloadFormat;
use crate::models::{NewRetention, Retention, RetentionList};

resource_client! {
    /// Retentions (withholding certificates) API client.
    RetentionsClient => "retentions"
}

impl RetentionsClient<'_> {
    /// Creates a retention. In live mode it is stamped and sent to the SAT.
    #[instrument(skip_all, fields(cve_retenc = %retention.cve_retenc))]
    pub fn create(&self, retention: &NewRetention) -> Result<Retention, ClientError> {
        self.post_json(&[], Some(retention))
    }

    pub fn all(&self, params: &ListParams) -> Result<RetentionList, ClientError> {
        self.get_json(&[], &params.to_query())
    }

    pub fn retrieve(&self, id: &str) -> Result<Retention, ClientError> {
        self.get_json(&[id], &[])
    }

    #[instrument(skip(self))]
    pub fn cancel(&self, id: &str) -> Result<Retention, ClientError> {
        self.delete_json(&[id], &[])
    }

    pub fn download(&self, id: &str, format: DownloadFormat) -> Result<Vec<u8>, ClientError> {
        Ok(self.get_raw(&[id, format.as_str()])?.into_bytes())
    }

    pub fn download_pdf(&self, id: &str) -> Result<Vec<u8>, ClientError> {
        self.download(id, DownloadFormat::Pdf)
    }

    pub fn download_xml(&self, id: &str) -> Result<String, ClientError> {
        Ok(self.get_raw(&[id, DownloadFormat::Xml.as_str()])?.text())
    }

    pub fn download_zip(&self, id: &str) -> Result<Vec<u8>, ClientError> {
        self.download(id, DownloadFormat::Zip)
    }

    pub fn send_by_email(&self, id: &str, email: Option<&str>) -> Result<bool, ClientError> {
        let response: Value = self.post_json(&[id, "email"], Some(&EmailRequest { email }))?;
        Ok(ok_flag(&response))
    }
}
