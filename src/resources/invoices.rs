use serde_json::Value;
use tracing::{debug, instrument};

use super::{EmailRequest, ListParams, Resource, ok_flag, resource_client};
use crate::ClientError;
use crate::catalog::{CancellationReason, DownloadFormat};
use crate::models::{Invoice, InvoiceList, NewInvoice};

resource_client! {
    /// Invoices API client.
    InvoicesClient => "invoices"
}

impl InvoicesClient<'_> {
    /// Issues an invoice. In live mode the CFDI is stamped by the SAT.
    #[instrument(skip_all)]
    pub fn create(&self, invoice: &NewInvoice) -> Result<Invoice, ClientError> {
        self.post_json(&[], Some(invoice))
    }

    /// Lists invoices. `params.customer` narrows the listing to one receiver.
    pub fn all(&self, params: &ListParams) -> Result<InvoiceList, ClientError> {
        self.get_json(&[], &params.to_query())
    }

    pub fn retrieve(&self, id: &str) -> Result<Invoice, ClientError> {
        self.get_json(&[id], &[])
    }

    /// Requests the cancellation of an invoice.
    ///
    /// `substitution` is the id of the replacing invoice and only makes sense
    /// with [`CancellationReason::ErrorsWithRelation`].
    #[instrument(skip(self))]
    pub fn cancel(
        &self,
        id: &str,
        motive: CancellationReason,
        substitution: Option<&str>,
    ) -> Result<Invoice, ClientError> {
        let mut query = vec![("motive", motive.as_str().to_owned())];
        if let Some(substitution) = substitution {
            query.push(("substitution", substitution.to_owned()));
        }
        self.delete_json(&[id], &query)
    }

    /// Downloads the invoice as PDF, XML or a ZIP holding both.
    pub fn download(&self, id: &str, format: DownloadFormat) -> Result<Vec<u8>, ClientError> {
        let response = self.get_raw(&[id, format.as_str()])?;
        debug!(bytes = response.bytes().len(), %format, "invoice file downloaded");
        Ok(response.into_bytes())
    }

    pub fn download_pdf(&self, id: &str) -> Result<Vec<u8>, ClientError> {
        self.download(id, DownloadFormat::Pdf)
    }

    /// The stamped XML as text.
    pub fn download_xml(&self, id: &str) -> Result<String, ClientError> {
        Ok(self.get_raw(&[id, DownloadFormat::Xml.as_str()])?.text())
    }

    pub fn download_zip(&self, id: &str) -> Result<Vec<u8>, ClientError> {
        self.download(id, DownloadFormat::Zip)
    }

    /// Emails the PDF and XML, to `email` or to the customer's stored address.
    pub fn send_by_email(&self, id: &str, email: Option<&str>) -> Result<bool, ClientError> {
        let response: Value = self.post_json(&[id, "email"], Some(&EmailRequest { email }))?;
        Ok(ok_flag(&response))
    }

    /// The SAT cancellation acknowledgement (XML) of a canceled invoice.
    pub fn get_cancellation_receipt(&self, id: &str) -> Result<String, ClientError> {
        Ok(self
            .get_raw(&[id, "cancellation_receipt", DownloadFormat::Xml.as_str()])?
            .text())
    }

    /// Asks the server to refresh the status of an invoice from the SAT.
    pub fn update_status(&self, id: &str) -> Result<Invoice, ClientError> {
        self.put_json::<_, Value>(&[id, "status"], None)
    }
}
