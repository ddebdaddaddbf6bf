use serde_json::Value;
use tracing::instrument;

use super::{EmailRequest, ListParams, Resource, ok_flag, resource_client};
use crate::ClientError;
use crate::catalog::DownloadFormat;
use crate::models::{
    GlobalInvoiceRequest, Invoice, NewReceipt, Receipt, ReceiptInvoiceRequest, ReceiptList,
};

resource_client! {
    /// Receipts API client.
    ///
    /// Every receipt gets a self-invoicing URL where the customer can enter
    /// their fiscal data on a microsite branded for the organization.
    ReceiptsClient => "receipts"
}

impl ReceiptsClient<'_> {
    #[instrument(skip_all)]
    pub fn create(&self, receipt: &NewReceipt) -> Result<Receipt, ClientError> {
        self.post_json(&[], Some(receipt))
    }

    pub fn all(&self, params: &ListParams) -> Result<ReceiptList, ClientError> {
        self.get_json(&[], &params.to_query())
    }

    pub fn retrieve(&self, id: &str) -> Result<Receipt, ClientError> {
        self.get_json(&[id], &[])
    }

    /// Issues an invoice for the receipt on the caller's behalf.
    #[instrument(skip(self, request))]
    pub fn invoice(
        &self,
        id: &str,
        request: &ReceiptInvoiceRequest,
    ) -> Result<Invoice, ClientError> {
        self.post_json(&[id, "invoice"], Some(request))
    }

    /// Groups open receipts of a period into one global invoice.
    #[instrument(skip_all, fields(periodicity = %request.periodicity))]
    pub fn create_global_invoice(
        &self,
        request: &GlobalInvoiceRequest,
    ) -> Result<Invoice, ClientError> {
        self.post_json(&["global-invoice"], Some(request))
    }

    /// Cancels an open receipt so it can no longer be invoiced.
    #[instrument(skip(self))]
    pub fn cancel(&self, id: &str) -> Result<Receipt, ClientError> {
        self.delete_json(&[id], &[])
    }

    pub fn send_by_email(&self, id: &str, email: Option<&str>) -> Result<bool, ClientError> {
        let response: Value = self.post_json(&[id, "email"], Some(&EmailRequest { email }))?;
        Ok(ok_flag(&response))
    }

    pub fn download_pdf(&self, id: &str) -> Result<Vec<u8>, ClientError> {
        Ok(self.get_raw(&[id, DownloadFormat::Pdf.as_str()])?.into_bytes())
    }
}
