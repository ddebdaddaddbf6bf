use tracing::instrument;

use super::{ListParams, Resource, resource_client};
use crate::ClientError;
use crate::models::{Customer, CustomerList, CustomerUpdate, CustomerValidations, NewCustomer};

resource_client! {
    /// Customers API client.
    CustomersClient => "customers"
}

impl CustomersClient<'_> {
    /// Creates a customer in the organization.
    #[instrument(skip_all, fields(tax_id = %customer.tax_id))]
    pub fn create(&self, customer: &NewCustomer) -> Result<Customer, ClientError> {
        self.post_json(&[], Some(customer))
    }

    /// Lists customers, newest first.
    pub fn all(&self, params: &ListParams) -> Result<CustomerList, ClientError> {
        self.get_json(&[], &params.to_query())
    }

    /// Searches customers by legal name, tax ID or email.
    pub fn search(&self, text: &str) -> Result<CustomerList, ClientError> {
        self.all(&ListParams::new().with_search(text))
    }

    pub fn retrieve(&self, id: &str) -> Result<Customer, ClientError> {
        self.get_json(&[id], &[])
    }

    /// Sends only the fields set in `update` and returns the merged customer.
    #[instrument(skip(self, update))]
    pub fn update(&self, id: &str, update: &CustomerUpdate) -> Result<Customer, ClientError> {
        self.put_json(&[id], Some(update))
    }

    /// Deletes a customer and returns it as the server last stored it.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<Customer, ClientError> {
        self.delete_json(&[id], &[])
    }

    /// Checks the stored fiscal data against the SAT.
    pub fn validate_tax_info(&self, id: &str) -> Result<CustomerValidations, ClientError> {
        self.get_json(&[id, "tax-info-validation"], &[])
    }
}
