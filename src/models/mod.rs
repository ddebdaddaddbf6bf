//! Typed records returned by the API and the payloads sent to it.
//!
//! Records derive `Deserialize` (they are built from response JSON) and
//! `Serialize` (so they can be printed or cached by the host). Payload types
//! skip unset optional fields, which is what makes partial updates partial.

mod catalogs;
mod customer;
mod invoice;
mod organization;
mod product;
mod receipt;
mod retention;
mod tools;

use std::ops::Index;

use serde::{Deserialize, Serialize};

pub use catalogs::CatalogEntry;
pub use customer::{
    Address, Customer, CustomerUpdate, CustomerValidations, NewCustomer, ValidationError,
};
pub use invoice::{
    CustomerRef, Invoice, InvoiceCustomer, InvoiceItem, InvoiceStatus, NewInvoice, ProductRef,
    RelatedDocuments,
};
pub use organization::{CertificateInfo, CertificateUpload, Customization, LegalData, Organization};
pub use product::{LocalTax, NewProduct, Product, ProductTax, ProductUpdate};
pub use receipt::{GlobalInvoiceRequest, NewReceipt, Receipt, ReceiptInvoiceRequest};
pub use retention::{NewRetention, Retention, RetentionPeriod};
pub use tools::TaxIdValidation;

/// One page of a paginated listing.
///
/// `len()` counts the items on this page; `total_results` is the grand total
/// across all pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
    pub data: Vec<T>,
}

fn first_page() -> u32 {
    1
}

impl<T> List<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Items in server order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Whether the server reports pages after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

impl<T> Index<usize> for List<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

pub type CustomerList = List<Customer>;
pub type ProductList = List<Product>;
pub type InvoiceList = List<Invoice>;
pub type ReceiptList = List<Receipt>;
pub type RetentionList = List<Retention>;
pub type OrganizationList = List<Organization>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CustomerList, List};

    #[test]
    fn list_counts_items_on_page_not_grand_total() {
        let page: List<String> = serde_json::from_value(json!({
            "page": 2,
            "total_pages": 5,
            "total_results": 48,
            "data": ["a", "b", "c"],
        }))
        .expect("valid page");

        assert_eq!(page.len(), 3);
        assert_eq!(page.total_results, 48);
        assert_eq!(page[1], "b");
        assert!(page.has_more());
        let collected: Vec<&str> = page.iter().map(String::as_str).collect();
        assert_eq!(collected, ["a", "b", "c"]);
    }

    #[test]
    fn empty_customer_page_decodes() {
        let page: CustomerList = serde_json::from_value(json!({
            "page": 1,
            "total_pages": 0,
            "total_results": 0,
            "data": [],
        }))
        .expect("valid page");
        assert!(page.is_empty());
        assert!(page.first().is_none());
        assert!(!page.has_more());
    }
}
