use tracing::instrument;

use super::{ListParams, Resource, resource_client};
use crate::ClientError;
use crate::models::{NewProduct, Product, ProductList, ProductUpdate};

resource_client! {
    /// Products API client.
    ProductsClient => "products"
}

impl ProductsClient<'_> {
    #[instrument(skip_all, fields(product_key = %product.product_key))]
    pub fn create(&self, product: &NewProduct) -> Result<Product, ClientError> {
        self.post_json(&[], Some(product))
    }

    pub fn all(&self, params: &ListParams) -> Result<ProductList, ClientError> {
        self.get_json(&[], &params.to_query())
    }

    pub fn retrieve(&self, id: &str) -> Result<Product, ClientError> {
        self.get_json(&[id], &[])
    }

    #[instrument(skip(self, update))]
    pub fn update(&self, id: &str, update: &ProductUpdate) -> Result<Product, ClientError> {
        self.put_json(&[id], Some(update))
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<Product, ClientError> {
        self.delete_json(&[id], &[])
    }
}
