use super::{ListParams, Resource, resource_client};
use crate::ClientError;
use crate::models::{CatalogEntry, List};

resource_client! {
    /// Search over the SAT catalogs needed to fill in invoice items.
    CatalogsClient => "catalogs"
}

impl CatalogsClient<'_> {
    /// Searches the products/services catalog (`ClaveProdServ`).
    pub fn search_products(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<List<CatalogEntry>, ClientError> {
        self.search("products", search, page, limit)
    }

    /// Searches the units of measurement catalog (`ClaveUnidad`).
    pub fn search_units(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<List<CatalogEntry>, ClientError> {
        self.search("units", search, page, limit)
    }

    fn search(
        &self,
        catalog: &str,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<List<CatalogEntry>, ClientError> {
        self.get_json(&[catalog], &search_params(search, page, limit).to_query())
    }
}

/// Zero `page` or `limit` means "server default" and is left out.
fn search_params(search: &str, page: Option<u32>, limit: Option<u32>) -> ListParams {
    ListParams {
        search: Some(search.to_owned()),
        page: page.filter(|&p| p > 0),
        limit: limit.filter(|&l| l > 0),
        ..ListParams::default()
    }
}

#[cfg(test)]
mod tests {
    use super::search_params;

    #[test]
    fn zero_paging_values_are_dropped() {
        let query = search_params("pieza", Some(0), Some(0)).to_query();
        assert_eq!(query, vec![("q", "pieza".to_owned())]);
    }

    #[test]
    fn given_paging_values_are_kept() {
        let query = search_params("pieza", Some(2), Some(20)).to_query();
        assert_eq!(
            query,
            vec![
                ("q", "pieza".to_owned()),
                ("page", "2".to_owned()),
                ("limit", "20".to_owned()),
            ]
        );
    }
}
