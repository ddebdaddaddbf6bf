use serde::{Deserialize, Serialize};

/// One hit from a SAT catalog search (products/services or units).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: String,
    pub description: String,
    /// Relevance assigned by the search engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
