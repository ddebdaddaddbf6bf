use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of looking a tax ID (RFC) up in the SAT's EFOS list.
///
/// `is_valid` is false when the RFC is or was suspected of invoicing
/// simulated operations. `data` holds the raw SAT answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaxIdValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
