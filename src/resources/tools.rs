use serde::Deserialize;
use serde_json::Value;

use super::{Resource, ok_flag, resource_client};
use crate::ClientError;
use crate::models::TaxIdValidation;

resource_client! {
    /// Utility endpoints that do not belong to a resource.
    ToolsClient => "tools"
}

resource_client! {
    /// Service health endpoint.
    HealthCheck => "check"
}

#[derive(Deserialize)]
struct EfosResponse {
    efos: TaxIdValidation,
}

impl ToolsClient<'_> {
    /// Looks a tax ID (RFC) up in the SAT's EFOS list.
    ///
    /// Calls `tools/tax_id_validation?tax_id=`; earlier client versions sent
    /// the same query to `tools/` directly.
    pub fn validate_tax_id(&self, tax_id: &str) -> Result<TaxIdValidation, ClientError> {
        let response: EfosResponse =
            self.get_json(&["tax_id_validation"], &[("tax_id", tax_id.to_owned())])?;
        Ok(response.efos)
    }
}

impl HealthCheck<'_> {
    /// True when the service answers `{ "ok": true }`.
    pub fn check_status(&self) -> Result<bool, ClientError> {
        let response: Value = self.get_json(&[], &[])?;
        Ok(ok_flag(&response))
    }
}
