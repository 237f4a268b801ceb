use reqwest::Request;
use serde_json::Value;

use crate::api::client::ZenotiClient;
use crate::error::Result;

pub const DEFAULT_INVOICE_STATUS: &str = "Open";

/// Status value that disables filtering.
pub const STATUS_ALL: &str = "all";

impl ZenotiClient {
    pub fn list_invoices_request(&self, location_id: &str, status: &str) -> Result<Request> {
        let mut request = self.get(&["v1", "centers", location_id, "invoices"])?;
        if !status.eq_ignore_ascii_case(STATUS_ALL) {
            request = request.query(&[("status", status)]);
        }
        Ok(request.build()?)
    }

    /// Fetch invoices for a center, optionally filtered by status.
    pub async fn list_invoices(&self, location_id: &str, status: &str) -> Result<Value> {
        let request = self.list_invoices_request(location_id, status)?;
        self.send_json("List invoices", request).await
    }

    pub fn create_invoice_request(&self, location_id: &str, payload: &Value) -> Result<Request> {
        Ok(self
            .post(&["v1", "locations", location_id, "invoices"])?
            .json(payload)
            .build()?)
    }

    pub async fn create_invoice(&self, location_id: &str, payload: &Value) -> Result<Value> {
        let request = self.create_invoice_request(location_id, payload)?;
        self.send_json("Create invoice", request).await
    }
}
