use serde_json::Value;
use tracing::debug;

use crate::api::client::ZenotiClient;
use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::models::appointment::AppointmentQuery;
use crate::payload::deep_merge;
use crate::templates::TemplateStore;

/// Runs one API action: template lookup and merge happen locally, then a
/// single authenticated request goes out.
pub struct Dispatcher<'a> {
    credentials: &'a Credentials,
    store: &'a TemplateStore,
}

impl<'a> Dispatcher<'a> {
    pub fn new(credentials: &'a Credentials, store: &'a TemplateStore) -> Self {
        Self { credentials, store }
    }

    /// An explicit location wins over the configured default center.
    pub fn resolve_location(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .or(self.credentials.center_id.as_deref())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::config("location id is required; set ZENOTI_CENTER_ID or pass it explicitly")
            })
    }

    /// Template payload with `overrides` merged on top.
    pub fn prepare_payload(&self, template_name: &str, overrides: Option<Value>) -> Result<Value> {
        let mut payload = self.store.get(template_name)?;
        if let Some(overrides) = overrides {
            deep_merge(&mut payload, overrides);
        }
        debug!(template = template_name, "prepared payload");
        Ok(payload)
    }

    pub async fn list_invoices(&self, location_id: Option<&str>, status: &str) -> Result<Value> {
        let location = self.resolve_location(location_id)?;
        let client = ZenotiClient::connect(self.credentials).await?;
        client.list_invoices(&location, status).await
    }

    pub async fn create_invoice(
        &self,
        location_id: Option<&str>,
        template_name: &str,
        overrides: Option<Value>,
    ) -> Result<Value> {
        let payload = self.prepare_payload(template_name, overrides)?;
        let location = self.resolve_location(location_id)?;
        let client = ZenotiClient::connect(self.credentials).await?;
        client.create_invoice(&location, &payload).await
    }

    pub async fn book_appointment(
        &self,
        location_id: Option<&str>,
        template_name: &str,
        overrides: Option<Value>,
    ) -> Result<Value> {
        let payload = self.prepare_payload(template_name, overrides)?;
        let location = self.resolve_location(location_id)?;
        let client = ZenotiClient::connect(self.credentials).await?;
        client.book_appointment(&location, &payload).await
    }

    pub async fn list_appointments(
        &self,
        location_id: Option<&str>,
        query: &AppointmentQuery,
    ) -> Result<Value> {
        let location = self.resolve_location(location_id)?;
        let client = ZenotiClient::connect(self.credentials).await?;
        client.list_appointments(&location, query).await
    }
}
