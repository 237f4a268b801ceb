use reqwest::Request;
use serde_json::Value;

use crate::api::client::ZenotiClient;
use crate::error::Result;
use crate::models::appointment::AppointmentQuery;

impl ZenotiClient {
    pub fn book_appointment_request(&self, location_id: &str, payload: &Value) -> Result<Request> {
        Ok(self
            .post(&["v1", "locations", location_id, "appointments"])?
            .json(payload)
            .build()?)
    }

    pub async fn book_appointment(&self, location_id: &str, payload: &Value) -> Result<Value> {
        let request = self.book_appointment_request(location_id, payload)?;
        self.send_json("Book appointment", request).await
    }

    pub fn list_appointments_request(
        &self,
        location_id: &str,
        query: &AppointmentQuery,
    ) -> Result<Request> {
        Ok(self
            .get(&["v1", "appointments"])?
            .query(&query.query_pairs(location_id))
            .build()?)
    }

    /// List appointments for a center within a date window of at most a week.
    pub async fn list_appointments(
        &self,
        location_id: &str,
        query: &AppointmentQuery,
    ) -> Result<Value> {
        let request = self.list_appointments_request(location_id, query)?;
        self.send_json("List appointments", request).await
    }
}
