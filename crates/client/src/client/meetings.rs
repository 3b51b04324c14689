//! Meeting API operations.

use briefdesk_core::advisory::Meeting;
use briefdesk_core::api::ListEnvelope;

use super::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// List meetings still on the calendar.
    pub async fn upcoming_meetings(&self) -> Result<Vec<Meeting>> {
        let response = self
            .http()
            .get(self.url("/meetings/upcoming"))
            .send()
            .await?;
        let envelope: ListEnvelope<Meeting> =
            self.handle_response(response, "Meetings", "").await?;
        Ok(envelope.into_items())
    }

    /// Get a meeting by id.
    pub async fn get_meeting(&self, id: &str) -> Result<Meeting> {
        let response = self
            .http()
            .get(self.url(&format!("/meetings/{id}")))
            .send()
            .await?;
        self.handle_response(response, "Meeting", id).await
    }

    /// List all meetings for one client.
    pub async fn meetings_for_client(&self, client_id: &str) -> Result<Vec<Meeting>> {
        let response = self
            .http()
            .get(self.url(&format!("/clients/{client_id}/meetings")))
            .send()
            .await?;
        let envelope: ListEnvelope<Meeting> =
            self.handle_response(response, "Client", client_id).await?;
        Ok(envelope.into_items())
    }
}
