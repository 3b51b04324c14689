//! Client-directory API operations.

use briefdesk_core::advisory::{Client, ClientSummary, HistorySearchResults, MeetingBrief};
use briefdesk_core::api::{
    BriefRequest, ClientListQuery, HistorySearchQuery, ListEnvelope, PaginatedResponse,
};

use super::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// List clients with filters and pagination.
    pub async fn list_clients(&self, query: &ClientListQuery) -> Result<PaginatedResponse<Client>> {
        let response = self
            .http()
            .get(self.url("/clients"))
            .query(query)
            .send()
            .await?;
        self.handle_response(response, "Clients", "").await
    }

    /// Get a client by id.
    pub async fn get_client(&self, id: &str) -> Result<Client> {
        let response = self
            .http()
            .get(self.url(&format!("/clients/{id}")))
            .send()
            .await?;
        self.handle_response(response, "Client", id).await
    }

    /// Get the first `limit` client summaries.
    pub async fn client_summaries(&self, limit: u32) -> Result<Vec<ClientSummary>> {
        let response = self
            .http()
            .get(self.url("/clients/summaries"))
            .query(&[("limit", limit)])
            .send()
            .await?;
        let envelope: ListEnvelope<ClientSummary> =
            self.handle_response(response, "Clients", "").await?;
        Ok(envelope.into_items())
    }

    /// Search one client's interaction and document history.
    ///
    /// `types` is sent comma-joined; sequences are not representable in the
    /// urlencoded query form.
    pub async fn search_history(
        &self,
        client_id: &str,
        query: &HistorySearchQuery,
    ) -> Result<HistorySearchResults> {
        let mut params: Vec<(&str, String)> = vec![
            ("q", query.query.clone()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(types) = &query.types {
            params.push(("types", types.join(",")));
        }
        if let Some(start) = query.start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = query.end_date {
            params.push(("end_date", end.to_string()));
        }

        let response = self
            .http()
            .get(self.url(&format!("/clients/{client_id}/search")))
            .query(&params)
            .send()
            .await?;
        self.handle_response(response, "Client", client_id).await
    }

    /// Generate a meeting brief for a client.
    pub async fn generate_brief(
        &self,
        client_id: &str,
        request: &BriefRequest,
    ) -> Result<MeetingBrief> {
        let response = self
            .http()
            .post(self.url(&format!("/clients/{client_id}/meeting-brief")))
            .json(request)
            .send()
            .await?;
        self.handle_response(response, "Client", client_id).await
    }
}
