//! `AdvisorSource` implementation over the HTTP client.

use async_trait::async_trait;

use briefdesk_core::advisory::{
    Client, ClientSummary, DashboardData, HistorySearchResults, Meeting, MeetingBrief,
};
use briefdesk_core::api::{
    BriefRequest, ClientListQuery, HistorySearchQuery, PaginatedResponse, Result,
};
use briefdesk_core::source::AdvisorSource;

use super::ApiClient;

#[async_trait]
impl AdvisorSource for ApiClient {
    async fn list_clients(&self, query: &ClientListQuery) -> Result<PaginatedResponse<Client>> {
        Ok(ApiClient::list_clients(self, query).await?)
    }

    async fn get_client(&self, id: &str) -> Result<Client> {
        Ok(ApiClient::get_client(self, id).await?)
    }

    async fn client_summaries(&self, limit: u32) -> Result<Vec<ClientSummary>> {
        Ok(ApiClient::client_summaries(self, limit).await?)
    }

    async fn search_history(
        &self,
        client_id: &str,
        query: &HistorySearchQuery,
    ) -> Result<HistorySearchResults> {
        Ok(ApiClient::search_history(self, client_id, query).await?)
    }

    async fn generate_brief(&self, client_id: &str, request: &BriefRequest) -> Result<MeetingBrief> {
        Ok(ApiClient::generate_brief(self, client_id, request).await?)
    }

    async fn upcoming_meetings(&self) -> Result<Vec<Meeting>> {
        Ok(ApiClient::upcoming_meetings(self).await?)
    }

    async fn get_meeting(&self, id: &str) -> Result<Meeting> {
        Ok(ApiClient::get_meeting(self, id).await?)
    }

    async fn meetings_for_client(&self, client_id: &str) -> Result<Vec<Meeting>> {
        Ok(ApiClient::meetings_for_client(self, client_id).await?)
    }

    async fn dashboard_overview(&self) -> Result<DashboardData> {
        Ok(ApiClient::dashboard_overview(self).await?)
    }
}
