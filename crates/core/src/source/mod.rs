//! The data-source contract every backend implements.

use async_trait::async_trait;

use crate::advisory::{
    Client, ClientSummary, DashboardData, HistorySearchResults, Meeting, MeetingBrief,
};
use crate::api::{BriefRequest, ClientListQuery, HistorySearchQuery, PaginatedResponse, Result};

/// Uniform access to the advisor API, whether served by fixtures or HTTP.
///
/// Implementations classify every failure into the `SourceError` taxonomy;
/// single-entity lookups return `NotFound` when the id is absent.
#[async_trait]
pub trait AdvisorSource: Send + Sync {
    /// Lists clients with optional status and name-search filters, paginated.
    async fn list_clients(&self, query: &ClientListQuery) -> Result<PaginatedResponse<Client>>;

    /// Gets a client by id.
    async fn get_client(&self, id: &str) -> Result<Client>;

    /// The first `limit` client summaries.
    async fn client_summaries(&self, limit: u32) -> Result<Vec<ClientSummary>>;

    /// Searches one client's interaction and document history.
    async fn search_history(
        &self,
        client_id: &str,
        query: &HistorySearchQuery,
    ) -> Result<HistorySearchResults>;

    /// Generates a meeting brief for a client. An expensive upstream
    /// operation; `request.force_refresh` asks the backend to rebuild rather
    /// than serve its own cached aggregate.
    async fn generate_brief(&self, client_id: &str, request: &BriefRequest) -> Result<MeetingBrief>;

    /// Meetings still on the calendar.
    async fn upcoming_meetings(&self) -> Result<Vec<Meeting>>;

    /// Gets a meeting by id.
    async fn get_meeting(&self, id: &str) -> Result<Meeting>;

    /// All meetings for one client. Unknown ids yield an empty list.
    async fn meetings_for_client(&self, client_id: &str) -> Result<Vec<Meeting>>;

    /// The dashboard aggregate.
    async fn dashboard_overview(&self) -> Result<DashboardData>;
}
