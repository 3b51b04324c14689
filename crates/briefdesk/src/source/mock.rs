//! Fixture-backed data source with simulated latency.
//!
//! Serves the pinned seed dataset so callers exercise real pending states
//! without a backend. Filtering, search, and pagination semantics match the
//! remote API contract exactly.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use briefdesk_core::advisory::{
    brief_template, filter_clients, history_results, meetings_for_client, scheduled_meetings,
    seed_clients, seed_dashboard, seed_meetings, summarize_clients, Client, ClientSummary,
    DashboardData, HistorySearchResults, Meeting, MeetingBrief,
};
use briefdesk_core::api::{
    BriefRequest, ClientListQuery, HistorySearchQuery, PaginatedResponse, Result, SourceError,
};
use briefdesk_core::source::AdvisorSource;

/// In-process data source over the fixture dataset.
#[derive(Debug, Clone)]
pub struct MockSource {
    clients: Vec<Client>,
    meetings: Vec<Meeting>,
    latency: Duration,
}

impl MockSource {
    /// Creates a mock source that delays every call by `latency`.
    pub fn new(latency: Duration) -> Self {
        Self {
            clients: seed_clients(),
            meetings: seed_meetings(),
            latency,
        }
    }

    /// A mock source with no simulated latency.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AdvisorSource for MockSource {
    async fn list_clients(&self, query: &ClientListQuery) -> Result<PaginatedResponse<Client>> {
        self.simulate_latency().await;
        // Totals come from the filtered set, before the page is sliced out.
        let filtered = filter_clients(&self.clients, query.status, query.search.as_deref());
        Ok(PaginatedResponse::paginate(
            filtered,
            query.page,
            query.limit,
        ))
    }

    async fn get_client(&self, id: &str) -> Result<Client> {
        self.simulate_latency().await;
        self.clients
            .iter()
            .find(|client| client.id == id)
            .cloned()
            .ok_or_else(|| SourceError::not_found("Client", id))
    }

    async fn client_summaries(&self, limit: u32) -> Result<Vec<ClientSummary>> {
        self.simulate_latency().await;
        Ok(summarize_clients(&self.clients)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn search_history(
        &self,
        _client_id: &str,
        query: &HistorySearchQuery,
    ) -> Result<HistorySearchResults> {
        self.simulate_latency().await;
        Ok(history_results(&query.query))
    }

    async fn generate_brief(
        &self,
        client_id: &str,
        _request: &BriefRequest,
    ) -> Result<MeetingBrief> {
        self.simulate_latency().await;
        // The template is re-addressed per request and stamped as generated now.
        Ok(brief_template().regenerated_for(client_id, Utc::now()))
    }

    async fn upcoming_meetings(&self) -> Result<Vec<Meeting>> {
        self.simulate_latency().await;
        Ok(scheduled_meetings(&self.meetings))
    }

    async fn get_meeting(&self, id: &str) -> Result<Meeting> {
        self.simulate_latency().await;
        self.meetings
            .iter()
            .find(|meeting| meeting.id == id)
            .cloned()
            .ok_or_else(|| SourceError::not_found("Meeting", id))
    }

    async fn meetings_for_client(&self, client_id: &str) -> Result<Vec<Meeting>> {
        self.simulate_latency().await;
        Ok(meetings_for_client(&self.meetings, client_id))
    }

    async fn dashboard_overview(&self) -> Result<DashboardData> {
        self.simulate_latency().await;
        Ok(seed_dashboard())
    }
}
