//! Typed, cached access to the advisor data source.
//!
//! Builds the resource key for each operation, routes reads through the
//! query cache, and delegates the actual fetch to the composed
//! `AdvisorSource`. Values cross the cache boundary as JSON bytes.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use briefdesk_core::advisory::{
    Client, ClientSummary, DashboardData, HistorySearchResults, Meeting, MeetingBrief,
};
use briefdesk_core::api::{
    BriefRequest, ClientListQuery, HistorySearchQuery, PaginatedResponse, Result, SourceError,
};
use briefdesk_core::query::{
    brief_key, client_history_key, client_key, client_meetings_key, client_scope_pattern,
    client_summaries_key, clients_list_key, dashboard_key, meeting_key, meetings_upcoming_key,
};
use briefdesk_core::source::AdvisorSource;

use crate::query::QueryCache;

/// Per-resource read functions shared by every consumer.
#[derive(Clone)]
pub struct AdvisorService {
    source: Arc<dyn AdvisorSource>,
    cache: QueryCache,
}

impl AdvisorService {
    pub fn new(source: Arc<dyn AdvisorSource>, cache: QueryCache) -> Self {
        Self { source, cache }
    }

    /// Lists clients with filters and pagination.
    pub async fn list_clients(&self, query: &ClientListQuery) -> Result<PaginatedResponse<Client>> {
        let key = clients_list_key(query);
        let source = Arc::clone(&self.source);
        let query = query.clone();
        self.cached(&key, move || {
            let source = Arc::clone(&source);
            let query = query.clone();
            async move { source.list_clients(&query).await }
        })
        .await
    }

    /// Gets a client by id.
    pub async fn get_client(&self, id: &str) -> Result<Client> {
        let key = client_key(id);
        let source = Arc::clone(&self.source);
        let id = id.to_string();
        self.cached(&key, move || {
            let source = Arc::clone(&source);
            let id = id.clone();
            async move { source.get_client(&id).await }
        })
        .await
    }

    /// The first `limit` client summaries.
    pub async fn client_summaries(&self, limit: u32) -> Result<Vec<ClientSummary>> {
        let key = client_summaries_key(limit);
        let source = Arc::clone(&self.source);
        self.cached(&key, move || {
            let source = Arc::clone(&source);
            async move { source.client_summaries(limit).await }
        })
        .await
    }

    /// Searches one client's interaction and document history.
    pub async fn search_history(
        &self,
        client_id: &str,
        query: &HistorySearchQuery,
    ) -> Result<HistorySearchResults> {
        let key = client_history_key(client_id, query);
        let source = Arc::clone(&self.source);
        let client_id = client_id.to_string();
        let query = query.clone();
        self.cached(&key, move || {
            let source = Arc::clone(&source);
            let client_id = client_id.clone();
            let query = query.clone();
            async move { source.search_history(&client_id, &query).await }
        })
        .await
    }

    /// Generates a meeting brief.
    ///
    /// `force_refresh` bypasses cache freshness here and is forwarded to the
    /// source so the backend rebuilds its aggregate too. It also drops the
    /// client's cached scope, since regeneration implies fresher upstream
    /// data than any entry under that client.
    pub async fn generate_brief(
        &self,
        client_id: &str,
        request: &BriefRequest,
    ) -> Result<MeetingBrief> {
        let key = brief_key(client_id, request.meeting_date);
        let source = Arc::clone(&self.source);
        let client_id_owned = client_id.to_string();
        let request_owned = request.clone();
        let fetch = move || {
            let source = Arc::clone(&source);
            let client_id = client_id_owned.clone();
            let request = request_owned.clone();
            async move {
                let brief = source.generate_brief(&client_id, &request).await?;
                encode(&brief)
            }
        };

        let bytes = if request.force_refresh {
            // Forced regeneration means the client's upstream data moved;
            // drop the cached client scope so subsequent reads refetch.
            self.invalidate_client(client_id).await;
            self.cache.force_refresh(&key, fetch).await?
        } else {
            self.cache.resolve(&key, fetch).await?
        };
        decode(&bytes)
    }

    /// Meetings still on the calendar.
    pub async fn upcoming_meetings(&self) -> Result<Vec<Meeting>> {
        let key = meetings_upcoming_key();
        let source = Arc::clone(&self.source);
        self.cached(&key, move || {
            let source = Arc::clone(&source);
            async move { source.upcoming_meetings().await }
        })
        .await
    }

    /// Gets a meeting by id.
    pub async fn get_meeting(&self, id: &str) -> Result<Meeting> {
        let key = meeting_key(id);
        let source = Arc::clone(&self.source);
        let id = id.to_string();
        self.cached(&key, move || {
            let source = Arc::clone(&source);
            let id = id.clone();
            async move { source.get_meeting(&id).await }
        })
        .await
    }

    /// All meetings for one client.
    pub async fn meetings_for_client(&self, client_id: &str) -> Result<Vec<Meeting>> {
        let key = client_meetings_key(client_id);
        let source = Arc::clone(&self.source);
        let client_id = client_id.to_string();
        self.cached(&key, move || {
            let source = Arc::clone(&source);
            let client_id = client_id.clone();
            async move { source.meetings_for_client(&client_id).await }
        })
        .await
    }

    /// The dashboard aggregate.
    pub async fn dashboard_overview(&self) -> Result<DashboardData> {
        let key = dashboard_key();
        let source = Arc::clone(&self.source);
        self.cached(&key, move || {
            let source = Arc::clone(&source);
            async move { source.dashboard_overview().await }
        })
        .await
    }

    /// Drops every cached sub-resource of one client plus its record.
    pub async fn invalidate_client(&self, client_id: &str) {
        self.cache.invalidate(&client_key(client_id)).await;
        self.cache
            .invalidate_pattern(&client_scope_pattern(client_id))
            .await;
    }

    async fn cached<T, F, Fut>(&self, key: &str, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let bytes = self
            .cache
            .resolve(key, move || {
                let value = fetch();
                async move { encode(&value.await?) }
            })
            .await?;
        decode(&bytes)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|err| SourceError::Unknown(err.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|err| SourceError::Unknown(err.to_string()))
}
