//! Application composition root.
//!
//! Selects the data source once at startup and wires it to the query cache.
//! Nothing else in the process touches the cache or the source directly.

use std::sync::Arc;

use briefdesk_client::ApiClient;
use briefdesk_core::source::AdvisorSource;

use crate::config::{Config, SourceMode};
use crate::query::{CacheTuning, QueryCache};
use crate::service::AdvisorService;
use crate::source::MockSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: AdvisorService,
}

impl AppState {
    /// Composes the service for the chosen mode.
    pub fn build(mode: SourceMode, base_url: &str, config: &Config) -> anyhow::Result<Self> {
        let source: Arc<dyn AdvisorSource> = match mode {
            SourceMode::Mock => {
                tracing::info!(latency_ms = config.mock_latency_ms, "using mock data source");
                Arc::new(MockSource::new(config.mock_latency()))
            }
            SourceMode::Remote => {
                tracing::info!(base_url, "using remote data source");
                Arc::new(ApiClient::new(base_url, config.request_timeout())?)
            }
        };

        let cache = QueryCache::new(CacheTuning {
            fresh_window: config.fresh_window(),
            gc_window: config.gc_window(),
            max_entries: config.cache_max_entries,
            max_retries: config.max_retries,
            ..CacheTuning::default()
        });

        Ok(Self {
            service: AdvisorService::new(source, cache),
        })
    }
}
