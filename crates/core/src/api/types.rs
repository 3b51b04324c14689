use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::advisory::ClientStatus;

/// Paginated list envelope used by the advisor API.
///
/// `total_pages` and `total_results` describe the filtered set before
/// pagination; `results` holds at most `limit` items for the requested
/// 1-indexed `page`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_results: u32,
}

impl<T> PaginatedResponse<T> {
    /// Slices one page out of an already-filtered result set.
    ///
    /// Totals are computed from the full filtered set before slicing. `page`
    /// and `limit` are clamped to at least 1; a page past the end yields an
    /// empty `results` with the true totals intact.
    pub fn paginate(filtered: Vec<T>, page: u32, limit: u32) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_results = filtered.len() as u32;
        let total_pages = total_results.div_ceil(limit);
        // Widened before multiplying; large page numbers must land past the
        // end, not wrap.
        let start = (page as usize - 1).saturating_mul(limit as usize);
        let results: Vec<T> = filtered
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();

        Self {
            results,
            page,
            limit,
            total_pages,
            total_results,
        }
    }

    /// True when pages beyond this one exist.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Some list endpoints respond with either a bare array or a paginated
/// envelope. Decoding through this shape accepts both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Paginated(PaginatedResponse<T>),
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// Unwraps to the item list, discarding pagination metadata if present.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Paginated(page) => page.results,
            ListEnvelope::Bare(items) => items,
        }
    }
}

/// Query parameters for listing clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ClientListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
            search: None,
        }
    }
}

impl ClientListQuery {
    /// First page of ten, unfiltered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the 1-indexed page, clamped to at least 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size, clamped to at least 1.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Filters by exact status.
    pub fn with_status(mut self, status: ClientStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filters by case-insensitive name substring.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Query parameters for a client history search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySearchQuery {
    #[serde(rename = "q")]
    pub query: String,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl HistorySearchQuery {
    /// Searches for `query` with the default limit of 10.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: 10,
            types: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Caps the number of hits.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Restricts to the given record kinds.
    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = Some(types);
        self
    }

    /// Restricts to hits within the inclusive date range.
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }
}

/// Request body for generating a meeting brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefRequest {
    pub meeting_date: NaiveDate,
    /// Regenerate even if a cached brief is still fresh.
    #[serde(default)]
    pub force_refresh: bool,
}

impl BriefRequest {
    /// Brief for a meeting on the given date, served from cache when fresh.
    pub fn new(meeting_date: NaiveDate) -> Self {
        Self {
            meeting_date,
            force_refresh: false,
        }
    }

    /// Forces regeneration regardless of cache freshness.
    pub fn forced(mut self) -> Self {
        self.force_refresh = true;
        self
    }
}
