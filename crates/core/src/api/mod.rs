mod error;
mod types;

pub use error::{Result, SourceError};
pub use types::{
    BriefRequest, ClientListQuery, HistorySearchQuery, ListEnvelope, PaginatedResponse,
};
