//! Query cache coordination: entry store, staleness, and fetch scheduling.

mod cache;
mod coordinator;

pub use cache::CacheTuning;
pub use coordinator::QueryCache;
