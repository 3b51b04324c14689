//! Cache identity for queries: key builders and pattern matching.

mod keys;

pub use keys::{
    brief_key, canonical_value, client_history_key, client_key, client_meetings_key,
    client_scope_pattern, client_summaries_key, clients_list_key, dashboard_key, key_matches,
    meeting_key, meetings_upcoming_key, resource_key,
};
