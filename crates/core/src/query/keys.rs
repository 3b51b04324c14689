//! Resource-key construction and matching for the query cache.
//!
//! A key is `<resource>` or `<resource>?<canonical params>`. Canonicalization
//! sorts parameter names, drops absent ones, and renders scalars in a
//! type-insensitive form, so equivalent requests collide on the same key no
//! matter how their parameters were ordered or typed.

use chrono::NaiveDate;
use serde_json::Value;

use crate::api::{ClientListQuery, HistorySearchQuery};

/// Renders a JSON value in canonical key form.
///
/// Scalars render bare (`1` and `"1"` are both `1`), arrays join with commas,
/// and objects become `name=value` pairs sorted by name with nulls dropped.
pub fn canonical_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(canonical_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(map) => {
            let mut fields: Vec<(&String, &Value)> =
                map.iter().filter(|(_, v)| !v.is_null()).collect();
            fields.sort_by_key(|(name, _)| name.as_str());
            fields
                .iter()
                .map(|(name, v)| format!("{name}={}", canonical_value(v)))
                .collect::<Vec<_>>()
                .join("&")
        }
    }
}

/// Builds a cache key from a resource name and a serializable parameter set.
pub fn resource_key<P: serde::Serialize>(resource: &str, params: &P) -> String {
    let value = serde_json::to_value(params).unwrap_or(Value::Null);
    let canonical = canonical_value(&value);
    if canonical.is_empty() {
        resource.to_string()
    } else {
        format!("{resource}?{canonical}")
    }
}

/// Key for a filtered, paginated client listing.
pub fn clients_list_key(query: &ClientListQuery) -> String {
    resource_key("clients", query)
}

/// Key for a single client record.
pub fn client_key(client_id: &str) -> String {
    format!("clients:{client_id}")
}

/// Key for the client summary strip.
pub fn client_summaries_key(limit: u32) -> String {
    format!("clients:summaries?limit={limit}")
}

/// Key for a client history search.
pub fn client_history_key(client_id: &str, query: &HistorySearchQuery) -> String {
    resource_key(&format!("clients:{client_id}:history"), query)
}

/// Key for a client's meeting list.
pub fn client_meetings_key(client_id: &str) -> String {
    format!("clients:{client_id}:meetings")
}

/// Key for a client's meeting brief.
///
/// Identity is the client and meeting date only; `force_refresh` changes how
/// the entry is fetched, not which entry it is.
pub fn brief_key(client_id: &str, meeting_date: NaiveDate) -> String {
    format!("clients:{client_id}:brief?meeting_date={meeting_date}")
}

/// Pattern covering every sub-resource of one client (meetings, brief,
/// history searches). The bare client record key is separate.
pub fn client_scope_pattern(client_id: &str) -> String {
    format!("clients:{client_id}:*")
}

/// Key for the upcoming-meetings list.
pub fn meetings_upcoming_key() -> String {
    "meetings:upcoming".to_string()
}

/// Key for a single meeting.
pub fn meeting_key(meeting_id: &str) -> String {
    format!("meetings:{meeting_id}")
}

/// Key for the dashboard overview.
pub fn dashboard_key() -> String {
    "dashboard:overview".to_string()
}

/// Checks whether a key matches an invalidation pattern.
///
/// A pattern is either an exact key or a scope prefix ending in `*`, which
/// matches every key sharing that prefix. Invalidation only ever addresses a
/// resource scope, so no richer matching exists.
pub fn key_matches(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => pattern == key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::ClientStatus;
    use serde_json::json;

    #[test]
    fn test_clients_list_key_sorts_params() {
        let query = ClientListQuery::new()
            .with_search("chen")
            .with_status(ClientStatus::Active);

        let key = clients_list_key(&query);

        assert_eq!(key, "clients?limit=10&page=1&search=chen&status=active");
    }

    #[test]
    fn test_clients_list_key_omits_absent_filters() {
        let key = clients_list_key(&ClientListQuery::new());

        assert_eq!(key, "clients?limit=10&page=1");
    }

    #[test]
    fn test_key_is_type_insensitive_for_scalars() {
        let as_number = resource_key("clients", &json!({"page": 1, "limit": 10}));
        let as_string = resource_key("clients", &json!({"page": "1", "limit": "10"}));

        assert_eq!(as_number, as_string);
    }

    #[test]
    fn test_key_is_order_insensitive() {
        let forward = resource_key("clients", &json!({"page": 1, "status": "active"}));
        let backward = resource_key("clients", &json!({"status": "active", "page": 1}));

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_different_values_produce_different_keys() {
        let first = resource_key("clients", &json!({"page": 1}));
        let second = resource_key("clients", &json!({"page": 2}));

        assert_ne!(first, second);
    }

    #[test]
    fn test_array_params_join_with_commas() {
        let key = resource_key("search", &json!({"types": ["meeting", "document"]}));

        assert_eq!(key, "search?types=meeting,document");
    }

    #[test]
    fn test_client_history_key() {
        let query = crate::api::HistorySearchQuery::new("trust").with_limit(5);

        let key = client_history_key("client-1", &query);

        assert_eq!(key, "clients:client-1:history?limit=5&q=trust");
    }

    #[test]
    fn test_brief_key_ignores_force_refresh() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();

        // Forced and unforced requests address the same entry.
        let key = brief_key("client-1", date);

        assert_eq!(key, "clients:client-1:brief?meeting_date=2024-11-15");
    }

    #[test]
    fn test_singleton_keys() {
        assert_eq!(meetings_upcoming_key(), "meetings:upcoming");
        assert_eq!(meeting_key("meeting-2"), "meetings:meeting-2");
        assert_eq!(dashboard_key(), "dashboard:overview");
        assert_eq!(client_key("client-3"), "clients:client-3");
        assert_eq!(client_summaries_key(5), "clients:summaries?limit=5");
        assert_eq!(client_meetings_key("client-1"), "clients:client-1:meetings");
    }

    #[test]
    fn test_key_matches_exact_and_wildcard() {
        assert!(key_matches("dashboard:overview", "dashboard:overview"));
        assert!(!key_matches("dashboard:overview", "meetings:upcoming"));
        assert!(key_matches("*", "anything"));

        let scope = client_scope_pattern("client-1");
        assert!(key_matches(&scope, "clients:client-1:meetings"));
        assert!(key_matches(
            &scope,
            "clients:client-1:brief?meeting_date=2024-11-15"
        ));
        assert!(!key_matches(&scope, "clients:client-1"));
        assert!(!key_matches(&scope, "clients:client-10:meetings"));
    }

    #[test]
    fn test_key_matches_list_keys() {
        assert!(key_matches("clients?*", "clients?limit=10&page=1"));
        assert!(!key_matches("clients?*", "clients:client-1"));
    }
}
