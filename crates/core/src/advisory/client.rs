use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Legal structure of the client relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    Individual,
    Joint,
    Trust,
    Entity,
}

impl ClientType {
    /// Returns the wire/display name for this client type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Individual => "individual",
            ClientType::Joint => "joint",
            ClientType::Trust => "trust",
            ClientType::Entity => "entity",
        }
    }
}

/// Relationship stage of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Inactive,
    Prospect,
}

impl ClientStatus {
    /// Returns the wire/display name for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
            ClientStatus::Prospect => "prospect",
        }
    }
}

impl std::str::FromStr for ClientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ClientStatus::Active),
            "inactive" => Ok(ClientStatus::Inactive),
            "prospect" => Ok(ClientStatus::Prospect),
            other => Err(format!("unknown client status: {other}")),
        }
    }
}

/// Stated investment risk appetite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Returns the wire/display name for this tolerance level.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTolerance::Conservative => "conservative",
            RiskTolerance::Moderate => "moderate",
            RiskTolerance::Aggressive => "aggressive",
        }
    }
}

/// A client household record as served by the advisor API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ClientType,
    pub household_id: String,
    pub primary_advisor_id: String,
    pub status: ClientStatus,
    /// Assets under management, in dollars.
    pub aum: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_meeting_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_meeting_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<RiskTolerance>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new client record. Timestamps default to now.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ClientType,
        household_id: impl Into<String>,
        status: ClientStatus,
        aum: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            household_id: household_id.into(),
            primary_advisor_id: String::new(),
            status,
            aum,
            last_meeting_date: None,
            next_meeting_date: None,
            risk_tolerance: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the advising relationship owner.
    pub fn with_advisor(mut self, advisor_id: impl Into<String>) -> Self {
        self.primary_advisor_id = advisor_id.into();
        self
    }

    /// Sets the last and next meeting dates.
    pub fn with_meeting_dates(mut self, last: NaiveDate, next: NaiveDate) -> Self {
        self.last_meeting_date = Some(last);
        self.next_meeting_date = Some(next);
        self
    }

    /// Sets the risk tolerance.
    pub fn with_risk_tolerance(mut self, tolerance: RiskTolerance) -> Self {
        self.risk_tolerance = Some(tolerance);
        self
    }

    /// Sets explicit record timestamps (useful for fixtures).
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Case-insensitive substring match against the client name.
    pub fn name_matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Compact client projection used in dashboards and pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    pub status: ClientStatus,
    pub aum: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_meeting_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_meeting_date: Option<NaiveDate>,
}

impl From<&Client> for ClientSummary {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            name: client.name.clone(),
            status: client.status,
            aum: client.aum,
            last_meeting_date: client.last_meeting_date,
            next_meeting_date: client.next_meeting_date,
        }
    }
}

/// One hit from a client history search across upstream systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryHit {
    pub id: String,
    /// Source record kind (e.g. "meeting", "document"); open set, server-defined.
    #[serde(rename = "type")]
    pub kind: String,
    pub date: NaiveDate,
    pub relevance_score: f64,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    pub source_system: String,
    pub deep_link: String,
}

impl HistoryHit {
    /// Creates a hit with the required fields.
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        date: NaiveDate,
        relevance_score: f64,
        summary: impl Into<String>,
        source_system: impl Into<String>,
        deep_link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            date,
            relevance_score,
            summary: summary.into(),
            snippet: None,
            document_type: None,
            source_system: source_system.into(),
            deep_link: deep_link.into(),
        }
    }

    /// Sets the matched-text snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Sets the document type (for document hits).
    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }
}

/// Result set from a client history search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySearchResults {
    pub query: String,
    pub results_count: u32,
    pub results: Vec<HistoryHit>,
}

impl HistorySearchResults {
    /// Wraps a hit list, deriving the count.
    pub fn new(query: impl Into<String>, results: Vec<HistoryHit>) -> Self {
        Self {
            query: query.into(),
            results_count: results.len() as u32,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client() -> Client {
        Client::new(
            "client-9",
            "Evergreen Family Office",
            ClientType::Trust,
            "household-9",
            ClientStatus::Active,
            1_000_000.0,
        )
        .with_advisor("1")
        .with_risk_tolerance(RiskTolerance::Moderate)
    }

    #[test]
    fn test_client_builder() {
        let client = sample_client();

        assert_eq!(client.id, "client-9");
        assert_eq!(client.kind, ClientType::Trust);
        assert_eq!(client.primary_advisor_id, "1");
        assert_eq!(client.risk_tolerance, Some(RiskTolerance::Moderate));
        assert_eq!(client.last_meeting_date, None);
    }

    #[test]
    fn test_name_matches_is_case_insensitive() {
        let client = sample_client();

        assert!(client.name_matches("evergreen"));
        assert!(client.name_matches("FAMILY"));
        assert!(client.name_matches("green Fam"));
        assert!(!client.name_matches("chen"));
    }

    #[test]
    fn test_summary_projection() {
        let client = sample_client().with_meeting_dates(
            NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 11, 15).unwrap(),
        );

        let summary = ClientSummary::from(&client);

        assert_eq!(summary.id, client.id);
        assert_eq!(summary.status, ClientStatus::Active);
        assert_eq!(summary.aum, client.aum);
        assert_eq!(
            summary.next_meeting_date,
            NaiveDate::from_ymd_opt(2024, 11, 15)
        );
    }

    #[test]
    fn test_client_serializes_with_wire_names() {
        let client = sample_client();
        let json = serde_json::to_value(&client).expect("serialize should succeed");

        assert_eq!(json["type"], "trust");
        assert_eq!(json["status"], "active");
        assert_eq!(json["risk_tolerance"], "moderate");
        // Absent optionals are omitted, not null.
        assert!(json.get("last_meeting_date").is_none());
    }

    #[test]
    fn test_client_deserializes_from_wire_json() {
        let json = r#"{
            "id": "client-1",
            "name": "Johnson Family Trust",
            "type": "trust",
            "household_id": "household-1",
            "primary_advisor_id": "1",
            "status": "active",
            "aum": 2450000,
            "last_meeting_date": "2024-08-15",
            "next_meeting_date": "2024-11-15",
            "risk_tolerance": "moderate",
            "created_at": "2024-01-15T00:00:00Z",
            "updated_at": "2024-10-01T00:00:00Z"
        }"#;

        let client: Client = serde_json::from_str(json).expect("deserialize should succeed");

        assert_eq!(client.name, "Johnson Family Trust");
        assert_eq!(client.kind, ClientType::Trust);
        assert_eq!(client.aum, 2_450_000.0);
        assert_eq!(
            client.last_meeting_date,
            NaiveDate::from_ymd_opt(2024, 8, 15)
        );
    }

    #[test]
    fn test_history_results_derive_count() {
        let hit = HistoryHit::new(
            "interaction-1",
            "meeting",
            NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            0.9,
            "Quarterly review",
            "salesforce",
            "https://salesforce.com/...",
        )
        .with_snippet("...quarterly review went well...");

        let results = HistorySearchResults::new("review", vec![hit]);

        assert_eq!(results.results_count, 1);
        assert_eq!(results.results[0].kind, "meeting");
    }
}
