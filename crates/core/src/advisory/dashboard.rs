use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::brief::Priority;
use super::client::ClientSummary;
use super::meeting::Meeting;

/// Category of an activity feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Meeting,
    Document,
    Opportunity,
    Task,
}

/// One row of the dashboard activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl ActivityItem {
    /// Creates an activity item.
    pub fn new(
        id: impl Into<String>,
        kind: ActivityKind,
        title: impl Into<String>,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: description.into(),
            timestamp,
            client_name: None,
            priority: None,
        }
    }

    /// Associates the item with a client by display name.
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    /// Sets the urgency bucket.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Health of a single upstream integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    Warning,
    Error,
}

impl HealthState {
    /// Returns the wire/display name for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Healthy => "healthy",
            HealthState::Warning => "warning",
            HealthState::Error => "error",
        }
    }

    /// True when the integration needs attention.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, HealthState::Healthy)
    }
}

/// Sync status for one upstream system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationStatus {
    pub status: HealthState,
    pub last_sync: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntegrationStatus {
    /// Creates a status record.
    pub fn new(status: HealthState, last_sync: DateTime<Utc>) -> Self {
        Self {
            status,
            last_sync,
            message: None,
        }
    }

    /// Attaches an operator-facing message (rate limits, outages).
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Per-integration health block on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub crm: IntegrationStatus,
    pub portfolio: IntegrationStatus,
    pub custodian: IntegrationStatus,
    pub documents: IntegrationStatus,
    pub email: IntegrationStatus,
}

impl SystemHealth {
    /// Count of integrations currently degraded.
    pub fn degraded_count(&self) -> usize {
        [
            &self.crm,
            &self.portfolio,
            &self.custodian,
            &self.documents,
            &self.email,
        ]
        .iter()
        .filter(|integration| integration.status.is_degraded())
        .count()
    }
}

/// Headline numbers on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_clients: u32,
    pub total_aum: f64,
    pub meetings_this_week: u32,
    pub pending_opportunities: u32,
}

/// The dashboard overview aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub upcoming_meetings: Vec<Meeting>,
    pub recent_activity: Vec<ActivityItem>,
    pub system_health: SystemHealth,
    pub client_summary: Vec<ClientSummary>,
    pub metrics: DashboardMetrics,
}
