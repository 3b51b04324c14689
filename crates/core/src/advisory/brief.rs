use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::meeting::{ActionItem, Interaction};

/// Urgency bucket for opportunities and activity items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Returns the wire/display name for this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Sort rank; lower ranks first.
    pub fn sort_rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// Category of a detected advisory opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    Rebalancing,
    TaxLossHarvesting,
    Lending,
    InsuranceGap,
}

impl OpportunityKind {
    /// Returns the wire name for this opportunity kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityKind::Rebalancing => "rebalancing",
            OpportunityKind::TaxLossHarvesting => "tax_loss_harvesting",
            OpportunityKind::Lending => "lending",
            OpportunityKind::InsuranceGap => "insurance_gap",
        }
    }
}

/// An actionable opportunity surfaced by upstream analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub priority: Priority,
    /// 0-100 model score backing the priority bucket.
    pub priority_score: u8,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_value: Option<f64>,
    pub recommended_action: String,
}

impl Opportunity {
    /// Creates an opportunity.
    pub fn new(
        kind: OpportunityKind,
        priority: Priority,
        priority_score: u8,
        description: impl Into<String>,
        recommended_action: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            priority,
            priority_score,
            description: description.into(),
            estimated_value: None,
            recommended_action: recommended_action.into(),
        }
    }

    /// Sets the estimated dollar value of acting on this opportunity.
    pub fn with_estimated_value(mut self, value: f64) -> Self {
        self.estimated_value = Some(value);
        self
    }
}

/// "As of" stamps for each upstream feeding the brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFreshness {
    pub portfolio: DateTime<Utc>,
    pub crm: DateTime<Utc>,
    pub documents: DateTime<Utc>,
}

/// Recap of the most recent completed meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMeetingRecap {
    pub date: NaiveDate,
    pub summary: String,
    pub action_items_completed: u32,
    pub action_items_pending: u32,
}

/// Narrative section of a brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefSummary {
    pub last_meeting: LastMeetingRecap,
    pub key_topics: Vec<String>,
    pub questions_to_ask: Vec<String>,
}

/// Dollar change since the last meeting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    pub absolute: f64,
    pub percent: f64,
}

/// Portfolio weights by asset class, as fractions summing to ~1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetAllocation {
    pub equity: f64,
    pub fixed_income: f64,
    pub alternatives: f64,
    pub cash: f64,
}

/// Point-in-time portfolio view embedded in a brief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub change_since_last_meeting: ValueChange,
    pub asset_allocation: AssetAllocation,
}

/// Jump-off URLs into the upstream systems of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLinks {
    pub crm_record: String,
    pub portfolio: String,
    pub documents: String,
}

/// The meeting-preparation aggregate generated server-side per client.
///
/// Read-mostly: regenerating one is expensive and explicitly user-triggered,
/// so `generated_at` and the per-upstream freshness stamps travel with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingBrief {
    pub client_id: String,
    pub generated_at: DateTime<Utc>,
    pub data_freshness: DataFreshness,
    pub summary: BriefSummary,
    pub portfolio: PortfolioSnapshot,
    pub opportunities: Vec<Opportunity>,
    pub pending_action_items: Vec<ActionItem>,
    pub recent_interactions: Vec<Interaction>,
    pub deep_links: DeepLinks,
}

impl MeetingBrief {
    /// Re-addresses this brief to another client with a fresh generation stamp.
    pub fn regenerated_for(mut self, client_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        self.client_id = client_id.into();
        self.generated_at = now;
        self
    }
}
