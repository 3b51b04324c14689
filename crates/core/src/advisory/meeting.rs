use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Agenda category of a client meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingType {
    Initial,
    Review,
    Planning,
    Emergency,
}

impl MeetingType {
    /// Returns the wire/display name for this meeting type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::Initial => "initial",
            MeetingType::Review => "review",
            MeetingType::Planning => "planning",
            MeetingType::Emergency => "emergency",
        }
    }
}

/// Scheduling state of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

impl MeetingStatus {
    /// Returns the wire/display name for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
            MeetingStatus::Rescheduled => "rescheduled",
        }
    }
}

/// Completion state of an action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionItemStatus {
    Open,
    Completed,
    Cancelled,
}

/// A follow-up task attached to a meeting or brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<u32>,
    pub assigned_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionItemStatus>,
}

impl ActionItem {
    /// Creates an action item.
    pub fn new(
        description: impl Into<String>,
        due_date: NaiveDate,
        assigned_to: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            due_date,
            days_overdue: None,
            assigned_to: assigned_to.into(),
            status: None,
        }
    }

    /// Marks how many days past due this item is.
    pub fn with_days_overdue(mut self, days: u32) -> Self {
        self.days_overdue = Some(days);
        self
    }

    /// Sets the completion state.
    pub fn with_status(mut self, status: ActionItemStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Channel of a recorded client interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Email,
    Call,
    Meeting,
    Note,
}

/// A logged touchpoint with a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub summary: String,
    pub action_required: bool,
}

impl Interaction {
    /// Creates an interaction record.
    pub fn new(
        date: NaiveDate,
        kind: InteractionKind,
        summary: impl Into<String>,
        action_required: bool,
    ) -> Self {
        Self {
            date,
            kind,
            summary: summary.into(),
            action_required,
        }
    }
}

/// A client meeting as served by the advisor API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub client_id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MeetingType,
    pub status: MeetingStatus,
    /// Planned length in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<ActionItem>>,
}

impl Meeting {
    /// Creates a meeting record.
    pub fn new(
        id: impl Into<String>,
        client_id: impl Into<String>,
        date: DateTime<Utc>,
        kind: MeetingType,
        status: MeetingStatus,
    ) -> Self {
        Self {
            id: id.into(),
            client_id: client_id.into(),
            date,
            kind,
            status,
            duration: None,
            summary: None,
            action_items: None,
        }
    }

    /// Sets the planned duration in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    /// Sets the post-meeting summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Attaches action items.
    pub fn with_action_items(mut self, items: Vec<ActionItem>) -> Self {
        self.action_items = Some(items);
        self
    }

    /// True for meetings still on the calendar.
    pub fn is_scheduled(&self) -> bool {
        matches!(self.status, MeetingStatus::Scheduled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_meeting_builder() {
        let date = Utc.with_ymd_and_hms(2024, 11, 15, 10, 0, 0).unwrap();
        let meeting = Meeting::new(
            "meeting-1",
            "client-1",
            date,
            MeetingType::Review,
            MeetingStatus::Scheduled,
        )
        .with_duration(60);

        assert_eq!(meeting.duration, Some(60));
        assert!(meeting.is_scheduled());
        assert_eq!(meeting.summary, None);
    }

    #[test]
    fn test_completed_meeting_is_not_scheduled() {
        let date = Utc.with_ymd_and_hms(2024, 8, 15, 10, 0, 0).unwrap();
        let meeting = Meeting::new(
            "meeting-3",
            "client-1",
            date,
            MeetingType::Review,
            MeetingStatus::Completed,
        )
        .with_summary("Discussed Q2 performance and college planning");

        assert!(!meeting.is_scheduled());
        assert_eq!(
            meeting.summary.as_deref(),
            Some("Discussed Q2 performance and college planning")
        );
    }

    #[test]
    fn test_meeting_wire_format() {
        let json = r#"{
            "id": "meeting-2",
            "client_id": "client-2",
            "date": "2024-11-18T14:00:00Z",
            "type": "planning",
            "status": "scheduled",
            "duration": 90
        }"#;

        let meeting: Meeting = serde_json::from_str(json).expect("deserialize should succeed");

        assert_eq!(meeting.kind, MeetingType::Planning);
        assert_eq!(meeting.duration, Some(90));
        assert_eq!(meeting.action_items, None);

        let round = serde_json::to_value(&meeting).expect("serialize should succeed");
        assert_eq!(round["type"], "planning");
        assert!(round.get("summary").is_none());
    }

    #[test]
    fn test_action_item_overdue_marker() {
        let item = ActionItem::new(
            "Send updated trust documents to estate attorney",
            NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
            "advisor",
        )
        .with_days_overdue(45)
        .with_status(ActionItemStatus::Open);

        assert_eq!(item.days_overdue, Some(45));
        let json = serde_json::to_value(&item).expect("serialize should succeed");
        assert_eq!(json["status"], "open");
    }
}
