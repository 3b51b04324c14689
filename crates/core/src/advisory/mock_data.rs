//! Fixture dataset for the mock data source.
//!
//! Pure constructors with pinned values; the mock source and the test suites
//! both rely on these exact records (ids, AUM figures, meeting dates).

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::brief::{
    AssetAllocation, BriefSummary, DataFreshness, DeepLinks, LastMeetingRecap, MeetingBrief,
    Opportunity, OpportunityKind, PortfolioSnapshot, Priority, ValueChange,
};
use super::client::{
    Client, ClientStatus, ClientType, HistoryHit, HistorySearchResults, RiskTolerance,
};
use super::dashboard::{
    ActivityItem, ActivityKind, DashboardData, DashboardMetrics, HealthState, IntegrationStatus,
    SystemHealth,
};
use super::meeting::{
    ActionItem, ActionItemStatus, Interaction, InteractionKind, Meeting, MeetingStatus, MeetingType,
};
use super::operations::{scheduled_meetings, summarize_clients, total_aum};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn stamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap()
}

/// The three-client book of business.
pub fn seed_clients() -> Vec<Client> {
    vec![
        Client::new(
            "client-1",
            "Johnson Family Trust",
            ClientType::Trust,
            "household-1",
            ClientStatus::Active,
            2_450_000.0,
        )
        .with_advisor("1")
        .with_meeting_dates(date(2024, 8, 15), date(2024, 11, 15))
        .with_risk_tolerance(RiskTolerance::Moderate)
        .with_timestamps(stamp(2024, 1, 15, 0, 0, 0), stamp(2024, 10, 1, 0, 0, 0)),
        Client::new(
            "client-2",
            "Michael & Sarah Chen",
            ClientType::Joint,
            "household-2",
            ClientStatus::Active,
            1_250_000.0,
        )
        .with_advisor("1")
        .with_meeting_dates(date(2024, 9, 20), date(2024, 12, 20))
        .with_risk_tolerance(RiskTolerance::Aggressive)
        .with_timestamps(stamp(2024, 2, 1, 0, 0, 0), stamp(2024, 9, 20, 0, 0, 0)),
        Client::new(
            "client-3",
            "Robert Williams",
            ClientType::Individual,
            "household-3",
            ClientStatus::Prospect,
            750_000.0,
        )
        .with_advisor("1")
        .with_timestamps(stamp(2024, 10, 1, 0, 0, 0), stamp(2024, 10, 1, 0, 0, 0)),
    ]
}

/// Meetings on the book: two scheduled, one completed review.
pub fn seed_meetings() -> Vec<Meeting> {
    vec![
        Meeting::new(
            "meeting-1",
            "client-1",
            stamp(2024, 11, 15, 10, 0, 0),
            MeetingType::Review,
            MeetingStatus::Scheduled,
        )
        .with_duration(60),
        Meeting::new(
            "meeting-2",
            "client-2",
            stamp(2024, 11, 18, 14, 0, 0),
            MeetingType::Planning,
            MeetingStatus::Scheduled,
        )
        .with_duration(90),
        Meeting::new(
            "meeting-3",
            "client-1",
            stamp(2024, 8, 15, 10, 0, 0),
            MeetingType::Review,
            MeetingStatus::Completed,
        )
        .with_duration(60)
        .with_summary("Discussed Q2 performance and college planning"),
    ]
}

/// Brief template for client-1. The mock source re-addresses it per request
/// and stamps a fresh `generated_at`.
pub fn brief_template() -> MeetingBrief {
    MeetingBrief {
        client_id: "client-1".to_string(),
        generated_at: stamp(2024, 11, 14, 15, 30, 0),
        data_freshness: DataFreshness {
            portfolio: stamp(2024, 11, 13, 23, 59, 59),
            crm: stamp(2024, 11, 14, 15, 29, 0),
            documents: stamp(2024, 11, 14, 10, 0, 0),
        },
        summary: BriefSummary {
            last_meeting: LastMeetingRecap {
                date: date(2024, 8, 15),
                summary: "Discussed Q2 performance and college planning".to_string(),
                action_items_completed: 3,
                action_items_pending: 1,
            },
            key_topics: vec![
                "Review portfolio rebalancing opportunity (10% drift from target)".to_string(),
                "Follow up on estate planning documents (pending)".to_string(),
                "Discuss tax-loss harvesting opportunity ($15K potential savings)".to_string(),
            ],
            questions_to_ask: vec![
                "Have you completed the trust amendment we discussed?".to_string(),
                "Any changes to your income or tax situation?".to_string(),
                "Are you still planning to purchase vacation home next year?".to_string(),
            ],
        },
        portfolio: PortfolioSnapshot {
            total_value: 2_450_000.0,
            change_since_last_meeting: ValueChange {
                absolute: 125_000.0,
                percent: 5.4,
            },
            asset_allocation: AssetAllocation {
                equity: 0.62,
                fixed_income: 0.25,
                alternatives: 0.08,
                cash: 0.05,
            },
        },
        opportunities: vec![
            Opportunity::new(
                OpportunityKind::Rebalancing,
                Priority::High,
                85,
                "Portfolio has drifted 10.2% from target allocation",
                "Schedule rebalancing review",
            ),
            Opportunity::new(
                OpportunityKind::TaxLossHarvesting,
                Priority::Medium,
                72,
                "3 securities with unrealized losses totaling $15,200",
                "Discuss tax-loss harvesting before year-end",
            )
            .with_estimated_value(15_200.0),
        ],
        pending_action_items: vec![ActionItem::new(
            "Send updated trust documents to estate attorney",
            date(2024, 9, 30),
            "advisor",
        )
        .with_days_overdue(45)
        .with_status(ActionItemStatus::Open)],
        recent_interactions: vec![Interaction::new(
            date(2024, 10, 20),
            InteractionKind::Email,
            "Client inquired about mortgage refinancing options",
            false,
        )],
        deep_links: DeepLinks {
            crm_record: "https://yourcrm.com/clients/12345".to_string(),
            portfolio: "https://orion.com/accounts/...".to_string(),
            documents: "https://sharepoint.com/clients/...".to_string(),
        },
    }
}

/// Canned history search hits, echoing the caller's query.
pub fn history_results(query: &str) -> HistorySearchResults {
    HistorySearchResults::new(
        query,
        vec![
            HistoryHit::new(
                "interaction-789",
                "meeting",
                date(2024, 8, 15),
                0.92,
                "Discussed updating trust to add grandchildren as beneficiaries",
                "salesforce",
                "https://salesforce.com/...",
            )
            .with_snippet(
                "...client expressed desire to include grandchildren in estate plan. \
                 Recommended trust amendment to add per stirpes distribution...",
            ),
            HistoryHit::new(
                "doc-456",
                "document",
                date(2024, 6, 10),
                0.87,
                "Johnson Family Revocable Trust - Original document",
                "sharepoint",
                "https://sharepoint.com/...",
            )
            .with_document_type("trust_document"),
        ],
    )
}

/// The dashboard aggregate, composed from the other seeds.
pub fn seed_dashboard() -> DashboardData {
    let clients = seed_clients();
    let meetings = seed_meetings();
    let summaries = summarize_clients(&clients);

    let system_health = SystemHealth {
        crm: IntegrationStatus::new(HealthState::Healthy, stamp(2024, 11, 14, 15, 29, 0)),
        portfolio: IntegrationStatus::new(HealthState::Healthy, stamp(2024, 11, 13, 23, 59, 59)),
        custodian: IntegrationStatus::new(HealthState::Warning, stamp(2024, 11, 14, 8, 0, 0))
            .with_message("Rate limit exceeded"),
        documents: IntegrationStatus::new(HealthState::Healthy, stamp(2024, 11, 14, 10, 0, 0)),
        email: IntegrationStatus::new(HealthState::Healthy, stamp(2024, 11, 14, 15, 25, 0)),
    };

    let recent_activity = vec![
        ActivityItem::new(
            "activity-1",
            ActivityKind::Opportunity,
            "Rebalancing Opportunity Detected",
            "Johnson Family Trust portfolio has drifted 10.2% from target",
            stamp(2024, 11, 14, 9, 30, 0),
        )
        .with_client_name("Johnson Family Trust")
        .with_priority(Priority::High),
        ActivityItem::new(
            "activity-2",
            ActivityKind::Document,
            "New Document Processed",
            "Brokerage statement successfully classified and processed",
            stamp(2024, 11, 14, 8, 15, 0),
        )
        .with_client_name("Michael & Sarah Chen")
        .with_priority(Priority::Medium),
        ActivityItem::new(
            "activity-3",
            ActivityKind::Meeting,
            "Meeting Completed",
            "Quarterly review meeting completed with action items",
            stamp(2024, 11, 13, 16, 0, 0),
        )
        .with_client_name("Robert Williams")
        .with_priority(Priority::Low),
    ];

    DashboardData {
        upcoming_meetings: scheduled_meetings(&meetings),
        recent_activity,
        system_health,
        // Top 5 clients by stored order.
        client_summary: summaries.into_iter().take(5).collect(),
        metrics: DashboardMetrics {
            total_clients: clients.len() as u32,
            total_aum: total_aum(&clients),
            meetings_this_week: 3,
            pending_opportunities: 8,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_clients_shape() {
        let clients = seed_clients();

        assert_eq!(clients.len(), 3);
        assert_eq!(clients[0].id, "client-1");
        assert_eq!(clients[0].kind, ClientType::Trust);
        assert_eq!(clients[1].status, ClientStatus::Active);
        assert_eq!(clients[2].status, ClientStatus::Prospect);
        assert!(clients[2].last_meeting_date.is_none());
    }

    #[test]
    fn test_seed_meetings_reference_seed_clients() {
        let clients = seed_clients();
        let meetings = seed_meetings();

        assert_eq!(meetings.len(), 3);
        for meeting in &meetings {
            assert!(clients.iter().any(|client| client.id == meeting.client_id));
        }
    }

    #[test]
    fn test_brief_template_is_for_first_client() {
        let brief = brief_template();

        assert_eq!(brief.client_id, "client-1");
        assert_eq!(brief.summary.key_topics.len(), 3);
        assert_eq!(brief.summary.questions_to_ask.len(), 3);
        assert_eq!(brief.opportunities.len(), 2);
        assert_eq!(brief.pending_action_items[0].days_overdue, Some(45));
        assert_eq!(brief.portfolio.total_value, 2_450_000.0);
    }

    #[test]
    fn test_history_results_echo_query() {
        let results = history_results("trust amendment");

        assert_eq!(results.query, "trust amendment");
        assert_eq!(results.results_count, 2);
        assert_eq!(results.results[0].source_system, "salesforce");
        assert_eq!(
            results.results[1].document_type.as_deref(),
            Some("trust_document")
        );
    }

    #[test]
    fn test_dashboard_composition() {
        let dashboard = seed_dashboard();

        assert_eq!(dashboard.upcoming_meetings.len(), 2);
        assert_eq!(dashboard.recent_activity.len(), 3);
        assert_eq!(dashboard.client_summary.len(), 3);
        assert_eq!(dashboard.system_health.degraded_count(), 1);
        assert_eq!(dashboard.metrics.total_clients, 3);
        assert_eq!(dashboard.metrics.total_aum, 4_450_000.0);
        assert_eq!(dashboard.metrics.pending_opportunities, 8);
    }
}
