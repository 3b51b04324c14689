mod brief;
mod client;
mod dashboard;
mod meeting;
mod mock_data;
mod operations;

pub use brief::{
    AssetAllocation, BriefSummary, DataFreshness, DeepLinks, LastMeetingRecap, MeetingBrief,
    Opportunity, OpportunityKind, PortfolioSnapshot, Priority, ValueChange,
};
pub use client::{
    Client, ClientStatus, ClientSummary, ClientType, HistoryHit, HistorySearchResults,
    RiskTolerance,
};
pub use dashboard::{
    ActivityItem, ActivityKind, DashboardData, DashboardMetrics, HealthState, IntegrationStatus,
    SystemHealth,
};
pub use meeting::{
    ActionItem, ActionItemStatus, Interaction, InteractionKind, Meeting, MeetingStatus, MeetingType,
};
pub use mock_data::{brief_template, history_results, seed_clients, seed_dashboard, seed_meetings};
pub use operations::{
    filter_clients, meetings_for_client, scheduled_meetings, summarize_clients, total_aum,
};
