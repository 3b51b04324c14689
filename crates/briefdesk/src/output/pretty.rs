//! Pretty output formatting.

use briefdesk_core::advisory::{
    Client, ClientSummary, DashboardData, HistorySearchResults, Meeting, MeetingBrief,
};
use briefdesk_core::api::PaginatedResponse;

fn format_money(amount: f64) -> String {
    format!("${:.0}", amount)
}

/// Format a client for display.
pub fn format_client(client: &Client) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Type: {}\n  AUM: {}",
        client.name,
        client.status.as_str(),
        client.id,
        client.kind.as_str(),
        format_money(client.aum),
    );
    if let Some(tolerance) = client.risk_tolerance {
        output.push_str(&format!("\n  Risk tolerance: {}", tolerance.as_str()));
    }
    if let Some(last) = client.last_meeting_date {
        output.push_str(&format!("\n  Last meeting: {last}"));
    }
    if let Some(next) = client.next_meeting_date {
        output.push_str(&format!("\n  Next meeting: {next}"));
    }
    output
}

/// Format a page of clients for display.
pub fn format_clients_page(page: &PaginatedResponse<Client>) -> String {
    if page.results.is_empty() {
        return "No clients found.".to_string();
    }
    let mut output = format!(
        "CLIENTS (page {}/{}, {} total)\n",
        page.page,
        page.total_pages.max(1),
        page.total_results
    );
    output.push_str(&"-".repeat(40));
    for client in &page.results {
        output.push_str(&format!("\n{}", format_client(client)));
        output.push('\n');
    }
    output
}

/// Format client summaries for display.
pub fn format_summaries(summaries: &[ClientSummary]) -> String {
    if summaries.is_empty() {
        return "No clients found.".to_string();
    }
    let mut output = format!("CLIENTS ({})\n", summaries.len());
    output.push_str(&"-".repeat(40));
    for summary in summaries {
        output.push_str(&format!(
            "\n{} [{}] {}",
            summary.name,
            summary.status.as_str(),
            format_money(summary.aum),
        ));
    }
    output
}

/// Format a meeting for display.
pub fn format_meeting(meeting: &Meeting) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Client: {}\n  Date: {}",
        meeting.kind.as_str(),
        meeting.status.as_str(),
        meeting.id,
        meeting.client_id,
        meeting.date.format("%Y-%m-%d %H:%M UTC"),
    );
    if let Some(minutes) = meeting.duration {
        output.push_str(&format!("\n  Duration: {minutes} min"));
    }
    if let Some(summary) = &meeting.summary {
        output.push_str(&format!("\n  Summary: {summary}"));
    }
    output
}

/// Format meetings for display.
pub fn format_meetings(meetings: &[Meeting]) -> String {
    if meetings.is_empty() {
        return "No meetings found.".to_string();
    }
    let mut output = format!("MEETINGS ({})\n", meetings.len());
    output.push_str(&"-".repeat(40));
    for meeting in meetings {
        output.push_str(&format!("\n{}", format_meeting(meeting)));
        output.push('\n');
    }
    output
}

/// Format a meeting brief for display.
pub fn format_brief(brief: &MeetingBrief) -> String {
    let mut output = format!(
        "MEETING BRIEF for {}\nGenerated: {}\n",
        brief.client_id,
        brief.generated_at.format("%Y-%m-%d %H:%M UTC"),
    );
    output.push_str(&"-".repeat(40));

    let recap = &brief.summary.last_meeting;
    output.push_str(&format!(
        "\nLast meeting ({}): {}\n  Action items: {} completed, {} pending",
        recap.date, recap.summary, recap.action_items_completed, recap.action_items_pending,
    ));

    output.push_str("\nKey topics:");
    for topic in &brief.summary.key_topics {
        output.push_str(&format!("\n  - {topic}"));
    }
    output.push_str("\nQuestions to ask:");
    for question in &brief.summary.questions_to_ask {
        output.push_str(&format!("\n  - {question}"));
    }

    let portfolio = &brief.portfolio;
    output.push_str(&format!(
        "\nPortfolio: {} ({:+} / {:+.1}% since last meeting)",
        format_money(portfolio.total_value),
        portfolio.change_since_last_meeting.absolute,
        portfolio.change_since_last_meeting.percent,
    ));

    if !brief.opportunities.is_empty() {
        output.push_str("\nOpportunities:");
        for opportunity in &brief.opportunities {
            output.push_str(&format!(
                "\n  [{}] {} (score {}): {}",
                opportunity.priority.as_str(),
                opportunity.kind.as_str(),
                opportunity.priority_score,
                opportunity.description,
            ));
        }
    }

    if !brief.pending_action_items.is_empty() {
        output.push_str("\nPending action items:");
        for item in &brief.pending_action_items {
            output.push_str(&format!("\n  - {} (due {})", item.description, item.due_date));
            if let Some(days) = item.days_overdue {
                output.push_str(&format!(", {days} days overdue"));
            }
        }
    }

    output
}

/// Format history search results for display.
pub fn format_history(results: &HistorySearchResults) -> String {
    if results.results.is_empty() {
        return format!("No history found for \"{}\".", results.query);
    }
    let mut output = format!(
        "HISTORY for \"{}\" ({} hits)\n",
        results.query, results.results_count
    );
    output.push_str(&"-".repeat(40));
    for hit in &results.results {
        output.push_str(&format!(
            "\n[{:.2}] {} ({}, {}): {}",
            hit.relevance_score, hit.kind, hit.date, hit.source_system, hit.summary,
        ));
    }
    output
}

/// Format the dashboard overview for display.
pub fn format_dashboard(dashboard: &DashboardData) -> String {
    let metrics = &dashboard.metrics;
    let mut output = format!(
        "DASHBOARD\n{}\nClients: {}  AUM: {}  Meetings this week: {}  Open opportunities: {}\n",
        "-".repeat(40),
        metrics.total_clients,
        format_money(metrics.total_aum),
        metrics.meetings_this_week,
        metrics.pending_opportunities,
    );

    output.push_str(&format!(
        "\nUpcoming meetings ({}):",
        dashboard.upcoming_meetings.len()
    ));
    for meeting in &dashboard.upcoming_meetings {
        output.push_str(&format!(
            "\n  {} - {} ({})",
            meeting.date.format("%Y-%m-%d %H:%M"),
            meeting.client_id,
            meeting.kind.as_str(),
        ));
    }

    output.push_str("\n\nRecent activity:");
    for item in &dashboard.recent_activity {
        output.push_str(&format!("\n  {}: {}", item.title, item.description));
    }

    let degraded = dashboard.system_health.degraded_count();
    if degraded == 0 {
        output.push_str("\n\nAll integrations healthy.");
    } else {
        output.push_str(&format!("\n\n{degraded} integration(s) degraded."));
    }

    output
}
