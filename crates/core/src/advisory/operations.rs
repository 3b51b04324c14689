use super::client::{Client, ClientStatus, ClientSummary};
use super::meeting::Meeting;

/// Filters clients by optional status and name search.
///
/// `status` is an exact match; `search` is a case-insensitive substring match
/// on the client name. Both filters compose.
pub fn filter_clients(
    clients: &[Client],
    status: Option<ClientStatus>,
    search: Option<&str>,
) -> Vec<Client> {
    clients
        .iter()
        .filter(|client| status.is_none_or(|wanted| client.status == wanted))
        .filter(|client| search.is_none_or(|term| client.name_matches(term)))
        .cloned()
        .collect()
}

/// Projects clients into summaries, preserving order.
pub fn summarize_clients(clients: &[Client]) -> Vec<ClientSummary> {
    clients.iter().map(ClientSummary::from).collect()
}

/// Meetings still on the calendar.
pub fn scheduled_meetings(meetings: &[Meeting]) -> Vec<Meeting> {
    meetings
        .iter()
        .filter(|meeting| meeting.is_scheduled())
        .cloned()
        .collect()
}

/// All meetings for one client, in stored order.
pub fn meetings_for_client(meetings: &[Meeting], client_id: &str) -> Vec<Meeting> {
    meetings
        .iter()
        .filter(|meeting| meeting.client_id == client_id)
        .cloned()
        .collect()
}

/// Sum of assets under management across clients.
pub fn total_aum(clients: &[Client]) -> f64 {
    clients.iter().map(|client| client.aum).sum()
}
