//! Dashboard API operations.

use briefdesk_core::advisory::DashboardData;

use super::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Get the dashboard overview aggregate.
    pub async fn dashboard_overview(&self) -> Result<DashboardData> {
        let response = self
            .http()
            .get(self.url("/dashboard/overview"))
            .send()
            .await?;
        self.handle_response(response, "Dashboard", "").await
    }
}
