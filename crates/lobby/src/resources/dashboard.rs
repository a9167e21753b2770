use crate::api::{Api, ApiClient, ApiResult};
use crate::data::DashboardStats;

pub struct DashboardApi<'a, C> {
    api: &'a Api<C>,
}

impl<C: ApiClient> Api<C> {
    pub fn dashboard(&self) -> DashboardApi<'_, C> {
        DashboardApi { api: self }
    }
}

impl<C: ApiClient> DashboardApi<'_, C> {
    /// `GET /dashboard/stats`
    pub async fn get_stats(&self) -> ApiResult<DashboardStats> {
        self.api.get("/dashboard/stats").await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::RecordingClient;
    use crate::api::{Api, HttpMethod};

    #[tokio::test]
    async fn get_stats_reads_dashboard_endpoint() {
        let client = RecordingClient::new();
        client.respond(
            200,
            r#"{"todayEarnings":"€1,247.50","todayGrowth":12.5,"activeLeads":89,"newLeads":23,
                "conversionRate":8.4,"activeAutomations":5,"systemPerformance":94}"#,
        );
        let api = Api::new(client);

        let stats = api.dashboard().get_stats().await.unwrap();
        assert_eq!(stats.today_earnings, "€1,247.50");
        assert_eq!(stats.active_automations, 5);

        let sent = api.client().last_request();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.endpoint, "/dashboard/stats");
        assert_eq!(sent.body, None);
    }
}
