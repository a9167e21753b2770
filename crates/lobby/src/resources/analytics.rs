use crate::api::{Api, ApiClient, ApiResult};
use crate::data::Analytics;

pub struct AnalyticsApi<'a, C> {
    api: &'a Api<C>,
}

impl<C: ApiClient> Api<C> {
    pub fn analytics(&self) -> AnalyticsApi<'_, C> {
        AnalyticsApi { api: self }
    }
}

impl<C: ApiClient> AnalyticsApi<'_, C> {
    /// `GET /analytics`
    pub async fn get_analytics(&self) -> ApiResult<Analytics> {
        self.api.get("/analytics").await
    }
}
