use crate::api::{Api, ApiClient, ApiResult};
use crate::data::{SaasStatus, StandardResponse};

pub struct SaasApi<'a, C> {
    api: &'a Api<C>,
}

impl<C: ApiClient> Api<C> {
    pub fn saas(&self) -> SaasApi<'_, C> {
        SaasApi { api: self }
    }
}

impl<C: ApiClient> SaasApi<'_, C> {
    /// `GET /saas/status`
    pub async fn get_status(&self) -> ApiResult<SaasStatus> {
        self.api.get("/saas/status").await
    }

    /// `POST /saas/launch`
    pub async fn launch_system(&self) -> ApiResult<StandardResponse> {
        self.api.post_empty("/saas/launch").await
    }
}
