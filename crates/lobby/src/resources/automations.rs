use crate::api::{Api, ApiClient, ApiResult};
use crate::data::{Automation, StandardResponse, ToggleAutomation};
use crate::id::AutomationId;

pub struct AutomationApi<'a, C> {
    api: &'a Api<C>,
}

impl<C: ApiClient> Api<C> {
    pub fn automations(&self) -> AutomationApi<'_, C> {
        AutomationApi { api: self }
    }
}

impl<C: ApiClient> AutomationApi<'_, C> {
    /// `GET /automations`
    pub async fn get_automations(&self) -> ApiResult<Vec<Automation>> {
        self.api.get("/automations").await
    }

    /// `PUT /automations/{id}/toggle` with body `{"active": <bool>}`.
    ///
    /// Repeated calls are not deduplicated; a double click sends two requests.
    pub async fn toggle_automation(
        &self,
        id: &AutomationId,
        active: bool,
    ) -> ApiResult<StandardResponse> {
        let endpoint = format!("/automations/{}/toggle", urlencoding::encode(id.as_str()));
        self.api.put(&endpoint, &ToggleAutomation { active }).await
    }

    /// `POST /automations/optimize`
    pub async fn optimize_system(&self) -> ApiResult<StandardResponse> {
        self.api.post_empty("/automations/optimize").await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{CountingInterceptor, RecordingClient};
    use crate::api::{Api, ApiError, HttpMethod};
    use crate::id::AutomationId;
    use serde_json::json;

    #[tokio::test]
    async fn empty_list_is_empty_vec() {
        let client = RecordingClient::new();
        client.respond(200, "[]");
        let api = Api::new(client);

        let automations = api.automations().get_automations().await.unwrap();
        assert!(automations.is_empty());
        assert_eq!(automations.iter().filter(|a| a.active).count(), 0);
    }

    #[tokio::test]
    async fn toggle_puts_exact_boolean_to_id_path() {
        let client = RecordingClient::new();
        client.respond(
            200,
            r#"{"success":true,"message":"Automation lead-capture deaktiviert"}"#,
        );
        client.respond(
            200,
            r#"{"success":true,"message":"Automation lead-capture aktiviert"}"#,
        );
        let api = Api::new(client);
        let id = AutomationId::from("lead-capture");

        let off = api.automations().toggle_automation(&id, false).await.unwrap();
        assert!(off.success);
        api.automations().toggle_automation(&id, true).await.unwrap();

        let sent = api.client().requests();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].endpoint, "/automations/lead-capture/toggle");
        assert_eq!(sent[0].body, Some(json!({"active": false})));
        assert_eq!(sent[1].body, Some(json!({"active": true})));
    }

    #[tokio::test]
    async fn toggle_escapes_id_segment() {
        let client = RecordingClient::new();
        client.respond(200, r#"{"success":true,"message":"ok"}"#);
        let api = Api::new(client);

        api.automations()
            .toggle_automation(&AutomationId::from("a/b c"), true)
            .await
            .unwrap();
        assert_eq!(
            api.client().last_request().endpoint,
            "/automations/a%2Fb%20c/toggle"
        );
    }

    #[tokio::test]
    async fn unknown_automation_is_not_found() {
        let client = RecordingClient::new();
        client.respond(404, r#"{"detail":"Automation not found"}"#);
        let counter = CountingInterceptor::default();
        let api = Api::new(client).with_interceptor(counter.clone());

        let result = api
            .automations()
            .toggle_automation(&AutomationId::from("missing"), true)
            .await;
        assert!(matches!(result, Err(ApiError::NotFound(msg)) if msg == "Automation not found"));
        assert_eq!(counter.count(), 1);
    }

    #[tokio::test]
    async fn optimize_posts_to_optimize() {
        let client = RecordingClient::new();
        client.respond(
            200,
            r#"{"success":true,"message":"Automationen erfolgreich optimiert"}"#,
        );
        let api = Api::new(client);

        let result = api.automations().optimize_system().await.unwrap();
        assert_eq!(result.message, "Automationen erfolgreich optimiert");

        let sent = api.client().last_request();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.endpoint, "/automations/optimize");
    }
}
