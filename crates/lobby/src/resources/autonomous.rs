//! The autonomous-business router: lead intake, sales chat and transaction
//! completion, plus the status and metrics the hub polls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::{Api, ApiClient, ApiError, ApiResult};
use crate::data::Envelope;
use crate::id::ConversationId;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LeadData {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub source: String,
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    pub urgency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LeadData {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
            source: "website".to_string(),
            urgency: "normal".to_string(),
            ..Self::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SalesMessage {
    pub conversation_id: ConversationId,
    pub customer_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

impl SalesMessage {
    /// Open a new conversation with a generated id.
    pub fn start(customer_message: impl Into<String>) -> Self {
        Self {
            conversation_id: ConversationId::new(),
            customer_message: customer_message.into(),
            customer_email: None,
        }
    }

    /// Continue an existing conversation.
    pub fn reply(&self, customer_message: impl Into<String>) -> Self {
        Self {
            conversation_id: self.conversation_id.clone(),
            customer_message: customer_message.into(),
            customer_email: self.customer_email.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransactionData {
    pub amount: f64,
    pub service_type: String,
    pub customer_email: String,
    pub customer_name: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SystemStatusPayload {
    /// Subsystem name to state, e.g. `"sales_automation": "active"`.
    pub autonomous_system: BTreeMap<String, serde_json::Value>,
}

impl SystemStatusPayload {
    pub fn autonomy_level(&self) -> Option<&str> {
        self.autonomous_system
            .get("autonomy_level")
            .and_then(|v| v.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AutonomousMetrics {
    pub current_month_revenue: f64,
    pub current_month_transactions: u64,
    pub total_leads_processed: u64,
    pub total_offers_generated: u64,
    pub ai_conversion_rate: f64,
    pub average_deal_size: f64,
    pub automation_level: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BusinessMetricsPayload {
    pub autonomous_metrics: AutonomousMetrics,
    pub period: String,
}

fn require(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub struct AutonomousApi<'a, C> {
    api: &'a Api<C>,
}

impl<C: ApiClient> Api<C> {
    pub fn autonomous(&self) -> AutonomousApi<'_, C> {
        AutonomousApi { api: self }
    }
}

impl<C: ApiClient> AutonomousApi<'_, C> {
    pub async fn get_system_status(&self) -> ApiResult<Envelope<SystemStatusPayload>> {
        self.api.get("/autonomous/system-status").await
    }

    pub async fn get_business_metrics(&self) -> ApiResult<Envelope<BusinessMetricsPayload>> {
        self.api.get("/autonomous/business-metrics").await
    }

    /// Email and name are required; nothing is sent without them.
    pub async fn process_lead(&self, lead: &LeadData) -> ApiResult<serde_json::Value> {
        const ENDPOINT: &str = "/autonomous/process-lead";
        require("email", &lead.email)
            .and_then(|()| require("name", lead.name.as_deref().unwrap_or_default()))
            .map_err(|err| self.api.reject(ENDPOINT, err))?;
        self.api.post(ENDPOINT, lead).await
    }

    /// Conversation id and message are required; nothing is sent without them.
    pub async fn sales_chat(&self, message: &SalesMessage) -> ApiResult<serde_json::Value> {
        const ENDPOINT: &str = "/autonomous/sales-chat";
        require("conversation_id", message.conversation_id.as_str())
            .and_then(|()| require("customer_message", &message.customer_message))
            .map_err(|err| self.api.reject(ENDPOINT, err))?;
        self.api.post(ENDPOINT, message).await
    }

    pub async fn complete_transaction(
        &self,
        transaction: &TransactionData,
    ) -> ApiResult<serde_json::Value> {
        self.api
            .post("/autonomous/complete-transaction", transaction)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpMethod;
    use crate::api::testing::{CountingInterceptor, RecordingClient};
    use serde_json::json;

    #[tokio::test]
    async fn lead_without_name_is_rejected_locally() {
        let api = Api::new(RecordingClient::new());
        let lead = LeadData {
            email: "lead@example.com".to_string(),
            ..LeadData::default()
        };

        let result = api.autonomous().process_lead(&lead).await;
        assert!(matches!(result, Err(ApiError::Validation(msg)) if msg == "name is required"));
        assert!(api.client().requests().is_empty());
    }

    #[tokio::test]
    async fn lead_is_posted_with_defaults() {
        let client = RecordingClient::new();
        client.respond(200, r#"{"status":"success","estimated_conversion":0.42}"#);
        let api = Api::new(client);

        let lead = LeadData::new("lead@example.com", "Max Mustermann");
        let result = api.autonomous().process_lead(&lead).await.unwrap();
        assert_eq!(result["estimated_conversion"], 0.42);

        let sent = api.client().last_request();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.endpoint, "/autonomous/process-lead");
        assert_eq!(
            sent.body,
            Some(json!({
                "email": "lead@example.com",
                "name": "Max Mustermann",
                "source": "website",
                "interests": [],
                "urgency": "normal"
            }))
        );
    }

    #[tokio::test]
    async fn sales_chat_keeps_conversation_id() {
        let client = RecordingClient::new();
        client.respond(200, r#"{"ai_response":"Gern!","sales_stage":"interest"}"#);
        client.respond(200, r#"{"ai_response":"Super","sales_stage":"closing"}"#);
        let api = Api::new(client);

        let first = SalesMessage::start("Was kostet das?");
        let second = first.reply("Ich nehme es");
        api.autonomous().sales_chat(&first).await.unwrap();
        let reply = api.autonomous().sales_chat(&second).await.unwrap();
        assert_eq!(reply["sales_stage"], "closing");

        let sent = api.client().requests();
        assert_eq!(
            sent[0].body.as_ref().unwrap()["conversation_id"],
            sent[1].body.as_ref().unwrap()["conversation_id"]
        );
    }

    #[tokio::test]
    async fn empty_chat_message_is_rejected() {
        let api = Api::new(RecordingClient::new());
        let message = SalesMessage::start("   ");
        let result = api.autonomous().sales_chat(&message).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn rejected_inputs_reach_interceptor_once() {
        let failures = CountingInterceptor::default();
        let api = Api::new(RecordingClient::new()).with_interceptor(failures.clone());

        let lead = LeadData {
            email: String::new(),
            ..LeadData::default()
        };
        assert!(api.autonomous().process_lead(&lead).await.is_err());
        assert!(
            api.autonomous()
                .sales_chat(&SalesMessage::start(""))
                .await
                .is_err()
        );

        assert_eq!(
            failures.endpoints(),
            vec!["/autonomous/process-lead", "/autonomous/sales-chat"]
        );
        assert!(api.client().requests().is_empty());
    }

    #[tokio::test]
    async fn system_status_reads_autonomy_level() {
        let client = RecordingClient::new();
        client.respond(
            200,
            r#"{"status":"success","autonomous_system":{"ai_engine":"active","autonomy_level":"92%","last_update":"2024-06-01T10:00:00"}}"#,
        );
        let api = Api::new(client);

        let status = api
            .autonomous()
            .get_system_status()
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(status.autonomy_level(), Some("92%"));
    }

    #[tokio::test]
    async fn business_metrics_error_envelope() {
        let client = RecordingClient::new();
        client.respond(200, r#"{"status":"error","message":"Metrics-Fehler: db down"}"#);
        let api = Api::new(client);

        let result = api
            .autonomous()
            .get_business_metrics()
            .await
            .unwrap()
            .into_result();
        assert!(matches!(result, Err(ApiError::Backend(_))));
    }
}
