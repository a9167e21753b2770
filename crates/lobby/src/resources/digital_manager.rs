//! The digital-manager router: insurance requests, tax calculation, legal
//! documents and business email. Payloads are snake_case on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{Api, ApiClient, ApiError, ApiRequest, ApiResult, HttpMethod};
use crate::data::Envelope;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    High,
    Urgent,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsuranceScope {
    Business,
    Private,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InsuranceRequest {
    pub request_type: InsuranceScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    pub coverage_needed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<u32>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaxDocumentKind {
    Receipt,
    Invoice,
    Expense,
    Income,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaxDocument {
    pub document_type: TaxDocumentKind,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,
    pub is_deductible: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LegalDocumentKind {
    Agb,
    Dsgvo,
    Impressum,
    Contract,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LegalDocument {
    pub document_type: LegalDocumentKind,
    pub company_name: String,
    pub business_address: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_id: Option<String>,
    pub business_type: String,
}

/// Sent as query parameters; the endpoint takes no JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessEmail {
    pub to_email: String,
    pub subject: String,
    pub content: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ManagerStatistics {
    pub insurance_requests: u64,
    pub tax_calculations: u64,
    pub legal_documents: u64,
    pub total_automations: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RecentActivity {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub date: String,
    pub status: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServiceOffer {
    pub name: String,
    pub description: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ManagerDashboard {
    #[serde(default)]
    pub statistics: ManagerStatistics,
    #[serde(default)]
    pub recent_activities: Vec<RecentActivity>,
    #[serde(default)]
    pub available_services: Vec<ServiceOffer>,
    #[serde(rename = "daniel_info", default)]
    pub owner: serde_json::Value,
    #[serde(rename = "thomas_kaiser_contact", default)]
    pub insurance_contact: serde_json::Value,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ManagerDashboardPayload {
    pub dashboard: ManagerDashboard,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OwnerInfo {
    #[serde(rename = "daniel_data", default)]
    pub owner: serde_json::Value,
    #[serde(rename = "thomas_kaiser", default)]
    pub insurance_contact: serde_json::Value,
    #[serde(default)]
    pub services: Vec<String>,
}

pub struct DigitalManagerApi<'a, C> {
    api: &'a Api<C>,
}

impl<C: ApiClient> Api<C> {
    pub fn digital_manager(&self) -> DigitalManagerApi<'_, C> {
        DigitalManagerApi { api: self }
    }
}

impl<C: ApiClient> DigitalManagerApi<'_, C> {
    pub async fn get_dashboard(&self) -> ApiResult<Envelope<ManagerDashboardPayload>> {
        self.api.get("/digital-manager/dashboard").await
    }

    pub async fn get_owner_info(&self) -> ApiResult<Envelope<OwnerInfo>> {
        self.api.get("/digital-manager/daniel-info").await
    }

    pub async fn request_insurance(
        &self,
        request: &InsuranceRequest,
    ) -> ApiResult<serde_json::Value> {
        self.api
            .post("/digital-manager/insurance-request", request)
            .await
    }

    pub async fn calculate_tax(&self, documents: &[TaxDocument]) -> ApiResult<serde_json::Value> {
        self.api
            .post("/digital-manager/tax-calculation", documents)
            .await
    }

    pub async fn generate_legal_doc(
        &self,
        document: &LegalDocument,
    ) -> ApiResult<serde_json::Value> {
        self.api
            .post("/digital-manager/legal-document", document)
            .await
    }

    pub async fn send_email(&self, email: &BusinessEmail) -> ApiResult<serde_json::Value> {
        const ENDPOINT: &str = "/digital-manager/send-business-email";
        if !email.to_email.contains('@') {
            let err = ApiError::Validation(format!(
                "{:?} is not an email address",
                email.to_email
            ));
            return Err(self.api.reject(ENDPOINT, err));
        }
        let request = ApiRequest::new(HttpMethod::Post, ENDPOINT)
            .with_query("to_email", email.to_email.as_str())
            .with_query("subject", email.subject.as_str())
            .with_query("content", email.content.as_str());
        self.api.execute(request).await
    }
}
