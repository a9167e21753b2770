//! Response and request shapes of the core dashboard API.
//!
//! Field names follow the backend's camelCase JSON. Every status enum carries
//! an `Unknown` catch-all so a new backend value degrades instead of failing
//! the whole response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{AutomationId, PaymentId};

/// Description sent with a payment when the caller gives none.
pub const DEFAULT_PAYMENT_DESCRIPTION: &str = "ZZ-Lobby Elite Payment";

/// Timestamps arrive either as RFC 3339 or as naive ISO 8601 (Python's
/// `datetime.isoformat()` without an offset). Naive values are taken as UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp {raw:?}")))
    }

    pub(crate) fn deserialize_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid timestamp {raw:?}"))
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Preformatted for display, e.g. `"€1,247.50"`.
    pub today_earnings: String,
    pub today_growth: f64,
    pub active_leads: u64,
    pub new_leads: u64,
    pub conversion_rate: f64,
    pub active_automations: u32,
    pub system_performance: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Active,
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub amount: f64,
    pub description: String,
    pub payment_url: String,
    /// A `data:` URI; empty for payments loaded from history.
    #[serde(default)]
    pub qr_code: String,
    pub status: PaymentStatus,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn has_qr_code(&self) -> bool {
        self.qr_code.starts_with("data:")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreatePayment {
    pub amount: f64,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AutomationType {
    LeadCapture,
    SocialMedia,
    EmailMarketing,
    AffiliateMarketing,
    AiContent,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AutomationStatus {
    Active,
    Paused,
    Inactive,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Automation {
    pub id: AutomationId,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AutomationType,
    pub active: bool,
    pub status: AutomationStatus,
    pub performance: u32,
    pub today_generated: String,
    pub success_rate: u32,
    pub color: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub last_updated: DateTime<Utc>,
}

impl Automation {
    /// Apply a successful toggle locally without refetching the list.
    pub fn apply_toggle(&mut self, active: bool) {
        self.active = active;
        self.status = if active {
            AutomationStatus::Active
        } else {
            AutomationStatus::Inactive
        };
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleAutomation {
    pub active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RevenueAnalytics {
    pub today: f64,
    pub week: f64,
    pub month: f64,
    pub growth: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadAnalytics {
    pub total: u64,
    pub qualified: u64,
    pub converted: u64,
    pub conversion_rate: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TrafficAnalytics {
    pub organic: u64,
    pub paid: u64,
    pub referral: u64,
    pub direct: u64,
}

impl TrafficAnalytics {
    pub fn total(&self) -> u64 {
        self.organic + self.paid + self.referral + self.direct
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlatformPerformance {
    pub name: String,
    pub performance: u32,
    pub leads: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Analytics {
    pub revenue: RevenueAnalytics,
    pub leads: LeadAnalytics,
    pub traffic: TrafficAnalytics,
    #[serde(default)]
    pub platforms: Vec<PlatformPerformance>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Online,
    Maintenance,
    Offline,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SaasComponent {
    pub name: String,
    pub status: ComponentStatus,
    pub performance: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaasStatus {
    pub system_health: u32,
    pub uptime: String,
    pub active_users: u64,
    pub total_revenue: f64,
    pub monthly_growth: f64,
    #[serde(default)]
    pub components: Vec<SaasComponent>,
}

impl SaasStatus {
    pub fn degraded_components(&self) -> impl Iterator<Item = &SaasComponent> {
        self.components
            .iter()
            .filter(|c| c.status != ComponentStatus::Online)
    }
}

/// The `{success, message, data?}` result of toggle, optimize and launch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StandardResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Interested,
    Qualified,
    Converted,
    #[serde(other)]
    Unknown,
}

/// A prospective customer as shown in the lead lists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Lead {
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    pub status: LeadStatus,
    /// 0 to 10.
    pub interest_level: u8,
}

impl Lead {
    pub const MAX_INTEREST: u8 = 10;

    pub fn interest_level(&self) -> u8 {
        self.interest_level.min(Self::MAX_INTEREST)
    }
}

/// The `status`-tagged wrapper used by the digital-manager, autonomous and
/// optimization routers: `{"status": "success", ...payload}` or
/// `{"status": "error", "message": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success(T),
    Error { message: String },
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Result<T, crate::api::ApiError> {
        match self {
            Envelope::Success(payload) => Ok(payload),
            Envelope::Error { message } => Err(crate::api::ApiError::Backend(message)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }
}
