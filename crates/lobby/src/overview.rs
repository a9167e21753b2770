//! The control-center snapshot: every core resource loaded in one go.

use serde::{Deserialize, Serialize};

use crate::api::{Api, ApiClient, ApiResult};
use crate::data::{Analytics, Automation, DashboardStats, Payment, SaasStatus};
use crate::id::AutomationId;

/// How many payments the overview keeps.
pub const RECENT_PAYMENTS: usize = 3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Overview {
    pub stats: DashboardStats,
    pub automations: Vec<Automation>,
    pub analytics: Analytics,
    pub saas: SaasStatus,
    pub recent_payments: Vec<Payment>,
}

impl Overview {
    pub fn active_automations(&self) -> usize {
        self.automations.iter().filter(|a| a.active).count()
    }

    pub fn automation(&self, id: &AutomationId) -> Option<&Automation> {
        self.automations.iter().find(|a| &a.id == id)
    }

    /// Reflect a toggle the backend accepted. Returns false if the id is not
    /// in this snapshot.
    pub fn apply_toggle(&mut self, id: &AutomationId, active: bool) -> bool {
        match self.automations.iter_mut().find(|a| &a.id == id) {
            Some(automation) => {
                automation.apply_toggle(active);
                true
            }
            None => false,
        }
    }
}

impl<C: ApiClient> Api<C> {
    /// Load stats, automations, analytics, SaaS status and payments
    /// concurrently. All five requests run to completion so each failure is
    /// intercepted; the first failure in that order is returned.
    pub async fn load_overview(&self) -> ApiResult<Overview> {
        let dashboard_api = self.dashboard();
        let automation_api = self.automations();
        let analytics_api = self.analytics();
        let saas_api = self.saas();
        let paypal_api = self.paypal();

        let (stats, automations, analytics, saas, payments) = futures::join!(
            dashboard_api.get_stats(),
            automation_api.get_automations(),
            analytics_api.get_analytics(),
            saas_api.get_status(),
            paypal_api.get_payments(),
        );

        let stats = stats?;
        let automations = automations?;
        let analytics = analytics?;
        let saas = saas?;
        let mut recent_payments = payments?;
        recent_payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_payments.truncate(RECENT_PAYMENTS);

        Ok(Overview {
            stats,
            automations,
            analytics,
            saas,
            recent_payments,
        })
    }
}
