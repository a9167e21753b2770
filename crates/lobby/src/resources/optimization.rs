//! The self-optimization router. Read endpoints are typed; the action
//! endpoints return free-form reports that are handed back as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::{Api, ApiClient, ApiResult};
use crate::data::Envelope;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SystemHealth {
    pub overall_health: String,
    pub autonomy_level: String,
    /// Engine name to state, e.g. `"ab_testing_engine": "active"`.
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    #[serde(default)]
    pub performance: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub system_uptime: Option<String>,
}

impl SystemHealth {
    pub fn inactive_components(&self) -> impl Iterator<Item = &str> {
        self.components
            .iter()
            .filter(|(_, state)| state.as_str() != "active")
            .map(|(name, _)| name.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SystemHealthPayload {
    pub system_health: SystemHealth,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PerformanceMetricsPayload {
    pub performance_metrics: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub autonomy_level: Option<String>,
    #[serde(default)]
    pub optimization_engine: Option<String>,
}

/// The optimization actions the backend can run on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationAction {
    FullCycle,
    AbTests,
    BudgetAllocation,
    ViralContent,
    NicheExpansion,
    CompetitiveAnalysis,
    MarketOpportunities,
}

impl OptimizationAction {
    pub const ALL: [OptimizationAction; 7] = [
        OptimizationAction::FullCycle,
        OptimizationAction::AbTests,
        OptimizationAction::BudgetAllocation,
        OptimizationAction::ViralContent,
        OptimizationAction::NicheExpansion,
        OptimizationAction::CompetitiveAnalysis,
        OptimizationAction::MarketOpportunities,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            OptimizationAction::FullCycle => "/optimization/run-full-cycle",
            OptimizationAction::AbTests => "/optimization/ab-tests",
            OptimizationAction::BudgetAllocation => "/optimization/budget-allocation",
            OptimizationAction::ViralContent => "/optimization/viral-content",
            OptimizationAction::NicheExpansion => "/optimization/niche-expansion",
            OptimizationAction::CompetitiveAnalysis => "/optimization/competitive-analysis",
            OptimizationAction::MarketOpportunities => "/optimization/market-opportunities",
        }
    }
}

pub struct OptimizationApi<'a, C> {
    api: &'a Api<C>,
}

impl<C: ApiClient> Api<C> {
    pub fn optimization(&self) -> OptimizationApi<'_, C> {
        OptimizationApi { api: self }
    }
}

impl<C: ApiClient> OptimizationApi<'_, C> {
    pub async fn get_system_health(&self) -> ApiResult<Envelope<SystemHealthPayload>> {
        self.api.get("/optimization/system-health").await
    }

    pub async fn get_performance_metrics(
        &self,
    ) -> ApiResult<Envelope<PerformanceMetricsPayload>> {
        self.api.get("/optimization/performance-metrics").await
    }

    /// Not enveloped; a failure shows up as an `"error"` key in the object.
    pub async fn get_dashboard(&self) -> ApiResult<serde_json::Value> {
        self.api.get("/optimization/dashboard").await
    }

    pub async fn run(&self, action: OptimizationAction) -> ApiResult<serde_json::Value> {
        self.api.post_empty(action.endpoint()).await
    }

    pub async fn run_full_cycle(&self) -> ApiResult<serde_json::Value> {
        self.run(OptimizationAction::FullCycle).await
    }

    pub async fn run_ab_tests(&self) -> ApiResult<serde_json::Value> {
        self.run(OptimizationAction::AbTests).await
    }

    pub async fn optimize_budget(&self) -> ApiResult<serde_json::Value> {
        self.run(OptimizationAction::BudgetAllocation).await
    }

    pub async fn optimize_viral_content(&self) -> ApiResult<serde_json::Value> {
        self.run(OptimizationAction::ViralContent).await
    }

    pub async fn expand_niches(&self) -> ApiResult<serde_json::Value> {
        self.run(OptimizationAction::NicheExpansion).await
    }

    pub async fn analyze_competition(&self) -> ApiResult<serde_json::Value> {
        self.run(OptimizationAction::CompetitiveAnalysis).await
    }

    pub async fn detect_opportunities(&self) -> ApiResult<serde_json::Value> {
        self.run(OptimizationAction::MarketOpportunities).await
    }
}
