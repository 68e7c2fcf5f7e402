//! Company context value objects
//!
//! Background data handed to every specialist. The council never mutates it.

use super::entities::Decision;
use serde::{Deserialize, Serialize};

/// What the company is optimising for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategicGoal {
    #[default]
    Valuation,
    Independence,
    Hybrid,
}

impl StrategicGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategicGoal::Valuation => "valuation",
            StrategicGoal::Independence => "independence",
            StrategicGoal::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for StrategicGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Company snapshot shared with all agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyContext {
    pub company_name: String,
    pub monthly_revenue: f64,
    pub monthly_burn: f64,
    pub team_size: u32,
    pub runway_months: f64,
    pub strategic_goal: StrategicGoal,
    pub active_projects: Vec<String>,
    pub key_assets: Vec<String>,
    pub key_constraints: Vec<String>,
}

impl Default for CompanyContext {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            monthly_revenue: 0.0,
            monthly_burn: 0.0,
            team_size: 1,
            runway_months: 0.0,
            strategic_goal: StrategicGoal::default(),
            active_projects: Vec::new(),
            key_assets: Vec::new(),
            key_constraints: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmStatus {
    #[default]
    Active,
    Paused,
    Planned,
}

/// A revenue-generating line of business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessArm {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub monthly_revenue: f64,
    #[serde(default)]
    pub monthly_costs: f64,
    #[serde(default)]
    pub time_investment_hours: f64,
    /// 1-10
    #[serde(default)]
    pub strategic_value: u8,
    #[serde(default)]
    pub status: ArmStatus,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl BusinessArm {
    pub fn monthly_profit(&self) -> f64 {
        self.monthly_revenue - self.monthly_costs
    }

    pub fn is_active(&self) -> bool {
        self.status == ArmStatus::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Percentage, 0-100
    #[serde(default)]
    pub market_share: f64,
    #[serde(default)]
    pub threat: ThreatLevel,
}

/// TAM/SAM/SOM plus competitive landscape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketData {
    pub tam: f64,
    pub sam: f64,
    pub som: f64,
    pub market_trends: Vec<String>,
    pub competitors: Vec<Competitor>,
}

impl MarketData {
    pub fn is_empty(&self) -> bool {
        self.tam == 0.0 && self.market_trends.is_empty() && self.competitors.is_empty()
    }
}

/// Everything a council run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilInput {
    #[serde(default)]
    pub context: CompanyContext,
    pub decision: Decision,
    #[serde(default)]
    pub business_arms: Vec<BusinessArm>,
    #[serde(default)]
    pub market_data: MarketData,
}

impl CouncilInput {
    pub fn new(context: CompanyContext, decision: Decision) -> Self {
        Self {
            context,
            decision,
            business_arms: Vec::new(),
            market_data: MarketData::default(),
        }
    }

    pub fn with_business_arms(mut self, arms: Vec<BusinessArm>) -> Self {
        self.business_arms = arms;
        self
    }

    pub fn with_market_data(mut self, market_data: MarketData) -> Self {
        self.market_data = market_data;
        self
    }
}
