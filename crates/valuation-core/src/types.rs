use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Scenario variant for the three-case DCF analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioType {
    Worst,
    #[default]
    Base,
    Best,
}

impl ScenarioType {
    /// Parse a free-form scenario label ("Worst Case", "base", ...).
    /// Unrecognized labels fall back to Base.
    pub fn from_label(label: &str) -> Self {
        let l = label.to_lowercase();
        if l.contains("worst") {
            ScenarioType::Worst
        } else if l.contains("best") {
            ScenarioType::Best
        } else {
            ScenarioType::Base
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            ScenarioType::Worst => "Worst Case",
            ScenarioType::Base => "Base Case",
            ScenarioType::Best => "Best Case",
        }
    }
}

impl Serialize for ScenarioType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_label())
    }
}

impl<'de> Deserialize<'de> for ScenarioType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .map(ScenarioType::from_label)
            .unwrap_or_default())
    }
}

/// Bounded investment verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecisionColor {
    Green,
    #[default]
    Orange,
    Red,
}

impl DecisionColor {
    /// Parse an upstream verdict string. Unknown labels read as Orange
    /// (the residual band) rather than failing the whole record.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "GREEN" => DecisionColor::Green,
            "RED" => DecisionColor::Red,
            _ => DecisionColor::Orange,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            DecisionColor::Green => "GREEN",
            DecisionColor::Orange => "ORANGE",
            DecisionColor::Red => "RED",
        }
    }
}

impl Serialize for DecisionColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_label())
    }
}

impl<'de> Deserialize<'de> for DecisionColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .map(DecisionColor::from_label)
            .unwrap_or_default())
    }
}

/// DCF assumption block for one scenario (all percentages on 0-100 scale)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationAssumptions {
    #[serde(default)]
    pub revenue_growth: f64,
    #[serde(default)]
    pub operating_margin: f64,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub wacc: f64,
    #[serde(default)]
    pub terminal_growth_rate: f64,
}

/// One Worst/Base/Best valuation scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    #[serde(rename = "type", default)]
    pub scenario_type: ScenarioType,
    /// DCF equity value per share; never negative after sanitation
    #[serde(default)]
    pub intrinsic_value: f64,
    /// Multiples-based value per share
    #[serde(default)]
    pub relative_value: f64,
    /// Percentage difference from current price
    #[serde(default)]
    pub upside_downside: f64,
    #[serde(default)]
    pub assumptions: ValuationAssumptions,
    #[serde(default)]
    pub description: String,
}

/// Grounding source carried through from the upstream search tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub uri: String,
}

/// One reported quarter of results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyData {
    /// e.g. "Q3 2024"
    #[serde(default = "default_period_label")]
    pub period: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub net_income: f64,
    #[serde(default)]
    pub eps: f64,
}

fn default_period_label() -> String {
    "N/A".to_string()
}

fn default_fiscal_year_label() -> String {
    "Last Year".to_string()
}

/// Damodaran-style deep-dive metric block (optional in the payload)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepDiveMetrics {
    #[serde(default)]
    pub equity_risk_premium: f64,
    #[serde(default)]
    pub cost_of_equity: f64,
    #[serde(default)]
    pub cost_of_debt: f64,
    #[serde(default)]
    pub roic: f64,
    #[serde(default)]
    pub reinvestment_rate: f64,
    #[serde(default)]
    pub pv_terminal_value_pct: f64,
    /// e.g. "Mature Cash Cow", "High Growth Star"
    #[serde(default)]
    pub firm_type: String,
    /// The "story" behind the valuation
    #[serde(default)]
    pub narrative: String,

    #[serde(default)]
    pub interest_coverage_ratio: f64,
    /// e.g. "AAA", "BBB", "Junk"
    #[serde(default)]
    pub synthetic_rating: String,
    #[serde(default)]
    pub default_spread: f64,
    #[serde(default)]
    pub debt_to_equity_ratio: f64,
    #[serde(default)]
    pub sales_to_capital_ratio: f64,
    #[serde(default)]
    pub roe: f64,
    #[serde(default)]
    pub pe_ratio: f64,
    #[serde(default)]
    pub sector_pe_ratio: f64,
    #[serde(default)]
    pub net_debt_to_ebitda: f64,

    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub enterprise_value: f64,
    #[serde(default)]
    pub cash_and_equivalents: f64,
    #[serde(default)]
    pub pre_tax_operating_margin: f64,
    #[serde(default)]
    pub effective_tax_rate: f64,
    #[serde(default)]
    pub dividend_yield: f64,
    #[serde(default)]
    pub fcf_to_firm: f64,

    #[serde(default)]
    pub gross_margin: f64,
    #[serde(default)]
    pub peg_ratio: f64,
    #[serde(default)]
    pub book_value_per_share: f64,

    /// Last 4 reported quarters, newest first as supplied upstream
    #[serde(default)]
    pub quarterly_history: Vec<QuarterlyData>,

    /// e.g. "FY 2023"
    #[serde(default = "default_fiscal_year_label")]
    pub last_fiscal_year_label: String,
    #[serde(default)]
    pub last_fiscal_year_revenue: f64,
    #[serde(default)]
    pub last_fiscal_year_net_income: f64,
}

/// Investment-thesis block (optional in the payload)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentThesis {
    #[serde(default)]
    pub decision_color: DecisionColor,
    #[serde(default)]
    pub decision_headline: String,
    /// Percentage by which intrinsic value exceeds market price
    #[serde(default)]
    pub margin_of_safety: f64,

    #[serde(rename = "evSalesTTM", default)]
    pub ev_sales_ttm: f64,
    #[serde(default)]
    pub ev_sales_fwd: f64,
    #[serde(default)]
    pub justified_ev_sales: f64,
    #[serde(default)]
    pub fwd_peg: f64,
    #[serde(default)]
    pub justified_peg: f64,
    #[serde(default)]
    pub fair_value: f64,

    #[serde(default)]
    pub market_narrative: String,
    #[serde(default)]
    pub catalysts: Vec<String>,
    #[serde(default)]
    pub thesis_breakers: Vec<String>,
    #[serde(default)]
    pub long_narrative: String,
    #[serde(default)]
    pub portfolio_allocation: String,
}

/// Canonical, scale-correct analysis record.
///
/// Constructed once per upstream response by the record sanitizer and
/// immutable afterwards. Every numeric field is finite, every percentage
/// is on the 0-100 scale, and intrinsic values are floored at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAnalysis {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub current_price: f64,
    #[serde(default)]
    pub currency: String,
    /// 10Y treasury, percent
    #[serde(default)]
    pub risk_free_rate: f64,
    #[serde(default)]
    pub beta: f64,
    #[serde(default)]
    pub last_revenue: f64,
    #[serde(default)]
    pub analysis_summary: String,
    pub scenarios: Vec<ScenarioResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_dive_metrics: Option<DeepDiveMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_thesis: Option<InvestmentThesis>,
    /// Pass-through upstream date string (typically YYYY-MM-DD)
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    /// When sanitation produced this record
    #[serde(default = "Utc::now")]
    pub sanitized_at: DateTime<Utc>,
}

impl StockAnalysis {
    /// The scenario used for rate lookups: the Base case if labeled,
    /// else the middle element, else the first.
    pub fn base_scenario(&self) -> Option<&ScenarioResult> {
        self.scenarios
            .iter()
            .find(|s| s.scenario_type == ScenarioType::Base)
            .or_else(|| self.scenarios.get(1))
            .or_else(|| self.scenarios.first())
    }
}
