//! Core types for the screening engine.
//!
//! Inputs ([`MetricsSnapshot`], [`CompanyInfo`]) describe one company as fetched by
//! the data layer. Outputs ([`ScreeningResult`] and its parts) describe how that
//! company fared against the screening criteria.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Company Identity
// ============================================================================

/// Basic company information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Ticker symbol (e.g., "BBCA.JK")
    pub ticker: String,
    /// Company name
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

impl CompanyInfo {
    pub fn new(ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            sector: None,
            industry: None,
        }
    }
}

// ============================================================================
// Metrics Snapshot
// ============================================================================

/// Valuation metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationMetrics {
    /// Trailing P/E
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    /// Price to book value
    pub price_to_book: Option<f64>,
    pub market_cap: Option<f64>,
}

/// Profitability and growth metrics.
///
/// Margins and returns may be fractions (0.25) or percentages (25.0).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitabilityMetrics {
    /// Trailing earnings per share
    pub eps: Option<f64>,
    /// Historical EPS keyed by calendar year
    pub eps_history: BTreeMap<i32, f64>,
    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub profit_margin: Option<f64>,
    /// Return on equity
    pub roe: Option<f64>,
}

/// Cash flow metrics. Only the sign is scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowMetrics {
    pub operating_cash_flow: Option<f64>,
    pub free_cash_flow: Option<f64>,
}

/// Leverage and volatility metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeverageMetrics {
    pub debt_to_equity: Option<f64>,
    /// Volatility relative to the market
    pub beta: Option<f64>,
}

/// Dividend metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividendMetrics {
    /// Trailing dividend yield; absent or non-positive means no dividend
    pub dividend_yield: Option<f64>,
}

/// Price metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceMetrics {
    pub current_price: Option<f64>,
}

/// Fundamental facts about one company at a point in time.
///
/// Every field is optional. A missing value is not the same as zero and is
/// handled by each scorer's fallback rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
    pub valuation: ValuationMetrics,
    pub profitability: ProfitabilityMetrics,
    pub cash_flow: CashFlowMetrics,
    pub leverage: LeverageMetrics,
    pub dividend: DividendMetrics,
    pub price: PriceMetrics,
    /// Completeness (0-100) as computed by the data layer
    pub data_quality_score: Option<f64>,
}

impl MetricsSnapshot {
    /// Whether the metrics the screen depends on most are all present.
    pub fn has_complete_data(&self) -> bool {
        [
            self.valuation.pe_ratio,
            self.valuation.price_to_book,
            self.profitability.roe,
            self.profitability.gross_margin,
            self.leverage.debt_to_equity,
        ]
        .iter()
        .all(Option::is_some)
    }

    /// Data completeness in percent.
    ///
    /// Uses the data layer's score when present and finite. Otherwise critical fields count
    /// 1.0 and supplementary fields 0.5 towards the total.
    pub fn completeness(&self) -> f64 {
        if let Some(score) = self.data_quality_score.filter(|s| s.is_finite()) {
            return score.clamp(0.0, 100.0);
        }

        let critical = [
            self.valuation.pe_ratio,
            self.valuation.price_to_book,
            self.valuation.market_cap,
            self.profitability.roe,
            self.profitability.gross_margin,
            self.profitability.eps,
            self.leverage.debt_to_equity,
            self.cash_flow.operating_cash_flow,
        ];
        let additional = [
            self.valuation.forward_pe,
            self.profitability.profit_margin,
            self.profitability.operating_margin,
            self.cash_flow.free_cash_flow,
            self.dividend.dividend_yield,
        ];

        let total = critical.len() as f64 + additional.len() as f64 * 0.5;
        let achieved = critical.iter().filter(|v| v.is_some()).count() as f64
            + additional.iter().filter(|v| v.is_some()).count() as f64 * 0.5;

        ((achieved / total) * 100.0).min(100.0)
    }
}

/// A company together with its metrics, as supplied to a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockData {
    pub company: CompanyInfo,
    #[serde(default)]
    pub metrics: MetricsSnapshot,
}

impl StockData {
    pub fn new(company: CompanyInfo, metrics: MetricsSnapshot) -> Self {
        Self { company, metrics }
    }

    pub fn ticker(&self) -> &str {
        &self.company.ticker
    }
}

// ============================================================================
// Categories and Insights
// ============================================================================

/// Analysis category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Valuation,
    Profitability,
    Risk,
    Dividend,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Valuation,
        Category::Profitability,
        Category::Risk,
        Category::Dividend,
    ];

    /// Minimum score for the category to count as passed.
    pub fn pass_bar(&self) -> f64 {
        match self {
            Self::Dividend => 40.0,
            Self::Valuation | Self::Profitability | Self::Risk => 50.0,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valuation => write!(f, "Valuation"),
            Self::Profitability => write!(f, "Profitability"),
            Self::Risk => write!(f, "Risk"),
            Self::Dividend => write!(f, "Dividend"),
        }
    }
}

/// Insight severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Positive,
    Negative,
    Neutral,
    Warning,
}

/// Expected impact of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// A single finding from the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: Category,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub impact: Option<Impact>,
}

/// Findings produced by one category scorer, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Findings {
    pub insights: Vec<Insight>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub red_flags: Vec<String>,
}

impl Findings {
    pub fn insight(
        &mut self,
        category: Category,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        impact: Option<Impact>,
    ) {
        self.insights.push(Insight {
            category,
            severity,
            title: title.into(),
            description: description.into(),
            impact,
        });
    }

    pub fn strength(&mut self, message: impl Into<String>) {
        self.strengths.push(message.into());
    }

    pub fn weakness(&mut self, message: impl Into<String>) {
        self.weaknesses.push(message.into());
    }

    pub fn red_flag(&mut self, message: impl Into<String>) {
        self.red_flags.push(message.into());
    }
}

// ============================================================================
// Category Scores
// ============================================================================

/// A value recorded in [`CategoryScore::details`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    Number(f64),
    Flag(bool),
    Text(String),
    /// (year, value) pairs in ascending year order
    Series(Vec<(i32, f64)>),
}

impl From<f64> for DetailValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for DetailValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<BTreeMap<i32, f64>> for DetailValue {
    fn from(value: BTreeMap<i32, f64>) -> Self {
        Self::Series(value.into_iter().collect())
    }
}

/// Score for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// 0-100
    pub score: f64,
    /// Weight applied to this category in the total
    pub weight: f64,
    pub passed: bool,
    /// Sub-metric values that fed the score
    pub details: BTreeMap<String, DetailValue>,
}

impl CategoryScore {
    /// Finalize a category score, deriving `passed` from the category's pass bar.
    pub fn new(
        category: Category,
        score: f64,
        weight: f64,
        details: BTreeMap<String, DetailValue>,
    ) -> Self {
        let score = score.clamp(0.0, 100.0);
        Self {
            category,
            score,
            weight,
            passed: score >= category.pass_bar(),
            details,
        }
    }

    /// Contribution of this category to the total score.
    pub fn weighted(&self) -> f64 {
        self.score * self.weight
    }
}

/// Output of a single category scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOutcome {
    pub score: CategoryScore,
    pub findings: Findings,
}

/// The four category scores and their weighted total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    /// Weighted total (0-100), rounded to two decimals
    pub total_score: f64,
    pub valuation: CategoryScore,
    pub profitability: CategoryScore,
    pub risk: CategoryScore,
    pub dividend: CategoryScore,
}

impl CategoryScores {
    pub fn all(&self) -> [&CategoryScore; 4] {
        [
            &self.valuation,
            &self.profitability,
            &self.risk,
            &self.dividend,
        ]
    }

    pub fn get(&self, category: Category) -> &CategoryScore {
        match category {
            Category::Valuation => &self.valuation,
            Category::Profitability => &self.profitability,
            Category::Risk => &self.risk,
            Category::Dividend => &self.dividend,
        }
    }
}

// ============================================================================
// Rating
// ============================================================================

/// Fundamental rating derived from the total score.
///
/// `InsufficientData` marks a result that has not been scored. It is never
/// produced by [`Rating::from_score`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    VeryStrong,
    Strong,
    Fair,
    Weak,
    VeryWeak,
    #[default]
    InsufficientData,
}

impl Rating {
    /// Map a 0-100 total score onto a rating.
    ///
    /// 80+ very strong, 60+ strong, 40+ fair, 20+ weak, below 20 very weak.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::VeryStrong
        } else if score >= 60.0 {
            Self::Strong
        } else if score >= 40.0 {
            Self::Fair
        } else if score >= 20.0 {
            Self::Weak
        } else {
            Self::VeryWeak
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, Self::Strong | Self::VeryStrong)
    }
}

// ============================================================================
// Key Metrics
// ============================================================================

/// Raw values most often shown alongside a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub pe_ratio: Option<f64>,
    pub pbv: Option<f64>,
    pub market_cap: Option<f64>,
    pub roe: Option<f64>,
    pub gross_margin: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub current_price: Option<f64>,
    pub eps: Option<f64>,
}

impl From<&MetricsSnapshot> for KeyMetrics {
    fn from(metrics: &MetricsSnapshot) -> Self {
        Self {
            pe_ratio: metrics.valuation.pe_ratio,
            pbv: metrics.valuation.price_to_book,
            market_cap: metrics.valuation.market_cap,
            roe: metrics.profitability.roe,
            gross_margin: metrics.profitability.gross_margin,
            debt_to_equity: metrics.leverage.debt_to_equity,
            dividend_yield: metrics.dividend.dividend_yield,
            current_price: metrics.price.current_price,
            eps: metrics.profitability.eps,
        }
    }
}

// ============================================================================
// Screening Result
// ============================================================================

/// Complete screening result for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub ticker: String,
    pub company_name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub rating: Rating,
    pub scores: CategoryScores,
    pub insights: Vec<Insight>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub red_flags: Vec<String>,
    pub key_metrics: KeyMetrics,
    /// 0-100
    pub data_completeness: f64,
    pub screened_at: DateTime<Utc>,
}

impl ScreeningResult {
    pub fn add_insight(
        &mut self,
        category: Category,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        impact: Option<Impact>,
    ) {
        self.insights.push(Insight {
            category,
            severity,
            title: title.into(),
            description: description.into(),
            impact,
        });
    }

    pub fn add_strength(&mut self, message: impl Into<String>) {
        self.strengths.push(message.into());
    }

    pub fn add_weakness(&mut self, message: impl Into<String>) {
        self.weaknesses.push(message.into());
    }

    pub fn add_red_flag(&mut self, message: impl Into<String>) {
        self.red_flags.push(message.into());
    }

    /// Append a scorer's findings after the ones already recorded.
    pub fn merge_findings(&mut self, findings: Findings) {
        self.insights.extend(findings.insights);
        self.strengths.extend(findings.strengths);
        self.weaknesses.extend(findings.weaknesses);
        self.red_flags.extend(findings.red_flags);
    }

    pub fn total_score(&self) -> f64 {
        self.scores.total_score
    }

    pub fn category_scores(&self) -> [&CategoryScore; 4] {
        self.scores.all()
    }

    pub fn insights_by_category(&self, category: Category) -> Vec<&Insight> {
        self.insights
            .iter()
            .filter(|i| i.category == category)
            .collect()
    }

    pub fn insights_by_severity(&self, severity: Severity) -> Vec<&Insight> {
        self.insights
            .iter()
            .filter(|i| i.severity == severity)
            .collect()
    }

    pub fn is_strong_fundamentals(&self) -> bool {
        self.rating.is_strong()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_snapshot() -> MetricsSnapshot {
        let mut metrics = MetricsSnapshot::default();
        metrics.valuation.pe_ratio = Some(10.0);
        metrics.valuation.price_to_book = Some(1.5);
        metrics.profitability.roe = Some(0.18);
        metrics.profitability.gross_margin = Some(0.35);
        metrics.leverage.debt_to_equity = Some(0.4);
        metrics
    }

    #[test]
    fn test_rating_breakpoints() {
        assert_eq!(Rating::from_score(100.0), Rating::VeryStrong);
        assert_eq!(Rating::from_score(80.0), Rating::VeryStrong);
        assert_eq!(Rating::from_score(79.99), Rating::Strong);
        assert_eq!(Rating::from_score(60.0), Rating::Strong);
        assert_eq!(Rating::from_score(59.99), Rating::Fair);
        assert_eq!(Rating::from_score(40.0), Rating::Fair);
        assert_eq!(Rating::from_score(39.99), Rating::Weak);
        assert_eq!(Rating::from_score(20.0), Rating::Weak);
        assert_eq!(Rating::from_score(19.99), Rating::VeryWeak);
        assert_eq!(Rating::from_score(0.0), Rating::VeryWeak);
    }

    #[test]
    fn test_rating_default_is_unscored() {
        assert_eq!(Rating::default(), Rating::InsufficientData);
        assert!(!Rating::InsufficientData.is_strong());
        assert!(Rating::Strong.is_strong());
        assert!(Rating::VeryStrong.is_strong());
        assert!(!Rating::Fair.is_strong());
    }

    #[test]
    fn test_rating_serialization() {
        let json = serde_json::to_string(&Rating::VeryStrong).unwrap();
        assert_eq!(json, "\"VERY_STRONG\"");
    }

    #[test]
    fn test_pass_bars() {
        assert!((Category::Valuation.pass_bar() - 50.0).abs() < 0.001);
        assert!((Category::Dividend.pass_bar() - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_category_score_pass_flag() {
        let dividend = CategoryScore::new(Category::Dividend, 40.0, 0.2, BTreeMap::new());
        assert!(dividend.passed);

        let risk = CategoryScore::new(Category::Risk, 45.0, 0.2, BTreeMap::new());
        assert!(!risk.passed);
        assert!((risk.weighted() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_complete_data_check() {
        let mut metrics = complete_snapshot();
        assert!(metrics.has_complete_data());

        metrics.leverage.debt_to_equity = None;
        assert!(!metrics.has_complete_data());
        assert!(!MetricsSnapshot::default().has_complete_data());
    }

    #[test]
    fn test_completeness_prefers_supplied_score() {
        let metrics = MetricsSnapshot {
            data_quality_score: Some(72.5),
            ..Default::default()
        };
        assert!((metrics.completeness() - 72.5).abs() < 1e-9);
    }

    #[test]
    fn test_completeness_ignores_non_finite_score() {
        let mut metrics = complete_snapshot();
        metrics.data_quality_score = Some(f64::NAN);
        let expected = 5.0 / 10.5 * 100.0;
        assert!((metrics.completeness() - expected).abs() < 1e-9);

        metrics.data_quality_score = Some(f64::INFINITY);
        assert!((metrics.completeness() - expected).abs() < 1e-9);

        metrics.data_quality_score = Some(140.0);
        assert!((metrics.completeness() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_completeness_computed_from_fields() {
        assert!(MetricsSnapshot::default().completeness().abs() < 1e-9);

        // 5 of 8 critical fields, none of the additional: 5 / 10.5
        let metrics = complete_snapshot();
        let expected = 5.0 / 10.5 * 100.0;
        assert!((metrics.completeness() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_deserializes_from_partial_json() {
        let json = r#"{
            "valuation": { "pe_ratio": 8.5 },
            "profitability": { "eps_history": { "2021": 100.0, "2022": 120.0 } }
        }"#;
        let metrics: MetricsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.valuation.pe_ratio, Some(8.5));
        assert_eq!(metrics.valuation.price_to_book, None);
        assert_eq!(metrics.profitability.eps_history.len(), 2);
        assert_eq!(metrics.dividend.dividend_yield, None);
    }

    #[test]
    fn test_key_metrics_from_snapshot() {
        let mut metrics = complete_snapshot();
        metrics.price.current_price = Some(9_250.0);
        let key = KeyMetrics::from(&metrics);
        assert_eq!(key.pe_ratio, Some(10.0));
        assert_eq!(key.pbv, Some(1.5));
        assert_eq!(key.current_price, Some(9_250.0));
        assert_eq!(key.dividend_yield, None);
    }
}
