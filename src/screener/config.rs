//! Screening criteria and scoring weights.
//!
//! Thresholds for each analysis category plus the weights used to combine the
//! category scores into a total. Every field has a serde default so a settings
//! file only needs to name the values it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenerError};

/// Accepted deviation of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

// ============================================================================
// Screening Criteria
// ============================================================================

/// All screening thresholds, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningCriteria {
    #[serde(default)]
    pub valuation: ValuationCriteria,

    #[serde(default)]
    pub profitability: ProfitabilityCriteria,

    #[serde(default)]
    pub risk: RiskCriteria,

    #[serde(default)]
    pub dividend: DividendCriteria,
}

// ============================================================================
// Valuation Criteria
// ============================================================================

/// Valuation thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationCriteria {
    /// P/E at or below this earns the full P/E points
    #[serde(default = "default_pe_ratio_preferred")]
    pub pe_ratio_preferred: f64,

    /// Highest P/E still considered acceptable
    #[serde(default = "default_pe_ratio_max")]
    pub pe_ratio_max: f64,

    /// P/B at or below this earns the full P/B points
    #[serde(default = "default_pbv_preferred")]
    pub pbv_preferred: f64,

    /// Highest P/B still considered acceptable
    #[serde(default = "default_pbv_max")]
    pub pbv_max: f64,

    /// Market cap at or above this is treated as a blue chip
    #[serde(default = "default_market_cap_preferred")]
    pub market_cap_preferred: f64,

    /// Market cap below this is flagged as a liquidity risk
    #[serde(default = "default_market_cap_min")]
    pub market_cap_min: f64,
}

impl Default for ValuationCriteria {
    fn default() -> Self {
        Self {
            pe_ratio_preferred: default_pe_ratio_preferred(),
            pe_ratio_max: default_pe_ratio_max(),
            pbv_preferred: default_pbv_preferred(),
            pbv_max: default_pbv_max(),
            market_cap_preferred: default_market_cap_preferred(),
            market_cap_min: default_market_cap_min(),
        }
    }
}

fn default_pe_ratio_preferred() -> f64 {
    5.0
}

fn default_pe_ratio_max() -> f64 {
    15.0
}

fn default_pbv_preferred() -> f64 {
    1.0
}

fn default_pbv_max() -> f64 {
    2.0
}

fn default_market_cap_preferred() -> f64 {
    100_000_000_000_000.0 // 1e14
}

fn default_market_cap_min() -> f64 {
    1_000_000_000_000.0 // 1e12, filters out micro caps
}

// ============================================================================
// Profitability Criteria
// ============================================================================

/// Profitability and growth thresholds. Margins and returns are in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityCriteria {
    /// Year-over-year EPS increases required for a "growing" trend
    #[serde(default = "default_eps_growth_min_positive_years")]
    pub eps_growth_min_positive_years: usize,

    #[serde(default = "default_gross_margin_preferred")]
    pub gross_margin_preferred: f64,

    #[serde(default = "default_gross_margin_min")]
    pub gross_margin_min: f64,

    #[serde(default = "default_roe_preferred")]
    pub roe_preferred: f64,

    #[serde(default = "default_roe_min")]
    pub roe_min: f64,
}

impl Default for ProfitabilityCriteria {
    fn default() -> Self {
        Self {
            eps_growth_min_positive_years: default_eps_growth_min_positive_years(),
            gross_margin_preferred: default_gross_margin_preferred(),
            gross_margin_min: default_gross_margin_min(),
            roe_preferred: default_roe_preferred(),
            roe_min: default_roe_min(),
        }
    }
}

fn default_eps_growth_min_positive_years() -> usize {
    3
}

fn default_gross_margin_preferred() -> f64 {
    30.0
}

fn default_gross_margin_min() -> f64 {
    20.0
}

fn default_roe_preferred() -> f64 {
    15.0
}

fn default_roe_min() -> f64 {
    10.0
}

// ============================================================================
// Risk Criteria
// ============================================================================

/// Leverage and volatility thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCriteria {
    #[serde(default = "default_debt_to_equity_preferred")]
    pub debt_to_equity_preferred: f64,

    #[serde(default = "default_debt_to_equity_max")]
    pub debt_to_equity_max: f64,

    /// Highest beta still considered moderate. `None` disables the middle tier.
    #[serde(default = "default_beta_max")]
    pub beta_max: Option<f64>,
}

impl Default for RiskCriteria {
    fn default() -> Self {
        Self {
            debt_to_equity_preferred: default_debt_to_equity_preferred(),
            debt_to_equity_max: default_debt_to_equity_max(),
            beta_max: default_beta_max(),
        }
    }
}

fn default_debt_to_equity_preferred() -> f64 {
    0.5
}

fn default_debt_to_equity_max() -> f64 {
    1.0
}

fn default_beta_max() -> Option<f64> {
    Some(1.5)
}

// ============================================================================
// Dividend Criteria
// ============================================================================

/// Dividend thresholds. Yields are in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendCriteria {
    #[serde(default = "default_dividend_yield_preferred")]
    pub dividend_yield_preferred: f64,

    #[serde(default = "default_dividend_yield_min")]
    pub dividend_yield_min: f64,

    /// Treat a missing dividend as a red flag instead of a weakness
    #[serde(default = "default_true")]
    pub require_dividend: bool,
}

impl Default for DividendCriteria {
    fn default() -> Self {
        Self {
            dividend_yield_preferred: default_dividend_yield_preferred(),
            dividend_yield_min: default_dividend_yield_min(),
            require_dividend: true,
        }
    }
}

fn default_dividend_yield_preferred() -> f64 {
    4.0
}

fn default_dividend_yield_min() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Scoring Weights
// ============================================================================

/// Per-category weights for the total score.
///
/// The four weights always sum to 1.0 within [`WEIGHT_SUM_TOLERANCE`]; both
/// [`ScoringWeights::new`] and deserialization reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeights")]
pub struct ScoringWeights {
    valuation: f64,
    profitability: f64,
    risk: f64,
    dividend: f64,
}

impl ScoringWeights {
    /// Build a weight set, failing if any weight is negative or the sum is off.
    pub fn new(valuation: f64, profitability: f64, risk: f64, dividend: f64) -> Result<Self> {
        for (category, value) in [
            ("valuation", valuation),
            ("profitability", profitability),
            ("risk", risk),
            ("dividend", dividend),
        ] {
            if value < 0.0 || value.is_nan() {
                return Err(ScreenerError::NegativeWeight { category, value });
            }
        }

        let total = valuation + profitability + risk + dividend;
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScreenerError::InvalidWeights { total });
        }

        Ok(Self {
            valuation,
            profitability,
            risk,
            dividend,
        })
    }

    pub fn valuation(&self) -> f64 {
        self.valuation
    }

    pub fn profitability(&self) -> f64 {
        self.profitability
    }

    pub fn risk(&self) -> f64 {
        self.risk
    }

    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    pub fn total(&self) -> f64 {
        self.valuation + self.profitability + self.risk + self.dividend
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            valuation: 0.25,
            profitability: 0.35,
            risk: 0.20,
            dividend: 0.20,
        }
    }
}

/// Unvalidated weights as they appear in a settings file.
#[derive(Debug, Deserialize)]
struct RawWeights {
    #[serde(default = "default_valuation_weight")]
    valuation: f64,
    #[serde(default = "default_profitability_weight")]
    profitability: f64,
    #[serde(default = "default_risk_weight")]
    risk: f64,
    #[serde(default = "default_dividend_weight")]
    dividend: f64,
}

impl TryFrom<RawWeights> for ScoringWeights {
    type Error = ScreenerError;

    fn try_from(raw: RawWeights) -> Result<Self> {
        Self::new(raw.valuation, raw.profitability, raw.risk, raw.dividend)
    }
}

fn default_valuation_weight() -> f64 {
    0.25
}

fn default_profitability_weight() -> f64 {
    0.35
}

fn default_risk_weight() -> f64 {
    0.20
}

fn default_dividend_weight() -> f64 {
    0.20
}

// ============================================================================
// Tests
// ============================================================================
