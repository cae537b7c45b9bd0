//! Risk scoring: leverage (70 points) and volatility (30 points).

use std::collections::BTreeMap;

use crate::screener::config::RiskCriteria;
use crate::screener::types::{
    Category, CategoryOutcome, CategoryScore, Findings, Impact, MetricsSnapshot, Severity,
};

/// Beta of the market itself.
const MARKET_BETA: f64 = 1.0;

/// Points awarded when beta is unknown; treated as moderate risk.
const MISSING_BETA_POINTS: f64 = 15.0;

/// Score leverage and volatility.
pub fn score_risk(metrics: &MetricsSnapshot, criteria: &RiskCriteria, weight: f64) -> CategoryOutcome {
    let mut score = 0.0;
    let mut details = BTreeMap::new();
    let mut findings = Findings::default();

    // Debt-to-equity (70 points)
    match metrics.leverage.debt_to_equity {
        Some(dte) => {
            if dte <= criteria.debt_to_equity_preferred {
                score += 70.0;
                findings.strength(format!(
                    "Very low debt-to-equity: {:.2} - conservative leverage",
                    dte
                ));
            } else if dte <= criteria.debt_to_equity_max {
                score += 45.0;
                findings.insight(
                    Category::Risk,
                    Severity::Neutral,
                    "Debt level acceptable",
                    format!("Debt-to-equity {:.2} is within a safe range", dte),
                    Some(Impact::Medium),
                );
            } else {
                score += 15.0;
                findings.red_flag(format!(
                    "High debt-to-equity: {:.2} - high leverage risk",
                    dte
                ));
            }
            details.insert("debt_to_equity".to_string(), dte.into());
        }
        None => findings.weakness("Debt-to-equity unavailable"),
    }

    // Beta (30 points)
    match metrics.leverage.beta {
        Some(beta) => {
            if beta <= MARKET_BETA {
                score += 30.0;
                findings.strength(format!(
                    "Low beta: {:.2} - lower volatility than the market",
                    beta
                ));
            } else if criteria.beta_max.is_some_and(|max| beta <= max) {
                score += 20.0;
                findings.insight(
                    Category::Risk,
                    Severity::Neutral,
                    "Beta moderate",
                    format!("Beta {:.2} - moderate volatility", beta),
                    Some(Impact::Low),
                );
            } else {
                score += 5.0;
                findings.weakness(format!(
                    "High beta: {:.2} - higher volatility than the market",
                    beta
                ));
            }
            details.insert("beta".to_string(), beta.into());
        }
        None => {
            score += MISSING_BETA_POINTS;
            findings.insight(
                Category::Risk,
                Severity::Neutral,
                "Beta data unavailable",
                "Volatility data (beta) is not available",
                Some(Impact::Low),
            );
        }
    }

    CategoryOutcome {
        score: CategoryScore::new(Category::Risk, score, weight, details),
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(dte: Option<f64>, beta: Option<f64>) -> MetricsSnapshot {
        let mut metrics = MetricsSnapshot::default();
        metrics.leverage.debt_to_equity = dte;
        metrics.leverage.beta = beta;
        metrics
    }

    fn score(metrics: &MetricsSnapshot) -> CategoryOutcome {
        score_risk(metrics, &RiskCriteria::default(), 0.20)
    }

    #[test]
    fn test_conservative_and_stable() {
        let outcome = score(&snapshot(Some(0.3), Some(0.8)));
        assert!((outcome.score.score - 100.0).abs() < 1e-9);
        assert!(outcome.score.passed);
        assert_eq!(outcome.findings.strengths.len(), 2);
    }

    #[test]
    fn test_moderate_leverage_and_beta() {
        let outcome = score(&snapshot(Some(0.8), Some(1.3)));
        assert!((outcome.score.score - 65.0).abs() < 1e-9);
        assert_eq!(outcome.findings.insights.len(), 2);
    }

    #[test]
    fn test_high_leverage_red_flag() {
        let outcome = score(&snapshot(Some(2.5), Some(2.0)));
        assert!((outcome.score.score - 20.0).abs() < 1e-9);
        assert!(!outcome.score.passed);
        assert_eq!(outcome.findings.red_flags.len(), 1);
        assert_eq!(outcome.findings.weaknesses.len(), 1);
    }

    #[test]
    fn test_missing_beta_gets_moderate_points() {
        let outcome = score(&snapshot(Some(0.4), None));
        assert!((outcome.score.score - 85.0).abs() < 1e-9);
        assert_eq!(outcome.findings.insights[0].title, "Beta data unavailable");
        assert!(!outcome.score.details.contains_key("beta"));
    }

    #[test]
    fn test_no_beta_ceiling_skips_middle_tier() {
        let criteria = RiskCriteria {
            beta_max: None,
            ..Default::default()
        };
        let outcome = score_risk(&snapshot(None, Some(1.2)), &criteria, 0.2);
        assert!((outcome.score.score - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_absent() {
        let outcome = score(&MetricsSnapshot::default());
        assert!((outcome.score.score - 15.0).abs() < 1e-9);
        assert_eq!(outcome.findings.weaknesses.len(), 1);
    }
}
