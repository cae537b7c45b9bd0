//! Profitability and growth scoring.
//!
//! EPS trend (30), gross margin (25), return on equity (25) and cash flow (20,
//! split evenly between operating and free cash flow).

use std::collections::BTreeMap;

use crate::screener::config::ProfitabilityCriteria;
use crate::screener::trend::{is_growing_trend, to_percentage};
use crate::screener::types::{
    Category, CategoryOutcome, CategoryScore, DetailValue, Findings, Impact, MetricsSnapshot,
    Severity,
};

/// Score profitability metrics.
pub fn score_profitability(
    metrics: &MetricsSnapshot,
    criteria: &ProfitabilityCriteria,
    weight: f64,
) -> CategoryOutcome {
    let mut score = 0.0;
    let mut details = BTreeMap::new();
    let mut findings = Findings::default();

    score += score_eps_trend(metrics, criteria, &mut details, &mut findings);
    score += score_gross_margin(metrics, criteria, &mut details, &mut findings);
    score += score_roe(metrics, criteria, &mut details, &mut findings);
    score += score_cash_flow(metrics, &mut details, &mut findings);

    CategoryOutcome {
        score: CategoryScore::new(Category::Profitability, score, weight, details),
        findings,
    }
}

/// EPS trend (30 points).
fn score_eps_trend(
    metrics: &MetricsSnapshot,
    criteria: &ProfitabilityCriteria,
    details: &mut BTreeMap<String, DetailValue>,
    findings: &mut Findings,
) -> f64 {
    let history = &metrics.profitability.eps_history;
    if history.len() < 2 {
        findings.weakness("Insufficient historical EPS data");
        return 0.0;
    }

    // BTreeMap iterates in ascending year order
    let eps_values: Vec<f64> = history.values().copied().collect();
    let growing = is_growing_trend(&eps_values, criteria.eps_growth_min_positive_years);

    let points = if growing {
        findings.strength(format!(
            "EPS growing consistently over the last {} years",
            eps_values.len()
        ));
        30.0
    } else if eps_values[eps_values.len() - 1] > eps_values[eps_values.len() - 2] {
        findings.insight(
            Category::Profitability,
            Severity::Neutral,
            "EPS recovery",
            "EPS shows a recovery in the most recent year",
            Some(Impact::Medium),
        );
        15.0
    } else {
        findings.red_flag("EPS shows no consistent growth");
        5.0
    };

    let trend = if growing { "growing" } else { "declining" };
    details.insert("eps_trend".to_string(), trend.into());
    details.insert("eps_history".to_string(), history.clone().into());

    points
}

/// Gross margin (25 points).
fn score_gross_margin(
    metrics: &MetricsSnapshot,
    criteria: &ProfitabilityCriteria,
    details: &mut BTreeMap<String, DetailValue>,
    findings: &mut Findings,
) -> f64 {
    let Some(gross_margin) = metrics.profitability.gross_margin else {
        findings.weakness("Gross margin unavailable");
        return 0.0;
    };

    let pct = to_percentage(gross_margin);
    details.insert("gross_margin".to_string(), pct.into());

    if pct >= criteria.gross_margin_preferred {
        findings.strength(format!("Excellent gross margin: {:.1}%", pct));
        25.0
    } else if pct >= criteria.gross_margin_min {
        findings.insight(
            Category::Profitability,
            Severity::Positive,
            "Gross margin acceptable",
            format!("Gross margin {:.1}% is in a healthy range", pct),
            Some(Impact::Medium),
        );
        15.0
    } else {
        findings.weakness(format!(
            "Low gross margin: {:.1}% (< {}%)",
            pct, criteria.gross_margin_min
        ));
        5.0
    }
}

/// Return on equity (25 points).
fn score_roe(
    metrics: &MetricsSnapshot,
    criteria: &ProfitabilityCriteria,
    details: &mut BTreeMap<String, DetailValue>,
    findings: &mut Findings,
) -> f64 {
    let Some(roe) = metrics.profitability.roe else {
        findings.weakness("ROE unavailable");
        return 0.0;
    };

    let pct = to_percentage(roe);
    details.insert("roe".to_string(), pct.into());

    if pct >= criteria.roe_preferred {
        findings.strength(format!("Excellent ROE: {:.1}%", pct));
        25.0
    } else if pct >= criteria.roe_min {
        findings.insight(
            Category::Profitability,
            Severity::Positive,
            "ROE acceptable",
            format!("ROE {:.1}% indicates solid profitability", pct),
            Some(Impact::Medium),
        );
        15.0
    } else {
        findings.weakness(format!("Low ROE: {:.1}% (< {}%)", pct, criteria.roe_min));
        5.0
    }
}

/// Operating and free cash flow (10 points each).
///
/// Negative operating cash flow is a red flag; negative free cash flow is only
/// a weakness.
fn score_cash_flow(
    metrics: &MetricsSnapshot,
    details: &mut BTreeMap<String, DetailValue>,
    findings: &mut Findings,
) -> f64 {
    let mut points = 0.0;

    match metrics.cash_flow.operating_cash_flow {
        Some(ocf) if ocf > 0.0 => {
            points += 10.0;
            findings.strength("Positive operating cash flow");
            details.insert("ocf_positive".to_string(), true.into());
        }
        Some(_) => {
            findings.red_flag("Negative operating cash flow - cash flow problems");
            details.insert("ocf_positive".to_string(), false.into());
        }
        None => findings.weakness("Operating cash flow unavailable"),
    }

    match metrics.cash_flow.free_cash_flow {
        Some(fcf) if fcf > 0.0 => {
            points += 10.0;
            findings.strength("Positive free cash flow");
            details.insert("fcf_positive".to_string(), true.into());
        }
        Some(_) => {
            findings.weakness("Negative free cash flow");
            details.insert("fcf_positive".to_string(), false.into());
        }
        None => findings.weakness("Free cash flow unavailable"),
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_eps(history: &[(i32, f64)]) -> MetricsSnapshot {
        let mut metrics = MetricsSnapshot::default();
        metrics.profitability.eps_history = history.iter().copied().collect();
        metrics
    }

    fn score(metrics: &MetricsSnapshot) -> CategoryOutcome {
        score_profitability(metrics, &ProfitabilityCriteria::default(), 0.35)
    }

    #[test]
    fn test_growing_eps_full_points() {
        let metrics = with_eps(&[(2020, 100.0), (2021, 110.0), (2022, 125.0), (2023, 140.0)]);
        let outcome = score(&metrics);
        assert!((outcome.score.score - 30.0).abs() < 1e-9);
        assert_eq!(outcome.findings.strengths.len(), 1);
        assert_eq!(
            outcome.score.details.get("eps_trend"),
            Some(&DetailValue::Text("growing".to_string()))
        );
    }

    #[test]
    fn test_eps_years_sorted_regardless_of_insertion_order() {
        let metrics = with_eps(&[(2023, 140.0), (2020, 100.0), (2022, 125.0), (2021, 110.0)]);
        assert!((score(&metrics).score.score - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_eps_recovery() {
        // Only one increase, but the latest year is up
        let metrics = with_eps(&[(2021, 120.0), (2022, 90.0), (2023, 100.0)]);
        let outcome = score(&metrics);
        assert!((outcome.score.score - 15.0).abs() < 1e-9);
        assert_eq!(outcome.findings.insights[0].title, "EPS recovery");
        assert!(outcome.findings.red_flags.is_empty());
    }

    #[test]
    fn test_eps_declining_red_flag() {
        let metrics = with_eps(&[(2021, 120.0), (2022, 110.0), (2023, 100.0)]);
        let outcome = score(&metrics);
        assert!((outcome.score.score - 5.0).abs() < 1e-9);
        assert_eq!(outcome.findings.red_flags.len(), 1);
    }

    #[test]
    fn test_single_eps_year_insufficient() {
        let outcome = score(&with_eps(&[(2023, 100.0)]));
        assert!(outcome.score.score.abs() < 1e-9);
        assert!(outcome
            .findings
            .weaknesses
            .iter()
            .any(|w| w.contains("Insufficient historical EPS")));
    }

    #[test]
    fn test_margin_fraction_and_percentage_agree() {
        let mut fraction = MetricsSnapshot::default();
        fraction.profitability.gross_margin = Some(0.35);
        fraction.profitability.roe = Some(0.12);

        let mut percent = MetricsSnapshot::default();
        percent.profitability.gross_margin = Some(35.0);
        percent.profitability.roe = Some(12.0);

        let a = score(&fraction);
        let b = score(&percent);
        assert!((a.score.score - b.score.score).abs() < 1e-9);
        // 25 (margin) + 15 (ROE)
        assert!((a.score.score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_margin_of_exactly_one_reads_as_full() {
        let mut metrics = MetricsSnapshot::default();
        metrics.profitability.gross_margin = Some(1.0);
        let outcome = score(&metrics);
        assert!((outcome.score.score - 25.0).abs() < 1e-9);
        assert_eq!(
            outcome.score.details.get("gross_margin"),
            Some(&DetailValue::Number(100.0))
        );
    }

    #[test]
    fn test_low_margin_and_roe() {
        let mut metrics = MetricsSnapshot::default();
        metrics.profitability.gross_margin = Some(0.10);
        metrics.profitability.roe = Some(0.05);
        let outcome = score(&metrics);
        assert!((outcome.score.score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_cash_flow_asymmetry() {
        let mut metrics = MetricsSnapshot::default();
        metrics.cash_flow.operating_cash_flow = Some(-1.0);
        metrics.cash_flow.free_cash_flow = Some(-1.0);
        let outcome = score(&metrics);
        assert!(outcome.score.score.abs() < 1e-9);
        // OCF negative is a red flag, FCF negative only a weakness
        assert_eq!(outcome.findings.red_flags.len(), 1);
        assert!(outcome
            .findings
            .weaknesses
            .contains(&"Negative free cash flow".to_string()));
    }

    #[test]
    fn test_positive_cash_flows() {
        let mut metrics = MetricsSnapshot::default();
        metrics.cash_flow.operating_cash_flow = Some(5e9);
        metrics.cash_flow.free_cash_flow = Some(1e9);
        let outcome = score(&metrics);
        assert!((outcome.score.score - 20.0).abs() < 1e-9);
        assert_eq!(
            outcome.score.details.get("fcf_positive"),
            Some(&DetailValue::Flag(true))
        );
    }

    #[test]
    fn test_maximum_is_one_hundred() {
        let mut metrics = with_eps(&[(2019, 1.0), (2020, 2.0), (2021, 3.0), (2022, 4.0)]);
        metrics.profitability.gross_margin = Some(0.5);
        metrics.profitability.roe = Some(0.25);
        metrics.cash_flow.operating_cash_flow = Some(1.0);
        metrics.cash_flow.free_cash_flow = Some(1.0);
        let outcome = score(&metrics);
        assert!((outcome.score.score - 100.0).abs() < 1e-9);
        assert!(outcome.score.passed);
    }

    #[test]
    fn test_all_absent() {
        let outcome = score(&MetricsSnapshot::default());
        assert!(outcome.score.score.abs() < 1e-9);
        assert_eq!(outcome.findings.weaknesses.len(), 5);
    }
}
