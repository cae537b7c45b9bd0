//! Dividend scoring.
//!
//! A single rule worth the full 100 points. The pass bar for this category is
//! 40 instead of 50.

use std::collections::BTreeMap;

use crate::screener::config::DividendCriteria;
use crate::screener::trend::to_percentage;
use crate::screener::types::{
    Category, CategoryOutcome, CategoryScore, Findings, Impact, MetricsSnapshot, Severity,
};

/// Points for a company without a dividend when one is not required.
const OPTIONAL_DIVIDEND_POINTS: f64 = 20.0;

/// Score dividend yield.
pub fn score_dividend(
    metrics: &MetricsSnapshot,
    criteria: &DividendCriteria,
    weight: f64,
) -> CategoryOutcome {
    let mut score = 0.0;
    let mut details = BTreeMap::new();
    let mut findings = Findings::default();

    match metrics.dividend.dividend_yield.filter(|y| *y > 0.0) {
        Some(dividend_yield) => {
            let pct = to_percentage(dividend_yield);

            if pct >= criteria.dividend_yield_preferred {
                score += 100.0;
                findings.strength(format!("Excellent dividend yield: {:.2}%", pct));
            } else if pct >= criteria.dividend_yield_min {
                score += 60.0;
                findings.insight(
                    Category::Dividend,
                    Severity::Positive,
                    "Dividend yield acceptable",
                    format!("Dividend yield {:.2}% provides a reasonable return", pct),
                    Some(Impact::Medium),
                );
            } else {
                score += 30.0;
                findings.weakness(format!(
                    "Low dividend yield: {:.2}% (< {}%)",
                    pct, criteria.dividend_yield_min
                ));
            }

            details.insert("dividend_yield".to_string(), pct.into());
            details.insert("has_dividend".to_string(), true.into());
        }
        None => {
            if criteria.require_dividend {
                findings.red_flag("Does not pay dividends");
            } else {
                score += OPTIONAL_DIVIDEND_POINTS;
                findings.weakness("Does not pay dividends");
            }
            details.insert("has_dividend".to_string(), false.into());
        }
    }

    CategoryOutcome {
        score: CategoryScore::new(Category::Dividend, score, weight, details),
        findings,
    }
}
