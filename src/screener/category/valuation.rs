//! Valuation scoring.
//!
//! | Rule       | Points | Best tier           | Acceptable tier |
//! |------------|--------|---------------------|-----------------|
//! | P/E        | 40     | ≤ preferred → 40    | ≤ max → 25      |
//! | P/B        | 40     | ≤ preferred → 40    | ≤ max → 25      |
//! | Market cap | 20     | ≥ preferred → 20    | ≥ min → 15      |
//!
//! Below the acceptable tier P/E and P/B earn 10 and market cap earns 5.

use std::collections::BTreeMap;

use crate::screener::config::ValuationCriteria;
use crate::screener::types::{
    Category, CategoryOutcome, CategoryScore, Findings, Impact, MetricsSnapshot, Severity,
};

/// Score valuation metrics (P/E, P/B, market cap).
pub fn score_valuation(
    metrics: &MetricsSnapshot,
    criteria: &ValuationCriteria,
    weight: f64,
) -> CategoryOutcome {
    let mut score = 0.0;
    let mut details = BTreeMap::new();
    let mut findings = Findings::default();

    // P/E (40 points), only meaningful when positive
    match metrics.valuation.pe_ratio.filter(|pe| *pe > 0.0) {
        Some(pe) => {
            if pe <= criteria.pe_ratio_preferred {
                score += 40.0;
                findings.strength(format!("Excellent P/E ratio: {:.2}", pe));
            } else if pe <= criteria.pe_ratio_max {
                score += 25.0;
                findings.insight(
                    Category::Valuation,
                    Severity::Positive,
                    "P/E ratio acceptable",
                    format!(
                        "P/E ratio {:.2} is within the acceptable range (<= {})",
                        pe, criteria.pe_ratio_max
                    ),
                    Some(Impact::Medium),
                );
            } else {
                score += 10.0;
                findings.weakness(format!(
                    "High P/E ratio: {:.2} (> {})",
                    pe, criteria.pe_ratio_max
                ));
            }
            details.insert("pe_ratio".to_string(), pe.into());
        }
        None => findings.weakness("P/E ratio unavailable"),
    }

    // P/B (40 points)
    match metrics.valuation.price_to_book.filter(|pbv| *pbv > 0.0) {
        Some(pbv) => {
            if pbv <= criteria.pbv_preferred {
                score += 40.0;
                findings.strength(format!("Excellent P/B ratio: {:.2} (undervalued)", pbv));
            } else if pbv <= criteria.pbv_max {
                score += 25.0;
                findings.insight(
                    Category::Valuation,
                    Severity::Positive,
                    "P/B ratio acceptable",
                    format!(
                        "P/B ratio {:.2} is still reasonable (<= {})",
                        pbv, criteria.pbv_max
                    ),
                    Some(Impact::Medium),
                );
            } else {
                score += 10.0;
                findings.weakness(format!(
                    "High P/B ratio: {:.2} (> {})",
                    pbv, criteria.pbv_max
                ));
            }
            details.insert("pbv".to_string(), pbv.into());
        }
        None => findings.weakness("P/B ratio unavailable"),
    }

    // Market cap (20 points)
    match metrics.valuation.market_cap {
        Some(market_cap) => {
            if market_cap >= criteria.market_cap_preferred {
                score += 20.0;
                findings.strength("Large market cap - blue chip stock");
            } else if market_cap >= criteria.market_cap_min {
                score += 15.0;
                findings.insight(
                    Category::Valuation,
                    Severity::Neutral,
                    "Market cap moderate",
                    "Market capitalization is in the moderate range",
                    Some(Impact::Low),
                );
            } else {
                score += 5.0;
                findings.red_flag("Small market cap - high liquidity risk");
            }
            details.insert("market_cap".to_string(), market_cap.into());
        }
        None => findings.weakness("Market cap unavailable"),
    }

    CategoryOutcome {
        score: CategoryScore::new(Category::Valuation, score, weight, details),
        findings,
    }
}
