//! Screening engine module.
//!
//! Runs the four category scorers over one company's metrics, combines their
//! scores with the configured weights and derives the rating. Batches are
//! scored independently and ranked by total score.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info, warn};

use super::category::{score_dividend, score_profitability, score_risk, score_valuation};
use super::config::{ScoringWeights, ScreeningCriteria};
use super::types::{
    CategoryScores, CompanyInfo, KeyMetrics, MetricsSnapshot, Rating, ScreeningResult, StockData,
};

const INCOMPLETE_DATA_FLAG: &str = "Incomplete data - some fundamental metrics are unavailable";

// ============================================================================
// Fundamental Analyzer
// ============================================================================

/// Rule-based fundamental analyzer.
///
/// Holds only read-only configuration, so one instance can score any number of
/// companies, including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct FundamentalAnalyzer {
    criteria: ScreeningCriteria,
    weights: ScoringWeights,
}

impl FundamentalAnalyzer {
    /// Create an analyzer with explicit criteria and weights.
    pub fn new(criteria: ScreeningCriteria, weights: ScoringWeights) -> Self {
        Self { criteria, weights }
    }

    pub fn criteria(&self) -> &ScreeningCriteria {
        &self.criteria
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Perform the complete fundamental analysis of one company.
    ///
    /// Never fails: missing metrics lower the score and show up as weaknesses
    /// or red flags.
    pub fn analyze(&self, company: &CompanyInfo, metrics: &MetricsSnapshot) -> ScreeningResult {
        info!(ticker = %company.ticker, "Analyzing");

        let valuation = score_valuation(metrics, &self.criteria.valuation, self.weights.valuation());
        let profitability = score_profitability(
            metrics,
            &self.criteria.profitability,
            self.weights.profitability(),
        );
        let risk = score_risk(metrics, &self.criteria.risk, self.weights.risk());
        let dividend = score_dividend(metrics, &self.criteria.dividend, self.weights.dividend());

        debug!(
            ticker = %company.ticker,
            valuation = valuation.score.score,
            profitability = profitability.score.score,
            risk = risk.score.score,
            dividend = dividend.score.score,
            "Category scores computed"
        );

        let total_score = round2(
            valuation.score.weighted()
                + profitability.score.weighted()
                + risk.score.weighted()
                + dividend.score.weighted(),
        );
        let rating = Rating::from_score(total_score);

        let mut result = ScreeningResult {
            ticker: company.ticker.clone(),
            company_name: company.name.clone(),
            sector: company.sector.clone(),
            industry: company.industry.clone(),
            rating,
            scores: CategoryScores {
                total_score,
                valuation: valuation.score,
                profitability: profitability.score,
                risk: risk.score,
                dividend: dividend.score,
            },
            insights: Vec::new(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            red_flags: Vec::new(),
            key_metrics: KeyMetrics::from(metrics),
            data_completeness: metrics.completeness(),
            screened_at: Utc::now(),
        };

        if !metrics.has_complete_data() {
            warn!(
                ticker = %company.ticker,
                completeness = result.data_completeness,
                "Incomplete data"
            );
            result.add_red_flag(INCOMPLETE_DATA_FLAG);
        }

        result.merge_findings(valuation.findings);
        result.merge_findings(profitability.findings);
        result.merge_findings(risk.findings);
        result.merge_findings(dividend.findings);

        info!(
            ticker = %company.ticker,
            score = total_score,
            rating = ?rating,
            "Analysis complete"
        );

        result
    }

    pub fn analyze_stock(&self, stock: &StockData) -> ScreeningResult {
        self.analyze(&stock.company, &stock.metrics)
    }

    /// Analyze several companies and rank them by total score (descending).
    ///
    /// Companies with equal scores keep their input order.
    pub fn batch_analyze(&self, stocks: &[StockData]) -> Vec<ScreeningResult> {
        let mut results: Vec<ScreeningResult> = stocks
            .iter()
            .map(|stock| self.analyze_stock(stock))
            .collect();

        rank_by_score(&mut results);

        info!(count = results.len(), "Batch analysis complete");
        results
    }

    /// Like [`batch_analyze`](Self::batch_analyze), but scores each company on
    /// the blocking thread pool.
    ///
    /// A company whose task fails is logged and left out; the rest of the batch
    /// still completes.
    pub async fn batch_analyze_concurrent(
        self: &Arc<Self>,
        stocks: Vec<StockData>,
    ) -> Vec<ScreeningResult> {
        let total = stocks.len();

        let tasks = stocks.into_iter().map(|stock| {
            let analyzer = Arc::clone(self);
            let ticker = stock.company.ticker.clone();
            let handle = tokio::task::spawn_blocking(move || {
                analyzer.analyze(&stock.company, &stock.metrics)
            });
            async move { (ticker, handle.await) }
        });

        // join_all keeps input order, which the stable sort below relies on
        let mut results = Vec::with_capacity(total);
        for (ticker, outcome) in join_all(tasks).await {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => warn!(ticker = %ticker, error = %e, "Screening task failed"),
            }
        }

        rank_by_score(&mut results);

        info!(
            count = results.len(),
            failed = total - results.len(),
            "Concurrent batch analysis complete"
        );
        results
    }
}

/// Stable sort by total score, highest first.
fn rank_by_score(results: &mut [ScreeningResult]) {
    results.sort_by(|a, b| b.total_score().total_cmp(&a.total_score()));
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screener::config::DividendCriteria;
    use crate::screener::types::{Category, Severity};

    fn strong_metrics() -> MetricsSnapshot {
        let mut metrics = MetricsSnapshot::default();
        metrics.valuation.pe_ratio = Some(4.0);
        metrics.valuation.price_to_book = Some(0.8);
        metrics.valuation.market_cap = Some(2e14);
        metrics.profitability.eps_history =
            [(2020, 100.0), (2021, 120.0), (2022, 140.0), (2023, 160.0)]
                .into_iter()
                .collect();
        metrics.profitability.gross_margin = Some(0.45);
        metrics.profitability.roe = Some(0.22);
        metrics.cash_flow.operating_cash_flow = Some(1e12);
        metrics.cash_flow.free_cash_flow = Some(5e11);
        metrics.leverage.debt_to_equity = Some(0.3);
        metrics.leverage.beta = Some(0.9);
        metrics.dividend.dividend_yield = Some(0.05);
        metrics
    }

    fn company(ticker: &str) -> CompanyInfo {
        CompanyInfo::new(ticker, format!("{} Tbk", ticker))
    }

    #[test]
    fn test_perfect_company() {
        let analyzer = FundamentalAnalyzer::default();
        let result = analyzer.analyze(&company("BBCA"), &strong_metrics());

        assert!((result.total_score() - 100.0).abs() < 1e-9);
        assert_eq!(result.rating, Rating::VeryStrong);
        assert!(result.is_strong_fundamentals());
        assert!(result.red_flags.is_empty());
        assert!(result.weaknesses.is_empty());
        assert!(result.category_scores().iter().all(|c| c.passed));
    }

    #[test]
    fn test_empty_snapshot_degrades_gracefully() {
        let analyzer = FundamentalAnalyzer::default();
        let result = analyzer.analyze(&company("EMPTY"), &MetricsSnapshot::default());

        assert!(result.scores.valuation.score.abs() < 1e-9);
        assert!(result.scores.profitability.score.abs() < 1e-9);
        assert!((result.scores.risk.score - 15.0).abs() < 1e-9);
        assert!(result.scores.dividend.score.abs() < 1e-9);
        // 15 * 0.20
        assert!((result.total_score() - 3.0).abs() < 1e-9);
        assert_eq!(result.rating, Rating::VeryWeak);
        assert!(!result.weaknesses.is_empty());
        assert_eq!(result.red_flags[0], INCOMPLETE_DATA_FLAG);
        assert!(result.data_completeness.abs() < 1e-9);
    }

    #[test]
    fn test_empty_snapshot_with_optional_dividend() {
        let criteria = ScreeningCriteria {
            dividend: DividendCriteria {
                require_dividend: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let analyzer = FundamentalAnalyzer::new(criteria, ScoringWeights::default());
        let result = analyzer.analyze(&company("EMPTY"), &MetricsSnapshot::default());

        assert!((result.scores.dividend.score - 20.0).abs() < 1e-9);
        // 15 * 0.20 + 20 * 0.20
        assert!((result.total_score() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_applied_to_categories() {
        let weights = ScoringWeights::new(0.4, 0.2, 0.2, 0.2).unwrap();
        let analyzer = FundamentalAnalyzer::new(ScreeningCriteria::default(), weights);
        let result = analyzer.analyze(&company("W"), &MetricsSnapshot::default());

        assert!((result.scores.valuation.weight - 0.4).abs() < 1e-9);
        assert!((result.scores.dividend.weight - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_total_score_rounded_to_two_decimals() {
        let weights = ScoringWeights::new(0.333, 0.333, 0.334, 0.0).unwrap();
        let analyzer = FundamentalAnalyzer::new(ScreeningCriteria::default(), weights);
        let mut metrics = MetricsSnapshot::default();
        metrics.valuation.pe_ratio = Some(10.0); // 25 valuation points
        let result = analyzer.analyze(&company("R"), &metrics);

        // 25 * 0.333 + 15 * 0.334 = 13.335
        let scaled = result.total_score() * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }

    #[test]
    fn test_findings_merged_in_category_order() {
        let mut metrics = strong_metrics();
        metrics.valuation.pe_ratio = Some(10.0);
        metrics.leverage.debt_to_equity = Some(0.8);

        let result = FundamentalAnalyzer::default().analyze(&company("ORD"), &metrics);
        let categories: Vec<Category> = result.insights.iter().map(|i| i.category).collect();
        assert_eq!(categories, vec![Category::Valuation, Category::Risk]);
        assert_eq!(result.insights_by_category(Category::Risk).len(), 1);
        assert_eq!(result.insights_by_severity(Severity::Positive).len(), 1);
    }

    #[test]
    fn test_complete_data_has_no_incomplete_flag() {
        let result = FundamentalAnalyzer::default().analyze(&company("OK"), &strong_metrics());
        assert!(!result.red_flags.iter().any(|f| f == INCOMPLETE_DATA_FLAG));
    }

    #[test]
    fn test_company_identity_copied() {
        let mut info = company("TLKM");
        info.sector = Some("Communication Services".to_string());
        info.industry = Some("Telecom Services".to_string());

        let result = FundamentalAnalyzer::default().analyze(&info, &strong_metrics());
        assert_eq!(result.ticker, "TLKM");
        assert_eq!(result.company_name, "TLKM Tbk");
        assert_eq!(result.sector.as_deref(), Some("Communication Services"));
        assert_eq!(result.key_metrics.pe_ratio, Some(4.0));
    }

    #[test]
    fn test_rank_by_score_is_stable() {
        let analyzer = FundamentalAnalyzer::default();
        let mut results: Vec<ScreeningResult> = ["A", "B", "C", "D"]
            .iter()
            .map(|t| analyzer.analyze(&company(t), &MetricsSnapshot::default()))
            .collect();
        results[0].scores.total_score = 45.5;
        results[1].scores.total_score = 72.0;
        results[2].scores.total_score = 45.5;
        results[3].scores.total_score = 91.2;

        rank_by_score(&mut results);

        let order: Vec<&str> = results.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["D", "B", "A", "C"]);
    }

    #[tokio::test]
    async fn test_concurrent_batch_matches_sequential() {
        let analyzer = Arc::new(FundamentalAnalyzer::default());
        let stocks = vec![
            StockData::new(company("EMPTY"), MetricsSnapshot::default()),
            StockData::new(company("BBCA"), strong_metrics()),
        ];

        let sequential = analyzer.batch_analyze(&stocks);
        let concurrent = analyzer.batch_analyze_concurrent(stocks).await;

        assert_eq!(concurrent.len(), 2);
        assert_eq!(concurrent[0].ticker, "BBCA");
        for (a, b) in sequential.iter().zip(&concurrent) {
            assert_eq!(a.ticker, b.ticker);
            assert!((a.total_score() - b.total_score()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_supplied_quality_score_does_not_raise_incomplete_flag() {
        let mut metrics = MetricsSnapshot::default();
        metrics.valuation.pe_ratio = Some(10.0);
        metrics.valuation.price_to_book = Some(1.5);
        metrics.profitability.roe = Some(0.18);
        metrics.profitability.gross_margin = Some(0.35);
        metrics.leverage.debt_to_equity = Some(0.4);
        metrics.data_quality_score = Some(60.0);

        let result = FundamentalAnalyzer::default().analyze(&company("PART"), &metrics);
        assert!((result.data_completeness - 60.0).abs() < 1e-9);
        assert!(!result.red_flags.iter().any(|f| f == INCOMPLETE_DATA_FLAG));
    }

    #[test]
    fn test_batch_of_nothing() {
        assert!(FundamentalAnalyzer::default().batch_analyze(&[]).is_empty());
    }

    #[test]
    fn test_round2() {
        assert!((round2(13.334_9) - 13.33).abs() < 1e-9);
        assert!((round2(79.999) - 80.0).abs() < 1e-9);
    }
}
