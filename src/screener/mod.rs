//! Fundamental Screening Module.
//!
//! Scores companies on their fundamentals and ranks them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Fundamental screening flow                      │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  ┌─────────────┐     ┌─────────────────────────────────┐           │
//! │  │ StockData   │────▶│  FundamentalAnalyzer            │           │
//! │  │ (company +  │     │  ├─ valuation      (P/E, P/B)   │           │
//! │  │  metrics)   │     │  ├─ profitability  (EPS, ROE)   │           │
//! │  └─────────────┘     │  ├─ risk           (D/E, beta)  │           │
//! │                      │  └─ dividend       (yield)      │           │
//! │                      └───────────────┬─────────────────┘           │
//! │                                      │ weighted total              │
//! │                      ┌───────────────▼─────────────────┐           │
//! │                      │  ScreeningResult (rating,       │           │
//! │                      │  insights, strengths, flags)    │           │
//! │                      └─────────────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use fundamental_screener::screener::{FundamentalAnalyzer, ScreeningReport};
//!
//! let analyzer = FundamentalAnalyzer::default();
//! let results = analyzer.batch_analyze(&stocks);
//!
//! println!("{}", ScreeningReport::new(results).to_markdown());
//! ```

pub mod category;
pub mod config;
pub mod engine;
pub mod report;
pub mod trend;
pub mod types;

pub use config::{
    DividendCriteria, ProfitabilityCriteria, RiskCriteria, ScoringWeights, ScreeningCriteria,
    ValuationCriteria,
};
pub use engine::FundamentalAnalyzer;
pub use report::{rating_label, ReportFormat, ScreeningReport};
pub use types::{
    Category, CategoryScore, CategoryScores, CompanyInfo, DetailValue, Impact, Insight,
    KeyMetrics, MetricsSnapshot, Rating, ScreeningResult, Severity, StockData,
};
