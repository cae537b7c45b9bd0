//! Fundamental Screener Library
//!
//! Rule-based fundamental analysis for equities. Each company's metrics are
//! scored in four categories, combined into a weighted total and mapped onto
//! a rating with human-readable findings.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      fundamental-screener                           │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐     │
//! │  │  Settings       │  │  Fundamental    │  │  Report         │     │
//! │  │  (criteria,     │─▶│  Analyzer       │─▶│  (markdown,     │     │
//! │  │   weights)      │  │  (4 scorers)    │  │   json, text)   │     │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! ## Categories
//! - **Valuation**: P/E, P/B, market cap
//! - **Profitability**: EPS trend, gross margin, ROE, cash flow
//! - **Risk**: debt-to-equity, beta
//! - **Dividend**: dividend yield
//!
//! ## Missing data
//! - Absent metrics are never errors; each scorer has a fallback rule
//! - Incomplete core data adds a red flag to the result

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod screener;

pub use config::Settings;
pub use error::{Result, ScreenerError};
pub use screener::{
    FundamentalAnalyzer, MetricsSnapshot, Rating, ScoringWeights, ScreeningCriteria,
    ScreeningReport, ScreeningResult, StockData,
};
