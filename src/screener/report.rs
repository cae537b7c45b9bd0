//! Report generation module for screening results.
//!
//! Generates reports in various formats:
//! - Markdown (for documentation)
//! - JSON (for API/programmatic use)
//! - Plain text summary (for terminals and logs)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::trend::to_percentage;
use super::types::{Category, Rating, ScreeningResult};

// ============================================================================
// Report Format
// ============================================================================

/// Supported report formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Markdown format (human-readable)
    #[default]
    Markdown,
    /// JSON format (machine-readable)
    Json,
    /// Plain text summary
    Text,
}

impl ReportFormat {
    /// File extension used when saving.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

// ============================================================================
// Value Formatting
// ============================================================================

/// Display label for a rating.
pub fn rating_label(rating: Rating) -> &'static str {
    match rating {
        Rating::VeryStrong => "Very Strong ⭐⭐⭐",
        Rating::Strong => "Strong ⭐⭐",
        Rating::Fair => "Fair ⭐",
        Rating::Weak => "Weak ⚠️",
        Rating::VeryWeak => "Very Weak ⚠️⚠️",
        Rating::InsufficientData => "Insufficient Data ❓",
    }
}

/// Format a ratio such as P/E ("8.50x").
pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}x", v),
        None => "N/A".to_string(),
    }
}

/// Format a value that may be a fraction (0.15) or already a percentage (15.0).
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", to_percentage(v)),
        None => "N/A".to_string(),
    }
}

/// Format a large amount with a T/B/M suffix.
pub fn format_large_number(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "N/A".to_string();
    };

    let abs = v.abs();
    if abs >= 1e12 {
        format!("{:.2}T", v / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else {
        format!("{:.0}", v)
    }
}

// ============================================================================
// Screening Report
// ============================================================================

/// Report generator for a batch of screening results.
///
/// Results are rendered in the order given; the engine already ranks them.
pub struct ScreeningReport {
    results: Vec<ScreeningResult>,
}

impl ScreeningReport {
    /// Create a new report from screening results.
    pub fn new(results: Vec<ScreeningResult>) -> Self {
        Self { results }
    }

    /// Generate report in the specified format.
    pub fn generate(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Markdown => Ok(self.to_markdown()),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Text => Ok(self.to_text()),
        }
    }

    /// Save report to file, adding the format's extension when the path has none.
    pub fn save_to_file(&self, path: &Path, format: ReportFormat) -> Result<PathBuf> {
        let content = self.generate(format)?;

        let file_path = if path.extension().is_none() {
            path.with_extension(format.extension())
        } else {
            path.to_path_buf()
        };

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create report directory")?;
        }

        std::fs::write(&file_path, content)
            .with_context(|| format!("Failed to write report file {}", file_path.display()))?;

        Ok(file_path)
    }

    /// Generate markdown report.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Fundamental Screening Report\n\n");
        md.push_str(&format!(
            "**Generated**: {} UTC\n**Stocks screened**: {}\n\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            self.results.len()
        ));

        // Comparison table
        md.push_str("## Comparison\n\n");
        md.push_str("| Ticker | Company | Rating | Score | P/E | P/B | ROE | D/E | Div Yield |\n");
        md.push_str("|--------|---------|--------|-------|-----|-----|-----|-----|-----------|\n");
        for r in &self.results {
            let km = &r.key_metrics;
            md.push_str(&format!(
                "| {} | {} | {} | {:.1} | {} | {} | {} | {} | {} |\n",
                r.ticker,
                r.company_name,
                rating_label(r.rating),
                r.total_score(),
                format_ratio(km.pe_ratio),
                format_ratio(km.pbv),
                format_percentage(km.roe),
                format_ratio(km.debt_to_equity),
                format_percentage(km.dividend_yield),
            ));
        }
        md.push('\n');

        for r in &self.results {
            md.push_str(&format!("## {} - {}\n\n", r.ticker, r.company_name));
            md.push_str(&format!(
                "**Rating**: {} ({:.2}/100)\n**Data completeness**: {:.0}%\n\n",
                rating_label(r.rating),
                r.total_score(),
                r.data_completeness
            ));

            md.push_str("| Category | Score | Weight | Passed |\n");
            md.push_str("|----------|-------|--------|--------|\n");
            for category in Category::ALL {
                let cs = r.scores.get(category);
                md.push_str(&format!(
                    "| {} | {:.1} | {:.0}% | {} |\n",
                    category,
                    cs.score,
                    cs.weight * 100.0,
                    if cs.passed { "✅" } else { "❌" }
                ));
            }
            md.push('\n');

            let km = &r.key_metrics;
            md.push_str("| Metric | Value |\n");
            md.push_str("|--------|-------|\n");
            for (name, value) in [
                ("Market Cap", format_large_number(km.market_cap)),
                ("Current Price", format_large_number(km.current_price)),
                ("EPS", km.eps.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}", v))),
                ("P/E", format_ratio(km.pe_ratio)),
                ("P/B", format_ratio(km.pbv)),
                ("ROE", format_percentage(km.roe)),
                ("Gross Margin", format_percentage(km.gross_margin)),
                ("Debt/Equity", format_ratio(km.debt_to_equity)),
                ("Dividend Yield", format_percentage(km.dividend_yield)),
            ] {
                md.push_str(&format!("| {} | {} |\n", name, value));
            }
            md.push('\n');

            push_list(&mut md, "Strengths", &r.strengths);
            push_list(&mut md, "Weaknesses", &r.weaknesses);
            push_list(&mut md, "Red Flags", &r.red_flags);
        }

        md.push_str("---\n\n");
        md.push_str(
            "*This report is generated from fundamental data only and is not investment advice.*\n",
        );

        md
    }

    /// Generate JSON report.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.results).context("Failed to serialize report")
    }

    /// Generate plain-text summary, one block per result.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for r in &self.results {
            out.push_str(&format!("{} ({})\n", r.ticker, r.company_name));
            out.push_str(&format!(
                "  Rating: {}  Score: {:.2}/100  Completeness: {:.0}%\n",
                rating_label(r.rating),
                r.total_score(),
                r.data_completeness
            ));
            let categories: Vec<String> = r
                .category_scores()
                .iter()
                .map(|cs| format!("{} {:.1}", cs.category, cs.score))
                .collect();
            out.push_str(&format!("  {}\n", categories.join(" | ")));
            out.push_str(&format!(
                "  Strengths: {}  Weaknesses: {}  Red flags: {}\n\n",
                r.strengths.len(),
                r.weaknesses.len(),
                r.red_flags.len()
            ));
        }

        out
    }

    /// Get the underlying results.
    pub fn results(&self) -> &[ScreeningResult] {
        &self.results
    }
}

fn push_list(md: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    md.push_str(&format!("### {}\n\n", title));
    for item in items {
        md.push_str(&format!("- {}\n", item));
    }
    md.push('\n');
}

// ============================================================================
// Tests
// ============================================================================
