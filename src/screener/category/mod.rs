//! Category scorers.
//!
//! Each scorer is a pure function of the metrics and its criteria section. It
//! returns the category score together with the findings it produced; nothing
//! is shared between scorers, so they can run in any order.

pub mod dividend;
pub mod profitability;
pub mod risk;
pub mod valuation;

pub use dividend::score_dividend;
pub use profitability::score_profitability;
pub use risk::score_risk;
pub use valuation::score_valuation;
