//! Realty Metrics - deterministic investment metrics for real-estate acquisitions
//!
//! This library provides:
//! - Mortgage math (payment, amortization, principal paydown, interest by year)
//! - Carrying-cost estimation and cash-flow projection
//! - Return metrics (cap rate, cash-on-cash, DSCR, break-even rent, IRR/NPV)
//! - Tax-benefit and multi-year ROI projection
//! - Flip / rental / vacation-rental strategy comparison
//! - Batch scenario runs, an explicit result cache and CSV/JSON export
//!
//! All money is `rust_decimal::Decimal`; nothing reads the clock or does I/O
//! except the loaders and exporters.

pub mod analysis;
pub mod assumptions;
pub mod cache;
pub mod error;
pub mod export;
pub mod finance;
pub mod money;
pub mod property;
pub mod scenario;
pub mod strategy;

// Re-export commonly used types
pub use analysis::{AnalysisEngine, AnalysisRequest, AnalysisResult, ComparisonRequest, ComparisonResult};
pub use assumptions::Assumptions;
pub use cache::AnalysisCache;
pub use error::{EngineError, EngineResult};
pub use scenario::ScenarioRunner;
pub use strategy::StrategyKind;
