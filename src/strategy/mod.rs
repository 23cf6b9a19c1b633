//! Strategy catalog, scoring, and approximate metrics.
//!
//! Provides:
//! - The fixed five-strategy catalog
//! - Regime/volatility-band eligibility and weighted suitability scoring
//! - Placeholder-grade risk/reward metrics

pub mod catalog;
pub mod metrics;
pub mod scorer;

pub use catalog::{
    RiskProfile, RiskTolerance, StrategyCatalog, StrategyDefinition, StrategyError,
};
pub use metrics::{RiskMetrics, StrategyMetricsBundle, StrategyMetricsEstimator};
pub use scorer::{ScorerConfig, StrategyRecommendation, StrategyScorer};
