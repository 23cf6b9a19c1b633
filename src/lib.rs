//! Volatility regime classification and options strategy scoring.
//!
//! The pipeline: a [`MarketSnapshot`] of price/volatility observables feeds
//! the [`VolatilityEstimator`] (realized vol, implied-vol summary, forward
//! blend), the [`RegimeClassifier`] labels the snapshot with one of four
//! [`VolatilityRegime`] variants, and the [`StrategyScorer`] ranks the fixed
//! [`StrategyCatalog`] against regime, forward vol, and risk tolerance.
//! [`StrategyMetricsEstimator`] supplies explicitly placeholder-grade
//! risk/reward figures.
//!
//! Every component is pure, synchronous, and free of shared mutable state;
//! instances are safe to share across threads without locking. Market-data
//! retrieval, transport, and persistence belong to callers.

pub mod data;
pub mod regime;
pub mod strategy;
pub mod volatility;

// Re-export commonly used types
pub use data::{Greeks, MarketSnapshot, OptionQuote, OptionType, OptionsChain};
pub use regime::{RegimeClassifier, RegimeClassifierConfig, VolatilityRegime};
pub use strategy::{
    RiskMetrics, RiskProfile, RiskTolerance, StrategyCatalog, StrategyDefinition, StrategyError,
    StrategyMetricsBundle, StrategyMetricsEstimator, StrategyRecommendation, StrategyScorer,
};
pub use volatility::{BlackScholes, ImpliedVolSummary, VolatilityError, VolatilityEstimator};
