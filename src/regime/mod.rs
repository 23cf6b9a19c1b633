//! Volatility regime classification module.
//!
//! Ordered rule chain over VIX, realized vol, and skew:
//! - Calm: VIX < 15
//! - Explosive: VIX > 30
//! - Trending: |VIX - realized vol| > 5
//! - MeanReverting: otherwise

pub mod classifier;

pub use classifier::{RegimeClassifier, RegimeClassifierConfig, VolatilityRegime};
