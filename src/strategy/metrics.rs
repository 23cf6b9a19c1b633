//! Approximate strategy risk/reward metrics.
//!
//! PLACEHOLDER-GRADE: the bundle returned here is a fixed stand-in that does
//! not depend on the strategy, the snapshot, or the params. No options
//! pricing model exists in this crate; producing real metrics is a separate
//! pricing-engine project. Callers must treat these figures as illustrative
//! only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::{Greeks, MarketSnapshot};

use super::catalog::{StrategyCatalog, StrategyError};

/// Risk-adjusted performance figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub max_drawdown: f64,
}

/// Approximate risk/reward bundle for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyMetricsBundle {
    pub expected_profit: f64,
    pub max_loss: f64,

    /// Probability of profit, in [0, 1]
    pub probability_of_profit: f64,

    /// Underlying prices at which the position breaks even, ascending
    pub break_even_points: Vec<f64>,

    pub greeks: Greeks,
    pub risk_metrics: RiskMetrics,
}

/// Estimates approximate metrics for a strategy type.
///
/// Validates the strategy type against the catalog; everything else about
/// the inputs is accepted and currently unread (see module docs).
pub struct StrategyMetricsEstimator {
    catalog: StrategyCatalog,
}

impl Default for StrategyMetricsEstimator {
    fn default() -> Self {
        Self::new(StrategyCatalog::standard())
    }
}

impl StrategyMetricsEstimator {
    pub fn new(catalog: StrategyCatalog) -> Self {
        Self { catalog }
    }

    /// Approximate metrics for `strategy_type` under `snapshot`.
    ///
    /// Fails only for a type tag the catalog does not know. The snapshot and
    /// params are part of the interface for when a pricing model lands; the
    /// current bundle ignores them.
    pub fn estimate(
        &self,
        strategy_type: &str,
        snapshot: &MarketSnapshot,
        params: &HashMap<String, f64>,
    ) -> Result<StrategyMetricsBundle, StrategyError> {
        let _ = (snapshot, params);

        if self.catalog.by_type(strategy_type).is_none() {
            return Err(StrategyError::UnknownStrategyType(strategy_type.to_string()));
        }

        warn!(strategy_type, "returning placeholder strategy metrics");

        Ok(StrategyMetricsBundle {
            expected_profit: 1000.0,
            max_loss: -500.0,
            probability_of_profit: 0.65,
            break_even_points: vec![350.0, 370.0],
            greeks: Greeks {
                delta: 0.1,
                gamma: 0.02,
                theta: -0.5,
                vega: 0.3,
            },
            risk_metrics: RiskMetrics {
                sharpe_ratio: 1.5,
                sortino_ratio: 2.0,
                max_drawdown: 0.15,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(vix: f64) -> MarketSnapshot {
        MarketSnapshot {
            symbol: "SPY".to_string(),
            timestamp: Utc::now(),
            open: 450.0,
            high: 452.0,
            low: 448.0,
            close: 451.0,
            volume: 1_000_000.0,
            vix,
            realized_vol: 0.18,
            implied_vol_atm: 0.20,
            vvix: None,
            skew: 0.03,
        }
    }

    #[test]
    fn test_placeholder_bundle_is_fixed() {
        let estimator = StrategyMetricsEstimator::default();
        let params = HashMap::new();

        let bundle = estimator
            .estimate("straddle", &snapshot(20.0), &params)
            .unwrap();

        assert_eq!(bundle.expected_profit, 1000.0);
        assert_eq!(bundle.max_loss, -500.0);
        assert_eq!(bundle.probability_of_profit, 0.65);
        assert_eq!(bundle.break_even_points, vec![350.0, 370.0]);
        assert_eq!(bundle.greeks.delta, 0.1);
        assert_eq!(bundle.greeks.gamma, 0.02);
        assert_eq!(bundle.greeks.theta, -0.5);
        assert_eq!(bundle.greeks.vega, 0.3);
        assert_eq!(bundle.risk_metrics.sharpe_ratio, 1.5);
        assert_eq!(bundle.risk_metrics.sortino_ratio, 2.0);
        assert_eq!(bundle.risk_metrics.max_drawdown, 0.15);
    }

    #[test]
    fn test_placeholder_ignores_inputs() {
        let estimator = StrategyMetricsEstimator::default();
        let mut params = HashMap::new();
        params.insert("width".to_string(), 5.0);

        let a = estimator
            .estimate("iron_condor", &snapshot(12.0), &HashMap::new())
            .unwrap();
        let b = estimator
            .estimate("butterfly", &snapshot(45.0), &params)
            .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_strategy_type() {
        let estimator = StrategyMetricsEstimator::default();
        let err = estimator
            .estimate("covered_call", &snapshot(20.0), &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, StrategyError::UnknownStrategyType(_)));
    }
}
