//! Strategy suitability scoring and ranking.
//!
//! Filters the catalog by regime and volatility band, scores survivors with
//! a fixed weighted sum, and returns the top recommendations.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::regime::VolatilityRegime;

use super::catalog::{RiskProfile, RiskTolerance, StrategyCatalog, StrategyDefinition};

/// A ranked strategy recommendation. Ephemeral; owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    pub name: String,
    pub strategy_type: String,
    pub description: String,

    /// Suitability score, nominally in [0, 1]
    pub score: f64,

    pub risk_profile: RiskProfile,
    pub duration: String,
}

/// Scoring weights and result cap.
///
/// Fixed business constants held on the scorer instance rather than read
/// from ambient configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    pub regime_weight: f64,
    pub volatility_weight: f64,
    pub risk_weight: f64,
    pub max_recommendations: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            regime_weight: 0.4,
            volatility_weight: 0.3,
            risk_weight: 0.3,
            max_recommendations: 3,
        }
    }
}

/// Scores catalog strategies against the prevailing regime.
pub struct StrategyScorer {
    catalog: StrategyCatalog,
    config: ScorerConfig,
}

impl Default for StrategyScorer {
    fn default() -> Self {
        Self::new(StrategyCatalog::standard())
    }
}

impl StrategyScorer {
    pub fn new(catalog: StrategyCatalog) -> Self {
        Self {
            catalog,
            config: ScorerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScorerConfig) -> Self {
        self.config = config;
        self
    }

    /// Rank eligible strategies for the given conditions.
    ///
    /// A strategy is eligible when the regime is among its preferred regimes
    /// and its volatility band contains `forward_vol * 100` (the band is in
    /// percentage points, forward vol is an annualized fraction). Survivors
    /// are scored, sorted descending, ties broken by catalog order, and the
    /// top few returned. An empty result is valid output: nothing fits.
    ///
    /// `skew` is accepted for interface parity with the snapshot pipeline
    /// but does not enter the score.
    pub fn recommend(
        &self,
        regime: VolatilityRegime,
        forward_vol: f64,
        skew: f64,
        risk_tolerance: RiskTolerance,
    ) -> Vec<StrategyRecommendation> {
        let vol_pct = forward_vol * 100.0;

        let mut recommendations: Vec<StrategyRecommendation> = self
            .catalog
            .definitions()
            .iter()
            .filter(|def| def.preferred_regimes.contains(&regime) && def.band_contains(vol_pct))
            .map(|def| StrategyRecommendation {
                name: def.name.to_string(),
                strategy_type: def.strategy_type.to_string(),
                description: def.description.to_string(),
                score: self.score(def, regime, forward_vol, skew, risk_tolerance),
                risk_profile: def.risk_profile,
                duration: def.typical_duration.to_string(),
            })
            .collect();

        // Stable sort keeps catalog declaration order on ties.
        recommendations.sort_by(|a, b| {
            b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
        });
        recommendations.truncate(self.config.max_recommendations);

        debug!(
            %regime,
            forward_vol,
            candidates = recommendations.len(),
            "ranked strategy recommendations"
        );

        recommendations
    }

    /// Weighted suitability score for one eligible definition.
    ///
    /// The regime term is always full weight for survivors of the
    /// eligibility filter; it is still computed per definition because the
    /// term documents what the weight rewards.
    fn score(
        &self,
        def: &StrategyDefinition,
        regime: VolatilityRegime,
        forward_vol: f64,
        _skew: f64,
        risk_tolerance: RiskTolerance,
    ) -> f64 {
        let mut score = 0.0;

        if def.preferred_regimes.contains(&regime) {
            score += self.config.regime_weight;
        }

        // Band-proximity term: 1 at the band midpoint, falling off linearly,
        // floored at 0 but deliberately not capped at 1.
        let band_width = def.max_volatility - def.min_volatility;
        let vol_score = 1.0 - (forward_vol * 100.0 - def.band_midpoint()).abs() / band_width;
        score += self.config.volatility_weight * vol_score.max(0.0);

        score += self.config.risk_weight * risk_affinity(risk_tolerance, def.risk_profile);

        score
    }
}

/// Fixed affinity table: how well a risk profile suits a tolerance.
fn risk_affinity(tolerance: RiskTolerance, profile: RiskProfile) -> f64 {
    match (tolerance, profile) {
        (RiskTolerance::Conservative, RiskProfile::LimitedRisk) => 1.0,
        (RiskTolerance::Conservative, RiskProfile::UnlimitedRisk) => 0.2,
        (RiskTolerance::Moderate, RiskProfile::LimitedRisk) => 0.8,
        (RiskTolerance::Moderate, RiskProfile::UnlimitedRisk) => 0.6,
        (RiskTolerance::Aggressive, RiskProfile::LimitedRisk) => 0.6,
        (RiskTolerance::Aggressive, RiskProfile::UnlimitedRisk) => 1.0,
    }
}
