//! Volatility regime classifier.
//!
//! A pure, stateless rule chain over snapshot observables. It keeps no
//! memory of the previous regime and applies no smoothing or hysteresis to
//! transitions; each snapshot is classified fresh. Known simplification.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Discrete volatility regime label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityRegime {
    /// VIX below the calm threshold.
    Calm,
    /// VIX and realized vol diverge while VIX sits mid-range.
    Trending,
    /// VIX mid-range and in line with realized vol.
    MeanReverting,
    /// VIX above the explosive threshold.
    Explosive,
}

impl VolatilityRegime {
    /// Description of the regime.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Calm => "Low volatility, range-bound conditions",
            Self::Trending => "Directional move with vol divergence",
            Self::MeanReverting => "Elevated but stable volatility",
            Self::Explosive => "Volatility spike",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Trending => "trending",
            Self::MeanReverting => "mean_reverting",
            Self::Explosive => "explosive",
        }
    }
}

impl std::fmt::Display for VolatilityRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regime classifier thresholds.
///
/// These are fixed business constants, not environment configuration; the
/// struct exists so the thresholds travel with the classifier instance
/// instead of living in ambient globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeClassifierConfig {
    /// VIX below this is Calm.
    pub vix_calm: f64,
    /// VIX above this is Explosive.
    pub vix_explosive: f64,
    /// |VIX - realized vol| above this is Trending.
    pub divergence: f64,
}

impl Default for RegimeClassifierConfig {
    fn default() -> Self {
        Self {
            vix_calm: 15.0,
            vix_explosive: 30.0,
            divergence: 5.0,
        }
    }
}

/// Rule-based volatility regime classifier.
///
/// Deterministic, idempotent, side-effect free; always returns exactly one
/// of the four labels.
pub struct RegimeClassifier {
    config: RegimeClassifierConfig,
}

impl Default for RegimeClassifier {
    fn default() -> Self {
        Self::new(RegimeClassifierConfig::default())
    }
}

impl RegimeClassifier {
    pub fn new(config: RegimeClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a snapshot's observables. First matching rule wins.
    ///
    /// `vix` is in percentage points (e.g., 18.5) while `realized_vol` is an
    /// annualized fraction (e.g., 0.185); the divergence rule compares them
    /// on those native scales. This matches the production rule set verbatim
    /// and is flagged as a likely unit-scale bug there; [`classify_rescaled`]
    /// is the corrected variant. `skew` is accepted for interface parity but
    /// no rule currently reads it.
    ///
    /// [`classify_rescaled`]: Self::classify_rescaled
    pub fn classify(&self, vix: f64, realized_vol: f64, skew: f64) -> VolatilityRegime {
        let _ = skew;

        let regime = if vix < self.config.vix_calm {
            VolatilityRegime::Calm
        } else if vix > self.config.vix_explosive {
            VolatilityRegime::Explosive
        } else if (vix - realized_vol).abs() > self.config.divergence {
            VolatilityRegime::Trending
        } else {
            VolatilityRegime::MeanReverting
        };

        debug!(vix, realized_vol, %regime, "classified regime");
        regime
    }

    /// Corrected variant of [`classify`](Self::classify): rescales
    /// `realized_vol` from a fraction to percentage points before the
    /// divergence rule, so both sides of the comparison share a unit.
    ///
    /// Not used by the default pipeline; offered as an explicit opt-in.
    pub fn classify_rescaled(&self, vix: f64, realized_vol: f64, skew: f64) -> VolatilityRegime {
        self.classify(vix, realized_vol * 100.0, skew)
    }
}
