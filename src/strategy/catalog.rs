//! Static catalog of options strategy definitions.
//!
//! Built once at startup and read-only thereafter. Every entry carries the
//! volatility band (percentage points), preferred regimes, and risk profile
//! the scorer filters and weighs against.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::regime::VolatilityRegime;

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("unrecognized risk tolerance: {0:?} (expected conservative, moderate, or aggressive)")]
    InvalidRiskTolerance(String),

    #[error("unrecognized strategy type: {0:?}")]
    UnknownStrategyType(String),
}

/// Whether a strategy's worst case is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    LimitedRisk,
    UnlimitedRisk,
}

/// Caller's risk-tolerance preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl std::str::FromStr for RiskTolerance {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(StrategyError::InvalidRiskTolerance(s.to_string())),
        }
    }
}

/// A single options strategy definition.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyDefinition {
    /// Display name, unique within the catalog
    pub name: &'static str,

    /// Machine-readable type tag, unique within the catalog
    pub strategy_type: &'static str,

    pub description: &'static str,

    /// Lower bound of the applicable volatility band, percentage points
    pub min_volatility: f64,

    /// Upper bound of the applicable volatility band, percentage points
    pub max_volatility: f64,

    /// Regimes this strategy is built for; never empty
    pub preferred_regimes: &'static [VolatilityRegime],

    pub risk_profile: RiskProfile,

    /// Typical holding period, descriptive
    pub typical_duration: &'static str,
}

impl StrategyDefinition {
    /// Whether the volatility band contains `vol_pct` (percentage points).
    pub fn band_contains(&self, vol_pct: f64) -> bool {
        self.min_volatility <= vol_pct && vol_pct <= self.max_volatility
    }

    /// Midpoint of the volatility band.
    pub fn band_midpoint(&self) -> f64 {
        (self.min_volatility + self.max_volatility) / 2.0
    }
}

/// The fixed strategy catalog, in declaration order.
///
/// Declaration order is load-bearing: the scorer breaks score ties by it.
pub struct StrategyCatalog {
    definitions: Vec<StrategyDefinition>,
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl StrategyCatalog {
    /// The standard five-strategy catalog.
    pub fn standard() -> Self {
        use VolatilityRegime::*;

        Self {
            definitions: vec![
                StrategyDefinition {
                    name: "Long Calendar Spread",
                    strategy_type: "calendar_spread",
                    description: "Buy longer-dated option, sell shorter-dated option at same strike",
                    min_volatility: 10.0,
                    max_volatility: 20.0,
                    preferred_regimes: &[Calm],
                    risk_profile: RiskProfile::LimitedRisk,
                    typical_duration: "30-60 days",
                },
                StrategyDefinition {
                    name: "Iron Butterfly",
                    strategy_type: "butterfly",
                    description: "Combination of bull and bear spreads with same middle strike",
                    min_volatility: 8.0,
                    max_volatility: 15.0,
                    preferred_regimes: &[Calm, MeanReverting],
                    risk_profile: RiskProfile::LimitedRisk,
                    typical_duration: "30-45 days",
                },
                StrategyDefinition {
                    name: "Long Straddle",
                    strategy_type: "straddle",
                    description: "Buy ATM call and put with same expiration",
                    min_volatility: 25.0,
                    max_volatility: 100.0,
                    preferred_regimes: &[Explosive],
                    risk_profile: RiskProfile::UnlimitedRisk,
                    typical_duration: "30-45 days",
                },
                StrategyDefinition {
                    name: "Iron Condor",
                    strategy_type: "iron_condor",
                    description: "Sell OTM put spread and OTM call spread",
                    min_volatility: 15.0,
                    max_volatility: 30.0,
                    preferred_regimes: &[MeanReverting],
                    risk_profile: RiskProfile::LimitedRisk,
                    typical_duration: "30-45 days",
                },
                StrategyDefinition {
                    name: "Ratio Back Spread",
                    strategy_type: "backspread",
                    description: "Buy OTM options and sell fewer ATM options",
                    min_volatility: 20.0,
                    max_volatility: 40.0,
                    preferred_regimes: &[Trending, Explosive],
                    risk_profile: RiskProfile::UnlimitedRisk,
                    typical_duration: "15-30 days",
                },
            ],
        }
    }

    /// All definitions in declaration order.
    pub fn definitions(&self) -> &[StrategyDefinition] {
        &self.definitions
    }

    /// Look up a definition by its type tag.
    pub fn by_type(&self, strategy_type: &str) -> Option<&StrategyDefinition> {
        self.definitions
            .iter()
            .find(|d| d.strategy_type == strategy_type)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
