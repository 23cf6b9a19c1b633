//! Core market data types.
//!
//! These types represent the inputs to the regime classification and
//! strategy scoring engine. They are produced by an external market-data
//! collaborator (already validated there) and are immutable once built.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "C" | "CALL" => Some(Self::Call),
            "P" | "PUT" => Some(Self::Put),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "C",
            Self::Put => "P",
        }
    }
}

/// Greeks for an option position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
}

/// A single option quote.
///
/// Only the fields the implied-volatility summary reads: the strike and the
/// last traded price. Quote-level liquidity data stays with the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike price
    pub strike: Decimal,

    /// Option type (call or put)
    pub option_type: OptionType,

    /// Last traded price
    pub last_price: Decimal,
}

impl OptionQuote {
    pub fn new(strike: Decimal, option_type: OptionType, last_price: Decimal) -> Self {
        Self {
            strike,
            option_type,
            last_price,
        }
    }

    /// Last price as f64 for pricing math.
    pub fn last_price_f64(&self) -> f64 {
        self.last_price.try_into().unwrap_or(0.0)
    }

    /// Strike as f64 for pricing math.
    pub fn strike_f64(&self) -> f64 {
        self.strike.try_into().unwrap_or(0.0)
    }
}

/// All options for a single expiration date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsChain {
    /// Expiration date for this chain
    pub expiration: NaiveDate,

    /// Call options, ascending by strike
    pub calls: Vec<OptionQuote>,

    /// Put options, ascending by strike
    pub puts: Vec<OptionQuote>,
}

impl OptionsChain {
    /// Create a new empty chain.
    pub fn new(expiration: NaiveDate) -> Self {
        Self {
            expiration,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    /// Add a quote to the appropriate side, keeping strike order.
    pub fn add_quote(&mut self, quote: OptionQuote) {
        let side = match quote.option_type {
            OptionType::Call => &mut self.calls,
            OptionType::Put => &mut self.puts,
        };
        let pos = side
            .iter()
            .position(|q| q.strike > quote.strike)
            .unwrap_or(side.len());
        side.insert(pos, quote);
    }

    /// Get all strikes available in this chain.
    pub fn strikes(&self) -> Vec<Decimal> {
        let mut strikes: Vec<_> = self
            .calls
            .iter()
            .chain(self.puts.iter())
            .map(|q| q.strike)
            .collect();
        strikes.sort();
        strikes.dedup();
        strikes
    }

    /// Find a call at a specific strike.
    pub fn call_at_strike(&self, strike: Decimal) -> Option<&OptionQuote> {
        self.calls.iter().find(|q| q.strike == strike)
    }

    /// Find a put at a specific strike.
    pub fn put_at_strike(&self, strike: Decimal) -> Option<&OptionQuote> {
        self.puts.iter().find(|q| q.strike == strike)
    }
}

/// A point-in-time snapshot of market observables for one underlying.
///
/// Built once per fetch cycle by the data-retrieval collaborator, then fed
/// unchanged through the estimator, classifier, and scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Underlying symbol (e.g., "SPY")
    pub symbol: String,

    /// Snapshot time
    pub timestamp: DateTime<Utc>,

    // Price bar
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,

    /// VIX level, in percentage points (e.g., 18.5)
    pub vix: f64,

    /// Realized volatility, annualized fraction (e.g., 0.185)
    pub realized_vol: f64,

    /// ATM implied volatility, annualized fraction
    pub implied_vol_atm: f64,

    /// VVIX level, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vvix: Option<f64>,

    /// Volatility skew: 25-delta put IV minus 25-delta call IV
    pub skew: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_option_type_parsing() {
        assert_eq!(OptionType::from_str("C"), Some(OptionType::Call));
        assert_eq!(OptionType::from_str("P"), Some(OptionType::Put));
        assert_eq!(OptionType::from_str("call"), Some(OptionType::Call));
        assert_eq!(OptionType::from_str("PUT"), Some(OptionType::Put));
        assert_eq!(OptionType::from_str("X"), None);
    }

    #[test]
    fn test_add_quote_keeps_strike_order() {
        let expiration = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let mut chain = OptionsChain::new(expiration);

        chain.add_quote(OptionQuote::new(dec!(110), OptionType::Call, dec!(1.20)));
        chain.add_quote(OptionQuote::new(dec!(100), OptionType::Call, dec!(5.10)));
        chain.add_quote(OptionQuote::new(dec!(105), OptionType::Call, dec!(2.80)));

        let strikes: Vec<_> = chain.calls.iter().map(|q| q.strike).collect();
        assert_eq!(strikes, vec![dec!(100), dec!(105), dec!(110)]);
    }

    #[test]
    fn test_strikes_deduplicated_across_sides() {
        let expiration = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let mut chain = OptionsChain::new(expiration);

        chain.add_quote(OptionQuote::new(dec!(100), OptionType::Call, dec!(5.10)));
        chain.add_quote(OptionQuote::new(dec!(100), OptionType::Put, dec!(4.90)));
        chain.add_quote(OptionQuote::new(dec!(95), OptionType::Put, dec!(2.10)));

        assert_eq!(chain.strikes(), vec![dec!(95), dec!(100)]);
        assert!(chain.call_at_strike(dec!(100)).is_some());
        assert!(chain.put_at_strike(dec!(95)).is_some());
        assert!(chain.call_at_strike(dec!(95)).is_none());
    }
}
