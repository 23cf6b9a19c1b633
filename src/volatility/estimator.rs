//! Volatility estimation from prices, option chains, and index levels.
//!
//! Three estimates feed the regime/scoring pipeline:
//! - realized volatility from trailing log returns,
//! - an implied-volatility summary (ATM + skew) inverted from chain quotes,
//! - a forward-volatility blend of the two plus the VIX level.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::{OptionQuote, OptionsChain};

use super::black_scholes::BlackScholes;

/// Default trailing window for realized volatility, in returns.
pub const DEFAULT_WINDOW: usize = 30;

/// Trading days per year, used to annualize realized volatility.
const TRADING_DAYS: f64 = 252.0;

/// Blend weights for forward volatility: historical, implied, VIX.
const FORWARD_WEIGHTS: [f64; 3] = [0.3, 0.4, 0.3];

#[derive(Error, Debug)]
pub enum VolatilityError {
    #[error("insufficient price history: need at least {needed} returns, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("no tradable quote: {0}")]
    NoQuote(String),

    #[error("implied volatility inversion did not converge for strike {strike}")]
    Convergence { strike: f64 },

    #[error("non-finite input: {0}")]
    NonFinite(&'static str),
}

/// Implied-volatility summary for one expiration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImpliedVolSummary {
    /// Implied volatility at the ATM strike
    pub atm: f64,

    /// 25-delta put IV minus 25-delta call IV
    pub skew: f64,

    pub put_25d: f64,
    pub call_25d: f64,
}

/// Derives realized, implied, and forward volatility estimates.
///
/// Pure and stateless apart from the fixed-rate Black-Scholes inverter, so a
/// single instance is safe to share across threads.
pub struct VolatilityEstimator {
    bs: BlackScholes,
}

impl Default for VolatilityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl VolatilityEstimator {
    pub fn new() -> Self {
        Self {
            bs: BlackScholes::default(),
        }
    }

    /// Annualized realized volatility over the trailing `window` log returns.
    ///
    /// Sample standard deviation (n-1 denominator) of `ln(p[i]/p[i-1])`,
    /// annualized by sqrt(252). A constant price series yields 0.0, never NaN.
    pub fn realized_volatility(
        &self,
        prices: &[f64],
        window: usize,
    ) -> Result<f64, VolatilityError> {
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err(VolatilityError::NonFinite("price"));
        }

        let returns: Vec<f64> = prices
            .windows(2)
            .map(|w| (w[1] / w[0]).ln())
            .collect();

        let trailing = if returns.len() > window {
            &returns[returns.len() - window..]
        } else {
            &returns[..]
        };

        let n = trailing.len();
        if n < 2 {
            return Err(VolatilityError::InsufficientData { needed: 2, got: n });
        }

        let mean = trailing.iter().sum::<f64>() / n as f64;
        let variance = trailing
            .iter()
            .map(|r| (r - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;

        Ok(variance.sqrt() * TRADING_DAYS.sqrt())
    }

    /// Implied-volatility summary: ATM IV plus a 25-delta skew proxy.
    ///
    /// The ATM strike is the call strike closest to spot. The "25-delta" put
    /// and call are the quotes at the 25%-of-list position among OTM puts and
    /// calls respectively. This is a positional proxy carried over from the
    /// production rule set, not a true delta-matched search. Time to
    /// expiration uses a 365-day year; all inversions use the fixed 2% rate.
    pub fn implied_volatility_summary(
        &self,
        chain: &OptionsChain,
        spot: f64,
        as_of: NaiveDate,
        expiration: NaiveDate,
    ) -> Result<ImpliedVolSummary, VolatilityError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(VolatilityError::NonFinite("spot"));
        }

        let time = (expiration - as_of).num_days() as f64 / 365.0;

        let atm_call = self.atm_call(chain, spot)?;
        let atm_strike = atm_call.strike;
        debug!(%atm_strike, spot, "selected ATM strike");

        let atm = self.invert(atm_call, spot, time)?;

        // OTM legs: puts below the ATM strike, calls above it.
        let otm_puts: Vec<&OptionQuote> = chain
            .puts
            .iter()
            .filter(|q| q.strike < atm_strike)
            .collect();
        let otm_calls: Vec<&OptionQuote> = chain
            .calls
            .iter()
            .filter(|q| q.strike > atm_strike)
            .collect();

        let put_25d_quote = otm_puts
            .get(otm_puts.len() / 4)
            .ok_or_else(|| VolatilityError::NoQuote(format!("no OTM puts below {atm_strike}")))?;
        let call_25d_quote = otm_calls
            .get(otm_calls.len() / 4)
            .ok_or_else(|| VolatilityError::NoQuote(format!("no OTM calls above {atm_strike}")))?;

        let put_25d = self.invert(put_25d_quote, spot, time)?;
        let call_25d = self.invert(call_25d_quote, spot, time)?;

        Ok(ImpliedVolSummary {
            atm,
            skew: put_25d - call_25d,
            put_25d,
            call_25d,
        })
    }

    /// Forward volatility: `0.3*historical + 0.4*implied + 0.3*(vix/100)`.
    ///
    /// The VIX term is divided by 100 because the index is quoted in
    /// percentage points while the other two inputs are annualized fractions.
    pub fn forward_volatility(
        &self,
        historical_vol: f64,
        implied_vol: f64,
        vix: f64,
    ) -> Result<f64, VolatilityError> {
        if !historical_vol.is_finite() {
            return Err(VolatilityError::NonFinite("historical_vol"));
        }
        if !implied_vol.is_finite() {
            return Err(VolatilityError::NonFinite("implied_vol"));
        }
        if !vix.is_finite() {
            return Err(VolatilityError::NonFinite("vix"));
        }

        Ok(FORWARD_WEIGHTS[0] * historical_vol
            + FORWARD_WEIGHTS[1] * implied_vol
            + FORWARD_WEIGHTS[2] * vix / 100.0)
    }

    /// Call quote with strike closest to spot.
    fn atm_call<'a>(
        &self,
        chain: &'a OptionsChain,
        spot: f64,
    ) -> Result<&'a OptionQuote, VolatilityError> {
        chain
            .calls
            .iter()
            .min_by(|a, b| {
                let da = (a.strike_f64() - spot).abs();
                let db = (b.strike_f64() - spot).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| VolatilityError::NoQuote("empty call side".into()))
    }

    /// Invert a quote's last price to an implied volatility.
    fn invert(&self, quote: &OptionQuote, spot: f64, time: f64) -> Result<f64, VolatilityError> {
        let strike = quote.strike_f64();
        self.bs
            .implied_vol(spot, strike, time, quote.last_price_f64(), quote.option_type)
            .ok_or_else(|| {
                warn!(
                    strike,
                    option_type = quote.option_type.as_str(),
                    "implied volatility inversion failed"
                );
                VolatilityError::Convergence { strike }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal::Decimal;

    use crate::data::OptionType;

    fn estimator() -> VolatilityEstimator {
        VolatilityEstimator::new()
    }

    #[test]
    fn test_realized_vol_constant_series_is_zero() {
        let vol = estimator()
            .realized_volatility(&[100.0, 100.0, 100.0, 100.0], DEFAULT_WINDOW)
            .unwrap();
        assert_eq!(vol, 0.0);
        assert!(vol.is_finite());
    }

    #[test]
    fn test_realized_vol_known_value() {
        // Alternating +1%/-1% moves: returns ln(1.01), ln(1/1.01), ...
        let mut prices = vec![100.0];
        for i in 0..20 {
            let last = *prices.last().unwrap();
            prices.push(if i % 2 == 0 { last * 1.01 } else { last / 1.01 });
        }
        let vol = estimator()
            .realized_volatility(&prices, DEFAULT_WINDOW)
            .unwrap();

        // Sample std of alternating +/-r is slightly above r
        let r = 1.01f64.ln();
        let annualized = r * 252f64.sqrt();
        assert!(vol > annualized * 0.95 && vol < annualized * 1.10);
    }

    #[test]
    fn test_realized_vol_insufficient_data() {
        let err = estimator()
            .realized_volatility(&[100.0, 101.0], DEFAULT_WINDOW)
            .unwrap_err();
        assert!(matches!(
            err,
            VolatilityError::InsufficientData { needed: 2, got: 1 }
        ));

        let err = estimator().realized_volatility(&[], DEFAULT_WINDOW).unwrap_err();
        assert!(matches!(err, VolatilityError::InsufficientData { .. }));
    }

    #[test]
    fn test_realized_vol_uses_trailing_window() {
        // Volatile early history followed by a flat tail; a window covering
        // only the tail must report zero.
        let mut prices = vec![100.0, 120.0, 90.0, 130.0];
        prices.extend(std::iter::repeat(110.0).take(10));
        let vol = estimator().realized_volatility(&prices, 8).unwrap();
        assert_eq!(vol, 0.0);
    }

    #[test]
    fn test_realized_vol_rejects_bad_prices() {
        let err = estimator()
            .realized_volatility(&[100.0, -5.0, 101.0], DEFAULT_WINDOW)
            .unwrap_err();
        assert!(matches!(err, VolatilityError::NonFinite("price")));
    }

    #[test]
    fn test_forward_vol_blend() {
        let fv = estimator().forward_volatility(0.2, 0.25, 20.0).unwrap();
        assert_relative_eq!(fv, 0.22, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_vol_rejects_non_finite() {
        let err = estimator()
            .forward_volatility(f64::NAN, 0.25, 20.0)
            .unwrap_err();
        assert!(matches!(err, VolatilityError::NonFinite("historical_vol")));

        let err = estimator()
            .forward_volatility(0.2, 0.25, f64::INFINITY)
            .unwrap_err();
        assert!(matches!(err, VolatilityError::NonFinite("vix")));
    }

    /// Build a chain priced by Black-Scholes at known per-strike vols.
    fn synthetic_chain(
        spot: f64,
        time: f64,
        strikes: &[f64],
        vol_at: impl Fn(f64) -> f64,
    ) -> OptionsChain {
        let bs = BlackScholes::default();
        let expiration = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let mut chain = OptionsChain::new(expiration);

        for &k in strikes {
            let vol = vol_at(k);
            let call = bs.call_price(spot, k, time, vol);
            let put = bs.put_price(spot, k, time, vol);
            chain.add_quote(OptionQuote::new(
                Decimal::from_f64(k).unwrap(),
                OptionType::Call,
                Decimal::from_f64(call).unwrap(),
            ));
            chain.add_quote(OptionQuote::new(
                Decimal::from_f64(k).unwrap(),
                OptionType::Put,
                Decimal::from_f64(put).unwrap(),
            ));
        }
        chain
    }

    #[test]
    fn test_implied_vol_summary_flat_surface() {
        let spot = 100.0;
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let expiration = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();
        let time = (expiration - as_of).num_days() as f64 / 365.0;

        let strikes: Vec<f64> = (0..9).map(|i| 90.0 + 2.5 * i as f64).collect();
        let chain = synthetic_chain(spot, time, &strikes, |_| 0.25);

        let summary = estimator()
            .implied_volatility_summary(&chain, spot, as_of, expiration)
            .unwrap();

        assert_relative_eq!(summary.atm, 0.25, epsilon = 1e-3);
        assert_relative_eq!(summary.put_25d, 0.25, epsilon = 1e-3);
        assert_relative_eq!(summary.call_25d, 0.25, epsilon = 1e-3);
        assert_relative_eq!(summary.skew, 0.0, epsilon = 2e-3);
    }

    #[test]
    fn test_implied_vol_summary_put_skew_is_positive() {
        let spot = 100.0;
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let expiration = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();
        let time = (expiration - as_of).num_days() as f64 / 365.0;

        // Downside strikes carry higher vol, upside lower (equity-style smirk)
        let strikes: Vec<f64> = (0..9).map(|i| 90.0 + 2.5 * i as f64).collect();
        let chain = synthetic_chain(spot, time, &strikes, |k| 0.25 + (100.0 - k) * 0.004);

        let summary = estimator()
            .implied_volatility_summary(&chain, spot, as_of, expiration)
            .unwrap();

        assert!(summary.put_25d > summary.call_25d);
        assert!(summary.skew > 0.0);
    }

    #[test]
    fn test_implied_vol_summary_empty_chain() {
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let expiration = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();
        let chain = OptionsChain::new(expiration);

        let err = estimator()
            .implied_volatility_summary(&chain, 100.0, as_of, expiration)
            .unwrap_err();
        assert!(matches!(err, VolatilityError::NoQuote(_)));
    }

    #[test]
    fn test_implied_vol_summary_missing_otm_side() {
        let spot = 100.0;
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let expiration = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();
        let time = (expiration - as_of).num_days() as f64 / 365.0;

        // Only a single strike: no OTM put or call exists.
        let chain = synthetic_chain(spot, time, &[100.0], |_| 0.25);

        let err = estimator()
            .implied_volatility_summary(&chain, spot, as_of, expiration)
            .unwrap_err();
        assert!(matches!(err, VolatilityError::NoQuote(_)));
    }

    #[test]
    fn test_implied_vol_summary_convergence_failure() {
        let spot = 100.0;
        let as_of = NaiveDate::from_ymd_opt(2024, 5, 22).unwrap();
        let expiration = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();

        // ATM call priced above the spot itself: no vol can reproduce it.
        let mut chain = OptionsChain::new(expiration);
        chain.add_quote(OptionQuote::new(
            Decimal::from(100),
            OptionType::Call,
            Decimal::from(150),
        ));

        let err = estimator()
            .implied_volatility_summary(&chain, spot, as_of, expiration)
            .unwrap_err();
        assert!(matches!(err, VolatilityError::Convergence { .. }));
    }
}
