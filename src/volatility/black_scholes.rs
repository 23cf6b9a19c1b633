//! Black-Scholes pricing and implied-volatility inversion.
//!
//! This is the inversion engine behind the implied-volatility summary, not a
//! strategy pricing model. A fixed risk-free rate of 2% is used throughout,
//! which is an approximation rather than a market-implied rate.

use std::f64::consts::PI;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::data::OptionType;

/// Fixed risk-free rate used for all inversions.
pub const RISK_FREE_RATE: f64 = 0.02;

/// Black-Scholes calculator for options pricing and implied volatility.
pub struct BlackScholes {
    /// Risk-free interest rate
    pub rate: f64,
    /// Dividend yield
    pub dividend: f64,
}

impl Default for BlackScholes {
    fn default() -> Self {
        Self {
            rate: RISK_FREE_RATE,
            dividend: 0.0,
        }
    }
}

impl BlackScholes {
    pub fn new(rate: f64, dividend: f64) -> Self {
        Self { rate, dividend }
    }

    /// Calculate d1 parameter.
    fn d1(&self, spot: f64, strike: f64, time: f64, vol: f64) -> f64 {
        let numerator =
            (spot / strike).ln() + (self.rate - self.dividend + 0.5 * vol * vol) * time;
        numerator / (vol * time.sqrt())
    }

    /// Calculate d2 parameter.
    fn d2(&self, spot: f64, strike: f64, time: f64, vol: f64) -> f64 {
        self.d1(spot, strike, time, vol) - vol * time.sqrt()
    }

    /// Standard normal CDF.
    fn norm_cdf(x: f64) -> f64 {
        let normal = Normal::new(0.0, 1.0).unwrap();
        normal.cdf(x)
    }

    /// Standard normal PDF.
    fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Calculate call option price.
    pub fn call_price(&self, spot: f64, strike: f64, time: f64, vol: f64) -> f64 {
        if time <= 0.0 {
            return (spot - strike).max(0.0);
        }

        let d1 = self.d1(spot, strike, time, vol);
        let d2 = self.d2(spot, strike, time, vol);

        spot * (-self.dividend * time).exp() * Self::norm_cdf(d1)
            - strike * (-self.rate * time).exp() * Self::norm_cdf(d2)
    }

    /// Calculate put option price.
    pub fn put_price(&self, spot: f64, strike: f64, time: f64, vol: f64) -> f64 {
        if time <= 0.0 {
            return (strike - spot).max(0.0);
        }

        let d1 = self.d1(spot, strike, time, vol);
        let d2 = self.d2(spot, strike, time, vol);

        strike * (-self.rate * time).exp() * Self::norm_cdf(-d2)
            - spot * (-self.dividend * time).exp() * Self::norm_cdf(-d1)
    }

    /// Calculate option price based on type.
    pub fn price(&self, spot: f64, strike: f64, time: f64, vol: f64, opt_type: OptionType) -> f64 {
        match opt_type {
            OptionType::Call => self.call_price(spot, strike, time, vol),
            OptionType::Put => self.put_price(spot, strike, time, vol),
        }
    }

    /// Calculate implied volatility from option price using Newton-Raphson.
    ///
    /// Returns `None` when the iteration does not converge within 100 steps,
    /// or when the inputs admit no solution (expired, non-positive price).
    pub fn implied_vol(
        &self,
        spot: f64,
        strike: f64,
        time: f64,
        price: f64,
        opt_type: OptionType,
    ) -> Option<f64> {
        if time <= 0.0 || price <= 0.0 {
            return None;
        }

        // Initial guess using Brenner-Subrahmanyam approximation
        let mut vol = (price / spot) * (2.0 * PI / time).sqrt();
        vol = vol.clamp(0.01, 5.0);

        // Newton-Raphson iteration
        let max_iter = 100;
        let tolerance = 1e-6;

        for _ in 0..max_iter {
            let calc_price = self.price(spot, strike, time, vol, opt_type);
            let diff = calc_price - price;

            if diff.abs() < tolerance {
                return Some(vol);
            }

            // Vega (not scaled)
            let vega = spot
                * (-self.dividend * time).exp()
                * Self::norm_pdf(self.d1(spot, strike, time, vol))
                * time.sqrt();

            if vega.abs() < 1e-10 {
                break;
            }

            vol -= diff / vega;
            vol = vol.clamp(0.001, 10.0);
        }

        None
    }
}
