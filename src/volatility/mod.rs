//! Volatility estimation module.
//!
//! Provides:
//! - Realized volatility from trailing log returns
//! - Implied-volatility summary (ATM + 25-delta skew proxy) via
//!   Black-Scholes inversion
//! - Forward-volatility blend of historical, implied, and VIX signals

pub mod black_scholes;
pub mod estimator;

pub use black_scholes::{BlackScholes, RISK_FREE_RATE};
pub use estimator::{ImpliedVolSummary, VolatilityError, VolatilityEstimator, DEFAULT_WINDOW};
