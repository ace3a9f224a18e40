//! Black-Scholes-Merton pricing of European options.
//!
//! Closed-form model with continuous dividend yield:
//!
//! ```text
//! d1 = (ln(S/K) + (r − q + σ²/2)·T) / (σ√T)
//! d2 = d1 − σ√T
//! Call = S·e^(−qT)·Φ(d1) − K·e^(−rT)·Φ(d2)
//! Put  = K·e^(−rT)·Φ(−d2) − S·e^(−qT)·Φ(−d1)
//! ```
//!
//! Everything here is a pure, deterministic function of its inputs. This is
//! the leaf the implied-volatility solver inverts.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};
use statrs::function::erf::erf;

use crate::conventions::discount_factor;
use crate::types::OptionType;

/// Standard normal cumulative distribution function Φ.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Black-Scholes-Merton `d1` term.
///
/// Requires `spot > 0`, `strike > 0`, `expiry > 0`, `vol > 0`; outside
/// those the division by `σ√T` is meaningless and the result unspecified.
pub fn d1(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64, dividend_yield: f64) -> f64 {
    ((spot / strike).ln() + (rate - dividend_yield + 0.5 * vol * vol) * expiry)
        / (vol * expiry.sqrt())
}

/// Black-Scholes-Merton `d2` term: `d1 − σ√T`.
pub fn d2(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64, dividend_yield: f64) -> f64 {
    d1(spot, strike, expiry, rate, vol, dividend_yield) - vol * expiry.sqrt()
}

/// No-arbitrage price of a European option under Black-Scholes-Merton.
///
/// # Preconditions
/// `spot > 0`, `strike > 0`, `expiry > 0`, `vol > 0`. Behavior for zero or
/// negative time or volatility is undefined at this layer — callers guard
/// before invoking (the implied-volatility solver does).
///
/// # Examples
/// ```
/// use ivsurf::pricing::price;
/// use ivsurf::types::OptionType;
///
/// // Reference at-the-money value: S=K=100, T=1, r=5%, σ=20%, q=0
/// let c = price(100.0, 100.0, 1.0, 0.05, 0.2, 0.0, OptionType::Call);
/// assert!((c - 10.4506).abs() < 1e-4);
/// ```
pub fn price(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    vol: f64,
    dividend_yield: f64,
    option_type: OptionType,
) -> f64 {
    let d1 = d1(spot, strike, expiry, rate, vol, dividend_yield);
    let d2 = d1 - vol * expiry.sqrt();
    let spot_pv = spot * discount_factor(dividend_yield, expiry);
    let strike_pv = strike * discount_factor(rate, expiry);

    match option_type {
        OptionType::Call => spot_pv * norm_cdf(d1) - strike_pv * norm_cdf(d2),
        OptionType::Put => strike_pv * norm_cdf(-d2) - spot_pv * norm_cdf(-d1),
    }
}

/// Full parameter tuple consumed by the pricer, as a value type.
///
/// Built by combining [`MarketParameters`](crate::types::MarketParameters),
/// an [`OptionQuote`](crate::types::OptionQuote), and a candidate
/// volatility. Convenient when a pricing request needs to be stored or
/// serialized rather than passed as seven scalars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingInputs {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to expiry in years.
    pub expiry: f64,
    /// Annualized risk-free rate, continuously compounded.
    pub rate: f64,
    /// Annualized volatility (unscaled fraction).
    pub vol: f64,
    /// Annualized dividend yield, continuously compounded.
    pub dividend_yield: f64,
    /// Call or put.
    pub option_type: OptionType,
}

impl PricingInputs {
    /// Price this parameter set. Same preconditions as [`price`].
    pub fn price(&self) -> f64 {
        price(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.vol,
            self.dividend_yield,
            self.option_type,
        )
    }
}
