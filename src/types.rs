//! Core domain types for implied-volatility surface construction.
//!
//! All entities here are plain value types: immutable, `Copy` where small,
//! no identity beyond value equality, no lifecycle beyond a single call.
//!
//! # Newtype Strategy
//!
//! **Outputs use newtypes** — [`Vol`] wraps the solver's return value so a
//! recovered volatility cannot be silently confused with a price or a strike.
//!
//! **Inputs use bare `f64`** — quote and market fields are raw floats for
//! ergonomics; validation happens in the surface builder and the quote
//! filter, not at every field access.
//!
//! # Why no `Eq` or `Ord`?
//! These types wrap `f64`, which does not implement `Eq` or `Ord` because
//! `NaN` breaks total ordering. We derive `PartialEq` and `PartialOrd` only.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IvSurfError;

/// Implied volatility `σ`, measured as annualized standard deviation.
///
/// A vol of 0.20 represents 20% annualized volatility. The solver and pricer
/// operate on this unscaled fraction; the conventional ×100 display scaling
/// is available via [`Vol::as_percent`].
///
/// # Examples
/// ```
/// use ivsurf::types::Vol;
/// let vol = Vol(0.20);
/// assert_eq!(vol.as_percent(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vol(pub f64);

impl Vol {
    /// Volatility scaled ×100 for display (0.20 → 20.0).
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

/// Option type: call or put.
///
/// Selects the pricing formula branch and the put/call parity term. Being a
/// closed enum, an out-of-range option type is unrepresentable in compiled
/// code; raw quote feeds that carry `"c"` / `"p"` flags go through the
/// [`FromStr`] impl, which rejects anything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy at strike price. Batch default for surface construction.
    #[default]
    Call,
    /// Right to sell at strike price.
    Put,
}

impl FromStr for OptionType {
    type Err = IvSurfError;

    /// Parse a quote-feed option-type flag.
    ///
    /// Accepts `"c"` / `"call"` and `"p"` / `"put"`, case-insensitive.
    ///
    /// # Errors
    /// Returns [`IvSurfError::InvalidInput`] for anything else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "call" => Ok(OptionType::Call),
            "p" | "put" => Ok(OptionType::Put),
            other => Err(IvSurfError::InvalidInput {
                message: format!("invalid option type {other:?}, must be 'c' or 'p'"),
            }),
        }
    }
}

/// One observed market data point: a listed option at a given strike and
/// expiry, with an observed price.
///
/// Constructed by the caller from raw quote data and consumed once by the
/// solver. `expiry` may be ≤ 0 at the boundary (an option expiring today);
/// the solver returns `None` for such quotes rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike price `K`.
    pub strike: f64,
    /// Time to expiry `T` in years (annualized).
    pub expiry: f64,
    /// Observed market price of the option.
    pub market_price: f64,
}

impl OptionQuote {
    /// Build a quote from a bid/ask pair, taking the mid price as the
    /// observed market price.
    ///
    /// # Examples
    /// ```
    /// use ivsurf::types::OptionQuote;
    /// let q = OptionQuote::from_bid_ask(100.0, 0.5, 4.8, 5.2);
    /// assert_eq!(q.market_price, 5.0);
    /// ```
    pub fn from_bid_ask(strike: f64, expiry: f64, bid: f64, ask: f64) -> Self {
        Self {
            strike,
            expiry,
            market_price: (bid + ask) / 2.0,
        }
    }
}

/// Market inputs shared across all quotes in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Annualized risk-free rate, continuously compounded.
    pub risk_free_rate: f64,
    /// Annualized dividend yield, continuously compounded.
    pub dividend_yield: f64,
}
