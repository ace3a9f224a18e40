//! Implied volatility extraction from observed option prices.
//!
//! Inverts the Black-Scholes-Merton pricer with Brent's method: find the σ
//! at which the model price matches the observed market price, searching a
//! wide bracket so any economically sensible volatility is reachable.
//!
//! A quote for which no implied volatility exists — expired, non-positive
//! price, or a price no volatility can reproduce — is not an error. The
//! solver returns `None` and never a fabricated number, so "no answer"
//! is type-checked rather than a NaN leaking through arithmetic.

use serde::{Deserialize, Serialize};

use crate::optim::{BrentConfig, brent_root};
use crate::pricing;
use crate::types::{MarketParameters, OptionQuote, OptionType, Vol};

/// Configuration for the implied-volatility solver.
///
/// The defaults cover annualized volatilities from ~0% to 20000%, which
/// brackets anything a quote that admits an implied volatility can require.
///
/// # Examples
/// ```
/// use ivsurf::implied::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.tolerance, 1e-6);
/// assert_eq!(config.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Convergence tolerance on the bracket width and on the price error.
    pub tolerance: f64,
    /// Maximum number of Brent iterations before giving up.
    pub max_iterations: usize,
    /// Lower volatility bracket bound (strictly positive).
    pub vol_lo: f64,
    /// Upper volatility bracket bound.
    pub vol_hi: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            vol_lo: 1e-6,
            vol_hi: 200.0,
        }
    }
}

/// Recover the volatility at which the model price matches `quote.market_price`.
///
/// Pure given its inputs: no shared state, safe to call concurrently for
/// many quotes.
///
/// Returns `None` — immediately, without searching — when `quote.expiry <= 0`
/// or `quote.market_price <= 0`: such quotes have no meaningful volatility.
/// Also returns `None` when no σ in `[config.vol_lo, config.vol_hi]`
/// reproduces the price (arbitrage-violating or stale quotes) or when the
/// iteration budget runs out. Retrying with different bounds is the
/// caller's explicit decision, never done here.
///
/// # Examples
/// ```
/// use ivsurf::implied::{SolverConfig, implied_vol};
/// use ivsurf::types::{MarketParameters, OptionQuote, OptionType};
///
/// let market = MarketParameters {
///     spot: 100.0,
///     risk_free_rate: 0.05,
///     dividend_yield: 0.0,
/// };
/// let quote = OptionQuote {
///     strike: 100.0,
///     expiry: 1.0,
///     market_price: 10.4506,
/// };
/// let vol = implied_vol(&market, &quote, OptionType::Call, &SolverConfig::default()).unwrap();
/// assert!((vol.0 - 0.2).abs() < 1e-4);
/// ```
pub fn implied_vol(
    market: &MarketParameters,
    quote: &OptionQuote,
    option_type: OptionType,
    config: &SolverConfig,
) -> Option<Vol> {
    if quote.expiry <= 0.0 || quote.market_price <= 0.0 {
        return None;
    }

    let target = |vol: f64| {
        pricing::price(
            market.spot,
            quote.strike,
            quote.expiry,
            market.risk_free_rate,
            vol,
            market.dividend_yield,
            option_type,
        ) - quote.market_price
    };

    let brent = BrentConfig {
        max_iter: config.max_iterations,
        tol: config.tolerance,
    };

    brent_root(target, config.vol_lo, config.vol_hi, &brent).map(Vol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn market() -> MarketParameters {
        MarketParameters {
            spot: 100.0,
            risk_free_rate: 0.04,
            dividend_yield: 0.01,
        }
    }

    fn solve(quote: &OptionQuote) -> Option<Vol> {
        implied_vol(&market(), quote, OptionType::Call, &SolverConfig::default())
    }

    #[test]
    fn round_trips_known_vol_across_strikes() {
        let market = market();
        for strike in [80.0, 100.0, 120.0] {
            for true_vol in [0.1, 0.2, 0.5] {
                let price = pricing::price(
                    market.spot,
                    strike,
                    0.5,
                    market.risk_free_rate,
                    true_vol,
                    market.dividend_yield,
                    OptionType::Call,
                );
                let quote = OptionQuote {
                    strike,
                    expiry: 0.5,
                    market_price: price,
                };
                let recovered = solve(&quote).unwrap();
                assert_abs_diff_eq!(recovered.0, true_vol, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn round_trips_for_puts() {
        let market = market();
        let price = pricing::price(100.0, 105.0, 0.5, 0.04, 0.3, 0.01, OptionType::Put);
        let quote = OptionQuote {
            strike: 105.0,
            expiry: 0.5,
            market_price: price,
        };
        let vol = implied_vol(&market, &quote, OptionType::Put, &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(vol.0, 0.3, epsilon = 1e-4);
    }

    #[test]
    fn zero_expiry_is_undefined() {
        let quote = OptionQuote {
            strike: 100.0,
            expiry: 0.0,
            market_price: 5.0,
        };
        assert!(solve(&quote).is_none());
    }

    #[test]
    fn negative_expiry_is_undefined() {
        let quote = OptionQuote {
            strike: 100.0,
            expiry: -0.1,
            market_price: 5.0,
        };
        assert!(solve(&quote).is_none());
    }

    #[test]
    fn non_positive_price_is_undefined() {
        for market_price in [0.0, -1.0] {
            let quote = OptionQuote {
                strike: 100.0,
                expiry: 0.5,
                market_price,
            };
            assert!(solve(&quote).is_none());
        }
    }

    #[test]
    fn unattainable_price_is_undefined() {
        // A call is worth at most S·e^(−qT); twice the spot is unreachable
        // at any volatility in the bracket.
        let quote = OptionQuote {
            strike: 100.0,
            expiry: 0.5,
            market_price: 200.0,
        };
        assert!(solve(&quote).is_none());
    }

    #[test]
    fn exhausted_iteration_budget_is_undefined() {
        let config = SolverConfig {
            max_iterations: 1,
            tolerance: 1e-12,
            ..SolverConfig::default()
        };
        let quote = OptionQuote {
            strike: 100.0,
            expiry: 0.5,
            market_price: 8.0,
        };
        assert!(implied_vol(&market(), &quote, OptionType::Call, &config).is_none());
    }

    #[test]
    fn solver_config_defaults_match_documented_bracket() {
        let config = SolverConfig::default();
        assert_eq!(config.vol_lo, 1e-6);
        assert_eq!(config.vol_hi, 200.0);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.max_iterations, 100);
    }
}
