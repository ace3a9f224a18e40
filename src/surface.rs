//! Batch assembly of an implied-volatility point cloud from option quotes.
//!
//! The host application fetches the option chain and renders the surface;
//! this module covers everything in between: filter the raw quotes, invert
//! each survivor independently, drop the quotes that admit no implied
//! volatility, and hand back scattered (expiry, moneyness, vol) points for
//! downstream interpolation.
//!
//! ```
//! use ivsurf::surface::SurfaceBuilder;
//! use ivsurf::types::OptionQuote;
//!
//! let surface = SurfaceBuilder::new()
//!     .spot(100.0)
//!     .rate(0.04)
//!     .dividend_yield(0.01)
//!     .add_quote(OptionQuote::from_bid_ask(95.0, 0.5, 8.2, 8.6))
//!     .add_quote(OptionQuote::from_bid_ask(100.0, 0.5, 5.4, 5.8))
//!     .add_quote(OptionQuote::from_bid_ask(105.0, 0.5, 3.3, 3.7))
//!     .build()?;
//!
//! for p in surface.points() {
//!     assert!(p.vol.0 > 0.0);
//! }
//! # Ok::<(), ivsurf::IvSurfError>(())
//! ```

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::conventions;
use crate::error::IvSurfError;
use crate::implied::{SolverConfig, implied_vol};
use crate::types::{MarketParameters, OptionQuote, OptionType, Vol};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Quote admission policy applied before any volatility is computed.
///
/// Defaults mirror common practice for a listed-equity surface: keep
/// moneyness in \[0.8, 1.2\] and drop options expiring within 7 days, whose
/// prices are dominated by pinning and settlement noise. All bounds are
/// configurable — the policy belongs here, not inside the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteFilter {
    /// Quotes with moneyness K/S below this are dropped.
    pub min_moneyness: f64,
    /// Quotes with moneyness K/S above this are dropped.
    pub max_moneyness: f64,
    /// Quotes expiring sooner than this (in years) are dropped.
    pub min_expiry: f64,
}

impl Default for QuoteFilter {
    fn default() -> Self {
        Self {
            min_moneyness: 0.8,
            max_moneyness: 1.2,
            min_expiry: conventions::year_fraction(7.0),
        }
    }
}

impl QuoteFilter {
    /// Create a filter with an explicit moneyness band and expiry floor.
    ///
    /// # Errors
    /// Returns [`IvSurfError::InvalidInput`] if `min_moneyness` is not
    /// strictly below `max_moneyness`, if either bound is non-positive, or
    /// if `min_expiry` is negative.
    pub fn new(
        min_moneyness: f64,
        max_moneyness: f64,
        min_expiry: f64,
    ) -> crate::error::Result<Self> {
        validate_positive(min_moneyness, "min_moneyness")?;
        validate_positive(max_moneyness, "max_moneyness")?;
        validate_non_negative(min_expiry, "min_expiry")?;
        if min_moneyness >= max_moneyness {
            return Err(IvSurfError::InvalidInput {
                message: format!(
                    "min_moneyness ({min_moneyness}) must be less than max_moneyness ({max_moneyness})"
                ),
            });
        }
        Ok(Self {
            min_moneyness,
            max_moneyness,
            min_expiry,
        })
    }

    /// Whether a quote passes the filter for the given spot.
    ///
    /// Rejects non-positive prices, expiries under the floor, and strikes
    /// outside the moneyness band.
    pub fn accepts(&self, quote: &OptionQuote, spot: f64) -> bool {
        if quote.market_price <= 0.0 || quote.expiry < self.min_expiry {
            return false;
        }
        let m = conventions::moneyness(quote.strike, spot);
        (self.min_moneyness..=self.max_moneyness).contains(&m)
    }
}

/// One point of the assembled surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    /// Time to expiry in years.
    pub expiry: f64,
    /// Strike price.
    pub strike: f64,
    /// Spot moneyness K/S.
    pub moneyness: f64,
    /// Recovered implied volatility (unscaled fraction).
    pub vol: Vol,
}

/// Scattered implied-volatility points, sorted by (expiry, moneyness).
///
/// Deliberately not interpolated: gridding a point cloud for display is the
/// host application's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvSurface {
    points: Vec<SurfacePoint>,
}

impl IvSurface {
    /// The surface points, sorted by (expiry, moneyness).
    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    /// Consume the surface and return its points.
    pub fn into_points(self) -> Vec<SurfacePoint> {
        self.points
    }

    /// Number of points on the surface.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether every quote was filtered out or failed to invert.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Builder for assembling an implied-volatility surface from market quotes.
///
/// Accumulates spot, rates, and raw quotes, then filters and inverts the
/// batch. Each inversion is independent; with the `parallel` feature the
/// batch is mapped across threads via rayon.
///
/// # Examples
///
/// ```
/// use ivsurf::implied::SolverConfig;
/// use ivsurf::surface::{QuoteFilter, SurfaceBuilder};
/// use ivsurf::types::OptionQuote;
///
/// let quotes = vec![
///     OptionQuote { strike: 90.0, expiry: 0.25, market_price: 11.1 },
///     OptionQuote { strike: 100.0, expiry: 0.25, market_price: 4.6 },
///     OptionQuote { strike: 110.0, expiry: 0.25, market_price: 1.2 },
/// ];
///
/// let surface = SurfaceBuilder::new()
///     .spot(100.0)
///     .rate(0.04)
///     .filter(QuoteFilter::new(0.85, 1.15, 0.02)?)
///     .solver(SolverConfig::default())
///     .add_quotes(&quotes)
///     .build()?;
///
/// assert!(!surface.is_empty());
/// # Ok::<(), ivsurf::IvSurfError>(())
/// ```
#[derive(Debug)]
pub struct SurfaceBuilder {
    spot: Option<f64>,
    rate: Option<f64>,
    dividend_yield: Option<f64>,
    option_type: OptionType,
    filter: QuoteFilter,
    solver: SolverConfig,
    quotes: Vec<OptionQuote>,
}

impl SurfaceBuilder {
    /// Create a new builder with default filter and solver settings.
    pub fn new() -> Self {
        Self {
            spot: None,
            rate: None,
            dividend_yield: None,
            option_type: OptionType::Call,
            filter: QuoteFilter::default(),
            solver: SolverConfig::default(),
            quotes: Vec::new(),
        }
    }

    /// Set the spot price of the underlying. Required.
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Set the annualized risk-free rate. Required.
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Set the continuous dividend yield. Default is 0.
    pub fn dividend_yield(mut self, q: f64) -> Self {
        self.dividend_yield = Some(q);
        self
    }

    /// Set the option type for the whole batch.
    ///
    /// Default is [`OptionType::Call`] — the conventional choice for a
    /// listed-equity surface — but a put-side surface works the same way.
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Set the quote admission policy. Default is [`QuoteFilter::default`].
    pub fn filter(mut self, filter: QuoteFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the solver configuration. Default is [`SolverConfig::default`].
    pub fn solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Add one quote to the batch.
    pub fn add_quote(mut self, quote: OptionQuote) -> Self {
        self.quotes.push(quote);
        self
    }

    /// Add a batch of quotes.
    pub fn add_quotes(mut self, quotes: &[OptionQuote]) -> Self {
        self.quotes.extend_from_slice(quotes);
        self
    }

    /// Filter the quotes, invert each survivor, and assemble the surface.
    ///
    /// Quotes that fail the filter or admit no implied volatility are
    /// dropped silently — a stale or arbitrage-violating quote is data to
    /// discard, not a reason to fail the batch. The result can therefore
    /// be empty; callers decide whether that is acceptable.
    ///
    /// # Errors
    /// Returns [`IvSurfError::InvalidInput`] if spot or rate is missing,
    /// spot is non-positive, rate or dividend yield is non-finite, or no
    /// quotes were added at all.
    pub fn build(self) -> crate::error::Result<IvSurface> {
        #[cfg(feature = "logging")]
        tracing::debug!(
            n_quotes = self.quotes.len(),
            option_type = ?self.option_type,
            "surface build started"
        );

        let spot = self.spot.ok_or_else(|| IvSurfError::InvalidInput {
            message: "spot price is required".into(),
        })?;
        let rate = self.rate.ok_or_else(|| IvSurfError::InvalidInput {
            message: "risk-free rate is required".into(),
        })?;
        let q = self.dividend_yield.unwrap_or(0.0);

        validate_positive(spot, "spot")?;
        validate_finite(rate, "rate")?;
        validate_finite(q, "dividend_yield")?;
        if self.quotes.is_empty() {
            return Err(IvSurfError::InvalidInput {
                message: "at least one quote is required".into(),
            });
        }

        let market = MarketParameters {
            spot,
            risk_free_rate: rate,
            dividend_yield: q,
        };

        let retained: Vec<&OptionQuote> = self
            .quotes
            .iter()
            .filter(|quote| self.filter.accepts(quote, spot))
            .collect();

        let invert = |quote: &&OptionQuote| -> Option<SurfacePoint> {
            implied_vol(&market, quote, self.option_type, &self.solver).map(|vol| SurfacePoint {
                expiry: quote.expiry,
                strike: quote.strike,
                moneyness: conventions::moneyness(quote.strike, spot),
                vol,
            })
        };

        #[cfg(feature = "parallel")]
        let mut points: Vec<SurfacePoint> = retained.par_iter().filter_map(invert).collect();
        #[cfg(not(feature = "parallel"))]
        let mut points: Vec<SurfacePoint> = retained.iter().filter_map(invert).collect();

        points.sort_by(|a, b| {
            a.expiry
                .total_cmp(&b.expiry)
                .then(a.moneyness.total_cmp(&b.moneyness))
        });

        #[cfg(feature = "logging")]
        tracing::debug!(
            n_retained = retained.len(),
            n_points = points.len(),
            "surface build complete"
        );

        Ok(IvSurface { points })
    }
}

impl Default for SurfaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
