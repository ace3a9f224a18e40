//! Market conventions: moneyness transforms, day count, discounting.
//!
//! Small pure helpers shared by the quote filter and the surface builder.
//! Moneyness here is spot moneyness `K / S` (the convention the surface
//! axes use), not forward moneyness.

/// Day count denominator for converting calendar days to year fractions.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Convert calendar days to expiry to a year fraction (ACT/365).
///
/// # Examples
/// ```
/// use ivsurf::conventions::year_fraction;
/// assert!((year_fraction(365.0) - 1.0).abs() < 1e-12);
/// ```
pub fn year_fraction(days: f64) -> f64 {
    days / DAYS_PER_YEAR
}

/// Convert a strike to spot moneyness: m = K / S.
pub fn moneyness(strike: f64, spot: f64) -> f64 {
    strike / spot
}

/// Convert a strike to log-moneyness: k = ln(K / S).
pub fn log_moneyness(strike: f64, spot: f64) -> f64 {
    (strike / spot).ln()
}

/// Compute forward price with continuous dividend yield:
/// F = S · exp((r − q) · T).
pub fn forward_price(spot: f64, rate: f64, dividend_yield: f64, expiry: f64) -> f64 {
    spot * ((rate - dividend_yield) * expiry).exp()
}

/// Discount factor for a continuously compounded rate: exp(−r · T).
pub fn discount_factor(rate: f64, expiry: f64) -> f64 {
    (-rate * expiry).exp()
}
