//! # ivsurf
//!
//! Implied-volatility surface construction for listed options.
//!
//! Takes observed (strike, expiry, market price) quotes, inverts the
//! Black-Scholes-Merton model for each one, and assembles the recovered
//! volatilities into a scattered point cloud ready for inspection. Data
//! acquisition, grid interpolation, and chart rendering belong to the host
//! application.
//!
//! ## Architecture
//!
//! - **`pricing`** — Closed-form Black-Scholes-Merton pricer with continuous
//!   dividend yield (the leaf everything else inverts)
//! - **`implied`** — Brent-based implied volatility solver
//! - **`surface`** — Quote filtering and batch assembly into an [`IvSurface`]
//! - **`types`** / **`conventions`** — Value types and market conventions
//!
//! ## Design
//!
//! - **"No answer" is not an error.** A quote whose implied volatility does
//!   not exist — expired, non-positive price, arbitrage-violating — yields
//!   `None`, never a fabricated number and never a panic. API misuse
//!   (missing builder fields, bad configuration) yields [`IvSurfError`].
//! - **Pure core.** Pricer and solver are pure functions with no shared
//!   state; every inversion in a batch is independent. The `parallel`
//!   feature maps the batch across threads via rayon.
//! - **Newtypes for outputs, bare `f64` for inputs.** [`Vol`] wraps
//!   recovered volatilities; quote fields stay raw floats for ergonomics.
//! - **Serializable.** All value types implement Serde
//!   `Serialize` / `Deserialize`.

pub mod conventions;
pub mod error;
pub mod implied;
mod optim;
pub mod pricing;
pub mod surface;
pub mod types;
mod validate;

#[doc(inline)]
pub use error::{IvSurfError, Result};
#[doc(inline)]
pub use implied::{SolverConfig, implied_vol};
#[doc(inline)]
pub use pricing::{PricingInputs, price};
#[doc(inline)]
pub use surface::{IvSurface, QuoteFilter, SurfaceBuilder, SurfacePoint};
#[doc(inline)]
pub use types::{MarketParameters, OptionQuote, OptionType, Vol};
