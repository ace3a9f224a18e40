//! Property-based tests using proptest.
//!
//! These tests verify invariant properties across random inputs rather than
//! testing fixed examples. They help catch edge cases and ensure robustness.

use proptest::prelude::*;

use ivsurf::implied::{SolverConfig, implied_vol};
use ivsurf::pricing::price;
use ivsurf::types::{MarketParameters, OptionQuote, OptionType};

// --- Property Test 1: Put-call parity ---

proptest! {
    /// For any parameter set, Call − Put = S·e^(−qT) − K·e^(−rT).
    ///
    /// This is the fundamental no-arbitrage identity linking the two
    /// pricing branches; it must hold to floating-point accuracy.
    #[test]
    fn put_call_parity_holds(
        spot in 50.0_f64..200.0,
        strike in 50.0_f64..200.0,
        expiry in 0.05_f64..3.0,
        rate in -0.01_f64..0.10,
        vol in 0.05_f64..1.0,
        q in 0.0_f64..0.05,
    ) {
        let call = price(spot, strike, expiry, rate, vol, q, OptionType::Call);
        let put = price(spot, strike, expiry, rate, vol, q, OptionType::Put);
        let parity = spot * (-q * expiry).exp() - strike * (-rate * expiry).exp();

        prop_assert!(
            (call - put - parity).abs() < 1e-9,
            "parity violated: C-P={} vs {}",
            call - put,
            parity
        );
    }
}

// --- Property Test 2: Call price is strictly increasing in vol ---

proptest! {
    /// More volatility makes a call worth more. This monotonicity is what
    /// guarantees the solver's bracket search finds the unique root when a
    /// sign change exists.
    #[test]
    fn call_price_strictly_increasing_in_vol(
        strike in 80.0_f64..120.0,
        expiry in 0.25_f64..2.0,
        vol_lo in 0.1_f64..0.8,
        bump in 0.02_f64..0.5,
    ) {
        let low = price(100.0, strike, expiry, 0.04, vol_lo, 0.01, OptionType::Call);
        let high = price(100.0, strike, expiry, 0.04, vol_lo + bump, 0.01, OptionType::Call);

        prop_assert!(
            high > low,
            "price not increasing: {} at vol {} vs {} at vol {}",
            low,
            vol_lo,
            high,
            vol_lo + bump
        );
    }
}

// --- Property Test 3: Round-trip inversion ---

proptest! {
    /// Pricing at a known vol and inverting the price must recover the vol.
    #[test]
    fn implied_vol_round_trips(
        strike in 80.0_f64..120.0,
        expiry in 0.1_f64..2.0,
        true_vol in 0.05_f64..1.5,
        rate in 0.0_f64..0.08,
        q in 0.0_f64..0.04,
    ) {
        let market = MarketParameters {
            spot: 100.0,
            risk_free_rate: rate,
            dividend_yield: q,
        };
        let market_price = price(100.0, strike, expiry, rate, true_vol, q, OptionType::Call);
        // Skip vanishing prices: a sub-cent quote has so little vega that no
        // solver can pin the vol to 1e-4 from a 1e-6 price tolerance.
        prop_assume!(market_price > 0.01);

        let quote = OptionQuote { strike, expiry, market_price };
        let recovered = implied_vol(&market, &quote, OptionType::Call, &SolverConfig::default());

        prop_assert!(recovered.is_some(), "no vol recovered for a model price");
        let recovered = recovered.unwrap().0;
        prop_assert!(
            (recovered - true_vol).abs() < 1e-4,
            "recovered {} vs true {}",
            recovered,
            true_vol
        );
    }
}

// --- Property Test 4: Degenerate inputs are always undefined ---

proptest! {
    /// Non-positive expiry or price never yields a volatility, whatever the
    /// rest of the inputs look like.
    #[test]
    fn degenerate_inputs_always_undefined(
        strike in 50.0_f64..200.0,
        bad_expiry in -2.0_f64..=0.0,
        bad_price in -10.0_f64..=0.0,
        good_price in 0.1_f64..20.0,
        good_expiry in 0.1_f64..2.0,
    ) {
        let market = MarketParameters {
            spot: 100.0,
            risk_free_rate: 0.04,
            dividend_yield: 0.01,
        };
        let config = SolverConfig::default();

        let expired = OptionQuote { strike, expiry: bad_expiry, market_price: good_price };
        prop_assert!(implied_vol(&market, &expired, OptionType::Call, &config).is_none());

        let free = OptionQuote { strike, expiry: good_expiry, market_price: bad_price };
        prop_assert!(implied_vol(&market, &free, OptionType::Call, &config).is_none());
    }
}

// --- Property Test 5: Recovered vols are always positive and in bracket ---

proptest! {
    /// Whatever the solver returns for an arbitrary (possibly nonsense)
    /// price, it lies inside the configured bracket: never negative, never
    /// a fabricated out-of-range number.
    #[test]
    fn recovered_vol_stays_in_bracket(
        strike in 80.0_f64..120.0,
        expiry in 0.1_f64..2.0,
        market_price in 0.01_f64..150.0,
    ) {
        let market = MarketParameters {
            spot: 100.0,
            risk_free_rate: 0.04,
            dividend_yield: 0.01,
        };
        let config = SolverConfig::default();
        let quote = OptionQuote { strike, expiry, market_price };

        if let Some(vol) = implied_vol(&market, &quote, OptionType::Call, &config) {
            prop_assert!(vol.0 >= config.vol_lo);
            prop_assert!(vol.0 <= config.vol_hi);
            prop_assert!(vol.0.is_finite());
        }
    }
}
