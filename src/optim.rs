//! Internal root-finding utilities for implied-volatility extraction.

/// Configuration for the Brent bracketed root-finder.
pub(crate) struct BrentConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence threshold on bracket width and on |f|.
    pub tol: f64,
}

/// Find a root of `f` in `[lo, hi]` using Brent's method.
///
/// Combines inverse quadratic interpolation and the secant step with a
/// bisection safeguard, so convergence is guaranteed whenever `f(lo)` and
/// `f(hi)` have opposite signs. No derivatives required.
///
/// Returns `None` when the bracket contains no sign change, when `f`
/// produces a non-finite value, or when the iteration budget runs out
/// before the bracket width or |f| drops below `config.tol`. All failure
/// modes collapse to `None`; the caller decides what "no root" means.
pub(crate) fn brent_root<F>(f: F, lo: f64, hi: f64, config: &BrentConfig) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let mut a = lo;
    let mut b = hi;
    let mut fa = f(a);
    let mut fb = f(b);

    if !fa.is_finite() || !fb.is_finite() {
        return None;
    }
    if fa == 0.0 {
        return Some(a);
    }
    if fb == 0.0 {
        return Some(b);
    }
    if (fa > 0.0) == (fb > 0.0) {
        return None;
    }

    let mut c = b;
    let mut fc = fb;
    // d is the last step taken, e the one before it
    let mut d = b - a;
    let mut e = d;

    for _ in 0..config.max_iter {
        if (fb > 0.0) == (fc > 0.0) {
            // Root bracketed between b and a; reset c to the old side
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            // Keep b as the best estimate: |f(b)| <= |f(c)|
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tol;
        let xm = 0.5 * (c - b);

        if xm.abs() <= tol1 || fb == 0.0 || fb.abs() <= config.tol {
            return Some(b);
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // Attempt inverse quadratic interpolation (secant if a == c)
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                // Interpolation accepted
                e = d;
                d = p / q;
            } else {
                // Interpolation would leave the bracket or converge too
                // slowly; fall back to bisection
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol1 {
            b += d;
        } else {
            b += tol1.copysign(xm);
        }
        fb = f(b);
        if !fb.is_finite() {
            return None;
        }
    }

    None
}
