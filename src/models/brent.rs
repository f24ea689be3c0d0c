//! Brent's method for bracketed scalar root finding
//!
//! Combines bisection, secant and inverse quadratic interpolation. The root
//! must be bracketed: `f(lower)` and `f(upper)` need opposite signs (or one of
//! them must be exactly zero), otherwise no search is attempted.

/// Stopping rules for [`brent`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentOptions {
    /// Absolute tolerance on the root
    pub xtol: f64,
    /// Relative tolerance on the root
    pub rtol: f64,
    /// Maximum number of function evaluations after the two bracket ends
    pub max_iter: usize,
}

impl Default for BrentOptions {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iter: 100,
        }
    }
}

/// Why [`brent`] returned without a root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrentFailure {
    /// f has the same sign at both ends of the interval
    NoSignChange,
    /// f produced NaN or infinity
    NonFinite,
    /// Iteration budget exhausted
    MaxIterations,
}

/// Find a root of `f` in `[lower, upper]`
pub fn brent<F>(mut f: F, lower: f64, upper: f64, opts: &BrentOptions) -> Result<f64, BrentFailure>
where
    F: FnMut(f64) -> f64,
{
    let mut xpre = lower;
    let mut xcur = upper;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);

    if !fpre.is_finite() || !fcur.is_finite() {
        return Err(BrentFailure::NonFinite);
    }
    if fpre == 0.0 {
        return Ok(xpre);
    }
    if fcur == 0.0 {
        return Ok(xcur);
    }
    if fpre.signum() == fcur.signum() {
        return Err(BrentFailure::NoSignChange);
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for _ in 0..opts.max_iter {
        if fpre != 0.0 && fcur != 0.0 && fpre.signum() != fcur.signum() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (opts.xtol + opts.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic interpolation
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }

        fcur = f(xcur);
        if !fcur.is_finite() {
            return Err(BrentFailure::NonFinite);
        }
    }

    Err(BrentFailure::MaxIterations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polynomial_root() {
        let root = brent(|x| x * x - 2.0, 0.0, 2.0, &BrentOptions::default()).unwrap();
        assert!((root - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_transcendental_root() {
        let root = brent(|x| x.cos() - x, 0.0, 1.0, &BrentOptions::default()).unwrap();
        assert!((root - 0.739_085_133_215_160_6).abs() < 1e-10);
    }

    #[test]
    fn test_endpoint_root() {
        assert_eq!(brent(|x| x - 1.0, 1.0, 3.0, &BrentOptions::default()), Ok(1.0));
    }

    #[test]
    fn test_no_sign_change() {
        let result = brent(|x| x * x + 1.0, -1.0, 1.0, &BrentOptions::default());
        assert_eq!(result, Err(BrentFailure::NoSignChange));
    }

    #[test]
    fn test_iteration_budget() {
        let opts = BrentOptions {
            max_iter: 1,
            ..Default::default()
        };
        let result = brent(|x| x.powi(3) - 0.3, 0.0, 10.0, &opts);
        assert_eq!(result, Err(BrentFailure::MaxIterations));
    }
}
