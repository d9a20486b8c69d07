use crate::errors::{SolveError, SolveResult};
use log::{info, warn};

/// Root of a scalar equation together with the 1-based number of iterations
/// it took to pin it down.
#[derive(Debug, Clone, PartialEq)]
pub struct RootReport {
    pub root: f64,
    pub steps: usize,
}

/// Newton iteration x_{k+1} = x_k - f(x_k)/f'(x_k), terminating when two
/// consecutive iterates differ by less than `epsilon`.
///
/// # Example
/// ```
/// use RustedLinEq::numerical::nonlinear::newton_root;
/// // x^3/3 - x has roots 0 and +/- sqrt(3)
/// let f = |x: f64| x * x * x / 3.0 - x;
/// let fprime = |x: f64| x * x - 1.0;
/// let report = newton_root(f, fprime, 9.0, 1e-13, 1024).unwrap();
/// assert!((report.root - 3.0_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn newton_root(
    f: impl Fn(f64) -> f64,
    fprime: impl Fn(f64) -> f64,
    initv: f64,
    epsilon: f64,
    max_steps: usize,
) -> SolveResult<RootReport> {
    let mut prev = initv;
    for i in 0..max_steps {
        let res = prev - f(prev) / fprime(prev);
        if !res.is_finite() {
            warn!("Newton iterate became non-finite at step {}", i + 1);
            return Err(SolveError::NotConverged {
                steps: i + 1,
                epsilon,
            });
        }
        if (res - prev).abs() < epsilon {
            info!("Newton converged in {} step(s)", i + 1);
            return Ok(RootReport {
                root: res,
                steps: i + 1,
            });
        }
        prev = res;
    }
    Err(SolveError::NotConverged {
        steps: max_steps,
        epsilon,
    })
}

/// Secant iteration: Newton with the derivative replaced by the finite
/// difference through the last two iterates.
pub fn secant_root(
    f: impl Fn(f64) -> f64,
    initv1: f64,
    initv2: f64,
    epsilon: f64,
    max_steps: usize,
) -> SolveResult<RootReport> {
    let mut prev = initv1;
    let mut res = initv2;
    for i in 0..max_steps {
        let oldres = res;
        res = res - f(res) * (res - prev) / (f(res) - f(prev));
        if !res.is_finite() {
            warn!("secant iterate became non-finite at step {}", i + 1);
            return Err(SolveError::NotConverged {
                steps: i + 1,
                epsilon,
            });
        }
        if (oldres - res).abs() < epsilon {
            info!("secant converged in {} step(s)", i + 1);
            return Ok(RootReport {
                root: res,
                steps: i + 1,
            });
        }
        prev = oldres;
    }
    Err(SolveError::NotConverged {
        steps: max_steps,
        epsilon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn f(x: f64) -> f64 {
        x * x * x / 3.0 - x
    }
    fn fprime(x: f64) -> f64 {
        x * x - 1.0
    }

    #[test]
    fn test_newton_finds_all_three_roots() {
        let sqrt3 = 3.0_f64.sqrt();
        let report = newton_root(f, fprime, 0.1, 1e-13, 1024).unwrap();
        assert_abs_diff_eq!(report.root, 0.0, epsilon = 1e-12);
        let report = newton_root(f, fprime, 9.0, 1e-13, 1024).unwrap();
        assert_abs_diff_eq!(report.root, sqrt3, epsilon = 1e-12);
        let report = newton_root(f, fprime, -9.0, 1e-13, 1024).unwrap();
        assert_abs_diff_eq!(report.root, -sqrt3, epsilon = 1e-12);
    }

    #[test]
    fn test_secant_matches_newton() {
        let sqrt3 = 3.0_f64.sqrt();
        let report = secant_root(f, 8.0, 9.0, 1e-13, 1024).unwrap();
        assert_abs_diff_eq!(report.root, sqrt3, epsilon = 1e-12);
        let report = secant_root(f, 0.0, 0.1, 1e-13, 1024).unwrap();
        assert_abs_diff_eq!(report.root, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_newton_quadratic_convergence_is_fast() {
        let report = newton_root(f, fprime, 0.9, 1e-13, 1024).unwrap();
        assert!(report.steps < 30);
    }

    #[test]
    fn test_cap_is_reported() {
        // f has no root reachable from this plateau within one step
        let res = newton_root(|_| 1.0, |_| 1e-30, 0.0, 1e-13, 8);
        assert!(matches!(res, Err(SolveError::NotConverged { .. })));
    }
}
