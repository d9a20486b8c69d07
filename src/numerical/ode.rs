use log::info;

/// Classical fourth-order Runge-Kutta for the scalar IVP y' = f(x, y),
/// y(a) = initv, integrated to b with fixed step h. Returns y(b).
pub fn rk4(f: impl Fn(f64, f64) -> f64, a: f64, b: f64, h: f64, initv: f64) -> f64 {
    assert!(h > 0.0 && b > a, "integration interval and step must be positive");
    // nearest whole step count, so that 1.5 / 0.0125 does not truncate to 119
    let n = ((b - a) / h).round() as usize;
    let mut y = initv;
    for i in 0..n {
        let x = a + i as f64 * h;
        let k1 = f(x, y);
        let k2 = f(x + h / 2.0, y + h * k1 / 2.0);
        let k3 = f(x + h / 2.0, y + h * k2 / 2.0);
        let k4 = f(x + h, y + h * k3);
        y += (k1 + 2.0 * k2 + 2.0 * k3 + k4) * h / 6.0;
    }
    info!("RK4 took {} step(s)", n);
    y
}

/// Three-step Adams predictor-corrector: Adams-Bashforth predictor followed
/// by one Adams-Moulton correction, bootstrapped with Runge-Kutta starting
/// values. Falls back to plain RK4 when the interval is shorter than three
/// steps.
pub fn adams(f: impl Fn(f64, f64) -> f64, a: f64, b: f64, h: f64, initv: f64) -> f64 {
    assert!(h > 0.0 && b > a, "integration interval and step must be positive");
    let n = ((b - a) / h).round() as usize;
    if n < 3 {
        return rk4(f, a, b, h, initv);
    }

    let mut ynm2 = initv;
    let mut ynm1 = rk4(&f, a, a + h, h, initv);
    let mut yn = rk4(&f, a, a + 2.0 * h, h, initv);
    for i in 0..n - 2 {
        let xnp1 = a + (i + 3) as f64 * h;
        let xn = a + (i + 2) as f64 * h;
        let xnm1 = a + (i + 1) as f64 * h;
        let xnm2 = a + i as f64 * h;
        // predictor
        let mut ynp1 =
            yn + (23.0 * f(xn, yn) - 16.0 * f(xnm1, ynm1) + 5.0 * f(xnm2, ynm2)) * h / 12.0;
        // corrector
        ynp1 = yn + (5.0 * f(xnp1, ynp1) + 8.0 * f(xn, yn) - f(xnm1, ynm1)) * h / 12.0;
        ynm2 = ynm1;
        ynm1 = yn;
        yn = ynp1;
    }
    yn
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // y' = -x^2 y^2 with y(0) = 3 has the exact solution 3/(1 + x^3)
    fn f(x: f64, y: f64) -> f64 {
        -x * x * y * y
    }
    fn exact(x: f64) -> f64 {
        3.0 / (1.0 + x * x * x)
    }

    #[test]
    fn test_rk4_against_exact_solution() {
        let res = rk4(f, 0.0, 1.5, 0.0125, 3.0);
        assert_abs_diff_eq!(res, exact(1.5), epsilon = 1e-7);
    }

    #[test]
    fn test_rk4_error_shrinks_with_fourth_order() {
        let err_h = (rk4(f, 0.0, 1.5, 0.1, 3.0) - exact(1.5)).abs();
        let err_h2 = (rk4(f, 0.0, 1.5, 0.05, 3.0) - exact(1.5)).abs();
        let ratio = err_h / err_h2;
        // halving the step should cut the error by about 2^4
        assert!(ratio > 8.0 && ratio < 32.0);
    }

    #[test]
    fn test_adams_against_exact_solution() {
        let res = adams(f, 0.0, 1.5, 0.0125, 3.0);
        assert_abs_diff_eq!(res, exact(1.5), epsilon = 1e-5);
    }

    #[test]
    fn test_adams_short_interval_falls_back_to_rk4() {
        let res = adams(f, 0.0, 0.2, 0.1, 3.0);
        assert_abs_diff_eq!(res, rk4(f, 0.0, 0.2, 0.1, 3.0), epsilon = 1e-15);
    }

    #[test]
    fn test_linear_decay_matches_exponential() {
        let res = rk4(|_, y| -y, 0.0, 1.0, 0.01, 1.0);
        assert_abs_diff_eq!(res, (-1.0_f64).exp(), epsilon = 1e-9);
    }
}
