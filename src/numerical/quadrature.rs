/// Samples `f` at the n+1 points a + i*h, i = 0..=n.
fn generate_sample(f: impl Fn(f64) -> f64, a: f64, h: f64, n: usize) -> Vec<f64> {
    (0..=n).map(|i| f(a + h * i as f64)).collect()
}

/// Composite trapezoidal rule over [a, b] with n partition intervals.
pub fn trapezoidal(f: impl Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    assert!(n > 0, "need at least one partition interval");
    let h = (b - a) / n as f64;
    let v = generate_sample(f, a, h, n);

    let mut sum = 0.0;
    for i in 1..n {
        sum += v[i];
    }
    sum += v[0] / 2.0;
    sum += v[n] / 2.0;

    sum * h
}

/// Composite Simpson rule over [a, b]; n must be even.
pub fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    assert!(n > 0 && n % 2 == 0, "Simpson rule needs an even number of intervals");
    let h = (b - a) / n as f64;
    let v = generate_sample(f, a, h, n);

    let mut sum_odd = 0.0;
    let mut sum_even = 0.0;
    for i in (1..n).step_by(2) {
        sum_odd += v[i];
    }
    for i in (2..n).step_by(2) {
        sum_even += v[i];
    }

    (v[0] + v[n] + 4.0 * sum_odd + 2.0 * sum_even) * h / 3.0
}

/// Samples `f` on the tensor grid (a + i*h, c + k*j), stored row-major as
/// v[i][j], i = 0..=n, j = 0..=m.
fn generate_sample_2d(
    f: impl Fn(f64, f64) -> f64,
    a: f64,
    h: f64,
    n: usize,
    c: f64,
    k: f64,
    m: usize,
) -> Vec<Vec<f64>> {
    (0..=n)
        .map(|i| {
            (0..=m)
                .map(|j| f(a + h * i as f64, c + k * j as f64))
                .collect()
        })
        .collect()
}

/// Composite trapezoidal rule over the rectangle [a, b] x [c, d] with n x m
/// partition intervals. Interior points carry weight 1, edges 1/2, the four
/// corners 1/4.
pub fn trapezoidal_2d(
    f: impl Fn(f64, f64) -> f64,
    a: f64,
    b: f64,
    n: usize,
    c: f64,
    d: f64,
    m: usize,
) -> f64 {
    assert!(n > 0 && m > 0, "need at least one partition interval per axis");
    let h = (b - a) / n as f64;
    let k = (d - c) / m as f64;
    let v = generate_sample_2d(f, a, h, n, c, k, m);

    let mut sum = 0.0;
    for i in 1..n {
        for j in 1..m {
            sum += v[i][j];
        }
    }
    let mut bsum = 0.0;
    for i in 1..n {
        bsum += v[i][0] + v[i][m];
    }
    for j in 1..m {
        bsum += v[0][j] + v[n][j];
    }
    sum += 0.5 * bsum;
    sum += (v[0][0] + v[n][0] + v[0][m] + v[n][m]) * 0.25;

    sum * h * k
}

/// Composite Simpson rule over the rectangle [a, b] x [c, d]; n and m must
/// be even. Tensor-product weights: 16 on odd-odd interior points down to 1
/// on the corners.
pub fn simpson_2d(
    f: impl Fn(f64, f64) -> f64,
    a: f64,
    b: f64,
    n: usize,
    c: f64,
    d: f64,
    m: usize,
) -> f64 {
    assert!(
        n > 0 && n % 2 == 0 && m > 0 && m % 2 == 0,
        "Simpson rule needs an even number of intervals per axis"
    );
    let h = (b - a) / n as f64;
    let k = (d - c) / m as f64;
    let v = generate_sample_2d(f, a, h, n, c, k, m);

    let mut sum_odd_odd = 0.0;
    let mut sum_odd_even = 0.0;
    let mut sum_even_odd = 0.0;
    let mut sum_even_even = 0.0;
    for i in (1..n).step_by(2) {
        for j in (1..m).step_by(2) {
            sum_odd_odd += v[i][j];
        }
        for j in (2..m).step_by(2) {
            sum_odd_even += v[i][j];
        }
    }
    for i in (2..n).step_by(2) {
        for j in (1..m).step_by(2) {
            sum_even_odd += v[i][j];
        }
        for j in (2..m).step_by(2) {
            sum_even_even += v[i][j];
        }
    }

    let mut bsum_odd = 0.0;
    let mut bsum_even = 0.0;
    for i in (1..n).step_by(2) {
        bsum_odd += v[i][0] + v[i][m];
    }
    for i in (2..n).step_by(2) {
        bsum_even += v[i][0] + v[i][m];
    }
    for j in (1..m).step_by(2) {
        bsum_odd += v[0][j] + v[n][j];
    }
    for j in (2..m).step_by(2) {
        bsum_even += v[0][j] + v[n][j];
    }

    (v[0][0] + v[0][m] + v[n][0] + v[n][m]
        + 16.0 * sum_odd_odd
        + 8.0 * sum_odd_even
        + 8.0 * sum_even_odd
        + 4.0 * sum_even_even
        + 4.0 * bsum_odd
        + 2.0 * bsum_even)
        * h
        * k
        / 9.0
}
