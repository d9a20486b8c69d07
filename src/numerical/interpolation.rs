use log::info;
use nalgebra::DVector;

/// Evaluates the Lagrange interpolating polynomial through the points
/// (nodes[i], values[i]) at `x`. Nodes must be pairwise distinct.
pub fn lagrange_interpolate(x: f64, nodes: &DVector<f64>, values: &DVector<f64>) -> f64 {
    assert_eq!(
        nodes.len(),
        values.len(),
        "node and value grids should have the same length."
    );
    let mut res = 0.0;
    for i in 0..nodes.len() {
        let mut base = 1.0;
        for j in 0..nodes.len() {
            if j != i {
                base *= (x - nodes[j]) / (nodes[i] - nodes[j]);
            }
        }
        res += base * values[i];
    }
    res
}

/// Builds an interpolation grid of n+1 points: `fgen(i, n)` places the i-th
/// node, `fcn` samples the interpolated function there.
pub fn generate_grid(
    n: usize,
    fgen: impl Fn(usize, usize) -> f64,
    fcn: impl Fn(f64) -> f64,
) -> (DVector<f64>, DVector<f64>) {
    let nodes = DVector::from_fn(n + 1, |i, _| fgen(i, n));
    let values = nodes.map(&fcn);
    (nodes, values)
}

/// Largest interpolation error |fcn(y) - p(y)| over the probe points.
pub fn max_interpolation_error(
    n: usize,
    fgen: impl Fn(usize, usize) -> f64,
    fcn: impl Fn(f64) -> f64,
    probes: &[f64],
) -> f64 {
    let (nodes, values) = generate_grid(n, fgen, &fcn);
    let mut max_err = 0.0_f64;
    for &y in probes {
        let err = (fcn(y) - lagrange_interpolate(y, &nodes, &values)).abs();
        max_err = max_err.max(err);
    }
    info!("max interpolation error over {} node(s): {:.3e}", n, max_err);
    max_err
}

/// Equidistant node placement on [a, b].
pub fn uniform_nodes(a: f64, b: f64) -> impl Fn(usize, usize) -> f64 {
    move |i, n| a + (b - a) * i as f64 / n as f64
}

/// Chebyshev node placement on [a, b], clustering towards the endpoints to
/// suppress the Runge oscillation of high-degree interpolants.
pub fn chebyshev_nodes(a: f64, b: f64) -> impl Fn(usize, usize) -> f64 {
    move |i, n| {
        let center = (a + b) / 2.0;
        let half = (b - a) / 2.0;
        center - half * (std::f64::consts::PI * (2 * i + 1) as f64 / (2 * n + 2) as f64).cos()
    }
}
