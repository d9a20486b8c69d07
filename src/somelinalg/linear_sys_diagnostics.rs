use log::warn;
use nalgebra::{DMatrix, DVector};

/// Relative magnitude below which a pivot or diagonal entry is treated as zero.
/// The threshold scales with the largest entry of the matrix so that row
/// scaling does not change the verdict; an all-zero matrix gets threshold 0
/// and every entry fails the `<=` comparison against it.
pub fn pivot_threshold(A: &DMatrix<f64>) -> f64 {
    1e3 * f64::EPSILON * A.amax()
}

/// Checks that every diagonal entry of `A` is safely away from zero.
/// Both relaxation sweeps and back-substitution divide by `A[j][j]`,
/// so a tiny diagonal turns the whole solve into inf/NaN noise.
pub fn nonzero_diagonal(A: &DMatrix<f64>, threshold: f64) -> Option<(usize, f64)> {
    for j in 0..A.nrows() {
        let diag = A[(j, j)];
        if diag.abs() <= threshold {
            warn!(
                "diagonal entry A[{}][{}] = {:.3e} is below threshold {:.3e}",
                j, j, diag, threshold
            );
            return Some((j, diag));
        }
    }
    None
}

/// Strict row diagonal dominance: |A[j][j]| > sum of |A[j][k]|, k != j, for
/// every row. A sufficient (not necessary) condition for Gauss-Seidel to
/// converge from any initial guess.
pub fn is_strictly_diagonally_dominant(A: &DMatrix<f64>) -> bool {
    let n = A.nrows();
    for j in 0..n {
        let mut off_diag = 0.0;
        for k in 0..n {
            if k != j {
                off_diag += A[(j, k)].abs();
            }
        }
        if A[(j, j)].abs() <= off_diag {
            warn!(
                "matrix is not strictly diagonally dominant in row {}: |{}| <= {}",
                j,
                A[(j, j)],
                off_diag
            );
            return false;
        }
    }
    true
}

/// Infinity norm of the residual A*x - b, the post-solve sanity metric.
pub fn residual_inf_norm(A: &DMatrix<f64>, x: &DVector<f64>, b: &DVector<f64>) -> f64 {
    let r = A * x - b;
    r.amax()
}
