use crate::errors::{SolveError, SolveResult};
use crate::somelinalg::linear_sys_diagnostics::pivot_threshold;
use log::info;
use nalgebra::{DMatrix, DVector};

/// Gauss elimination with partial (row) pivoting over a dense augmented
/// matrix (A|b) of shape n x (n+1). The augmented matrix is consumed and
/// overwritten in place; the caller gets the solution vector back.
///
/// # Example
/// ```rust
/// use RustedLinEq::somelinalg::gauss_elim::solve_dense;
/// use nalgebra::{DMatrix, DVector};
///
/// let A = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
/// let b = DVector::from_vec(vec![3.0, 4.0]);
/// let x = solve_dense(&A, &b).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12 && (x[1] - 1.0).abs() < 1e-12);
/// ```
pub struct GaussElim {
    aug: DMatrix<f64>,
    n: usize,
    pivot_threshold: f64,
    result: Option<DVector<f64>>,
}

impl GaussElim {
    /// Wraps an augmented n x (n+1) matrix, last column the RHS.
    pub fn new(aug: DMatrix<f64>) -> SolveResult<GaussElim> {
        let (nrows, ncols) = aug.shape();
        if nrows < 2 {
            return Err(SolveError::InvalidDimension(format!(
                "need at least a 2x2 system, got {} row(s)",
                nrows
            )));
        }
        if ncols != nrows + 1 {
            return Err(SolveError::InvalidDimension(format!(
                "augmented matrix must be n x (n+1), got {} x {}",
                nrows, ncols
            )));
        }
        let coeffs = aug.view_range(0..nrows, 0..nrows).clone_owned();
        let threshold = pivot_threshold(&coeffs);
        Ok(GaussElim {
            aug,
            n: nrows,
            pivot_threshold: threshold,
            result: None,
        })
    }

    /// Builds the augmented matrix from a square coefficient matrix and a
    /// separate RHS vector.
    pub fn from_system(A: &DMatrix<f64>, b: &DVector<f64>) -> SolveResult<GaussElim> {
        let (nrows, ncols) = A.shape();
        if nrows != ncols {
            return Err(SolveError::InvalidDimension(format!(
                "coefficient matrix must be square, got {} x {}",
                nrows, ncols
            )));
        }
        if b.len() != nrows {
            return Err(SolveError::InvalidDimension(format!(
                "RHS length {} does not match matrix dimension {}",
                b.len(),
                nrows
            )));
        }
        let aug = DMatrix::from_fn(nrows, ncols + 1, |i, j| if j < ncols { A[(i, j)] } else { b[i] });
        Self::new(aug)
    }

    /// Forward elimination, column by column. For every pivot column the row
    /// with the largest absolute entry at or below the diagonal is swapped in
    /// (columns left of the pivot are already zero and stay put), then each
    /// row below gets the pivot row folded in so the subdiagonal vanishes.
    fn eliminate(&mut self) -> SolveResult<()> {
        let n = self.n;
        for i in 0..n {
            let mut max = i;
            for j in i + 1..n {
                if self.aug[(j, i)].abs() > self.aug[(max, i)].abs() {
                    max = j;
                }
            }
            if max != i {
                self.aug.columns_range_mut(i..).swap_rows(i, max);
            }
            let pivot = self.aug[(i, i)];
            if pivot.abs() <= self.pivot_threshold {
                return Err(SolveError::SingularMatrix {
                    row: i,
                    pivot,
                    threshold: self.pivot_threshold,
                });
            }
            for j in i + 1..n {
                let factor = -self.aug[(j, i)] / pivot;
                for k in i..=n {
                    self.aug[(j, k)] = self.aug[(j, k)] + factor * self.aug[(i, k)];
                }
            }
        }
        Ok(())
    }

    /// Back-substitution from the last unknown up. Each solved unknown is
    /// folded out of the augmented column of the rows above it, so every row
    /// reduces to X[i] = A[i][n] / A[i][i] by the time it is reached.
    fn back_substitute(&mut self) -> DVector<f64> {
        let n = self.n;
        let mut x = DVector::zeros(n);
        for i in (0..n).rev() {
            x[i] = self.aug[(i, n)] / self.aug[(i, i)];
            for j in 0..i {
                self.aug[(j, n)] = self.aug[(j, n)] - x[i] * self.aug[(j, i)];
            }
        }
        x
    }

    pub fn solve(&mut self) -> SolveResult<DVector<f64>> {
        self.eliminate()?;
        let x = self.back_substitute();
        info!("Gauss elimination solved {} x {} system", self.n, self.n);
        self.result = Some(x.clone());
        Ok(x)
    }

    pub fn get_result(&self) -> Option<DVector<f64>> {
        self.result.clone()
    }
}

/// Shortest way to solve A*x = b directly.
pub fn solve_dense(A: &DMatrix<f64>, b: &DVector<f64>) -> SolveResult<DVector<f64>> {
    GaussElim::from_system(A, b)?.solve()
}
