use crate::errors::{SolveError, SolveResult};
use crate::somelinalg::linear_sys_diagnostics::{
    is_strictly_diagonally_dominant, nonzero_diagonal, pivot_threshold, residual_inf_norm,
};
///  Example#1
/// ```
/// use RustedLinEq::somelinalg::relaxation::SOR;
/// use nalgebra::{DMatrix, DVector};
/// // Gauss-Seidel is SOR with omega = 1
/// let A = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
/// let b = DVector::from_vec(vec![5.0, 4.0]);
/// let mut solver = SOR::new();
/// solver.set_system(A, b, DVector::zeros(2)).unwrap();
/// solver.set_solver_params(None, Some(1.0), Some(1e-12), None);
/// let report = solver.main_loop();
/// assert!(report.converged);
/// println!("x = {:?}, sweeps = {}", report.x, report.steps);
/// ```
use log::{error, info, warn};
use nalgebra::{DMatrix, DVector};
use simplelog::LevelFilter;
use simplelog::*;
use std::collections::HashMap;
use std::time::Instant;
use tabled::{builder::Builder, settings::Style};

/// Default sweep cap: effectively "never give up silently" while still
/// bounding the runtime of a diverging iteration.
pub const MAX_SWEEPS_DEFAULT: usize = 409600;

/// Outcome of a relaxation run: the last iterate, the 1-based number of
/// sweeps executed (the terminating sweep included) and whether the
/// infinity-norm test was actually met. A run that hits the sweep cap keeps
/// its last iterate and reports `converged = false`; the two terminations
/// are never conflated in the step count alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    pub x: DVector<f64>,
    pub steps: usize,
    pub converged: bool,
    /// infinity norm of the change over the final sweep
    pub norm: f64,
}

/// Successive over-relaxation solver for A*x = b with x updated in place,
/// position by position, so later unknowns of a sweep see the already
/// updated earlier unknowns (true Gauss-Seidel semantics, not Jacobi).
/// omega = 1 degenerates to pure Gauss-Seidel.
pub struct SOR {
    pub A: DMatrix<f64>,
    pub b: DVector<f64>,
    pub initial_guess: DVector<f64>,
    pub omega: f64,
    pub tolerance: f64,
    pub max_sweeps: usize,

    x: DVector<f64>,
    steps: usize,
    prev_norm: f64,
    pub result: Option<SweepReport>,

    pub loglevel: Option<String>,
    calc_statistics: HashMap<String, usize>,
}

impl SOR {
    pub fn new() -> SOR {
        SOR {
            A: DMatrix::zeros(0, 0),
            b: DVector::zeros(0),
            initial_guess: DVector::zeros(0),
            omega: 1.0,
            tolerance: 1e-6,
            max_sweeps: MAX_SWEEPS_DEFAULT,
            x: DVector::zeros(0),
            steps: 0,
            prev_norm: f64::INFINITY,
            result: None,
            loglevel: Some("info".to_string()),
            calc_statistics: HashMap::new(),
        }
    }
    ////////////////////////////SETTERS///////////////////////////////////////////////////////////////////
    /// Basic method to set the system to solve. The initial guess doubles as
    /// the output location of the first sweep; the RHS is never written.
    pub fn set_system(
        &mut self,
        A: DMatrix<f64>,
        b: DVector<f64>,
        initial_guess: DVector<f64>,
    ) -> SolveResult<()> {
        let (nrows, ncols) = A.shape();
        if nrows != ncols {
            return Err(SolveError::InvalidDimension(format!(
                "coefficient matrix must be square, got {} x {}",
                nrows, ncols
            )));
        }
        if nrows < 2 {
            return Err(SolveError::InvalidDimension(format!(
                "need at least a 2x2 system, got {} row(s)",
                nrows
            )));
        }
        if b.len() != nrows || initial_guess.len() != nrows {
            return Err(SolveError::InvalidDimension(format!(
                "RHS length {} and guess length {} must match matrix dimension {}",
                b.len(),
                initial_guess.len(),
                nrows
            )));
        }
        let threshold = pivot_threshold(&A);
        if let Some((row, diag)) = nonzero_diagonal(&A, threshold) {
            return Err(SolveError::SingularMatrix {
                row,
                pivot: diag,
                threshold,
            });
        }
        if !is_strictly_diagonally_dominant(&A) {
            warn!("convergence of the relaxation sweep is not guaranteed for this matrix");
        }
        self.A = A;
        self.b = b;
        self.x = initial_guess.clone();
        self.initial_guess = initial_guess;
        Ok(())
    }

    pub fn set_solver_params(
        &mut self,
        loglevel: Option<String>,
        omega: Option<f64>,
        tolerance: Option<f64>,
        max_sweeps: Option<usize>,
    ) {
        self.loglevel = if let Some(level) = loglevel {
            assert!(
                level == "debug" || level == "info" || level == "warn" || level == "error"
                    || level == "off" || level == "none",
                "loglevel must be debug/info, warn, error or off"
            );
            Some(level.to_string())
        } else {
            self.loglevel.clone()
        };
        self.omega = if let Some(omega) = omega {
            assert!(
                omega > 0.0 && omega < 2.0,
                "relaxation factor should be inside (0, 2)."
            );
            omega
        } else {
            self.omega
        };
        self.tolerance = if let Some(tolerance) = tolerance {
            assert!(
                tolerance >= 0.0,
                "Tolerance should be a non-negative number."
            );
            tolerance
        } else {
            self.tolerance
        };
        self.max_sweeps = if let Some(max_sweeps) = max_sweeps {
            assert!(max_sweeps > 0, "Sweep cap should be a positive number.");
            max_sweeps
        } else {
            self.max_sweeps
        };
    }
    /////////////////////////////////////////////////////////////////////////////////////////////
    //                ITERATIONS
    /////////////////////////////////////////////////////////////////////////////////////////////
    /// One relaxation sweep over all unknowns in increasing order; returns
    /// the infinity norm of the change against the pre-sweep iterate.
    pub fn sweep(&mut self) -> f64 {
        let n = self.x.len();
        let old = self.x.clone();
        for j in 0..n {
            let mut sum = self.b[j] / self.A[(j, j)];
            for k in 0..n {
                if k != j {
                    sum -= self.A[(j, k)] * self.x[k] / self.A[(j, j)];
                }
            }
            self.x[j] = (1.0 - self.omega) * old[j] + self.omega * sum;
        }
        let mut norm_inf: f64 = 0.0;
        for j in 0..n {
            norm_inf = norm_inf.max((self.x[j] - old[j]).abs());
        }
        norm_inf
    }

    /// main function to solve the system of equations
    pub fn main_loop(&mut self) -> SweepReport {
        assert!(
            !self.x.is_empty(),
            "system is empty, call set_system first"
        );
        self.x = self.initial_guess.clone();
        self.steps = 0;
        self.prev_norm = f64::INFINITY;
        let mut norm_inf = f64::INFINITY;
        let mut converged = false;
        for i in 0..self.max_sweeps {
            norm_inf = self.sweep();
            self.steps = i + 1;
            if norm_inf > self.prev_norm {
                warn!(
                    "sweep {}: norm is increasing, {:.3e} -> {:.3e}",
                    self.steps, self.prev_norm, norm_inf
                );
            }
            self.prev_norm = norm_inf;
            if norm_inf < self.tolerance {
                converged = true;
                break;
            }
            info!("sweep = {}, norm_inf = {:.3e}", self.steps, norm_inf);
        }
        if !converged {
            error!(
                "Maximum number of sweeps reached. Tolerance {:.3e} not met.",
                self.tolerance
            );
        }
        let report = SweepReport {
            x: self.x.clone(),
            steps: self.steps,
            converged,
            norm: norm_inf,
        };
        self.result = Some(report.clone());
        report
    }
    ////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
    //                                       main functions to start the solver and caclulate statistics
    ////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
    //

    pub fn solver(&mut self) -> SweepReport {
        let begin = Instant::now();
        let report = self.main_loop();
        let end = begin.elapsed();
        self.calc_statistics
            .insert("time elapsed, ms".to_string(), end.as_millis() as usize);
        self.calc_statistics();
        report
    }
    // wrapper around solver function to implement logging
    pub fn solve(&mut self) -> SweepReport {
        let is_logging_disabled = self
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);

        if is_logging_disabled {
            self.solver()
        } else {
            let loglevel = self.loglevel.clone();
            let log_option = if let Some(level) = loglevel {
                match level.as_str() {
                    "debug" => LevelFilter::Info,
                    "info" => LevelFilter::Info,
                    "warn" => LevelFilter::Warn,
                    "error" => LevelFilter::Error,
                    _ => panic!("loglevel must be debug, info, warn or error"),
                }
            } else {
                LevelFilter::Info
            };
            let logger_instance = CombinedLogger::init(vec![TermLogger::new(
                log_option,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )]);

            match logger_instance {
                Ok(()) => {
                    let report = self.solver();
                    info!(" \n \n Program ended");
                    report
                }
                Err(_) => self.solver(),
            }
        }
    }
    pub fn get_result(&self) -> Option<SweepReport> {
        self.result.clone()
    }
    fn calc_statistics(&self) {
        let mut stats = self.calc_statistics.clone();
        stats.insert("dimension".to_string(), self.x.len());
        stats.insert("number of sweeps".to_string(), self.steps);
        if let Some(report) = &self.result {
            stats.insert(
                "converged".to_string(),
                if report.converged { 1 } else { 0 },
            );
        }
        let mut table = Builder::from(stats).build();
        table.with(Style::modern_rounded());
        info!("\n \n CALC STATISTICS \n \n {}", table.to_string());
    }

    /// residual of the stored result against the stored system
    pub fn residual(&self) -> Option<f64> {
        self.result
            .as_ref()
            .map(|report| residual_inf_norm(&self.A, &report.x, &self.b))
    }
}

impl Default for SOR {
    fn default() -> Self {
        Self::new()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                     TESTS
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::somelinalg::gauss_elim::solve_dense;
    use approx::assert_abs_diff_eq;

    fn reference_system_9x9() -> (DMatrix<f64>, DVector<f64>) {
        let A = DMatrix::from_row_slice(
            9,
            9,
            &[
                31.0, -13.0, 0.0, 0.0, 0.0, -10.0, 0.0, 0.0, 0.0, //
                -13.0, 35.0, -9.0, 0.0, -11.0, 0.0, 0.0, 0.0, 0.0, //
                0.0, -9.0, 31.0, -10.0, 0.0, 0.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, -10.0, 79.0, -30.0, 0.0, 0.0, 0.0, -9.0, //
                0.0, 0.0, 0.0, -30.0, 57.0, -7.0, 0.0, -5.0, 0.0, //
                0.0, 0.0, 0.0, 0.0, -7.0, 47.0, -30.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 0.0, 0.0, -30.0, 41.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 0.0, -5.0, 0.0, 0.0, 27.0, -2.0, //
                0.0, 0.0, 0.0, -9.0, 0.0, 0.0, 0.0, -2.0, 29.0,
            ],
        );
        let b = DVector::from_vec(vec![-15.0, 27.0, -23.0, 0.0, -20.0, 12.0, -7.0, 7.0, 10.0]);
        (A, b)
    }

    #[test]
    fn test_gauss_seidel_agrees_with_direct_solver() {
        let (A, b) = reference_system_9x9();
        let direct = solve_dense(&A, &b).unwrap();

        let mut solver = SOR::new();
        solver
            .set_system(A, b, DVector::from_element(9, 1.0))
            .unwrap();
        solver.set_solver_params(Some("off".to_string()), Some(1.0), Some(1e-13), None);
        let report = solver.main_loop();

        assert!(report.converged);
        assert!(report.steps < MAX_SWEEPS_DEFAULT / 100);
        for i in 0..9 {
            assert_abs_diff_eq!(report.x[i], direct[i], epsilon = 1e-12);
        }
        assert!(solver.residual().unwrap() < 1e-11);
    }

    #[test]
    fn test_one_extra_sweep_from_converged_state_stays_put() {
        let (A, b) = reference_system_9x9();
        let mut solver = SOR::new();
        solver.set_system(A, b, DVector::zeros(9)).unwrap();
        solver.set_solver_params(Some("off".to_string()), Some(1.0), Some(1e-13), None);
        let report = solver.main_loop();
        assert!(report.converged);

        let norm = solver.sweep();
        assert!(norm < 1e-13);
    }

    #[test]
    fn test_tighter_tolerance_never_needs_fewer_sweeps() {
        let (A, b) = reference_system_9x9();
        let mut steps_prev = 0;
        for eps in [1e-4, 1e-7, 1e-10, 1e-13] {
            let mut solver = SOR::new();
            solver.set_system(A.clone(), b.clone(), DVector::zeros(9)).unwrap();
            solver.set_solver_params(Some("off".to_string()), Some(1.0), Some(eps), None);
            let report = solver.main_loop();
            assert!(report.converged);
            assert!(report.steps >= steps_prev);
            steps_prev = report.steps;
        }
    }

    #[test]
    fn test_sweep_cap_is_reported_not_conflated() {
        let (A, b) = reference_system_9x9();
        let mut solver = SOR::new();
        solver.set_system(A, b, DVector::zeros(9)).unwrap();
        // cap far below what the tolerance needs
        solver.set_solver_params(Some("off".to_string()), Some(1.0), Some(1e-13), Some(3));
        let report = solver.main_loop();
        assert!(!report.converged);
        assert_eq!(report.steps, 3);
        assert_eq!(report.x.len(), 9);
    }

    #[test]
    fn test_zero_diagonal_is_rejected() {
        let A = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 2.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);
        let mut solver = SOR::new();
        let res = solver.set_system(A, b, DVector::zeros(2));
        assert!(matches!(res, Err(SolveError::SingularMatrix { .. })));
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let A = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![1.0, 1.0, 1.0]);
        let mut solver = SOR::new();
        let res = solver.set_system(A, b, DVector::zeros(2));
        assert!(matches!(res, Err(SolveError::InvalidDimension(_))));
    }

    #[test]
    fn test_minimal_2x2_system() {
        let A = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![5.0, 4.0]);
        let mut solver = SOR::new();
        solver.set_system(A, b, DVector::zeros(2)).unwrap();
        solver.set_solver_params(Some("off".to_string()), Some(1.0), Some(1e-12), None);
        let report = solver.main_loop();
        assert!(report.converged);
        assert_abs_diff_eq!(report.x[0], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(report.x[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_over_relaxation_changes_sweep_count() {
        let (A, b) = reference_system_9x9();
        let mut gs = SOR::new();
        gs.set_system(A.clone(), b.clone(), DVector::zeros(9)).unwrap();
        gs.set_solver_params(Some("off".to_string()), Some(1.0), Some(1e-13), None);
        let gs_report = gs.main_loop();

        let mut sor = SOR::new();
        sor.set_system(A, b, DVector::zeros(9)).unwrap();
        sor.set_solver_params(Some("off".to_string()), Some(1.06), Some(1e-13), None);
        let sor_report = sor.main_loop();

        assert!(gs_report.converged && sor_report.converged);
        assert_ne!(gs_report.steps, sor_report.steps);
    }
}
