use crate::Utils::logger::save_omega_history_to_csv;
use crate::errors::{SolveError, SolveResult};
use crate::somelinalg::relaxation::{MAX_SWEEPS_DEFAULT, SOR};
use log::info;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use std::io;
use tabled::{builder::Builder, settings::Style};

/// The classic scan grid: omega = i/50 for i = 1..=99, i.e. 0.02..=1.98 in
/// steps of 0.02.
pub fn default_omega_candidates() -> Vec<f64> {
    (1..=99).map(|i| i as f64 / 50.0).collect()
}

/// One scan trial: the relaxation factor tried and what it cost.
#[derive(Debug, Clone, PartialEq)]
pub struct OmegaTrial {
    pub omega: f64,
    pub steps: usize,
    pub converged: bool,
}

/// Scans a set of relaxation factors over the same system and picks the one
/// minimizing the sweep count. Trials are independent (each one starts from
/// a freshly zeroed guess), so they run on the rayon pool; the winner is
/// still chosen by the sequential rule: first candidate, in increasing-omega
/// order, whose count is strictly below the running minimum.
///
/// # Example
/// ```
/// use RustedLinEq::somelinalg::omega_search::OmegaSearch;
/// use nalgebra::{DMatrix, DVector};
///
/// let A = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
/// let b = DVector::from_vec(vec![5.0, 4.0]);
/// let mut search = OmegaSearch::new(A, b);
/// let (best_omega, best_steps) = search.scan().unwrap();
/// assert!(best_omega > 0.0 && best_omega < 2.0);
/// assert!(best_steps >= 1);
/// ```
pub struct OmegaSearch {
    pub A: DMatrix<f64>,
    pub b: DVector<f64>,
    pub tolerance: f64,
    pub max_sweeps: usize,
    pub candidates: Vec<f64>,
    pub history: Vec<OmegaTrial>,
    pub best: Option<(f64, usize)>,
}

impl OmegaSearch {
    pub fn new(A: DMatrix<f64>, b: DVector<f64>) -> OmegaSearch {
        OmegaSearch {
            A,
            b,
            tolerance: 1e-13,
            max_sweeps: MAX_SWEEPS_DEFAULT,
            candidates: default_omega_candidates(),
            history: Vec::new(),
            best: None,
        }
    }

    pub fn set_scan_params(
        &mut self,
        tolerance: Option<f64>,
        max_sweeps: Option<usize>,
        candidates: Option<Vec<f64>>,
    ) {
        if let Some(tolerance) = tolerance {
            assert!(
                tolerance >= 0.0,
                "Tolerance should be a non-negative number."
            );
            self.tolerance = tolerance;
        }
        if let Some(max_sweeps) = max_sweeps {
            assert!(max_sweeps > 0, "Sweep cap should be a positive number.");
            self.max_sweeps = max_sweeps;
        }
        if let Some(candidates) = candidates {
            assert!(!candidates.is_empty(), "Candidate list should not be empty.");
            self.candidates = candidates;
        }
    }

    fn run_trial(&self, omega: f64) -> SolveResult<OmegaTrial> {
        let n = self.b.len();
        let mut solver = SOR::new();
        solver.set_system(self.A.clone(), self.b.clone(), DVector::zeros(n))?;
        solver.set_solver_params(
            Some("off".to_string()),
            Some(omega),
            Some(self.tolerance),
            Some(self.max_sweeps),
        );
        let report = solver.main_loop();
        Ok(OmegaTrial {
            omega,
            steps: report.steps,
            converged: report.converged,
        })
    }

    /// Runs the scan and returns (best_omega, best_steps).
    pub fn scan(&mut self) -> SolveResult<(f64, usize)> {
        let trial_results: Vec<SolveResult<OmegaTrial>> = self
            .candidates
            .par_iter()
            .map(|&omega| self.run_trial(omega))
            .collect();
        let trials: Vec<OmegaTrial> = trial_results
            .into_iter()
            .collect::<SolveResult<Vec<OmegaTrial>>>()?;

        let mut best: Option<(f64, usize)> = None;
        for trial in &trials {
            if !trial.converged {
                continue;
            }
            match best {
                Some((_, best_steps)) if trial.steps >= best_steps => {}
                _ => best = Some((trial.omega, trial.steps)),
            }
        }
        self.history = trials;
        self.best = best;
        match best {
            Some((omega, steps)) => {
                info!(
                    "best omega = {:.2}, steps = {} over {} candidates",
                    omega,
                    steps,
                    self.history.len()
                );
                Ok((omega, steps))
            }
            None => Err(SolveError::NotConverged {
                steps: self.max_sweeps,
                epsilon: self.tolerance,
            }),
        }
    }

    /// Logs the scan history as a table, one row per candidate.
    pub fn report(&self) {
        let mut builder = Builder::default();
        builder.push_record(["omega", "steps", "converged"]);
        for trial in &self.history {
            builder.push_record([
                format!("{:.2}", trial.omega),
                trial.steps.to_string(),
                trial.converged.to_string(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        info!("\n \n OMEGA SCAN \n \n {}", table.to_string());
    }

    pub fn save_history_to_csv(&self, filename: &str) -> io::Result<()> {
        save_omega_history_to_csv(&self.history, filename)
    }

    pub fn get_result(&self) -> Option<(f64, usize)> {
        self.best
    }
}
