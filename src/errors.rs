//! Error types shared by the direct and iterative solvers.

use thiserror::Error;

/// Result type alias for solver entry points
pub type SolveResult<T> = std::result::Result<T, SolveError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Matrix/vector shapes do not describe a solvable system
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// A pivot or diagonal entry fell below the numerical threshold
    #[error("singular or near-singular matrix: |{pivot:.3e}| at row {row} is below threshold {threshold:.3e}")]
    SingularMatrix {
        /// Row of the offending pivot/diagonal entry
        row: usize,
        /// Value of the offending entry
        pivot: f64,
        /// Threshold it was measured against
        threshold: f64,
    },

    /// Iteration cap reached without meeting the tolerance
    #[error("no convergence after {steps} steps (tolerance {epsilon:.3e})")]
    NotConverged {
        /// Steps executed before giving up
        steps: usize,
        /// Tolerance that was not met
        epsilon: f64,
    },
}
