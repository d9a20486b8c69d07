/// Gauss elimination with partial pivoting for dense augmented systems
pub mod gauss_elim;

/// Gauss-Seidel and SOR stationary relaxation solvers
pub mod relaxation;

/// empirical scan for the relaxation factor minimizing the sweep count
pub mod omega_search;

pub mod linear_sys_diagnostics;
