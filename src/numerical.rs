/// Newton and secant root finders for scalar equations
pub mod nonlinear;

/// Lagrange interpolation over a node grid
pub mod interpolation;

/// composite trapezoidal and Simpson quadrature, 1D and 2D
pub mod quadrature;

/// fixed-step integrators for scalar initial value problems
pub mod ode;
