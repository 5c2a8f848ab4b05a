//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - validate the standards for degeneracy before any optimization
//! - seed the 4PL parameters from the data
//! - drive the Levenberg-Marquardt solver and vet its result

pub mod fitter;
pub mod problem;

pub use fitter::*;
pub use problem::*;
