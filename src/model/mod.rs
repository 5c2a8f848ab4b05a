//! The 4PL curve model.
//!
//! Forward evaluation, inversion, and the analytic partials the fitter
//! builds its Jacobian from.

pub mod four_pl;

pub use four_pl::*;
