//! Mathematical utilities: replicate statistics and the plotting grid.

pub mod grid;
pub mod stats;

pub use grid::*;
pub use stats::*;
