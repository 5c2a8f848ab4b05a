//! Built-in datasets.
//!
//! - the worked example plate (`example`)
//! - deterministic synthetic plates for tests and demos (`synth`)

pub mod example;
pub mod synth;

pub use example::*;
pub use synth::*;
