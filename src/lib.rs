//! `assay-curves` library crate.
//!
//! Everything lives in the library so that:
//!
//! - core logic is testable without a UI attached
//! - hosts embed the pipeline directly (desktop app, notebook, service)
//! - code stays easy to navigate as the project grows

pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod model;
pub mod pipeline;
pub mod report;
