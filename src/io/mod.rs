//! Input/output helpers.
//!
//! - the in-memory table contract + CSV adapter (`table`)
//! - table loading + validation (`ingest`)
//! - clipboard text renderings (`export`)

pub mod export;
pub mod ingest;
pub mod table;

pub use export::*;
pub use ingest::*;
pub use table::*;
