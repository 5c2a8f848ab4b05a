//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input configuration (`CalcConfig`, `ColumnSpec`, `RoleSpec`)
//! - normalized plate rows (`MeasurementRow`, `StandardPoint`)
//! - calculation outputs (`FitParams`, `SampleResult`, `CalcOutput`, etc.)

pub mod types;

pub use types::*;
