//! Classification and presentation.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

pub mod classify;
pub mod format;

pub use classify::*;
pub use format::*;
