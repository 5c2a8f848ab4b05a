//! Crate-wide error type.
//!
//! Two failure classes exist, and both abort a whole "Calculate" run:
//!
//! - [`CalcErrorKind::MalformedInput`] — the table cannot be understood
//!   (missing required columns, unparsable numeric cells)
//! - [`CalcErrorKind::Fit`] — the standards are degenerate or the
//!   optimizer did not converge
//!
//! Per-sample sentinel outcomes (below LOD, above range, out of range) are
//! classification results, not errors, and never surface here.

/// Which stage of the pipeline rejected the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcErrorKind {
    /// Input table problems, detected before any fitting happens.
    MalformedInput,
    /// Degenerate standards data or optimizer non-convergence.
    Fit,
}

#[derive(Clone)]
pub struct CalcError {
    kind: CalcErrorKind,
    message: String,
}

impl CalcError {
    pub fn new(kind: CalcErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(CalcErrorKind::MalformedInput, message)
    }

    pub fn fit(message: impl Into<String>) -> Self {
        Self::new(CalcErrorKind::Fit, message)
    }

    pub fn kind(&self) -> CalcErrorKind {
        self.kind
    }
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            CalcErrorKind::MalformedInput => write!(f, "invalid input: {}", self.message),
            CalcErrorKind::Fit => write!(f, "fit failed: {}", self.message),
        }
    }
}

impl std::fmt::Debug for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalcError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for CalcError {}
