//! The one recoverable error this crate surfaces. Everything else (a
//! precondition or invariant violation) is a programming error and panics,
//! per the taxonomy in [`crate::driver`].

use std::fmt;

/// Returned by [`crate::driver::CgcDriver::optimize`] when the pluggable
/// mincut backend could not produce a solver, or produced a malformed one.
#[derive(Debug, Clone, PartialEq)]
pub enum CgcError {
    ExternalSolverFailure(String),
}

impl fmt::Display for CgcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CgcError::ExternalSolverFailure(msg) => {
                write!(f, "external mincut solver failure: {msg}")
            }
        }
    }
}

impl std::error::Error for CgcError {}
