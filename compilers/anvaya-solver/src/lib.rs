pub mod context;
pub mod diagnostics;
pub mod requirements;
pub mod rules;
pub mod solver;

pub use diagnostics::{Diagnostic, Reporter};
pub use solver::{CheckOptions, Checker, SolverError};
