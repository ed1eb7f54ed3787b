//! DashEngine solver: pattern validation, arc-length dash segmentation,
//! and the two-phase batch orchestrator.

pub mod dasher;
pub mod orchestrator;
pub mod pattern;

pub use dasher::{segment, solve, SolveResult};
pub use orchestrator::{CancelToken, DataAccess, Orchestrator, Outcome};
pub use pattern::{validate, Pattern, Validation};
