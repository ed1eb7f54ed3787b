pub mod diagnostics;
pub mod error;
pub mod tolerance;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{DashError, Result};
pub use tolerance::Tolerance;
