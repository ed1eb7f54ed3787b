//! Dash pattern validation.

use dash_core::{Diagnostics, Tolerance};
use serde::{Deserialize, Serialize};

/// A validated cyclic sequence of non-negative segment lengths.
///
/// Invariant: no negative entries, and the entries sum to more than
/// [`Tolerance::MIN_PATTERN_LENGTH`]. Only [`validate`] constructs one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    lengths: Vec<f64>,
}

impl Pattern {
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Entry for the given walk step, indexed modulo the pattern length.
    pub fn step(&self, step: usize) -> f64 {
        self.lengths[step % self.lengths.len()]
    }
}

/// Outcome of normalizing a raw pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// No pattern was supplied; the caller must skip segmentation
    /// entirely and produce no result at all.
    Absent,
    /// The clamped entries sum to effectively zero; the caller must
    /// produce a well-formed empty result.
    TooShort,
    Valid(Pattern),
}

/// Normalize a raw sequence of requested segment lengths.
///
/// Negative entries are clamped to zero in place, one warning each.
/// Clamping is non-fatal; only a near-zero total rejects the pattern as
/// a whole (reported as an error diagnostic).
pub fn validate(raw: &[f64], diag: &mut Diagnostics) -> Validation {
    if raw.is_empty() {
        return Validation::Absent;
    }

    let mut lengths = raw.to_vec();
    let mut total = 0.0;
    for len in &mut lengths {
        if *len < 0.0 {
            diag.warning("dash patterns cannot have negative length segments");
            *len = 0.0;
        }
        total += *len;
    }

    if total <= Tolerance::MIN_PATTERN_LENGTH {
        diag.error("total pattern length is too short");
        return Validation::TooShort;
    }

    Validation::Valid(Pattern { lengths })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_is_absent() {
        let mut diag = Diagnostics::new();
        assert_eq!(validate(&[], &mut diag), Validation::Absent);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_validate_clamps_negatives_with_one_warning_each() {
        let mut diag = Diagnostics::new();
        let result = validate(&[-1.0, 3.0, -0.5], &mut diag);

        let Validation::Valid(pattern) = result else {
            panic!("expected valid pattern");
        };
        assert_eq!(pattern.lengths(), &[0.0, 3.0, 0.0]);
        assert_eq!(diag.warnings().count(), 2);
        assert_eq!(diag.errors().count(), 0);
    }

    #[test]
    fn test_validate_idempotent_for_non_negative_input() {
        let mut diag = Diagnostics::new();
        let Validation::Valid(first) = validate(&[1.0, 2.0, 0.5], &mut diag) else {
            panic!("expected valid pattern");
        };

        let Validation::Valid(second) = validate(first.lengths(), &mut diag) else {
            panic!("expected valid pattern");
        };
        assert_eq!(first, second);
        assert!(diag.is_empty(), "second pass must not add diagnostics");
    }

    #[test]
    fn test_validate_all_zero_is_fatal() {
        let mut diag = Diagnostics::new();
        assert_eq!(validate(&[0.0, 0.0], &mut diag), Validation::TooShort);
        assert_eq!(diag.errors().count(), 1);
    }

    #[test]
    fn test_validate_negatives_summing_to_zero_is_fatal() {
        let mut diag = Diagnostics::new();
        assert_eq!(validate(&[-3.0, -1.0], &mut diag), Validation::TooShort);
        assert_eq!(diag.warnings().count(), 2);
        assert_eq!(diag.errors().count(), 1);
    }

    #[test]
    fn test_pattern_step_wraps() {
        let mut diag = Diagnostics::new();
        let Validation::Valid(pattern) = validate(&[3.0, 2.0], &mut diag) else {
            panic!("expected valid pattern");
        };
        assert_eq!(pattern.step(0), 3.0);
        assert_eq!(pattern.step(1), 2.0);
        assert_eq!(pattern.step(2), 3.0);
        assert_eq!(pattern.step(5), 2.0);
    }
}
