//! Arc-length dash/gap segmentation.

use dash_core::{Diagnostics, Tolerance};
use dash_geometry::Curve;

use crate::pattern::{self, Pattern, Validation};

/// Ordered dash and gap segments produced by one segmentation walk.
///
/// `None` entries are placeholders for degenerate pattern steps: they
/// consume no curve length but keep a slot so the dash/gap assignment
/// cycle stays visible.
#[derive(Default)]
pub struct SolveResult {
    pub dashes: Vec<Option<Box<dyn Curve>>>,
    pub gaps: Vec<Option<Box<dyn Curve>>>,
}

impl SolveResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.dashes.is_empty() && self.gaps.is_empty()
    }
}

/// Cut a curve into alternating dash and gap segments by walking it in
/// arc length, cycling through the pattern entries.
///
/// An absent curve yields an empty result. The walk never mutates the
/// caller's curve; it operates on a private clone that is progressively
/// replaced by its own remaining suffix. A mid-walk numeric failure
/// (invalid length measurement, unstable arc-length parameter, failed
/// suffix trim) ends the walk silently, keeping the segments accumulated
/// so far.
pub fn segment(curve: Option<&dyn Curve>, pattern: &Pattern) -> SolveResult {
    let Some(curve) = curve else {
        return SolveResult::empty();
    };

    let mut result = SolveResult::empty();
    let mut remaining = curve.clone_curve();
    let mut step = 0usize;

    loop {
        // Even steps are dashes, so the walk starts with a dash; the
        // pattern index cycles independently of the dash/gap flag.
        let is_dash = step % 2 == 0;
        let seg_len = pattern.step(step);
        step += 1;

        let list = if is_dash {
            &mut result.dashes
        } else {
            &mut result.gaps
        };

        // Degenerate entries take a placeholder slot and consume nothing.
        // The pattern invariant guarantees a positive entry within one
        // cycle, so consumption always resumes.
        if seg_len.abs() < Tolerance::DEGENERATE_SEGMENT {
            list.push(None);
            continue;
        }

        let Some(length) = remaining.length().filter(|len| len.is_finite()) else {
            break;
        };

        // The rest of the curve fits in this entry
        if length <= seg_len {
            list.push(Some(remaining));
            break;
        }

        let Some(t) = remaining.length_parameter(seg_len) else {
            break;
        };

        let (t_min, t_max) = remaining.domain();
        // An invalid prefix trim is dropped without ending the walk
        if let Some(piece) = remaining.trim(t_min, t) {
            list.push(Some(piece));
        }

        match remaining.trim(t, t_max) {
            Some(rest) => remaining = rest,
            None => break,
        }
    }

    result
}

/// Run validation and segmentation for one invocation.
///
/// `None` means no pattern was supplied and there is no result at all.
/// `Some` is always a well-formed result, possibly empty (curve absent,
/// or pattern rejected as too short).
pub fn solve(
    curve: Option<&dyn Curve>,
    raw_pattern: &[f64],
    diag: &mut Diagnostics,
) -> Option<SolveResult> {
    match pattern::validate(raw_pattern, diag) {
        Validation::Absent => None,
        Validation::TooShort => Some(SolveResult::empty()),
        Validation::Valid(pattern) => Some(segment(curve, &pattern)),
    }
}
