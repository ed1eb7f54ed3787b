//! Curve traits and implementations.

mod arc;
mod line;
mod polyline;

use crate::{Point3, Vector3};

pub use arc::Arc;
pub use line::Line;
pub use polyline::Polyline;

/// Trait for parametric curves in 3D space.
///
/// Beyond evaluation, a curve exposes the capability set the dasher
/// consumes: arc-length measurement, arc-length-to-parameter mapping, and
/// trimming. Queries return `None` as the explicit invalid sentinel on
/// numerical failure rather than panicking, so a caller can degrade
/// gracefully mid-walk.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Evaluate the tangent vector at parameter `t`.
    fn tangent_at(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Total arc length, or `None` if the measurement is not a finite
    /// non-negative number.
    fn length(&self) -> Option<f64>;

    /// Parameter `t` such that the arc length from the domain start to `t`
    /// equals `target`. Fails if `target` is outside `[0, length]` or the
    /// mapping is numerically unstable.
    fn length_parameter(&self, target: f64) -> Option<f64>;

    /// The sub-curve over `[t0, t1]`, following the same domain convention
    /// as `self`, or `None` if the interval is degenerate or out of range.
    fn trim(&self, t0: f64, t1: f64) -> Option<Box<dyn Curve>>;

    /// An independent copy of this curve; the caller owns the result.
    fn clone_curve(&self) -> Box<dyn Curve>;

    /// Whether the curve is closed (start == end).
    fn is_closed(&self) -> bool {
        false
    }
}

/// Slack applied when checking trim parameters against the domain.
const PARAM_EPS: f64 = 1e-9;

/// Shared trim-interval check: finite, inside `[min, max]`, and wide
/// enough to produce a non-degenerate sub-curve.
fn valid_interval(t0: f64, t1: f64, min: f64, max: f64) -> bool {
    t0.is_finite()
        && t1.is_finite()
        && t0 >= min - PARAM_EPS
        && t1 <= max + PARAM_EPS
        && t1 - t0 > PARAM_EPS
}

/// Shared range check for arc-length queries.
fn valid_length_target(target: f64, total: f64) -> bool {
    target.is_finite() && target >= 0.0 && target <= total + PARAM_EPS
}
