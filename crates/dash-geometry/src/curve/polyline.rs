//! Polyline curve.

use dash_core::{DashError, Result};
use serde::{Deserialize, Serialize};

use crate::{Point3, Vector3};

use super::{valid_interval, valid_length_target, Curve, PARAM_EPS};

/// A polyline through an ordered list of points, parameterized by arc
/// length over `[0, total_length]`.
///
/// The arc-length parameterization makes `length_parameter` the identity
/// mapping, which makes this the simplest production curve to reason about
/// when checking dash output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point3>,
}

impl Polyline {
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.len() < 2 {
            return Err(DashError::Geometry(format!(
                "Polyline needs at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Raw chord-length sum; may be non-finite if any point is.
    fn total_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).length())
            .sum()
    }
}

impl Curve for Polyline {
    fn point_at(&self, t: f64) -> Point3 {
        let mut remaining = t.max(0.0);
        for pair in self.points.windows(2) {
            let seg = pair[1] - pair[0];
            let len = seg.length();
            if remaining <= len {
                if len <= 0.0 {
                    return pair[0];
                }
                return pair[0] + (remaining / len) * seg;
            }
            remaining -= len;
        }
        self.points[self.points.len() - 1]
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let mut remaining = t.max(0.0);
        for pair in self.points.windows(2) {
            let seg = pair[1] - pair[0];
            let len = seg.length();
            if remaining <= len {
                return seg;
            }
            remaining -= len;
        }
        let n = self.points.len();
        self.points[n - 1] - self.points[n - 2]
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.total_length())
    }

    fn length(&self) -> Option<f64> {
        let len = self.total_length();
        len.is_finite().then_some(len)
    }

    fn length_parameter(&self, target: f64) -> Option<f64> {
        let len = self.length()?;
        if !valid_length_target(target, len) {
            return None;
        }
        Some(target.min(len))
    }

    fn trim(&self, t0: f64, t1: f64) -> Option<Box<dyn Curve>> {
        let total = self.length()?;
        if !valid_interval(t0, t1, 0.0, total) {
            return None;
        }
        let t0 = t0.max(0.0);
        let t1 = t1.min(total);

        let mut points = vec![self.point_at(t0)];
        let mut cum = 0.0;
        for pair in self.points.windows(2) {
            cum += (pair[1] - pair[0]).length();
            // Interior vertices strictly inside the trimmed span
            if cum > t0 + PARAM_EPS && cum < t1 - PARAM_EPS {
                points.push(pair[1]);
            }
        }
        points.push(self.point_at(t1));

        Polyline::new(points)
            .ok()
            .map(|p| Box::new(p) as Box<dyn Curve>)
    }

    fn clone_curve(&self) -> Box<dyn Curve> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DVec3;
    use approx::assert_relative_eq;

    fn l_shape() -> Polyline {
        // 10 along x, then 5 along y: total length 15
        Polyline::new(vec![
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(10.0, 5.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_polyline_needs_two_points() {
        assert!(Polyline::new(vec![]).is_err());
        assert!(Polyline::new(vec![DVec3::ZERO]).is_err());
    }

    #[test]
    fn test_polyline_length_and_domain() {
        let pl = l_shape();
        assert_relative_eq!(pl.length().unwrap(), 15.0, max_relative = 1e-12);
        assert_eq!(pl.domain(), (0.0, 15.0));
    }

    #[test]
    fn test_polyline_point_at() {
        let pl = l_shape();
        let p = pl.point_at(12.0);
        assert_relative_eq!(p.x, 10.0, max_relative = 1e-12);
        assert_relative_eq!(p.y, 2.0, max_relative = 1e-12);

        // Corner vertex
        let corner = pl.point_at(10.0);
        assert_relative_eq!(corner.x, 10.0, max_relative = 1e-12);
        assert!(corner.y.abs() < 1e-12);
    }

    #[test]
    fn test_polyline_length_parameter_is_identity() {
        let pl = l_shape();
        assert_relative_eq!(pl.length_parameter(7.5).unwrap(), 7.5, max_relative = 1e-12);
        assert!(pl.length_parameter(-1.0).is_none());
        assert!(pl.length_parameter(16.0).is_none());
    }

    #[test]
    fn test_polyline_trim_across_vertex() {
        let pl = l_shape();
        let sub = pl.trim(8.0, 13.0).unwrap();
        // Trimmed span keeps the interior corner vertex
        assert_relative_eq!(sub.length().unwrap(), 5.0, max_relative = 1e-12);
        let start = sub.point_at(0.0);
        assert_relative_eq!(start.x, 8.0, max_relative = 1e-12);
        let (_, t_max) = sub.domain();
        let end = sub.point_at(t_max);
        assert_relative_eq!(end.y, 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_polyline_trim_invalid() {
        let pl = l_shape();
        assert!(pl.trim(5.0, 5.0).is_none());
        assert!(pl.trim(-1.0, 5.0).is_none());
        assert!(pl.trim(5.0, 20.0).is_none());
    }

    #[test]
    fn test_polyline_invalid_length() {
        let pl = Polyline::new(vec![DVec3::ZERO, DVec3::new(f64::NAN, 0.0, 0.0)]).unwrap();
        assert!(pl.length().is_none());
        assert!(pl.length_parameter(0.5).is_none());
        assert!(pl.trim(0.0, 0.5).is_none());
    }

    #[test]
    fn test_polyline_tangent() {
        let pl = l_shape();
        let t = pl.tangent_at(12.0);
        assert!(t.x.abs() < 1e-12);
        assert!(t.y > 0.0);
    }
}
