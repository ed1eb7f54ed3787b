//! Circular arc curve.

use dash_core::{DashError, Result};
use serde::{Deserialize, Serialize};

use crate::{DVec3, Point3, Vector3};

use super::{valid_interval, valid_length_target, Curve};

/// A circular arc in 3D space, parameterized by angle over
/// `[start_angle, end_angle]` (radians).
///
/// The arc lies in the plane defined by `center` and `normal`, with the
/// reference direction for angle `0` computed from the normal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point3,
    pub normal: Vector3,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn new(
        center: Point3,
        normal: Vector3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(DashError::Geometry(format!(
                "Arc radius must be positive, got {}",
                radius
            )));
        }
        if end_angle <= start_angle {
            return Err(DashError::Geometry(format!(
                "Arc angles must satisfy start < end, got [{}, {}]",
                start_angle, end_angle
            )));
        }
        Ok(Self {
            center,
            normal: normal.normalize(),
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Compute an orthonormal frame (u_axis, v_axis) in the arc plane.
    fn local_frame(&self) -> (DVec3, DVec3) {
        let n = self.normal;
        // Choose a vector not parallel to normal to build the frame
        let ref_vec = if n.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
        let u = n.cross(ref_vec).normalize();
        let v = n.cross(u).normalize();
        (u, v)
    }
}

impl Curve for Arc {
    fn point_at(&self, t: f64) -> Point3 {
        let (u, v) = self.local_frame();
        self.center + self.radius * (t.cos() * u + t.sin() * v)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let (u, v) = self.local_frame();
        self.radius * (-t.sin() * u + t.cos() * v)
    }

    fn domain(&self) -> (f64, f64) {
        (self.start_angle, self.end_angle)
    }

    fn length(&self) -> Option<f64> {
        let len = self.radius * (self.end_angle - self.start_angle);
        len.is_finite().then_some(len)
    }

    fn length_parameter(&self, target: f64) -> Option<f64> {
        let len = self.length()?;
        if !valid_length_target(target, len) {
            return None;
        }
        Some((self.start_angle + target / self.radius).min(self.end_angle))
    }

    fn trim(&self, t0: f64, t1: f64) -> Option<Box<dyn Curve>> {
        if !valid_interval(t0, t1, self.start_angle, self.end_angle) {
            return None;
        }
        Some(Box::new(Self {
            start_angle: t0,
            end_angle: t1,
            ..self.clone()
        }))
    }

    fn clone_curve(&self) -> Box<dyn Curve> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn quarter_arc() -> Arc {
        Arc::new(DVec3::ZERO, DVec3::Z, 2.0, 0.0, PI / 2.0).unwrap()
    }

    #[test]
    fn test_arc_points_on_circle() {
        let arc = quarter_arc();
        for i in 0..=8 {
            let t = i as f64 * PI / 16.0;
            let p = arc.point_at(t);
            assert_relative_eq!(p.length(), 2.0, max_relative = 1e-10);
            assert!(p.z.abs() < 1e-10, "Point not in arc plane");
        }
    }

    #[test]
    fn test_arc_length() {
        let arc = quarter_arc();
        assert_relative_eq!(arc.length().unwrap(), PI, max_relative = 1e-12);
    }

    #[test]
    fn test_arc_length_parameter() {
        let arc = quarter_arc();
        // Halfway along the arc is at half the sweep angle
        let t = arc.length_parameter(PI / 2.0).unwrap();
        assert_relative_eq!(t, PI / 4.0, max_relative = 1e-12);

        assert!(arc.length_parameter(-0.1).is_none());
        assert!(arc.length_parameter(PI + 1.0).is_none());
    }

    #[test]
    fn test_arc_trim() {
        let arc = quarter_arc();
        let sub = arc.trim(PI / 8.0, PI / 4.0).unwrap();
        assert_eq!(sub.domain(), (PI / 8.0, PI / 4.0));
        assert_relative_eq!(sub.length().unwrap(), 2.0 * PI / 8.0, max_relative = 1e-12);
    }

    #[test]
    fn test_arc_trim_invalid() {
        let arc = quarter_arc();
        assert!(arc.trim(0.3, 0.3).is_none());
        assert!(arc.trim(-1.0, 0.5).is_none());
        assert!(arc.trim(0.5, PI).is_none());
    }

    #[test]
    fn test_arc_tangent_perpendicular() {
        let arc = quarter_arc();
        for i in 0..=4 {
            let t = i as f64 * PI / 8.0;
            let radial = arc.point_at(t) - arc.center;
            let tang = arc.tangent_at(t);
            assert!(radial.dot(tang).abs() < 1e-10, "Tangent not perpendicular at t={}", t);
        }
    }

    #[test]
    fn test_arc_rejects_bad_inputs() {
        assert!(Arc::new(DVec3::ZERO, DVec3::Z, 0.0, 0.0, 1.0).is_err());
        assert!(Arc::new(DVec3::ZERO, DVec3::Z, -1.0, 0.0, 1.0).is_err());
        assert!(Arc::new(DVec3::ZERO, DVec3::Z, 1.0, 1.0, 1.0).is_err());
    }
}
