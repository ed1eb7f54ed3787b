//! Line segment curve.

use serde::{Deserialize, Serialize};

use crate::{Point3, Vector3};

use super::{valid_interval, valid_length_target, Curve};

/// A line segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }
}

impl Curve for Line {
    fn point_at(&self, t: f64) -> Point3 {
        self.start + t * (self.end - self.start)
    }

    fn tangent_at(&self, _t: f64) -> Vector3 {
        self.end - self.start
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn length(&self) -> Option<f64> {
        let len = (self.end - self.start).length();
        len.is_finite().then_some(len)
    }

    fn length_parameter(&self, target: f64) -> Option<f64> {
        let len = self.length()?;
        if len <= 0.0 || !valid_length_target(target, len) {
            return None;
        }
        Some((target / len).min(1.0))
    }

    fn trim(&self, t0: f64, t1: f64) -> Option<Box<dyn Curve>> {
        if !valid_interval(t0, t1, 0.0, 1.0) {
            return None;
        }
        Some(Box::new(Line::new(self.point_at(t0), self.point_at(t1))))
    }

    fn clone_curve(&self) -> Box<dyn Curve> {
        Box::new(self.clone())
    }
}
