//! DashEngine geometry: curve capability trait and closed-form curves.

pub mod curve;

pub use curve::{Arc, Curve, Line, Polyline};

pub use glam::{DVec2, DVec3};

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector3 = DVec3;
