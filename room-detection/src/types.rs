use nalgebra::Vector2;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A point on the floor plane. `z` is the second horizontal axis of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub z: f64,
}

impl Point2D {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.z + other.z) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    pub(crate) fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.z)
    }

    /// Vector pointing from `self` to `other`.
    pub(crate) fn vector_to(&self, other: &Point2D) -> Vector2<f64> {
        other.to_vector() - self.to_vector()
    }
}

/// Hashable key for a point, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey {
    x: OrderedFloat<f64>,
    z: OrderedFloat<f64>,
}

impl From<&Point2D> for PointKey {
    fn from(point: &Point2D) -> Self {
        const PRECISION: f64 = 100.0;
        PointKey {
            x: OrderedFloat((point.x * PRECISION).round() / PRECISION),
            z: OrderedFloat((point.z * PRECISION).round() / PRECISION),
        }
    }
}

/// A straight wall segment as drawn in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: String,
    pub start: Point2D,
    pub end: Point2D,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

impl Wall {
    pub fn new(id: impl Into<String>, start: Point2D, end: Point2D) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            thickness: None,
        }
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn endpoints(&self) -> [Point2D; 2] {
        [self.start, self.end]
    }
}

/// An enclosed area derived from wall topology.
///
/// Rooms carry no identity between detection runs: every run assigns fresh ids,
/// only the geometry is stable for an unchanged wall set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub points: Vec<Point2D>,
    pub area: f64,
    pub center: Point2D,
}

/// Placement data for a dimension label along one polygon edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeLabel {
    pub start: Point2D,
    pub end: Point2D,
    pub midpoint: Point2D,
    pub length: f64,
}
