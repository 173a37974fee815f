use serde::{Deserialize, Serialize};

use crate::error::RoomDetectionError;

/// Endpoints closer than this merge into one graph node.
pub const GRAPH_SNAP_THRESHOLD: f64 = 0.15;
/// Default contact distance for wall connectivity queries.
pub const CONNECTIVITY_THRESHOLD: f64 = 0.3;
/// Tolerance when mapping room edges back to walls. Looser than the graph snap so
/// walls nudged after detection still match.
pub const ROOM_WALL_TOLERANCE: f64 = 0.5;
/// Maximum |sin| between a wall and a room edge still treated as collinear.
pub const COLLINEAR_TOLERANCE: f64 = 0.05;
/// Steps allowed for a single face trace before it is abandoned.
pub const MAX_TRACE_STEPS: usize = 100;
/// A face needs at least this many bounding walls.
pub const MIN_ROOM_WALLS: usize = 3;
/// Upper bound on walls accepted from outside; hand-drawn plans stay far below it.
pub const MAX_WALLS: usize = 10_000;
/// Largest accepted coordinate magnitude.
pub const MAX_COORDINATE_VALUE: f64 = 1_000_000.0;

/// Id prefixes of walls drawn by the user or generated from a preset.
/// Segments with other ids (land boundary, background guides) never bound a room.
pub const RECOGNIZED_WALL_PREFIXES: &[&str] = &["wall-", "preset-wall-"];

pub fn default_min_area() -> f64 {
    0.5
}

pub fn default_max_area() -> f64 {
    500.0
}

/// Caller-tunable bounds for room detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionOptions {
    /// Smaller candidates are snapping slivers.
    #[serde(default = "default_min_area")]
    pub min_area: f64,
    /// Larger candidates are taken to be the outer land-boundary loop.
    #[serde(default = "default_max_area")]
    pub max_area: f64,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            min_area: default_min_area(),
            max_area: default_max_area(),
        }
    }
}

impl DetectionOptions {
    pub fn new(min_area: f64, max_area: f64) -> Self {
        Self { min_area, max_area }
    }

    pub fn contains_area(&self, area: f64) -> bool {
        area >= self.min_area && area <= self.max_area
    }

    pub fn validate(&self) -> Result<(), RoomDetectionError> {
        let ordered = self.min_area <= self.max_area;
        if !self.min_area.is_finite() || !self.max_area.is_finite() || self.min_area < 0.0 || !ordered
        {
            return Err(RoomDetectionError::InvalidAreaBounds {
                min_area: self.min_area,
                max_area: self.max_area,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let options: DetectionOptions = serde_json::from_str(r#"{"maxArea": 80}"#).unwrap();
        assert_eq!(options.min_area, 0.5);
        assert_eq!(options.max_area, 80.0);

        let options: DetectionOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DetectionOptions::default());
    }

    #[test]
    fn test_area_band_is_inclusive() {
        let options = DetectionOptions::default();
        assert!(options.contains_area(0.5));
        assert!(options.contains_area(500.0));
        assert!(!options.contains_area(0.2));
        assert!(!options.contains_area(600.0));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        assert!(DetectionOptions::new(10.0, 5.0).validate().is_err());
        assert!(DetectionOptions::new(-1.0, 5.0).validate().is_err());
        assert!(DetectionOptions::new(0.0, f64::NAN).validate().is_err());
        assert!(DetectionOptions::default().validate().is_ok());
    }
}
