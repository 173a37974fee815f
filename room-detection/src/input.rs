//! Input checks applied where walls enter from outside (JSON payloads, scene files),
//! so the geometry core only ever sees well-formed coordinates.

use crate::config::{MAX_COORDINATE_VALUE, MAX_WALLS};
use crate::error::{Result, RoomDetectionError};
use crate::Wall;

/// Parse a JSON array of walls and validate it.
pub fn parse_walls(json: &str) -> Result<Vec<Wall>> {
    let walls: Vec<Wall> = serde_json::from_str(json)?;
    validate_walls(&walls)?;
    Ok(walls)
}

/// Reject payloads the detector should never see: oversized wall lists and
/// non-finite or out-of-range coordinates.
pub fn validate_walls(walls: &[Wall]) -> Result<()> {
    if walls.len() > MAX_WALLS {
        return Err(RoomDetectionError::TooManyWalls {
            count: walls.len(),
            max: MAX_WALLS,
        });
    }

    for wall in walls {
        for (endpoint, point) in [("start", &wall.start), ("end", &wall.end)] {
            if !point.is_finite() {
                return Err(RoomDetectionError::NonFiniteCoordinate {
                    wall_id: wall.id.clone(),
                    endpoint,
                });
            }
            if point.x.abs() > MAX_COORDINATE_VALUE || point.z.abs() > MAX_COORDINATE_VALUE {
                return Err(RoomDetectionError::CoordinateOutOfRange {
                    wall_id: wall.id.clone(),
                    endpoint,
                    max: MAX_COORDINATE_VALUE,
                });
            }
        }
    }

    Ok(())
}
