use thiserror::Error;

/// Errors raised at the input boundary. The geometry core itself never fails:
/// unusable input simply produces no rooms.
#[derive(Error, Debug)]
pub enum RoomDetectionError {
    #[error("invalid wall payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("wall '{wall_id}' has a non-finite {endpoint} coordinate")]
    NonFiniteCoordinate {
        wall_id: String,
        endpoint: &'static str,
    },

    #[error("wall '{wall_id}' has an out-of-range {endpoint} coordinate (limit ±{max})")]
    CoordinateOutOfRange {
        wall_id: String,
        endpoint: &'static str,
        max: f64,
    },

    #[error("invalid area bounds: minArea {min_area} must be a finite, non-negative value no greater than maxArea {max_area}")]
    InvalidAreaBounds { min_area: f64, max_area: f64 },

    #[error("too many walls: {count} exceeds the maximum of {max}")]
    TooManyWalls { count: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, RoomDetectionError>;
