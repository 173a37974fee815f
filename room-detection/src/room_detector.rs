use crate::config::{DetectionOptions, MIN_ROOM_WALLS};
use crate::cycle_finder::{find_cycles, Cycle};
use crate::graph_builder::{build_wall_graph, is_room_wall, WallGraph};
use crate::polygon::{calculate_centroid, calculate_polygon_area};
use crate::{Point2D, Room, Wall};
use tracing::{debug, info};
use uuid::Uuid;

/// A traced face with its metrics, not yet checked against the area band.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCandidate {
    pub points: Vec<Point2D>,
    pub area: f64,
    pub center: Point2D,
}

impl RoomCandidate {
    pub fn from_points(points: Vec<Point2D>) -> Self {
        let area = calculate_polygon_area(&points);
        let center = calculate_centroid(&points);
        Self {
            points,
            area,
            center,
        }
    }

    fn from_cycle(graph: &WallGraph, cycle: &Cycle) -> Self {
        Self::from_points(cycle.iter().map(|&node| graph[node]).collect())
    }

    /// Promote to a room with a freshly generated id.
    pub fn into_room(self) -> Room {
        Room {
            id: format!("room-{}", Uuid::new_v4()),
            points: self.points,
            area: self.area,
            center: self.center,
        }
    }
}

/// Detect enclosed rooms from a raw wall list.
///
/// Runs the full pipeline: graph building, face tracing, deduplication, metrics and
/// area filtering. Unusable input (too few recognized walls, nothing closed) yields
/// an empty list rather than an error.
pub fn detect_rooms(walls: &[Wall], options: &DetectionOptions) -> Vec<Room> {
    let valid_walls = walls.iter().filter(|wall| is_room_wall(wall)).count();
    if valid_walls < MIN_ROOM_WALLS {
        debug!(
            "Skipping room detection: {} usable walls (need {})",
            valid_walls, MIN_ROOM_WALLS
        );
        return Vec::new();
    }

    let graph = build_wall_graph(walls);
    let cycles = find_cycles(&graph);

    let candidates: Vec<RoomCandidate> = cycles
        .iter()
        .map(|cycle| RoomCandidate::from_cycle(&graph, cycle))
        .collect();
    let candidate_count = candidates.len();

    let rooms: Vec<Room> = filter_by_area(candidates, options)
        .into_iter()
        .map(RoomCandidate::into_room)
        .collect();

    info!(
        "Detected {} rooms from {} walls ({} candidate faces)",
        rooms.len(),
        valid_walls,
        candidate_count
    );

    rooms
}

/// Keep candidates whose area lies inside `[min_area, max_area]`.
///
/// The lower bound removes slivers left by snapping overlaps; the upper bound keeps
/// the outer boundary loop, which encloses every room at once, out of the result.
pub fn filter_by_area(candidates: Vec<RoomCandidate>, options: &DetectionOptions) -> Vec<RoomCandidate> {
    candidates
        .into_iter()
        .filter(|candidate| {
            let keep = candidate.points.len() >= MIN_ROOM_WALLS && options.contains_area(candidate.area);
            if !keep {
                debug!("Rejecting face with area {:.3}", candidate.area);
            }
            keep
        })
        .collect()
}
