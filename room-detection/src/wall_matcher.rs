//! Maps a detected room's outline back to the wall records that bound it.

use crate::config::{COLLINEAR_TOLERANCE, ROOM_WALL_TOLERANCE};
use crate::polygon::{polygon_edges, project_onto_segment};
use crate::{Point2D, Room, Wall};
use nalgebra::Vector2;
use tracing::debug;

/// Wall ids bounding `room`, using the default matching tolerance.
pub fn find_walls_for_room(room: &Room, walls: &[Wall]) -> Vec<String> {
    find_walls_for_polygon(&room.points, walls, ROOM_WALL_TOLERANCE)
}

/// Wall ids bounding a closed polygon, in edge order, each listed once.
///
/// Each edge first looks for a wall with the same endpoints. Failing that, it looks
/// for a longer wall the edge lies on, which is how one wall shared by two rooms
/// shows up in both.
pub fn find_walls_for_polygon(points: &[Point2D], walls: &[Wall], tolerance: f64) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    if points.len() < 2 {
        return ids;
    }

    for (p1, p2) in polygon_edges(points) {
        let matched = walls
            .iter()
            .find(|wall| matches_edge(wall, &p1, &p2, tolerance))
            .or_else(|| walls.iter().find(|wall| spans_edge(wall, &p1, &p2, tolerance)));

        match matched {
            Some(wall) if !ids.contains(&wall.id) => ids.push(wall.id.clone()),
            Some(_) => {}
            None => debug!(
                "No wall found for room edge ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                p1.x, p1.z, p2.x, p2.z
            ),
        }
    }

    ids
}

/// Wall endpoints coincide with the edge endpoints, in either direction.
pub fn matches_edge(wall: &Wall, p1: &Point2D, p2: &Point2D, tolerance: f64) -> bool {
    let forward = wall.start.distance_to(p1) < tolerance && wall.end.distance_to(p2) < tolerance;
    let reversed = wall.start.distance_to(p2) < tolerance && wall.end.distance_to(p1) < tolerance;
    forward || reversed
}

/// The edge is a collinear sub-segment of the wall.
pub fn spans_edge(wall: &Wall, p1: &Point2D, p2: &Point2D, tolerance: f64) -> bool {
    let wall_length = wall.length();
    let edge_length = p1.distance_to(p2);
    if wall_length == 0.0 || edge_length == 0.0 {
        return false;
    }

    let wall_dir = wall.start.vector_to(&wall.end) / wall_length;
    let edge_dir = p1.vector_to(p2) / edge_length;
    if wall_dir.perp(&edge_dir).abs() > COLLINEAR_TOLERANCE {
        return false;
    }

    let normal = Vector2::new(-wall_dir.y, wall_dir.x);
    let off_line = |p: &Point2D| wall.start.vector_to(p).dot(&normal).abs();
    if off_line(p1) > tolerance || off_line(p2) > tolerance {
        return false;
    }

    let margin = tolerance / wall_length;
    let within = |t: f64| (-margin..=1.0 + margin).contains(&t);
    within(project_onto_segment(p1, &wall.start, &wall.end))
        && within(project_onto_segment(p2, &wall.start, &wall.end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(id: &str, x1: f64, z1: f64, x2: f64, z2: f64) -> Wall {
        Wall::new(id, Point2D::new(x1, z1), Point2D::new(x2, z2))
    }

    fn room(points: &[(f64, f64)]) -> Room {
        Room {
            id: "room-test".to_string(),
            points: points.iter().map(|&(x, z)| Point2D::new(x, z)).collect(),
            area: 0.0,
            center: Point2D::new(0.0, 0.0),
        }
    }

    #[test]
    fn test_exact_matches_in_either_direction() {
        let walls = vec![
            wall("wall-1", 0.0, 0.0, 5.0, 0.0),
            wall("wall-2", 5.0, 4.0, 5.0, 0.0), // drawn backwards
            wall("wall-3", 5.0, 4.0, 0.0, 4.0),
            wall("wall-4", 0.0, 4.0, 0.0, 0.0),
            wall("wall-5", 20.0, 0.0, 25.0, 0.0),
        ];
        let r = room(&[(0.0, 0.0), (5.0, 0.0), (5.0, 4.0), (0.0, 4.0)]);

        assert_eq!(
            find_walls_for_room(&r, &walls),
            vec!["wall-1", "wall-2", "wall-3", "wall-4"]
        );
    }

    #[test]
    fn test_dragged_walls_still_match() {
        let walls = vec![
            wall("wall-1", 0.3, 0.2, 5.0, 0.0),
            wall("wall-2", 5.0, 0.0, 5.4, 4.0),
            wall("wall-3", 5.4, 4.0, 0.0, 4.0),
            wall("wall-4", 0.0, 4.0, 0.3, 0.2),
        ];
        let r = room(&[(0.0, 0.0), (5.0, 0.0), (5.0, 4.0), (0.0, 4.0)]);

        assert_eq!(find_walls_for_room(&r, &walls).len(), 4);
    }

    #[test]
    fn test_shared_long_wall_matches_sub_segment() {
        // One long wall on x=0 borders two stacked rooms
        let walls = vec![
            wall("wall-left", 0.0, 0.0, 0.0, 8.0),
            wall("wall-bottom", 0.0, 0.0, 5.0, 0.0),
            wall("wall-right-lower", 5.0, 0.0, 5.0, 4.0),
            wall("wall-middle", 5.0, 4.0, 0.0, 4.0),
        ];
        let lower = room(&[(0.0, 0.0), (5.0, 0.0), (5.0, 4.0), (0.0, 4.0)]);

        assert_eq!(
            find_walls_for_room(&lower, &walls),
            vec!["wall-bottom", "wall-right-lower", "wall-middle", "wall-left"]
        );
        assert!(spans_edge(
            &walls[0],
            &Point2D::new(0.0, 4.0),
            &Point2D::new(0.0, 8.0),
            ROOM_WALL_TOLERANCE
        ));
    }

    #[test]
    fn test_wall_listed_once_for_collinear_edges() {
        // The bottom edge is split by a vertex at (2,0); both halves lie on wall-bottom
        let walls = vec![
            wall("wall-bottom", 0.0, 0.0, 4.0, 0.0),
            wall("wall-right", 4.0, 0.0, 4.0, 4.0),
            wall("wall-top", 4.0, 4.0, 0.0, 4.0),
            wall("wall-left", 0.0, 4.0, 0.0, 0.0),
        ];
        let r = room(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);

        assert_eq!(
            find_walls_for_room(&r, &walls),
            vec!["wall-bottom", "wall-right", "wall-top", "wall-left"]
        );
    }

    #[test]
    fn test_spans_edge_rejections() {
        let long = wall("wall-1", 0.0, 0.0, 10.0, 0.0);
        let p = |x, z| Point2D::new(x, z);

        // Not collinear
        assert!(!spans_edge(&long, &p(2.0, 0.0), &p(4.0, 1.0), ROOM_WALL_TOLERANCE));
        // Parallel but off the wall's line
        assert!(!spans_edge(&long, &p(2.0, 1.0), &p(6.0, 1.0), ROOM_WALL_TOLERANCE));
        // On the line but past the wall's end
        assert!(!spans_edge(&long, &p(8.0, 0.0), &p(12.0, 0.0), ROOM_WALL_TOLERANCE));
        // Slightly past the end is within the margin
        assert!(spans_edge(&long, &p(8.0, 0.0), &p(10.3, 0.0), ROOM_WALL_TOLERANCE));
        // Degenerate edge
        assert!(!spans_edge(&long, &p(3.0, 0.0), &p(3.0, 0.0), ROOM_WALL_TOLERANCE));
    }

    #[test]
    fn test_unmatched_edges_are_skipped() {
        let walls = vec![wall("wall-1", 0.0, 0.0, 5.0, 0.0)];
        let r = room(&[(0.0, 0.0), (5.0, 0.0), (5.0, 4.0)]);

        assert_eq!(find_walls_for_room(&r, &walls), vec!["wall-1"]);
        assert!(find_walls_for_polygon(&[], &walls, ROOM_WALL_TOLERANCE).is_empty());
    }
}
