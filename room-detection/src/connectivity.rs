//! Wall-to-wall contact queries, used when the editor selects a whole wall run.

use crate::config::CONNECTIVITY_THRESHOLD;
use crate::polygon::distance_to_segment;
use crate::Wall;
use std::collections::VecDeque;
use tracing::debug;

/// Whether two walls touch within `threshold`.
///
/// Endpoint-to-endpoint contact counts, and so does an endpoint butting into the
/// interior of the other wall (a T-junction).
pub fn walls_touch(a: &Wall, b: &Wall, threshold: f64) -> bool {
    let corner_contact = a
        .endpoints()
        .iter()
        .any(|p| b.endpoints().iter().any(|q| p.distance_to(q) < threshold));
    if corner_contact {
        return true;
    }

    a.endpoints()
        .iter()
        .any(|p| distance_to_segment(p, &b.start, &b.end) < threshold)
        || b.endpoints()
            .iter()
            .any(|p| distance_to_segment(p, &a.start, &a.end) < threshold)
}

/// All walls transitively touching the starting walls, with the default threshold.
pub fn find_connected_walls(starting_wall_ids: &[String], all_walls: &[Wall]) -> Vec<String> {
    find_connected_walls_with_threshold(starting_wall_ids, all_walls, CONNECTIVITY_THRESHOLD)
}

/// Breadth-first closure over wall contact.
///
/// # Returns
/// Wall ids in discovery order, starting walls first. Starting ids that name no
/// wall in `all_walls` are ignored.
pub fn find_connected_walls_with_threshold(
    starting_wall_ids: &[String],
    all_walls: &[Wall],
    threshold: f64,
) -> Vec<String> {
    let mut visited = vec![false; all_walls.len()];
    let mut queue = VecDeque::new();
    let mut connected = Vec::new();

    for id in starting_wall_ids {
        match all_walls.iter().position(|wall| &wall.id == id) {
            Some(idx) if !visited[idx] => {
                visited[idx] = true;
                queue.push_back(idx);
                connected.push(all_walls[idx].id.clone());
            }
            Some(_) => {}
            None => debug!("Ignoring unknown starting wall {}", id),
        }
    }

    while let Some(current) = queue.pop_front() {
        for (idx, other) in all_walls.iter().enumerate() {
            if visited[idx] || !walls_touch(&all_walls[current], other, threshold) {
                continue;
            }
            visited[idx] = true;
            queue.push_back(idx);
            connected.push(other.id.clone());
        }
    }

    debug!(
        "Connected {} walls from {} starting walls",
        connected.len(),
        starting_wall_ids.len()
    );

    connected
}
