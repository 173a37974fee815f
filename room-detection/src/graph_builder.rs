use crate::config::{GRAPH_SNAP_THRESHOLD, RECOGNIZED_WALL_PREFIXES};
use crate::{Point2D, PointKey, Wall};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;
use tracing::{debug, trace};

// Undirected: a wall joins its two corners in both directions
pub type WallGraph = UnGraph<Point2D, WallEdge>;

/// Edge payload: the wall that first produced this adjacency.
#[derive(Debug, Clone, PartialEq)]
pub struct WallEdge {
    pub wall_id: String,
}

/// Whether a wall takes part in room detection.
///
/// Only user-drawn and preset walls with finite endpoints qualify; land boundaries
/// and other guide segments are skipped.
pub fn is_room_wall(wall: &Wall) -> bool {
    RECOGNIZED_WALL_PREFIXES
        .iter()
        .any(|prefix| wall.id.starts_with(prefix))
        && wall.start.is_finite()
        && wall.end.is_finite()
}

/// Build the wall graph with the default snap threshold.
pub fn build_wall_graph(walls: &[Wall]) -> WallGraph {
    build_wall_graph_with_threshold(walls, GRAPH_SNAP_THRESHOLD)
}

/// Build an undirected graph whose nodes are snapped wall endpoints.
///
/// # Arguments
/// * `walls` - Raw wall list; walls failing [`is_room_wall`] are ignored
/// * `snap_threshold` - Endpoints closer than this share a node
///
/// # Returns
/// Graph with one edge per distinct pair of joined nodes. Walls whose endpoints
/// collapse onto the same node are dropped.
pub fn build_wall_graph_with_threshold(walls: &[Wall], snap_threshold: f64) -> WallGraph {
    let mut graph = UnGraph::new_undirected();
    let mut index = SnapIndex::new(snap_threshold);
    let mut considered = 0;

    for wall in walls.iter().filter(|wall| is_room_wall(wall)) {
        considered += 1;

        let start_node = index.node_for(&mut graph, wall.start);
        let end_node = index.node_for(&mut graph, wall.end);

        if start_node == end_node {
            trace!("Dropping degenerate wall {}", wall.id);
            continue;
        }

        if graph.find_edge(start_node, end_node).is_none() {
            graph.add_edge(
                start_node,
                end_node,
                WallEdge {
                    wall_id: wall.id.clone(),
                },
            );
        }
    }

    debug!(
        "Built wall graph: {} nodes, {} edges from {} walls",
        graph.node_count(),
        graph.edge_count(),
        considered
    );

    graph
}

/// Uniform grid over node positions with a cell size equal to the snap threshold,
/// so any node within the threshold sits in one of the 3x3 cells around a point.
struct SnapIndex {
    threshold: f64,
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<NodeIndex>>,
    keys: HashMap<PointKey, NodeIndex>,
}

impl SnapIndex {
    fn new(threshold: f64) -> Self {
        Self {
            threshold,
            cell_size: threshold.max(1e-3),
            cells: HashMap::new(),
            keys: HashMap::new(),
        }
    }

    fn cell_of(&self, point: &Point2D) -> (i64, i64) {
        (
            (point.x / self.cell_size).floor() as i64,
            (point.z / self.cell_size).floor() as i64,
        )
    }

    /// Earliest-created node within the threshold, matching a first-hit linear scan.
    fn nearest_existing(&self, graph: &WallGraph, point: &Point2D) -> Option<NodeIndex> {
        let (cx, cz) = self.cell_of(point);
        let mut best: Option<NodeIndex> = None;

        for dx in -1..=1 {
            for dz in -1..=1 {
                let cell = (cx.saturating_add(dx), cz.saturating_add(dz));
                let Some(bucket) = self.cells.get(&cell) else {
                    continue;
                };
                for &node in bucket {
                    if graph[node].distance_to(point) < self.threshold
                        && best.map_or(true, |b| node < b)
                    {
                        best = Some(node);
                    }
                }
            }
        }

        best
    }

    fn node_for(&mut self, graph: &mut WallGraph, point: Point2D) -> NodeIndex {
        if let Some(node) = self.nearest_existing(graph, &point) {
            return node;
        }

        let key = PointKey::from(&point);
        if let Some(&node) = self.keys.get(&key) {
            return node;
        }

        let node = graph.add_node(point);
        self.keys.insert(key, node);
        self.cells.entry(self.cell_of(&point)).or_default().push(node);
        node
    }
}
