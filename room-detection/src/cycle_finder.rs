//! Face tracing over the wall graph.
//!
//! Every trace leaves a node along one edge and, at each junction, takes the most
//! counter-clockwise turn available. Repeating this from every directed edge walks
//! out the faces of the planar subdivision without any stored embedding: a closed
//! walk is a candidate room, anything else is silently discarded.

use crate::config::{MAX_TRACE_STEPS, MIN_ROOM_WALLS};
use crate::graph_builder::WallGraph;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;
use std::f64::consts::PI;
use tracing::{debug, trace};

/// Closed walk of node indices, start node first, without repeating it at the end.
pub type Cycle = Vec<NodeIndex>;

/// Directed edges `(from, to)` already walked by an accepted face.
pub type ProcessedEdges = HashSet<(NodeIndex, NodeIndex)>;

/// Where a face trace currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceState {
    Tracing,
    Closed,
    DeadEnd,
    SelfIntersect,
    IterationExceeded,
}

/// Why a trace produced no cycle. None of these are errors: open partitions and
/// stub walls are normal in a floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFailure {
    DeadEnd { at: NodeIndex },
    SelfIntersection { at: NodeIndex },
    IterationLimit { steps: usize },
}

struct FaceTrace<'g> {
    graph: &'g WallGraph,
    start: NodeIndex,
    prev: NodeIndex,
    current: NodeIndex,
    path: Vec<NodeIndex>,
    visited: HashSet<NodeIndex>,
    steps: usize,
    max_steps: usize,
    state: TraceState,
}

impl<'g> FaceTrace<'g> {
    fn new(graph: &'g WallGraph, start: NodeIndex, first: NodeIndex, max_steps: usize) -> Self {
        Self {
            graph,
            start,
            prev: start,
            current: first,
            path: vec![start],
            visited: HashSet::from([start]),
            steps: 0,
            max_steps,
            state: TraceState::Tracing,
        }
    }

    fn step(&mut self) {
        if self.current == self.start {
            self.state = TraceState::Closed;
            return;
        }
        if self.steps >= self.max_steps {
            self.state = TraceState::IterationExceeded;
            return;
        }
        if !self.visited.insert(self.current) {
            self.state = TraceState::SelfIntersect;
            return;
        }
        self.path.push(self.current);

        match select_next(self.graph, self.prev, self.current) {
            Some(next) => {
                self.prev = self.current;
                self.current = next;
                self.steps += 1;
            }
            None => self.state = TraceState::DeadEnd,
        }
    }

    fn run(mut self) -> Result<Cycle, TraceFailure> {
        while self.state == TraceState::Tracing {
            self.step();
        }

        match self.state {
            TraceState::Closed => Ok(self.path),
            TraceState::DeadEnd => Err(TraceFailure::DeadEnd { at: self.current }),
            TraceState::SelfIntersect => Err(TraceFailure::SelfIntersection { at: self.current }),
            TraceState::IterationExceeded | TraceState::Tracing => {
                Err(TraceFailure::IterationLimit { steps: self.steps })
            }
        }
    }
}

/// Wrap an angle into (-PI, PI].
pub fn normalize_angle(mut angle: f64) -> f64 {
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    while angle > PI {
        angle -= 2.0 * PI;
    }
    angle
}

/// Pick the next node after arriving at `current` from `prev`.
///
/// Returns `None` at a dead end. With several options the largest (most
/// counter-clockwise) turn wins; ties keep the first neighbor seen.
pub fn select_next(graph: &WallGraph, prev: NodeIndex, current: NodeIndex) -> Option<NodeIndex> {
    let candidates: Vec<NodeIndex> = graph.neighbors(current).filter(|&n| n != prev).collect();

    match candidates.as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => {
            let here = graph[current];
            let from = graph[prev];
            let incoming = (here.z - from.z).atan2(here.x - from.x);

            let mut best: Option<(NodeIndex, f64)> = None;
            for &candidate in &candidates {
                let to = graph[candidate];
                let outgoing = (to.z - here.z).atan2(to.x - here.x);
                let turn = normalize_angle(outgoing - incoming);
                if best.map_or(true, |(_, best_turn)| turn > best_turn) {
                    best = Some((candidate, turn));
                }
            }
            best.map(|(node, _)| node)
        }
    }
}

/// Trace one face starting along the directed edge `start -> first`.
pub fn trace_face(
    graph: &WallGraph,
    start: NodeIndex,
    first: NodeIndex,
    max_steps: usize,
) -> Result<Cycle, TraceFailure> {
    FaceTrace::new(graph, start, first, max_steps).run()
}

/// Find all distinct faces of the wall graph.
pub fn find_cycles(graph: &WallGraph) -> Vec<Cycle> {
    let mut processed = ProcessedEdges::new();
    find_cycles_with(graph, &mut processed, MAX_TRACE_STEPS)
}

/// Find faces, skipping directed edges already in `processed` and adding the edges
/// of every closed trace to it.
pub fn find_cycles_with(
    graph: &WallGraph,
    processed: &mut ProcessedEdges,
    max_steps: usize,
) -> Vec<Cycle> {
    let mut closed: Vec<Cycle> = Vec::new();
    let mut failures = 0usize;

    for start in graph.node_indices() {
        let exits: Vec<NodeIndex> = graph.neighbors(start).collect();
        if exits.len() < 2 {
            continue;
        }

        for first in exits {
            if processed.contains(&(start, first)) {
                continue;
            }

            match trace_face(graph, start, first, max_steps) {
                Ok(cycle) => {
                    mark_processed(&cycle, processed);
                    if cycle.len() >= MIN_ROOM_WALLS {
                        closed.push(cycle);
                    }
                }
                Err(failure) => {
                    failures += 1;
                    trace!("No face from {:?} -> {:?}: {:?}", start, first, failure);
                }
            }
        }
    }

    let traced = closed.len();
    let cycles = deduplicate_cycles(closed);
    debug!(
        "Traced {} closed faces, {} distinct ({} open traces discarded)",
        traced,
        cycles.len(),
        failures
    );

    cycles
}

fn mark_processed(cycle: &[NodeIndex], processed: &mut ProcessedEdges) {
    let n = cycle.len();
    for i in 0..n {
        processed.insert((cycle[i], cycle[(i + 1) % n]));
    }
}

/// Order-, rotation- and winding-independent identity of a cycle: its sorted nodes.
///
/// Two different faces over the same node set share a signature. That cannot happen
/// for rooms bounded by distinct corners, but overlapping collinear partitions could
/// in principle produce it.
pub fn cycle_signature(cycle: &[NodeIndex]) -> Vec<NodeIndex> {
    let mut nodes = cycle.to_vec();
    nodes.sort_unstable();
    nodes
}

/// Keep the first cycle of every distinct node set.
pub fn deduplicate_cycles(cycles: Vec<Cycle>) -> Vec<Cycle> {
    let mut seen = HashSet::new();
    cycles
        .into_iter()
        .filter(|cycle| seen.insert(cycle_signature(cycle)))
        .collect()
}
