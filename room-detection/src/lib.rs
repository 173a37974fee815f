//! Room detection from floor-plan wall topology.
//!
//! Walls are plain 2D segments with no notion of enclosure. This crate snaps their
//! endpoints into a planar graph, traces the bounded faces of that graph and reports
//! each face whose area is plausible for a room. Two on-demand queries work on the
//! raw wall list: which walls touch a selection, and which walls bound a room.
//!
//! Everything here is synchronous and side-effect free; rooms are recomputed from
//! the current walls on every call.

pub mod config;
pub mod connectivity;
pub mod cycle_finder;
pub mod error;
pub mod graph_builder;
pub mod input;
pub mod polygon;
pub mod room_detector;
pub mod types;
pub mod wall_matcher;

pub use config::DetectionOptions;
pub use connectivity::{find_connected_walls, find_connected_walls_with_threshold};
pub use error::RoomDetectionError;
pub use input::{parse_walls, validate_walls};
pub use polygon::{calculate_centroid, calculate_polygon_area, edge_labels, is_point_in_polygon};
pub use room_detector::detect_rooms;
pub use types::{EdgeLabel, Point2D, PointKey, Room, Wall};
pub use wall_matcher::find_walls_for_room;
