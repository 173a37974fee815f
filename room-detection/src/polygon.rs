//! Polygon and segment measurements shared by detection and the wall queries.

use geo::{Area, Coord, LineString, Polygon as GeoPolygon};

use crate::types::{EdgeLabel, Point2D};

/// Edges shorter than this carry no useful label.
const MIN_LABEL_EDGE_LENGTH: f64 = 1e-9;

/// Unsigned polygon area (shoelace formula).
///
/// Independent of winding and of which vertex the list starts at.
pub fn calculate_polygon_area(points: &[Point2D]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let coords: Vec<Coord> = points.iter().map(|p| Coord { x: p.x, y: p.z }).collect();
    let polygon = GeoPolygon::new(LineString::from(coords), vec![]);

    polygon.unsigned_area()
}

/// Mean of the polygon's vertices.
///
/// This is the vertex centroid, not the centroid of the enclosed area. The two agree
/// for rectangles and regular shapes; for irregular rooms the vertex mean drifts
/// toward densely-vertexed sides.
pub fn calculate_centroid(points: &[Point2D]) -> Point2D {
    if points.is_empty() {
        return Point2D::new(0.0, 0.0);
    }

    let n = points.len() as f64;
    let (sum_x, sum_z) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sz), p| (sx + p.x, sz + p.z));

    Point2D::new(sum_x / n, sum_z / n)
}

/// Ray-casting parity test.
pub fn is_point_in_polygon(point: &Point2D, polygon: &[Point2D]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        let crosses = (pi.z > point.z) != (pj.z > point.z);
        if crosses {
            let x_at_z = (pj.x - pi.x) * (point.z - pi.z) / (pj.z - pi.z) + pi.x;
            if point.x < x_at_z {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Iterate the edges of a closed polygon, including the closing edge.
pub fn polygon_edges(points: &[Point2D]) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

pub fn perimeter(points: &[Point2D]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    polygon_edges(points).map(|(a, b)| a.distance_to(&b)).sum()
}

/// Label placement for every non-degenerate edge of a closed polygon.
pub fn edge_labels(points: &[Point2D]) -> Vec<EdgeLabel> {
    if points.len() < 2 {
        return Vec::new();
    }

    polygon_edges(points)
        .filter_map(|(start, end)| {
            let length = start.distance_to(&end);
            (length > MIN_LABEL_EDGE_LENGTH).then(|| EdgeLabel {
                start,
                end,
                midpoint: start.midpoint(&end),
                length,
            })
        })
        .collect()
}

/// Parametric position of `point` projected onto the segment `a -> b`.
///
/// Unclamped; 0 at `a`, 1 at `b`. Degenerate segments project everything onto `a`.
pub fn project_onto_segment(point: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    let ab = a.vector_to(b);
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return 0.0;
    }
    a.vector_to(point).dot(&ab) / len_sq
}

/// Shortest distance from `point` to the closed segment `a -> b`.
pub fn distance_to_segment(point: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    let t = project_onto_segment(point, a, b).clamp(0.0, 1.0);
    let closest = Point2D::new(a.x + (b.x - a.x) * t, a.z + (b.z - a.z) * t);
    point.distance_to(&closest)
}
