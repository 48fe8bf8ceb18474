//! A traversed edge of a route.

use crate::functions::ProfileFunction;
use crate::geo::Point;
use crate::graph::Graph;
use crate::math;

/// One directed edge of a computed route, with everything position queries
/// need copied out of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from_node_id: u32,
    pub to_node_id: u32,
    pub from_point: Point,
    pub to_point: Point,
    pub length: f64,
    pub profile: ProfileFunction,
}

impl Edge {
    /// Build the route edge for graph edge `edge_id` going from `from_node_id`
    /// to `to_node_id`.
    pub fn of(graph: &Graph, edge_id: u32, from_node_id: u32, to_node_id: u32) -> Self {
        Self {
            from_node_id,
            to_node_id,
            from_point: graph.node_point(from_node_id),
            to_point: graph.node_point(to_node_id),
            length: graph.edge_length(edge_id),
            profile: graph.edge_profile(edge_id),
        }
    }

    /// Signed position along the edge of the point closest to `point`
    /// (orthogonal projection onto the edge's chord, not clamped).
    pub fn position_closest_to(&self, point: Point) -> f64 {
        math::projection_length(
            self.from_point.e,
            self.from_point.n,
            self.to_point.e,
            self.to_point.n,
            point.e,
            point.n,
        )
    }

    /// The point at `position` meters along the edge. A zero-length edge
    /// yields its start point.
    pub fn point_at(&self, position: f64) -> Point {
        if self.length == 0.0 {
            return self.from_point;
        }
        let factor = position / self.length;
        Point {
            e: math::interpolate(self.from_point.e, self.to_point.e, factor),
            n: math::interpolate(self.from_point.n, self.to_point.n, factor),
        }
    }

    /// Elevation at `position` meters along the edge; NaN when the edge has
    /// no profile.
    pub fn elevation_at(&self, position: f64) -> f64 {
        self.profile.apply(position)
    }
}
