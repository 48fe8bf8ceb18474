//! The route abstraction: a single contiguous edge sequence, a composite of
//! sub-routes, and the position/point/elevation queries shared by both.
//!
//! `Route` is a sum type rather than a trait object: the two variants are
//! the only ones that exist, and a `match` is both safer and faster than
//! dynamic dispatch.

use crate::geo::Point;
use crate::math;

use super::edge::Edge;

/// A candidate nearest-point result: the matched point, its position along
/// the reference route and its distance to the query point.
#[derive(Debug, Clone, Copy)]
pub struct RoutePoint {
    pub point: Point,
    pub position: f64,
    pub distance_to_reference: f64,
}

impl RoutePoint {
    /// The "no point yet" sentinel: infinitely far away, so any real
    /// candidate beats it in a minimum reduction.
    pub const NONE: RoutePoint = RoutePoint {
        point: Point {
            e: f64::NAN,
            n: f64::NAN,
        },
        position: f64::NAN,
        distance_to_reference: f64::INFINITY,
    };

    /// The same point with its position shifted by `position_difference`.
    pub fn with_position_shifted_by(self, position_difference: f64) -> RoutePoint {
        if position_difference == 0.0 {
            self
        } else {
            RoutePoint {
                position: self.position + position_difference,
                ..self
            }
        }
    }

    /// The closer of `self` and `that` to the reference (ties keep `self`).
    pub fn min(self, that: RoutePoint) -> RoutePoint {
        if self.distance_to_reference <= that.distance_to_reference {
            self
        } else {
            that
        }
    }

    /// [`RoutePoint::min`] against a candidate given by its parts, avoiding
    /// construction when `self` is already closer.
    pub fn min_with(self, point: Point, position: f64, distance_to_reference: f64) -> RoutePoint {
        self.min(RoutePoint {
            point,
            position,
            distance_to_reference,
        })
    }
}

/// A computed route: either one contiguous path or a concatenation of
/// sub-routes.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Single(SingleRoute),
    Multi(MultiRoute),
}

impl Route {
    /// Length of the route, in meters.
    pub fn length(&self) -> f64 {
        match self {
            Route::Single(route) => route.length(),
            Route::Multi(route) => route.length(),
        }
    }

    /// All traversed edges, flattened in order.
    pub fn edges(&self) -> Vec<Edge> {
        match self {
            Route::Single(route) => route.edges().to_vec(),
            Route::Multi(route) => route.edges(),
        }
    }

    /// All edge endpoints in order: N edges yield N+1 points, with composite
    /// seam points appearing once.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Route::Single(route) => route.points().to_vec(),
            Route::Multi(route) => route.points(),
        }
    }

    /// The point at `position` meters from the start (clamped into
    /// `[0, length]`).
    pub fn point_at(&self, position: f64) -> Point {
        match self {
            Route::Single(route) => route.point_at(position),
            Route::Multi(route) => route.point_at(position),
        }
    }

    /// The elevation at `position` (clamped); NaN over profileless edges.
    pub fn elevation_at(&self, position: f64) -> f64 {
        match self {
            Route::Single(route) => route.elevation_at(position),
            Route::Multi(route) => route.elevation_at(position),
        }
    }

    /// The graph node of the route closest to `position` (clamped).
    pub fn node_closest_to(&self, position: f64) -> u32 {
        match self {
            Route::Single(route) => route.node_closest_to(position),
            Route::Multi(route) => route.node_closest_to(position),
        }
    }

    /// Index of the leaf sub-route containing `position` (clamped); always 0
    /// for a single route.
    pub fn index_of_segment_at(&self, position: f64) -> usize {
        match self {
            Route::Single(_) => 0,
            Route::Multi(route) => route.index_of_segment_at(position),
        }
    }

    /// The point of the route closest to the reference `point`.
    pub fn point_closest_to(&self, point: Point) -> RoutePoint {
        match self {
            Route::Single(route) => route.point_closest_to(point),
            Route::Multi(route) => route.point_closest_to(point),
        }
    }
}

/// A route made of one contiguous, non-empty edge sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRoute {
    edges: Vec<Edge>,
    /// Cumulative positions of the edge endpoints: `positions[i]` is where
    /// edge i starts, `positions[edges.len()]` is the route length.
    positions: Vec<f64>,
    points: Vec<Point>,
}

/// Where a position falls in the cumulative-position array.
enum Location {
    /// Exactly on breakpoint i (0 = route start, `edges.len()` = route end).
    AtBreakpoint(usize),
    /// Strictly inside edge i.
    WithinEdge(usize),
}

impl SingleRoute {
    /// Build a route from its edges.
    ///
    /// # Panics
    ///
    /// Panics if `edges` is empty.
    pub fn new(edges: Vec<Edge>) -> Self {
        assert!(!edges.is_empty(), "a route needs at least one edge");
        let mut positions = Vec::with_capacity(edges.len() + 1);
        positions.push(0.0);
        for edge in &edges {
            positions.push(positions[positions.len() - 1] + edge.length);
        }
        let mut points: Vec<Point> = edges.iter().map(|edge| edge.from_point).collect();
        points.push(edges[edges.len() - 1].to_point);
        Self {
            edges,
            positions,
            points,
        }
    }

    pub fn length(&self) -> f64 {
        self.positions[self.positions.len() - 1]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point_at(&self, position: f64) -> Point {
        let position = math::clamp_f64(0.0, position, self.length());
        match self.locate(position) {
            Location::AtBreakpoint(i) if i == self.edges.len() => self.edges[i - 1].to_point,
            Location::AtBreakpoint(i) => self.edges[i].from_point,
            Location::WithinEdge(i) => self.edges[i].point_at(position - self.positions[i]),
        }
    }

    pub fn elevation_at(&self, position: f64) -> f64 {
        let position = math::clamp_f64(0.0, position, self.length());
        match self.locate(position) {
            Location::AtBreakpoint(i) if i == self.edges.len() => {
                let last = &self.edges[i - 1];
                last.elevation_at(last.length)
            }
            // A breakpoint belongs to the edge that begins there.
            Location::AtBreakpoint(i) => self.edges[i].elevation_at(0.0),
            Location::WithinEdge(i) => self.edges[i].elevation_at(position - self.positions[i]),
        }
    }

    pub fn node_closest_to(&self, position: f64) -> u32 {
        let position = math::clamp_f64(0.0, position, self.length());
        match self.locate(position) {
            Location::AtBreakpoint(i) if i == self.edges.len() => self.edges[i - 1].to_node_id,
            Location::AtBreakpoint(i) => self.edges[i].from_node_id,
            Location::WithinEdge(i) => {
                let to_left = position - self.positions[i];
                let to_right = self.positions[i + 1] - position;
                if to_left < to_right {
                    self.edges[i].from_node_id
                } else {
                    self.edges[i].to_node_id
                }
            }
        }
    }

    pub fn point_closest_to(&self, point: Point) -> RoutePoint {
        let mut best = RoutePoint::NONE;
        for (i, edge) in self.edges.iter().enumerate() {
            let on_edge = math::clamp_f64(0.0, edge.position_closest_to(point), edge.length);
            let candidate = edge.point_at(on_edge);
            best = best.min_with(
                candidate,
                self.positions[i] + on_edge,
                candidate.distance_to(point),
            );
        }
        best
    }

    fn locate(&self, position: f64) -> Location {
        match self
            .positions
            .binary_search_by(|p| p.partial_cmp(&position).expect("positions are not NaN"))
        {
            Ok(i) => Location::AtBreakpoint(i),
            Err(i) => Location::WithinEdge(i - 1),
        }
    }
}

/// A route concatenating sub-routes end-to-end.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiRoute {
    segments: Vec<Route>,
}

impl MultiRoute {
    /// Build a composite route from its sub-routes.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    pub fn new(segments: Vec<Route>) -> Self {
        assert!(!segments.is_empty(), "a composite route needs sub-routes");
        Self { segments }
    }

    pub fn segments(&self) -> &[Route] {
        &self.segments
    }

    pub fn length(&self) -> f64 {
        self.segments.iter().map(Route::length).sum()
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.segments.iter().flat_map(Route::edges).collect()
    }

    pub fn points(&self) -> Vec<Point> {
        // Only the first sub-route contributes its leading point; every
        // other sub-route starts where its predecessor ended.
        let mut points = vec![self.segments[0].points()[0]];
        for segment in &self.segments {
            points.extend(segment.points().into_iter().skip(1));
        }
        points
    }

    pub fn point_at(&self, position: f64) -> Point {
        let position = math::clamp_f64(0.0, position, self.length());
        let (index, local) = self.leaf_at(position);
        self.segments[index].point_at(local)
    }

    pub fn elevation_at(&self, position: f64) -> f64 {
        let position = math::clamp_f64(0.0, position, self.length());
        let (index, local) = self.leaf_at(position);
        self.segments[index].elevation_at(local)
    }

    pub fn node_closest_to(&self, position: f64) -> u32 {
        let position = math::clamp_f64(0.0, position, self.length());
        let (index, local) = self.leaf_at(position);
        self.segments[index].node_closest_to(local)
    }

    pub fn index_of_segment_at(&self, position: f64) -> usize {
        let mut position = math::clamp_f64(0.0, position, self.length());
        let mut index = 0;
        for segment in &self.segments {
            if segment.length() < position {
                position -= segment.length();
                index += segment.index_of_segment_at(segment.length()) + 1;
            } else {
                index += segment.index_of_segment_at(position);
                break;
            }
        }
        index
    }

    pub fn point_closest_to(&self, point: Point) -> RoutePoint {
        let mut best = RoutePoint::NONE;
        let mut preceding = 0.0;
        for segment in &self.segments {
            best = best.min(
                segment
                    .point_closest_to(point)
                    .with_position_shifted_by(preceding),
            );
            preceding += segment.length();
        }
        best
    }

    /// The direct sub-route containing `position` and the position within it.
    fn leaf_at(&self, position: f64) -> (usize, f64) {
        let mut position = position;
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.length() < position && i + 1 < self.segments.len() {
                position -= segment.length();
            } else {
                return (i, position);
            }
        }
        unreachable!("segments is non-empty")
    }
}
