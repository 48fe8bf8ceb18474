//! Planar geometry for the routed coordinate system.
//!
//! Coordinates are projected east/north meters inside a fixed bounding
//! rectangle; the sector index partitions exactly this rectangle, so points
//! outside it cannot exist in a well-formed graph.

use crate::math;

/// Fixed bounding rectangle of the coordinate system (projected meters).
pub mod bounds {
    /// Smallest east coordinate.
    pub const MIN_E: f64 = 2_485_000.0;
    /// Largest east coordinate.
    pub const MAX_E: f64 = 2_834_000.0;
    /// Smallest north coordinate.
    pub const MIN_N: f64 = 1_075_000.0;
    /// Largest north coordinate.
    pub const MAX_N: f64 = 1_296_000.0;
    /// Width of the rectangle in meters.
    pub const WIDTH: f64 = MAX_E - MIN_E;
    /// Height of the rectangle in meters.
    pub const HEIGHT: f64 = MAX_N - MIN_N;

    /// Whether `(e, n)` lies inside the rectangle (borders included).
    pub fn contains_en(e: f64, n: f64) -> bool {
        (MIN_E..=MAX_E).contains(&e) && (MIN_N..=MAX_N).contains(&n)
    }
}

/// A point in the projected east/north plane, in meters.
///
/// Prefer [`Point::new`], which checks the graph bounds. The fields are public
/// so value-type composition stays cheap, not as an invitation to build
/// out-of-bounds points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub e: f64,
    pub n: f64,
}

impl Point {
    /// Build a point, checking it lies inside the graph bounds.
    ///
    /// # Panics
    ///
    /// Panics if `(e, n)` is outside [`bounds`].
    pub fn new(e: f64, n: f64) -> Self {
        assert!(
            bounds::contains_en(e, n),
            "point ({e}, {n}) outside graph bounds"
        );
        Self { e, n }
    }

    /// Squared distance to `that`, in square meters.
    pub fn squared_distance_to(self, that: Point) -> f64 {
        math::squared_norm(self.e - that.e, self.n - that.n)
    }

    /// Distance to `that`, in meters.
    pub fn distance_to(self, that: Point) -> f64 {
        self.squared_distance_to(that).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contain_interior_and_border() {
        assert!(bounds::contains_en(2_600_000.0, 1_200_000.0));
        assert!(bounds::contains_en(bounds::MIN_E, bounds::MIN_N));
        assert!(bounds::contains_en(bounds::MAX_E, bounds::MAX_N));
        assert!(!bounds::contains_en(bounds::MIN_E - 1.0, 1_200_000.0));
        assert!(!bounds::contains_en(2_600_000.0, bounds::MAX_N + 1.0));
    }

    #[test]
    fn distances() {
        let a = Point::new(2_600_000.0, 1_200_000.0);
        let b = Point::new(2_600_003.0, 1_200_004.0);
        assert_eq!(a.squared_distance_to(b), 25.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    #[should_panic]
    fn new_rejects_out_of_bounds() {
        Point::new(0.0, 0.0);
    }
}
