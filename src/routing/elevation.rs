//! Elevation profile of a route.
//!
//! A profile is built by resampling the route's edge elevations at a regular
//! step. Edges without elevation data yield NaN samples; the builder patches
//! those holes so the finished profile is total over `[0, length]`.

use crate::functions::ProfileFunction;
use crate::math;

use super::route::Route;

/// The elevation of a route as a function of position, with its summary
/// statistics precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationProfile {
    length: f64,
    function: ProfileFunction,
    min_elevation: f64,
    max_elevation: f64,
    total_ascent: f64,
    total_descent: f64,
}

impl ElevationProfile {
    /// Build a profile of the given length from evenly spaced samples.
    ///
    /// # Panics
    ///
    /// Panics if `length` is not strictly positive or there are fewer than
    /// two samples.
    pub fn new(length: f64, samples: Vec<f32>) -> Self {
        assert!(length > 0.0, "profile length must be positive");
        assert!(samples.len() >= 2, "a profile needs at least two samples");

        let mut min_elevation = f64::INFINITY;
        let mut max_elevation = f64::NEG_INFINITY;
        let mut total_ascent = 0.0;
        let mut total_descent = 0.0;
        for pair in samples.windows(2) {
            let difference = f64::from(pair[1]) - f64::from(pair[0]);
            if difference > 0.0 {
                total_ascent += difference;
            } else {
                total_descent -= difference;
            }
        }
        for &sample in &samples {
            min_elevation = min_elevation.min(f64::from(sample));
            max_elevation = max_elevation.max(f64::from(sample));
        }

        Self {
            length,
            function: ProfileFunction::sampled(samples, length),
            min_elevation,
            max_elevation,
            total_ascent,
            total_descent,
        }
    }

    /// Length of the profiled route, in meters.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    pub fn max_elevation(&self) -> f64 {
        self.max_elevation
    }

    /// Sum of the positive sample-to-sample differences.
    pub fn total_ascent(&self) -> f64 {
        self.total_ascent
    }

    /// Sum of the negative sample-to-sample differences, as a positive
    /// number.
    pub fn total_descent(&self) -> f64 {
        self.total_descent
    }

    /// Elevation at `position` (clamped into `[0, length]`).
    pub fn elevation_at(&self, position: f64) -> f64 {
        self.function.apply(position)
    }
}

/// Sample `route` every at most `max_step_length` meters and build its
/// elevation profile, interpolating across edges without elevation data.
///
/// # Panics
///
/// Panics if `max_step_length` is not strictly positive, or the route has
/// zero length.
pub fn elevation_profile(route: &Route, max_step_length: f64) -> ElevationProfile {
    assert!(max_step_length > 0.0, "step length must be positive");
    let length = route.length();
    let sample_count = (length / max_step_length).ceil() as usize + 1;
    let step = length / (sample_count - 1) as f64;

    let mut samples: Vec<f32> = (0..sample_count)
        .map(|i| route.elevation_at(step * i as f64) as f32)
        .collect();
    fill_holes(&mut samples);
    ElevationProfile::new(length, samples)
}

/// Replace NaN samples in place: leading and trailing runs copy the nearest
/// valid sample, interior runs are linearly interpolated between their
/// valid neighbours. An all-NaN array becomes all zeros.
fn fill_holes(samples: &mut [f32]) {
    let first_valid = match samples.iter().position(|s| !s.is_nan()) {
        Some(index) => index,
        None => {
            samples.fill(0.0);
            return;
        }
    };
    let last_valid = samples.iter().rposition(|s| !s.is_nan()).unwrap_or(0);

    let head = samples[first_valid];
    samples[..first_valid].fill(head);
    let tail = samples[last_valid];
    samples[last_valid + 1..].fill(tail);

    let mut i = first_valid + 1;
    while i < last_valid {
        if !samples[i].is_nan() {
            i += 1;
            continue;
        }
        let run_start = i;
        let mut run_end = i;
        while samples[run_end].is_nan() {
            run_end += 1;
        }
        let before = f64::from(samples[run_start - 1]);
        let after = f64::from(samples[run_end]);
        let span = (run_end - run_start + 1) as f64;
        for (k, sample) in samples[run_start..run_end].iter_mut().enumerate() {
            *sample = math::interpolate(before, after, (k + 1) as f64 / span) as f32;
        }
        i = run_end + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::ProfileFunction;
    use crate::geo::{bounds, Point};
    use crate::routing::edge::Edge;
    use crate::routing::route::SingleRoute;

    fn route_with_profiles(profiles: Vec<ProfileFunction>, edge_length: f64) -> Route {
        let n = bounds::MIN_N + 1000.0;
        let edges = profiles
            .into_iter()
            .enumerate()
            .map(|(i, profile)| {
                let e = bounds::MIN_E + 1000.0 + edge_length * i as f64;
                Edge {
                    from_node_id: i as u32,
                    to_node_id: i as u32 + 1,
                    from_point: Point::new(e, n),
                    to_point: Point::new(e + edge_length, n),
                    length: edge_length,
                    profile,
                }
            })
            .collect();
        Route::Single(SingleRoute::new(edges))
    }

    #[test]
    fn statistics_are_computed_from_the_samples() {
        let profile = ElevationProfile::new(30.0, vec![100.0, 120.0, 110.0, 130.0]);
        assert_eq!(profile.length(), 30.0);
        assert_eq!(profile.min_elevation(), 100.0);
        assert_eq!(profile.max_elevation(), 130.0);
        assert_eq!(profile.total_ascent(), 40.0);
        assert_eq!(profile.total_descent(), 10.0);
        assert_eq!(profile.elevation_at(0.0), 100.0);
        assert_eq!(profile.elevation_at(15.0), 115.0);
        // Clamped at both ends.
        assert_eq!(profile.elevation_at(-5.0), 100.0);
        assert_eq!(profile.elevation_at(50.0), 130.0);
    }

    #[test]
    fn interior_holes_are_interpolated_and_edges_extended() {
        let mut samples = vec![
            f32::NAN,
            f32::NAN,
            10.0,
            f32::NAN,
            20.0,
            f32::NAN,
            f32::NAN,
        ];
        fill_holes(&mut samples);
        assert_eq!(samples, vec![10.0, 10.0, 10.0, 15.0, 20.0, 20.0, 20.0]);
    }

    #[test]
    fn longer_holes_are_interpolated_evenly() {
        let mut samples = vec![0.0, f32::NAN, f32::NAN, f32::NAN, 40.0];
        fill_holes(&mut samples);
        assert_eq!(samples, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn all_nan_becomes_a_flat_zero_profile() {
        let route = route_with_profiles(vec![ProfileFunction::constant(f64::NAN)], 100.0);
        let profile = elevation_profile(&route, 10.0);
        assert_eq!(profile.min_elevation(), 0.0);
        assert_eq!(profile.max_elevation(), 0.0);
        assert_eq!(profile.total_ascent(), 0.0);
        assert_eq!(profile.elevation_at(42.0), 0.0);
    }

    #[test]
    fn sampling_respects_the_maximum_step() {
        // 100 m at a 30 m max step: 5 samples, 25 m apart.
        let route = route_with_profiles(
            vec![ProfileFunction::sampled(vec![0.0, 100.0], 100.0)],
            100.0,
        );
        let profile = elevation_profile(&route, 30.0);
        assert_eq!(profile.elevation_at(25.0), 25.0);
        assert_eq!(profile.elevation_at(100.0), 100.0);
        assert_eq!(profile.total_ascent(), 100.0);
        assert_eq!(profile.total_descent(), 0.0);
    }

    #[test]
    fn profileless_edges_between_profiled_ones_are_bridged() {
        let profiled = ProfileFunction::sampled(vec![100.0, 100.0], 100.0);
        let missing = ProfileFunction::constant(f64::NAN);
        let higher = ProfileFunction::sampled(vec![200.0, 200.0], 100.0);
        let route = route_with_profiles(vec![profiled, missing, higher], 100.0);
        let profile = elevation_profile(&route, 50.0);
        // Samples over the middle edge are NaN and get bridged between the
        // last 100 m sample and the first 200 m one.
        assert_eq!(profile.elevation_at(50.0), 100.0);
        assert_eq!(profile.elevation_at(250.0), 200.0);
        assert!(profile.elevation_at(150.0) > 100.0);
        assert!(profile.elevation_at(150.0) < 200.0);
    }

    #[test]
    #[should_panic]
    fn rejects_a_non_positive_step() {
        let route = route_with_profiles(vec![ProfileFunction::constant(0.0)], 100.0);
        elevation_profile(&route, 0.0);
    }

    #[test]
    #[should_panic]
    fn rejects_too_few_samples() {
        ElevationProfile::new(10.0, vec![1.0]);
    }
}
