//! Small numeric helpers shared by the decoding and routing layers.

/// Ceiling division of two non-negative integers.
///
/// # Panics
///
/// Panics if `x < 0` or `y <= 0`.
pub fn ceil_div(x: i32, y: i32) -> i32 {
    assert!(x >= 0 && y > 0, "ceil_div requires x >= 0 and y > 0");
    (x + y - 1) / y
}

/// Linear interpolation: the y-coordinate at `x` of the line through
/// `(0, y0)` and `(1, y1)`. Uses a fused multiply-add.
pub fn interpolate(y0: f64, y1: f64, x: f64) -> f64 {
    (y1 - y0).mul_add(x, y0)
}

/// Clamp `v` into `[min, max]`.
///
/// # Panics
///
/// Panics if `max < min`.
pub fn clamp_i32(min: i32, v: i32, max: i32) -> i32 {
    assert!(max >= min, "clamp bounds inverted");
    v.max(min).min(max)
}

/// Clamp `v` into `[min, max]`.
///
/// # Panics
///
/// Panics if `max < min`.
pub fn clamp_f64(min: f64, v: f64, max: f64) -> f64 {
    assert!(max >= min, "clamp bounds inverted");
    v.max(min).min(max)
}

/// Inverse hyperbolic sine, computed as `ln(x + sqrt(1 + x^2))`.
///
/// Loses precision for large negative x; kept in this form to match the
/// values baked into existing tile/projection data.
pub fn asinh(x: f64) -> f64 {
    (x + (1.0 + x * x).sqrt()).ln()
}

/// Dot product of the vectors `(u_x, u_y)` and `(v_x, v_y)`.
pub fn dot_product(u_x: f64, u_y: f64, v_x: f64, v_y: f64) -> f64 {
    u_x * v_x + u_y * v_y
}

/// Squared norm of the vector `(u_x, u_y)`.
pub fn squared_norm(u_x: f64, u_y: f64) -> f64 {
    dot_product(u_x, u_y, u_x, u_y)
}

/// Norm of the vector `(u_x, u_y)`.
pub fn norm(u_x: f64, u_y: f64) -> f64 {
    squared_norm(u_x, u_y).sqrt()
}

/// Signed length of the orthogonal projection of the vector AP onto the
/// vector AB. Negative when P projects before A, larger than |AB| when it
/// projects past B.
pub fn projection_length(a_x: f64, a_y: f64, b_x: f64, b_y: f64, p_x: f64, p_y: f64) -> f64 {
    dot_product(p_x - a_x, p_y - a_y, b_x - a_x, b_y - a_y) / norm(b_x - a_x, b_y - a_y)
}
