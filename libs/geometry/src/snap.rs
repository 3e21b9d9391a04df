//! Snap to the nearest multiple of a grid size.

/// Snaps `x` to the nearest multiple of `grid`.
///
/// # Example
///
/// ```
/// # use geometry::snap::snap_to_grid;
/// assert_eq!(snap_to_grid(1.23, 0.5), 1.);
/// assert_eq!(snap_to_grid(-0.3, 0.25), -0.25);
/// ```
pub fn snap_to_grid(x: f64, grid: f64) -> f64 {
    debug_assert!(grid > 0.);
    (x / grid).round() * grid
}
