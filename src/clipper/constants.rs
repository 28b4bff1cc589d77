use crate::geometry::point::Point64;

/// Largest accepted coordinate magnitude. Differences of two coordinates
/// stay inside i64 and their products inside i128.
pub const MAX_COORD: i64 = i64::MAX >> 2;

pub const MIN_COORD: i64 = -MAX_COORD;

/// |dx| of a horizontal edge; heading right is negative.
pub const HORIZONTAL_DX: f64 = f64::MAX;

/// Edges flatter than this (|dx|) get intersections projected onto them
/// when the computed point falls outside the scanbeam.
pub const NEAR_HORIZONTAL_DX: f64 = 100.0;

pub const JOIN_LEFT_DIST_SQRD: f64 = 0.25;

pub const JOIN_RIGHT_DIST_SQRD: f64 = 0.35;

pub fn is_in_range(point: &Point64) -> bool {
    (MIN_COORD..=MAX_COORD).contains(&point.x) && (MIN_COORD..=MAX_COORD).contains(&point.y)
}
