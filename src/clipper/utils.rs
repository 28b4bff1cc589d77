use crate::clipper::enums::PointInPolygonResult;
use crate::geometry::point::Point64;
use crate::utils::round::ClipperRound;

#[inline(always)]
fn wide(value: i64) -> i128 {
    value as i128
}

/// Cross product of (p2 - p1) and (p3 - p2), in floating point.
pub fn cross_product(p1: Point64, p2: Point64, p3: Point64) -> f64 {
    (p2.x - p1.x) as f64 * (p3.y - p2.y) as f64 - (p2.y - p1.y) as f64 * (p3.x - p2.x) as f64
}

pub fn cross_sign(p1: Point64, p2: Point64, p3: Point64) -> i32 {
    let a = wide(p2.x - p1.x) * wide(p3.y - p2.y);
    let b = wide(p2.y - p1.y) * wide(p3.x - p2.x);

    match a.cmp(&b) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
    }
}

/// Dot product of (p2 - p1) and (p3 - p2).
pub fn dot_product(p1: Point64, p2: Point64, p3: Point64) -> f64 {
    (p2.x - p1.x) as f64 * (p3.x - p2.x) as f64 + (p2.y - p1.y) as f64 * (p3.y - p2.y) as f64
}

pub fn is_collinear(p1: Point64, shared: Point64, p2: Point64) -> bool {
    cross_sign(p1, shared, p2) == 0
}

pub fn perpendic_dist_from_line_sqrd(point: Point64, line1: Point64, line2: Point64) -> f64 {
    let a = (point.x - line1.x) as f64;
    let b = (point.y - line1.y) as f64;
    let c = (line2.x - line1.x) as f64;
    let d = (line2.y - line1.y) as f64;

    if c == 0.0 && d == 0.0 {
        return 0.0;
    }

    let cross = a * d - c * b;
    cross * cross / (c * c + d * d)
}

/// Doubled area of a triangle, sign follows `geometry::polygon::area`.
pub fn area_triangle(p1: Point64, p2: Point64, p3: Point64) -> f64 {
    (p3.y + p1.y) as f64 * (p3.x - p1.x) as f64
        + (p1.y + p2.y) as f64 * (p1.x - p2.x) as f64
        + (p2.y + p3.y) as f64 * (p2.x - p3.x) as f64
}

pub fn pts_really_close(p1: Point64, p2: Point64) -> bool {
    (p1.x - p2.x).abs() < 2 && (p1.y - p2.y).abs() < 2
}

/// Intersection of the infinite lines through the two segments, clamped
/// to the first segment. None when they are parallel.
pub fn segment_intersect_pt(
    ln1a: Point64,
    ln1b: Point64,
    ln2a: Point64,
    ln2b: Point64,
) -> Option<Point64> {
    let dx1 = (ln1b.x - ln1a.x) as f64;
    let dy1 = (ln1b.y - ln1a.y) as f64;
    let dx2 = (ln2b.x - ln2a.x) as f64;
    let dy2 = (ln2b.y - ln2a.y) as f64;

    let det = dy1 * dx2 - dy2 * dx1;
    if det == 0.0 {
        return None;
    }

    let t = ((ln1a.x - ln2a.x) as f64 * dy2 - (ln1a.y - ln2a.y) as f64 * dx2) / det;

    if t <= 0.0 {
        Some(ln1a)
    } else if t >= 1.0 {
        Some(ln1b)
    } else {
        Some(Point64::new(
            ln1a.x + (t * dx1).clipper_rounded() as i64,
            ln1a.y + (t * dy1).clipper_rounded() as i64,
        ))
    }
}

pub fn closest_point_on_segment(off_pt: Point64, seg1: Point64, seg2: Point64) -> Point64 {
    if seg1 == seg2 {
        return seg1;
    }

    let dx = (seg2.x - seg1.x) as f64;
    let dy = (seg2.y - seg1.y) as f64;
    let q = ((off_pt.x - seg1.x) as f64 * dx + (off_pt.y - seg1.y) as f64 * dy) / (dx * dx + dy * dy);
    let q = q.clamp(0.0, 1.0);

    Point64::new(
        seg1.x + (q * dx).clipper_rounded() as i64,
        seg1.y + (q * dy).clipper_rounded() as i64,
    )
}

/// True when the segments cross at a point interior to both.
pub fn segments_intersect(seg1a: Point64, seg1b: Point64, seg2a: Point64, seg2b: Point64) -> bool {
    cross_sign(seg1a, seg2a, seg2b) * cross_sign(seg1b, seg2a, seg2b) < 0
        && cross_sign(seg2a, seg1a, seg1b) * cross_sign(seg2b, seg1a, seg1b) < 0
}

fn is_on_segment(point: Point64, seg1: Point64, seg2: Point64) -> bool {
    cross_sign(seg1, seg2, point) == 0
        && point.x >= seg1.x.min(seg2.x)
        && point.x <= seg1.x.max(seg2.x)
        && point.y >= seg1.y.min(seg2.y)
        && point.y <= seg1.y.max(seg2.y)
}

pub fn point_in_polygon(point: Point64, polygon: &[Point64]) -> PointInPolygonResult {
    let count = polygon.len();
    if count < 3 {
        return PointInPolygonResult::IsOutside;
    }

    let mut is_inside = false;
    let mut prev = polygon[count - 1];

    for &curr in polygon {
        if is_on_segment(point, prev, curr) {
            return PointInPolygonResult::IsOn;
        }

        if (curr.y > point.y) != (prev.y > point.y) {
            // is point left of the edge's crossing with the horizontal through it
            let lhs = wide(point.x - prev.x) * wide(curr.y - prev.y);
            let rhs = wide(point.y - prev.y) * wide(curr.x - prev.x);
            let is_left = if curr.y > prev.y { lhs < rhs } else { lhs > rhs };

            if is_left {
                is_inside = !is_inside;
            }
        }

        prev = curr;
    }

    if is_inside {
        PointInPolygonResult::IsInside
    } else {
        PointInPolygonResult::IsOutside
    }
}
