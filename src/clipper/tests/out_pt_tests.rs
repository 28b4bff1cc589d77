use crate::clipper::out_pt::OutPt;
use crate::geometry::point::{path_from_coords, Point64};

/// Links `coords` into one ring of record `out_rec`, returning its first point.
fn ring(out_pt: &mut OutPt, out_rec: usize, coords: &[i64]) -> usize {
    let points = path_from_coords(coords);
    let first = out_pt.create(points[0], out_rec);
    let mut last = first;

    for point in &points[1..] {
        last = out_pt.insert_between(*point, out_rec, last, first);
    }

    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_links() {
        let mut out_pt = OutPt::new();
        let op = ring(&mut out_pt, 0, &[0, 0, 10, 0, 10, 10, 0, 10]);

        assert_eq!(out_pt.count(op), 4);
        assert_eq!(out_pt.len(), 4);
        assert_eq!(out_pt[out_pt[op].prev].point, Point64::new(0, 10));
        assert_eq!(
            out_pt.ring_points(op),
            path_from_coords(&[0, 0, 10, 0, 10, 10, 0, 10])
        );
    }

    #[test]
    fn test_single_point_ring() {
        let mut out_pt = OutPt::default();
        let op = out_pt.create(Point64::new(3, 4), 2);

        assert_eq!(out_pt[op].next, op);
        assert_eq!(out_pt[op].prev, op);
        assert_eq!(out_pt[op].out_rec, 2);
        assert!(!out_pt[op].is_horz);
        assert!(!out_pt.is_valid_closed_path(Some(op)));
        assert_eq!(out_pt.build_path(op, false, true), None);
    }

    #[test]
    fn test_area() {
        let mut out_pt = OutPt::new();
        let square = ring(&mut out_pt, 0, &[0, 0, 10, 0, 10, 10, 0, 10]);
        let reversed = ring(&mut out_pt, 1, &[0, 10, 10, 10, 10, 0, 0, 0]);

        assert_eq!(out_pt.area(square), 100.0);
        assert_eq!(out_pt.area(reversed), -100.0);
    }

    #[test]
    fn test_duplicate_and_dispose() {
        let mut out_pt = OutPt::new();
        let op = ring(&mut out_pt, 0, &[0, 0, 10, 0, 10, 10, 0, 10]);

        let after = out_pt.duplicate(op, true);
        assert_eq!(out_pt[op].next, after);
        assert_eq!(out_pt[after].point, Point64::new(0, 0));

        let before = out_pt.duplicate(op, false);
        assert_eq!(out_pt[op].prev, before);
        assert_eq!(out_pt.count(op), 6);

        let next = out_pt.dispose(after);
        assert_eq!(out_pt[next].point, Point64::new(10, 0));
        assert_eq!(out_pt[op].next, next);
        assert_eq!(out_pt.count(op), 5);
    }

    #[test]
    fn test_build_path_directions() {
        let mut out_pt = OutPt::new();
        let op = ring(&mut out_pt, 0, &[0, 0, 10, 0, 10, 10, 0, 10]);

        assert_eq!(
            out_pt.build_path(op, false, false),
            Some(path_from_coords(&[10, 0, 10, 10, 0, 10, 0, 0]))
        );
        assert_eq!(
            out_pt.build_path(op, true, false),
            Some(path_from_coords(&[0, 0, 0, 10, 10, 10, 10, 0]))
        );
    }

    #[test]
    fn test_build_path_skips_repeats() {
        let mut out_pt = OutPt::new();
        let op = ring(&mut out_pt, 0, &[0, 0, 10, 0, 10, 0, 10, 10, 0, 10]);

        assert_eq!(out_pt.build_path(op, false, false).map(|path| path.len()), Some(4));
    }

    #[test]
    fn test_build_path_degenerate() {
        let mut out_pt = OutPt::new();
        let line = ring(&mut out_pt, 0, &[0, 0, 10, 0]);
        let tiny = ring(&mut out_pt, 1, &[0, 0, 1, 0, 1, 1]);

        assert_eq!(out_pt.build_path(line, false, false), None);
        assert_eq!(
            out_pt.build_path(line, false, true),
            Some(path_from_coords(&[10, 0, 0, 0]))
        );
        assert!(out_pt.is_very_small_triangle(tiny));
        assert_eq!(out_pt.build_path(tiny, false, false), None);
    }

    #[test]
    fn test_set_out_rec() {
        let mut out_pt = OutPt::new();
        let op = ring(&mut out_pt, 0, &[0, 0, 10, 0, 10, 10]);

        out_pt.set_out_rec(op, 7);

        assert!(out_pt.ring(op).all(|index| out_pt[index].out_rec == 7));
    }

    #[test]
    fn test_ring_inside_ring() {
        let mut out_pt = OutPt::new();
        let outer = ring(&mut out_pt, 0, &[0, 0, 100, 0, 100, 100, 0, 100]);
        let inner = ring(&mut out_pt, 1, &[20, 20, 80, 20, 80, 80, 20, 80]);
        let apart = ring(&mut out_pt, 2, &[200, 0, 300, 0, 300, 100, 200, 100]);

        assert!(out_pt.ring_inside_ring(inner, outer));
        assert!(!out_pt.ring_inside_ring(outer, inner));
        assert!(!out_pt.ring_inside_ring(apart, outer));
    }

    #[test]
    fn test_ring_inside_ring_sharing_edges() {
        let mut out_pt = OutPt::new();
        let outer = ring(&mut out_pt, 0, &[0, 0, 100, 0, 100, 100, 0, 100]);
        // all vertices on the outer boundary but one
        let inner = ring(&mut out_pt, 1, &[0, 0, 100, 0, 50, 50]);

        assert!(out_pt.ring_inside_ring(inner, outer));
    }

    #[test]
    fn test_clean_path() {
        let mut out_pt = OutPt::new();
        let op = ring(&mut out_pt, 0, &[0, 0, 5, 0, 10, 0, 10, 10, 0, 10]);

        assert_eq!(out_pt.clean_path(op), path_from_coords(&[0, 0, 10, 0, 10, 10, 0, 10]));
    }
}
