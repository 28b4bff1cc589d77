use crate::clipper::join::Join;
use crate::clipper::out_pt::OutPt;
use crate::clipper::out_rec::OutRec;
use crate::geometry::point::{path_from_coords, Point64};

/// Adds a finished ring of `coords` and returns the index of each point.
fn add_ring(out_rec: &mut OutRec, out_pt: &mut OutPt, coords: &[i64]) -> Vec<usize> {
    let rec = out_rec.create();
    let points = path_from_coords(coords);
    let first = out_pt.create(points[0], rec);
    let mut ops = vec![first];

    for point in &points[1..] {
        let last = ops[ops.len() - 1];
        ops.push(out_pt.insert_between(*point, rec, last, first));
    }

    out_rec[rec].pts = Some(first);
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_overlapping_segments_join() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        // bottom edge of the first runs right to left, top edge of the
        // second left to right, overlapping on x = 5..10
        let first = add_ring(&mut out_rec, &mut out_pt, &[0, 0, 10, 0, 10, 10, 0, 10]);
        let second = add_ring(&mut out_rec, &mut out_pt, &[5, 10, 15, 10, 15, 20, 5, 20]);

        let mut join = Join::new();
        join.add_segment(first[2]);
        join.add_segment(second[0]);
        assert!(join.has_segments());

        join.convert_segments(&mut out_pt, &out_rec);

        assert!(!join.has_segments());
        assert_eq!(join.join_count(), 1);
        assert!(out_pt[first[3]].is_horz);
        assert!(out_pt[second[0]].is_horz);

        let joins = join.take_joins();
        assert_eq!(out_pt[joins[0].op1].point, Point64::new(5, 10));
        assert_eq!(out_pt[joins[0].op2].point, Point64::new(0, 10));
        assert_eq!(out_pt.count(second[0]), 5);
        assert_eq!(out_pt.count(first[0]), 5);
        assert_eq!(join.join_count(), 0);
    }

    #[test]
    fn test_same_direction_segments_do_not_join() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        let first = add_ring(&mut out_rec, &mut out_pt, &[0, 0, 10, 0, 10, 10, 0, 10]);
        let second = add_ring(&mut out_rec, &mut out_pt, &[5, 10, 5, 20, 15, 20, 15, 10]);

        let mut join = Join::default();
        join.add_segment(first[2]);
        join.add_segment(second[0]);
        join.convert_segments(&mut out_pt, &out_rec);

        assert_eq!(join.join_count(), 0);
    }

    #[test]
    fn test_disjoint_segments_do_not_join() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        let first = add_ring(&mut out_rec, &mut out_pt, &[0, 0, 10, 0, 10, 10, 0, 10]);
        let second = add_ring(&mut out_rec, &mut out_pt, &[20, 10, 30, 10, 30, 20, 20, 20]);

        let mut join = Join::new();
        join.add_segment(first[2]);
        join.add_segment(second[0]);
        join.convert_segments(&mut out_pt, &out_rec);

        assert_eq!(join.join_count(), 0);
    }

    #[test]
    fn test_point_without_horizontal_is_dropped() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        let diamond = add_ring(&mut out_rec, &mut out_pt, &[5, 0, 10, 5, 5, 10, 0, 5]);

        let mut join = Join::new();
        join.add_segment(diamond[0]);
        join.add_segment(diamond[2]);
        join.convert_segments(&mut out_pt, &out_rec);

        assert!(!join.has_segments());
        assert_eq!(join.join_count(), 0);
        assert!(diamond.iter().all(|&op| !out_pt[op].is_horz));
    }

    #[test]
    fn test_clear() {
        let mut join = Join::new();
        join.add_segment(0);
        join.clear();

        assert!(!join.has_segments());
        assert!(join.take_joins().is_empty());
    }
}
