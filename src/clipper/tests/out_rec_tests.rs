use crate::clipper::out_pt::OutPt;
use crate::clipper::out_rec::OutRec;
use crate::geometry::point::path_from_coords;

/// New record holding a ring of `coords`.
fn add_ring(out_rec: &mut OutRec, out_pt: &mut OutPt, coords: &[i64]) -> usize {
    let rec = out_rec.create();
    let points = path_from_coords(coords);
    let first = out_pt.create(points[0], rec);
    let mut last = first;

    for point in &points[1..] {
        last = out_pt.insert_between(*point, rec, last, first);
    }

    out_rec[rec].pts = Some(first);
    rec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipper::poly_tree::PolyTree;
    use crate::geometry::point::Paths64;
    use crate::geometry::polygon::area;

    #[test]
    fn test_real_follows_owners() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        let live = add_ring(&mut out_rec, &mut out_pt, &[0, 0, 10, 0, 10, 10]);
        let merged = out_rec.create();
        let merged_twice = out_rec.create();
        out_rec[merged].owner = Some(live);
        out_rec[merged_twice].owner = Some(merged);

        assert_eq!(out_rec.real(Some(live)), Some(live));
        assert_eq!(out_rec.real(Some(merged_twice)), Some(live));
        assert_eq!(out_rec.real(None), None);

        let orphan = out_rec.create();
        assert_eq!(out_rec.real(Some(orphan)), None);
    }

    #[test]
    fn test_set_owner_breaks_cycles() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        let a = add_ring(&mut out_rec, &mut out_pt, &[0, 0, 10, 0, 10, 10]);
        let b = add_ring(&mut out_rec, &mut out_pt, &[0, 0, 5, 0, 5, 5]);

        out_rec.set_owner(b, a);
        assert_eq!(out_rec[b].owner, Some(a));
        assert!(!out_rec.is_valid_owner(a, Some(b)));

        out_rec.set_owner(a, b);
        assert_eq!(out_rec[a].owner, Some(b));
        assert_eq!(out_rec[b].owner, None);
        assert!(!out_rec.is_valid_owner(b, Some(a)));
        assert!(out_rec.is_valid_owner(a, None));
    }

    #[test]
    fn test_move_splits() {
        let mut out_rec = OutRec::default();
        let from = out_rec.create();
        let to = out_rec.create();
        out_rec[from].splits = vec![3, 4];
        out_rec[to].splits = vec![1];

        out_rec.move_splits(from, to);

        assert!(out_rec[from].splits.is_empty());
        assert_eq!(out_rec[to].splits, vec![1, 3, 4]);
    }

    #[test]
    fn test_swap_front_back_sides() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        let rec = add_ring(&mut out_rec, &mut out_pt, &[0, 0, 10, 0, 10, 10]);
        out_rec[rec].front_edge = Some(1);
        out_rec[rec].back_edge = Some(2);
        let pts = out_rec[rec].pts.unwrap();

        out_rec.swap_front_back_sides(rec, &out_pt);

        assert_eq!(out_rec[rec].front_edge, Some(2));
        assert_eq!(out_rec[rec].back_edge, Some(1));
        assert_eq!(out_rec[rec].pts, Some(out_pt[pts].next));
    }

    #[test]
    fn test_build_paths() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        add_ring(&mut out_rec, &mut out_pt, &[0, 0, 10, 0, 10, 10, 0, 10]);
        let open = add_ring(&mut out_rec, &mut out_pt, &[0, 20, 10, 30]);
        out_rec[open].is_open = true;
        let retired = add_ring(&mut out_rec, &mut out_pt, &[50, 50, 60, 50, 60, 60]);
        out_rec[retired].pts = None;

        let mut closed = Paths64::new();
        let mut open_paths = Paths64::new();
        out_rec.build_paths(&mut out_pt, &mut closed, Some(&mut open_paths));

        assert_eq!(closed.len(), 1);
        assert_eq!(area(&closed[0]), 100.0);
        assert_eq!(open_paths, vec![path_from_coords(&[10, 30, 0, 20])]);
    }

    #[test]
    fn test_build_paths_without_open_output() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        let open = add_ring(&mut out_rec, &mut out_pt, &[0, 20, 10, 30, 20, 20]);
        out_rec[open].is_open = true;

        let mut closed = Paths64::new();
        out_rec.build_paths(&mut out_pt, &mut closed, None);

        assert!(closed.is_empty());
    }

    #[test]
    fn test_reverse_solution() {
        let mut out_rec = OutRec::new(true, true);
        let mut out_pt = OutPt::new();
        add_ring(&mut out_rec, &mut out_pt, &[0, 0, 10, 0, 10, 10, 0, 10]);

        let mut closed = Paths64::new();
        out_rec.build_paths(&mut out_pt, &mut closed, None);

        assert_eq!(area(&closed[0]), -100.0);
    }

    #[test]
    fn test_collinear_points() {
        let coords = [0, 0, 5, 0, 10, 0, 10, 10, 0, 10];

        let mut preserving = OutRec::new(false, true);
        let mut out_pt = OutPt::new();
        add_ring(&mut preserving, &mut out_pt, &coords);
        let mut closed = Paths64::new();
        preserving.build_paths(&mut out_pt, &mut closed, None);
        assert_eq!(closed[0].len(), 5);

        let mut removing = OutRec::new(false, false);
        let mut out_pt = OutPt::new();
        add_ring(&mut removing, &mut out_pt, &coords);
        removing.build_paths(&mut out_pt, &mut closed, None);
        assert_eq!(closed.len(), 2);
        assert_eq!(closed[1].len(), 4);
        assert_eq!(area(&closed[1]), 100.0);
    }

    #[test]
    fn test_spikes_are_always_removed() {
        let mut out_rec = OutRec::new(false, true);
        let mut out_pt = OutPt::new();
        // (10, 0) -> (20, 0) -> (10, 0) is a spike
        add_ring(&mut out_rec, &mut out_pt, &[0, 0, 10, 0, 20, 0, 10, 0, 10, 10, 0, 10]);

        let mut closed = Paths64::new();
        out_rec.build_paths(&mut out_pt, &mut closed, None);

        assert_eq!(closed.len(), 1);
        assert_eq!(area(&closed[0]), 100.0);
        assert!(closed[0].iter().all(|point| point.x <= 10));
    }

    #[test]
    fn test_self_intersection_is_split() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        // figure eight crossing at (12, 12)
        add_ring(&mut out_rec, &mut out_pt, &[0, 0, 30, 30, 30, 0, 0, 20]);

        let mut closed = Paths64::new();
        out_rec.build_paths(&mut out_pt, &mut closed, None);

        let mut areas: Vec<f64> = closed.iter().map(|path| area(path).abs()).collect();
        areas.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(areas, vec![120.0, 270.0]);
    }

    #[test]
    fn test_build_tree_checks_owners() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        let outer = add_ring(&mut out_rec, &mut out_pt, &[0, 0, 100, 0, 100, 100, 0, 100]);
        let hole = add_ring(&mut out_rec, &mut out_pt, &[20, 20, 20, 80, 80, 80, 80, 20]);
        let stray = add_ring(&mut out_rec, &mut out_pt, &[200, 0, 300, 0, 300, 100, 200, 100]);
        out_rec[hole].owner = Some(outer);
        // wrong owner, corrected while building
        out_rec[stray].owner = Some(outer);

        let mut tree = PolyTree::new();
        let mut open = Paths64::new();
        out_rec.build_tree(&mut out_pt, &mut tree, &mut open);

        assert_eq!(tree.count(), 2);
        let first = tree.child(0).unwrap();
        assert_eq!(first.count(), 1);
        assert!(first.child(0).unwrap().is_hole());
        assert_eq!(tree.child(1).unwrap().count(), 0);
        assert_eq!(tree.area(), 100.0 * 100.0 - 60.0 * 60.0 + 100.0 * 100.0);
        assert!(open.is_empty());
    }

    #[test]
    fn test_build_tree_hole_before_owner() {
        let mut out_rec = OutRec::default();
        let mut out_pt = OutPt::new();
        let hole = add_ring(&mut out_rec, &mut out_pt, &[20, 20, 20, 80, 80, 80, 80, 20]);
        let outer = add_ring(&mut out_rec, &mut out_pt, &[0, 0, 100, 0, 100, 100, 0, 100]);
        out_rec[hole].owner = Some(outer);

        let mut tree = PolyTree::new();
        let mut open = Paths64::new();
        out_rec.build_tree(&mut out_pt, &mut tree, &mut open);

        assert_eq!(tree.count(), 1);
        assert_eq!(tree.child(0).unwrap().count(), 1);
    }
}
