use crate::clipper::constants::HORIZONTAL_DX;
use crate::clipper::enums::{ClipType, FillRule, PathType};
use crate::clipper::local_minima::LocalMinima;
use crate::clipper::t_edge::{get_dx, TEdge};
use crate::geometry::point::{path_from_coords, Path64, Point64};

/// Top, right, bottom, left. The bottom vertex (index 2) is the minimum.
fn diamond(cx: i64, cy: i64, r: i64) -> Path64 {
    path_from_coords(&[cx, cy - r, cx + r, cy, cx, cy + r, cx - r, cy])
}

/// Inserts both bounds of `local_min` the way the sweep does for a
/// diamond: the ascending bound (towards the left vertex) is the left one.
fn insert_bounds(t_edge: &mut TEdge, local_minima: &LocalMinima, local_min: usize) -> (usize, usize) {
    let left = t_edge.create(local_minima, local_min, 1);
    let right = t_edge.create(local_minima, local_min, -1);

    t_edge[left].is_left_bound = true;
    t_edge.insert_left_edge(left, local_minima);
    t_edge.set_wind_count_for_closed_path_edge(left);

    t_edge[right].wind_cnt = t_edge[left].wind_cnt;
    t_edge[right].wind_cnt2 = t_edge[left].wind_cnt2;
    t_edge.insert_right_edge(left, right);

    (left, right)
}

/// Outer diamond around (50, 50) and an inner one around (50, 50) as well,
/// with the outer edges moved to where they are at the inner minimum.
fn nested(clip_type: ClipType, fill_rule: FillRule, inner_type: PathType) -> (TEdge, [usize; 4]) {
    let mut local_minima = LocalMinima::new();
    local_minima.add_path(&diamond(50, 50, 50), PathType::Clip, false);
    local_minima.add_path(&diamond(50, 50, 30), inner_type, false);
    local_minima.reset();

    let mut t_edge = TEdge::new();
    t_edge.init(clip_type, fill_rule);

    let (outer_left, outer_right) = insert_bounds(&mut t_edge, &local_minima, 0);
    for edge in [outer_left, outer_right] {
        t_edge[edge].curr_x = t_edge[edge].top_x(80);
    }
    let (inner_left, inner_right) = insert_bounds(&mut t_edge, &local_minima, 1);

    (t_edge, [outer_left, inner_left, inner_right, outer_right])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_dx() {
        assert_eq!(get_dx(Point64::new(0, 0), Point64::new(10, 10)), 1.0);
        assert_eq!(get_dx(Point64::new(0, 10), Point64::new(5, 0)), -0.5);
        assert_eq!(get_dx(Point64::new(0, 5), Point64::new(10, 5)), -HORIZONTAL_DX);
        assert_eq!(get_dx(Point64::new(10, 5), Point64::new(0, 5)), HORIZONTAL_DX);
    }

    #[test]
    fn test_create_bounds() {
        let mut local_minima = LocalMinima::new();
        local_minima.add_path(&diamond(5, 5, 5), PathType::Subject, false);
        local_minima.reset();

        let mut t_edge = TEdge::new();
        t_edge.init(ClipType::Union, FillRule::NonZero);
        let ascending = t_edge.create(&local_minima, 0, 1);
        let descending = t_edge.create(&local_minima, 0, -1);

        assert_eq!(t_edge.len(), 2);
        assert_eq!(t_edge[ascending].bot, Point64::new(5, 10));
        assert_eq!(t_edge[ascending].top, Point64::new(0, 5));
        assert_eq!(t_edge[ascending].dx, 1.0);
        assert_eq!(t_edge[descending].top, Point64::new(10, 5));
        assert_eq!(t_edge[descending].dx, -1.0);
        assert_eq!(t_edge[descending].curr_x, 5);
        assert!(!t_edge[ascending].is_hot());
        assert!(!t_edge.is_maxima(ascending, &local_minima));
    }

    #[test]
    fn test_top_x() {
        let mut local_minima = LocalMinima::new();
        local_minima.add_path(&diamond(5, 5, 5), PathType::Subject, false);
        local_minima.reset();

        let mut t_edge = TEdge::new();
        let edge = t_edge.create(&local_minima, 0, -1);

        assert_eq!(t_edge[edge].top_x(10), 5);
        assert_eq!(t_edge[edge].top_x(8), 7);
        assert_eq!(t_edge[edge].top_x(5), 10);
    }

    #[test]
    fn test_nested_ael_order_and_winding() {
        let (t_edge, edges) = nested(ClipType::Union, FillRule::NonZero, PathType::Clip);

        assert_eq!(t_edge.ael().collect::<Vec<_>>(), edges.to_vec());
        assert_eq!(t_edge.first_active(), Some(edges[0]));
        assert_eq!(t_edge[edges[0]].wind_cnt, 1);
        assert_eq!(t_edge[edges[1]].wind_cnt, 2);
        assert_eq!(t_edge[edges[2]].wind_cnt, 2);
        assert!(t_edge.is_contributing_closed(edges[0]));
        assert!(!t_edge.is_contributing_closed(edges[1]));
    }

    #[test]
    fn test_even_odd_inner_contributes() {
        let (t_edge, edges) = nested(ClipType::Union, FillRule::EvenOdd, PathType::Clip);

        assert_eq!(t_edge[edges[1]].wind_cnt, 1);
        assert!(t_edge.is_contributing_closed(edges[1]));
    }

    #[test]
    fn test_subject_inside_clip_winding() {
        let (t_edge, edges) = nested(ClipType::Intersection, FillRule::NonZero, PathType::Subject);

        assert_eq!(t_edge[edges[1]].wind_cnt, 1);
        assert_eq!(t_edge[edges[1]].wind_cnt2, 1);
        assert!(t_edge.is_contributing_closed(edges[1]));
    }

    #[test]
    fn test_contribution_by_clip_type() {
        for (clip_type, expected) in [
            (ClipType::Intersection, true),
            (ClipType::Union, false),
            (ClipType::NoClip, false),
            (ClipType::Difference, false),
            (ClipType::Xor, true),
        ] {
            let (t_edge, edges) = nested(clip_type, FillRule::NonZero, PathType::Subject);
            assert_eq!(t_edge.is_contributing_closed(edges[1]), expected, "{:?}", clip_type);
        }
    }

    #[test]
    fn test_swap_and_delete() {
        let (mut t_edge, [a, b, c, d]) = nested(ClipType::Union, FillRule::NonZero, PathType::Clip);

        t_edge.swap_positions_in_ael(a, b);
        assert_eq!(t_edge.ael().collect::<Vec<_>>(), vec![b, a, c, d]);
        assert_eq!(t_edge.first_active(), Some(b));

        t_edge.swap_positions_in_ael(c, d);
        assert_eq!(t_edge.ael().collect::<Vec<_>>(), vec![b, a, d, c]);

        t_edge.delete_from_ael(b);
        t_edge.delete_from_ael(c);
        assert_eq!(t_edge.ael().collect::<Vec<_>>(), vec![a, d]);
        assert_eq!(t_edge[d].next_in_ael, None);

        // deleting twice is harmless
        t_edge.delete_from_ael(c);
        assert_eq!(t_edge.ael().count(), 2);
    }

    #[test]
    fn test_prev_hot_edge_and_maxima_pair() {
        let (mut t_edge, [a, b, c, d]) = nested(ClipType::Union, FillRule::NonZero, PathType::Clip);

        assert_eq!(t_edge.get_prev_hot_edge(c), None);
        t_edge[a].out_rec = Some(0);
        assert_eq!(t_edge.get_prev_hot_edge(c), Some(a));

        assert_eq!(t_edge.get_maxima_pair(b), None);
        t_edge[d].vertex_top = t_edge[b].vertex_top;
        assert_eq!(t_edge.get_maxima_pair(b), Some(d));
    }

    #[test]
    fn test_horizontal_stack() {
        let (mut t_edge, [a, b, c, _]) = nested(ClipType::Union, FillRule::NonZero, PathType::Clip);

        t_edge.push_horz(a);
        t_edge.push_horz(b);
        t_edge.push_horz(c);

        assert_eq!(t_edge.pop_horz(), Some(c));
        assert_eq!(t_edge.pop_horz(), Some(b));
        t_edge.clear_sel();
        assert_eq!(t_edge.pop_horz(), None);
    }

    #[test]
    fn test_open_edge_winding() {
        let mut local_minima = LocalMinima::new();
        local_minima.add_path(&diamond(50, 50, 50), PathType::Clip, false);
        local_minima.add_path(&path_from_coords(&[50, 90, 50, 10]), PathType::Subject, true);
        local_minima.reset();

        let mut t_edge = TEdge::new();
        t_edge.init(ClipType::Intersection, FillRule::NonZero);
        let (left, right) = insert_bounds(&mut t_edge, &local_minima, 0);
        t_edge[left].curr_x = t_edge[left].top_x(90);
        t_edge[right].curr_x = t_edge[right].top_x(90);

        let open = t_edge.create(&local_minima, 1, 1);
        t_edge.insert_left_edge(open, &local_minima);
        t_edge.set_wind_count_for_open_path_edge(open);

        assert_eq!(t_edge.ael().collect::<Vec<_>>(), vec![left, open, right]);
        assert_eq!(t_edge[open].wind_cnt, 0);
        assert_eq!(t_edge[open].wind_cnt2, 1);
        assert!(t_edge.is_contributing_open(open));
    }
}
