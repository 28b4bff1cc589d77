use crate::clipper::enums::PointInPolygonResult;
use crate::clipper::utils::{point_in_polygon, pts_really_close};
use crate::geometry::bound_rect::BoundRect;
use crate::geometry::point::{Path64, Point64};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutPoint {
    pub point: Point64,
    pub next: usize,
    pub prev: usize,
    pub out_rec: usize,
    /// Set once the point starts a horizontal segment.
    pub is_horz: bool,
}

/// Arena of output points. Each output ring is a circular list linked by
/// `next`/`prev` indices; unlinked points simply stay unused until `dispose`.
pub struct OutPt {
    points: Vec<OutPoint>,
}

impl OutPt {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn create(&mut self, point: Point64, out_rec: usize) -> usize {
        let index = self.points.len();
        self.points.push(OutPoint {
            point,
            next: index,
            prev: index,
            out_rec,
            is_horz: false,
        });
        index
    }

    /// Inserts a new point between `prev` and `next`, which must be neighbours.
    pub fn insert_between(&mut self, point: Point64, out_rec: usize, prev: usize, next: usize) -> usize {
        let index = self.create(point, out_rec);
        self.points[index].prev = prev;
        self.points[index].next = next;
        self.points[prev].next = index;
        self.points[next].prev = index;
        index
    }

    pub fn duplicate(&mut self, op: usize, insert_after: bool) -> usize {
        let point = self.points[op].point;
        let out_rec = self.points[op].out_rec;

        if insert_after {
            let next = self.points[op].next;
            self.insert_between(point, out_rec, op, next)
        } else {
            let prev = self.points[op].prev;
            self.insert_between(point, out_rec, prev, op)
        }
    }

    /// Unlinks `op` from its ring and returns its successor.
    pub fn dispose(&mut self, op: usize) -> usize {
        let OutPoint { prev, next, .. } = self.points[op];
        self.points[prev].next = next;
        self.points[next].prev = prev;
        self.points[op].next = op;
        self.points[op].prev = op;
        next
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn ring(&self, op: usize) -> RingIter<'_> {
        RingIter {
            store: self,
            start: op,
            current: Some(op),
        }
    }

    pub fn count(&self, op: usize) -> usize {
        self.ring(op).count()
    }

    pub fn ring_points(&self, op: usize) -> Path64 {
        self.ring(op).map(|index| self.points[index].point).collect()
    }

    pub fn set_out_rec(&mut self, op: usize, out_rec: usize) {
        let mut cursor = op;
        loop {
            self.points[cursor].out_rec = out_rec;
            cursor = self.points[cursor].next;
            if cursor == op {
                break;
            }
        }
    }

    pub fn area(&self, op: usize) -> f64 {
        let mut result = 0.0;

        for index in self.ring(op) {
            let curr = self.points[index].point;
            let prev = self.points[self.points[index].prev].point;
            result += (prev.y + curr.y) as f64 * (prev.x - curr.x) as f64;
        }

        result * 0.5
    }

    pub fn is_very_small_triangle(&self, op: usize) -> bool {
        let OutPoint {
            point, next, prev, ..
        } = self.points[op];
        let next_point = self.points[next].point;
        let prev_point = self.points[prev].point;

        self.points[next].next == prev
            && (pts_really_close(prev_point, next_point)
                || pts_really_close(point, next_point)
                || pts_really_close(point, prev_point))
    }

    pub fn is_valid_closed_path(&self, op: Option<usize>) -> bool {
        match op {
            Some(op) => {
                let OutPoint { next, prev, .. } = self.points[op];
                next != op && next != prev && !self.is_very_small_triangle(op)
            }
            None => false,
        }
    }

    /// Ring points with the vertices of axis aligned collinear runs removed.
    pub fn clean_path(&self, op: usize) -> Path64 {
        let at = |index: usize| self.points[index].point;
        let next = |index: usize| self.points[index].next;
        let prev = |index: usize| self.points[index].prev;

        let mut result = Path64::new();
        let mut op2 = op;

        while next(op2) != op
            && ((at(op2).x == at(next(op2)).x && at(op2).x == at(prev(op2)).x)
                || (at(op2).y == at(next(op2)).y && at(op2).y == at(prev(op2)).y))
        {
            op2 = next(op2);
        }

        result.push(at(op2));
        let mut prev_op = op2;
        op2 = next(op2);

        while op2 != op {
            if (at(op2).x != at(next(op2)).x || at(op2).x != at(prev_op).x)
                && (at(op2).y != at(next(op2)).y || at(op2).y != at(prev_op).y)
            {
                result.push(at(op2));
                prev_op = op2;
            }
            op2 = next(op2);
        }

        result
    }

    /// Whether ring `op1` lies inside ring `op2`. Vertices are polled until
    /// two more land on one side than the other; a still equivocal result
    /// falls back to the bounds mid point of `op1`.
    pub fn ring_inside_ring(&self, op1: usize, op2: usize) -> bool {
        let polygon = self.ring_points(op2);
        let mut outside_cnt: i32 = 0;

        for index in self.ring(op1) {
            match point_in_polygon(self.points[index].point, &polygon) {
                PointInPolygonResult::IsOutside => outside_cnt += 1,
                PointInPolygonResult::IsInside => outside_cnt -= 1,
                PointInPolygonResult::IsOn => {}
            }

            if outside_cnt.abs() > 1 {
                return outside_cnt < 0;
            }
        }

        let mid_point = BoundRect::from_points(&self.clean_path(op1)).mid_point();
        point_in_polygon(mid_point, &self.clean_path(op2)) != PointInPolygonResult::IsOutside
    }

    /// Path starting after `op` (or walking backwards from `op` when
    /// `reverse`), skipping repeated points.
    pub fn build_path(&self, op: usize, reverse: bool, is_open: bool) -> Option<Path64> {
        let OutPoint { next, prev, .. } = self.points[op];
        if next == op || (!is_open && next == prev) {
            return None;
        }

        let (start, mut cursor) = if reverse {
            (op, prev)
        } else {
            (next, self.points[next].next)
        };
        let mut last = self.points[start].point;
        let mut path = vec![last];

        while cursor != start {
            let point = self.points[cursor].point;
            if point != last {
                last = point;
                path.push(point);
            }
            cursor = if reverse {
                self.points[cursor].prev
            } else {
                self.points[cursor].next
            };
        }

        if is_open {
            return (path.len() > 1).then_some(path);
        }

        if path.len() < 3 || (path.len() == 3 && self.is_very_small_triangle(cursor)) {
            return None;
        }

        Some(path)
    }
}

impl Default for OutPt {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for OutPt {
    type Output = OutPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IndexMut<usize> for OutPt {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}

pub struct RingIter<'a> {
    store: &'a OutPt,
    start: usize,
    current: Option<usize>,
}

impl<'a> Iterator for RingIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        let next = self.store.points[index].next;
        self.current = (next != self.start).then_some(next);
        Some(index)
    }
}
