use crate::clipper::out_pt::OutPt;
use crate::clipper::poly_tree::PolyTree;
use crate::clipper::utils::{area_triangle, dot_product, is_collinear, segment_intersect_pt, segments_intersect};
use crate::geometry::bound_rect::BoundRect;
use crate::geometry::point::{Path64, Paths64};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutRecord {
    /// Any point of the ring; `None` once the record is merged away or
    /// found degenerate.
    pub pts: Option<usize>,
    pub owner: Option<usize>,
    pub front_edge: Option<usize>,
    pub back_edge: Option<usize>,
    pub splits: Vec<usize>,
    pub recursive_split: Option<usize>,
    pub bounds: BoundRect<i64>,
    pub path: Path64,
    pub poly_path: Option<usize>,
    pub is_open: bool,
}

/// Arena of output records. A record whose `pts` is `None` forwards to
/// its owner, see `real`.
pub struct OutRec {
    records: Vec<OutRecord>,
    reverse_solution: bool,
    preserve_collinear: bool,
    using_poly_tree: bool,
}

impl OutRec {
    pub fn new(reverse_solution: bool, preserve_collinear: bool) -> Self {
        Self {
            records: Vec::new(),
            reverse_solution,
            preserve_collinear,
            using_poly_tree: false,
        }
    }

    pub fn set_options(&mut self, reverse_solution: bool, preserve_collinear: bool) {
        self.reverse_solution = reverse_solution;
        self.preserve_collinear = preserve_collinear;
    }

    #[inline(always)]
    pub fn preserve_collinear(&self) -> bool {
        self.preserve_collinear
    }

    #[inline(always)]
    pub fn using_poly_tree(&self) -> bool {
        self.using_poly_tree
    }

    pub fn set_using_poly_tree(&mut self, value: bool) {
        self.using_poly_tree = value;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn create(&mut self) -> usize {
        self.records.push(OutRecord::default());
        self.records.len() - 1
    }

    pub fn dispose(&mut self) {
        self.records.clear();
    }

    /// First record along the owner chain that still holds points.
    pub fn real(&self, rec: Option<usize>) -> Option<usize> {
        let mut result = rec;

        while let Some(index) = result {
            if self.records[index].pts.is_some() {
                break;
            }
            result = self.records[index].owner;
        }

        result
    }

    pub fn set_owner(&mut self, rec: usize, new_owner: usize) {
        self.records[new_owner].owner = self.real(self.records[new_owner].owner);

        // never let `rec` end up owning itself
        let mut tmp = Some(new_owner);
        while let Some(index) = tmp {
            if index == rec {
                break;
            }
            tmp = self.records[index].owner;
        }

        if tmp.is_some() {
            self.records[new_owner].owner = self.records[rec].owner;
        }

        self.records[rec].owner = Some(new_owner);
    }

    /// False when `test_owner` is `rec` or is (indirectly) owned by it.
    pub fn is_valid_owner(&self, rec: usize, test_owner: Option<usize>) -> bool {
        let mut tmp = test_owner;

        while let Some(index) = tmp {
            if index == rec {
                return false;
            }
            tmp = self.records[index].owner;
        }

        true
    }

    pub fn move_splits(&mut self, from: usize, to: usize) {
        let splits = std::mem::take(&mut self.records[from].splits);
        self.records[to].splits.extend(splits);
    }

    pub fn swap_front_back_sides(&mut self, rec: usize, out_pt: &OutPt) {
        let record = &mut self.records[rec];

        std::mem::swap(&mut record.front_edge, &mut record.back_edge);
        if let Some(pts) = record.pts {
            record.pts = Some(out_pt[pts].next);
        }
    }

    /// Drops spikes (and collinear vertices unless `preserve_collinear`),
    /// then repairs self-intersections.
    pub fn clean_collinear(&mut self, rec: usize, out_pt: &mut OutPt) {
        let Some(rec) = self.real(Some(rec)) else {
            return;
        };

        if self.records[rec].is_open {
            return;
        }

        if !out_pt.is_valid_closed_path(self.records[rec].pts) {
            self.records[rec].pts = None;
            return;
        }

        let Some(mut start) = self.records[rec].pts else {
            return;
        };
        let mut op2 = start;

        loop {
            let prev = out_pt[op2].prev;
            let next = out_pt[op2].next;
            let prev_pt = out_pt[prev].point;
            let curr_pt = out_pt[op2].point;
            let next_pt = out_pt[next].point;

            if is_collinear(prev_pt, curr_pt, next_pt)
                && (curr_pt == prev_pt
                    || curr_pt == next_pt
                    || !self.preserve_collinear
                    || dot_product(prev_pt, curr_pt, next_pt) < 0.0)
            {
                if self.records[rec].pts == Some(op2) {
                    self.records[rec].pts = Some(prev);
                }

                op2 = out_pt.dispose(op2);
                if !out_pt.is_valid_closed_path(Some(op2)) {
                    self.records[rec].pts = None;
                    return;
                }
                start = op2;
                continue;
            }

            op2 = next;
            if op2 == start {
                break;
            }
        }

        self.fix_self_intersects(rec, out_pt);
    }

    fn fix_self_intersects(&mut self, rec: usize, out_pt: &mut OutPt) {
        let Some(mut op2) = self.records[rec].pts else {
            return;
        };

        loop {
            let prev = out_pt[op2].prev;
            let next = out_pt[op2].next;
            let next_next = out_pt[next].next;

            // triangles can't self-intersect
            if prev == next_next {
                break;
            }

            if segments_intersect(
                out_pt[prev].point,
                out_pt[op2].point,
                out_pt[next].point,
                out_pt[next_next].point,
            ) {
                if let Some(pts) = self.records[rec].pts {
                    if op2 == pts || next == pts {
                        self.records[rec].pts = Some(out_pt[pts].prev);
                    }
                }

                self.do_split_op(rec, op2, out_pt);

                match self.records[rec].pts {
                    Some(pts) => op2 = pts,
                    None => break,
                }
                continue;
            }

            op2 = next;
            if Some(op2) == self.records[rec].pts {
                break;
            }
        }
    }

    /// Segments `split_op.prev -> split_op` and `split_op.next ->
    /// split_op.next.next` cross. The small loop between them either
    /// becomes its own record or is dropped.
    fn do_split_op(&mut self, rec: usize, split_op: usize, out_pt: &mut OutPt) {
        let prev_op = out_pt[split_op].prev;
        let split_next = out_pt[split_op].next;
        let next_next_op = out_pt[split_next].next;
        self.records[rec].pts = Some(prev_op);

        let prev_pt = out_pt[prev_op].point;
        let split_pt = out_pt[split_op].point;
        let split_next_pt = out_pt[split_next].point;
        let next_next_pt = out_pt[next_next_op].point;
        let ip = segment_intersect_pt(prev_pt, split_pt, split_next_pt, next_next_pt).unwrap_or(split_pt);

        let area1 = out_pt.area(prev_op);
        let abs_area1 = area1.abs();
        if abs_area1 < 2.0 {
            self.records[rec].pts = None;
            return;
        }

        let area2 = area_triangle(ip, split_pt, split_next_pt);
        let abs_area2 = area2.abs();

        if ip == prev_pt || ip == next_next_pt {
            out_pt[next_next_op].prev = prev_op;
            out_pt[prev_op].next = next_next_op;
        } else {
            let owner = out_pt[prev_op].out_rec;
            out_pt.insert_between(ip, owner, prev_op, next_next_op);
        }

        // area2 only shares the sign of area1 when the loop is bigger than
        // the remainder or the ring crosses itself more than once
        if abs_area2 < 1.0 || (abs_area2 <= abs_area1 && (area2 > 0.0) != (area1 > 0.0)) {
            return;
        }

        let new_rec = self.create();
        self.records[new_rec].owner = self.records[rec].owner;
        out_pt[split_op].out_rec = new_rec;
        out_pt[split_next].out_rec = new_rec;

        let new_op = out_pt.create(ip, new_rec);
        out_pt[new_op].prev = split_next;
        out_pt[new_op].next = split_op;
        out_pt[split_op].prev = new_op;
        out_pt[split_next].next = new_op;
        self.records[new_rec].pts = Some(new_op);

        if self.using_poly_tree {
            if out_pt.ring_inside_ring(prev_op, new_op) {
                self.records[new_rec].splits.push(rec);
            } else {
                self.records[rec].splits.push(new_rec);
            }
        }
    }

    /// Builds the record's path and bounds once. False for degenerate rings.
    pub fn check_bounds(&mut self, rec: usize, out_pt: &mut OutPt) -> bool {
        if self.records[rec].pts.is_none() {
            return false;
        }

        if !self.records[rec].bounds.is_empty() {
            return true;
        }

        self.clean_collinear(rec, out_pt);

        let Some(pts) = self.records[rec].pts else {
            return false;
        };

        match out_pt.build_path(pts, self.reverse_solution, false) {
            Some(path) => {
                self.records[rec].bounds = BoundRect::from_points(&path);
                self.records[rec].path = path;
                true
            }
            None => false,
        }
    }

    fn contains_record(&mut self, owner: usize, rec: usize, out_pt: &mut OutPt) -> bool {
        if !self.check_bounds(owner, out_pt) || !self.records[owner].bounds.contains(&self.records[rec].bounds) {
            return false;
        }

        match (self.records[rec].pts, self.records[owner].pts) {
            (Some(inner), Some(outer)) => out_pt.ring_inside_ring(inner, outer),
            _ => false,
        }
    }

    /// Looks for an owner of `rec` among `splits` (recursively through
    /// their own splits). Sets the owner and returns true when found.
    fn check_split_owner(&mut self, rec: usize, splits: &[usize], out_pt: &mut OutPt) -> bool {
        for &split in splits {
            if self.records[split].pts.is_none()
                && !self.records[split].splits.is_empty()
                && self.records[split].recursive_split != Some(rec)
            {
                self.records[split].recursive_split = Some(rec);
                let nested = self.records[split].splits.clone();
                if self.check_split_owner(rec, &nested, out_pt) {
                    return true;
                }
            }

            let Some(split) = self.real(Some(split)) else {
                continue;
            };

            if split == rec || self.records[split].recursive_split == Some(rec) {
                continue;
            }
            self.records[split].recursive_split = Some(rec);

            if !self.records[split].splits.is_empty() {
                let nested = self.records[split].splits.clone();
                if self.check_split_owner(rec, &nested, out_pt) {
                    return true;
                }
            }

            if !self.contains_record(split, rec, out_pt) {
                continue;
            }

            // split is itself owned by rec
            if !self.is_valid_owner(rec, Some(split)) {
                self.records[split].owner = self.records[rec].owner;
            }

            self.records[rec].owner = Some(split);
            return true;
        }

        false
    }

    /// Walks up the owner chain until an owner geometrically contains
    /// `rec`, then attaches `rec` to the owner's tree node.
    fn recursive_check_owners(&mut self, rec: usize, tree: &mut PolyTree, out_pt: &mut OutPt) {
        if self.records[rec].poly_path.is_some() || self.records[rec].bounds.is_empty() {
            return;
        }

        while let Some(owner) = self.records[rec].owner {
            if !self.records[owner].splits.is_empty() {
                let splits = self.records[owner].splits.clone();
                if self.check_split_owner(rec, &splits, out_pt) {
                    break;
                }
            }

            if self.records[owner].pts.is_some() && self.contains_record(owner, rec, out_pt) {
                break;
            }

            self.records[rec].owner = self.records[owner].owner;
        }

        let parent = match self.records[rec].owner {
            Some(owner) => {
                if self.records[owner].poly_path.is_none() {
                    self.recursive_check_owners(owner, tree, out_pt);
                }
                self.records[owner].poly_path.unwrap_or(tree.root_index())
            }
            None => tree.root_index(),
        };

        let path = self.records[rec].path.clone();
        self.records[rec].poly_path = Some(tree.add_child(parent, path));
    }

    /// Flat output. Open paths go to `open` when it is given and are
    /// dropped otherwise.
    pub fn build_paths(&mut self, out_pt: &mut OutPt, closed: &mut Paths64, mut open: Option<&mut Paths64>) {
        // cleanup may append records, so the length is re-read every pass
        let mut index = 0;
        while index < self.records.len() {
            if let Some(pts) = self.records[index].pts {
                if self.records[index].is_open {
                    if let Some(open) = open.as_deref_mut() {
                        if let Some(path) = out_pt.build_path(pts, self.reverse_solution, true) {
                            open.push(path);
                        }
                    }
                } else {
                    self.clean_collinear(index, out_pt);

                    let path = self.records[index]
                        .pts
                        .and_then(|pts| out_pt.build_path(pts, self.reverse_solution, false));
                    if let Some(path) = path {
                        closed.push(path);
                    }
                }
            }
            index += 1;
        }
    }

    pub fn build_tree(&mut self, out_pt: &mut OutPt, tree: &mut PolyTree, open: &mut Paths64) {
        tree.clear();

        let mut index = 0;
        while index < self.records.len() {
            if let Some(pts) = self.records[index].pts {
                if self.records[index].is_open {
                    if let Some(path) = out_pt.build_path(pts, self.reverse_solution, true) {
                        open.push(path);
                    }
                } else if self.check_bounds(index, out_pt) {
                    self.recursive_check_owners(index, tree, out_pt);
                }
            }
            index += 1;
        }
    }
}

impl Default for OutRec {
    fn default() -> Self {
        Self::new(false, true)
    }
}

impl Index<usize> for OutRec {
    type Output = OutRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl IndexMut<usize> for OutRec {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.records[index]
    }
}
