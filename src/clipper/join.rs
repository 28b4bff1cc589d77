use crate::clipper::out_pt::OutPt;
use crate::clipper::out_rec::OutRec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorzSegment {
    pub left_op: usize,
    pub right_op: Option<usize>,
    pub left_to_right: bool,
}

/// Two duplicated output points to be spliced together once the sweep ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorzJoin {
    pub op1: usize,
    pub op2: usize,
}

pub struct Join {
    segments: Vec<HorzSegment>,
    joins: Vec<HorzJoin>,
}

impl Join {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            joins: Vec::new(),
        }
    }

    pub fn add_segment(&mut self, op: usize) {
        self.segments.push(HorzSegment {
            left_op: op,
            right_op: None,
            left_to_right: true,
        });
    }

    pub fn has_segments(&self) -> bool {
        !self.segments.is_empty()
    }

    pub fn join_count(&self) -> usize {
        self.joins.len()
    }

    /// Pairs overlapping segments of opposite direction into joins and
    /// empties the segment list.
    pub fn convert_segments(&mut self, out_pt: &mut OutPt, out_rec: &OutRec) {
        let mut segments: Vec<HorzSegment> = Vec::with_capacity(self.segments.len());

        for mut segment in std::mem::take(&mut self.segments) {
            if update_segment(&mut segment, out_pt, out_rec) {
                segments.push(segment);
            }
        }

        if segments.len() < 2 {
            return;
        }

        segments.sort_by_key(|segment| out_pt[segment.left_op].point.x);

        let x = |out_pt: &OutPt, op: usize| out_pt[op].point.x;
        let y = |out_pt: &OutPt, op: usize| out_pt[op].point.y;

        for i in 0..segments.len() - 1 {
            for j in i + 1..segments.len() {
                let mut hs1 = segments[i];
                let mut hs2 = segments[j];
                let (Some(right1), Some(right2)) = (hs1.right_op, hs2.right_op) else {
                    continue;
                };

                if x(out_pt, hs2.left_op) >= x(out_pt, right1)
                    || hs2.left_to_right == hs1.left_to_right
                    || x(out_pt, right2) <= x(out_pt, hs1.left_op)
                {
                    continue;
                }

                let curr_y = y(out_pt, hs1.left_op);

                let join = if hs1.left_to_right {
                    loop {
                        let next = out_pt[hs1.left_op].next;
                        if y(out_pt, next) != curr_y || x(out_pt, next) > x(out_pt, hs2.left_op) {
                            break;
                        }
                        hs1.left_op = next;
                    }
                    loop {
                        let prev = out_pt[hs2.left_op].prev;
                        if y(out_pt, prev) != curr_y || x(out_pt, prev) > x(out_pt, hs1.left_op) {
                            break;
                        }
                        hs2.left_op = prev;
                    }
                    HorzJoin {
                        op1: out_pt.duplicate(hs1.left_op, true),
                        op2: out_pt.duplicate(hs2.left_op, false),
                    }
                } else {
                    loop {
                        let prev = out_pt[hs1.left_op].prev;
                        if y(out_pt, prev) != curr_y || x(out_pt, prev) > x(out_pt, hs2.left_op) {
                            break;
                        }
                        hs1.left_op = prev;
                    }
                    loop {
                        let next = out_pt[hs2.left_op].next;
                        if y(out_pt, next) != curr_y || x(out_pt, next) > x(out_pt, hs1.left_op) {
                            break;
                        }
                        hs2.left_op = next;
                    }
                    HorzJoin {
                        op1: out_pt.duplicate(hs2.left_op, true),
                        op2: out_pt.duplicate(hs1.left_op, false),
                    }
                };

                self.joins.push(join);
                segments[i] = hs1;
                segments[j] = hs2;
            }
        }
    }

    pub fn take_joins(&mut self) -> Vec<HorzJoin> {
        std::mem::take(&mut self.joins)
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.joins.clear();
    }
}

impl Default for Join {
    fn default() -> Self {
        Self::new()
    }
}

/// Extends the segment over the whole horizontal run around its point.
/// False when the run is a single point or its left end already starts
/// another segment.
fn update_segment(segment: &mut HorzSegment, out_pt: &mut OutPt, out_rec: &OutRec) -> bool {
    let op = segment.left_op;
    let curr_y = out_pt[op].point.y;
    let rec = out_rec.real(Some(out_pt[op].out_rec));
    let live_pts = rec.and_then(|rec| match out_rec[rec].front_edge {
        Some(_) => out_rec[rec].pts,
        None => None,
    });

    let mut op_p = op;
    let mut op_n = op;

    match live_pts {
        // still growing: stay between the two ring ends
        Some(op_a) => {
            let op_z = out_pt[op_a].next;
            while op_p != op_z && out_pt[out_pt[op_p].prev].point.y == curr_y {
                op_p = out_pt[op_p].prev;
            }
            while op_n != op_a && out_pt[out_pt[op_n].next].point.y == curr_y {
                op_n = out_pt[op_n].next;
            }
        }
        None => {
            while out_pt[op_p].prev != op_n && out_pt[out_pt[op_p].prev].point.y == curr_y {
                op_p = out_pt[op_p].prev;
            }
            while out_pt[op_n].next != op_p && out_pt[out_pt[op_n].next].point.y == curr_y {
                op_n = out_pt[op_n].next;
            }
        }
    }

    let x_p = out_pt[op_p].point.x;
    let x_n = out_pt[op_n].point.x;
    if x_p == x_n {
        segment.right_op = None;
        return false;
    }

    let (left, right, left_to_right) = if x_p < x_n {
        (op_p, op_n, true)
    } else {
        (op_n, op_p, false)
    };

    segment.left_op = left;
    segment.left_to_right = left_to_right;

    if out_pt[left].is_horz {
        segment.right_op = None;
        return false;
    }

    segment.right_op = Some(right);
    out_pt[left].is_horz = true;
    true
}
