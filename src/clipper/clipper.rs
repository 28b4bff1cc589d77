use crate::clipper::{
    constants::{is_in_range, JOIN_LEFT_DIST_SQRD, JOIN_RIGHT_DIST_SQRD},
    enums::{ClipType, FillRule, JoinWith, PathType, VertexFlags},
    error::ClipError,
    intersect_node::{IntersectNode, Intersection},
    join::Join,
    local_minima::LocalMinima,
    out_pt::OutPt,
    out_rec::OutRec,
    poly_tree::PolyTree,
    scanbeam::Scanbeam,
    t_edge::TEdge,
    utils::{is_collinear, perpendic_dist_from_line_sqrd},
};
use crate::geometry::point::{Path64, Paths64, Point64};
use log::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipperOptions {
    /// Keep collinear vertices in output rings. Spikes are always removed.
    pub preserve_collinear: bool,
    pub reverse_solution: bool,
}

impl Default for ClipperOptions {
    fn default() -> Self {
        Self {
            preserve_collinear: true,
            reverse_solution: false,
        }
    }
}

/// A clipping session. Paths are added with `add_subject`, `add_open_subject`
/// and `add_clip`, then any number of `execute*` calls can run over them
/// until `clear` drops the input.
pub struct Clipper {
    local_minima: LocalMinima,
    scanbeam: Scanbeam,
    t_edge: TEdge,
    intersections: IntersectNode,
    join: Join,
    out_pt: OutPt,
    out_rec: OutRec,
    options: ClipperOptions,
    bot_y: i64,
    failure: Option<ClipError>,
    out_of_range: Option<Point64>,
}

impl Clipper {
    pub fn new(options: ClipperOptions) -> Self {
        Self {
            local_minima: LocalMinima::new(),
            scanbeam: Scanbeam::new(),
            t_edge: TEdge::new(),
            intersections: IntersectNode::new(),
            join: Join::new(),
            out_pt: OutPt::new(),
            out_rec: OutRec::new(options.reverse_solution, options.preserve_collinear),
            options,
            bot_y: 0,
            failure: None,
            out_of_range: None,
        }
    }

    pub fn options(&self) -> ClipperOptions {
        self.options
    }

    pub fn set_options(&mut self, options: ClipperOptions) {
        self.options = options;
        self.out_rec
            .set_options(options.reverse_solution, options.preserve_collinear);
    }

    /// Adds one path. Returns false when the path is ignored: too few
    /// distinct points, a flat closed path, an open clip path or a
    /// coordinate out of range (which also fails the next execute).
    pub fn add_path(&mut self, path: &[Point64], path_type: PathType, is_open: bool) -> bool {
        if is_open && path_type == PathType::Clip {
            warn!("open clip paths are not supported, path of {} points ignored", path.len());
            return false;
        }

        if let Some(point) = path.iter().find(|point| !is_in_range(point)) {
            warn!("path point {} is outside the coordinate range", point);
            self.out_of_range.get_or_insert(*point);
            return false;
        }

        self.local_minima.add_path(path, path_type, is_open)
    }

    pub fn add_paths(&mut self, paths: &[Path64], path_type: PathType, is_open: bool) -> bool {
        let mut result = false;
        for path in paths {
            if self.add_path(path, path_type, is_open) {
                result = true;
            }
        }
        result
    }

    pub fn add_subject(&mut self, paths: &[Path64]) -> bool {
        self.add_paths(paths, PathType::Subject, false)
    }

    pub fn add_open_subject(&mut self, paths: &[Path64]) -> bool {
        self.add_paths(paths, PathType::Subject, true)
    }

    pub fn add_clip(&mut self, paths: &[Path64]) -> bool {
        self.add_paths(paths, PathType::Clip, false)
    }

    pub fn clear(&mut self) {
        self.clean_up();
        self.local_minima.clear();
        self.out_of_range = None;
    }

    pub fn execute(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
        closed: &mut Paths64,
    ) -> Result<(), ClipError> {
        closed.clear();

        let result = self.execute_internal(clip_type, fill_rule, false);
        if result.is_ok() {
            self.out_rec.build_paths(&mut self.out_pt, closed, None);
        }
        self.clean_up();

        self.log_result(clip_type, fill_rule, result, closed.len(), 0)
    }

    pub fn execute_with_open(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
        closed: &mut Paths64,
        open: &mut Paths64,
    ) -> Result<(), ClipError> {
        closed.clear();
        open.clear();

        let result = self.execute_internal(clip_type, fill_rule, false);
        if result.is_ok() {
            self.out_rec
                .build_paths(&mut self.out_pt, closed, Some(&mut *open));
        }
        self.clean_up();

        self.log_result(clip_type, fill_rule, result, closed.len(), open.len())
    }

    pub fn execute_tree(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
        tree: &mut PolyTree,
        open: &mut Paths64,
    ) -> Result<(), ClipError> {
        tree.clear();
        open.clear();

        let result = self.execute_internal(clip_type, fill_rule, true);
        if result.is_ok() {
            self.out_rec.build_tree(&mut self.out_pt, tree, open);
        }
        self.clean_up();

        self.log_result(clip_type, fill_rule, result, tree.count(), open.len())
    }

    fn log_result(
        &self,
        clip_type: ClipType,
        fill_rule: FillRule,
        result: Result<(), ClipError>,
        closed_count: usize,
        open_count: usize,
    ) -> Result<(), ClipError> {
        match result {
            Ok(()) => debug!(
                "{:?}/{:?} over {} local minima: {} closed, {} open",
                clip_type,
                fill_rule,
                self.local_minima.len(),
                closed_count,
                open_count
            ),
            Err(error) => warn!("{:?}/{:?} failed: {}", clip_type, fill_rule, error),
        }

        result
    }

    fn clean_up(&mut self) {
        self.t_edge.dispose();
        self.scanbeam.clean();
        self.intersections.clear();
        self.join.clear();
        self.out_rec.dispose();
        self.out_pt.clear();
        self.failure = None;
    }

    fn reset(&mut self) {
        self.local_minima.reset();
        for y in self.local_minima.y_values() {
            self.scanbeam.insert(y);
        }
    }

    fn execute_internal(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
        use_poly_tree: bool,
    ) -> Result<(), ClipError> {
        self.clean_up();

        if let Some(point) = self.out_of_range {
            return Err(ClipError::CoordinateOutOfRange(point));
        }

        self.t_edge.init(clip_type, fill_rule);
        self.out_rec.set_using_poly_tree(use_poly_tree);
        self.reset();

        let Some(mut y) = self.scanbeam.pop() else {
            return Ok(());
        };

        while self.failure.is_none() {
            trace!("scanbeam at y = {}", y);
            self.insert_local_minima_into_ael(y);
            while let Some(horz) = self.t_edge.pop_horz() {
                self.do_horizontal(horz);
            }

            if self.join.has_segments() {
                self.join.convert_segments(&mut self.out_pt, &self.out_rec);
            }

            self.bot_y = y;
            match self.scanbeam.pop() {
                Some(top_y) => y = top_y,
                None => break,
            }

            self.do_intersections(y);
            self.do_top_of_scanbeam(y);
            while let Some(horz) = self.t_edge.pop_horz() {
                self.do_horizontal(horz);
            }
        }

        if let Some(error) = self.failure.take() {
            return Err(error);
        }

        self.process_horz_joins();
        Ok(())
    }

    fn insert_local_minima_into_ael(&mut self, bot_y: i64) {
        while let Some(local_min) = self.local_minima.pop(bot_y) {
            let minimum = *self.local_minima.minimum(local_min);

            if self.t_edge.clip_type() == ClipType::NoClip && minimum.path_type == PathType::Clip {
                continue;
            }

            let flags = self.local_minima.vertex(minimum.vertex).flags;
            let mut left_bound = if flags.contains(VertexFlags::OPEN_START) {
                None
            } else {
                Some(self.t_edge.create(&self.local_minima, local_min, -1))
            };
            let mut right_bound = if flags.contains(VertexFlags::OPEN_END) {
                None
            } else {
                Some(self.t_edge.create(&self.local_minima, local_min, 1))
            };

            // left_bound descends the input ring and right_bound ascends it,
            // make sure they are placed left and right of each other
            match (left_bound, right_bound) {
                (Some(left), Some(right)) => {
                    let left_edge = &self.t_edge[left];
                    let right_edge = &self.t_edge[right];
                    let should_swap = if left_edge.is_horizontal() {
                        left_edge.is_heading_right_horz()
                    } else if right_edge.is_horizontal() {
                        right_edge.is_heading_left_horz()
                    } else {
                        left_edge.dx < right_edge.dx
                    };

                    if should_swap {
                        std::mem::swap(&mut left_bound, &mut right_bound);
                    }
                }
                (None, _) => {
                    left_bound = right_bound.take();
                }
                _ => {}
            }

            let Some(left) = left_bound else {
                continue;
            };

            self.t_edge[left].is_left_bound = true;
            self.t_edge.insert_left_edge(left, &self.local_minima);

            let contributing = if self.t_edge[left].is_open {
                self.t_edge.set_wind_count_for_open_path_edge(left);
                self.t_edge.is_contributing_open(left)
            } else {
                self.t_edge.set_wind_count_for_closed_path_edge(left);
                self.t_edge.is_contributing_closed(left)
            };

            if let Some(right) = right_bound {
                self.t_edge[right].is_left_bound = false;
                self.t_edge[right].wind_cnt = self.t_edge[left].wind_cnt;
                self.t_edge[right].wind_cnt2 = self.t_edge[left].wind_cnt2;
                self.t_edge.insert_right_edge(left, right);

                if contributing {
                    let bot = self.t_edge[left].bot;
                    self.add_local_min_poly(left, right, bot, true);
                    if !self.t_edge[left].is_horizontal() {
                        self.check_join_left(left, bot, false);
                    }
                }

                while let Some(next) = self.t_edge[right].next_in_ael {
                    if !self.t_edge.is_valid_ael_order(next, right, &self.local_minima) {
                        break;
                    }
                    let bot = self.t_edge[right].bot;
                    self.intersect_edges(right, next, bot);
                    self.t_edge.swap_positions_in_ael(right, next);
                }

                if self.t_edge[right].is_horizontal() {
                    self.t_edge.push_horz(right);
                } else {
                    let bot = self.t_edge[right].bot;
                    self.check_join_right(right, bot, false);
                    self.scanbeam.insert(self.t_edge[right].top.y);
                }
            } else if contributing {
                let bot = self.t_edge[left].bot;
                self.start_open_path(left, bot);
            }

            if self.t_edge[left].is_horizontal() {
                self.t_edge.push_horz(left);
            } else {
                self.scanbeam.insert(self.t_edge[left].top.y);
            }
        }
    }

    #[inline(always)]
    fn is_front(&self, edge: usize) -> bool {
        self.t_edge[edge]
            .out_rec
            .map_or(false, |rec| self.out_rec[rec].front_edge == Some(edge))
    }

    fn set_sides(&mut self, rec: usize, front: usize, back: usize) {
        self.out_rec[rec].front_edge = Some(front);
        self.out_rec[rec].back_edge = Some(back);
    }

    fn add_local_min_poly(&mut self, edge1: usize, edge2: usize, point: Point64, is_new: bool) -> usize {
        let rec = self.out_rec.create();
        self.t_edge[edge1].out_rec = Some(rec);
        self.t_edge[edge2].out_rec = Some(rec);

        if self.t_edge[edge1].is_open {
            self.out_rec[rec].owner = None;
            self.out_rec[rec].is_open = true;

            if self.t_edge[edge1].wind_dx > 0 {
                self.set_sides(rec, edge1, edge2);
            } else {
                self.set_sides(rec, edge2, edge1);
            }
        } else {
            match self.t_edge.get_prev_hot_edge(edge1) {
                Some(prev_hot) => {
                    if let (true, Some(prev_rec)) = (self.out_rec.using_poly_tree(), self.t_edge[prev_hot].out_rec) {
                        self.out_rec.set_owner(rec, prev_rec);
                    }

                    // output orientation follows the ascending (front) edge
                    if self.is_front(prev_hot) == is_new {
                        self.set_sides(rec, edge2, edge1);
                    } else {
                        self.set_sides(rec, edge1, edge2);
                    }
                }
                None => {
                    self.out_rec[rec].owner = None;

                    if is_new {
                        self.set_sides(rec, edge1, edge2);
                    } else {
                        self.set_sides(rec, edge2, edge1);
                    }
                }
            }
        }

        let op = self.out_pt.create(point, rec);
        self.out_rec[rec].pts = Some(op);
        op
    }

    fn add_local_max_poly(&mut self, edge1: usize, edge2: usize, point: Point64) -> Option<usize> {
        if self.t_edge[edge1].is_joined() {
            self.split(edge1, point);
        }
        if self.t_edge[edge2].is_joined() {
            self.split(edge2, point);
        }

        if self.is_front(edge1) == self.is_front(edge2) {
            let open_rec = if self.t_edge.is_open_end(edge1, &self.local_minima) {
                self.t_edge[edge1].out_rec
            } else if self.t_edge.is_open_end(edge2, &self.local_minima) {
                self.t_edge[edge2].out_rec
            } else {
                None
            };

            match open_rec {
                Some(rec) => self.out_rec.swap_front_back_sides(rec, &self.out_pt),
                None => {
                    self.failure = Some(ClipError::UnpairedMaxima);
                    return None;
                }
            }
        }

        let result = self.add_out_pt(edge1, point)?;
        let rec1 = self.t_edge[edge1].out_rec;
        let rec2 = self.t_edge[edge2].out_rec;

        if rec1 == rec2 {
            let rec = rec1?;
            self.out_rec[rec].pts = Some(result);

            if self.out_rec.using_poly_tree() {
                match self.t_edge.get_prev_hot_edge(edge1).and_then(|edge| self.t_edge[edge].out_rec) {
                    Some(owner) => self.out_rec.set_owner(rec, owner),
                    // the owner found here is verified while building the tree
                    None => self.out_rec[rec].owner = None,
                }
            }

            self.uncouple_out_rec(edge1);

            if let Some(owner) = self.out_rec[rec].owner {
                if self.out_rec[owner].front_edge.is_none() {
                    self.out_rec[rec].owner = self.out_rec.real(Some(owner));
                }
            }

            return self.out_rec[rec].pts;
        }

        // keep the winding of the surviving record
        if self.t_edge[edge1].is_open {
            if self.t_edge[edge1].wind_dx < 0 {
                self.join_out_rec_paths(edge1, edge2);
            } else {
                self.join_out_rec_paths(edge2, edge1);
            }
        } else if rec1 < rec2 {
            self.join_out_rec_paths(edge1, edge2);
        } else {
            self.join_out_rec_paths(edge2, edge1);
        }

        Some(result)
    }

    /// Appends the ring of `edge2` to the ring of `edge1` and retires the
    /// record of `edge2`, which then forwards to the record of `edge1`.
    fn join_out_rec_paths(&mut self, edge1: usize, edge2: usize) {
        let (Some(rec1), Some(rec2)) = (self.t_edge[edge1].out_rec, self.t_edge[edge2].out_rec) else {
            return;
        };
        let (Some(p1_start), Some(p2_start)) = (self.out_rec[rec1].pts, self.out_rec[rec2].pts) else {
            return;
        };

        let p1_end = self.out_pt[p1_start].next;
        let p2_end = self.out_pt[p2_start].next;

        if self.is_front(edge1) {
            self.out_pt[p2_end].prev = p1_start;
            self.out_pt[p1_start].next = p2_end;
            self.out_pt[p2_start].next = p1_end;
            self.out_pt[p1_end].prev = p2_start;

            self.out_rec[rec1].pts = Some(p2_start);
            self.out_rec[rec1].front_edge = self.out_rec[rec2].front_edge;
            if let Some(front) = self.out_rec[rec1].front_edge {
                self.t_edge[front].out_rec = Some(rec1);
            }
        } else {
            self.out_pt[p1_end].prev = p2_start;
            self.out_pt[p2_start].next = p1_end;
            self.out_pt[p1_start].next = p2_end;
            self.out_pt[p2_end].prev = p1_start;

            self.out_rec[rec1].back_edge = self.out_rec[rec2].back_edge;
            if let Some(back) = self.out_rec[rec1].back_edge {
                self.t_edge[back].out_rec = Some(rec1);
            }
        }

        self.out_rec[rec2].front_edge = None;
        self.out_rec[rec2].back_edge = None;
        self.out_rec[rec2].pts = None;

        if self.t_edge.is_open_end(edge1, &self.local_minima) {
            self.out_rec[rec2].pts = self.out_rec[rec1].pts;
            self.out_rec[rec1].pts = None;
        } else {
            self.out_rec.set_owner(rec2, rec1);
        }

        self.t_edge[edge1].out_rec = None;
        self.t_edge[edge2].out_rec = None;
    }

    fn add_out_pt(&mut self, edge: usize, point: Point64) -> Option<usize> {
        let rec = self.t_edge[edge].out_rec?;
        let to_front = self.is_front(edge);
        let op_front = self.out_rec[rec].pts?;
        let op_back = self.out_pt[op_front].next;

        if to_front && self.out_pt[op_front].point == point {
            return Some(op_front);
        }
        if !to_front && self.out_pt[op_back].point == point {
            return Some(op_back);
        }

        let new_op = self.out_pt.insert_between(point, rec, op_front, op_back);
        if to_front {
            self.out_rec[rec].pts = Some(new_op);
        }

        Some(new_op)
    }

    fn start_open_path(&mut self, edge: usize, point: Point64) -> usize {
        let rec = self.out_rec.create();
        self.out_rec[rec].is_open = true;

        if self.t_edge[edge].wind_dx > 0 {
            self.out_rec[rec].front_edge = Some(edge);
        } else {
            self.out_rec[rec].back_edge = Some(edge);
        }

        self.t_edge[edge].out_rec = Some(rec);

        let op = self.out_pt.create(point, rec);
        self.out_rec[rec].pts = Some(op);
        op
    }

    fn detach_open_edge(&mut self, edge: usize) {
        let Some(rec) = self.t_edge[edge].out_rec else {
            return;
        };

        if self.is_front(edge) {
            self.out_rec[rec].front_edge = None;
        } else {
            self.out_rec[rec].back_edge = None;
        }
        self.t_edge[edge].out_rec = None;
    }

    fn uncouple_out_rec(&mut self, edge: usize) {
        let Some(rec) = self.t_edge[edge].out_rec else {
            return;
        };

        if let Some(front) = self.out_rec[rec].front_edge.take() {
            self.t_edge[front].out_rec = None;
        }
        if let Some(back) = self.out_rec[rec].back_edge.take() {
            self.t_edge[back].out_rec = None;
        }
    }

    fn swap_out_recs(&mut self, edge1: usize, edge2: usize) {
        let rec1 = self.t_edge[edge1].out_rec;
        let rec2 = self.t_edge[edge2].out_rec;

        if rec1 == rec2 {
            if let Some(rec) = rec1 {
                let record = &mut self.out_rec[rec];
                std::mem::swap(&mut record.front_edge, &mut record.back_edge);
            }
            return;
        }

        if let Some(rec) = rec1 {
            if self.out_rec[rec].front_edge == Some(edge1) {
                self.out_rec[rec].front_edge = Some(edge2);
            } else {
                self.out_rec[rec].back_edge = Some(edge2);
            }
        }

        if let Some(rec) = rec2 {
            if self.out_rec[rec].front_edge == Some(edge2) {
                self.out_rec[rec].front_edge = Some(edge1);
            } else {
                self.out_rec[rec].back_edge = Some(edge1);
            }
        }

        self.t_edge[edge1].out_rec = rec2;
        self.t_edge[edge2].out_rec = rec1;
    }

    /// Separates a joined edge from its partner, starting a new polygon
    /// between the two at `point`.
    fn split(&mut self, edge: usize, point: Point64) {
        let join_with = self.t_edge[edge].join_with;
        self.t_edge[edge].join_with = JoinWith::NoJoin;

        if join_with == JoinWith::Right {
            if let Some(next) = self.t_edge[edge].next_in_ael {
                self.t_edge[next].join_with = JoinWith::NoJoin;
                self.add_local_min_poly(edge, next, point, true);
            }
        } else if let Some(prev) = self.t_edge[edge].prev_in_ael {
            self.t_edge[prev].join_with = JoinWith::NoJoin;
            self.add_local_min_poly(prev, edge, point, true);
        }
    }

    fn check_join_left(&mut self, edge: usize, point: Point64, check_curr_x: bool) {
        let Some(prev) = self.t_edge[edge].prev_in_ael else {
            return;
        };
        let current = self.t_edge[edge];
        let left = self.t_edge[prev];

        let (Some(rec), Some(prev_rec)) = (current.out_rec, left.out_rec) else {
            return;
        };

        if current.is_horizontal() || left.is_horizontal() || current.is_open || left.is_open {
            return;
        }

        // edges meeting at one top vertex are collinear through any point
        if current.top == left.top {
            return;
        }

        // too close to an edge end to be worth joining
        if (point.y < current.top.y + 2 || point.y < left.top.y + 2)
            && (current.bot.y > point.y || left.bot.y > point.y)
        {
            return;
        }

        if check_curr_x {
            if perpendic_dist_from_line_sqrd(point, left.bot, left.top) > JOIN_LEFT_DIST_SQRD {
                return;
            }
        } else if current.curr_x != left.curr_x {
            return;
        }

        if !is_collinear(current.top, point, left.top) {
            return;
        }

        if rec == prev_rec {
            self.add_local_max_poly(prev, edge, point);
        } else if rec < prev_rec {
            self.join_out_rec_paths(edge, prev);
        } else {
            self.join_out_rec_paths(prev, edge);
        }

        self.t_edge[prev].join_with = JoinWith::Right;
        self.t_edge[edge].join_with = JoinWith::Left;
    }

    fn check_join_right(&mut self, edge: usize, point: Point64, check_curr_x: bool) {
        let Some(next) = self.t_edge[edge].next_in_ael else {
            return;
        };
        let current = self.t_edge[edge];
        let right = self.t_edge[next];

        let (Some(rec), Some(next_rec)) = (current.out_rec, right.out_rec) else {
            return;
        };

        if current.is_horizontal() || right.is_horizontal() || current.is_open || right.is_open {
            return;
        }

        if current.top == right.top {
            return;
        }

        if (point.y < current.top.y + 2 || point.y < right.top.y + 2)
            && (current.bot.y > point.y || right.bot.y > point.y)
        {
            return;
        }

        if check_curr_x {
            if perpendic_dist_from_line_sqrd(point, right.bot, right.top) > JOIN_RIGHT_DIST_SQRD {
                return;
            }
        } else if current.curr_x != right.curr_x {
            return;
        }

        if !is_collinear(current.top, point, right.top) {
            return;
        }

        if rec == next_rec {
            self.add_local_max_poly(edge, next, point);
        } else if rec < next_rec {
            self.join_out_rec_paths(edge, next);
        } else {
            self.join_out_rec_paths(next, edge);
        }

        self.t_edge[edge].join_with = JoinWith::Right;
        self.t_edge[next].join_with = JoinWith::Left;
    }

    fn intersect_open_edge(&mut self, edge1: usize, edge2: usize, point: Point64) {
        let (edge_o, edge_c) = match (self.t_edge[edge1].is_open, self.t_edge[edge2].is_open) {
            (true, true) | (false, false) => return,
            (true, false) => (edge1, edge2),
            (false, true) => (edge2, edge1),
        };

        if self.t_edge[edge_c].is_joined() {
            self.split(edge_c, point);
        }

        let closed = self.t_edge[edge_c];
        if closed.wind_cnt.abs() != 1 {
            return;
        }

        match self.t_edge.clip_type() {
            ClipType::Union | ClipType::NoClip => {
                if !closed.is_hot() {
                    return;
                }
            }
            _ => {
                if closed.path_type == PathType::Subject {
                    return;
                }
            }
        }

        match self.t_edge.fill_rule() {
            FillRule::Positive if closed.wind_cnt != 1 => return,
            FillRule::Negative if closed.wind_cnt != -1 => return,
            _ => {}
        }

        // toggle contribution
        if self.t_edge[edge_o].is_hot() {
            self.add_out_pt(edge_o, point);
            self.detach_open_edge(edge_o);
            return;
        }

        let min_vertex = *self.local_minima.vertex(self.local_minima.minimum(self.t_edge[edge_o].local_min).vertex);

        // horizontals can pass under open paths at a local minimum
        if point == min_vertex.point && !min_vertex.flags.is_open_end() {
            if let Some(other) = self.t_edge.find_edge_with_matching_loc_min(edge_o) {
                if let Some(rec) = self.t_edge[other].out_rec {
                    self.t_edge[edge_o].out_rec = Some(rec);
                    if self.t_edge[edge_o].wind_dx > 0 {
                        self.set_sides(rec, edge_o, other);
                    } else {
                        self.set_sides(rec, other, edge_o);
                    }
                    return;
                }
            }
        }

        self.start_open_path(edge_o, point);
    }

    fn intersect_edges(&mut self, edge1: usize, edge2: usize, point: Point64) {
        if self.local_minima.has_open_paths() && (self.t_edge[edge1].is_open || self.t_edge[edge2].is_open) {
            self.intersect_open_edge(edge1, edge2, point);
            return;
        }

        if self.t_edge[edge1].is_joined() {
            self.split(edge1, point);
        }
        if self.t_edge[edge2].is_joined() {
            self.split(edge2, point);
        }

        let fill_rule = self.t_edge.fill_rule();
        let clip_type = self.t_edge.clip_type();
        let same_path_type = self.t_edge[edge1].path_type == self.t_edge[edge2].path_type;

        // update winding counts
        {
            let e1 = self.t_edge[edge1];
            let e2 = self.t_edge[edge2];

            if same_path_type {
                if fill_rule == FillRule::EvenOdd {
                    self.t_edge[edge1].wind_cnt = e2.wind_cnt;
                    self.t_edge[edge2].wind_cnt = e1.wind_cnt;
                } else {
                    self.t_edge[edge1].wind_cnt = if e1.wind_cnt + e2.wind_dx == 0 {
                        -e1.wind_cnt
                    } else {
                        e1.wind_cnt + e2.wind_dx
                    };
                    self.t_edge[edge2].wind_cnt = if e2.wind_cnt - e1.wind_dx == 0 {
                        -e2.wind_cnt
                    } else {
                        e2.wind_cnt - e1.wind_dx
                    };
                }
            } else if fill_rule == FillRule::EvenOdd {
                self.t_edge[edge1].wind_cnt2 = if e1.wind_cnt2 == 0 { 1 } else { 0 };
                self.t_edge[edge2].wind_cnt2 = if e2.wind_cnt2 == 0 { 1 } else { 0 };
            } else {
                self.t_edge[edge1].wind_cnt2 = e1.wind_cnt2 + e2.wind_dx;
                self.t_edge[edge2].wind_cnt2 = e2.wind_cnt2 - e1.wind_dx;
            }
        }

        let e1 = self.t_edge[edge1];
        let e2 = self.t_edge[edge2];
        let e1_wind_cnt = fill_rule.oriented_count(e1.wind_cnt);
        let e2_wind_cnt = fill_rule.oriented_count(e2.wind_cnt);
        let e1_in_01 = e1_wind_cnt == 0 || e1_wind_cnt == 1;
        let e2_in_01 = e2_wind_cnt == 0 || e2_wind_cnt == 1;

        if (!e1.is_hot() && !e1_in_01) || (!e2.is_hot() && !e2_in_01) {
            return;
        }

        if e1.is_hot() && e2.is_hot() {
            if !e1_in_01 || !e2_in_01 || (!same_path_type && clip_type != ClipType::Xor) {
                self.add_local_max_poly(edge1, edge2, point);
            } else if self.is_front(edge1) || e1.out_rec == e2.out_rec {
                // touching at a vertex: close one polygon and start another
                self.add_local_max_poly(edge1, edge2, point);
                self.add_local_min_poly(edge1, edge2, point, false);
            } else {
                self.add_out_pt(edge1, point);
                self.add_out_pt(edge2, point);
                self.swap_out_recs(edge1, edge2);
            }
        } else if e1.is_hot() {
            self.add_out_pt(edge1, point);
            self.swap_out_recs(edge1, edge2);
        } else if e2.is_hot() {
            self.add_out_pt(edge2, point);
            self.swap_out_recs(edge1, edge2);
        } else {
            let e1_wc2 = fill_rule.oriented_count(e1.wind_cnt2);
            let e2_wc2 = fill_rule.oriented_count(e2.wind_cnt2);

            if !same_path_type {
                self.add_local_min_poly(edge1, edge2, point, false);
            } else if e1_wind_cnt == 1 && e2_wind_cnt == 1 {
                let starts_polygon = match clip_type {
                    ClipType::Union | ClipType::NoClip => e1_wc2 <= 0 && e2_wc2 <= 0,
                    ClipType::Difference => {
                        (e1.path_type == PathType::Clip && e1_wc2 > 0 && e2_wc2 > 0)
                            || (e1.path_type == PathType::Subject && e1_wc2 <= 0 && e2_wc2 <= 0)
                    }
                    ClipType::Xor => true,
                    ClipType::Intersection => e1_wc2 > 0 && e2_wc2 > 0,
                };

                if starts_polygon {
                    self.add_local_min_poly(edge1, edge2, point, false);
                }
            }
        }
    }

    fn do_intersections(&mut self, top_y: i64) {
        if self.intersections.build(&mut self.t_edge, self.bot_y, top_y) {
            self.process_intersect_list();
            self.intersections.clear();
        }
    }

    /// Applies the crossings bottom up, keeping every processed pair
    /// adjacent in the AEL.
    fn process_intersect_list(&mut self) {
        self.intersections.sort();

        for index in 0..self.intersections.len() {
            if !self.intersections.fixup_order(index, &self.t_edge) {
                self.failure = Some(ClipError::IntersectionOrder);
                return;
            }

            let Intersection { point, edge1, edge2 } = self.intersections[index];
            self.intersect_edges(edge1, edge2, point);
            self.t_edge.swap_positions_in_ael(edge1, edge2);

            self.t_edge[edge1].curr_x = point.x;
            self.t_edge[edge2].curr_x = point.x;
            self.check_join_left(edge2, point, true);
            self.check_join_right(edge1, point, true);
        }
    }

    fn update_edge_into_ael(&mut self, edge: usize) {
        let vertex_top = self.t_edge.next_vertex(edge, &self.local_minima);
        let top = self.local_minima.vertex(vertex_top).point;

        let active = &mut self.t_edge[edge];
        active.bot = active.top;
        active.vertex_top = vertex_top;
        active.top = top;
        active.curr_x = active.bot.x;
        active.set_dx();
        let bot = active.bot;

        if self.t_edge[edge].is_joined() {
            self.split(edge, bot);
        }

        if self.t_edge[edge].is_horizontal() {
            if !self.t_edge[edge].is_open {
                self.t_edge
                    .trim_horz(edge, &self.local_minima, self.options.preserve_collinear);
            }
            return;
        }

        self.scanbeam.insert(top.y);
        self.check_join_left(edge, bot, false);
        self.check_join_right(edge, bot, true);
    }

    fn get_last_op(&self, edge: usize) -> Option<usize> {
        let rec = self.t_edge[edge].out_rec?;
        let pts = self.out_rec[rec].pts?;

        if self.out_rec[rec].front_edge == Some(edge) {
            Some(pts)
        } else {
            Some(self.out_pt[pts].next)
        }
    }

    fn add_trial_horz_join(&mut self, op: usize) {
        if !self.out_rec[self.out_pt[op].out_rec].is_open {
            self.join.add_segment(op);
        }
    }

    fn do_horizontal(&mut self, horz: usize) {
        let horz_is_open = self.t_edge[horz].is_open;
        let y = self.t_edge[horz].bot.y;
        let vertex_max = self.t_edge.curr_y_maxima_vertex(horz, &self.local_minima);

        if let Some(vertex_max) = vertex_max {
            if !horz_is_open && vertex_max != self.t_edge[horz].vertex_top {
                self.t_edge
                    .trim_horz(horz, &self.local_minima, self.options.preserve_collinear);
            }
        }

        let (mut is_left_to_right, mut horz_left, mut horz_right) =
            self.t_edge.reset_horz_direction(horz, vertex_max);

        if self.t_edge[horz].is_hot() {
            let curr_x = self.t_edge[horz].curr_x;
            if let Some(op) = self.add_out_pt(horz, Point64::new(curr_x, y)) {
                self.add_trial_horz_join(op);
            }
        }

        loop {
            let mut cursor = if is_left_to_right {
                self.t_edge[horz].next_in_ael
            } else {
                self.t_edge[horz].prev_in_ael
            };

            while let Some(edge) = cursor {
                if Some(self.t_edge[edge].vertex_top) == vertex_max {
                    if self.t_edge[horz].is_hot() && self.t_edge[edge].is_joined() {
                        let top = self.t_edge[edge].top;
                        self.split(edge, top);
                    }

                    if self.t_edge[horz].is_hot() {
                        while Some(self.t_edge[horz].vertex_top) != vertex_max && self.t_edge[horz].is_horizontal() {
                            let top = self.t_edge[horz].top;
                            self.add_out_pt(horz, top);
                            self.update_edge_into_ael(horz);
                        }

                        let top = self.t_edge[horz].top;
                        if is_left_to_right {
                            self.add_local_max_poly(horz, edge, top);
                        } else {
                            self.add_local_max_poly(edge, horz, top);
                        }
                    }

                    self.t_edge.delete_from_ael(edge);
                    self.t_edge.delete_from_ael(horz);
                    return;
                }

                // a maximum keeps going until its pair, otherwise stop once
                // past the end of the horizontal
                if vertex_max != Some(self.t_edge[horz].vertex_top)
                    || self.t_edge.is_open_end(horz, &self.local_minima)
                {
                    let active = self.t_edge[edge];

                    if (is_left_to_right && active.curr_x > horz_right)
                        || (!is_left_to_right && active.curr_x < horz_left)
                    {
                        break;
                    }

                    if active.curr_x == self.t_edge[horz].top.x && !active.is_horizontal() {
                        let next_pt = self
                            .local_minima
                            .vertex(self.t_edge.next_vertex(horz, &self.local_minima))
                            .point;
                        let top_x = active.top_x(next_pt.y);
                        let passes_open = active.is_open
                            && active.path_type != self.t_edge[horz].path_type
                            && !active.is_hot();

                        let stop = match (is_left_to_right, passes_open) {
                            (true, true) => top_x > next_pt.x,
                            (true, false) => top_x >= next_pt.x,
                            (false, true) => top_x < next_pt.x,
                            (false, false) => top_x <= next_pt.x,
                        };

                        if stop {
                            break;
                        }
                    }
                }

                let point = Point64::new(self.t_edge[edge].curr_x, y);

                if is_left_to_right {
                    self.intersect_edges(horz, edge, point);
                    self.t_edge.swap_positions_in_ael(horz, edge);
                    self.check_join_left(edge, point, false);
                    self.t_edge[horz].curr_x = self.t_edge[edge].curr_x;
                    cursor = self.t_edge[horz].next_in_ael;
                } else {
                    self.intersect_edges(edge, horz, point);
                    self.t_edge.swap_positions_in_ael(edge, horz);
                    self.check_join_right(edge, point, false);
                    self.t_edge[horz].curr_x = self.t_edge[edge].curr_x;
                    cursor = self.t_edge[horz].prev_in_ael;
                }

                if let Some(op) = self.get_last_op(horz) {
                    self.add_trial_horz_join(op);
                }
            }

            if horz_is_open && self.t_edge.is_open_end(horz, &self.local_minima) {
                if self.t_edge[horz].is_hot() {
                    let top = self.t_edge[horz].top;
                    self.add_out_pt(horz, top);
                    self.detach_open_edge(horz);
                }
                self.t_edge.delete_from_ael(horz);
                return;
            }

            let next_pt = self
                .local_minima
                .vertex(self.t_edge.next_vertex(horz, &self.local_minima))
                .point;
            if next_pt.y != self.t_edge[horz].top.y {
                break;
            }

            // more horizontals follow in this bound
            if self.t_edge[horz].is_hot() {
                let top = self.t_edge[horz].top;
                self.add_out_pt(horz, top);
            }
            self.update_edge_into_ael(horz);

            (is_left_to_right, horz_left, horz_right) = self.t_edge.reset_horz_direction(horz, vertex_max);
        }

        if self.t_edge[horz].is_hot() {
            let top = self.t_edge[horz].top;
            if let Some(op) = self.add_out_pt(horz, top) {
                self.add_trial_horz_join(op);
            }
        }

        self.update_edge_into_ael(horz);
    }

    fn do_top_of_scanbeam(&mut self, y: i64) {
        // the SEL is reused to queue horizontals
        self.t_edge.clear_sel();

        let mut cursor = self.t_edge.first_active();
        while let Some(edge) = cursor {
            if self.t_edge[edge].top.y != y {
                self.t_edge[edge].curr_x = self.t_edge[edge].top_x(y);
                cursor = self.t_edge[edge].next_in_ael;
                continue;
            }

            self.t_edge[edge].curr_x = self.t_edge[edge].top.x;

            if self.t_edge.is_maxima(edge, &self.local_minima) {
                cursor = self.do_maxima(edge);
                continue;
            }

            // intermediate vertex
            if self.t_edge[edge].is_hot() {
                let top = self.t_edge[edge].top;
                self.add_out_pt(edge, top);
            }
            self.update_edge_into_ael(edge);
            if self.t_edge[edge].is_horizontal() {
                self.t_edge.push_horz(edge);
            }

            cursor = self.t_edge[edge].next_in_ael;
        }
    }

    /// Closes the bound pair meeting at the top of `edge`. Returns the edge
    /// to continue the top of scanbeam pass with.
    fn do_maxima(&mut self, edge: usize) -> Option<usize> {
        let prev_e = self.t_edge[edge].prev_in_ael;
        let mut next_e = self.t_edge[edge].next_in_ael;
        let top = self.t_edge[edge].top;

        if self.t_edge.is_open_end(edge, &self.local_minima) {
            if self.t_edge[edge].is_hot() {
                self.add_out_pt(edge, top);
            }
            if !self.t_edge[edge].is_horizontal() {
                self.detach_open_edge(edge);
                self.t_edge.delete_from_ael(edge);
            }
            return next_e;
        }

        // a horizontal pair is handled with the horizontals
        let Some(max_pair) = self.t_edge.get_maxima_pair(edge) else {
            return next_e;
        };

        if self.t_edge[edge].is_joined() {
            self.split(edge, top);
        }
        if self.t_edge[max_pair].is_joined() {
            let pair_top = self.t_edge[max_pair].top;
            self.split(max_pair, pair_top);
        }

        // edges between the pair cross over it
        while let Some(next) = next_e.filter(|&next| next != max_pair) {
            self.intersect_edges(edge, next, top);
            self.t_edge.swap_positions_in_ael(edge, next);
            next_e = self.t_edge[edge].next_in_ael;
        }

        if self.t_edge[edge].is_hot() {
            self.add_local_max_poly(edge, max_pair, top);
        }

        self.t_edge.delete_from_ael(edge);
        self.t_edge.delete_from_ael(max_pair);

        match prev_e {
            Some(prev) => self.t_edge[prev].next_in_ael,
            None => self.t_edge.first_active(),
        }
    }

    /// Splices the horizontal joins collected during the sweep. A join
    /// inside one ring splits it in two.
    fn process_horz_joins(&mut self) {
        for join in self.join.take_joins() {
            let (op1, op2) = (join.op1, join.op2);
            let rec1 = self.out_rec.real(Some(self.out_pt[op1].out_rec));
            let rec2 = self.out_rec.real(Some(self.out_pt[op2].out_rec));
            let (Some(rec1), Some(rec2)) = (rec1, rec2) else {
                continue;
            };

            let op1b = self.out_pt[op1].next;
            let op2b = self.out_pt[op2].prev;
            self.out_pt[op1].next = op2;
            self.out_pt[op2].prev = op1;
            self.out_pt[op1b].prev = op2b;
            self.out_pt[op2b].next = op1b;

            if rec1 != rec2 {
                self.out_rec[rec2].pts = None;
                if self.out_rec.using_poly_tree() {
                    self.out_rec.set_owner(rec2, rec1);
                    self.out_rec.move_splits(rec2, rec1);
                } else {
                    self.out_rec[rec2].owner = Some(rec1);
                }
                continue;
            }

            let new_rec = self.out_rec.create();
            self.out_rec[new_rec].pts = Some(op1b);
            self.out_pt.set_out_rec(op1b, new_rec);

            if let Some(pts) = self.out_rec[rec1].pts {
                if self.out_pt[pts].out_rec == new_rec {
                    self.out_rec[rec1].pts = Some(op1);
                    self.out_pt.set_out_rec(op1, rec1);
                }
            }

            if !self.out_rec.using_poly_tree() {
                self.out_rec[new_rec].owner = Some(rec1);
                continue;
            }

            let (Some(pts1), Some(pts2)) = (self.out_rec[rec1].pts, self.out_rec[new_rec].pts) else {
                continue;
            };

            if self.out_pt.ring_inside_ring(pts1, pts2) {
                self.out_rec[rec1].pts = Some(pts2);
                self.out_rec[new_rec].pts = Some(pts1);
                self.out_pt.set_out_rec(pts2, rec1);
                self.out_pt.set_out_rec(pts1, new_rec);
                self.out_rec[new_rec].owner = Some(rec1);
            } else if self.out_pt.ring_inside_ring(pts2, pts1) {
                self.out_rec[new_rec].owner = Some(rec1);
            } else {
                self.out_rec[new_rec].owner = self.out_rec[rec1].owner;
            }

            self.out_rec[rec1].splits.push(new_rec);
        }
    }
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new(ClipperOptions::default())
    }
}
