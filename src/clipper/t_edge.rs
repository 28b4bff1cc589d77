use crate::clipper::constants::HORIZONTAL_DX;
use crate::clipper::enums::{ClipType, FillRule, JoinWith, PathType, VertexFlags};
use crate::clipper::local_minima::LocalMinima;
use crate::clipper::utils::cross_sign;
use crate::geometry::point::Point64;
use crate::utils::round::ClipperRound;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Active {
    pub bot: Point64,
    pub top: Point64,
    pub curr_x: i64,
    pub dx: f64,
    pub wind_dx: i32,
    pub wind_cnt: i32,
    pub wind_cnt2: i32,
    pub out_rec: Option<usize>,
    pub prev_in_ael: Option<usize>,
    pub next_in_ael: Option<usize>,
    pub prev_in_sel: Option<usize>,
    pub next_in_sel: Option<usize>,
    pub jump: Option<usize>,
    pub vertex_top: usize,
    pub local_min: usize,
    pub path_type: PathType,
    pub is_open: bool,
    pub is_left_bound: bool,
    pub join_with: JoinWith,
}

impl Active {
    #[inline(always)]
    pub fn is_horizontal(&self) -> bool {
        self.top.y == self.bot.y
    }

    #[inline(always)]
    pub fn is_heading_right_horz(&self) -> bool {
        self.dx == -HORIZONTAL_DX
    }

    #[inline(always)]
    pub fn is_heading_left_horz(&self) -> bool {
        self.dx == HORIZONTAL_DX
    }

    #[inline(always)]
    pub fn is_hot(&self) -> bool {
        self.out_rec.is_some()
    }

    #[inline(always)]
    pub fn is_joined(&self) -> bool {
        self.join_with != JoinWith::NoJoin
    }

    pub fn set_dx(&mut self) {
        self.dx = get_dx(self.bot, self.top);
    }

    pub fn top_x(&self, y: i64) -> i64 {
        if y == self.top.y || self.top.x == self.bot.x {
            self.top.x
        } else if y == self.bot.y {
            self.bot.x
        } else {
            self.bot.x + (self.dx * (y - self.bot.y) as f64).clipper_rounded() as i64
        }
    }
}

/// Inverse slope; horizontals get `∓HORIZONTAL_DX` depending on heading.
pub fn get_dx(pt1: Point64, pt2: Point64) -> f64 {
    let dy = (pt2.y - pt1.y) as f64;

    if dy != 0.0 {
        (pt2.x - pt1.x) as f64 / dy
    } else if pt2.x > pt1.x {
        -HORIZONTAL_DX
    } else {
        HORIZONTAL_DX
    }
}

/// Arena of active edges plus the heads of the active edge list (AEL)
/// and the sorted edge list (SEL). The SEL doubles as the pending
/// horizontal stack between intersection passes.
pub struct TEdge {
    edges: Vec<Active>,
    active: Option<usize>,
    sorted: Option<usize>,
    clip_type: ClipType,
    fill_rule: FillRule,
}

impl TEdge {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            active: None,
            sorted: None,
            clip_type: ClipType::Intersection,
            fill_rule: FillRule::EvenOdd,
        }
    }

    pub fn init(&mut self, clip_type: ClipType, fill_rule: FillRule) {
        self.dispose();
        self.clip_type = clip_type;
        self.fill_rule = fill_rule;
    }

    pub fn dispose(&mut self) {
        self.edges.clear();
        self.active = None;
        self.sorted = None;
    }

    #[inline(always)]
    pub fn clip_type(&self) -> ClipType {
        self.clip_type
    }

    #[inline(always)]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn create(&mut self, local_minima: &LocalMinima, local_min: usize, wind_dx: i32) -> usize {
        let minimum = *local_minima.minimum(local_min);
        let bot = local_minima.vertex(minimum.vertex).point;
        let vertex_top = if wind_dx < 0 {
            local_minima.vertex(minimum.vertex).prev
        } else {
            local_minima.vertex(minimum.vertex).next
        };
        let top = local_minima.vertex(vertex_top).point;
        let index = self.edges.len();

        self.edges.push(Active {
            bot,
            top,
            curr_x: bot.x,
            dx: get_dx(bot, top),
            wind_dx,
            wind_cnt: 0,
            wind_cnt2: 0,
            out_rec: None,
            prev_in_ael: None,
            next_in_ael: None,
            prev_in_sel: None,
            next_in_sel: None,
            jump: None,
            vertex_top,
            local_min,
            path_type: minimum.path_type,
            is_open: minimum.is_open,
            is_left_bound: false,
            join_with: JoinWith::NoJoin,
        });

        index
    }

    #[inline(always)]
    pub fn first_active(&self) -> Option<usize> {
        self.active
    }

    #[inline(always)]
    pub fn first_sorted(&self) -> Option<usize> {
        self.sorted
    }

    #[inline(always)]
    pub fn set_first_sorted(&mut self, edge: Option<usize>) {
        self.sorted = edge;
    }

    pub fn ael(&self) -> AelIter<'_> {
        AelIter {
            store: self,
            current: self.active,
        }
    }

    pub fn next_vertex(&self, edge: usize, local_minima: &LocalMinima) -> usize {
        let Active { wind_dx, vertex_top, .. } = self.edges[edge];
        let vertex = local_minima.vertex(vertex_top);

        if wind_dx > 0 {
            vertex.next
        } else {
            vertex.prev
        }
    }

    pub fn prev_prev_vertex(&self, edge: usize, local_minima: &LocalMinima) -> usize {
        let Active { wind_dx, vertex_top, .. } = self.edges[edge];
        let vertex = local_minima.vertex(vertex_top);

        if wind_dx > 0 {
            local_minima.vertex(vertex.prev).prev
        } else {
            local_minima.vertex(vertex.next).next
        }
    }

    pub fn is_maxima(&self, edge: usize, local_minima: &LocalMinima) -> bool {
        local_minima
            .vertex(self.edges[edge].vertex_top)
            .flags
            .contains(VertexFlags::LOCAL_MAX)
    }

    pub fn is_open_end(&self, edge: usize, local_minima: &LocalMinima) -> bool {
        self.edges[edge].is_open && local_minima.vertex(self.edges[edge].vertex_top).flags.is_open_end()
    }

    /// Whether `newcomer` belongs to the right of `resident` in the AEL.
    pub fn is_valid_ael_order(&self, resident: usize, newcomer: usize, local_minima: &LocalMinima) -> bool {
        let res = &self.edges[resident];
        let new = &self.edges[newcomer];

        if new.curr_x != res.curr_x {
            return new.curr_x > res.curr_x;
        }

        // turning direction of resident.top, newcomer.bot, newcomer.top
        let d = cross_sign(res.top, new.bot, new.top);
        if d != 0 {
            return d < 0;
        }

        // collinear edges
        if !self.is_maxima(resident, local_minima) && res.top.y > new.top.y {
            let next = local_minima.vertex(self.next_vertex(resident, local_minima)).point;
            return cross_sign(new.bot, res.top, next) <= 0;
        }

        if !self.is_maxima(newcomer, local_minima) && new.top.y > res.top.y {
            let next = local_minima.vertex(self.next_vertex(newcomer, local_minima)).point;
            return cross_sign(new.bot, new.top, next) >= 0;
        }

        let y = new.bot.y;
        let new_is_left = new.is_left_bound;
        let res_min_y = local_minima.vertex(local_minima.minimum(res.local_min).vertex).point.y;

        if res.bot.y != y || res_min_y != y {
            return new_is_left;
        }

        // resident was also just inserted
        if res.is_left_bound != new_is_left {
            return new_is_left;
        }

        let res_pp = local_minima.vertex(self.prev_prev_vertex(resident, local_minima)).point;
        if cross_sign(res_pp, res.bot, res.top) == 0 {
            return true;
        }

        let new_pp = local_minima.vertex(self.prev_prev_vertex(newcomer, local_minima)).point;
        (cross_sign(res_pp, new.bot, new_pp) > 0) == new_is_left
    }

    pub fn insert_left_edge(&mut self, edge: usize, local_minima: &LocalMinima) {
        let head = match self.active {
            None => {
                self.edges[edge].prev_in_ael = None;
                self.edges[edge].next_in_ael = None;
                self.active = Some(edge);
                return;
            }
            Some(head) => head,
        };

        if !self.is_valid_ael_order(head, edge, local_minima) {
            self.edges[edge].prev_in_ael = None;
            self.edges[edge].next_in_ael = Some(head);
            self.edges[head].prev_in_ael = Some(edge);
            self.active = Some(edge);
            return;
        }

        let mut cursor = head;
        while let Some(next) = self.edges[cursor].next_in_ael {
            if !self.is_valid_ael_order(next, edge, local_minima) {
                break;
            }
            cursor = next;
        }

        // never split a joined pair
        if self.edges[cursor].join_with == JoinWith::Right {
            match self.edges[cursor].next_in_ael {
                Some(next) => cursor = next,
                None => return,
            }
        }

        self.insert_after(cursor, edge);
    }

    pub fn insert_right_edge(&mut self, left: usize, edge: usize) {
        self.insert_after(left, edge);
    }

    fn insert_after(&mut self, left: usize, edge: usize) {
        let next = self.edges[left].next_in_ael;

        self.edges[edge].next_in_ael = next;
        if let Some(next) = next {
            self.edges[next].prev_in_ael = Some(edge);
        }
        self.edges[edge].prev_in_ael = Some(left);
        self.edges[left].next_in_ael = Some(edge);
    }

    pub fn delete_from_ael(&mut self, edge: usize) {
        let Active {
            prev_in_ael: prev,
            next_in_ael: next,
            ..
        } = self.edges[edge];

        if prev.is_none() && next.is_none() && self.active != Some(edge) {
            return;
        }

        match prev {
            Some(prev) => self.edges[prev].next_in_ael = next,
            None => self.active = next,
        }

        if let Some(next) = next {
            self.edges[next].prev_in_ael = prev;
        }

        self.edges[edge].prev_in_ael = None;
        self.edges[edge].next_in_ael = None;
    }

    /// Swaps two AEL neighbours; `edge1` must be immediately left of `edge2`.
    pub fn swap_positions_in_ael(&mut self, edge1: usize, edge2: usize) {
        let next = self.edges[edge2].next_in_ael;
        let prev = self.edges[edge1].prev_in_ael;

        if let Some(next) = next {
            self.edges[next].prev_in_ael = Some(edge1);
        }
        if let Some(prev) = prev {
            self.edges[prev].next_in_ael = Some(edge2);
        }

        self.edges[edge2].prev_in_ael = prev;
        self.edges[edge2].next_in_ael = Some(edge1);
        self.edges[edge1].prev_in_ael = Some(edge2);
        self.edges[edge1].next_in_ael = next;

        if prev.is_none() {
            self.active = Some(edge2);
        }
    }

    pub fn push_horz(&mut self, edge: usize) {
        self.edges[edge].next_in_sel = self.sorted;
        self.sorted = Some(edge);
    }

    pub fn pop_horz(&mut self) -> Option<usize> {
        let edge = self.sorted?;
        self.sorted = self.edges[edge].next_in_sel;
        Some(edge)
    }

    pub fn clear_sel(&mut self) {
        self.sorted = None;
    }

    pub fn set_wind_count_for_closed_path_edge(&mut self, edge: usize) {
        let path_type = self.edges[edge].path_type;
        let wind_dx = self.edges[edge].wind_dx;
        let is_even_odd = self.fill_rule == FillRule::EvenOdd;

        // nearest closed edge of the same path type to the left
        let mut left = self.edges[edge].prev_in_ael;
        while let Some(index) = left {
            let other = &self.edges[index];
            if other.path_type == path_type && !other.is_open {
                break;
            }
            left = other.prev_in_ael;
        }

        let mut cursor = match left {
            None => {
                self.edges[edge].wind_cnt = wind_dx;
                self.active
            }
            Some(left) if is_even_odd => {
                self.edges[edge].wind_cnt = wind_dx;
                self.edges[edge].wind_cnt2 = self.edges[left].wind_cnt2;
                self.edges[left].next_in_ael
            }
            Some(left) => {
                let Active {
                    wind_cnt: left_cnt,
                    wind_dx: left_dx,
                    wind_cnt2: left_cnt2,
                    ..
                } = self.edges[left];

                // wind_cnt of an edge is the higher count of its two regions
                self.edges[edge].wind_cnt = if left_cnt * left_dx < 0 {
                    if left_cnt.abs() > 1 {
                        if left_dx * wind_dx < 0 {
                            left_cnt
                        } else {
                            left_cnt + wind_dx
                        }
                    } else if self.edges[edge].is_open {
                        1
                    } else {
                        wind_dx
                    }
                } else if left_dx * wind_dx < 0 {
                    left_cnt
                } else {
                    left_cnt + wind_dx
                };
                self.edges[edge].wind_cnt2 = left_cnt2;
                self.edges[left].next_in_ael
            }
        };

        while let Some(index) = cursor {
            if index == edge {
                break;
            }

            let other = self.edges[index];
            if other.path_type != path_type && !other.is_open {
                let wind_cnt2 = &mut self.edges[edge].wind_cnt2;
                if is_even_odd {
                    *wind_cnt2 = if *wind_cnt2 == 0 { 1 } else { 0 };
                } else {
                    *wind_cnt2 += other.wind_dx;
                }
            }
            cursor = other.next_in_ael;
        }
    }

    pub fn set_wind_count_for_open_path_edge(&mut self, edge: usize) {
        let mut cursor = self.active;
        let mut subject_cnt = 0;
        let mut clip_cnt = 0;

        while let Some(index) = cursor {
            if index == edge {
                break;
            }

            let other = &self.edges[index];
            let delta = if self.fill_rule == FillRule::EvenOdd {
                1
            } else {
                other.wind_dx
            };

            if other.path_type == PathType::Clip {
                clip_cnt += delta;
            } else if !other.is_open {
                subject_cnt += delta;
            }
            cursor = other.next_in_ael;
        }

        if self.fill_rule == FillRule::EvenOdd {
            subject_cnt &= 1;
            clip_cnt &= 1;
        }

        self.edges[edge].wind_cnt = subject_cnt;
        self.edges[edge].wind_cnt2 = clip_cnt;
    }

    pub fn is_contributing_closed(&self, edge: usize) -> bool {
        let Active {
            wind_cnt,
            wind_cnt2,
            path_type,
            ..
        } = self.edges[edge];

        // the edge must separate an unfilled region from a filled one
        if self.fill_rule != FillRule::EvenOdd && self.fill_rule.oriented_count(wind_cnt) != 1 {
            return false;
        }

        let outside_other = match self.fill_rule {
            FillRule::Positive => wind_cnt2 <= 0,
            FillRule::Negative => wind_cnt2 >= 0,
            _ => wind_cnt2 == 0,
        };

        match self.clip_type {
            ClipType::Intersection => !outside_other,
            ClipType::Union | ClipType::NoClip => outside_other,
            ClipType::Difference => (path_type == PathType::Subject) == outside_other,
            ClipType::Xor => true,
        }
    }

    pub fn is_contributing_open(&self, edge: usize) -> bool {
        let Active {
            wind_cnt,
            wind_cnt2,
            ..
        } = self.edges[edge];

        let (in_subject, in_clip) = match self.fill_rule {
            FillRule::Positive => (wind_cnt > 0, wind_cnt2 > 0),
            FillRule::Negative => (wind_cnt < 0, wind_cnt2 < 0),
            _ => (wind_cnt != 0, wind_cnt2 != 0),
        };

        match self.clip_type {
            ClipType::Intersection => in_clip,
            ClipType::Union | ClipType::NoClip => !in_subject && !in_clip,
            _ => !in_clip,
        }
    }

    pub fn get_prev_hot_edge(&self, edge: usize) -> Option<usize> {
        let mut prev = self.edges[edge].prev_in_ael;

        while let Some(index) = prev {
            let other = &self.edges[index];
            if !other.is_open && other.is_hot() {
                return Some(index);
            }
            prev = other.prev_in_ael;
        }

        None
    }

    pub fn get_maxima_pair(&self, edge: usize) -> Option<usize> {
        let vertex_top = self.edges[edge].vertex_top;
        let mut next = self.edges[edge].next_in_ael;

        while let Some(index) = next {
            if self.edges[index].vertex_top == vertex_top {
                return Some(index);
            }
            next = self.edges[index].next_in_ael;
        }

        None
    }

    /// The other bound started by the same local minimum, searched
    /// through the run of edges sharing `edge.bot`.
    pub fn find_edge_with_matching_loc_min(&self, edge: usize) -> Option<usize> {
        let Active { local_min, bot, .. } = self.edges[edge];

        let mut cursor = self.edges[edge].next_in_ael;
        while let Some(index) = cursor {
            let other = &self.edges[index];
            if other.local_min == local_min {
                return Some(index);
            }
            if !other.is_horizontal() && other.bot != bot {
                break;
            }
            cursor = other.next_in_ael;
        }

        cursor = self.edges[edge].prev_in_ael;
        while let Some(index) = cursor {
            let other = &self.edges[index];
            if other.local_min == local_min {
                return Some(index);
            }
            if !other.is_horizontal() && other.bot != bot {
                return None;
            }
            cursor = other.prev_in_ael;
        }

        None
    }

    /// Moves every edge to its x at `top_y` and copies the AEL into the SEL.
    pub fn adjust_curr_x_and_copy_to_sel(&mut self, top_y: i64) {
        let mut cursor = self.active;
        self.sorted = cursor;

        while let Some(index) = cursor {
            let Active {
                prev_in_ael,
                next_in_ael,
                join_with,
                ..
            } = self.edges[index];

            let curr_x = match (join_with, prev_in_ael) {
                (JoinWith::Left, Some(prev)) => self.edges[prev].curr_x,
                _ => self.edges[index].top_x(top_y),
            };

            let active = &mut self.edges[index];
            active.prev_in_sel = prev_in_ael;
            active.next_in_sel = next_in_ael;
            active.jump = next_in_ael;
            active.curr_x = curr_x;
            cursor = next_in_ael;
        }
    }

    pub fn extract_from_sel(&mut self, edge: usize) -> Option<usize> {
        let Active {
            prev_in_sel: prev,
            next_in_sel: next,
            ..
        } = self.edges[edge];

        if let Some(next) = next {
            self.edges[next].prev_in_sel = prev;
        }
        if let Some(prev) = prev {
            self.edges[prev].next_in_sel = next;
        }

        next
    }

    pub fn insert1_before2_in_sel(&mut self, edge1: usize, edge2: usize) {
        let prev = self.edges[edge2].prev_in_sel;

        self.edges[edge1].prev_in_sel = prev;
        if let Some(prev) = prev {
            self.edges[prev].next_in_sel = Some(edge1);
        }
        self.edges[edge1].next_in_sel = Some(edge2);
        self.edges[edge2].prev_in_sel = Some(edge1);
    }

    /// Maximum vertex at the end of the horizontal run starting at the
    /// edge top, if that run ends in one.
    pub fn curr_y_maxima_vertex(&self, edge: usize, local_minima: &LocalMinima) -> Option<usize> {
        let Active {
            wind_dx,
            vertex_top,
            is_open,
            ..
        } = self.edges[edge];
        let stop = if is_open {
            VertexFlags::OPEN_END | VertexFlags::LOCAL_MAX
        } else {
            VertexFlags::NONE
        };

        let mut result = vertex_top;
        loop {
            let vertex = local_minima.vertex(result);
            let next = if wind_dx > 0 { vertex.next } else { vertex.prev };

            if local_minima.vertex(next).point.y != vertex.point.y || vertex.flags.contains(stop) {
                break;
            }
            result = next;
        }

        local_minima
            .vertex(result)
            .flags
            .contains(VertexFlags::LOCAL_MAX)
            .then_some(result)
    }

    /// Direction of a horizontal and the x range it still has to cover.
    /// Returns `(is_left_to_right, left, right)`.
    pub fn reset_horz_direction(&self, horz: usize, vertex_max: Option<usize>) -> (bool, i64, i64) {
        let Active {
            bot, top, curr_x, ..
        } = self.edges[horz];

        if bot.x == top.x {
            // going nowhere, head for the maxima pair if it lies to the right
            let mut cursor = self.edges[horz].next_in_ael;
            while let Some(index) = cursor {
                if Some(self.edges[index].vertex_top) == vertex_max {
                    break;
                }
                cursor = self.edges[index].next_in_ael;
            }
            (cursor.is_some(), curr_x, curr_x)
        } else if curr_x < top.x {
            (true, curr_x, top.x)
        } else {
            (false, top.x, curr_x)
        }
    }

    /// Extends a horizontal over the following horizontal vertices. With
    /// `preserve_collinear` only 180 degree spikes are folded in.
    pub fn trim_horz(&mut self, edge: usize, local_minima: &LocalMinima, preserve_collinear: bool) {
        let mut was_trimmed = false;
        let mut point = local_minima.vertex(self.next_vertex(edge, local_minima)).point;

        while point.y == self.edges[edge].top.y {
            let Active { bot, top, .. } = self.edges[edge];
            if preserve_collinear && (point.x < top.x) != (bot.x < top.x) {
                break;
            }

            let vertex_top = self.next_vertex(edge, local_minima);
            self.edges[edge].vertex_top = vertex_top;
            self.edges[edge].top = point;
            was_trimmed = true;

            if self.is_maxima(edge, local_minima) {
                break;
            }
            point = local_minima.vertex(self.next_vertex(edge, local_minima)).point;
        }

        if was_trimmed {
            self.edges[edge].set_dx();
        }
    }
}

impl Default for TEdge {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for TEdge {
    type Output = Active;

    fn index(&self, index: usize) -> &Self::Output {
        &self.edges[index]
    }
}

impl IndexMut<usize> for TEdge {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.edges[index]
    }
}

pub struct AelIter<'a> {
    store: &'a TEdge,
    current: Option<usize>,
}

impl<'a> Iterator for AelIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        self.current = self.store.edges[index].next_in_ael;
        Some(index)
    }
}
