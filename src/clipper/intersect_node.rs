use crate::clipper::constants::NEAR_HORIZONTAL_DX;
use crate::clipper::t_edge::TEdge;
use crate::clipper::utils::{closest_point_on_segment, segment_intersect_pt};
use crate::geometry::point::Point64;
use std::ops::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    pub point: Point64,
    pub edge1: usize,
    pub edge2: usize,
}

pub struct IntersectNode {
    nodes: Vec<Intersection>,
}

impl IntersectNode {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Collects every crossing needed to bring the AEL from its order at
    /// `bot_y` to its order at `top_y`. A stable merge sort over the SEL
    /// (runs linked through `jump`) records each pair it has to swap, so
    /// only edges that become adjacent are ever paired.
    pub fn build(&mut self, t_edge: &mut TEdge, bot_y: i64, top_y: i64) -> bool {
        match t_edge.first_active() {
            Some(first) if t_edge[first].next_in_ael.is_some() => {}
            _ => return false,
        }

        t_edge.adjust_curr_x_and_copy_to_sel(top_y);

        let mut left = t_edge.first_sorted();
        while let Some(run) = left.filter(|&index| t_edge[index].jump.is_some()) {
            let mut prev_base: Option<usize> = None;
            left = Some(run);

            while let Some(mut curr_left) = left {
                let Some(mut right) = t_edge[curr_left].jump else {
                    break;
                };

                let mut curr_base = curr_left;
                let mut l_end = right;
                let r_end = t_edge[right].jump;
                t_edge[curr_left].jump = r_end;

                while curr_left != l_end && Some(right) != r_end {
                    if t_edge[right].curr_x < t_edge[curr_left].curr_x {
                        let mut tmp = t_edge[right].prev_in_sel;
                        while let Some(edge) = tmp {
                            self.add_node(t_edge, edge, right, bot_y, top_y);
                            if edge == curr_left {
                                break;
                            }
                            tmp = t_edge[edge].prev_in_sel;
                        }

                        let moved = right;
                        let next = t_edge.extract_from_sel(moved);
                        t_edge.insert1_before2_in_sel(moved, curr_left);

                        if curr_left == curr_base {
                            curr_base = moved;
                            t_edge[curr_base].jump = r_end;
                            match prev_base {
                                Some(base) => t_edge[base].jump = Some(curr_base),
                                None => t_edge.set_first_sorted(Some(curr_base)),
                            }
                        }

                        match next {
                            Some(next) => {
                                right = next;
                                l_end = next;
                            }
                            None => break,
                        }
                    } else {
                        match t_edge[curr_left].next_in_sel {
                            Some(next) => curr_left = next,
                            None => break,
                        }
                    }
                }

                prev_base = Some(curr_base);
                left = r_end;
            }

            left = t_edge.first_sorted();
        }

        !self.nodes.is_empty()
    }

    fn add_node(&mut self, t_edge: &TEdge, edge1: usize, edge2: usize, bot_y: i64, top_y: i64) {
        let e1 = &t_edge[edge1];
        let e2 = &t_edge[edge2];

        // parallel edges
        let mut point = segment_intersect_pt(e1.bot, e1.top, e2.bot, e2.top)
            .unwrap_or_else(|| Point64::new(e1.curr_x, top_y));

        if point.y > bot_y || point.y < top_y {
            let abs_dx1 = e1.dx.abs();
            let abs_dx2 = e2.dx.abs();

            point = if abs_dx1 > NEAR_HORIZONTAL_DX && abs_dx1 > abs_dx2 {
                closest_point_on_segment(point, e1.bot, e1.top)
            } else if abs_dx2 > NEAR_HORIZONTAL_DX {
                closest_point_on_segment(point, e2.bot, e2.top)
            } else {
                let y = if point.y < top_y { top_y } else { bot_y };
                let x = if abs_dx1 < abs_dx2 {
                    e1.top_x(y)
                } else {
                    e2.top_x(y)
                };
                Point64::new(x, y)
            };
        }

        self.nodes.push(Intersection {
            point,
            edge1,
            edge2,
        });
    }

    /// Sweep order: larger y first, then smaller x.
    pub fn sort(&mut self) {
        self.nodes
            .sort_by(|a, b| b.point.y.cmp(&a.point.y).then(a.point.x.cmp(&b.point.x)));
    }

    pub fn edges_adjacent(&self, index: usize, t_edge: &TEdge) -> bool {
        let Intersection { edge1, edge2, .. } = self.nodes[index];

        t_edge[edge1].next_in_ael == Some(edge2) || t_edge[edge1].prev_in_ael == Some(edge2)
    }

    /// Makes sure the node at `index` pairs AEL neighbours, pulling the next
    /// such node forward when it does not. False when none is left.
    pub fn fixup_order(&mut self, index: usize, t_edge: &TEdge) -> bool {
        if self.edges_adjacent(index, t_edge) {
            return true;
        }

        match (index + 1..self.nodes.len()).find(|&next| self.edges_adjacent(next, t_edge)) {
            Some(next) => {
                self.nodes.swap(index, next);
                true
            }
            None => false,
        }
    }
}

impl Default for IntersectNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for IntersectNode {
    type Output = Intersection;

    fn index(&self, index: usize) -> &Self::Output {
        &self.nodes[index]
    }
}
