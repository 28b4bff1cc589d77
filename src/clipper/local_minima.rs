use crate::clipper::enums::{PathType, VertexFlags};
use crate::geometry::point::Point64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub point: Point64,
    pub next: usize,
    pub prev: usize,
    pub flags: VertexFlags,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalMinimum {
    pub vertex: usize,
    pub path_type: PathType,
    pub is_open: bool,
}

/// Input vertex rings and the local minima found on them. Survives
/// between executions until `clear`.
pub struct LocalMinima {
    vertices: Vec<Vertex>,
    minima: Vec<LocalMinimum>,
    current: usize,
    is_sorted: bool,
    has_open_paths: bool,
}

impl LocalMinima {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            minima: Vec::new(),
            current: 0,
            is_sorted: false,
            has_open_paths: false,
        }
    }

    #[inline(always)]
    pub fn vertex(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }

    #[inline(always)]
    pub fn minimum(&self, index: usize) -> &LocalMinimum {
        &self.minima[index]
    }

    #[inline(always)]
    pub fn vertex_y(&self, index: usize) -> i64 {
        self.vertices[index].point.y
    }

    pub fn len(&self) -> usize {
        self.minima.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minima.is_empty()
    }

    pub fn has_open_paths(&self) -> bool {
        self.has_open_paths
    }

    /// Links `path` into a vertex ring and records its local minima.
    /// Returns false when the path cannot produce any edge.
    pub fn add_path(&mut self, path: &[Point64], path_type: PathType, is_open: bool) -> bool {
        let mut points: Vec<Point64> = Vec::with_capacity(path.len());
        for point in path {
            if points.last() != Some(point) {
                points.push(*point);
            }
        }

        if !is_open && points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        let count = points.len();
        if count < 2 || (count == 2 && !is_open) {
            return false;
        }

        // only open paths may be completely flat
        if !is_open && points.iter().all(|point| point.y == points[0].y) {
            return false;
        }

        let first = self.vertices.len();
        for (i, point) in points.iter().enumerate() {
            self.vertices.push(Vertex {
                point: *point,
                prev: first + (i + count - 1) % count,
                next: first + (i + 1) % count,
                flags: VertexFlags::NONE,
            });
        }

        self.find_minima(first, path_type, is_open);
        self.is_sorted = false;

        if is_open {
            self.has_open_paths = true;
        }

        true
    }

    // "going up" means heading towards smaller y, the direction of the sweep
    fn find_minima(&mut self, first: usize, path_type: PathType, is_open: bool) {
        let mut going_up;

        if is_open {
            let mut curr = self.vertices[first].next;
            while curr != first && self.vertex_y(curr) == self.vertex_y(first) {
                curr = self.vertices[curr].next;
            }
            going_up = self.vertex_y(curr) <= self.vertex_y(first);

            if going_up {
                self.vertices[first].flags = VertexFlags::OPEN_START;
                self.add_local_min(first, path_type, true);
            } else {
                self.vertices[first].flags = VertexFlags::OPEN_START | VertexFlags::LOCAL_MAX;
            }
        } else {
            let mut prev = self.vertices[first].prev;
            while prev != first && self.vertex_y(prev) == self.vertex_y(first) {
                prev = self.vertices[prev].prev;
            }
            going_up = self.vertex_y(prev) > self.vertex_y(first);
        }

        let going_up0 = going_up;
        let mut prev = first;
        let mut curr = self.vertices[first].next;

        while curr != first {
            if self.vertex_y(curr) > self.vertex_y(prev) && going_up {
                self.vertices[prev].flags.insert(VertexFlags::LOCAL_MAX);
                going_up = false;
            } else if self.vertex_y(curr) < self.vertex_y(prev) && !going_up {
                going_up = true;
                self.add_local_min(prev, path_type, is_open);
            }
            prev = curr;
            curr = self.vertices[curr].next;
        }

        if is_open {
            self.vertices[prev].flags.insert(VertexFlags::OPEN_END);
            if going_up {
                self.vertices[prev].flags.insert(VertexFlags::LOCAL_MAX);
            } else {
                self.add_local_min(prev, path_type, is_open);
            }
        } else if going_up != going_up0 {
            if going_up0 {
                self.add_local_min(prev, path_type, false);
            } else {
                self.vertices[prev].flags.insert(VertexFlags::LOCAL_MAX);
            }
        }
    }

    fn add_local_min(&mut self, vertex: usize, path_type: PathType, is_open: bool) {
        // a vertex can only be a local minimum once
        if self.vertices[vertex].flags.contains(VertexFlags::LOCAL_MIN) {
            return;
        }

        self.vertices[vertex].flags.insert(VertexFlags::LOCAL_MIN);
        self.minima.push(LocalMinimum {
            vertex,
            path_type,
            is_open,
        });
    }

    /// Orders minima by sweep position (larger y first, then smaller x)
    /// and rewinds the cursor.
    pub fn reset(&mut self) {
        if !self.is_sorted {
            let vertices = &self.vertices;
            self.minima.sort_by(|a, b| {
                let pa = vertices[a.vertex].point;
                let pb = vertices[b.vertex].point;
                pb.y.cmp(&pa.y).then(pa.x.cmp(&pb.x))
            });
            self.is_sorted = true;
        }

        self.current = 0;
    }

    pub fn y_values(&self) -> impl Iterator<Item = i64> + '_ {
        self.minima
            .iter()
            .map(move |minimum| self.vertices[minimum.vertex].point.y)
    }

    pub fn pop(&mut self, y: i64) -> Option<usize> {
        let minimum = self.minima.get(self.current)?;

        if self.vertices[minimum.vertex].point.y != y {
            return None;
        }

        self.current += 1;
        Some(self.current - 1)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.minima.clear();
        self.current = 0;
        self.is_sorted = false;
        self.has_open_paths = false;
    }
}

impl Default for LocalMinima {
    fn default() -> Self {
        Self::new()
    }
}
