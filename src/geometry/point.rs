use crate::utils::number::Number;
use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point<T: Number> {
    pub x: T,
    pub y: T,
}

pub type Point64 = Point<i64>;
pub type Path64 = Vec<Point64>;
pub type Paths64 = Vec<Path64>;

impl<T: Number> Point<T> {
    #[inline(always)]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn min(&self, other: &Self) -> Self {
        Self::new(self.x.min_num(other.x), self.y.min_num(other.y))
    }

    #[inline(always)]
    pub fn max(&self, other: &Self) -> Self {
        Self::new(self.x.max_num(other.x), self.y.max_num(other.y))
    }

    pub fn to_f64(&self) -> (f64, f64) {
        (
            self.x.to_f64().unwrap_or_default(),
            self.y.to_f64().unwrap_or_default(),
        )
    }
}

impl<T: Number + fmt::Display> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Builds a path from interleaved `[x0, y0, x1, y1, ..]` coordinates.
pub fn path_from_coords(coords: &[i64]) -> Path64 {
    coords
        .chunks_exact(2)
        .map(|chunk| Point64::new(chunk[0], chunk[1]))
        .collect()
}
