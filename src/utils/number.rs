use crate::utils::round::ClipperRound;
use num_traits::{FromPrimitive, Num, Signed, ToPrimitive};
use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

fn wrap(index: usize, offset: usize, len: usize) -> usize {
    (index + offset) % len
}

pub trait Number:
    Num
    + Copy
    + Debug
    + Default
    + PartialOrd
    + FromPrimitive
    + ToPrimitive
    + ClipperRound
    + Signed
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    fn min_num(self, other: Self) -> Self;
    fn max_num(self, other: Self) -> Self;

    /// Shoelace area of an interleaved `[x0, y0, x1, y1, ..]` buffer.
    /// Counter-clockwise rings (y axis up) are positive.
    fn polygon_area(points: &[Self]) -> f64 {
        let len = points.len();

        if len < 6 || len & 1 != 0 {
            return 0.0;
        }

        let n_points = len >> 1;
        let mut acc = 0.0;

        for i in 0..n_points {
            let base = i << 1;
            let x0 = points[wrap(base, 0, len)].to_f64().unwrap_or_default();
            let y0 = points[wrap(base, 1, len)].to_f64().unwrap_or_default();
            let x1 = points[wrap(base, 2, len)].to_f64().unwrap_or_default();
            let y1 = points[wrap(base, 3, len)].to_f64().unwrap_or_default();

            acc += x0 * y1 - x1 * y0;
        }

        0.5 * acc
    }
}

impl Number for f64 {
    #[inline(always)]
    fn min_num(self, other: Self) -> Self {
        self.min(other)
    }
    #[inline(always)]
    fn max_num(self, other: Self) -> Self {
        self.max(other)
    }
}

impl Number for i32 {
    #[inline(always)]
    fn min_num(self, other: Self) -> Self {
        self.min(other)
    }
    #[inline(always)]
    fn max_num(self, other: Self) -> Self {
        self.max(other)
    }
}

impl Number for i64 {
    #[inline(always)]
    fn min_num(self, other: Self) -> Self {
        self.min(other)
    }
    #[inline(always)]
    fn max_num(self, other: Self) -> Self {
        self.max(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_area_sign() {
        let ccw = [0, 0, 10, 0, 10, 10, 0, 10];
        let cw = [0, 0, 0, 10, 10, 10, 10, 0];

        assert_eq!(i32::polygon_area(&ccw), 100.0);
        assert_eq!(i32::polygon_area(&cw), -100.0);
    }

    #[test]
    fn test_polygon_area_degenerate() {
        assert_eq!(i64::polygon_area(&[0, 0, 5, 5]), 0.0);
        assert_eq!(f64::polygon_area(&[0.0, 0.0, 1.0]), 0.0);
    }
}
