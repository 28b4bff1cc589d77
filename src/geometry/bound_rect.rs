use crate::geometry::point::Point;
use crate::utils::number::Number;

/// Axis aligned bounds. `top` is the smaller y.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BoundRect<T: Number> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
}

impl<T: Number> BoundRect<T> {
    pub fn new(left: T, top: T, right: T, bottom: T) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds of `points`, or an empty rect when there are none.
    pub fn from_points(points: &[Point<T>]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        let mut min = *first;
        let mut max = *first;

        for point in &points[1..] {
            min = min.min(point);
            max = max.max(point);
        }

        Self::new(min.x, min.y, max.x, max.y)
    }

    pub fn width(&self) -> T {
        self.right - self.left
    }

    pub fn height(&self) -> T {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.bottom <= self.top || self.right <= self.left
    }

    pub fn contains(&self, other: &Self) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    pub fn mid_point(&self) -> Point<T> {
        let two = T::one() + T::one();
        Point::new(
            (self.left + self.right) / two,
            (self.top + self.bottom) / two,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::{path_from_coords, Point64};

    #[test]
    fn test_from_points() {
        let rect = BoundRect::from_points(&path_from_coords(&[5, 1, -3, 8, 2, -4]));

        assert_eq!(rect, BoundRect::new(-3, -4, 5, 8));
        assert_eq!(rect.width(), 8);
        assert_eq!(rect.height(), 12);
        assert_eq!(rect.mid_point(), Point64::new(1, 2));
    }

    #[test]
    fn test_empty() {
        assert!(BoundRect::<i64>::from_points(&[]).is_empty());
        assert!(BoundRect::from_points(&path_from_coords(&[0, 5, 10, 5])).is_empty());
        assert!(!BoundRect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_contains() {
        let outer = BoundRect::new(0, 0, 100, 100);

        assert!(outer.contains(&BoundRect::new(10, 10, 90, 90)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&BoundRect::new(-1, 10, 90, 90)));
    }
}
