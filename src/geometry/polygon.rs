use crate::geometry::point::Point;
use crate::utils::number::Number;

/// Signed shoelace area. Counter-clockwise paths (y axis up) are positive.
pub fn area<T: Number>(path: &[Point<T>]) -> f64 {
    let count = path.len();
    if count < 3 {
        return 0.0;
    }

    let mut result = 0.0;
    let (mut prev_x, mut prev_y) = path[count - 1].to_f64();

    for point in path {
        let (x, y) = point.to_f64();
        result += (prev_y + y) * (prev_x - x);
        prev_x = x;
        prev_y = y;
    }

    result * 0.5
}

pub fn is_positive<T: Number>(path: &[Point<T>]) -> bool {
    area(path) >= 0.0
}

pub fn total_area<T: Number>(paths: &[Vec<Point<T>>]) -> f64 {
    paths.iter().map(|path| area(path)).sum()
}
