use crate::geometry::point::Point64;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipError {
    /// An input coordinate is outside `MIN_COORD..=MAX_COORD`.
    CoordinateOutOfRange(Point64),
    /// No adjacent pair could be found for a pending intersection.
    IntersectionOrder,
    /// Both bounds of a local maximum sit on the same side of one output record.
    UnpairedMaxima,
    UnknownClipType(u8),
    UnknownFillRule(u8),
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipError::CoordinateOutOfRange(point) => {
                write!(f, "coordinate {} is outside the supported range", point)
            }
            ClipError::IntersectionOrder => {
                write!(f, "intersections could not be ordered between adjacent edges")
            }
            ClipError::UnpairedMaxima => {
                write!(f, "local maximum edges do not close an output polygon")
            }
            ClipError::UnknownClipType(value) => write!(f, "unknown clip type {}", value),
            ClipError::UnknownFillRule(value) => write!(f, "unknown fill rule {}", value),
        }
    }
}

impl Error for ClipError {}
