use crate::clipper::error::ClipError;
use std::ops::BitOr;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum ClipType {
    NoClip = 0,
    Intersection = 1,
    Union = 2,
    Difference = 3,
    Xor = 4,
}

impl TryFrom<u8> for ClipType {
    type Error = ClipError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ClipType::NoClip),
            1 => Ok(ClipType::Intersection),
            2 => Ok(ClipType::Union),
            3 => Ok(ClipType::Difference),
            4 => Ok(ClipType::Xor),
            _ => Err(ClipError::UnknownClipType(value)),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum FillRule {
    EvenOdd = 0,
    NonZero = 1,
    Positive = 2,
    Negative = 3,
}

impl FillRule {
    pub fn is_filled(self, wind_cnt: i32) -> bool {
        match self {
            FillRule::EvenOdd => wind_cnt & 1 != 0,
            FillRule::NonZero => wind_cnt != 0,
            FillRule::Positive => wind_cnt > 0,
            FillRule::Negative => wind_cnt < 0,
        }
    }

    /// Winding count seen through the rule: absolute for EvenOdd/NonZero,
    /// negated for Negative so that "one level inside" is always 1.
    pub fn oriented_count(self, wind_cnt: i32) -> i32 {
        match self {
            FillRule::EvenOdd | FillRule::NonZero => wind_cnt.abs(),
            FillRule::Positive => wind_cnt,
            FillRule::Negative => -wind_cnt,
        }
    }
}

impl TryFrom<u8> for FillRule {
    type Error = ClipError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FillRule::EvenOdd),
            1 => Ok(FillRule::NonZero),
            2 => Ok(FillRule::Positive),
            3 => Ok(FillRule::Negative),
            _ => Err(ClipError::UnknownFillRule(value)),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum PathType {
    Subject = 0,
    Clip = 1,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum JoinWith {
    NoJoin = 0,
    Left = 1,
    Right = 2,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum PointInPolygonResult {
    IsOn = 0,
    IsInside = 1,
    IsOutside = 2,
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct VertexFlags(u8);

impl VertexFlags {
    pub const NONE: VertexFlags = VertexFlags(0);
    pub const OPEN_START: VertexFlags = VertexFlags(1);
    pub const OPEN_END: VertexFlags = VertexFlags(2);
    pub const LOCAL_MAX: VertexFlags = VertexFlags(4);
    pub const LOCAL_MIN: VertexFlags = VertexFlags(8);

    pub fn contains(self, other: VertexFlags) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: VertexFlags) {
        self.0 |= other.0;
    }

    pub fn is_open_end(self) -> bool {
        self.contains(VertexFlags::OPEN_START | VertexFlags::OPEN_END)
    }
}

impl BitOr for VertexFlags {
    type Output = VertexFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        VertexFlags(self.0 | rhs.0)
    }
}
