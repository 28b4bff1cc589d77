pub mod bound_rect;
pub mod point;
pub mod polygon;
