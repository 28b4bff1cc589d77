// Polygon clipping: the sweep engine, its element stores and the
// structures the solution is returned in.

pub mod clipper;
pub mod constants;
pub mod enums;
pub mod error;
pub mod intersect_node;
pub mod join;
pub mod local_minima;
pub mod out_pt;
pub mod out_rec;
pub mod poly_tree;
pub mod scanbeam;
pub mod t_edge;
pub mod utils;

#[cfg(test)]
mod tests;

pub use clipper::{Clipper, ClipperOptions};
pub use constants::*;
pub use enums::*;
pub use error::ClipError;
pub use poly_tree::{poly_tree_to_paths, PolyPath, PolyTree};
