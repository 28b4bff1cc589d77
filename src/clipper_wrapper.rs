use crate::clipper::{ClipError, ClipType, Clipper, ClipperOptions, FillRule, PolyTree};
use crate::geometry::point::{Path64, Paths64};

/// Runs one boolean operation over closed subjects and clips with the
/// default options.
pub fn boolean_op(
    clip_type: ClipType,
    fill_rule: FillRule,
    subjects: &[Path64],
    clips: &[Path64],
) -> Result<Paths64, ClipError> {
    let mut clipper = Clipper::new(ClipperOptions::default());
    let mut solution = Paths64::new();

    clipper.add_subject(subjects);
    clipper.add_clip(clips);
    clipper.execute(clip_type, fill_rule, &mut solution)?;

    Ok(solution)
}

/// Like `boolean_op`, with the nesting of the result kept in a tree.
pub fn boolean_op_tree(
    clip_type: ClipType,
    fill_rule: FillRule,
    subjects: &[Path64],
    clips: &[Path64],
) -> Result<PolyTree, ClipError> {
    let mut clipper = Clipper::new(ClipperOptions::default());
    let mut tree = PolyTree::new();
    let mut open = Paths64::new();

    clipper.add_subject(subjects);
    clipper.add_clip(clips);
    clipper.execute_tree(clip_type, fill_rule, &mut tree, &mut open)?;

    Ok(tree)
}

pub fn union_paths(subjects: &Paths64, fill_rule: FillRule) -> Result<Paths64, ClipError> {
    boolean_op(ClipType::Union, fill_rule, subjects, &[])
}

pub fn intersect_paths(subjects: &Paths64, clips: &Paths64, fill_rule: FillRule) -> Result<Paths64, ClipError> {
    boolean_op(ClipType::Intersection, fill_rule, subjects, clips)
}

pub fn difference_paths(subjects: &Paths64, clips: &Paths64, fill_rule: FillRule) -> Result<Paths64, ClipError> {
    boolean_op(ClipType::Difference, fill_rule, subjects, clips)
}

pub fn xor_paths(subjects: &Paths64, clips: &Paths64, fill_rule: FillRule) -> Result<Paths64, ClipError> {
    boolean_op(ClipType::Xor, fill_rule, subjects, clips)
}
