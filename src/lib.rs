use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::js_sys::Int32Array;

pub mod clipper;
pub mod clipper_wrapper;
pub mod geometry;
pub mod utils;

use crate::clipper::{ClipType, FillRule};
use crate::clipper_wrapper::boolean_op;
use crate::geometry::point::{Path64, Paths64, Point64};
use crate::utils::number::Number;
use crate::utils::wasm_logger::{init_console_logger, level_filter};

#[wasm_bindgen]
pub fn init_logger(level: u8) {
    init_console_logger(level_filter(level));
}

#[wasm_bindgen]
pub fn polygon_area_i32(points: &[i32]) -> f64 {
    Number::polygon_area(points)
}

/// Reads a packed collection `[count, offset_0, .., offset_n-1, x0, y0, ..]`.
/// Offsets count coordinates from the start of the data block. Returns
/// `None` when the header does not fit the buffer.
pub fn unpack_paths_i32(buff: &[i32]) -> Option<Paths64> {
    let count = usize::try_from(*buff.first()?).ok()?;
    let header_len = count.checked_add(1)?;
    let data = buff.get(header_len..)?;
    let mut offsets = Vec::with_capacity(count + 1);

    for &offset in &buff[1..header_len] {
        offsets.push(usize::try_from(offset).ok()?);
    }
    offsets.push(data.len());

    let mut paths = Paths64::with_capacity(count);
    for window in offsets.windows(2) {
        let (start, end) = (window[0], window[1]);
        if start > end || end > data.len() || (end - start) & 1 != 0 {
            return None;
        }

        let path: Path64 = data[start..end]
            .chunks_exact(2)
            .map(|chunk| Point64::new(chunk[0] as i64, chunk[1] as i64))
            .collect();
        paths.push(path);
    }

    Some(paths)
}

pub fn pack_paths_i32(paths: &[Path64]) -> Vec<i32> {
    let count = paths.len();
    let total_points: usize = paths.iter().map(|path| path.len()).sum();
    let header_len = 1 + count;
    let mut out = Vec::with_capacity(header_len + total_points * 2);

    out.resize(header_len, 0);
    out[0] = count as i32;

    let mut running: usize = 0;
    for (i, path) in paths.iter().enumerate() {
        out[1 + i] = running as i32;
        running += path.len() * 2;
    }

    // clipped coordinates never leave the bounds of the i32 input
    for path in paths {
        for point in path {
            out.push(point.x as i32);
            out.push(point.y as i32);
        }
    }

    out
}

/// Clips packed subject and clip collections, returning the packed closed
/// solution. Bad codes, malformed buffers and failed sweeps give `[0]`.
pub fn clip_paths_inner(subject: &[i32], clip: &[i32], clip_type: u8, fill_rule: u8) -> Vec<i32> {
    let empty = vec![0];

    let (clip_type, fill_rule) = match (ClipType::try_from(clip_type), FillRule::try_from(fill_rule)) {
        (Ok(clip_type), Ok(fill_rule)) => (clip_type, fill_rule),
        (Err(error), _) | (_, Err(error)) => {
            warn!("clip_paths_i32: {}", error);
            return empty;
        }
    };

    let (Some(subjects), Some(clips)) = (unpack_paths_i32(subject), unpack_paths_i32(clip)) else {
        warn!("clip_paths_i32: malformed path buffer");
        return empty;
    };

    match boolean_op(clip_type, fill_rule, &subjects, &clips) {
        Ok(solution) => pack_paths_i32(&solution),
        Err(error) => {
            warn!("clip_paths_i32: {}", error);
            empty
        }
    }
}

#[wasm_bindgen]
pub fn clip_paths_i32(subject: &[i32], clip: &[i32], clip_type: u8, fill_rule: u8) -> Int32Array {
    let packed = clip_paths_inner(subject, clip, clip_type, fill_rule);
    let out = Int32Array::new_with_length(packed.len() as u32);
    out.copy_from(&packed);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed_square(left: i32, top: i32, size: i32) -> Vec<i32> {
        vec![
            1,
            0,
            left,
            top,
            left + size,
            top,
            left + size,
            top + size,
            left,
            top + size,
        ]
    }

    #[test]
    fn test_unpack_paths() {
        let buff = vec![2, 0, 6, 0, 0, 1, 0, 1, 1, 5, 5, 6, 5, 6, 6, 5, 6];
        let paths = unpack_paths_i32(&buff).unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].len(), 3);
        assert_eq!(paths[1].len(), 4);
        assert_eq!(paths[1][3], Point64::new(5, 6));
    }

    #[test]
    fn test_unpack_rejects_bad_header() {
        assert!(unpack_paths_i32(&[]).is_none());
        assert!(unpack_paths_i32(&[3, 0]).is_none());
        assert!(unpack_paths_i32(&[1, 3, 0, 0]).is_none());
        assert!(unpack_paths_i32(&[-1]).is_none());
    }

    #[test]
    fn test_pack_matches_unpack_layout() {
        let paths = vec![
            vec![Point64::new(0, 0), Point64::new(4, 0), Point64::new(4, 4)],
            vec![Point64::new(1, 1), Point64::new(2, 1), Point64::new(2, 2), Point64::new(1, 2)],
        ];
        let packed = pack_paths_i32(&paths);

        assert_eq!(&packed[..3], &[2, 0, 6]);
        assert_eq!(packed.len(), 3 + 14);
        assert_eq!(unpack_paths_i32(&packed).unwrap(), paths);
    }

    #[test]
    fn test_clip_paths_intersection() {
        let result = clip_paths_inner(&packed_square(0, 0, 10), &packed_square(5, 5, 10), 1, 1);
        let paths = unpack_paths_i32(&result).unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 4);
    }

    #[test]
    fn test_clip_paths_unknown_codes() {
        assert_eq!(clip_paths_inner(&packed_square(0, 0, 10), &[0], 9, 1), vec![0]);
        assert_eq!(clip_paths_inner(&packed_square(0, 0, 10), &[0], 2, 7), vec![0]);
    }

    #[test]
    fn test_polygon_area_i32() {
        assert_eq!(polygon_area_i32(&[0, 0, 10, 0, 10, 10, 0, 10]), 100.0);
        assert_eq!(polygon_area_i32(&[0, 0, 10, 0]), 0.0);
    }
}
