//! Marker detection along the first row and column of a source image.

use rpatch_types::bitmap::Bitmap;
use rpatch_types::error::{RPatchError, Result};

/// Pixel indices of the first and last opaque marker on each axis.
///
/// `h_left`/`h_right` index into row 0, `v_top`/`v_bottom` into column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderMarkers {
    pub h_left: u32,
    pub h_right: u32,
    pub v_top: u32,
    pub v_bottom: u32,
}

/// Scan row 0 and column 0 for pixels with non-zero alpha.
pub fn detect_markers(source: &Bitmap) -> Result<BorderMarkers> {
    let (width, height) = source.dimensions();
    if width < 3 || height < 3 {
        return Err(RPatchError::MalformedSourceImage(format!(
            "source is {width}x{height}, need at least 3x3 for markers and content"
        )));
    }

    let (h_left, h_right) = scan(width, |i| source.alpha(i, 0))
        .ok_or_else(|| RPatchError::MalformedSourceImage("no marker in row 0".into()))?;
    let (v_top, v_bottom) = scan(height, |i| source.alpha(0, i))
        .ok_or_else(|| RPatchError::MalformedSourceImage("no marker in column 0".into()))?;

    let markers = BorderMarkers {
        h_left,
        h_right,
        v_top,
        v_bottom,
    };
    log::debug!("detected border markers {markers:?} in {width}x{height} source");
    Ok(markers)
}

/// First and last index in `0..len` whose alpha is non-zero.
fn scan(len: u32, alpha: impl Fn(u32) -> u8) -> Option<(u32, u32)> {
    let first = (0..len).find(|&i| alpha(i) != 0)?;
    let last = (first..len).rev().find(|&i| alpha(i) != 0)?;
    Some((first, last))
}
