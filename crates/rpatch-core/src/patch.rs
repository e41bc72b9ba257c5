//! Slicing a marked source image into nine patches.

use serde::Serialize;

use rpatch_types::bitmap::Bitmap;
use rpatch_types::error::{RPatchError, Result};

use crate::border::{BorderMarkers, detect_markers};

/// The nine regions of a sliced image, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Patch {
    TopLeft,
    TopMid,
    TopRight,
    MidLeft,
    Mid,
    MidRight,
    BotLeft,
    BotMid,
    BotRight,
}

impl Patch {
    pub const ALL: [Patch; 9] = [
        Patch::TopLeft,
        Patch::TopMid,
        Patch::TopRight,
        Patch::MidLeft,
        Patch::Mid,
        Patch::MidRight,
        Patch::BotLeft,
        Patch::BotMid,
        Patch::BotRight,
    ];

    /// Row-major index, 0 (top-left) through 8 (bottom-right).
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Patch> {
        Self::ALL.get(index).copied()
    }

    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Patch::TopLeft | Patch::TopRight | Patch::BotLeft | Patch::BotRight
        )
    }
}

/// Pixel extents of the three bands on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatchDimensions {
    pub left_width: u32,
    pub mid_width: u32,
    pub right_width: u32,
    pub top_height: u32,
    pub mid_height: u32,
    pub bot_height: u32,
}

impl PatchDimensions {
    /// Derive band extents from marker positions in a `width x height` source.
    ///
    /// Corner bands may be empty; the middle band is always at least one
    /// pixel because the markers themselves belong to it.
    pub fn from_markers(markers: &BorderMarkers, width: u32, height: u32) -> Result<Self> {
        let (left_width, mid_width, right_width) =
            split_axis("horizontal", markers.h_left, markers.h_right, width)?;
        let (top_height, mid_height, bot_height) =
            split_axis("vertical", markers.v_top, markers.v_bottom, height)?;
        Ok(Self {
            left_width,
            mid_width,
            right_width,
            top_height,
            mid_height,
            bot_height,
        })
    }

    /// Sum of the three horizontal bands (source width minus markers).
    pub const fn content_width(&self) -> u32 {
        self.left_width + self.mid_width + self.right_width
    }

    /// Sum of the three vertical bands (source height minus markers).
    pub const fn content_height(&self) -> u32 {
        self.top_height + self.mid_height + self.bot_height
    }
}

/// `lead = first - 1; mid = last - lead; trail = len - mid - lead - 2`.
fn split_axis(axis: &str, first: u32, last: u32, len: u32) -> Result<(u32, u32, u32)> {
    let lead = i64::from(first) - 1;
    let mid = i64::from(last) - lead;
    let trail = i64::from(len) - mid - lead - 2;
    if lead < 0 || mid <= 0 || trail < 0 {
        return Err(RPatchError::MalformedSourceImage(format!(
            "{axis} markers {first}..={last} in {len}px give bands {lead}/{mid}/{trail}"
        )));
    }
    // All three are within 0..=len here.
    Ok((lead as u32, mid as u32, trail as u32))
}

/// Nine immutable sub-images plus their band extents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSet {
    patches: [Bitmap; 9],
    dims: PatchDimensions,
}

impl PatchSet {
    /// Detect markers and slice the source.
    pub fn extract(source: &Bitmap) -> Result<Self> {
        let markers = detect_markers(source)?;
        Self::from_markers(source, &markers)
    }

    /// Slice the source at already-detected markers. The outer one-pixel
    /// frame is excluded from every patch.
    pub fn from_markers(source: &Bitmap, markers: &BorderMarkers) -> Result<Self> {
        let dims = PatchDimensions::from_markers(markers, source.width(), source.height())?;

        let cols = [
            (1, dims.left_width),
            (markers.h_left, dims.mid_width),
            (markers.h_right + 1, dims.right_width),
        ];
        let rows = [
            (1, dims.top_height),
            (markers.v_top, dims.mid_height),
            (markers.v_bottom + 1, dims.bot_height),
        ];

        let mut slices = Vec::with_capacity(9);
        for (y, h) in rows {
            for (x, w) in cols {
                slices.push(source.sub_image(x, y, w, h)?);
            }
        }
        let patches: [Bitmap; 9] = slices.try_into().map_err(|_| {
            RPatchError::MalformedSourceImage("expected exactly nine patches".into())
        })?;

        log::debug!(
            "sliced {}x{} source into bands {}/{}/{} x {}/{}/{}",
            source.width(),
            source.height(),
            dims.left_width,
            dims.mid_width,
            dims.right_width,
            dims.top_height,
            dims.mid_height,
            dims.bot_height
        );
        Ok(Self { patches, dims })
    }

    pub fn get(&self, patch: Patch) -> &Bitmap {
        &self.patches[patch.index()]
    }

    pub fn dimensions(&self) -> &PatchDimensions {
        &self.dims
    }

    pub fn iter(&self) -> impl Iterator<Item = (Patch, &Bitmap)> {
        Patch::ALL.into_iter().zip(self.patches.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{interior_color, marked_source};
    use rpatch_types::color::Color;

    #[test]
    fn bands_follow_marker_formula() {
        // 12 wide: markers at 3..=6 -> left 2, mid 4, right 4.
        let src = marked_source(12, 10, 3..7, 2..5);
        let set = PatchSet::extract(&src).unwrap();
        let d = set.dimensions();
        assert_eq!((d.left_width, d.mid_width, d.right_width), (2, 4, 4));
        assert_eq!((d.top_height, d.mid_height, d.bot_height), (1, 3, 4));
        assert_eq!(d.content_width() + 2, 12);
        assert_eq!(d.content_height() + 2, 10);
    }

    #[test]
    fn patch_sizes_match_bands() {
        let src = marked_source(12, 10, 3..7, 2..5);
        let set = PatchSet::extract(&src).unwrap();
        let d = *set.dimensions();
        let widths = [d.left_width, d.mid_width, d.right_width];
        let heights = [d.top_height, d.mid_height, d.bot_height];
        for (patch, bmp) in set.iter() {
            let i = patch.index();
            assert_eq!(bmp.dimensions(), (widths[i % 3], heights[i / 3]), "{patch:?}");
        }
    }

    #[test]
    fn patches_skip_marker_frame() {
        let src = marked_source(12, 10, 3..7, 2..5);
        let set = PatchSet::extract(&src).unwrap();
        // Top-left patch starts at source (1, 1).
        assert_eq!(set.get(Patch::TopLeft).pixel(0, 0), Some(interior_color(1, 1)));
        // Middle starts at the first marker on each axis.
        assert_eq!(set.get(Patch::Mid).pixel(0, 0), Some(interior_color(3, 2)));
        // Bottom-right starts one past the last marker on each axis.
        assert_eq!(set.get(Patch::BotRight).pixel(0, 0), Some(interior_color(7, 5)));
        // And ends one short of the reserved last column/row.
        let br = set.get(Patch::BotRight);
        assert_eq!(
            br.pixel(br.width() - 1, br.height() - 1),
            Some(interior_color(10, 8))
        );
    }

    #[test]
    fn marker_at_index_zero_is_malformed() {
        let src = marked_source(8, 8, 0..3, 1..3);
        assert!(matches!(
            PatchSet::extract(&src),
            Err(RPatchError::MalformedSourceImage(_))
        ));
    }

    #[test]
    fn marker_on_last_column_is_malformed() {
        let src = marked_source(8, 8, 2..8, 1..3);
        assert!(matches!(
            PatchSet::extract(&src),
            Err(RPatchError::MalformedSourceImage(_))
        ));
    }

    #[test]
    fn marker_on_last_row_is_malformed() {
        let src = marked_source(8, 8, 2..4, 3..8);
        assert!(PatchSet::extract(&src).is_err());
    }

    #[test]
    fn zero_width_corners_are_allowed() {
        // Markers span the whole content: only the middle band survives.
        let src = marked_source(11, 11, 1..10, 1..10);
        let set = PatchSet::extract(&src).unwrap();
        let d = set.dimensions();
        assert_eq!((d.left_width, d.mid_width, d.right_width), (0, 9, 0));
        assert!(set.get(Patch::TopLeft).is_empty());
        assert!(set.get(Patch::BotRight).is_empty());
        assert_eq!(set.get(Patch::Mid).dimensions(), (9, 9));
    }

    #[test]
    fn eleven_pixel_source_with_trailing_band() {
        // Markers at 1..=8 leave one content pixel after the middle band.
        let src = marked_source(11, 11, 1..9, 1..9);
        let d = *PatchSet::extract(&src).unwrap().dimensions();
        assert_eq!((d.left_width, d.mid_width, d.right_width), (0, 8, 1));
        assert_eq!((d.top_height, d.mid_height, d.bot_height), (0, 8, 1));
    }

    #[test]
    fn patch_index_round_trip() {
        for (i, p) in Patch::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
            assert_eq!(Patch::from_index(i), Some(*p));
        }
        assert_eq!(Patch::from_index(9), None);
    }

    #[test]
    fn corners_are_flagged() {
        let corners: Vec<_> = Patch::ALL.into_iter().filter(|p| p.is_corner()).collect();
        assert_eq!(
            corners,
            vec![Patch::TopLeft, Patch::TopRight, Patch::BotLeft, Patch::BotRight]
        );
    }

    #[test]
    fn markers_color_is_ignored() {
        // Any non-zero alpha counts, regardless of color.
        let mut data = Vec::new();
        for y in 0..5u32 {
            for x in 0..5u32 {
                let c = if (y == 0 && x == 2) || (x == 0 && y == 2) {
                    Color::rgba(200, 10, 10, 1)
                } else {
                    Color::WHITE
                };
                let c = if (y == 0 || x == 0) && c == Color::WHITE {
                    Color::TRANSPARENT
                } else {
                    c
                };
                data.extend_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
        let src = Bitmap::from_rgba(5, 5, data).unwrap();
        let d = *PatchSet::extract(&src).unwrap().dimensions();
        assert_eq!((d.left_width, d.mid_width, d.right_width), (1, 1, 1));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_source() -> impl Strategy<Value = (u32, u32, u32, u32, u32, u32)> {
            (3u32..40, 3u32..40).prop_flat_map(|(w, h)| {
                (
                    Just(w),
                    Just(h),
                    1..w - 1,
                    1..h - 1,
                    0u32..w,
                    0u32..h,
                )
                    .prop_map(|(w, h, hl, vt, hs, vs)| {
                        // hs/vs pick a span that ends before the last column/row.
                        let hr = hl + hs % (w - 1 - hl);
                        let vb = vt + vs % (h - 1 - vt);
                        (w, h, hl, hr, vt, vb)
                    })
            })
        }

        proptest! {
            #[test]
            fn band_sums_match_source((w, h, hl, hr, vt, vb) in arb_source()) {
                let src = marked_source(w, h, hl..hr + 1, vt..vb + 1);
                let set = PatchSet::extract(&src).unwrap();
                let d = set.dimensions();
                prop_assert_eq!(d.left_width + d.mid_width + d.right_width + 2, w);
                prop_assert_eq!(d.top_height + d.mid_height + d.bot_height + 2, h);
                prop_assert!(d.mid_width >= 1 && d.mid_height >= 1);
            }
        }
    }
}
